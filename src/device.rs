//! High-level driver API for the KXTJ9
//!
//! [`Kxtj9`] owns the register interface and keeps shadow copies of the three
//! operating-mode registers (`CTRL_REG1`, `DATA_CTRL_REG`, `INT_CTRL_REG1`).
//! The shadows are only committed after the corresponding bus write succeeds,
//! and every power-up sequence rewrites the hardware from them.
//!
//! The host serializes all calls on one instance (the methods take
//! `&mut self`); [`Kxtj9::is_enabled`] is the only state readable through a
//! shared reference.
//!
//! # Example
//!
//! ```ignore
//! static STATE: SharedSensorState = SharedSensorState::new();
//!
//! let interface = I2cInterface::default(i2c);
//! let platform = PlatformData::new(BoardVariant::Me175cg);
//! let mut accel = Kxtj9::probe(interface, platform, input, &STATE, Some(irq_line))?;
//!
//! accel.enable()?;
//! // from the interrupt thread
//! accel.handle_interrupt(&mut delay)?;
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

use crate::calibration::{self, Calibration, CalibrationSource, CalibrationStatus, MAX_FILE_LEN};
use crate::config::{
    BoardVariant, BuildType, DebugFlags, MessagePreset, PlatformData, ProjectId, ProjectMode,
};
use crate::input::{InputEvent, InputSink};
use crate::interrupt::{InterruptConfig, IrqLine, NoIrq};
use crate::odr::{self, Resolution};
use crate::power::{PowerState, SuspendState};
use crate::registers::ctrl_reg1::{DRDYE, GSEL, PC1, RES};
use crate::registers::{RegisterDevice, CTRL_REG1, DATA_CTRL_REG, XOUT_L};
use crate::sample::{AccelSample, AxisLayout, RawSample, SAMPLE_BYTES};
use crate::shared::SharedSensorState;
use crate::{Error, WHO_AM_I_KXTJ2, WHO_AM_I_KXTJ9, WHO_AM_I_LEGACY};

/// Time the sensor needs after a soft reset before it accepts register writes
pub const RESET_DELAY_MS: u32 = 50;

/// Settling time before raw bytes are handed out after an implicit enable
pub const RAWDATA_SETTLE_MS: u32 = 100;

/// Size of the output burst in bits
const SAMPLE_BITS: u32 = 48;

/// Chip identified by `WHO_AM_I`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipVariant {
    /// KXTJ9 (0x08)
    Kxtj9,
    /// KXTJ2 (0x09)
    Kxtj2,
    /// Older Kionix part that answers with a legacy identity byte
    Legacy(u8),
}

impl ChipVariant {
    /// Classify an identity byte, `None` if the part is not supported
    #[must_use]
    pub fn from_who_am_i(value: u8) -> Option<Self> {
        match value {
            WHO_AM_I_KXTJ9 => Some(Self::Kxtj9),
            WHO_AM_I_KXTJ2 => Some(Self::Kxtj2),
            other if WHO_AM_I_LEGACY.contains(&other) => Some(Self::Legacy(other)),
            _ => None,
        }
    }

    /// Short chip name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kxtj2 => "kxtj2",
            Self::Kxtj9 | Self::Legacy(_) => "kxtj9",
        }
    }
}

fn bit(value: u8, shift: u8) -> bool {
    value & (1 << shift) != 0
}

/// Main driver for the KXTJ9
pub struct Kxtj9<'s, I, S, Q = NoIrq> {
    device: RegisterDevice<I>,
    // Shadow registers
    ctrl_reg1: u8,
    data_ctrl: u8,
    int_ctrl: u8,
    // Power state
    enabled: AtomicBool,
    power_state: PowerState,
    suspend_state: SuspendState,
    pending_enable: bool,
    last_poll_interval_ms: u32,
    // Interrupt line, `None` on polled boards
    irq: Option<Q>,
    irq_masked: bool,
    // Board identity
    board: BoardVariant,
    chip: ChipVariant,
    layout: AxisLayout,
    calibration: Calibration,
    // Sample cache
    last_raw: Option<RawSample>,
    last_bytes: [u8; SAMPLE_BYTES],
    last_sample: AccelSample,
    // Runtime configuration
    debug: DebugFlags,
    project_mode: ProjectMode,
    project_id: ProjectId,
    sink: S,
    shared: &'s SharedSensorState,
}

impl<'s, I, S, Q> Kxtj9<'s, I, S, Q>
where
    I: RegisterInterface<AddressType = u8>,
    S: InputSink,
    Q: IrqLine,
{
    /// Attach to a sensor
    ///
    /// Verifies the chip identity (leaving the sensor in stand-by) and prepares
    /// the shadow registers for the board. Passing an interrupt line selects
    /// interrupt mode: data-ready is enabled on a pulsed, active-high pin and
    /// the range is fixed to ±2 g. The sensor stays in stand-by until
    /// [`enable`](Self::enable).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unsupported value
    pub fn probe(
        interface: I,
        platform: PlatformData,
        sink: S,
        shared: &'s SharedSensorState,
        irq: Option<Q>,
    ) -> Result<Self, Error<I::Error>> {
        let board = platform.board;
        let mut driver = Self {
            device: RegisterDevice::new(interface),
            ctrl_reg1: 0,
            data_ctrl: 0,
            int_ctrl: 0,
            enabled: AtomicBool::new(false),
            power_state: PowerState::Off,
            suspend_state: SuspendState::Running,
            pending_enable: false,
            last_poll_interval_ms: platform.init_interval_ms,
            irq,
            irq_masked: false,
            board,
            chip: ChipVariant::Kxtj9,
            layout: board.axis_layout(),
            calibration: Calibration::default(),
            last_raw: None,
            last_bytes: [0; SAMPLE_BYTES],
            last_sample: AccelSample::default(),
            debug: DebugFlags::default(),
            project_mode: ProjectMode::Normal,
            project_id: ProjectId::Me372cgKxtj9,
            sink,
            shared,
        };

        driver.chip = driver.verify()?;

        if board.default_12bit() {
            driver.ctrl_reg1 |= RES;
        }

        if driver.irq.is_some() {
            driver.int_ctrl = InterruptConfig::data_ready().to_raw();
            if platform.build == BuildType::Eng {
                if let Some(project) = board.eng_project() {
                    driver.project_mode = ProjectMode::Eng;
                    driver.project_id = project;
                    driver.ctrl_reg1 |= RES;
                }
            }
            driver.ctrl_reg1 |= DRDYE;
            driver.ctrl_reg1 &= !GSEL;
        }

        info!(
            "kxtj9: probed, irq mode {}, ctrl_reg1 {=u8:#x}",
            driver.irq.is_some(),
            driver.ctrl_reg1
        );
        Ok(driver)
    }

    /// Check the identity register
    ///
    /// Accepts the KXTJ9 (0x08), the KXTJ2 (0x09) and the legacy values
    /// 0x04, 0x07 and 0x0F. The sensor is put in stand-by afterwards whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails and [`Error::InvalidDevice`]
    /// for any other identity byte.
    pub fn verify(&mut self) -> Result<ChipVariant, Error<I::Error>> {
        let who_am_i = self.device.who_am_i().read().map(|reg| reg.who_am_i());
        self.power_off();

        let who_am_i = who_am_i?;
        let chip = ChipVariant::from_who_am_i(who_am_i).ok_or_else(|| {
            warn!("kxtj9: unexpected WHO_AM_I {=u8:#x}", who_am_i);
            Error::InvalidDevice(who_am_i)
        })?;
        info!("kxtj9: using {=str}", chip.name());
        Ok(chip)
    }

    /// Start measuring
    ///
    /// Rewrites the interrupt and control registers from the shadows with the
    /// sensor in stand-by, powers it up, applies the output data rate for the
    /// current poll interval and, in interrupt mode, clears any stale
    /// interrupt. While the host has the driver suspended nothing is written;
    /// the request is remembered and carried out by [`resume`](Self::resume).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The sensor is
    /// powered back off before returning.
    pub fn enable(&mut self) -> Result<(), Error<I::Error>> {
        if self.suspend_state.is_suspended() {
            warn!("kxtj9: enable while suspended, deferred to resume");
            self.pending_enable = true;
            return Ok(());
        }

        self.power_state = PowerState::Configuring;
        match self.power_up(true) {
            Ok(()) => {
                self.power_state = PowerState::On;
                self.enabled.store(true, Ordering::Release);
                if self.debug.debug {
                    debug!("kxtj9: enabled, ctrl_reg1 {=u8:#x}", self.ctrl_reg1);
                }
                Ok(())
            }
            Err(e) => {
                error!("kxtj9: enable failed");
                self.power_off();
                self.power_state = PowerState::Off;
                Err(e)
            }
        }
    }

    /// Stop measuring
    ///
    /// A failed write is logged only; the device may already be unreachable.
    /// While suspended this drops a pending enable, but a sensor that was
    /// measuring at suspend is still restored by [`resume`](Self::resume).
    pub fn disable(&mut self) {
        if self.suspend_state.is_suspended() {
            self.pending_enable = false;
        }
        self.enabled.store(false, Ordering::Release);
        self.power_off();
    }

    /// Put the sensor in stand-by without touching the enabled flag
    pub fn power_off(&mut self) {
        let value = self.ctrl_reg1 & !PC1;
        if self.write_ctrl_reg1(value).is_ok() {
            self.ctrl_reg1 = value;
            self.power_state = PowerState::Off;
        } else {
            error!("kxtj9: soft power off failed");
        }
        if self.debug.debug {
            debug!("kxtj9: power off, ctrl_reg1 {=u8:#x}", self.ctrl_reg1);
        }
    }

    /// Power up for the orientation service
    ///
    /// Same sequence as [`enable`](Self::enable) without the data rate update,
    /// and without changing the enabled flag reported to the host.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; the sensor is
    /// powered back off.
    pub fn enable_by_orientation(&mut self) -> Result<(), Error<I::Error>> {
        self.power_state = PowerState::Configuring;
        match self.power_up(false) {
            Ok(()) => {
                self.power_state = PowerState::On;
                Ok(())
            }
            Err(e) => {
                error!("kxtj9: orientation enable failed");
                self.power_off();
                self.power_state = PowerState::Off;
                Err(e)
            }
        }
    }

    /// Soft-reset the sensor and bring it back up measuring
    ///
    /// Writes `SRST`, waits [`RESET_DELAY_MS`], then restores every shadowed
    /// register and powers up. On success the driver reports itself enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The sensor is
    /// then left in stand-by and the driver reports itself disabled.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.power_state = PowerState::Resetting;
        match self.reset_sequence(delay) {
            Ok(()) => {
                self.power_state = PowerState::On;
                self.enabled.store(true, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                error!("kxtj9: soft reset failed");
                self.power_off();
                self.enabled.store(false, Ordering::Release);
                self.power_state = PowerState::Off;
                Err(e)
            }
        }
    }

    /// Change the poll interval and reprogram the output data rate for it
    ///
    /// The interval is recorded even when the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_poll_interval(&mut self, interval_ms: u32) -> Result<(), Error<I::Error>> {
        let result = self.update_odr(interval_ms);
        self.last_poll_interval_ms = interval_ms;
        if result.is_err() {
            error!("kxtj9: data rate update failed");
            self.sync_power_state();
        }
        result
    }

    /// Select 8-bit or 12-bit output
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; the shadow
    /// keeps its previous value.
    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Error<I::Error>> {
        let value = match resolution {
            Resolution::Bits8 => self.ctrl_reg1 & !RES,
            Resolution::Bits12 => self.ctrl_reg1 | RES,
        };
        self.write_ctrl_reg1(value)?;
        self.ctrl_reg1 = value;
        Ok(())
    }

    /// Polled-mode tick
    ///
    /// Reads and publishes one sample, then follows the host's poll interval
    /// if it changed since the last tick.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn poll<D>(&mut self, interval_ms: u32, delay: &mut D) -> Result<AccelSample, Error<I::Error>>
    where
        D: DelayNs,
    {
        let sample = self.report(delay);
        if interval_ms != self.last_poll_interval_ms {
            self.set_poll_interval(interval_ms)?;
        }
        if self.debug.debug {
            debug!("kxtj9: poll interval {=u32}", self.last_poll_interval_ms);
        }
        sample
    }

    /// Data-ready interrupt handler
    ///
    /// Reads and publishes one sample, then releases the interrupt latch. A
    /// failed release is logged only.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the sample fails.
    pub fn handle_interrupt<D>(&mut self, delay: &mut D) -> Result<AccelSample, Error<I::Error>>
    where
        D: DelayNs,
    {
        let sample = self.report(delay);
        if self.device.int_rel().read().is_err() {
            warn!("kxtj9: interrupt release failed");
        }
        sample
    }

    /// Read one sample and publish it
    ///
    /// A sample identical to the previous one, or all-zero, means the sensor
    /// has locked up; it is soft-reset before the sample is published anyway.
    fn report<D>(&mut self, delay: &mut D) -> Result<AccelSample, Error<I::Error>>
    where
        D: DelayNs,
    {
        let mut bytes = [0u8; SAMPLE_BYTES];
        self.device
            .interface
            .read_register(XOUT_L, SAMPLE_BITS, &mut bytes)?;
        let raw = RawSample::from_bytes(&bytes);

        let repeated = self.last_raw == Some(raw);
        if repeated || raw.is_zero() {
            warn!(
                "kxtj9: stuck output ({=bool} repeated), resetting",
                repeated
            );
            // The sample is still delivered; a failed reset only shows in the log
            let _ = self.reset(delay);
        }

        self.last_raw = Some(raw);
        self.last_bytes = bytes;

        let sample = self.layout.apply(&raw, &self.calibration);
        if self.debug.debug {
            debug!(
                "kxtj9: report {=i32} {=i32} {=i32}",
                sample.x,
                sample.y,
                sample.z
            );
        }

        self.last_sample = sample;
        self.shared.publish(sample);
        for event in InputEvent::for_sample(&sample) {
            self.sink.emit(event);
        }
        Ok(sample)
    }

    /// Reload factory calibration
    ///
    /// Reads at most [`MAX_FILE_LEN`] bytes from `source` and recomputes
    /// offsets and sensitivities. An empty source is not an error: the
    /// readings are cleared and [`CalibrationStatus::Empty`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Calibration`] if the source cannot be read or does not
    /// parse. Calibration falls back to defaults in that case.
    pub fn reload_calibration<C>(
        &mut self,
        source: &mut C,
    ) -> Result<CalibrationStatus, Error<I::Error>>
    where
        C: CalibrationSource + ?Sized,
    {
        let mut buf = [0u8; MAX_FILE_LEN];
        let loaded = source
            .read(&mut buf)
            .and_then(|len| Ok((len, calibration::parse(&buf[..len])?)));

        let (len, data) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("kxtj9: calibration unavailable, using defaults");
                self.calibration = Calibration::default();
                return Err(Error::Calibration(e));
            }
        };

        self.calibration.update(data, self.layout);
        if self.debug.calibration {
            let cal = &self.calibration;
            info!(
                "kxtj9: calibration six-plane {=bool} offset {=i32} {=i32} {=i32} sensitivity {=i32} {=i32} {=i32}",
                cal.six_plane,
                cal.offset[0],
                cal.offset[1],
                cal.offset[2],
                cal.sensitivity[0],
                cal.sensitivity[1],
                cal.sensitivity[2]
            );
        }

        Ok(if len > 0 {
            CalibrationStatus::Loaded
        } else {
            CalibrationStatus::Empty
        })
    }

    /// Host suspend hook
    ///
    /// Remembers whether the sensor was measuring, masks the interrupt line if
    /// it was and powers the sensor down.
    pub fn suspend(&mut self) {
        if self.suspend_state.is_suspended() {
            return;
        }

        let was_enabled = self.ctrl_reg1 & PC1 != 0;
        self.suspend_state = SuspendState::suspended(was_enabled);
        self.pending_enable = false;

        if was_enabled {
            if let Some(irq) = self.irq.as_mut() {
                irq.mask();
                self.irq_masked = true;
            }
        }

        self.enabled.store(false, Ordering::Release);
        self.power_off();
        info!("kxtj9: suspended, was enabled {=bool}", was_enabled);
    }

    /// Host resume hook
    ///
    /// Re-enables the sensor if it was measuring at suspend or an enable
    /// arrived while suspended, then unmasks the interrupt line if suspend
    /// masked it.
    ///
    /// # Errors
    ///
    /// Returns an error if re-enabling fails. The line is unmasked anyway.
    pub fn resume(&mut self) -> Result<(), Error<I::Error>> {
        if !self.suspend_state.is_suspended() {
            return Ok(());
        }

        let restore =
            self.suspend_state == SuspendState::SuspendedWasEnabled || self.pending_enable;
        self.suspend_state = SuspendState::Running;
        self.pending_enable = false;

        let result = if restore { self.enable() } else { Ok(()) };

        if self.irq_masked {
            if let Some(irq) = self.irq.as_mut() {
                irq.unmask();
            }
            self.irq_masked = false;
        }

        info!("kxtj9: resumed, enable {=bool}", restore);
        result
    }

    /// Detach from the sensor
    ///
    /// Powers the sensor down and hands back the interface, the input sink and
    /// the interrupt line.
    pub fn remove(mut self) -> (I, S, Option<Q>) {
        self.disable();
        let Self {
            device, sink, irq, ..
        } = self;
        (device.interface, sink, irq)
    }

    /// Apply a `message` preset
    pub fn apply_message_preset(&mut self, preset: MessagePreset) {
        self.debug.apply(preset);
        match preset {
            MessagePreset::NormalMode => self.project_mode = ProjectMode::Normal,
            MessagePreset::EngMode => self.project_mode = ProjectMode::Eng,
            MessagePreset::BusReset => self.shared.request_bus_reset(),
            _ => {}
        }
        info!(
            "kxtj9: debug {=bool} register {=bool} calibration {=bool}",
            self.debug.debug,
            self.debug.register,
            self.debug.calibration
        );
    }

    /// Read the identity register without side effects
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.who_am_i().read()?.who_am_i())
    }

    /// Read `CTRL_REG1` from the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_ctrl_reg1(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_raw(CTRL_REG1)
    }

    /// Read `DATA_CTRL_REG` from the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_data_ctrl(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_raw(DATA_CTRL_REG)
    }

    /// Whether the driver reports the sensor as enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Whether the board wired the interrupt line
    pub const fn is_irq_mode(&self) -> bool {
        self.irq.is_some()
    }

    /// Last configured poll interval in milliseconds
    pub const fn poll_interval_ms(&self) -> u32 {
        self.last_poll_interval_ms
    }

    /// Shadow of `CTRL_REG1`
    pub const fn ctrl_reg1(&self) -> u8 {
        self.ctrl_reg1
    }

    /// Shadow of `DATA_CTRL_REG`
    pub const fn data_ctrl(&self) -> u8 {
        self.data_ctrl
    }

    /// Shadow of `INT_CTRL_REG1`
    pub const fn int_ctrl(&self) -> u8 {
        self.int_ctrl
    }

    /// Register-sequence state
    pub const fn power_state(&self) -> PowerState {
        self.power_state
    }

    /// Host suspend state
    pub const fn suspend_state(&self) -> SuspendState {
        self.suspend_state
    }

    /// Whether an enable arrived while suspended
    pub const fn pending_enable(&self) -> bool {
        self.pending_enable
    }

    /// Identified chip
    pub const fn chip(&self) -> ChipVariant {
        self.chip
    }

    /// Board the driver was probed for
    pub const fn board(&self) -> BoardVariant {
        self.board
    }

    /// Axis transform in use
    pub const fn layout(&self) -> AxisLayout {
        self.layout
    }

    /// Current calibration
    pub const fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Last published sample
    pub const fn last_sample(&self) -> AccelSample {
        self.last_sample
    }

    /// Output bytes of the last sample, as read from the device
    pub const fn last_raw_bytes(&self) -> [u8; SAMPLE_BYTES] {
        self.last_bytes
    }

    /// Runtime log flags
    pub const fn debug_flags(&self) -> DebugFlags {
        self.debug
    }

    /// Current project mode
    pub const fn project_mode(&self) -> ProjectMode {
        self.project_mode
    }

    /// Project identity used by the data rate policy
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &RegisterDevice<I> {
        &self.device
    }

    fn power_up(&mut self, update_odr: bool) -> Result<(), Error<I::Error>> {
        // pc must be clear while the mode registers change
        self.write_ctrl_reg1(0)?;
        self.ctrl_reg1 &= !PC1;

        if self.irq.is_some() {
            self.write_int_ctrl(self.int_ctrl)?;
        }

        let value = self.ctrl_reg1 | PC1;
        self.write_ctrl_reg1(value)?;
        self.ctrl_reg1 = value;

        if update_odr {
            self.update_odr(self.last_poll_interval_ms)?;
        }

        if self.irq.is_some() {
            self.device.int_rel().read()?;
        }
        Ok(())
    }

    fn reset_sequence<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.device.ctrl_reg_2().write(|w| {
            w.set_srst(true);
        })?;
        self.ctrl_reg1 &= !PC1;
        delay.delay_ms(RESET_DELAY_MS);

        self.write_ctrl_reg1(0)?;
        if self.irq.is_some() {
            self.write_int_ctrl(self.int_ctrl)?;
        }
        // Soft reset restores the default rate
        self.write_data_ctrl(self.data_ctrl)?;

        let value = self.ctrl_reg1 | PC1;
        self.write_ctrl_reg1(value)?;
        self.ctrl_reg1 = value;

        if self.irq.is_some() {
            self.device.int_rel().read()?;
        }
        Ok(())
    }

    /// Program the data rate for `interval_ms`
    ///
    /// Outside normal mode on the ME372CG project the table's resolution tier
    /// is left alone.
    fn update_odr(&mut self, interval_ms: u32) -> Result<(), Error<I::Error>> {
        let entry = odr::select(interval_ms);

        let mut value = self.ctrl_reg1;
        if self.project_mode == ProjectMode::Normal && self.project_id != ProjectId::Me372cgKxtj9 {
            match entry.resolution {
                Resolution::Bits8 => value &= !RES,
                Resolution::Bits12 => value |= RES,
            }
        }

        if self.debug.register {
            debug!(
                "kxtj9: odr for {=u32} ms: cutoff {=u32}, data_ctrl {=u8:#x}, ctrl_reg1 {=u8:#x}",
                interval_ms,
                entry.cutoff_ms,
                entry.rate.bits(),
                value
            );
        }

        self.write_ctrl_reg1(0)?;
        self.ctrl_reg1 &= !PC1;

        self.write_data_ctrl(entry.rate.bits())?;
        self.data_ctrl = entry.rate.bits();

        self.write_ctrl_reg1(value)?;
        self.ctrl_reg1 = value;
        Ok(())
    }

    /// Realign the enabled flag with the shadow after a failed sequence
    fn sync_power_state(&mut self) {
        let on = self.ctrl_reg1 & PC1 != 0;
        self.enabled.store(on, Ordering::Release);
        self.power_state = if on { PowerState::On } else { PowerState::Off };
    }

    fn write_ctrl_reg1(&mut self, value: u8) -> Result<(), I::Error> {
        self.device.ctrl_reg_1().write(|w| {
            w.set_tpe(bit(value, 0));
            w.set_wufe(bit(value, 1));
            w.set_tdte(bit(value, 2));
            w.set_gsel((value & GSEL) >> 3);
            w.set_drdye(bit(value, 5));
            w.set_res(bit(value, 6));
            w.set_pc(bit(value, 7));
        })
    }

    fn write_data_ctrl(&mut self, value: u8) -> Result<(), I::Error> {
        self.device.data_ctrl_reg().write(|w| {
            w.set_osa(value & 0x0F);
        })
    }

    fn write_int_ctrl(&mut self, value: u8) -> Result<(), I::Error> {
        self.device.int_ctrl_reg_1().write(|w| {
            w.set_ste(bit(value, 1));
            w.set_iel(bit(value, 3));
            w.set_iea(bit(value, 4));
            w.set_ien(bit(value, 5));
        })
    }

    fn read_raw(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        let mut buffer = [0u8; 1];
        self.device.interface.read_register(address, 8, &mut buffer)?;
        Ok(buffer[0])
    }
}
