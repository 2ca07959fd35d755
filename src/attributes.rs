//! Text control surface
//!
//! The host exposes a handful of named attributes (sysfs style) that userspace
//! reads and writes as short decimal strings:
//!
//! | Attribute     | Read                                   | Write                         |
//! |---------------|----------------------------------------|-------------------------------|
//! | `enable`      | `0` / `1`                              | 0 off, 1 on, 2 stand-by, 3 orientation |
//! | `delay`       | `<interval>,<DATA_CTRL_REG>`           | poll interval in ms           |
//! | `rawdata`     | last six output bytes, hex             |                               |
//! | `state`       | `1` if the chip identifies correctly   |                               |
//! | `cal_rawdata` | last published `x y z`                 |                               |
//! | `calibration` | reloads calibration, `1` if data found |                               |
//! | `resolution`  | `CTRL_REG1` read from the device       | 0 = 8-bit, 1 = 12-bit         |
//! | `reset`       | soft-resets the sensor, `0`            |                               |
//! | `message`     | `1`                                    | log/mode preset 0-7           |
//!
//! Reads of `rawdata`, `calibration` and `reset` have side effects, which is
//! why [`Kxtj9::show`] takes the delay provider and calibration source.

use core::fmt::Write;

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

use crate::calibration::{CalibrationSource, CalibrationStatus};
use crate::config::MessagePreset;
use crate::device::{Kxtj9, RAWDATA_SETTLE_MS};
use crate::input::InputSink;
use crate::interrupt::IrqLine;
use crate::odr::Resolution;
use crate::{Error, WHO_AM_I_KXTJ2, WHO_AM_I_KXTJ9};

/// Longest attribute text
pub const ATTRIBUTE_TEXT_LEN: usize = 64;

/// Text produced by [`Kxtj9::show`]
pub type AttributeText = heapless::String<ATTRIBUTE_TEXT_LEN>;

/// Named control attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attribute {
    /// Enabled flag / power control
    Enable,
    /// Poll interval
    Delay,
    /// Output bytes of the last sample
    RawData,
    /// Identity check
    State,
    /// Last published sample
    CalRawData,
    /// Calibration reload
    Calibration,
    /// Output resolution
    Resolution,
    /// Soft reset
    Reset,
    /// Log and mode presets
    Message,
}

impl Attribute {
    /// Every attribute, in registration order
    pub const ALL: [Self; 9] = [
        Self::Message,
        Self::Delay,
        Self::Enable,
        Self::RawData,
        Self::State,
        Self::CalRawData,
        Self::Calibration,
        Self::Resolution,
        Self::Reset,
    ];

    /// Attribute file name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Delay => "delay",
            Self::RawData => "rawdata",
            Self::State => "state",
            Self::CalRawData => "cal_rawdata",
            Self::Calibration => "calibration",
            Self::Resolution => "resolution",
            Self::Reset => "reset",
            Self::Message => "message",
        }
    }

    /// Look an attribute up by file name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attribute| attribute.name() == name)
    }

    /// Whether the attribute accepts writes
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Self::Enable | Self::Delay | Self::Resolution | Self::Message
        )
    }
}

/// Parse the leading decimal number of an attribute write
///
/// Leading whitespace is skipped and anything after the digits (typically a
/// newline) is ignored. Returns `None` when no digits are present or the value
/// does not fit in a `u32`.
#[must_use]
pub fn parse_value(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

impl<I, S, Q> Kxtj9<'_, I, S, Q>
where
    I: RegisterInterface<AddressType = u8>,
    S: InputSink,
    Q: IrqLine,
{
    /// Read an attribute
    ///
    /// # Errors
    ///
    /// Returns an error if the bus access behind the attribute fails, if the
    /// calibration cannot be loaded (`calibration`) or if the text does not
    /// fit [`AttributeText`].
    pub fn show<D, C>(
        &mut self,
        attribute: Attribute,
        delay: &mut D,
        calibration: &mut C,
    ) -> Result<AttributeText, Error<I::Error>>
    where
        D: DelayNs,
        C: CalibrationSource + ?Sized,
    {
        let mut text = AttributeText::new();
        let written = match attribute {
            Attribute::Enable => writeln!(text, "{}", u8::from(self.is_enabled())),
            Attribute::Delay => {
                let data_ctrl = self.read_data_ctrl()?;
                writeln!(text, "{},{}", self.poll_interval_ms(), data_ctrl)
            }
            Attribute::RawData => {
                if !self.is_enabled() {
                    let enabled = self.enable();
                    delay.delay_ms(RAWDATA_SETTLE_MS);
                    enabled?;
                }
                let b = self.last_raw_bytes();
                writeln!(
                    text,
                    "{:x} {:x} {:x} {:x} {:x} {:x}",
                    b[0], b[1], b[2], b[3], b[4], b[5]
                )
            }
            Attribute::State => {
                let who_am_i = self.read_who_am_i()?;
                let ok = matches!(who_am_i, WHO_AM_I_KXTJ9 | WHO_AM_I_KXTJ2);
                writeln!(text, "{}", u8::from(ok))
            }
            Attribute::CalRawData => {
                let sample = self.last_sample();
                writeln!(text, "{} {} {}", sample.x, sample.y, sample.z)
            }
            Attribute::Calibration => {
                let status = self.reload_calibration(calibration)?;
                writeln!(text, "{}", u8::from(status == CalibrationStatus::Loaded))
            }
            Attribute::Resolution => {
                let ctrl_reg1 = self.read_ctrl_reg1()?;
                writeln!(text, "{ctrl_reg1}")
            }
            Attribute::Reset => {
                self.reset(delay)?;
                writeln!(text, "0")
            }
            Attribute::Message => writeln!(text, "1"),
        };
        written.map_err(|_| Error::InvalidConfig)?;
        Ok(text)
    }

    /// Write an attribute
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for read-only attributes and values
    /// outside the attribute's range, or the bus error of the operation the
    /// write triggers.
    pub fn store(&mut self, attribute: Attribute, text: &str) -> Result<(), Error<I::Error>> {
        if !attribute.is_writable() {
            return Err(Error::InvalidConfig);
        }
        let value = parse_value(text).ok_or(Error::InvalidConfig)?;

        match attribute {
            Attribute::Enable => match value {
                0 => self.disable(),
                1 => self.enable()?,
                2 => self.power_off(),
                3 => self.enable_by_orientation()?,
                _ => return Err(Error::InvalidConfig),
            },
            Attribute::Delay => self.set_poll_interval(value)?,
            Attribute::Resolution => {
                let resolution = Resolution::from_value(value).ok_or(Error::InvalidConfig)?;
                self.set_resolution(resolution)?;
            }
            Attribute::Message => {
                let Some(preset) = MessagePreset::from_value(value) else {
                    warn!("kxtj9: invalid message preset {=u32}", value);
                    return Err(Error::InvalidConfig);
                };
                self.apply_message_preset(preset);
            }
            _ => return Err(Error::InvalidConfig),
        }
        Ok(())
    }
}
