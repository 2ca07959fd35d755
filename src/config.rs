//! Board identity and runtime configuration
//!
//! A single [`PlatformData`] snapshot is handed to the driver at probe time.
//! Everything that differs between boards (axis orientation, default
//! resolution, device name, engineering-build behaviour) is derived from it
//! through table lookups.

use crate::sample::AxisLayout;

/// Default sample interval used when the host does not provide one
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 200;

/// Hardware revision of the ME372CL board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HwRevision {
    /// First sample run (EVB sensor placement)
    Sr1,
    /// Second sample run
    Sr2,
    /// Engineering run and later
    Er,
}

/// Board the sensor is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardVariant {
    /// ME372CG, KXTJ9
    Me372cg,
    /// ME372CL, placement depends on the hardware revision
    Me372cl(HwRevision),
    /// ME175CG, KXTJ2
    Me175cg,
    /// PF400CG, KXTJ2
    Pf400cg,
    /// A400CG, KXTJ2
    A400cg,
}

impl BoardVariant {
    /// Axis transform for the sensor placement on this board
    #[must_use]
    pub const fn axis_layout(self) -> AxisLayout {
        match self {
            Self::Me372cg => AxisLayout::SrMe372cg,
            Self::Me372cl(HwRevision::Sr1) => AxisLayout::EvbMe372cl,
            Self::Me372cl(HwRevision::Sr2) => AxisLayout::SrMe372cl,
            Self::Me372cl(HwRevision::Er) => AxisLayout::ErMe372cl,
            Self::Me175cg => AxisLayout::SrMe175cg,
            Self::Pf400cg => AxisLayout::SrPf400cg,
            Self::A400cg => AxisLayout::SrA400cg,
        }
    }

    /// Name the device is registered under on the bus
    #[must_use]
    pub const fn device_name(self) -> &'static str {
        match self {
            Self::Me175cg | Self::Pf400cg | Self::A400cg => "kxtj2",
            Self::Me372cg | Self::Me372cl(_) => "kxtj9",
        }
    }

    /// Whether the board boots with 12-bit resolution selected
    #[must_use]
    pub const fn default_12bit(self) -> bool {
        matches!(self, Self::Me175cg | Self::Pf400cg | Self::A400cg)
    }

    /// Project the board switches to on an engineering build
    ///
    /// Returns `None` when the board keeps its user-build behaviour.
    #[must_use]
    pub const fn eng_project(self) -> Option<ProjectId> {
        match self {
            Self::Me372cg => None,
            // ME372CL shares the ME175CG project, and only past the SR builds
            Self::Me372cl(HwRevision::Er) | Self::Me175cg => Some(ProjectId::Me175cgKxtj2),
            Self::Me372cl(_) => None,
            Self::Pf400cg => Some(ProjectId::Pf400cgKxtj2),
            Self::A400cg => Some(ProjectId::A400cgKxtj2),
        }
    }
}

/// Firmware build flavour
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuildType {
    /// Shipping build
    #[default]
    User,
    /// Engineering build
    Eng,
}

/// Static platform description handed to probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlatformData {
    /// Board the sensor is mounted on
    pub board: BoardVariant,
    /// Build flavour
    pub build: BuildType,
    /// Initial sample interval in milliseconds
    pub init_interval_ms: u32,
}

impl PlatformData {
    /// Platform data for a user build with the default interval
    #[must_use]
    pub const fn new(board: BoardVariant) -> Self {
        Self {
            board,
            build: BuildType::User,
            init_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Operating mode selected at probe, switchable through the `message` attribute
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProjectMode {
    /// Normal operation
    #[default]
    Normal,
    /// Engineering mode
    Eng,
}

/// Project identity used by the resolution policy
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProjectId {
    /// ME372CG with KXTJ9 (legacy, keeps its resolution untouched)
    #[default]
    Me372cgKxtj9,
    /// PF400CG with KXTJ2
    Pf400cgKxtj2,
    /// ME175CG with KXTJ2
    Me175cgKxtj2,
    /// A400CG with KXTJ2
    A400cgKxtj2,
}

/// Runtime log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct DebugFlags {
    /// Per-sample and state machine tracing
    pub debug: bool,
    /// Register and ODR tracing
    pub register: bool,
    /// Calibration results
    pub calibration: bool,
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self {
            debug: false,
            register: false,
            calibration: true,
        }
    }
}

/// Presets accepted by the `message` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessagePreset {
    /// 0: all tracing off
    AllOff,
    /// 1: all tracing on
    AllOn,
    /// 2: register tracing on
    Register,
    /// 3: calibration tracing on
    Calibration,
    /// 4: debug tracing on
    Debug,
    /// 5: switch to normal mode
    NormalMode,
    /// 6: switch to engineering mode
    EngMode,
    /// 7: ask the bus controller to reset the I2C bus
    BusReset,
}

impl MessagePreset {
    /// Decode a preset number, `None` for anything outside 0-7
    #[must_use]
    pub const fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::AllOff),
            1 => Some(Self::AllOn),
            2 => Some(Self::Register),
            3 => Some(Self::Calibration),
            4 => Some(Self::Debug),
            5 => Some(Self::NormalMode),
            6 => Some(Self::EngMode),
            7 => Some(Self::BusReset),
            _ => None,
        }
    }
}

impl DebugFlags {
    /// Apply the flag part of a preset; mode and bus presets leave flags alone
    pub fn apply(&mut self, preset: MessagePreset) {
        match preset {
            MessagePreset::AllOff => {
                *self = Self {
                    debug: false,
                    register: false,
                    calibration: false,
                };
            }
            MessagePreset::AllOn => {
                *self = Self {
                    debug: true,
                    register: true,
                    calibration: true,
                };
            }
            MessagePreset::Register => self.register = true,
            MessagePreset::Calibration => self.calibration = true,
            MessagePreset::Debug => self.debug = true,
            MessagePreset::NormalMode | MessagePreset::EngMode | MessagePreset::BusReset => {}
        }
    }
}
