//! Input event reporting
//!
//! Every published sample becomes three absolute-axis events followed by a
//! sync marker, the shape a host input subsystem expects from an
//! accelerometer.

use crate::sample::AccelSample;

/// Name of the input device the host registers for the sensor
pub const INPUT_DEVICE_NAME: &str = "kxtj9_accel";

/// Reported axis range, ±`G_MAX`
pub const G_MAX: i32 = 8000;

/// Host-side noise filter width
pub const FUZZ: i32 = 3;

/// Host-side dead zone around zero
pub const FLAT: i32 = 3;

/// Absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbsAxis {
    /// X
    X,
    /// Y
    Y,
    /// Z
    Z,
}

/// Parameters of one absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbsInfo {
    /// Axis
    pub axis: AbsAxis,
    /// Smallest reported value
    pub min: i32,
    /// Largest reported value
    pub max: i32,
    /// Noise filter width
    pub fuzz: i32,
    /// Dead zone
    pub flat: i32,
}

impl AbsInfo {
    const fn accel(axis: AbsAxis) -> Self {
        Self {
            axis,
            min: -G_MAX,
            max: G_MAX,
            fuzz: FUZZ,
            flat: FLAT,
        }
    }
}

/// Axis table for registering the input device
pub const ABS_AXES: [AbsInfo; 3] = [
    AbsInfo::accel(AbsAxis::X),
    AbsInfo::accel(AbsAxis::Y),
    AbsInfo::accel(AbsAxis::Z),
];

/// One input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Absolute axis update
    Abs(AbsAxis, i32),
    /// End of one sample
    Sync,
}

impl InputEvent {
    /// Events describing one sample, in emission order
    #[must_use]
    pub const fn for_sample(sample: &AccelSample) -> [Self; 4] {
        [
            Self::Abs(AbsAxis::X, sample.x),
            Self::Abs(AbsAxis::Y, sample.y),
            Self::Abs(AbsAxis::Z, sample.z),
            Self::Sync,
        ]
    }
}

/// Consumer of input events (the host input device)
pub trait InputSink {
    /// Deliver one event
    fn emit(&mut self, event: InputEvent);
}
