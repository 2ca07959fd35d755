#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod fmt;

pub mod attributes;
pub mod calibration;
pub mod config;
pub mod device;
pub mod input;
pub mod interface;
pub mod interrupt;
pub mod odr;
pub mod power;
pub mod registers;
pub mod sample;
pub mod shared;

// Re-export main types
pub use attributes::{Attribute, AttributeText};
pub use calibration::{
    Calibration, CalibrationError, CalibrationSource, CalibrationStatus, NoCalibration, ParseError,
};
#[cfg(feature = "std")]
pub use calibration::FileCalibrationSource;
pub use config::{
    BoardVariant, BuildType, DebugFlags, HwRevision, MessagePreset, PlatformData, ProjectId,
    ProjectMode,
};
pub use device::{ChipVariant, Kxtj9};
pub use input::{AbsAxis, InputEvent, InputSink};
pub use interface::I2cInterface;
pub use interrupt::{InterruptConfig, IrqLine, NoIrq};
pub use odr::{OutputDataRate, Resolution};
pub use power::{PowerState, SuspendState};
pub use sample::{AccelSample, AxisLayout, RawSample};
pub use shared::SharedSensorState;

/// KXTJ9 I2C address when the ADDR pin is low (default: 0x0E)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_ADDR_LOW: u8 = 0x0E;

/// KXTJ9 I2C address when the ADDR pin is high (alternative: 0x0F)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_ADDR_HIGH: u8 = 0x0F;

/// `WHO_AM_I` value of the KXTJ9
pub const WHO_AM_I_KXTJ9: u8 = 0x08;

/// `WHO_AM_I` value of the KXTJ2
pub const WHO_AM_I_KXTJ2: u8 = 0x09;

/// Identity bytes of older Kionix parts that are still accepted
pub const WHO_AM_I_LEGACY: [u8; 3] = [0x04, 0x07, 0x0F];

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
    /// Invalid configuration parameter or attribute value
    InvalidConfig,
    /// Calibration could not be loaded
    Calibration(CalibrationError),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
