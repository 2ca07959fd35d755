//! Power and suspend state tracking
//!
//! The sensor itself only knows "stand-by" and "measuring" (the `pc` bit of
//! `CTRL_REG1`). The driver additionally tracks which register sequence is in
//! flight and whether the host has suspended it:
//!
//! ```text
//!            enable()                       reset()
//!   Off ─────────────▶ Configuring ──▶ On ─────────▶ Resetting ──▶ On
//!    ▲                     │                              │
//!    └──── write failure ──┴──────────────────────────────┘
//! ```
//!
//! Suspension is orthogonal: it remembers whether the sensor was measuring so
//! resume can restore it, and swallows enable requests that arrive meanwhile.

/// Register-sequence state of the sensor
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Stand-by, `pc` clear
    #[default]
    Off,
    /// Control registers are being rewritten with `pc` clear
    Configuring,
    /// Measuring
    On,
    /// Soft reset in progress
    Resetting,
}

impl PowerState {
    /// Whether the sensor is producing samples
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Whether a register sequence is in flight
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Configuring | Self::Resetting)
    }
}

/// Host suspend state
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SuspendState {
    /// Not suspended
    #[default]
    Running,
    /// Suspended while measuring, resume re-enables
    SuspendedWasEnabled,
    /// Suspended while in stand-by
    SuspendedWasDisabled,
}

impl SuspendState {
    /// Whether the host has suspended the driver
    #[must_use]
    pub const fn is_suspended(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// State to enter on suspend, given whether the sensor was measuring
    #[must_use]
    pub const fn suspended(was_enabled: bool) -> Self {
        if was_enabled {
            Self::SuspendedWasEnabled
        } else {
            Self::SuspendedWasDisabled
        }
    }
}
