//! Interrupt configuration and host interrupt-line control
//!
//! When the board wires the sensor's INT pin to the host, the driver runs in
//! interrupt mode: the sensor raises a data-ready interrupt for every new
//! sample and the host calls [`Kxtj9::handle_interrupt`] from its (threaded)
//! interrupt context. Boards without the line are polled instead.
//!
//! The interrupt line itself belongs to the host. The driver only needs to mask
//! it across suspend so that a pending data-ready event cannot race the
//! suspend-time power-down; [`IrqLine`] is that seam.
//!
//! [`Kxtj9::handle_interrupt`]: crate::device::Kxtj9::handle_interrupt

use crate::registers::int_ctrl_reg1::{IEA, IEL, IEN};

/// `INT_CTRL_REG1` configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    /// Drive the physical interrupt pin
    pub pin_enabled: bool,
    /// Active-high polarity (false = active low)
    pub active_high: bool,
    /// Pulsed interrupt (false = latched until `INT_REL` is read)
    pub pulsed: bool,
}

impl InterruptConfig {
    /// Configuration used in interrupt mode: pin enabled, active high, pulsed
    pub const fn data_ready() -> Self {
        Self {
            pin_enabled: true,
            active_high: true,
            pulsed: true,
        }
    }

    /// Raw `INT_CTRL_REG1` value
    pub const fn to_raw(&self) -> u8 {
        let mut value = 0u8;
        if self.pin_enabled {
            value |= IEN;
        }
        if self.active_high {
            value |= IEA;
        }
        if self.pulsed {
            value |= IEL;
        }
        value
    }

    /// Decode a raw `INT_CTRL_REG1` value
    pub const fn from_raw(value: u8) -> Self {
        Self {
            pin_enabled: value & IEN != 0,
            active_high: value & IEA != 0,
            pulsed: value & IEL != 0,
        }
    }
}

/// Host-side control over the sensor's interrupt line
///
/// Both calls are made with the driver instance locked, so an implementation
/// must not wait on the driver itself.
pub trait IrqLine {
    /// Mask the line (no further calls to the handler until unmasked)
    fn mask(&mut self);

    /// Unmask the line
    fn unmask(&mut self);
}

/// Placeholder line for polled boards
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoIrq;

impl IrqLine for NoIrq {
    fn mask(&mut self) {}

    fn unmask(&mut self) {}
}
