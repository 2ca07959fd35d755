//! Register definitions for the KXTJ9 / KXTJ2
//!
//! The sensor exposes a flat 8-bit register map. Only the registers the driver
//! touches are described here:
//!
//! - **Output**: `XOUT_L` .. `ZOUT_H` (0x06 - 0x0B), read as one 6-byte burst
//! - **Identity**: `WHO_AM_I` (0x0F)
//! - **Interrupt**: `INT_REL` (0x1A), `INT_CTRL_REG1` (0x1E)
//! - **Control**: `CTRL_REG1` (0x1B), `CTRL_REG2` (0x1D), `DATA_CTRL_REG` (0x21)
//!
//! Operating-mode registers (`CTRL_REG1`, `DATA_CTRL_REG`, `INT_CTRL_REG1`) may
//! only be changed while the `pc` bit of `CTRL_REG1` is clear.

device_driver::create_device!(
    device_name: Kxtj9Registers,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// XOUT_L - X-axis output, low nibble in bits 4..8 (0x06)
        register XoutL {
            const ADDRESS = 0x06;
            const SIZE_BITS = 8;

            reserved_3_0: uint = 0..4,
            /// Lowest four bits of the 12-bit X sample
            xout_l: uint = 4..8,
        },

        /// WHO_AM_I - Device identification (0x0F)
        /// 0x08 for KXTJ9, 0x09 for KXTJ2
        register WhoAmI {
            const ADDRESS = 0x0F;
            const SIZE_BITS = 8;

            /// Identity byte
            who_am_i: uint = 0..8,
        },

        /// INT_REL - Interrupt latch release (0x1A)
        /// Reading this register clears a pending data-ready interrupt
        register IntRel {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Latched interrupt source (content is not used)
            int_rel: uint = 0..8,
        },

        /// CTRL_REG1 - Main control (0x1B)
        register CtrlReg1 {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            /// Tap event interrupt enable
            tpe: bool = 0,
            /// Wake-up function enable
            wufe: bool = 1,
            /// Tilt position function enable
            tdte: bool = 2,
            /// Acceleration range (0 = ±2g, 1 = ±4g, 2 = ±8g)
            gsel: uint = 3..5,
            /// Data-ready interrupt enable
            drdye: bool = 5,
            /// Resolution (false = 8-bit, true = 12-bit)
            res: bool = 6,
            /// Operating mode (false = stand-by, true = measuring)
            pc: bool = 7,
        },

        /// CTRL_REG2 - Secondary control (0x1D)
        register CtrlReg2 {
            const ADDRESS = 0x1D;
            const SIZE_BITS = 8;

            /// Wake-up output data rate
            owuf: uint = 0..3,
            reserved_3: uint = 3..4,
            /// Digital communication self-test
            dcst: bool = 4,
            reserved_6_5: uint = 5..7,
            /// Soft reset, self-clearing
            srst: bool = 7,
        },

        /// INT_CTRL_REG1 - Interrupt pin control (0x1E)
        register IntCtrlReg1 {
            const ADDRESS = 0x1E;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Self-test polarity
            ste: bool = 1,
            reserved_2: uint = 2..3,
            /// Interrupt latch mode (false = latched, true = pulsed)
            iel: bool = 3,
            /// Interrupt polarity (true = active high)
            iea: bool = 4,
            /// Physical interrupt pin enable
            ien: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// DATA_CTRL_REG - Output data rate (0x21)
        register DataCtrlReg {
            const ADDRESS = 0x21;
            const SIZE_BITS = 8;

            /// Output data rate code
            osa: uint = 0..4,
            reserved_7_4: uint = 4..8,
        }
    }
);

pub use Kxtj9Registers as RegisterDevice;

/// `XOUT_L`, first byte of the 6-byte output burst
pub const XOUT_L: u8 = 0x06;
/// `WHO_AM_I` address
pub const WHO_AM_I: u8 = 0x0F;
/// `INT_REL` address
pub const INT_REL: u8 = 0x1A;
/// `CTRL_REG1` address
pub const CTRL_REG1: u8 = 0x1B;
/// `CTRL_REG2` address
pub const CTRL_REG2: u8 = 0x1D;
/// `INT_CTRL_REG1` address
pub const INT_CTRL_REG1: u8 = 0x1E;
/// `DATA_CTRL_REG` address
pub const DATA_CTRL_REG: u8 = 0x21;

/// `CTRL_REG1` bit masks, used on the driver's shadow copy
pub mod ctrl_reg1 {
    /// Operating mode (measuring)
    pub const PC1: u8 = 1 << 7;
    /// 12-bit resolution
    pub const RES: u8 = 1 << 6;
    /// Data-ready interrupt enable
    pub const DRDYE: u8 = 1 << 5;
    /// Acceleration range bits
    pub const GSEL: u8 = 0b0001_1000;
}

/// `INT_CTRL_REG1` bit masks
pub mod int_ctrl_reg1 {
    /// Physical interrupt pin enable
    pub const IEN: u8 = 1 << 5;
    /// Active-high polarity
    pub const IEA: u8 = 1 << 4;
    /// Pulsed latch mode
    pub const IEL: u8 = 1 << 3;
}

