//! Bus interface for the KXTJ9
//!
//! The sensor is I2C only. This module implements the `device-driver`
//! register interface on top of any `embedded_hal::i2c::I2c` bus. Every call
//! is exactly one bus transaction and is never retried here.

use crate::{I2C_ADDRESS_ADDR_HIGH, I2C_ADDRESS_ADDR_LOW};

use device_driver::RegisterInterface;

/// Largest register write: the address byte plus one data byte
const MAX_WRITE: usize = 2;

/// I2C interface for the KXTJ9
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x0E, ADDR pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let driver = Kxtj9::probe(interface, platform, sink, &STATE, None)?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_ADDR_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x0F, ADDR pin HIGH)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_ADDR_HIGH,
        }
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Bus address used for every transaction
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // implied by read_data.len()
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits;
        // All writable registers are a single byte wide
        let mut buffer = [0u8; MAX_WRITE];
        buffer[0] = address;
        let len = write_data.len().min(MAX_WRITE - 1);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}
