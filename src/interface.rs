//! Transport capability and bus adapters for the MPU-6050
//!
//! The driver never talks to a bus directly. Everything goes through a
//! [`Transport`]: register reads and writes (inherited from
//! `device_driver::RegisterInterface`), an optional open/close pair and the
//! blocking delay used for settle times and status polling. Injecting the
//! delay here lets tests replace every wait with a no-op.

use crate::I2C_ADDRESS_AD0_LOW;

use device_driver::RegisterInterface;
use embedded_hal::delay::DelayNs;

/// Capability set the driver needs from the bus collaborator
///
/// `read_register` must fill the whole buffer starting at `address`
/// (auto-incrementing burst) and `write_register` is only ever called with a
/// single data byte.
pub trait Transport: RegisterInterface<AddressType = u8> {
    /// Acquire the bus. Called once, before the identity check.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the channel cannot be opened.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Block the calling thread for `us` microseconds
    fn sleep_us(&mut self, us: u32);

    /// Release the bus
    ///
    /// # Errors
    ///
    /// Returns the bus error if the channel could not be closed cleanly.
    fn deinit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// I2C transport for the MPU-6050
///
/// Pairs an `embedded-hal` I2C bus with the delay provider used for the
/// driver's settle and poll intervals.
pub struct I2cInterface<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> I2cInterface<I2C, D> {
    /// Create a new I2C interface with the default address (0x68, AD0 pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c, delay);
    /// let mut imu = Mpu6050Driver::new(interface)?;
    /// ```
    pub const fn default(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: I2C_ADDRESS_AD0_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x69, AD0 pin HIGH)
    pub const fn alternative(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: crate::I2C_ADDRESS_AD0_HIGH,
        }
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// The 7-bit device address in use
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D, E> RegisterInterface for I2cInterface<I2C, D>
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
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits;
        // Every mapped register is 8 bits wide, so there is at most one data byte
        let mut buffer = [0u8; 2];
        buffer[0] = address;
        let len = write_data.len().min(1);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

impl<I2C, D, E> Transport for I2cInterface<I2C, D>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
    D: DelayNs,
{
    fn sleep_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
