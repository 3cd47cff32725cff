#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod device;
pub mod interface;
pub mod interrupt;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use config::{Config, Dlpf};
pub use device::Mpu6050Driver;
pub use interface::{I2cInterface, Transport};
pub use interrupt::{InterruptConfig, InterruptStatus};
pub use sensors::{
    accel_shift, gyro_shift, AccelData, AccelFullScale, GyroData, GyroFullScale, GyroOffsets,
    Sample,
};

/// MPU-6050 I2C address when AD0 pin is low (default: 0x68)
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// MPU-6050 I2C address when AD0 pin is high (alternative: 0x69)
pub const I2C_ADDRESS_AD0_HIGH: u8 = 0x69;

/// Expected value of `WHO_AM_I` register
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// Driver errors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
    /// One or more writes of a multi-register sequence failed.
    ///
    /// Every write of the sequence was still attempted, so the device may be
    /// partially programmed. Only the first failure is kept.
    SequenceFailed {
        /// Number of steps that failed
        failures: u8,
        /// Error reported by the first failing step
        first: E,
    },
    /// A status poll exceeded the limit set with
    /// [`Mpu6050Driver::set_poll_limit`]
    PollTimeout,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
