//! Interrupt configuration and status
//!
//! The MPU-6050 can raise its INT pin on four events. This driver never
//! waits on the pin: enabling `data_ready` makes every read poll the
//! `INT_STATUS` register until the sample is complete.
//!
//! # Example
//!
//! ```ignore
//! # use mpu6050::{Config, InterruptConfig, Mpu6050Driver};
//! # let mut imu: Mpu6050Driver<_> = todo!();
//! let config = Config {
//!     interrupts: InterruptConfig::data_ready_only(),
//!     ..Default::default()
//! };
//! imu.configure(config)?;
//! # Ok::<(), mpu6050::Error<()>>(())
//! ```

/// Interrupt source configuration (`INT_ENABLE`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct InterruptConfig {
    /// Data ready (bit 0), also enables status polling before reads
    pub data_ready: bool,
    /// Motion detection (bit 6)
    pub motion: bool,
    /// FIFO overflow (bit 4)
    pub fifo_overflow: bool,
    /// I2C master (bit 3)
    pub i2c_master: bool,
}

impl InterruptConfig {
    /// Create configuration with only data ready interrupt enabled
    pub const fn data_ready_only() -> Self {
        Self {
            data_ready: true,
            motion: false,
            fifo_overflow: false,
            i2c_master: false,
        }
    }

    /// Check if any interrupt is enabled
    pub const fn any_enabled(&self) -> bool {
        self.data_ready || self.motion || self.fifo_overflow || self.i2c_master
    }
}

/// Decoded `INT_STATUS` register
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct InterruptStatus {
    /// A complete sample is available in the output registers
    pub data_ready: bool,
    /// Motion was detected
    pub motion: bool,
    /// The FIFO overflowed
    pub fifo_overflow: bool,
    /// An I2C master interrupt is pending
    pub i2c_master: bool,
}
