//! Device configuration applied by [`Mpu6050Driver::configure`]
//!
//! [`Mpu6050Driver::configure`]: crate::Mpu6050Driver::configure

use crate::interrupt::InterruptConfig;
use crate::sensors::{AccelFullScale, GyroFullScale};

/// Digital low pass filter setting (`DLPF_CFG`), shared by both sensors
///
/// Variant names give the accelerometer bandwidth; the gyroscope bandwidth is
/// within a few Hz of it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dlpf {
    /// 260 Hz accel / 256 Hz gyro, gyroscope output rate 8 kHz
    #[default]
    Hz260 = 0,
    /// 184 Hz accel / 188 Hz gyro
    Hz184 = 1,
    /// 94 Hz accel / 98 Hz gyro
    Hz94 = 2,
    /// 44 Hz accel / 42 Hz gyro
    Hz44 = 3,
    /// 21 Hz accel / 20 Hz gyro
    Hz21 = 4,
    /// 10 Hz accel / 10 Hz gyro
    Hz10 = 5,
    /// 5 Hz accel / 5 Hz gyro
    Hz5 = 6,
    /// Reserved setting, gyroscope output rate 8 kHz
    Reserved = 7,
}

impl Dlpf {
    /// Register code, masked to the 3-bit field
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8 & 0x07
    }

    /// Accelerometer 3dB bandwidth in Hz (0 for the reserved setting)
    #[must_use]
    pub const fn bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz260 => 260,
            Self::Hz184 => 184,
            Self::Hz94 => 94,
            Self::Hz44 => 44,
            Self::Hz21 => 21,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
            Self::Reserved => 0,
        }
    }

    /// Gyroscope output rate in Hz before the sample rate divider
    #[must_use]
    pub const fn gyro_output_rate_hz(self) -> u16 {
        match self {
            Self::Hz260 | Self::Reserved => 8000,
            _ => 1000,
        }
    }
}

/// Full device configuration
///
/// `Default` is the all-zero configuration the driver starts from: ±250 °/s,
/// ±2g, widest filter, no divider, no interrupts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Gyroscope full-scale range
    pub gyro_range: GyroFullScale,
    /// Accelerometer full-scale range
    pub accel_range: AccelFullScale,
    /// Digital low pass filter level
    pub dlpf: Dlpf,
    /// Sample rate divider (0-255)
    /// Actual sample rate = gyroscope output rate / (1 + `sample_rate_div`)
    pub sample_rate_div: u8,
    /// Interrupt sources; `data_ready` also turns on status polling before reads
    pub interrupts: InterruptConfig,
}

impl Config {
    /// Calculate the effective sample rate in Hz
    #[must_use]
    pub fn sample_rate_hz(&self) -> f32 {
        f32::from(self.dlpf.gyro_output_rate_hz()) / (1.0 + f32::from(self.sample_rate_div))
    }
}
