//! Sensor modules for the MPU-6050
//!
//! This module provides types and pure decoding helpers for each sensor in
//! the MPU-6050:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//! - Temperature
//!
//! All bus operations are performed through methods on `Mpu6050Driver`.

pub mod accelerometer;
pub mod gyroscope;

// Re-export main types
pub use accelerometer::{accel_shift, AccelData, AccelFullScale};
pub use gyroscope::{gyro_shift, smooth, GyroData, GyroFullScale, GyroOffsets};

/// Decode three big-endian i16 words, arithmetic-shifted right by `shift`
#[must_use]
pub fn decode_axes(bytes: &[u8; 6], shift: u8) -> [i16; 3] {
    [
        i16::from_be_bytes([bytes[0], bytes[1]]) >> shift,
        i16::from_be_bytes([bytes[2], bytes[3]]) >> shift,
        i16::from_be_bytes([bytes[4], bytes[5]]) >> shift,
    ]
}

/// Convert a raw `TEMP_OUT` word to tenths of a degree Celsius
///
/// Datasheet: `Temp_degC = TEMP_OUT / 340 + 36.53`. In 0.1 °C units that is
/// `TEMP_OUT / 34 + 365`, with integer division truncating toward zero.
#[must_use]
pub const fn temperature_from_raw(raw: i16) -> i16 {
    raw / 34 + 365
}

/// The latest decoded readings of all three sensors
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Acceleration, 1 LSB ≈ 1 mg
    pub accel: AccelData,
    /// Rotation rate, 1 LSB ≈ 0.1 °/s
    pub gyro: GyroData,
    /// Die temperature, 1 LSB = 0.1 °C
    pub temperature: i16,
}

impl Sample {
    /// Decode one 14-byte burst starting at `ACCEL_XOUT_H`
    ///
    /// Layout: accelerometer (bytes 0-5), temperature (6-7), gyroscope (8-13).
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8; 14], accel_shift: u8, gyro_shift: u8) -> Self {
        let mut accel = [0u8; 6];
        let mut gyro = [0u8; 6];
        accel.copy_from_slice(&bytes[0..6]);
        gyro.copy_from_slice(&bytes[8..14]);

        Self {
            accel: AccelData::from_be_bytes(&accel, accel_shift),
            gyro: GyroData::from_be_bytes(&gyro, gyro_shift),
            temperature: temperature_from_raw(i16::from_be_bytes([bytes[6], bytes[7]])),
        }
    }

    /// Temperature in degrees Celsius
    #[must_use]
    pub fn temperature_celsius(&self) -> f32 {
        f32::from(self.temperature) / 10.0
    }
}
