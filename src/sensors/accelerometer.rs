//! Accelerometer sensor types and configuration
//!
//! Provides the full-scale ranges, the decode shift table and the decoded
//! sample type for the MPU-6050's 3-axis accelerometer.

/// Accelerometer full-scale range
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    #[default]
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelFullScale {
    /// Register code (`AFS_SEL`)
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Right shift that turns a raw sample into milli-g
    #[must_use]
    pub const fn shift(self) -> u8 {
        accel_shift(self.bits())
    }

    /// Get the sensitivity in LSB/g
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        }
    }
}

/// How far to shift down a raw i16 accelerometer sample for a given
/// full-scale code so that 1 LSB is roughly 1 mg.
///
/// Unknown codes map to 0, leaving the sample unscaled.
#[must_use]
pub const fn accel_shift(code: u8) -> u8 {
    match code {
        0 => 4, // 16384 LSB/g
        1 => 3, // 8192 LSB/g
        2 => 2, // 4096 LSB/g
        3 => 1, // 2048 LSB/g
        _ => 0,
    }
}

/// Decoded accelerometer sample, 1 LSB ≈ 1 mg
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (mg)
    pub x: i16,
    /// Y-axis acceleration (mg)
    pub y: i16,
    /// Z-axis acceleration (mg)
    pub z: i16,
}

impl AccelData {
    /// Decode the six `ACCEL_*OUT` bytes (big-endian X, Y, Z)
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8; 6], shift: u8) -> Self {
        let [x, y, z] = super::decode_axes(bytes, shift);
        Self { x, y, z }
    }

    /// Get the magnitude of the acceleration vector in mg
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        let (x, y, z) = (f32::from(self.x), f32::from(self.y), f32::from(self.z));
        libm::sqrtf(x * x + y * y + z * z)
    }
}
