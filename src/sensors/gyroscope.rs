//! Gyroscope sensor types, decode shift table and bias calibration helpers

/// Gyroscope full-scale range
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250°/s range
    #[default]
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl GyroFullScale {
    /// Register code (`FS_SEL`)
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Right shift that turns a raw sample into tenths of a degree per second
    #[must_use]
    pub const fn shift(self) -> u8 {
        gyro_shift(self.bits())
    }

    /// Get the sensitivity in LSB/(°/s)
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps250 => 131.0,
            Self::Dps500 => 65.5,
            Self::Dps1000 => 32.8,
            Self::Dps2000 => 16.4,
        }
    }
}

/// How far to shift down a raw i16 gyroscope sample for a given full-scale
/// code so that 1 LSB is roughly 0.1 °/s.
///
/// Unknown codes map to 0, leaving the sample unscaled.
#[must_use]
pub const fn gyro_shift(code: u8) -> u8 {
    match code {
        0 => 4, // 131 LSB/(°/s)
        1 => 3, // 65.5 LSB/(°/s)
        2 => 2, // 32.8 LSB/(°/s)
        3 => 1, // 16.4 LSB/(°/s)
        _ => 0,
    }
}

/// Decoded gyroscope sample, 1 LSB ≈ 0.1 °/s
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation rate (0.1 °/s)
    pub x: i16,
    /// Y-axis rotation rate (0.1 °/s)
    pub y: i16,
    /// Z-axis rotation rate (0.1 °/s)
    pub z: i16,
}

impl GyroData {
    /// Decode the six `GYRO_*OUT` bytes (big-endian X, Y, Z)
    #[must_use]
    pub fn from_be_bytes(bytes: &[u8; 6], shift: u8) -> Self {
        let [x, y, z] = super::decode_axes(bytes, shift);
        Self { x, y, z }
    }

    /// Get the magnitude of the rotation rate vector (0.1 °/s)
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        let (x, y, z) = (f32::from(self.x), f32::from(self.y), f32::from(self.z));
        libm::sqrtf(x * x + y * y + z * z)
    }
}

/// Per-axis values for the `XG/YG/ZG_OFFS_USR` registers
///
/// The device adds these to its raw gyroscope output, so a calibration
/// stores the negated bias.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroOffsets {
    /// X-axis offset
    pub x: i16,
    /// Y-axis offset
    pub y: i16,
    /// Z-axis offset
    pub z: i16,
}

impl GyroOffsets {
    /// Offsets that cancel a measured bias
    #[must_use]
    pub const fn from_bias(bias: [i16; 3]) -> Self {
        Self {
            x: cancel(bias[0]),
            y: cancel(bias[1]),
            z: cancel(bias[2]),
        }
    }

    /// Register bytes in write order: X high, X low, Y high, Y low, Z high, Z low
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 6] {
        let [xh, xl] = self.x.to_be_bytes();
        let [yh, yl] = self.y.to_be_bytes();
        let [zh, zl] = self.z.to_be_bytes();
        [xh, xl, yh, yl, zh, zl]
    }
}

const fn cancel(bias: i16) -> i16 {
    if bias == 0 {
        0
    } else {
        bias.saturating_neg()
    }
}

/// One step of the calibration filter: `acc/2 + sample/2`
///
/// Exponential moving average with factor ½, truncating at every step. A
/// constant input converges to within one LSB of itself.
#[must_use]
pub const fn smooth(acc: i16, sample: i16) -> i16 {
    acc / 2 + sample / 2
}
