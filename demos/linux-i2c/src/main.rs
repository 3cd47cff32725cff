//! Continuous MPU-6050 reading on a Linux I2C bus
//!
//! Opens `/dev/i2c-1` (or the path given as first argument), optionally
//! calibrates the gyroscope, then prints a full sample every 100 ms.
//!
//! Hardware connections (Raspberry Pi header):
//! - SDA: pin 3
//! - SCL: pin 5
//! - VCC: 3.3V
//! - GND: GND
//! - AD0: GND (for address 0x68)
//!
//! Usage: `mpu6050-linux-i2c [DEVICE] [--calibrate]`

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use linux_embedded_hal::{Delay, I2cdev};
use log::{error, info, warn};
use mpu6050::{
    AccelFullScale, Config, Dlpf, GyroFullScale, I2cInterface, InterruptConfig, Mpu6050Driver,
};

const DEFAULT_BUS: &str = "/dev/i2c-1";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut bus = DEFAULT_BUS.to_string();
    let mut calibrate = false;
    for arg in std::env::args().skip(1) {
        if arg == "--calibrate" {
            calibrate = true;
        } else {
            bus = arg;
        }
    }

    let i2c = match I2cdev::new(&bus) {
        Ok(i2c) => i2c,
        Err(e) => {
            error!("Failed to open {bus}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut imu = match Mpu6050Driver::new(I2cInterface::default(i2c, Delay)) {
        Ok(imu) => imu,
        Err(e) => {
            error!("Failed to detect MPU-6050: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    info!("MPU-6050 detected on {bus}");

    if calibrate {
        info!("Calibrating gyroscope, keep the sensor still");
        match imu.calibrate_gyroscope() {
            Ok(offsets) => info!(
                "Gyro offsets: X={} Y={} Z={}",
                offsets.x, offsets.y, offsets.z
            ),
            Err(e) => warn!("Calibration failed: {e:?}"),
        }
    }

    // ±2000°/s gyro, ±2g accel, 10 Hz DLPF, ~6.6 Hz sample rate
    let config = Config {
        gyro_range: GyroFullScale::Dps2000,
        accel_range: AccelFullScale::G2,
        dlpf: Dlpf::Hz10,
        sample_rate_div: 150,
        interrupts: InterruptConfig::data_ready_only(),
    };
    if let Err(e) = imu.configure(config) {
        error!("Failed to configure: {e:?}");
        return ExitCode::FAILURE;
    }
    // Never hang on a dead bus
    imu.set_poll_limit(Some(1_000));

    info!(
        "Reading started (sample rate {:.1} Hz)",
        config.sample_rate_hz()
    );

    loop {
        match imu.read_all() {
            Ok(sample) => {
                info!(
                    "Accel: X={}mg Y={}mg Z={}mg |Mag|={:.0}mg",
                    sample.accel.x,
                    sample.accel.y,
                    sample.accel.z,
                    sample.accel.magnitude()
                );
                info!(
                    "Gyro:  X={} Y={} Z={} (0.1°/s)",
                    sample.gyro.x, sample.gyro.y, sample.gyro.z
                );
                info!("Temp:  {:.1}°C", sample.temperature_celsius());
            }
            Err(e) => error!("Read error: {e:?}"),
        }

        thread::sleep(Duration::from_millis(100));
    }
}
