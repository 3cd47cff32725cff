//! High-level driver API for the MPU-6050
//!
//! This module provides the device handle, which owns the transport, the
//! active configuration and the latest decoded readings. Every operation is
//! blocking and runs to completion on the calling thread.
//!
//! Multi-register sequences ([`configure`], [`calibrate_gyroscope`],
//! [`reset`]) attempt every step even after a failure and report the
//! aggregate outcome, so a failed call may leave the device partially
//! programmed.
//!
//! [`configure`]: Mpu6050Driver::configure
//! [`calibrate_gyroscope`]: Mpu6050Driver::calibrate_gyroscope
//! [`reset`]: Mpu6050Driver::reset

use crate::config::{Config, Dlpf};
use crate::interface::Transport;
use crate::interrupt::InterruptStatus;
use crate::registers::{Mpu6050 as RegisterDevice, ACCEL_XOUT_H, GYRO_XOUT_H, TEMP_OUT_H};
use crate::sensors::{self, AccelData, GyroData, GyroFullScale, GyroOffsets, Sample};
use crate::{Error, WHO_AM_I_VALUE};

use device_driver::RegisterInterface;

/// Settle time after programming the device (filter and ODR stabilization)
const SETTLE_US: u32 = 200_000;

/// Delay between two reads of a status bit
const POLL_INTERVAL_US: u32 = 1_000;

/// Delay between two calibration samples
const SAMPLE_INTERVAL_US: u32 = 1_000;

/// Number of samples folded into the gyroscope bias estimate
const CALIBRATION_SAMPLES: u16 = 100;

/// Range the offset registers are expressed in
const CALIBRATION_RANGE: GyroFullScale = GyroFullScale::Dps1000;

/// Main driver for the MPU-6050
pub struct Mpu6050Driver<T> {
    device: RegisterDevice<T>,
    config: Config,
    sample: Sample,
    poll_limit: Option<u32>,
}

impl<T> Mpu6050Driver<T>
where
    T: Transport,
{
    /// Open the transport and verify the device identity
    ///
    /// On success the configuration and the stored sample are zeroed. The
    /// device itself is not reprogrammed; call [`configure`](Self::configure)
    /// next.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Opening the transport or reading `WHO_AM_I` fails ([`Error::Bus`])
    /// - The `WHO_AM_I` register contains an unexpected value
    ///   ([`Error::InvalidDevice`]); the handle is not created and no other
    ///   register is touched
    pub fn new(mut transport: T) -> Result<Self, Error<T::Error>> {
        transport.init()?;

        let mut driver = Self {
            device: RegisterDevice::new(transport),
            config: Config::default(),
            sample: Sample::default(),
            poll_limit: None,
        };

        let who_am_i = driver.read_who_am_i()?;
        if who_am_i != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "WHO_AM_I mismatch: expected {=u8:#x}, read {=u8:#x}",
                WHO_AM_I_VALUE,
                who_am_i
            );
            return Err(Error::InvalidDevice(who_am_i));
        }

        Ok(driver)
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x68 for a valid MPU-6050
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<T::Error>> {
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Store `config` and program it into the device
    ///
    /// Writes, in order: sample rate divider, signal path reset (all three
    /// paths), interrupt enable, low pass filter, accelerometer range,
    /// gyroscope range and finally `PWR_MGMT_1` with sleep cleared. When every
    /// write succeeded the call blocks for the 200 ms settle time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceFailed`] if any write failed. The remaining
    /// writes were still attempted and the settle delay was skipped.
    pub fn configure(&mut self, config: Config) -> Result<(), Error<T::Error>> {
        self.config = config;
        let interrupts = config.interrupts;

        let mut writes = SequenceOutcome::new();
        writes.record(self.device.smplrt_div().write(|w| {
            w.set_smplrt_div(config.sample_rate_div);
        }));
        writes.record(self.device.signal_path_reset().write(|w| {
            w.set_gyro_reset(true);
            w.set_accel_reset(true);
            w.set_temp_reset(true);
        }));
        writes.record(self.device.int_enable().write(|w| {
            w.set_data_rdy_en(interrupts.data_ready);
            w.set_mst_int_en(interrupts.i2c_master);
            w.set_fifo_oflow_en(interrupts.fifo_overflow);
            w.set_mot_en(interrupts.motion);
        }));
        writes.record(self.device.dlpf_config().write(|w| {
            w.set_dlpf_cfg(config.dlpf.bits());
        }));
        writes.record(self.device.accel_config().write(|w| {
            w.set_afs_sel(config.accel_range.bits() & 0x03);
        }));
        writes.record(self.device.gyro_config().write(|w| {
            w.set_fs_sel(config.gyro_range.bits() & 0x03);
        }));
        writes.record(self.device.pwr_mgmt_1().write(|w| {
            w.set_sleep(false);
        }));

        if writes.is_ok() {
            self.sleep_us(SETTLE_US);
        }
        writes.finish()
    }

    /// Read and decode the accelerometer (1 LSB ≈ 1 mg)
    ///
    /// Waits for data ready first when that interrupt is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The stored
    /// accelerometer reading is left unchanged in that case.
    pub fn read_accelerometer(&mut self) -> Result<AccelData, Error<T::Error>> {
        self.wait_for_data_ready()?;

        // Register addresses: ACCEL_XOUT_H (0x3B) through ACCEL_ZOUT_L (0x40)
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(ACCEL_XOUT_H, 48, &mut buffer)?;

        let accel = AccelData::from_be_bytes(&buffer, self.config.accel_range.shift());
        self.sample.accel = accel;
        Ok(accel)
    }

    /// Read and decode the gyroscope (1 LSB ≈ 0.1 °/s)
    ///
    /// Waits for data ready first when that interrupt is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The stored
    /// gyroscope reading is left unchanged in that case.
    pub fn read_gyroscope(&mut self) -> Result<GyroData, Error<T::Error>> {
        self.wait_for_data_ready()?;

        // Register addresses: GYRO_XOUT_H (0x43) through GYRO_ZOUT_L (0x48)
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(GYRO_XOUT_H, 48, &mut buffer)?;

        let gyro = GyroData::from_be_bytes(&buffer, self.config.gyro_range.shift());
        self.sample.gyro = gyro;
        Ok(gyro)
    }

    /// Read the die temperature in tenths of a degree Celsius
    ///
    /// Waits for data ready first when that interrupt is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The stored
    /// temperature is left unchanged in that case.
    pub fn read_temperature(&mut self) -> Result<i16, Error<T::Error>> {
        self.wait_for_data_ready()?;

        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(TEMP_OUT_H, 16, &mut buffer)?;

        let temperature = sensors::temperature_from_raw(i16::from_be_bytes(buffer));
        self.sample.temperature = temperature;
        Ok(temperature)
    }

    /// Read all three sensors in a single 14-byte burst
    ///
    /// One transaction guarantees accelerometer, temperature and gyroscope
    /// come from the same device update cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The stored
    /// sample is left unchanged in that case.
    pub fn read_all(&mut self) -> Result<Sample, Error<T::Error>> {
        self.wait_for_data_ready()?;

        // ACCEL_XOUT_H (0x3B) through GYRO_ZOUT_L (0x48)
        let mut buffer = [0u8; 14];
        self.device
            .interface
            .read_register(ACCEL_XOUT_H, 112, &mut buffer)?;

        let sample = Sample::from_be_bytes(
            &buffer,
            self.config.accel_range.shift(),
            self.config.gyro_range.shift(),
        );
        self.sample = sample;
        Ok(sample)
    }

    /// Measure the gyroscope bias and write the cancelling offsets
    ///
    /// The device must be stationary. The procedure:
    /// 1. programs divider 0, gyro-only signal path reset, filter level 0,
    ///    ±1000 °/s and sleep off (the stored configuration follows),
    /// 2. settles for 200 ms,
    /// 3. folds up to 100 gyroscope samples, 1 ms apart, into a running
    ///    estimate with `bias = bias/2 + sample/2`; a failed read ends the
    ///    sampling early,
    /// 4. writes `-bias` to the six offset registers.
    ///
    /// Every step runs even after an earlier failure, so the offset
    /// registers are always written from whatever estimate was reached.
    ///
    /// Returns the offsets that were written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceFailed`] if any setup write, sample read or
    /// offset write failed.
    pub fn calibrate_gyroscope(&mut self) -> Result<GyroOffsets, Error<T::Error>> {
        let mut steps = SequenceOutcome::new();
        steps.record(self.device.smplrt_div().write(|w| {
            w.set_smplrt_div(0);
        }));
        steps.record(self.device.signal_path_reset().write(|w| {
            w.set_gyro_reset(true);
        }));
        steps.record(self.device.dlpf_config().write(|w| {
            w.set_dlpf_cfg(Dlpf::Hz260.bits());
        }));
        steps.record(self.device.gyro_config().write(|w| {
            w.set_fs_sel(CALIBRATION_RANGE.bits());
        }));
        steps.record(self.device.pwr_mgmt_1().write(|w| {
            w.set_sleep(false);
        }));

        self.config.sample_rate_div = 0;
        self.config.dlpf = Dlpf::Hz260;
        self.config.gyro_range = CALIBRATION_RANGE;

        self.sleep_us(SETTLE_US);

        let shift = CALIBRATION_RANGE.shift();
        let mut bias = [0i16; 3];
        for _ in 0..CALIBRATION_SAMPLES {
            let mut buffer = [0u8; 6];
            let read = self
                .device
                .interface
                .read_register(GYRO_XOUT_H, 48, &mut buffer);
            if read.is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Gyro sample read failed, calibrating from partial estimate");
                steps.record(read);
                break;
            }

            let sample = sensors::decode_axes(&buffer, shift);
            for (estimate, value) in bias.iter_mut().zip(sample) {
                *estimate = sensors::smooth(*estimate, value);
            }

            self.sleep_us(SAMPLE_INTERVAL_US);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Gyro bias: x={} y={} z={}", bias[0], bias[1], bias[2]);

        let offsets = GyroOffsets::from_bias(bias);
        self.write_gyro_offsets(offsets, &mut steps);
        steps.finish()?;
        Ok(offsets)
    }

    /// Write the six gyroscope offset registers
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceFailed`] if any of the six writes failed; the
    /// others were still attempted.
    pub fn set_gyro_offsets(&mut self, offsets: GyroOffsets) -> Result<(), Error<T::Error>> {
        let mut writes = SequenceOutcome::new();
        self.write_gyro_offsets(offsets, &mut writes);
        writes.finish()
    }

    /// Full device reset
    ///
    /// 1. `DEVICE_RESET`, then poll `PWR_MGMT_1` until the bit clears
    /// 2. `SIG_COND_RESET`, then poll `USER_CTRL` until the bit clears
    /// 3. zero the gyroscope offsets, which survive the reset
    /// 4. force sleep mode
    ///
    /// The stored configuration returns to [`Config::default`] to mirror the
    /// device registers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceFailed`] if any write or status read failed;
    /// every step is still attempted. With a poll limit set, a bit that
    /// never clears yields [`Error::PollTimeout`].
    pub fn reset(&mut self) -> Result<(), Error<T::Error>> {
        let mut steps = SequenceOutcome::new();

        steps.record(self.device.pwr_mgmt_1().write(|w| {
            w.set_device_reset(true);
        }));
        steps.record_poll(self.poll_until(|device| {
            device
                .pwr_mgmt_1()
                .read()
                .map(|pwr_mgmt| !pwr_mgmt.device_reset())
        }));

        steps.record(self.device.user_ctrl().write(|w| {
            w.set_sig_cond_reset(true);
        }));
        steps.record_poll(self.poll_until(|device| {
            device
                .user_ctrl()
                .read()
                .map(|user_ctrl| !user_ctrl.sig_cond_reset())
        }));

        self.write_gyro_offsets(GyroOffsets::default(), &mut steps);

        steps.record(self.device.pwr_mgmt_1().write(|w| {
            w.set_sleep(true);
        }));

        self.config = Config::default();
        steps.finish()
    }

    /// Set sleep mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sleep(&mut self, enable: bool) -> Result<(), Error<T::Error>> {
        self.device.pwr_mgmt_1().modify(|w| {
            w.set_sleep(enable);
        })?;
        Ok(())
    }

    /// Read and decode `INT_STATUS`
    ///
    /// Reading the register clears the latched flags on the device.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_interrupt_status(&mut self) -> Result<InterruptStatus, Error<T::Error>> {
        let status = self.device.int_status().read()?;
        Ok(InterruptStatus {
            data_ready: status.data_rdy_int(),
            motion: status.mot_int(),
            fifo_overflow: status.fifo_oflow_int(),
            i2c_master: status.mst_int(),
        })
    }

    /// Bound every status polling loop to `limit` unsuccessful polls
    ///
    /// `None` (the default) polls until the bit changes or a read fails,
    /// which can block forever on a stuck device.
    pub fn set_poll_limit(&mut self, limit: Option<u32>) {
        self.poll_limit = limit;
    }

    /// Current polling bound
    pub const fn poll_limit(&self) -> Option<u32> {
        self.poll_limit
    }

    /// Active configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Latest decoded readings (all zero before the first read)
    pub const fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Close the transport and drop the handle
    ///
    /// # Errors
    ///
    /// Returns the transport's close error.
    pub fn deinit(self) -> Result<(), Error<T::Error>> {
        let mut transport = self.device.interface;
        transport.deinit()?;
        Ok(())
    }

    /// Consume the driver and return the underlying transport, still open
    pub fn release(self) -> T {
        self.device.interface
    }

    fn write_gyro_offsets(
        &mut self,
        offsets: GyroOffsets,
        writes: &mut SequenceOutcome<T::Error>,
    ) {
        let [xh, xl, yh, yl, zh, zl] = offsets.to_be_bytes();

        writes.record(self.device.xg_offs_usrh().write(|w| {
            w.set_xg_offs_usrh(xh);
        }));
        writes.record(self.device.xg_offs_usrl().write(|w| {
            w.set_xg_offs_usrl(xl);
        }));
        writes.record(self.device.yg_offs_usrh().write(|w| {
            w.set_yg_offs_usrh(yh);
        }));
        writes.record(self.device.yg_offs_usrl().write(|w| {
            w.set_yg_offs_usrl(yl);
        }));
        writes.record(self.device.zg_offs_usrh().write(|w| {
            w.set_zg_offs_usrh(zh);
        }));
        writes.record(self.device.zg_offs_usrl().write(|w| {
            w.set_zg_offs_usrl(zl);
        }));
    }

    /// Block until the sample is complete, if data ready polling is enabled
    fn wait_for_data_ready(&mut self) -> Result<(), Error<T::Error>> {
        if !self.config.interrupts.data_ready {
            return Ok(());
        }

        self.poll_until(|device| device.int_status().read().map(|status| status.data_rdy_int()))
    }

    /// Read a status bit, sleep 1 ms, repeat until `done` returned true
    ///
    /// Unbounded unless a poll limit is set. A failed read ends the loop
    /// immediately, without the trailing sleep.
    fn poll_until<F>(&mut self, mut done: F) -> Result<(), Error<T::Error>>
    where
        F: FnMut(&mut RegisterDevice<T>) -> Result<bool, T::Error>,
    {
        let mut polls: u32 = 0;
        loop {
            let finished = done(&mut self.device)?;
            self.sleep_us(POLL_INTERVAL_US);
            if finished {
                return Ok(());
            }

            polls = polls.saturating_add(1);
            if self.poll_limit.is_some_and(|limit| polls >= limit) {
                #[cfg(feature = "defmt")]
                defmt::warn!("Status poll gave up after {=u32} reads", polls);
                return Err(Error::PollTimeout);
            }
        }
    }

    fn sleep_us(&mut self, us: u32) {
        self.device.interface.sleep_us(us);
    }
}

/// Aggregated result of a multi-step register sequence
///
/// Records every step without stopping; only the first error is kept.
struct SequenceOutcome<E> {
    failures: u8,
    first: Option<E>,
    timed_out: bool,
}

impl<E> SequenceOutcome<E> {
    const fn new() -> Self {
        Self {
            failures: 0,
            first: None,
            timed_out: false,
        }
    }

    fn record<R>(&mut self, result: Result<R, E>) {
        if let Err(error) = result {
            self.failures = self.failures.saturating_add(1);
            if self.first.is_none() {
                self.first = Some(error);
            }
        }
    }

    fn record_poll(&mut self, result: Result<(), Error<E>>) {
        match result {
            Ok(()) => {}
            Err(Error::Bus(error)) => self.record::<()>(Err(error)),
            Err(_) => self.timed_out = true,
        }
    }

    const fn is_ok(&self) -> bool {
        self.first.is_none() && !self.timed_out
    }

    fn finish(self) -> Result<(), Error<E>> {
        match self.first {
            Some(first) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("{=u8} register steps failed", self.failures);
                Err(Error::SequenceFailed {
                    failures: self.failures,
                    first,
                })
            }
            None if self.timed_out => Err(Error::PollTimeout),
            None => Ok(()),
        }
    }
}
