//! Unit tests for gyroscope bias calibration

use crate::common::{create_mock_driver, MockError, Operation};
use mpu6050::sensors::smooth;
use mpu6050::{Dlpf, Error, GyroFullScale, GyroOffsets};

fn offset_writes(writes: &[(u8, u8)]) -> Vec<(u8, u8)> {
    writes
        .iter()
        .copied()
        .filter(|(address, _)| (0x13..=0x18).contains(address))
        .collect()
}

#[test]
fn test_setup_sequence() {
    let (mut driver, interface) = create_mock_driver();

    driver.calibrate_gyroscope().unwrap();

    let ops = interface.operations();
    assert_eq!(
        ops[..6],
        [
            Operation::Write { address: 0x19, value: 0x00 },
            Operation::Write { address: 0x68, value: 0x04 },
            Operation::Write { address: 0x1A, value: 0x00 },
            Operation::Write { address: 0x1B, value: 0x10 },
            Operation::Write { address: 0x6B, value: 0x00 },
            Operation::Sleep(200_000),
        ]
    );
}

#[test]
fn test_samples_one_millisecond_apart() {
    let (mut driver, interface) = create_mock_driver();

    driver.calibrate_gyroscope().unwrap();

    let ops = interface.operations();
    let sampling = &ops[6..206];
    for pair in sampling.chunks(2) {
        assert_eq!(
            pair,
            [
                Operation::Read {
                    address: 0x43,
                    len: 6
                },
                Operation::Sleep(1_000),
            ]
        );
    }
    assert_eq!(interface.read_count(0x43), 100);
    // Offsets follow the last sample
    assert_eq!(ops.len(), 206 + 6);
}

#[test]
fn test_constant_bias_is_cancelled() {
    let (mut driver, interface) = create_mock_driver();
    // ±1000 °/s shifts by 2: 100 and -100 tenths of a degree per second
    interface.set_gyro_data(400, -400, 0);

    let offsets = driver.calibrate_gyroscope().unwrap();

    assert_eq!(offsets, GyroOffsets { x: -99, y: 99, z: 0 });
    assert_eq!(
        offset_writes(&interface.writes()),
        vec![
            (0x13, 0xFF),
            (0x14, 0x9D),
            (0x15, 0x00),
            (0x16, 0x63),
            (0x17, 0x00),
            (0x18, 0x00),
        ]
    );
}

#[test]
fn test_noisy_input_follows_running_average() {
    let sequence = vec![[1000, -52, 7], [1200, -60, 9], [800, -44, 3], [1104, -48, -5]];

    let mut bias = [0i16; 3];
    for i in 0..100 {
        let sample = sequence[i % sequence.len()];
        for axis in 0..3 {
            bias[axis] = smooth(bias[axis], sample[axis] >> 2);
        }
    }

    let (mut driver, interface) = create_mock_driver();
    interface.set_gyro_sequence(sequence);

    let offsets = driver.calibrate_gyroscope().unwrap();

    assert_eq!(offsets, GyroOffsets::from_bias(bias));
    assert_eq!(offsets.x, -bias[0]);
    assert!(offsets.x < 0 && offsets.y > 0);
}

#[test]
fn test_stored_config_follows_calibration_setup() {
    let (mut driver, _interface) = create_mock_driver();
    driver
        .configure(crate::common::demo_config())
        .unwrap();

    driver.calibrate_gyroscope().unwrap();

    let config = driver.config();
    assert_eq!(config.gyro_range, GyroFullScale::Dps1000);
    assert_eq!(config.dlpf, Dlpf::Hz260);
    assert_eq!(config.sample_rate_div, 0);
    // Untouched by calibration
    assert!(config.interrupts.data_ready);
}

#[test]
fn test_read_failure_still_writes_offsets() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_gyro_data(400, -400, 0);
    interface.fail_reads_from_after(0x43, 10);

    let result = driver.calibrate_gyroscope();

    assert_eq!(
        result,
        Err(Error::SequenceFailed {
            failures: 1,
            first: MockError::Communication
        })
    );
    // Sampling stopped at the failed read, no sleep after it
    assert_eq!(interface.read_count(0x43), 11);
    assert_eq!(interface.sleeps().len(), 1 + 10);
    // Ten samples of 100 settle at 99, and the offsets are still written
    assert_eq!(
        offset_writes(&interface.writes()),
        vec![
            (0x13, 0xFF),
            (0x14, 0x9D),
            (0x15, 0x00),
            (0x16, 0x63),
            (0x17, 0x00),
            (0x18, 0x00),
        ]
    );
    assert_eq!(
        interface.operations().last(),
        Some(&Operation::Write { address: 0x18, value: 0x00 })
    );
}

#[test]
fn test_first_read_failure_writes_zero_offsets() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_gyro_data(400, -400, 400);
    interface.fail_reads_from(0x43);

    let result = driver.calibrate_gyroscope();

    assert!(matches!(
        result,
        Err(Error::SequenceFailed { failures: 1, .. })
    ));
    assert_eq!(interface.read_count(0x43), 1);
    assert_eq!(
        offset_writes(&interface.writes()),
        (0x13..=0x18).map(|address| (address, 0x00)).collect::<Vec<_>>()
    );
}

#[test]
fn test_setup_failure_runs_to_completion() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_gyro_data(400, -400, 0);
    interface.fail_writes_to(0x1B);

    let result = driver.calibrate_gyroscope();

    assert_eq!(
        result,
        Err(Error::SequenceFailed {
            failures: 1,
            first: MockError::Communication
        })
    );
    // Five setup writes, then settle, full sampling and all six offsets
    assert_eq!(interface.writes().len(), 5 + 6);
    assert_eq!(interface.read_count(0x43), 100);
    assert_eq!(interface.sleeps()[0], 200_000);
    assert_eq!(interface.sleeps().len(), 1 + 100);
    assert_eq!(interface.get_register(0x13), 0xFF);
    assert_eq!(interface.get_register(0x14), 0x9D);
}

#[test]
fn test_failures_across_phases_are_counted() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_writes_to(0x19);
    interface.fail_reads_from_after(0x43, 50);
    interface.fail_writes_to(0x16);

    let result = driver.calibrate_gyroscope();

    assert!(matches!(
        result,
        Err(Error::SequenceFailed { failures: 3, .. })
    ));
    assert_eq!(offset_writes(&interface.writes()).len(), 6);
}

#[test]
fn test_offset_write_failure_attempts_all() {
    let (mut driver, interface) = create_mock_driver();
    interface.fail_writes_to(0x15);

    let result = driver.calibrate_gyroscope();

    assert!(matches!(
        result,
        Err(Error::SequenceFailed { failures: 1, .. })
    ));
    assert_eq!(offset_writes(&interface.writes()).len(), 6);
}

#[test]
fn test_set_gyro_offsets() {
    let (mut driver, interface) = create_mock_driver();

    driver
        .set_gyro_offsets(GyroOffsets { x: 256, y: -1, z: 5 })
        .unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (0x13, 0x01),
            (0x14, 0x00),
            (0x15, 0xFF),
            (0x16, 0xFF),
            (0x17, 0x00),
            (0x18, 0x05),
        ]
    );
}
