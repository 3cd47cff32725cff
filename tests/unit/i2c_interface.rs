//! Unit tests for the I2C transport against a scripted bus

use device_driver::RegisterInterface;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use mpu6050::{Config, Error, GyroFullScale, I2cInterface, Mpu6050Driver};

const ADDR: u8 = 0x68;

fn who_am_i(address: u8) -> I2cTransaction {
    I2cTransaction::write_read(address, vec![0x75], vec![0x68])
}

#[test]
fn test_identity_over_i2c() {
    let expectations = [who_am_i(ADDR)];
    let i2c = I2cMock::new(&expectations);

    let driver = Mpu6050Driver::new(I2cInterface::default(i2c, NoopDelay::new())).unwrap();

    let (mut i2c, _delay) = driver.release().release();
    i2c.done();
}

#[test]
fn test_alternative_address() {
    let expectations = [who_am_i(0x69)];
    let i2c = I2cMock::new(&expectations);
    let interface = I2cInterface::alternative(i2c, NoopDelay::new());
    assert_eq!(interface.address(), 0x69);

    let driver = Mpu6050Driver::new(interface).unwrap();

    let (mut i2c, _delay) = driver.release().release();
    i2c.done();
}

#[test]
fn test_wrong_device_over_i2c() {
    let expectations = [I2cTransaction::write_read(ADDR, vec![0x75], vec![0x72])];
    let mut i2c = I2cMock::new(&expectations);

    {
        let result = Mpu6050Driver::new(I2cInterface::default(&mut i2c, NoopDelay::new()));
        assert!(matches!(result, Err(Error::InvalidDevice(0x72))));
    }

    i2c.done();
}

#[test]
fn test_configure_writes_register_value_pairs() {
    let expectations = [
        who_am_i(ADDR),
        I2cTransaction::write(ADDR, vec![0x19, 0x04]),
        I2cTransaction::write(ADDR, vec![0x68, 0x07]),
        I2cTransaction::write(ADDR, vec![0x38, 0x00]),
        I2cTransaction::write(ADDR, vec![0x1A, 0x03]),
        I2cTransaction::write(ADDR, vec![0x1C, 0x08]),
        I2cTransaction::write(ADDR, vec![0x1B, 0x08]),
        I2cTransaction::write(ADDR, vec![0x6B, 0x00]),
    ];
    let i2c = I2cMock::new(&expectations);
    let mut driver = Mpu6050Driver::new(I2cInterface::default(i2c, NoopDelay::new())).unwrap();

    driver
        .configure(Config {
            gyro_range: GyroFullScale::Dps500,
            accel_range: mpu6050::AccelFullScale::G4,
            dlpf: mpu6050::Dlpf::Hz44,
            sample_rate_div: 4,
            ..Default::default()
        })
        .unwrap();

    let (mut i2c, _delay) = driver.release().release();
    i2c.done();
}

#[test]
fn test_read_all_is_one_transaction() {
    let burst = vec![
        0x40, 0x00, 0x00, 0x00, 0xC0, 0x00, // accel: 1g, 0, -1g
        0xFF, 0xDE, // temperature raw -34
        0x03, 0x41, 0x00, 0x00, 0x00, 0x10, // gyro
    ];
    let expectations = [
        who_am_i(ADDR),
        I2cTransaction::write_read(ADDR, vec![0x3B], burst),
    ];
    let i2c = I2cMock::new(&expectations);
    let mut driver = Mpu6050Driver::new(I2cInterface::default(i2c, NoopDelay::new())).unwrap();

    let sample = driver.read_all().unwrap();

    assert_eq!(sample.accel.x, 1024);
    assert_eq!(sample.accel.z, -1024);
    assert_eq!(sample.temperature, 364);
    assert_eq!(sample.gyro.x, 52);
    assert_eq!(sample.gyro.z, 1);

    let (mut i2c, _delay) = driver.release().release();
    i2c.done();
}

#[test]
fn test_bus_error_is_propagated() {
    let expectations = [
        who_am_i(ADDR),
        I2cTransaction::write_read(ADDR, vec![0x43], vec![0; 6]).with_error(ErrorKind::Other),
    ];
    let i2c = I2cMock::new(&expectations);
    let mut driver = Mpu6050Driver::new(I2cInterface::default(i2c, NoopDelay::new())).unwrap();

    assert_eq!(driver.read_gyroscope(), Err(Error::Bus(ErrorKind::Other)));

    let (mut i2c, _delay) = driver.release().release();
    i2c.done();
}

#[test]
fn test_register_write_is_address_then_value() {
    let expectations = [I2cTransaction::write(0x69, vec![0x6B, 0x40])];
    let i2c = I2cMock::new(&expectations);
    let mut interface = I2cInterface::new(i2c, NoopDelay::new(), 0x69);

    interface.write_register(0x6B, 8, &[0x40]).unwrap();

    let (mut i2c, _delay) = interface.release();
    i2c.done();
}
