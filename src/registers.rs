//! Register definitions for the MPU-6050
//!
//! Only the registers the driver touches through typed field sets are
//! described here. Sensor output registers are read as raw bursts (see the
//! `*_OUT_H` constants below) so that one bus transaction covers a whole
//! device update cycle.
//!
//! Addresses follow the MPU-6000/MPU-6050 Register Map and Descriptions,
//! revision 4.2.

/// First accelerometer output register (`ACCEL_XOUT_H`)
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// First temperature output register (`TEMP_OUT_H`)
pub const TEMP_OUT_H: u8 = 0x41;

/// First gyroscope output register (`GYRO_XOUT_H`)
pub const GYRO_XOUT_H: u8 = 0x43;

device_driver::create_device!(
    device_name: Mpu6050,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        // ==================== GYRO OFFSET REGISTERS ====================
        // Written as 16-bit two's complement, high byte first

        /// XG_OFFS_USRH - Gyroscope X offset, high byte (0x13)
        register XgOffsUsrh {
            const ADDRESS = 0x13;
            const SIZE_BITS = 8;

            xg_offs_usrh: uint = 0..8,
        },

        /// XG_OFFS_USRL - Gyroscope X offset, low byte (0x14)
        register XgOffsUsrl {
            const ADDRESS = 0x14;
            const SIZE_BITS = 8;

            xg_offs_usrl: uint = 0..8,
        },

        /// YG_OFFS_USRH - Gyroscope Y offset, high byte (0x15)
        register YgOffsUsrh {
            const ADDRESS = 0x15;
            const SIZE_BITS = 8;

            yg_offs_usrh: uint = 0..8,
        },

        /// YG_OFFS_USRL - Gyroscope Y offset, low byte (0x16)
        register YgOffsUsrl {
            const ADDRESS = 0x16;
            const SIZE_BITS = 8;

            yg_offs_usrl: uint = 0..8,
        },

        /// ZG_OFFS_USRH - Gyroscope Z offset, high byte (0x17)
        register ZgOffsUsrh {
            const ADDRESS = 0x17;
            const SIZE_BITS = 8;

            zg_offs_usrh: uint = 0..8,
        },

        /// ZG_OFFS_USRL - Gyroscope Z offset, low byte (0x18)
        register ZgOffsUsrl {
            const ADDRESS = 0x18;
            const SIZE_BITS = 8;

            zg_offs_usrl: uint = 0..8,
        },

        // ==================== CONFIGURATION REGISTERS ====================

        /// SMPLRT_DIV - Sample Rate Divider (0x19)
        /// Sample rate = gyroscope output rate / (1 + SMPLRT_DIV)
        register SmplrtDiv {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            smplrt_div: uint = 0..8,
        },

        /// CONFIG - Configuration (0x1A)
        register DlpfConfig {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Digital low pass filter setting (0-7)
            dlpf_cfg: uint = 0..3,
            /// FSYNC pin sampling
            ext_sync_set: uint = 3..6,
            reserved_7_6: uint = 6..8,
        },

        /// GYRO_CONFIG - Gyroscope Configuration (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale range select (0=±250, 1=±500, 2=±1000, 3=±2000 °/s)
            fs_sel: uint = 3..5,
            /// Z-axis self-test
            zg_st: bool = 5,
            /// Y-axis self-test
            yg_st: bool = 6,
            /// X-axis self-test
            xg_st: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer Configuration (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale range select (0=±2g, 1=±4g, 2=±8g, 3=±16g)
            afs_sel: uint = 3..5,
            /// Z-axis self-test
            za_st: bool = 5,
            /// Y-axis self-test
            ya_st: bool = 6,
            /// X-axis self-test
            xa_st: bool = 7,
        },

        // ==================== INTERRUPT REGISTERS ====================

        /// INT_ENABLE - Interrupt Enable (0x38)
        register IntEnable {
            const ADDRESS = 0x38;
            const SIZE_BITS = 8;

            /// Data ready interrupt enable
            data_rdy_en: bool = 0,
            reserved_2_1: uint = 1..3,
            /// I2C master interrupt enable (I2C_MST_INT_EN)
            mst_int_en: bool = 3,
            /// FIFO overflow interrupt enable
            fifo_oflow_en: bool = 4,
            reserved_5: uint = 5..6,
            /// Motion detection interrupt enable
            mot_en: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// INT_STATUS - Interrupt Status (0x3A)
        register IntStatus {
            const ADDRESS = 0x3A;
            const SIZE_BITS = 8;

            /// Data ready interrupt (all output registers written)
            data_rdy_int: bool = 0,
            reserved_2_1: uint = 1..3,
            /// I2C master interrupt (I2C_MST_INT)
            mst_int: bool = 3,
            /// FIFO overflow interrupt
            fifo_oflow_int: bool = 4,
            reserved_5: uint = 5..6,
            /// Motion detection interrupt
            mot_int: bool = 6,
            reserved_7: uint = 7..8,
        },

        // ==================== RESET AND POWER REGISTERS ====================

        /// SIGNAL_PATH_RESET - Signal Path Reset (0x68)
        register SignalPathReset {
            const ADDRESS = 0x68;
            const SIZE_BITS = 8;

            /// Reset temperature sensor signal path
            temp_reset: bool = 0,
            /// Reset accelerometer signal path
            accel_reset: bool = 1,
            /// Reset gyroscope signal path
            gyro_reset: bool = 2,
            reserved_7_3: uint = 3..8,
        },

        /// USER_CTRL - User Control (0x6A)
        register UserCtrl {
            const ADDRESS = 0x6A;
            const SIZE_BITS = 8;

            /// Reset all sensor signal paths and clear sensor registers
            /// (self-clearing)
            sig_cond_reset: bool = 0,
            /// I2C master reset (I2C_MST_RESET)
            mst_reset: bool = 1,
            /// FIFO reset
            fifo_reset: bool = 2,
            reserved_3: uint = 3..4,
            /// Primary I2C interface disable (I2C_IF_DIS)
            if_dis: bool = 4,
            /// I2C master enable (I2C_MST_EN)
            mst_en: bool = 5,
            /// FIFO enable
            fifo_en: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (0=internal 8MHz, 1-3=gyro PLL, 4-5=external, 7=stop)
            clksel: uint = 0..3,
            /// Temperature sensor disable
            temp_dis: bool = 3,
            reserved_4: uint = 4..5,
            /// Cycle between sleep and single samples
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Device reset (self-clearing)
            device_reset: bool = 7,
        },

        /// WHO_AM_I - Device ID Register (0x75)
        /// Expected value: 0x68
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID (should read 0x68)
            who_am_i: uint = 0..8,
        }
    }
);
