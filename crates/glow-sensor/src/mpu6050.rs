//! MPU-6050 accelerometer driver
//!
//! Only the pieces the tilt source needs: a presence probe, the wake-up
//! write that clears the power-on sleep bit, and a burst read of the
//! accelerometer block of which the X axis is used.
//!
//! The chip powers up in the ±2 G range, where one G is 16384 LSB.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};

use glow_core::SensorConfig;

use crate::sensor::TiltSensor;

/// Register addresses
mod regs {
    /// First of six accelerometer bytes (X, Y, Z; high byte first)
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    /// Power management 1; bit 6 is SLEEP
    pub const PWR_MGMT_1: u8 = 0x6B;
}

/// Default 7-bit address with AD0 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Raw counts per G in the ±2 G range.
pub const LSB_PER_G: f32 = 16384.0;

/// Driver error
#[derive(Debug)]
pub enum SensorError<E> {
    /// Nothing acknowledged the probe
    NotPresent(E),
    /// I2C transaction failed after detection
    I2c(E),
}

/// MPU-6050 on an I2C bus.
pub struct Mpu6050<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
    settle_ms: u32,
    wake_ms: u32,
}

impl<I2C, D> Mpu6050<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, addr: u8) -> Self {
        let defaults = SensorConfig::default();
        Self {
            i2c,
            delay,
            addr,
            settle_ms: defaults.settle_ms,
            wake_ms: defaults.wake_ms,
        }
    }

    /// Driver with address and delays taken from the settings file.
    pub fn from_config(i2c: I2C, delay: D, config: &SensorConfig) -> Self {
        Self::new(i2c, delay, config.address).with_delays(config.settle_ms, config.wake_ms)
    }

    /// Override the bus settle and wake-up delays.
    #[must_use]
    pub fn with_delays(mut self, settle_ms: u32, wake_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self.wake_ms = wake_ms;
        self
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Probe the address and take the chip out of sleep mode.
    ///
    /// An acknowledged probe is what counts as present. A failed wake-up
    /// write is only logged.
    pub fn init(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.delay.delay_ms(self.settle_ms);

        self.i2c
            .write(self.addr, &[])
            .map_err(SensorError::NotPresent)?;

        if let Err(e) = self.i2c.write(self.addr, &[regs::PWR_MGMT_1, 0x00]) {
            log::warn!(
                "MPU-6050 at 0x{:02X} rejected the wake-up write: {:?}",
                self.addr,
                e.kind()
            );
        }

        self.delay.delay_ms(self.wake_ms);
        Ok(())
    }

    /// Raw X axis count.
    pub fn read_accel_x_raw(&mut self) -> Result<i16, SensorError<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.addr, &[regs::ACCEL_XOUT_H], &mut buf)
            .map_err(SensorError::I2c)?;
        Ok(i16::from_be_bytes([buf[0], buf[1]]))
    }

    /// X axis acceleration in G.
    pub fn read_accel_x(&mut self) -> Result<f32, SensorError<I2C::Error>> {
        Ok(self.read_accel_x_raw()? as f32 / LSB_PER_G)
    }

    /// Release the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> TiltSensor for Mpu6050<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn try_init(&mut self) -> bool {
        match self.init() {
            Ok(()) => true,
            Err(SensorError::NotPresent(e)) | Err(SensorError::I2c(e)) => {
                log::debug!("MPU-6050 probe at 0x{:02X} failed: {:?}", self.addr, e.kind());
                false
            }
        }
    }

    fn try_read(&mut self) -> Option<f32> {
        match self.read_accel_x() {
            Ok(g) => Some(g),
            Err(SensorError::NotPresent(e)) | Err(SensorError::I2c(e)) => {
                log::trace!("MPU-6050 read missed: {:?}", e.kind());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Bus with a single device that always returns the same accel block.
    struct FixedBus {
        present: bool,
        reject_writes: bool,
        block: [u8; 6],
        writes: Vec<Vec<u8>>,
    }

    impl ErrorType for FixedBus {
        type Error = ErrorKind;
    }

    impl I2c for FixedBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if !self.present || address != DEFAULT_ADDRESS {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) if self.reject_writes && !bytes.is_empty() => {
                        return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
                    }
                    Operation::Write(bytes) => self.writes.push(bytes.to_vec()),
                    Operation::Read(buf) => {
                        let n = buf.len().min(self.block.len());
                        buf[..n].copy_from_slice(&self.block[..n]);
                    }
                }
            }
            Ok(())
        }
    }

    fn bus(present: bool, x: i16) -> FixedBus {
        let [hi, lo] = x.to_be_bytes();
        FixedBus {
            present,
            reject_writes: false,
            block: [hi, lo, 0x12, 0x34, 0x40, 0x00],
            writes: Vec::new(),
        }
    }

    #[test]
    fn test_init_probes_then_wakes() {
        let mut mpu = Mpu6050::new(bus(true, 0), NoDelay, DEFAULT_ADDRESS);
        assert!(mpu.init().is_ok());
        let (bus, _) = mpu.release();
        assert_eq!(bus.writes, vec![Vec::<u8>::new(), vec![0x6Bu8, 0x00]]);
    }

    #[test]
    fn test_rejected_wake_write_still_counts_as_present() {
        let mut b = bus(true, 0);
        b.reject_writes = true;
        let mut mpu = Mpu6050::new(b, NoDelay, DEFAULT_ADDRESS);
        assert!(mpu.init().is_ok());
        assert!(mpu.try_init());
        let (bus, _) = mpu.release();
        assert_eq!(bus.writes, vec![Vec::<u8>::new(), Vec::<u8>::new()]);
    }

    #[test]
    fn test_new_takes_default_delays() {
        let mpu = Mpu6050::new(bus(true, 0), NoDelay, DEFAULT_ADDRESS);
        let defaults = SensorConfig::default();
        assert_eq!((mpu.settle_ms, mpu.wake_ms), (defaults.settle_ms, defaults.wake_ms));
    }

    #[test]
    fn test_absent_device_is_not_present() {
        let mut mpu = Mpu6050::new(bus(false, 0), NoDelay, DEFAULT_ADDRESS);
        assert!(matches!(mpu.init(), Err(SensorError::NotPresent(_))));
        assert!(!mpu.try_init());
    }

    #[test]
    fn test_from_config_uses_configured_address() {
        let mpu = Mpu6050::from_config(bus(true, 0), NoDelay, &SensorConfig::default());
        assert_eq!(mpu.address(), DEFAULT_ADDRESS);
    }

    #[test]
    fn test_wrong_address_fails_probe() {
        let mut mpu = Mpu6050::new(bus(true, 0), NoDelay, 0x69);
        assert!(!mpu.try_init());
    }

    #[test]
    fn test_read_converts_to_g() {
        let mut mpu = Mpu6050::new(bus(true, 8192), NoDelay, DEFAULT_ADDRESS);
        assert_eq!(mpu.read_accel_x().unwrap(), 0.5);

        let mut mpu = Mpu6050::new(bus(true, -16384), NoDelay, DEFAULT_ADDRESS);
        assert_eq!(mpu.try_read(), Some(-1.0));
    }

    #[test]
    fn test_read_requests_accel_block() {
        let mut mpu = Mpu6050::new(bus(true, 1), NoDelay, DEFAULT_ADDRESS);
        mpu.read_accel_x_raw().unwrap();
        let (bus, _) = mpu.release();
        assert_eq!(bus.writes, vec![vec![0x3Bu8]]);
    }
}
