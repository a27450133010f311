//! I2C bus transport.
//!
//! The driver talks to the chip through the [`I2cBus`] trait so it stays
//! independent of the underlying transport. [`LinuxI2cBus`] is the real
//! implementation over the kernel's `/dev/i2c-*` devices.

use crate::{Error, Result};
use rppal::i2c::I2c;
use tracing::info;

/// Register-addressed I2C master operations.
pub trait I2cBus {
    /// Selects the peripheral device subsequent transfers address.
    fn set_device_address(&mut self, address: u16) -> Result<()>;

    /// Writes raw bytes to the selected device.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Reads raw bytes from the selected device, filling `buf` completely.
    fn read(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Writes then reads in a single transaction (repeated start).
    ///
    /// Used to set the register pointer and read the register contents
    /// without releasing the bus in between.
    fn write_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<()>;
}

/// I2C bus on a Linux host.
pub struct LinuxI2cBus {
    i2c: I2c,
}

impl LinuxI2cBus {
    /// Opens the numbered kernel I2C bus (`/dev/i2c-<bus>`).
    pub fn open(bus: u8) -> Result<Self> {
        let i2c = I2c::with_bus(bus).map_err(|source| Error::BusUnavailable { bus, source })?;
        info!("I2C bus {} opened", bus);
        Ok(Self { i2c })
    }
}

impl I2cBus for LinuxI2cBus {
    fn set_device_address(&mut self, address: u16) -> Result<()> {
        self.i2c.set_slave_address(address)?;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.i2c.write(data)?;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let actual = self.i2c.read(buf)?;
        if actual != buf.len() {
            return Err(Error::ShortRead {
                expected: buf.len(),
                actual,
            });
        }
        Ok(())
    }

    fn write_read(&mut self, write: &[u8], read: &mut [u8]) -> Result<()> {
        self.i2c.write_read(write, read)?;
        Ok(())
    }
}
