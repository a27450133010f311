//! INA226 Hardware Library
//!
//! Hardware abstraction for the Texas Instruments INA226 current/power
//! monitor: I2C bus transport, register map, and conversion of raw register
//! values into volts, amps, and watts.

pub mod bus;
pub mod error;
pub mod ina226;
pub mod registers;

pub use bus::{I2cBus, LinuxI2cBus};
pub use error::{Error, Result};
pub use ina226::{Ina226, PowerSensor};

/// Default INA226 I2C device address (A0 and A1 tied to ground).
pub const DEFAULT_ADDRESS: u16 = 0x40;
