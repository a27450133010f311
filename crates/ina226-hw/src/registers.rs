//! INA226 register map and conversion constants.
//!
//! Register addresses and scale factors from the INA226 datasheet
//! (TI SBOS547). All registers are 16 bits wide, big-endian on the wire.

/// Configuration register (reset, averaging, conversion times, mode).
pub const CONFIGURATION: u8 = 0x00;
/// Shunt voltage measurement, signed, 2.5 uV/bit.
pub const SHUNT_VOLTAGE: u8 = 0x01;
/// Bus voltage measurement, unsigned, 1.25 mV/bit.
pub const BUS_VOLTAGE: u8 = 0x02;
/// Power measurement scaled by the calibration register.
pub const POWER: u8 = 0x03;
/// Current measurement scaled by the calibration register.
pub const CURRENT: u8 = 0x04;
/// Calibration register scaling current/power readings.
pub const CALIBRATION: u8 = 0x05;
/// Alert configuration and conversion-ready flag.
pub const MASK_ENABLE: u8 = 0x06;
/// Alert comparison limit.
pub const ALERT_LIMIT: u8 = 0x07;
/// Manufacturer ID, reads 0x5449 ("TI").
pub const MANUFACTURER_ID: u8 = 0xFE;
/// Die ID, reads 0x2260.
pub const DIE_ID: u8 = 0xFF;

/// Writing this to the configuration register resets the chip.
pub const CONFIG_RESET: u16 = 0x8000;
/// Operating configuration: 4-sample averaging, 1.1 ms conversion times,
/// continuous shunt and bus measurement.
pub const CONFIG_DEFAULT: u16 = 0x4527;

/// Bus voltage register LSB in volts (1.25 mV).
pub const BUS_VOLTAGE_LSB: f64 = 0.00125;
/// Shunt voltage register LSB in volts (2.5 uV).
pub const SHUNT_VOLTAGE_LSB: f64 = 0.0000025;
