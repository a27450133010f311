//! INA226 driver: register access and unit conversion.

use crate::bus::I2cBus;
use crate::registers;
use crate::Result;
use tracing::debug;

/// Register access and derived-value calculations of a current/power sensor.
///
/// [`Ina226`] is the hardware implementation; consumers that poll a sensor
/// should accept this trait so they can run against substitute sensors.
pub trait PowerSensor {
    /// Writes a 16-bit value to a register.
    fn write_register(&mut self, register: u8, value: u16) -> Result<()>;

    /// Reads a 16-bit register value.
    fn read_register(&mut self, register: u8) -> Result<u16>;

    /// Reads the bus voltage in volts.
    fn read_bus_voltage(&mut self) -> Result<f64>;

    /// Reads the shunt voltage drop in volts. Negative for reverse current.
    fn read_shunt_voltage(&mut self) -> Result<f64>;

    /// Current in amps through the shunt for a given shunt voltage.
    fn calc_current(&self, shunt_voltage: f64) -> f64;

    /// Power in watts delivered to the load for the given voltages.
    fn calc_power(&self, bus_voltage: f64, shunt_voltage: f64) -> f64;
}

/// INA226 bound to a bus, a device address, and a shunt resistor value.
pub struct Ina226<B: I2cBus> {
    bus: B,
    address: u16,
    r_shunt: f64,
}

impl<B: I2cBus> Ina226<B> {
    /// Binds a driver to the device at `address` on `bus`.
    ///
    /// `r_shunt` is the shunt resistor value in ohms; it fixes the scale of
    /// the current and power calculations.
    pub fn new(mut bus: B, address: u16, r_shunt: f64) -> Result<Self> {
        bus.set_device_address(address)?;
        Ok(Self {
            bus,
            address,
            r_shunt,
        })
    }

    /// The I2C device address this driver is bound to.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// The shunt resistor value in ohms.
    pub fn shunt_resistance(&self) -> f64 {
        self.r_shunt
    }
}

impl<B: I2cBus> PowerSensor for Ina226<B> {
    fn write_register(&mut self, register: u8, value: u16) -> Result<()> {
        let [hi, lo] = value.to_be_bytes();
        self.bus.write(&[register, hi, lo])?;
        debug!("wrote 0x{:04X} to register 0x{:02X}", value, register);
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.bus.write_read(&[register], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_bus_voltage(&mut self) -> Result<f64> {
        let raw = self.read_register(registers::BUS_VOLTAGE)?;
        Ok(f64::from(raw) * registers::BUS_VOLTAGE_LSB)
    }

    fn read_shunt_voltage(&mut self) -> Result<f64> {
        // Two's complement; sign matters for reverse current.
        let raw = self.read_register(registers::SHUNT_VOLTAGE)? as i16;
        Ok(f64::from(raw) * registers::SHUNT_VOLTAGE_LSB)
    }

    fn calc_current(&self, shunt_voltage: f64) -> f64 {
        shunt_voltage / self.r_shunt
    }

    fn calc_power(&self, bus_voltage: f64, shunt_voltage: f64) -> f64 {
        bus_voltage * shunt_voltage / self.r_shunt
    }
}
