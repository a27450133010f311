//! Monitor configuration.

use serde::{Deserialize, Serialize};

/// Sensor connection settings. Immutable after construction; used only
/// during connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// I2C device address of the sensor.
    pub address: u16,

    /// Shunt resistor value in ohms. Fixes the scale of the derived
    /// current and power values.
    pub r_shunt: f64,

    /// Expected maximum current in milliamps.
    ///
    /// When set, connect programs the calibration register with this value,
    /// reads back the chip identity, and reports it on the `connect`
    /// channel. When absent, connect performs the configuration writes only
    /// and the `connect` channel stays silent.
    #[serde(default)]
    pub max_ma: Option<u16>,
}
