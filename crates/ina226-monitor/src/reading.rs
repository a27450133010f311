//! Sensor reading model and decimal rounding.

use serde::Serialize;

/// Decimal places kept for bus voltage.
pub const BUS_VOLTAGE_PRECISION: i32 = 2;
/// Decimal places kept for shunt voltage.
pub const SHUNT_VOLTAGE_PRECISION: i32 = 5;
/// Decimal places kept for current.
pub const CURRENT_PRECISION: i32 = 2;
/// Decimal places kept for power.
pub const POWER_PRECISION: i32 = 2;

/// One observation of sensor state, rounded to fixed precision.
///
/// Values are rounded BEFORE they are compared or emitted, so jitter below
/// the kept precision never produces a change notification. Equality is
/// plain structural comparison of the rounded values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    /// Supply-side voltage in volts, 2 decimal places.
    pub bus_voltage: f64,
    /// Voltage drop across the shunt in volts, 5 decimal places.
    pub shunt_voltage: f64,
    /// Derived current in amps, 2 decimal places.
    pub current: f64,
    /// Derived power in watts, 2 decimal places.
    pub power: f64,
}

/// Rounds `value` to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
