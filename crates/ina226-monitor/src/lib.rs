//! INA226 Monitor
//!
//! Owns the connection lifecycle and poll loop for one INA226 sensor:
//! connect initializes the configuration and calibration registers, then a
//! background task repeatedly reads the voltage registers, derives current
//! and power, and notifies subscribers whenever the rounded values change.
//!
//! Transient failures slow the poll cadence and surface on the `error`
//! channel once per failure streak.
//!
//! ```no_run
//! use ina226_monitor::{Channel, Ina226Monitor, MonitorConfig, MonitorEvent};
//!
//! # async fn run() {
//! let monitor = Ina226Monitor::new(MonitorConfig {
//!     address: 0x40,
//!     r_shunt: 0.1,
//!     max_ma: Some(500),
//! });
//!
//! monitor
//!     .on(Channel::Change, |event| {
//!         if let MonitorEvent::Change(reading) = event {
//!             println!("{:.2} V, {:.2} A", reading.bus_voltage, reading.current);
//!         }
//!     })
//!     .on(Channel::Error, |event| eprintln!("{:?}", event));
//!
//! monitor.connect();
//! # }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod monitor;
pub mod reading;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use event::{Channel, ConnectInfo, MonitorEvent};
pub use monitor::{I2cSensorFactory, Ina226Monitor, SensorFactory};
pub use reading::Reading;
