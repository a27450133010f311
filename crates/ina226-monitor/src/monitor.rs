//! Connect handshake and poll loop for one sensor instance.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ina226_hw::{registers, Ina226, LinuxI2cBus, PowerSensor};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::event::{Channel, ConnectInfo, EventListeners, MonitorEvent};
use crate::reading::{
    round_to, Reading, BUS_VOLTAGE_PRECISION, CURRENT_PRECISION, POWER_PRECISION,
    SHUNT_VOLTAGE_PRECISION,
};

/// Kernel I2C bus the sensor is attached to.
const I2C_BUS: u8 = 1;

/// Delay between successful poll iterations.
const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Delay before retrying after a failed iteration.
const RETRY_INTERVAL: Duration = Duration::from_millis(5000);

/// Produces the sensor handle the monitor polls.
///
/// The default factory opens the Linux I2C bus. Substituting a factory is
/// the seam for other transports and for scripted sensors in tests.
pub trait SensorFactory: Send + Sync + 'static {
    type Sensor: PowerSensor + Send;

    /// Opens the transport and binds a driver to the configured device.
    fn open(&self, config: &MonitorConfig) -> ina226_hw::Result<Self::Sensor>;
}

/// Default factory: INA226 on Linux I2C bus 1.
pub struct I2cSensorFactory;

impl SensorFactory for I2cSensorFactory {
    type Sensor = Ina226<LinuxI2cBus>;

    fn open(&self, config: &MonitorConfig) -> ina226_hw::Result<Self::Sensor> {
        let bus = LinuxI2cBus::open(I2C_BUS)?;
        Ina226::new(bus, config.address, config.r_shunt)
    }
}

/// Polling monitor for one INA226 instance.
///
/// Construct it, register listeners with [`on`](Self::on), then call
/// [`connect`](Self::connect) from within a tokio runtime. The handshake
/// and poll loop run as a single background task, so handshake steps and
/// poll iterations never overlap: iteration N+1 starts only after iteration
/// N fully resolves. Dropping the monitor stops the loop.
pub struct Ina226Monitor<F: SensorFactory = I2cSensorFactory> {
    inner: Arc<Inner<F>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

/// State shared with the background task.
struct Inner<F: SensorFactory> {
    config: MonitorConfig,
    factory: F,
    listeners: EventListeners,
}

impl Ina226Monitor<I2cSensorFactory> {
    /// Creates a monitor backed by the Linux I2C bus.
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_factory(config, I2cSensorFactory)
    }
}

impl<F: SensorFactory> Ina226Monitor<F> {
    /// Creates a monitor that obtains its sensor from `factory`.
    pub fn with_factory(config: MonitorConfig, factory: F) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                factory,
                listeners: EventListeners::default(),
            }),
            task: Mutex::new(None),
        }
    }

    /// Registers a listener on `channel`.
    ///
    /// Listeners on the same channel are invoked in registration order.
    /// Returns `&self` so further subscriptions can be chained.
    pub fn on(
        &self,
        channel: Channel,
        listener: impl Fn(&MonitorEvent) + Send + Sync + 'static,
    ) -> &Self {
        self.inner.listeners.subscribe(channel, Box::new(listener));
        self
    }

    /// Starts the connect handshake and poll loop in the background.
    ///
    /// Fire-and-forget: returns immediately, progress is reported through
    /// the subscription channels. Nothing is ever raised back to the
    /// caller. Calling this on a monitor whose task is still running aborts
    /// it and reconnects from scratch; this is also the retry path after a
    /// connect-time failure.
    pub fn connect(&self) -> &Self {
        let mut task = self.task.lock().unwrap();
        if let Some(previous) = task.take() {
            previous.abort();
        }

        let inner = Arc::clone(&self.inner);
        *task = Some(tokio::spawn(async move { inner.run().await }));
        drop(task);

        self
    }

    /// Stops the poll loop. No further events fire until
    /// [`connect`](Self::connect) is called again.
    pub fn disconnect(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
        }
    }
}

impl<F: SensorFactory> Drop for Ina226Monitor<F> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl<F: SensorFactory> Inner<F> {
    async fn run(&self) {
        let mut sensor = match self.handshake() {
            Ok(sensor) => sensor,
            Err(e) => {
                warn!("connect failed: {}", e);
                self.emit_error(MonitorError::Connect(e));
                return;
            }
        };

        // Owned by the poll loop alone; nothing else reads or writes these.
        let mut last_reading: Option<Reading> = None;
        let mut error_reported = false;

        loop {
            let wait = match self.poll_once(&mut sensor, &mut last_reading) {
                Ok(()) => {
                    error_reported = false;
                    POLL_INTERVAL
                }
                Err(e) => {
                    if error_reported {
                        debug!("poll failed again, suppressing repeat: {}", e);
                    } else {
                        error_reported = true;
                        warn!("poll failed: {}", e);
                        self.emit_error(MonitorError::Poll(e));
                    }
                    RETRY_INTERVAL
                }
            };

            tokio::time::sleep(wait).await;
        }
    }

    /// Opens the bus, initializes the chip, and reports identity when the
    /// calibrated variant is configured.
    fn handshake(&self) -> ina226_hw::Result<F::Sensor> {
        let mut sensor = self.factory.open(&self.config)?;

        sensor.write_register(registers::CONFIGURATION, registers::CONFIG_RESET)?;
        sensor.write_register(registers::CONFIGURATION, registers::CONFIG_DEFAULT)?;

        if let Some(max_ma) = self.config.max_ma {
            sensor.write_register(registers::CALIBRATION, max_ma)?;

            let connect_info = ConnectInfo {
                manufacturer_id: sensor.read_register(registers::MANUFACTURER_ID)?,
                die_id: sensor.read_register(registers::DIE_ID)?,
                configuration: sensor.read_register(registers::CONFIGURATION)?,
            };

            info!(
                "sensor connected at 0x{:02X}: {:?}",
                self.config.address, connect_info
            );
            self.listeners
                .emit(Channel::Connect, &MonitorEvent::Connect(connect_info));
        } else {
            info!("sensor configured at 0x{:02X}", self.config.address);
        }

        Ok(sensor)
    }

    /// One read-compute-compare-emit cycle.
    fn poll_once(
        &self,
        sensor: &mut F::Sensor,
        last_reading: &mut Option<Reading>,
    ) -> ina226_hw::Result<()> {
        // Round before deriving and comparing, so jitter below the kept
        // precision neither skews the calculations nor triggers a change.
        let bus_voltage = round_to(sensor.read_bus_voltage()?, BUS_VOLTAGE_PRECISION);
        let shunt_voltage = round_to(sensor.read_shunt_voltage()?, SHUNT_VOLTAGE_PRECISION);

        let reading = Reading {
            bus_voltage,
            shunt_voltage,
            current: round_to(sensor.calc_current(shunt_voltage), CURRENT_PRECISION),
            power: round_to(
                sensor.calc_power(bus_voltage, shunt_voltage),
                POWER_PRECISION,
            ),
        };

        if last_reading.as_ref() != Some(&reading) {
            *last_reading = Some(reading);
            debug!("reading changed: {:?}", reading);
            self.listeners
                .emit(Channel::Change, &MonitorEvent::Change(reading));
        }

        Ok(())
    }

    fn emit_error(&self, error: MonitorError) {
        self.listeners
            .emit(Channel::Error, &MonitorEvent::Error(Arc::new(error)));
    }
}
