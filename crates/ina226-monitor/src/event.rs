//! Channel-based event subscription.
//!
//! Listeners register per channel and are invoked synchronously, in
//! registration order, from the monitor's background task.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::error::MonitorError;
use crate::reading::Reading;

/// Subscription channels recognized by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Fires once with [`ConnectInfo`] after a successful calibrated
    /// handshake. Silent when no maximum current is configured.
    Connect,
    /// Fires with a [`Reading`] whenever the rounded values change.
    Change,
    /// Fires with the failure cause, at most once per failure streak.
    Error,
    /// Reserved extension point. Recognized for subscription but never
    /// emitted; kept so callers subscribing defensively keep working.
    Debug,
}

/// Chip identity captured once during the connect handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectInfo {
    /// Manufacturer ID register contents (0x5449 on genuine parts).
    pub manufacturer_id: u16,
    /// Die ID register contents.
    pub die_id: u16,
    /// Configuration register contents after initialization.
    pub configuration: u16,
}

/// Payload delivered to channel listeners.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// Handshake completed; carries the chip identity.
    Connect(ConnectInfo),
    /// The rounded reading differs from the previous one.
    Change(Reading),
    /// A connect or poll step failed.
    Error(Arc<MonitorError>),
    /// Reserved, never emitted.
    Debug(String),
}

type Listener = Box<dyn Fn(&MonitorEvent) + Send + Sync>;

/// Ordered per-channel listener registry with synchronous dispatch.
#[derive(Default)]
pub(crate) struct EventListeners {
    channels: RwLock<HashMap<Channel, Vec<Listener>>>,
}

impl EventListeners {
    pub(crate) fn subscribe(&self, channel: Channel, listener: Listener) {
        self.channels
            .write()
            .unwrap()
            .entry(channel)
            .or_default()
            .push(listener);
    }

    pub(crate) fn emit(&self, channel: Channel, event: &MonitorEvent) {
        if let Some(listeners) = self.channels.read().unwrap().get(&channel) {
            for listener in listeners {
                listener(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let listeners = EventListeners::default();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for id in [1, 2, 3] {
            let calls = calls.clone();
            listeners.subscribe(
                Channel::Change,
                Box::new(move |_| calls.lock().unwrap().push(id)),
            );
        }

        let reading = Reading {
            bus_voltage: 12.0,
            shunt_voltage: 0.00123,
            current: 0.01,
            power: 0.15,
        };
        listeners.emit(Channel::Change, &MonitorEvent::Change(reading));

        assert_eq!(*calls.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_channels_are_independent() {
        let listeners = EventListeners::default();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let change_calls = calls.clone();
        listeners.subscribe(
            Channel::Change,
            Box::new(move |_| change_calls.lock().unwrap().push("change")),
        );
        let debug_calls = calls.clone();
        listeners.subscribe(
            Channel::Debug,
            Box::new(move |_| debug_calls.lock().unwrap().push("debug")),
        );

        let reading = Reading {
            bus_voltage: 0.0,
            shunt_voltage: 0.0,
            current: 0.0,
            power: 0.0,
        };
        listeners.emit(Channel::Change, &MonitorEvent::Change(reading));

        assert_eq!(*calls.lock().unwrap(), vec!["change"]);
    }

    #[test]
    fn test_emit_without_listeners_is_a_no_op() {
        let listeners = EventListeners::default();
        listeners.emit(Channel::Debug, &MonitorEvent::Debug("unused".into()));
    }
}
