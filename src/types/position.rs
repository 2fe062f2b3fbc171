use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque device handle resolved by the identity provider.
///
/// Zero is never handed out for a resolved device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Attribute keys form a closed set; values are typed per key.
pub const KEY_ALARM: &str = "alarm";
pub const KEY_INPUT: &str = "input";
pub const KEY_OUTPUT: &str = "output";
pub const KEY_ODOMETER: &str = "odometer";
pub const KEY_DRIVER_ID: &str = "driverId";
pub const KEY_BATTERY: &str = "battery";
pub const KEY_RSSI: &str = "rssi";
pub const KEY_SATELLITES: &str = "satellites";
/// Analog channels are indexed: `adc1`, `adc2`, ...
pub const PREFIX_ADC: &str = "adc";

/// Typed attribute value
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(value) => Some(*value),
            AttributeValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => write!(f, "{}", text),
            AttributeValue::Integer(value) => write!(f, "{}", value),
            AttributeValue::Number(value) => write!(f, "{}", value),
        }
    }
}

/// One decoded position report.
///
/// Also serves as the baseline a delta frame is patched against. Both
/// timestamps are guaranteed to be set on every record returned by the
/// decoder; they are optional here so delta reconstruction can tell
/// "patched" from "inherited" before the defaults are applied.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionRecord {
    pub device_id: DeviceId,
    pub device_time: Option<DateTime<Utc>>,
    pub fix_time: Option<DateTime<Utc>>,
    pub valid: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub course: f64,
    pub attributes: HashMap<String, AttributeValue>,
}

impl PositionRecord {
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            device_time: None,
            fix_time: None,
            valid: false,
            latitude: 0.0,
            longitude: 0.0,
            speed: 0.0,
            course: 0.0,
            attributes: HashMap::new(),
        }
    }

    /// Set device time and fix time to the same instant.
    pub fn set_time(&mut self, time: DateTime<Utc>) {
        self.device_time = Some(time);
        self.fix_time = Some(time);
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.attributes
            .insert(key.to_string(), AttributeValue::Text(value.into()));
    }

    pub fn set_integer(&mut self, key: &str, value: i64) {
        self.attributes
            .insert(key.to_string(), AttributeValue::Integer(value));
    }

    pub fn set_number(&mut self, key: &str, value: f64) {
        self.attributes
            .insert(key.to_string(), AttributeValue::Number(value));
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn integer_attribute(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).and_then(AttributeValue::as_integer)
    }

    pub fn text_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(AttributeValue::as_text)
    }

    /// Copy every attribute the record does not already carry from
    /// `baseline` (delta carry-forward).
    pub fn inherit_attributes(&mut self, baseline: &PositionRecord) {
        for (key, value) in &baseline.attributes {
            self.attributes
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}
