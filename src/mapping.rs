//! The fixed table of build definitions and where their values live.

use std::fmt;

/// Address of a single secret: `(collection, attribute)`, e.g. `(wifi, ssid)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecretRef<'a> {
    pub collection: &'a str,
    pub attribute: &'a str,
}

impl<'a> SecretRef<'a> {
    pub fn new(collection: &'a str, attribute: &'a str) -> Self {
        Self {
            collection,
            attribute,
        }
    }
}

impl fmt::Display for SecretRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.attribute)
    }
}

/// A definition name bound to the secret that provides its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretMapping {
    /// Preprocessor definition name (e.g. `WIFI_SSID`)
    pub name: &'static str,
    /// Collection in the secret store (e.g. `wifi`)
    pub collection: &'static str,
    /// Attribute in the secret store (e.g. `ssid`)
    pub attribute: &'static str,
}

impl SecretMapping {
    pub const fn new(name: &'static str, collection: &'static str, attribute: &'static str) -> Self {
        Self {
            name,
            collection,
            attribute,
        }
    }

    pub fn secret_ref(&self) -> SecretRef<'static> {
        SecretRef::new(self.collection, self.attribute)
    }
}

/// Definitions the firmware expects, in the order they are looked up.
pub const SECRET_MAPPINGS: [SecretMapping; 4] = [
    SecretMapping::new("WIFI_SSID", "wifi", "ssid"),
    SecretMapping::new("WIFI_PASSWORD", "wifi", "password"),
    SecretMapping::new("MQTT_USER", "mqtt", "user"),
    SecretMapping::new("MQTT_PASSWORD", "mqtt", "password"),
];
