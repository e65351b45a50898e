//! # Device Factories
//!
//! Abstract factory for city devices. A type key selects a factory; each
//! factory produces the same fixed descriptor on every call.
//!
//! Only `"lighting"` and `"transport"` are known. Any other key is an
//! `UnknownDeviceType` error returned to the caller.

use crate::error::{CityError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of device a factory can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Lighting,
    Transport,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 2] = [DeviceKind::Lighting, DeviceKind::Transport];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Lighting => "lighting",
            DeviceKind::Transport => "transport",
        }
    }

    /// Every accepted key, slash-separated, for error text.
    #[must_use]
    pub fn expected() -> String {
        Self::ALL.map(Self::as_str).join(" / ")
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the type key.
impl FromStr for DeviceKind {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lighting" => Ok(DeviceKind::Lighting),
            "transport" => Ok(DeviceKind::Transport),
            other => Err(CityError::UnknownDeviceType(other.to_string())),
        }
    }
}

/// A device with a fixed name and status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub name: &'static str,
    pub status: &'static str,
}

/// Produces devices of one kind.
pub trait DeviceFactory {
    fn kind(&self) -> DeviceKind;
    fn create_device(&self) -> DeviceDescriptor;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LightingFactory;

impl DeviceFactory for LightingFactory {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Lighting
    }

    fn create_device(&self) -> DeviceDescriptor {
        DeviceDescriptor {
            name: "Smart Lamp",
            status: "ON – 90% brightness",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransportFactory;

impl DeviceFactory for TransportFactory {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Transport
    }

    fn create_device(&self) -> DeviceDescriptor {
        DeviceDescriptor {
            name: "Smart Traffic Light",
            status: "GREEN – traffic allowed",
        }
    }
}

/// Select the factory for `key`.
pub fn get_factory(key: &str) -> Result<Box<dyn DeviceFactory>> {
    Ok(match key.parse::<DeviceKind>()? {
        DeviceKind::Lighting => Box::new(LightingFactory),
        DeviceKind::Transport => Box::new(TransportFactory),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighting_factory_is_stable() {
        let built = get_factory("lighting")
            .map(|factory| (factory.kind(), factory.create_device(), factory.create_device()));
        let Ok((kind, first, second)) = built else {
            unreachable!("lighting is a known key");
        };

        assert_eq!(kind, DeviceKind::Lighting);
        assert_eq!(first, second);
        assert_eq!(first.name, "Smart Lamp");
        assert_eq!(first.status, "ON – 90% brightness");
    }

    #[test]
    fn transport_factory_is_stable() {
        let device = get_factory("transport").map(|f| f.create_device());
        assert_eq!(
            device,
            Ok(DeviceDescriptor {
                name: "Smart Traffic Light",
                status: "GREEN – traffic allowed",
            })
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        for key in ["heating", "Lighting", "", " transport"] {
            assert!(matches!(
                get_factory(key),
                Err(CityError::UnknownDeviceType(k)) if k == key
            ));
        }
    }

    #[test]
    fn every_listed_kind_has_a_factory() {
        for kind in DeviceKind::ALL {
            assert!(get_factory(kind.as_str()).is_ok_and(|f| f.kind() == kind));
        }
        assert_eq!(DeviceKind::expected(), "lighting / transport");
    }
}
