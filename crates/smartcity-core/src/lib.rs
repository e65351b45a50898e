//! # SmartCity Core
//!
//! The composition core of the SmartCity control panel.
//!
//! This crate contains:
//! - `Registry`: the single coordinator that dispatches facade commands
//!   to named subsystems
//! - `AccessGuard`: a role-checking wrapper in front of a subsystem
//! - `SmartStreetBuilder`: staged construction of a `StreetDescriptor`
//! - Device factories selected by type key
//! - `Logged`: a started/finished notice decorator for operations
//!
//! No terminal I/O happens here. Subsystems report what they did through
//! returned messages and `tracing` events; printing is the app's job.

#![forbid(unsafe_code)]

pub mod device;
pub mod error;
pub mod guard;
pub mod logging;
pub mod registry;
pub mod street;
pub mod subsystems;

pub use device::{
    DeviceDescriptor, DeviceFactory, DeviceKind, LightingFactory, TransportFactory, get_factory,
};
pub use error::{CityError, Result};
pub use guard::{ADMIN_ROLE, AccessGuard, GUEST_ROLE, Role};
pub use logging::{Logged, NoticeSink, TracingNotices, with_logging};
pub use registry::{ENERGY_NOT_CONNECTED, Registry, RegistryCell, RegistryHandle};
pub use street::{SmartStreetBuilder, StreetCount, StreetDescriptor};
pub use subsystems::{
    EnergyHandle, EnergyMode, EnergySystem, LightingSystem, Operation, Subsystem, SubsystemKind,
    TransportSystem,
};
