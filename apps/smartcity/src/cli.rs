//! # CLI Module
//!
//! Command-line surface of the SmartCity binary.
//!
//! Commands:
//! - `menu` (default): interactive control panel on stdin/stdout
//! - `street`: build and print a street descriptor
//! - `device`: print the device produced by a factory
//!
//! The `cmd_*` functions write to any `Write` so tests can capture output.

use crate::menu::ControlPanel;
use clap::{Parser, Subcommand};
use serde::Serialize;
use smartcity_core::{
    CityError, DeviceDescriptor, DeviceKind, GUEST_ROLE, RegistryCell, Role, SmartStreetBuilder,
    get_factory,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Counts used for the main street shown in the menu.
pub const MAIN_STREET_LAMPS: u32 = 42;
pub const MAIN_STREET_CAMERAS: u32 = 15;
pub const MAIN_STREET_SOLAR_PANELS: u32 = 28;

// =============================================================================
// ERRORS
// =============================================================================

/// Failures that end a CLI invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    City(#[from] CityError),
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "smartcity")]
#[command(version, about = "SmartCity control panel", long_about = None)]
pub struct Cli {
    /// Role the energy subsystem is guarded with at startup
    #[arg(long, global = true, default_value = GUEST_ROLE)]
    pub role: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the interactive control panel (default)
    Menu,

    /// Build a smart street and print its summary
    Street {
        /// Number of lamps (non-numeric input counts as 0)
        #[arg(long, default_value = "42")]
        lamps: String,

        /// Number of cameras (non-numeric input counts as 0)
        #[arg(long, default_value = "15")]
        cameras: String,

        /// Number of solar panels (non-numeric input counts as 0)
        #[arg(long, default_value = "28")]
        solar_panels: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the device produced by a factory (lighting, transport)
    Device {
        /// Factory type key
        kind: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

// =============================================================================
// SETUP
// =============================================================================

/// Install the stderr fmt subscriber. `RUST_LOG` wins over `default_level`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}

/// Dispatch a parsed command line against the real terminal.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            cmd_menu(&Role::new(cli.role), stdin.lock(), &mut out)
        }
        Commands::Street {
            lamps,
            cameras,
            solar_panels,
            json,
        } => cmd_street(&lamps, &cameras, &solar_panels, json, &mut out),
        Commands::Device { kind, json } => cmd_device(&kind, json, &mut out),
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Run the interactive menu until `0` or end of input.
pub fn cmd_menu<R: BufRead, W: Write>(role: &Role, input: R, out: &mut W) -> Result<(), CliError> {
    let cell = RegistryCell::new();
    let mut panel = ControlPanel::new(&cell, role.clone());
    panel.run(input, out)
}

/// Build a street from raw (possibly non-numeric) counts and print it.
pub fn cmd_street<W: Write>(
    lamps: &str,
    cameras: &str,
    solar_panels: &str,
    json: bool,
    out: &mut W,
) -> Result<(), CliError> {
    let street = SmartStreetBuilder::new()
        .add_lamps(lamps)
        .add_cameras(cameras)
        .add_solar_panels(solar_panels)
        .build();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&street)?)?;
    } else {
        writeln!(out, "{}", street.info())?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DeviceOutput<'a> {
    kind: DeviceKind,
    #[serde(flatten)]
    device: &'a DeviceDescriptor,
}

/// Print the device built by the factory for `kind`.
///
/// An unknown kind is returned as `CliError::City(UnknownDeviceType)`.
pub fn cmd_device<W: Write>(kind: &str, json: bool, out: &mut W) -> Result<(), CliError> {
    let factory = get_factory(kind)?;
    let device = factory.create_device();

    if json {
        let output = DeviceOutput {
            kind: factory.kind(),
            device: &device,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "{}: {}", device.name, device.status)?;
    }
    Ok(())
}
