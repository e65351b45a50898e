//! # SmartCity Library
//!
//! This library exposes the SmartCity app modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod menu;

// Re-export smartcity_core for convenience
pub use smartcity_core;
