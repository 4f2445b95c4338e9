//! Canopy Core - Domain models, ports, and configuration
//!
//! This crate contains the domain types and port definitions shared by the
//! analysis controller, the HTTP backend client, and the CLI front end.

pub mod config;
pub mod error;
pub mod metric;
pub mod models;
pub mod ports;

pub use error::{CanopyError, Result};
