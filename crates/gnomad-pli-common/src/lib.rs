//! gnomad-pli-common — Shared error and configuration types used across the gnomad-pli crates.

pub mod config;
pub mod error;

pub use config::{OutputFormat, PliConfig};
pub use error::{PliError, Result};
