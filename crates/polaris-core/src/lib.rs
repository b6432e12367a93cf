//! Core library for the Apache Polaris CLI.
//!
//! Holds everything that is not argument parsing or printing: the config and
//! credentials files, the OAuth token lifecycle, and typed clients for the
//! Polaris management and Iceberg REST catalog APIs.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
