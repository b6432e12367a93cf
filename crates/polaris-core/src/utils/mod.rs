//! Helpers for turning command-line arguments into API values.

pub mod args;

// Re-export commonly used functions at module level
pub use args::{format_namespace, mask_token, namespace_path, parse_namespace, parse_properties};
