//! Loads the local app's pairing metadata once at startup.
//!
//! Supported file formats: TOML, YAML and JSON, chosen by extension.

pub mod error;
pub mod format;
pub mod loader;

pub use {
    error::{Error, Result},
    format::MetadataFormat,
    loader::{config_path, load_metadata, parse_metadata},
};
