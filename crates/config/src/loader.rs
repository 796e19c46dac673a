use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use {
    directories::ProjectDirs,
    peerlink_pairing::AppMetadata,
    serde_json::Value,
    tracing::{debug, info},
};

use crate::{
    error::{Error, Result},
    format::MetadataFormat,
};

/// Environment variable that overrides the metadata file location.
pub const METADATA_PATH_ENV: &str = "PEERLINK_METADATA";

/// Default file name inside the platform config directory.
pub const DEFAULT_FILE_NAME: &str = "metadata.toml";

/// Table the record may be nested under instead of sitting at the root.
const METADATA_TABLE: &str = "metadata";

/// Keys whose presence marks the document root as the record.
const RECORD_KEYS: &[&str] = &["name", "url"];

/// Resolve where the local app metadata lives.
///
/// `PEERLINK_METADATA` wins when set and non-empty; otherwise
/// `<config dir>/peerlink/metadata.toml`.
pub fn config_path() -> Result<PathBuf> {
    resolve_config_path(std::env::var_os(METADATA_PATH_ENV))
}

fn resolve_config_path(env_override: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let dirs = ProjectDirs::from("org", "peerlink", "peerlink").ok_or(Error::NoConfigDir)?;
    Ok(dirs.config_dir().join(DEFAULT_FILE_NAME))
}

/// Parse a metadata record from text in the given format.
///
/// The record may be the whole document or a `metadata` table within it.
pub fn parse_metadata(text: &str, format: MetadataFormat) -> Result<AppMetadata> {
    let document = format.parse(text)?;
    Ok(AppMetadata::decode(locate_record(&document))?)
}

/// A root that carries record keys is the record itself, even when it also
/// has an unrelated `metadata` entry.
fn locate_record(document: &Value) -> &Value {
    let is_record = RECORD_KEYS.iter().any(|key| document.get(key).is_some());
    match document.get(METADATA_TABLE) {
        Some(table) if table.is_object() && !is_record => table,
        _ => document,
    }
}

/// Load the local app metadata from a file.
pub fn load_metadata(path: &Path) -> Result<AppMetadata> {
    let format = MetadataFormat::from_path(path)?;
    debug!(path = %path.display(), %format, "reading app metadata");
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = parse_metadata(&text, format)?;
    info!(
        path = %path.display(),
        name = metadata.name(),
        url = metadata.url(),
        "loaded app metadata"
    );
    Ok(metadata)
}
