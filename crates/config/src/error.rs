use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unsupported metadata file format: {0}")]
    UnsupportedFormat(String),

    #[error("no config directory available on this platform")]
    NoConfigDir,

    #[error(transparent)]
    Metadata(#[from] peerlink_pairing::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
