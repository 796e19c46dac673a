use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Link mode was requested but no universal link was supplied.
    #[error("link mode requires a universal link")]
    InvalidLinkModeUniversalLink,

    /// A decoded record is missing a required field or has a field of the wrong shape.
    #[error("malformed {record} record: {source}")]
    MalformedRecord {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    #[must_use]
    pub fn malformed(record: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedRecord { record, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
