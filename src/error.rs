use thiserror::Error;

/// A dispatched command or poll that did not come back with a success status.
///
/// These are never shown to the user; the next poll tick is the recovery path.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server answered with status {0}")]
    Status(u16),
}

/// Layout inputs the page supplied are unusable for this pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout input `{0}` is missing from the page")]
    MissingInput(&'static str),
    #[error("layout input `{field}` is not a whole number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("column count must be at least 1")]
    ZeroColumns,
    #[error("viewport has no width yet")]
    ZeroWidth,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("browser storage unavailable: {0}")]
    Storage(String),
}
