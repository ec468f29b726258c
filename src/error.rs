use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Remote error: HTTP {status} for {path}")]
    Remote { status: u16, path: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Player {account_id} did not play in match {match_id}")]
    PlayerNotInMatch { account_id: u64, match_id: u64 },

    #[error("Cannot average an empty window of matches")]
    DivisionUndefined,

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lookup store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
