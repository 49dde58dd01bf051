use thiserror::Error;

// Error handling for the monitor, the LCU client and scoring

#[derive(Debug, Error)]
pub enum ProphetError {
    /// Cannot authenticate or connect to the local client. Fatal to the current monitor cycle.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A summoner identity could not be resolved.
    #[error("Lookup error: {0}")]
    Lookup(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Event stream error: {0}")]
    Stream(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProphetError {
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}

impl From<reqwest::Error> for ProphetError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

impl From<serde_json::Error> for ProphetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ProphetError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Stream(err.to_string())
    }
}

/// Failure of an on-demand lookup, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("could not find that player")]
    NotFound,
    #[error("system error")]
    System,
}

impl From<ProphetError> for QueryError {
    fn from(err: ProphetError) -> Self {
        if err.is_lookup() {
            Self::NotFound
        } else {
            Self::System
        }
    }
}
