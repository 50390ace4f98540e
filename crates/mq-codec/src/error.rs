use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// Malformed header, dictionary line, or missing separator.
    #[error("Parse error: {0}")]
    Parse(String),
    /// Bad hex, failed inflate, unknown code, or a size/round-trip mismatch.
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Invalid token table: {0}")]
    InvalidTable(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CodecError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
