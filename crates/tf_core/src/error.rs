use thiserror::Error;

use crate::models::Side;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Roster incomplete for {side} side: {reason}")]
    RosterIncomplete { side: Side, reason: String },

    #[error("Invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MatchError {
    pub(crate) fn roster(side: Side, reason: impl Into<String>) -> Self {
        MatchError::RosterIncomplete { side, reason: reason.into() }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        MatchError::InvalidConfig { field, reason: reason.into() }
    }

    /// Every variant stems from caller input; none is worth retrying as-is.
    pub fn is_input_error(&self) -> bool {
        match self {
            MatchError::RosterIncomplete { .. }
            | MatchError::InvalidConfig { .. }
            | MatchError::InvalidRequest(_) => true,
            MatchError::Serialization(_) => false,
        }
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            MatchError::InvalidRequest(err.to_string())
        } else {
            MatchError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
