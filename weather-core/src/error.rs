use thiserror::Error;

/// Why a fetch cycle was aborted.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("could not reach the weather service: {0}")]
    Transport(String),

    /// The service answered with a non-success status or an error payload.
    #[error("weather service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The body did not match the expected JSON shape.
    #[error("unexpected response from the weather service: {0}")]
    Malformed(String),

    #[error(
        "requested {requested} forecast day(s) but received {received}; \
         the API plan may cap forecasts, try --days {received}"
    )]
    DayCountMismatch { requested: u8, received: usize },

    #[error("invalid location: {0}")]
    InvalidQuery(String),
}

/// Coarse classification used for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Upstream,
    Input,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Transport(_) => FailureKind::Transport,
            FetchError::Upstream { .. }
            | FetchError::Malformed(_)
            | FetchError::DayCountMismatch { .. } => FailureKind::Upstream,
            FetchError::InvalidQuery(_) => FailureKind::Input,
        }
    }
}
