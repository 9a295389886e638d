use thiserror::Error;

/// Search cycle tag, carried through the engine untouched.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The fetch for `generation` settled; `document` may be fallback text.
    InsightsReady {
        generation: Generation,
        document: String,
    },
}

/// Raw HTTP response of one insight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub status: u16,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("timeout")]
    Timeout,
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("malformed response body")]
    Decode,
    #[error("network error")]
    Network,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}
