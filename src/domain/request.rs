//! Four-state result wrapper for observed remote data
//!
//! Distinguishes not-yet-requested, in-flight, present and failed without
//! using exceptions for expected conditions. Matched exhaustively wherever
//! it is consumed.

/// State of a remote request or subscription
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    /// Never requested
    Idle,
    /// Requested, no data yet
    Loading,
    /// Data present (possibly empty)
    Success(T),
    /// The request or subscription failed
    Error(String),
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestState::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RequestState::Error(_))
    }

    /// The success value, if any
    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }
}
