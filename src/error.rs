use crate::validation::ValidationError;

/// Failure of a request chain.
///
/// A request either breaks a structural rule and never leaves the process, or
/// the transport fails and its error is handed back untouched.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error<E> {
    /// The request was rejected before being sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The transport failed.
    #[error("transport failure: {0}")]
    Transport(E),
}

impl<E> Error<E> {
    /// The validation failure, if the request was rejected before being sent.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            Self::Transport(_) => None,
        }
    }

    /// The transport error, if the request was sent and failed.
    pub fn into_transport(self) -> Option<E> {
        match self {
            Self::Validation(_) => None,
            Self::Transport(error) => Some(error),
        }
    }
}
