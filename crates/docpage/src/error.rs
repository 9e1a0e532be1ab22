use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// PageError
///
/// Synchronous request-validation failures. Both variants are raised
/// before any query executes, so a rejected request costs no source work.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[remain::sorted]
pub enum PageError {
    /// Page size supplied but not strictly positive (aggregate path only;
    /// the find path makes invalid sizes unrepresentable).
    #[error("invalid page size: {got}")]
    InvalidItems { got: i64 },

    /// Page index supplied but not a valid non-negative integer.
    #[error("invalid page index: {got}")]
    InvalidPage { got: String },
}

///
/// EngineError
///
/// Engine call outcome taxonomy: either this layer rejected the request, or
/// the underlying source failed. Source failures are surfaced as-is; this
/// layer never masks or reinterprets infrastructure-level query errors.
///

#[derive(Debug, PartialEq, ThisError)]
pub enum EngineError<E> {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error("{0}")]
    Source(E),
}

impl<E> EngineError<E> {
    /// True when the failure is a pre-query validation rejection.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}
