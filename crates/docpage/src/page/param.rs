use crate::error::PageError;
use serde::{Deserialize, Serialize};

///
/// PageParam
///
/// Loosely-typed page index as it arrives from the transport layer, where
/// query-string values are text and JSON bodies carry numbers. Resolution
/// is where the engine's fail-fast validation happens: anything that is
/// not a non-negative integer is an `InvalidPage` error, never a clamp.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageParam {
    Number(i64),
    Text(String),
}

impl PageParam {
    /// Resolve to a zero-based page index, rejecting negative numbers and
    /// non-numeric text.
    pub fn resolve(&self) -> Result<u64, PageError> {
        match self {
            Self::Number(n) => u64::try_from(*n).map_err(|_| PageError::InvalidPage {
                got: n.to_string(),
            }),
            Self::Text(s) => s.trim().parse::<u64>().map_err(|_| PageError::InvalidPage {
                got: s.clone(),
            }),
        }
    }
}

impl From<i64> for PageParam {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for PageParam {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for PageParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

///
/// TESTS
///
