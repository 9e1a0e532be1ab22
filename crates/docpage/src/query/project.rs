use crate::document::Document;
use serde::{Deserialize, Serialize};

/// Fields the default projection withholds from query output.
pub const SENSITIVE_FIELDS: [&str; 2] = ["password", "security"];

///
/// Projection
///
/// Field projection applied to each returned row.
///
/// The engine default is `Projection::default_sensitive()`, which excludes
/// credential material. That is a safety default, not a hard rule: a caller
/// supplying its own projection opts out and owns the exposure risk.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Projection {
    /// Keep only the named fields.
    Include(Vec<String>),
    /// Keep everything except the named fields.
    Exclude(Vec<String>),
}

impl Projection {
    /// The engine's default: exclude the sensitive credential block.
    #[must_use]
    pub fn default_sensitive() -> Self {
        Self::Exclude(SENSITIVE_FIELDS.iter().map(ToString::to_string).collect())
    }

    pub fn include(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Include(fields.into_iter().map(Into::into).collect())
    }

    pub fn exclude(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Exclude(fields.into_iter().map(Into::into).collect())
    }

    /// Apply this projection to one document.
    #[must_use]
    pub fn apply(&self, doc: &Document) -> Document {
        match self {
            Self::Include(fields) => doc
                .iter()
                .filter(|(name, _)| fields.iter().any(|keep| keep == name))
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            Self::Exclude(fields) => doc
                .iter()
                .filter(|(name, _)| !fields.iter().any(|drop| drop == name))
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }
}

///
/// TESTS
///
