//! Module: source
//! Responsibility: the engine's call contract with its data sources.
//! Does not own: pagination semantics; the engine composes these
//! primitives into pages.

pub mod memory;

pub use memory::{MemoryError, MemorySource};

use crate::query::{predicate::Predicate, project::Projection, sort::SortExpr, stage::Stage};

///
/// ExpandSpec
///
/// Related-entity expansion: replace the reference held in `field` with
/// the referenced document from collection `from` (matched by its `id`
/// field).
///

#[derive(Clone, Debug, PartialEq)]
pub struct ExpandSpec {
    pub field: String,
    pub from: String,
}

impl ExpandSpec {
    pub fn new(field: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            from: from.into(),
        }
    }
}

///
/// FindQuery
///
/// One windowed find: filter, projection, optional sort and expansion,
/// and the skip/limit window. The engine always asks for one row beyond
/// the page size; sources must honor `limit` exactly.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FindQuery {
    pub filter: Predicate,
    pub project: Projection,
    pub sort: Option<SortExpr>,
    pub skip: u64,
    pub limit: u64,
    pub expand: Option<ExpandSpec>,
}

///
/// FindSource
///
/// Direct-query capability: count matching documents, and fetch a
/// filtered, sorted, projected window of them.
///

pub trait FindSource {
    type Item;
    type Error;

    fn count(&self, filter: &Predicate) -> Result<u64, Self::Error>;

    fn find(&self, query: &FindQuery) -> Result<Vec<Self::Item>, Self::Error>;
}

///
/// FanOutWindow
///
/// The skip/limit window of the fan-out's data branch.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FanOutWindow {
    pub skip: u64,
    pub limit: u64,
}

///
/// FanOut
///
/// Result of one fan-out pass: the windowed page rows and the total
/// matched count, computed from the same filtered set in a single pass.
/// `total` is `None` when the count branch saw no rows; callers treat
/// that as zero.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FanOut<T> {
    pub rows: Vec<T>,
    pub total: Option<u64>,
}

///
/// PipelineSource
///
/// Staged-pipeline capability. `fan_out` executes the pipeline exactly
/// once, then computes both branches (windowed rows, total count) over
/// the pipeline's output. One pass; no second round trip.
///

pub trait PipelineSource {
    type Item;
    type Error;

    fn fan_out(
        &self,
        pipeline: &[Stage],
        window: FanOutWindow,
    ) -> Result<FanOut<Self::Item>, Self::Error>;
}
