//! Docpage: a stateless paginated query engine for document collections.
//!
//! Two entry points: [`engine::paged_find`] runs a filtered, sorted,
//! projected window query against a [`source::FindSource`];
//! [`engine::paged_aggregate`] runs a staged pipeline against a
//! [`source::PipelineSource`], fanning page rows and total count out of a
//! single pass. Both return a [`page::Page`] built with the lookahead
//! technique: fetch one row beyond the page size, use it only to decide
//! whether a next page exists.
//!
//! The engine holds no state between calls; every request is independent.

pub mod document;
pub mod engine;
pub mod error;
pub mod page;
pub mod query;
pub mod source;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No sources, helpers, or internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        document::{Document, FieldPresence, Row},
        engine::{AggregateOptions, FindOptions, paged_aggregate, paged_find},
        error::{EngineError, PageError},
        page::{Page, PageParam},
        query::{OrderDirection, Predicate, Projection, SortExpr, Stage},
        value::Value,
    };
}
