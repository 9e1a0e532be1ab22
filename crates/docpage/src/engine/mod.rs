//! Module: engine
//! Responsibility: the two pagination entry points and their request
//! options.
//! Boundary: stateless and reentrant; each call borrows a source, issues
//! its reads, and holds nothing afterwards. No retry, no timeout, no
//! cross-call coordination.

mod aggregate;
mod find;

#[cfg(test)]
mod tests;

pub use aggregate::{AggregateOptions, DEFAULT_AGGREGATE_PAGE_SIZE, paged_aggregate};
pub use find::{DEFAULT_FIND_PAGE_SIZE, FindOptions, paged_find};
