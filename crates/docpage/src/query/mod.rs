pub mod predicate;
pub mod project;
pub mod search;
pub mod sort;
pub mod stage;

pub use predicate::{CompareOp, Predicate};
pub use project::Projection;
pub use search::{FilterBuilder, text_search};
pub use sort::{OrderDirection, SortExpr};
pub use stage::{GeoNearSpec, Stage, assemble_pipeline};
