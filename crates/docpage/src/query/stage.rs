//! Module: query::stage
//! Responsibility: pipeline stage vocabulary and stage-list assembly for
//! the aggregation path.
//! Does not own: stage execution; sources interpret the assembled list.

use crate::query::{predicate::Predicate, project::Projection, sort::SortExpr};
use serde::{Deserialize, Serialize};

///
/// GeoNearSpec
///
/// Geo-proximity stage: order documents by distance from a reference
/// point, optionally cut at a maximum distance, and inject the computed
/// distance into each row. Underlying engines require this to be the
/// first stage of any pipeline.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GeoNearSpec {
    /// Reference point, `[x, y]` in the coordinate system of `key`.
    pub near: [f64; 2],
    /// Field holding each document's coordinates.
    pub key: String,
    /// Field the computed distance is written to.
    pub distance_field: String,
    /// Rows farther than this are dropped.
    pub max_distance: Option<f64>,
}

///
/// Stage
///
/// One step of a staged pipeline. Sources execute stages in list order;
/// assembly (below) owns the ordering rules.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Stage {
    Match(Predicate),
    Sort(SortExpr),
    Skip(u64),
    Limit(u64),
    Project(Projection),
    GeoNear(GeoNearSpec),
}

/// Assemble the full stage list for one aggregation pass.
///
/// A sort spec, when given, is appended to the additional stages. Order is
/// `[pre_match..., additionals...]`, except that a leading `GeoNear` among
/// the additionals is hoisted to the very front of the pipeline, ahead of
/// the pre-match stages. Geo stages must lead; the reorder is a
/// correctness requirement, not a convenience.
#[must_use]
pub fn assemble_pipeline(
    pre_match: Vec<Stage>,
    mut additionals: Vec<Stage>,
    sort: Option<SortExpr>,
) -> Vec<Stage> {
    if let Some(sort) = sort {
        additionals.push(Stage::Sort(sort));
    }

    let mut pipeline = Vec::with_capacity(pre_match.len() + additionals.len());

    if matches!(additionals.first(), Some(Stage::GeoNear(_))) {
        pipeline.push(additionals.remove(0));
    }

    pipeline.extend(pre_match);
    pipeline.extend(additionals);
    pipeline
}

///
/// TESTS
///
