//! Module: source::memory
//! Responsibility: reference interpreter for both source seams over named
//! in-memory collections.
//! Boundary: test tooling and small deployments; not a storage engine.

use crate::{
    document::Document,
    query::{
        predicate::Predicate,
        sort::SortExpr,
        stage::{GeoNearSpec, Stage},
    },
    source::{ExpandSpec, FanOut, FanOutWindow, FindQuery, FindSource, PipelineSource},
    value::Value,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// MemoryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum MemoryError {
    /// An expansion referenced a collection this source does not hold.
    #[error("unknown collection: {name}")]
    UnknownCollection { name: String },
}

///
/// MemorySource
///
/// Named `Document` collections with one primary collection queries run
/// against. Expansion resolves references into sibling collections by
/// their `id` field.
///

#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    primary: Vec<Document>,
    collections: BTreeMap<String, Vec<Document>>,
}

impl MemorySource {
    #[must_use]
    pub fn new(primary: Vec<Document>) -> Self {
        Self {
            primary,
            collections: BTreeMap::new(),
        }
    }

    /// Register a sibling collection as an expansion target.
    #[must_use]
    pub fn with_collection(mut self, name: impl Into<String>, docs: Vec<Document>) -> Self {
        self.collections.insert(name.into(), docs);
        self
    }

    fn matching(&self, filter: &Predicate) -> Vec<Document> {
        self.primary
            .iter()
            .filter(|doc| filter.matches(*doc))
            .cloned()
            .collect()
    }

    fn expand(&self, docs: &mut [Document], spec: &ExpandSpec) -> Result<(), MemoryError> {
        let targets =
            self.collections
                .get(&spec.from)
                .ok_or_else(|| MemoryError::UnknownCollection {
                    name: spec.from.clone(),
                })?;

        for doc in docs {
            let Some(reference) = doc.get(&spec.field).cloned() else {
                continue;
            };

            let resolved = targets
                .iter()
                .find(|target| target.get("id").is_some_and(|id| id.equals(&reference)));

            // Dangling references stay as-is; expansion is best-effort.
            if let Some(target) = resolved {
                doc.insert(
                    spec.field.clone(),
                    Value::Map(
                        target
                            .iter()
                            .map(|(name, value)| (name.to_string(), value.clone()))
                            .collect(),
                    ),
                );
            }
        }

        Ok(())
    }
}

fn sort_docs(docs: &mut [Document], sort: &SortExpr) {
    docs.sort_by(|a, b| sort.compare_rows(a, b));
}

fn window(docs: Vec<Document>, skip: u64, limit: u64) -> Vec<Document> {
    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);

    docs.into_iter().skip(skip).take(limit).collect()
}

fn geo_near(docs: Vec<Document>, spec: &GeoNearSpec) -> Vec<Document> {
    let mut measured: Vec<(f64, Document)> = docs
        .into_iter()
        .filter_map(|mut doc| {
            let distance = point_of(doc.get(&spec.key)?).map(|point| planar_distance(point, spec.near))?;

            if spec.max_distance.is_some_and(|max| distance > max) {
                return None;
            }

            doc.insert(spec.distance_field.clone(), Value::Float(distance));
            Some((distance, doc))
        })
        .collect();

    measured.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    measured.into_iter().map(|(_, doc)| doc).collect()
}

// Coordinates are a two-element numeric list.
fn point_of(value: &Value) -> Option<[f64; 2]> {
    let Value::List(parts) = value else {
        return None;
    };

    match parts.as_slice() {
        [x, y] => Some([numeric(x)?, numeric(y)?]),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Float(n) => Some(*n),
        Value::Int(n) => Some(*n as f64),
        Value::Uint(n) => Some(*n as f64),
        _ => None,
    }
}

fn planar_distance(point: [f64; 2], reference: [f64; 2]) -> f64 {
    let dx = point[0] - reference[0];
    let dy = point[1] - reference[1];

    dx.hypot(dy)
}

impl FindSource for MemorySource {
    type Item = Document;
    type Error = MemoryError;

    fn count(&self, filter: &Predicate) -> Result<u64, Self::Error> {
        Ok(self.matching(filter).len() as u64)
    }

    fn find(&self, query: &FindQuery) -> Result<Vec<Self::Item>, Self::Error> {
        let mut docs = self.matching(&query.filter);

        if let Some(sort) = &query.sort {
            sort_docs(&mut docs, sort);
        }

        let mut docs = window(docs, query.skip, query.limit);

        if let Some(expand) = &query.expand {
            self.expand(&mut docs, expand)?;
        }

        Ok(docs
            .iter()
            .map(|doc| query.project.apply(doc))
            .collect())
    }
}

impl PipelineSource for MemorySource {
    type Item = Document;
    type Error = MemoryError;

    fn fan_out(
        &self,
        pipeline: &[Stage],
        window_spec: FanOutWindow,
    ) -> Result<FanOut<Self::Item>, Self::Error> {
        let mut docs = self.primary.clone();

        for stage in pipeline {
            docs = match stage {
                Stage::Match(filter) => {
                    docs.into_iter().filter(|doc| filter.matches(doc)).collect()
                }
                Stage::Sort(sort) => {
                    sort_docs(&mut docs, sort);
                    docs
                }
                Stage::Skip(n) => window(docs, *n, u64::MAX),
                Stage::Limit(n) => window(docs, 0, *n),
                Stage::Project(projection) => {
                    docs.iter().map(|doc| projection.apply(doc)).collect()
                }
                Stage::GeoNear(spec) => geo_near(docs, spec),
            };
        }

        // Both branches read the same pipeline output: one pass. An empty
        // matched set yields no count row at all.
        let total = if docs.is_empty() {
            None
        } else {
            Some(docs.len() as u64)
        };
        let rows = window(docs, window_spec.skip, window_spec.limit);

        Ok(FanOut { rows, total })
    }
}

///
/// TESTS
///
