use crate::document::{FieldPresence, Row};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

///
/// SortExpr
///
/// Multi-key sort specification, applied left to right.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SortExpr {
    pub fields: Vec<(String, OrderDirection)>,
}

impl SortExpr {
    /// Single-key sort.
    pub fn by(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            fields: vec![(field.into(), direction)],
        }
    }

    /// Append a lower-priority sort key.
    #[must_use]
    pub fn then(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.fields.push((field.into(), direction));
        self
    }

    /// Compare two rows under this sort.
    ///
    /// Missing fields order before present ones ascending; incomparable
    /// value pairs tie and fall through to the next key. Deterministic for
    /// any fixed pair of rows.
    pub fn compare_rows<R: Row>(&self, a: &R, b: &R) -> Ordering {
        for (field, direction) in &self.fields {
            let ordering = match (a.field(field), b.field(field)) {
                (FieldPresence::Missing, FieldPresence::Missing) => Ordering::Equal,
                (FieldPresence::Missing, FieldPresence::Present(_)) => Ordering::Less,
                (FieldPresence::Present(_), FieldPresence::Missing) => Ordering::Greater,
                (FieldPresence::Present(x), FieldPresence::Present(y)) => {
                    x.compare(&y).unwrap_or(Ordering::Equal)
                }
            };

            let ordering = match direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            };

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

///
/// TESTS
///
