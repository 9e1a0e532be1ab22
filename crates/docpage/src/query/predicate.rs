//! Module: query::predicate
//! Responsibility: filter predicate AST, builder constructors, and
//! evaluation over the row seam.
//! Does not own: pagination, pipeline assembly, or source execution.

use crate::{
    document::{FieldPresence, Row},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
}

///
/// Predicate
///
/// Composable boolean expression over document fields. A transient value:
/// built per call, never persisted, no lifecycle beyond one query.
///
/// `And([])` is true and `Or([])` is false, so empty groups compose
/// neutrally under further AND/OR nesting.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Predicate {
    /// Always true.
    True,
    /// Always false.
    False,

    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),

    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },

    /// Field is present, regardless of its value.
    Exists {
        field: String,
    },

    /// Case-insensitive substring match on a text field.
    TextContainsCi {
        field: String,
        value: Value,
    },
}

impl Predicate {
    // ─────────────────────────────────────────────────────────────
    // Boolean
    // ─────────────────────────────────────────────────────────────

    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    // ─────────────────────────────────────────────────────────────
    // Scalar comparisons
    // ─────────────────────────────────────────────────────────────

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Ne, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Lte, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        compare(field, CompareOp::Gte, value)
    }

    pub fn in_list(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Value>>,
    ) -> Self {
        Self::Compare {
            field: field.into(),
            op: CompareOp::In,
            value: Value::List(values.into_iter().map(Into::into).collect()),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Presence / text
    // ─────────────────────────────────────────────────────────────

    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists {
            field: field.into(),
        }
    }

    pub fn text_contains_ci(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::TextContainsCi {
            field: field.into(),
            value: value.into(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Evaluation
    // ─────────────────────────────────────────────────────────────

    /// Evaluate this predicate against one row.
    ///
    /// Missing fields fail every comparison; `Ne` requires an orderable
    /// pair that compares unequal, it is not "anything but equal".
    pub fn matches<R: Row>(&self, row: &R) -> bool {
        match self {
            Self::True => true,
            Self::False => false,

            Self::And(preds) => preds.iter().all(|pred| pred.matches(row)),
            Self::Or(preds) => preds.iter().any(|pred| pred.matches(row)),
            Self::Not(pred) => !pred.matches(row),

            Self::Compare { field, op, value } => match row.field(field) {
                FieldPresence::Present(actual) => compare_matches(&actual, *op, value),
                FieldPresence::Missing => false,
            },

            Self::Exists { field } => matches!(row.field(field), FieldPresence::Present(_)),

            Self::TextContainsCi { field, value } => match (row.field(field), value.as_text()) {
                (FieldPresence::Present(actual), Some(needle)) => actual
                    .as_text()
                    .is_some_and(|hay| hay.to_lowercase().contains(&needle.to_lowercase())),
                _ => false,
            },
        }
    }
}

fn compare_matches(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    if op == CompareOp::In {
        return match expected {
            Value::List(candidates) => candidates.iter().any(|candidate| actual.equals(candidate)),
            _ => false,
        };
    }

    let Some(ordering) = actual.compare(expected) else {
        return false;
    };

    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Ne => ordering != Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
        CompareOp::In => unreachable!("handled above"),
    }
}

fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Predicate {
    Predicate::Compare {
        field: field.into(),
        op,
        value: value.into(),
    }
}

///
/// TESTS
///
