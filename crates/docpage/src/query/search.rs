//! Module: query::search
//! Responsibility: search-term hardening and the caller-side filter
//! composition convention (base predicate AND flags AND text-search group).
//! Does not own: predicate evaluation or query execution.

use crate::{query::predicate::Predicate, value::Value};

/// Raw search input is truncated to this many characters before
/// tokenization.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// At most this many distinct tokens become predicates. Caps predicate
/// expansion on adversarial input.
pub const MAX_SEARCH_TOKENS: usize = 5;

// Characters with markup significance; removed rather than escaped so that
// no entity text leaks into substring matches.
const MARKUP_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Build a case-insensitive OR search group from raw user input.
///
/// Neutralizes markup, truncates to [`MAX_SEARCH_LENGTH`], splits on
/// whitespace, de-duplicates tokens preserving first-seen order, caps at
/// [`MAX_SEARCH_TOKENS`], and emits one substring predicate per
/// (token, field) pair. Returns `None` when no token survives.
#[must_use]
pub fn text_search(raw: &str, fields: &[&str]) -> Option<Predicate> {
    let neutralized: String = raw
        .chars()
        .filter(|c| !MARKUP_CHARS.contains(c))
        .take(MAX_SEARCH_LENGTH)
        .collect();

    let mut tokens: Vec<&str> = Vec::new();
    for token in neutralized.split_whitespace() {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens.truncate(MAX_SEARCH_TOKENS);

    if tokens.is_empty() || fields.is_empty() {
        return None;
    }

    let mut group = Vec::with_capacity(tokens.len() * fields.len());
    for token in &tokens {
        for field in fields {
            group.push(Predicate::text_contains_ci(*field, *token));
        }
    }

    Some(Predicate::Or(group))
}

///
/// FilterBuilder
///
/// Caller-side composition convention: a mandatory base predicate,
/// AND-composed optional exact-match flags, and an optional OR-grouped
/// text search. Produces the single top-level AND group the engine
/// expects, so later composition cannot clobber the base filter.
///

#[derive(Clone, Debug)]
pub struct FilterBuilder {
    clauses: Vec<Predicate>,
}

impl FilterBuilder {
    /// Start from the mandatory base predicate (e.g. a role restriction).
    #[must_use]
    pub fn new(base: Predicate) -> Self {
        Self {
            clauses: vec![base],
        }
    }

    /// AND in an exact-match clause when the flag value is present.
    #[must_use]
    pub fn flag(mut self, field: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        if let Some(value) = value {
            self.clauses.push(Predicate::eq(field, value));
        }
        self
    }

    /// AND in a hardened text-search group when the input yields tokens.
    #[must_use]
    pub fn search(mut self, raw: Option<&str>, fields: &[&str]) -> Self {
        if let Some(group) = raw.and_then(|raw| text_search(raw, fields)) {
            self.clauses.push(group);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Predicate {
        Predicate::And(self.clauses)
    }
}

///
/// TESTS
///
