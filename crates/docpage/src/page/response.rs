//! Module: page::response
//! Responsibility: the paged result contract and the shared lookahead fold.
//! Does not own: query execution or transport serialization; callers
//! serialize `Page` into whatever format their web layer speaks.

use serde::Serialize;

///
/// Page
///
/// One page of results plus pagination metadata. `items` never exceeds the
/// requested page size; `next` is the follow-up page index when more rows
/// exist, absent otherwise.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub next: Option<u64>,
    pub pages: u64,
    pub count: u64,
}

impl<T> Page<T> {
    /// Fold a lookahead fetch into a page.
    ///
    /// `rows` is the raw window of up to `items + 1` rows. The extra row,
    /// when present, only proves a further page exists: it sets `has_next`
    /// and `next = page + 1` and is discarded from the output. This trades
    /// one extra fetched row for avoiding a second "is there more" query.
    ///
    /// `items` must be non-zero; both engine paths guarantee it.
    #[must_use]
    pub fn from_lookahead(mut rows: Vec<T>, items: u64, page: u64, count: u64) -> Self {
        let keep = usize::try_from(items).unwrap_or(usize::MAX);
        let has_next = rows.len() > keep;
        rows.truncate(keep);

        Self {
            items: rows,
            has_next,
            next: has_next.then(|| page + 1),
            pages: count.div_ceil(items),
            count,
        }
    }
}

///
/// TESTS
///
