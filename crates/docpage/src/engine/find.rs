use crate::{
    error::EngineError,
    page::{Page, PageParam},
    query::{predicate::Predicate, project::Projection, sort::SortExpr},
    source::{ExpandSpec, FindQuery, FindSource},
};
use std::num::NonZeroU32;

/// Default page size for the direct-query path.
pub const DEFAULT_FIND_PAGE_SIZE: u32 = 10;

///
/// FindOptions
///
/// One page request for the direct-query path. `items` is non-zero by
/// construction, so the find path has no invalid-page-size error; `page`
/// stays transport-loose and is validated on resolution.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FindOptions {
    pub matches: Predicate,
    pub project: Option<Projection>,
    pub sort: Option<SortExpr>,
    pub expand: Option<ExpandSpec>,
    pub items: Option<NonZeroU32>,
    pub page: Option<PageParam>,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            matches: Predicate::True,
            project: None,
            sort: None,
            expand: None,
            items: None,
            page: None,
        }
    }
}

/// Run one filtered, windowed page query.
///
/// Validates the page index before touching the source (a rejected request
/// costs no query). The match predicate is wrapped into a single top-level
/// AND group so later caller-side composition cannot overwrite it. One
/// count, then one `items + 1` lookahead fetch; the default projection
/// withholds sensitive fields unless the caller supplies its own.
pub fn paged_find<S: FindSource>(
    source: &S,
    options: FindOptions,
) -> Result<Page<S::Item>, EngineError<S::Error>> {
    let page = match &options.page {
        Some(param) => param.resolve()?,
        None => 0,
    };
    let items = u64::from(options.items.map_or(DEFAULT_FIND_PAGE_SIZE, NonZeroU32::get));

    let filter = Predicate::And(vec![options.matches]);

    let count = source.count(&filter).map_err(EngineError::Source)?;

    let query = FindQuery {
        filter,
        project: options.project.unwrap_or_else(Projection::default_sensitive),
        sort: options.sort,
        skip: items.saturating_mul(page),
        limit: items + 1,
        expand: options.expand,
    };
    let rows = source.find(&query).map_err(EngineError::Source)?;

    Ok(Page::from_lookahead(rows, items, page, count))
}
