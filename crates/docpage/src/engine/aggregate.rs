use crate::{
    error::{EngineError, PageError},
    page::{Page, PageParam},
    query::{
        sort::SortExpr,
        stage::{Stage, assemble_pipeline},
    },
    source::{FanOutWindow, PipelineSource},
};

/// Default page size for the aggregation path. Deliberately different from
/// the find default; call sites depend on the distinction.
pub const DEFAULT_AGGREGATE_PAGE_SIZE: i64 = 25;

///
/// AggregateOptions
///
/// One page request for the staged-pipeline path. Matching is expressed as
/// explicit `Stage::Match` entries in `pre_match`/`additionals`; `items`
/// arrives loose and must resolve to a strictly positive size.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregateOptions {
    pub pre_match: Vec<Stage>,
    pub additionals: Vec<Stage>,
    pub sort: Option<SortExpr>,
    pub items: Option<i64>,
    pub page: Option<PageParam>,
}

/// Run one staged-pipeline page query in a single fan-out pass.
///
/// Both validations happen before any execution: page index
/// (`InvalidPage`) and page size (`InvalidItems`). The pipeline is
/// assembled with the geo-hoisting rule, then executed exactly once with a
/// window of `items * page` / `items + 1`; the count branch and the data
/// branch come out of that same pass. A missing count branch means an
/// empty matched set and counts as zero.
pub fn paged_aggregate<S: PipelineSource>(
    source: &S,
    options: AggregateOptions,
) -> Result<Page<S::Item>, EngineError<S::Error>> {
    let page = match &options.page {
        Some(param) => param.resolve()?,
        None => 0,
    };

    let raw_items = options.items.unwrap_or(DEFAULT_AGGREGATE_PAGE_SIZE);
    let Ok(items) = u64::try_from(raw_items) else {
        return Err(PageError::InvalidItems { got: raw_items }.into());
    };
    if items == 0 {
        return Err(PageError::InvalidItems { got: raw_items }.into());
    }

    let pipeline = assemble_pipeline(options.pre_match, options.additionals, options.sort);
    let window = FanOutWindow {
        skip: items.saturating_mul(page),
        limit: items + 1,
    };

    let out = source
        .fan_out(&pipeline, window)
        .map_err(EngineError::Source)?;
    let count = out.total.unwrap_or(0);

    Ok(Page::from_lookahead(out.rows, items, page, count))
}
