
use crate::{
    document::Document,
    engine::{AggregateOptions, FindOptions, paged_aggregate, paged_find},
    error::{EngineError, PageError},
    page::PageParam,
    query::{
        predicate::Predicate,
        project::Projection,
        sort::{OrderDirection, SortExpr},
        stage::{GeoNearSpec, Stage},
    },
    source::{
        ExpandSpec, FanOut, FanOutWindow, FindQuery, FindSource, MemoryError, MemorySource,
        PipelineSource,
    },
    value::Value,
};
use std::cell::{Cell, RefCell};
use std::num::NonZeroU32;

fn numbered(count: i64) -> Vec<Document> {
    (0..count)
        .map(|n| Document::new().with("n", n).with("password", "secret"))
        .collect()
}

fn by_n() -> SortExpr {
    SortExpr::by("n", OrderDirection::Asc)
}

fn items(n: u32) -> Option<NonZeroU32> {
    Some(NonZeroU32::new(n).unwrap())
}

///
/// ProbeFindSource
///
/// Records every call so tests can assert that rejected requests issue no
/// query at all, and inspect the filter the engine actually sent.
///

#[derive(Default)]
struct ProbeFindSource {
    calls: Cell<u32>,
    last_filter: RefCell<Option<Predicate>>,
}

impl FindSource for ProbeFindSource {
    type Item = Document;
    type Error = MemoryError;

    fn count(&self, filter: &Predicate) -> Result<u64, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        *self.last_filter.borrow_mut() = Some(filter.clone());
        Ok(0)
    }

    fn find(&self, query: &FindQuery) -> Result<Vec<Self::Item>, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        *self.last_filter.borrow_mut() = Some(query.filter.clone());
        Ok(vec![])
    }
}

///
/// ProbePipelineSource
///

#[derive(Default)]
struct ProbePipelineSource {
    calls: Cell<u32>,
    last_window: Cell<Option<FanOutWindow>>,
}

impl PipelineSource for ProbePipelineSource {
    type Item = Document;
    type Error = MemoryError;

    fn fan_out(
        &self,
        _pipeline: &[Stage],
        window: FanOutWindow,
    ) -> Result<FanOut<Self::Item>, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        self.last_window.set(Some(window));
        Ok(FanOut {
            rows: vec![],
            total: None,
        })
    }
}

// ─────────────────────────────────────────────────────────────
// paged_find
// ─────────────────────────────────────────────────────────────

#[test]
fn find_first_page_of_twenty_five() {
    let source = MemorySource::new(numbered(25));

    let page = paged_find(
        &source,
        FindOptions {
            sort: Some(by_n()),
            ..FindOptions::default()
        },
    )
    .unwrap();

    assert_eq!(page.items.len(), 10);
    assert!(page.has_next);
    assert_eq!(page.next, Some(1));
    assert_eq!(page.pages, 3);
    assert_eq!(page.count, 25);
    assert_eq!(page.items[0].get("n"), Some(&Value::Int(0)));
}

#[test]
fn find_last_partial_page_of_twenty_five() {
    let source = MemorySource::new(numbered(25));

    let page = paged_find(
        &source,
        FindOptions {
            sort: Some(by_n()),
            page: Some(PageParam::from(2i64)),
            ..FindOptions::default()
        },
    )
    .unwrap();

    assert_eq!(page.items.len(), 5);
    assert!(!page.has_next);
    assert_eq!(page.next, None);
    assert_eq!(page.pages, 3);
    assert_eq!(page.count, 25);
    assert_eq!(page.items[0].get("n"), Some(&Value::Int(20)));
}

#[test]
fn find_empty_result_set() {
    let source = MemorySource::new(vec![]);

    let page = paged_find(&source, FindOptions::default()).unwrap();

    assert!(page.items.is_empty());
    assert!(!page.has_next);
    assert_eq!(page.next, None);
    assert_eq!(page.pages, 0);
    assert_eq!(page.count, 0);
}

#[test]
fn find_rejects_negative_page_without_issuing_a_query() {
    let probe = ProbeFindSource::default();

    let err = paged_find(
        &probe,
        FindOptions {
            page: Some(PageParam::from(-1i64)),
            ..FindOptions::default()
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        EngineError::Page(PageError::InvalidPage { got: "-1".into() })
    );
    assert_eq!(probe.calls.get(), 0);
}

#[test]
fn find_rejects_non_numeric_page_without_issuing_a_query() {
    let probe = ProbeFindSource::default();

    let err = paged_find(
        &probe,
        FindOptions {
            page: Some(PageParam::from("abc")),
            ..FindOptions::default()
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        EngineError::Page(PageError::InvalidPage { got: "abc".into() })
    );
    assert_eq!(probe.calls.get(), 0);
}

#[test]
fn find_wraps_the_match_predicate_in_a_top_level_and_group() {
    let probe = ProbeFindSource::default();
    let base = Predicate::eq("permission", "user");

    paged_find(
        &probe,
        FindOptions {
            matches: base.clone(),
            ..FindOptions::default()
        },
    )
    .unwrap();

    let filter = probe.last_filter.borrow().clone().unwrap();
    assert_eq!(filter, Predicate::And(vec![base]));
}

#[test]
fn find_default_projection_withholds_sensitive_fields() {
    let source = MemorySource::new(numbered(3));

    let page = paged_find(&source, FindOptions::default()).unwrap();

    assert!(page.items.iter().all(|doc| !doc.contains("password")));
}

#[test]
fn find_caller_projection_overrides_the_sensitive_default() {
    let source = MemorySource::new(numbered(3));

    let page = paged_find(
        &source,
        FindOptions {
            project: Some(Projection::Exclude(vec![])),
            ..FindOptions::default()
        },
    )
    .unwrap();

    assert!(page.items.iter().all(|doc| doc.contains("password")));
}

#[test]
fn find_walking_next_concatenates_the_full_sorted_set() {
    let source = MemorySource::new(numbered(25));
    let mut seen: Vec<Value> = vec![];
    let mut page_index = Some(0u64);

    while let Some(index) = page_index {
        let page = paged_find(
            &source,
            FindOptions {
                sort: Some(by_n()),
                items: items(4),
                page: Some(PageParam::from(i64::try_from(index).unwrap())),
                ..FindOptions::default()
            },
        )
        .unwrap();

        seen.extend(page.items.iter().map(|doc| doc.get("n").unwrap().clone()));
        page_index = page.next;
    }

    let expected: Vec<Value> = (0..25i64).map(Value::Int).collect();
    assert_eq!(seen, expected);
}

#[test]
fn find_source_failures_propagate_unchanged() {
    let source = MemorySource::new(numbered(3));

    let err = paged_find(
        &source,
        FindOptions {
            expand: Some(ExpandSpec::new("course", "missing")),
            ..FindOptions::default()
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        EngineError::Source(MemoryError::UnknownCollection {
            name: "missing".into()
        })
    );
    assert_eq!(err.to_string(), "unknown collection: missing");
}

// ─────────────────────────────────────────────────────────────
// paged_aggregate
// ─────────────────────────────────────────────────────────────

#[test]
fn aggregate_pages_with_explicit_size() {
    let source = MemorySource::new(numbered(25));

    let page = paged_aggregate(
        &source,
        AggregateOptions {
            sort: Some(by_n()),
            items: Some(10),
            ..AggregateOptions::default()
        },
    )
    .unwrap();

    assert_eq!(page.items.len(), 10);
    assert!(page.has_next);
    assert_eq!(page.next, Some(1));
    assert_eq!(page.pages, 3);
    assert_eq!(page.count, 25);
}

#[test]
fn aggregate_default_page_size_is_twenty_five() {
    let source = MemorySource::new(numbered(30));

    let page = paged_aggregate(
        &source,
        AggregateOptions {
            sort: Some(by_n()),
            ..AggregateOptions::default()
        },
    )
    .unwrap();

    assert_eq!(page.items.len(), 25);
    assert!(page.has_next);
    assert_eq!(page.pages, 2);
}

#[test]
fn aggregate_rejects_non_positive_sizes_without_executing() {
    let probe = ProbePipelineSource::default();

    for bad in [0i64, -5] {
        let err = paged_aggregate(
            &probe,
            AggregateOptions {
                items: Some(bad),
                ..AggregateOptions::default()
            },
        )
        .unwrap_err();

        assert_eq!(err, EngineError::Page(PageError::InvalidItems { got: bad }));
    }

    assert_eq!(probe.calls.get(), 0);
}

#[test]
fn aggregate_rejects_invalid_page_without_executing() {
    let probe = ProbePipelineSource::default();

    let err = paged_aggregate(
        &probe,
        AggregateOptions {
            page: Some(PageParam::from("two")),
            ..AggregateOptions::default()
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        EngineError::Page(PageError::InvalidPage { got: "two".into() })
    );
    assert_eq!(probe.calls.get(), 0);
}

#[test]
fn aggregate_executes_exactly_one_pass_with_the_lookahead_window() {
    let probe = ProbePipelineSource::default();

    paged_aggregate(
        &probe,
        AggregateOptions {
            items: Some(10),
            page: Some(PageParam::from(3i64)),
            ..AggregateOptions::default()
        },
    )
    .unwrap();

    assert_eq!(probe.calls.get(), 1);
    assert_eq!(
        probe.last_window.get(),
        Some(FanOutWindow {
            skip: 30,
            limit: 11,
        })
    );
}

#[test]
fn aggregate_missing_count_branch_defaults_to_zero() {
    let source = MemorySource::new(numbered(5));

    let page = paged_aggregate(
        &source,
        AggregateOptions {
            additionals: vec![Stage::Match(Predicate::False)],
            ..AggregateOptions::default()
        },
    )
    .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.count, 0);
    assert_eq!(page.pages, 0);
    assert_eq!(page.next, None);
}

#[test]
fn aggregate_geo_pipeline_orders_by_proximity() {
    let place = |name: &str, x: f64| {
        Document::new()
            .with("name", name)
            .with("published", true)
            .with("location", Value::List(vec![Value::Float(x), Value::Float(0.0)]))
    };
    let source = MemorySource::new(vec![place("far", 9.0), place("near", 1.0), place("mid", 4.0)]);

    let page = paged_aggregate(
        &source,
        AggregateOptions {
            pre_match: vec![Stage::Match(Predicate::eq("published", true))],
            additionals: vec![Stage::GeoNear(GeoNearSpec {
                near: [0.0, 0.0],
                key: "location".into(),
                distance_field: "distance".into(),
                max_distance: None,
            })],
            items: Some(2),
            ..AggregateOptions::default()
        },
    )
    .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].get("name"), Some(&Value::Text("near".into())));
    assert_eq!(page.items[1].get("name"), Some(&Value::Text("mid".into())));
    assert!(page.has_next);
    assert_eq!(page.count, 3);
}

#[test]
fn aggregate_sort_option_orders_the_output() {
    let source = MemorySource::new(numbered(6));

    let page = paged_aggregate(
        &source,
        AggregateOptions {
            sort: Some(SortExpr::by("n", OrderDirection::Desc)),
            items: Some(3),
            ..AggregateOptions::default()
        },
    )
    .unwrap();

    assert_eq!(page.items[0].get("n"), Some(&Value::Int(5)));
    assert_eq!(page.items[2].get("n"), Some(&Value::Int(3)));
}
