//! Request query parameters, list-query construction and pagination

use crate::config::RouteOptions;
use crate::core::predicate::{
    DEFAULT_SORT_DIRECTION, DEFAULT_SORT_FIELD, FindOptions, Predicate, SortSpec,
};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by every generated list route.
///
/// All fields are raw optional strings: arbitrary client input must never
/// fail extraction. Numeric fields are parsed leniently afterwards and fall
/// back to route defaults when malformed.
///
/// # Example
/// ```text
/// GET /items?limit=5&page=2
/// GET /items?filter=lorem&sort=label&direction=ASC
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Sort field, default `_id`.
    pub sort: Option<String>,

    /// Sort direction, free-form (`ASC`/`DESC`), default `DESC`.
    pub direction: Option<String>,

    /// Substring to match across the model's searchable fields.
    pub filter: Option<String>,

    /// Page size; only a positive integer overrides the route default.
    pub limit: Option<String>,

    /// 1-based page number, default 1.
    pub page: Option<String>,
}

/// A fully derived data-fetch specification for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub predicate: Predicate,
    pub find_options: FindOptions,
    pub limit: i64,
    pub offset: usize,
    pub page: u64,
}

/// Derive the fetch specification from the route's options and the raw
/// request parameters.
///
/// Pure per-request computation: nothing here is shared or mutated across
/// requests, and the route options are only read. `searchable` is the field
/// list the model declared for the currently configured capability; it is
/// only consulted when a filter is present.
pub fn build_list_query(
    options: &RouteOptions,
    params: &ListParams,
    searchable: &[String],
) -> ListQuery {
    let sort = non_empty(params.sort.as_deref()).unwrap_or(DEFAULT_SORT_FIELD);
    let direction = non_empty(params.direction.as_deref()).unwrap_or(DEFAULT_SORT_DIRECTION);
    let filter = non_empty(params.filter.as_deref()).unwrap_or("");

    if !filter.is_empty() && searchable.is_empty() {
        tracing::debug!(
            "filter '{}' ignored: no searchable fields declared, using default conditions",
            filter
        );
    }
    let predicate = Predicate::for_filter(&options.search_params, filter, searchable);

    let limit = parse_positive_or(params.limit.as_deref(), options.default_limit);
    let page = parse_page(params.page.as_deref());
    // Saturating: an absurd page number yields an offset past the end and
    // therefore an empty page, never an overflow.
    let offset = if limit > 0 && page > 1 {
        ((page - 1) as usize).saturating_mul(limit as usize)
    } else {
        0
    };

    ListQuery {
        predicate,
        find_options: FindOptions {
            sort: SortSpec {
                field: sort.to_string(),
                direction: direction.to_string(),
            },
            directives: options.default_query_options.clone(),
        },
        limit,
        offset,
        page,
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

/// Parse a positive integer, falling back otherwise.
///
/// Zero, negative and non-numeric values all yield the fallback, so a
/// nonsensical `limit` can never disable or distort pagination.
fn parse_positive_or(raw: Option<&str>, fallback: i64) -> i64 {
    match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
        Some(n) if n > 0 => n,
        _ => fallback,
    }
}

/// Parse the 1-based page number; anything not a positive integer is page 1.
fn parse_page(raw: Option<&str>) -> u64 {
    match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
        Some(n) if n > 0 => n as u64,
        _ => 1,
    }
}

/// The response envelope of a list route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// The records of the requested page window.
    pub results: Vec<T>,

    /// 1-based page that was served.
    pub current_page: u64,

    /// Effective page size; non-positive means pagination was disabled.
    pub limit: i64,

    /// Number of pages the matched set spans (1 when pagination is off).
    pub total_pages: usize,

    /// Size of the matched set before the page window was applied.
    pub total_results: usize,
}

/// Slice the fetched result set into a page envelope.
///
/// `total_results` always counts the full matched set. With a non-positive
/// `limit` no slicing happens and the set spans a single page; otherwise the
/// window `[offset, offset + limit)` is taken non-destructively (empty when
/// the offset lies past the end).
pub fn paginate<T>(results: Vec<T>, limit: i64, offset: usize, current_page: u64) -> PageEnvelope<T> {
    let total_results = results.len();

    if limit <= 0 {
        return PageEnvelope {
            results,
            current_page,
            limit,
            total_pages: 1,
            total_results,
        };
    }

    let page_size = limit as usize;
    let total_pages = total_results / page_size + usize::from(total_results % page_size > 0);
    let window = results.into_iter().skip(offset).take(page_size).collect();

    PageEnvelope {
        results: window,
        current_page,
        limit,
        total_pages,
        total_results,
    }
}
