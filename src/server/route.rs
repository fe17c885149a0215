//! List route registration and the generated handler

use crate::config::{self, RouteOptions, RouteOverrides};
use crate::core::error::{ConfigError, ListError, StoreError};
use crate::core::guard::RouteGuard;
use crate::core::model::ListModel;
use crate::core::query::{ListParams, PageEnvelope, build_list_query, paginate};
use axum::extract::{Query, State};
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;

/// Per-route state captured at registration and shared by every request.
/// Everything in here is immutable; the handler is reentrant.
#[derive(Clone)]
struct ListState {
    model: Arc<dyn ListModel>,
    options: Arc<RouteOptions>,
    guards: Arc<[Arc<dyn RouteGuard>]>,
}

/// Register a paginated, filterable, sortable GET list route on `router`.
///
/// `overrides` are merged over the option defaults (shallow per top-level
/// key); `guards` run in order ahead of the handler body and the first
/// rejection becomes the response. The path gains a leading `/` when
/// missing and is otherwise registered verbatim.
///
/// # Example
///
/// ```rust,ignore
/// let app = register_list_route(
///     Router::new(),
///     Arc::new(items),
///     "/items",
///     vec![],
///     RouteOverrides::default()
///         .with_default_limit(5)
///         .with_search_param("enabled", Condition::equals(true)),
/// )?;
/// ```
pub fn register_list_route(
    router: Router,
    model: Arc<dyn ListModel>,
    route_path: &str,
    guards: Vec<Arc<dyn RouteGuard>>,
    overrides: RouteOverrides,
) -> Result<Router, ConfigError> {
    if route_path.trim().is_empty() {
        return Err(ConfigError::MissingArgument {
            argument: "route_path".to_string(),
        });
    }

    let options = RouteOptions::merged(overrides);

    let cfg = config::global_config();
    if cfg.warn_missing_searchable
        && model.field_capability(&cfg.searchable_capability).is_none()
    {
        tracing::warn!(
            "model '{}' does not declare the '{}' field capability; filter queries will fall back to its default conditions",
            model.model_name(),
            cfg.searchable_capability
        );
    }

    let path = normalize_route_path(route_path);
    let state = ListState {
        model,
        options: Arc::new(options),
        guards: guards.into(),
    };

    Ok(router.route(&path, get(list_records).with_state(state)))
}

/// The generated handler: guards, then query construction, fetch, and
/// page assembly. All request state lives on this stack frame.
async fn list_records(
    State(state): State<ListState>,
    Query(params): Query<ListParams>,
    parts: Parts,
) -> Result<Json<PageEnvelope<Value>>, ListError> {
    for guard in state.guards.iter() {
        guard.check(&parts).await?;
    }

    // The capability name is read per request, not captured at
    // registration, so a later `configure` call applies here too.
    let cfg = config::global_config();
    let searchable = match params.filter.as_deref() {
        Some(filter) if !filter.is_empty() => state
            .model
            .field_capability(&cfg.searchable_capability)
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    let query = build_list_query(&state.options, &params, &searchable);

    let records = state
        .model
        .find(&query.predicate, &state.options.default_fields, &query.find_options)
        .await
        .map_err(|err| StoreError::QueryFailed {
            model: state.model.model_name().to_string(),
            message: err.to_string(),
        })?;

    Ok(Json(paginate(records, query.limit, query.offset, query.page)))
}

fn normalize_route_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
