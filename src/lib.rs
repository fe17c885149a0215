//! # rest-list
//!
//! Generate the one endpoint every CRUD backend keeps re-writing: a
//! paginated, filterable, sortable GET list route bound to a data-model
//! collection.
//!
//! ## Features
//!
//! - **One-call registration**: bind a model to an `axum::Router` path
//! - **Lenient query parsing**: malformed `limit`/`page` fall back to
//!   defaults instead of erroring
//! - **Declarative search**: models declare searchable fields; a `filter`
//!   parameter fans out into a substring disjunction across them
//! - **Per-route defaults**: page size, base conditions, projections and
//!   store directives merged over sensible defaults
//! - **Guards**: ordered pre-handler checks standing in for middleware
//! - **Store-agnostic**: any type implementing `ListModel` works; an
//!   in-memory model is included for tests and development
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rest_list::prelude::*;
//!
//! let items = InMemoryModel::new("items")
//!     .with_searchable(&["label", "description"])
//!     .with_records(fixtures);
//!
//! let app = register_list_route(
//!     Router::new(),
//!     Arc::new(items),
//!     "/items",
//!     vec![],
//!     RouteOverrides::default()
//!         .with_default_limit(5)
//!         .with_search_param("enabled", Condition::equals(true)),
//! )?;
//!
//! // GET /items?filter=lorem&limit=2&page=1
//! // -> { "results": [...], "currentPage": 1, "limit": 2,
//! //      "totalPages": 1, "totalResults": 1 }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Configuration ===
    pub use crate::config::{GlobalConfig, RouteOptions, RouteOverrides, configure, global_config};

    // === Core ===
    pub use crate::core::{
        error::{ConfigError, ErrorResponse, ListError, ListResult, RequestError, StoreError},
        guard::{GuardFn, RouteGuard},
        model::ListModel,
        predicate::{Condition, ConditionMap, FindOptions, Predicate, Projection, SortSpec},
        query::{ListParams, ListQuery, PageEnvelope, build_list_query, paginate},
    };

    // === Registration ===
    pub use crate::server::register_list_route;

    // === Storage ===
    pub use crate::storage::InMemoryModel;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};

    // === Axum ===
    pub use axum::{Router, http::request::Parts, routing::get};
}
