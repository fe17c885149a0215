//! Core traits and types for generated list routes

pub mod error;
pub mod guard;
pub mod model;
pub mod predicate;
pub mod query;

pub use error::{ConfigError, ListError, ListResult, RequestError, StoreError};
pub use guard::{GuardFn, RouteGuard};
pub use model::ListModel;
pub use predicate::{Condition, ConditionMap, FindOptions, Predicate, Projection, SortSpec};
pub use query::{ListParams, ListQuery, PageEnvelope, build_list_query, paginate};
