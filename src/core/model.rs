//! Model trait for list-backed collections

use crate::core::predicate::{FindOptions, Predicate, Projection};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A data-model collection a list route can be bound to.
///
/// Implementations wrap whatever store executes the query; the crate is
/// agnostic to the storage mechanism and only requires a find-like call.
#[async_trait]
pub trait ListModel: Send + Sync {
    /// Identifying name, used only in diagnostics.
    fn model_name(&self) -> &str;

    /// Named field-list capabilities the model declares.
    ///
    /// The generated handler consults the capability named by the current
    /// [`GlobalConfig`](crate::config::GlobalConfig) to discover which
    /// fields are searchable. Models without that capability stay listable;
    /// filter requests fall back to their default conditions.
    fn field_capability(&self, capability: &str) -> Option<Vec<String>> {
        let _ = capability;
        None
    }

    /// Fetch every record matching `predicate`, shaped by `fields` and
    /// `options`.
    ///
    /// Returns the full matched set; the page window is applied by the
    /// caller so the envelope can report the pre-slice total.
    async fn find(
        &self,
        predicate: &Predicate,
        fields: &Projection,
        options: &FindOptions,
    ) -> Result<Vec<Value>>;
}
