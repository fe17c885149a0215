//! Global and per-route configuration

use crate::core::predicate::{Condition, ConditionMap, Projection};
use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{LazyLock, RwLock};

/// Capability consulted for searchable fields unless reconfigured.
pub const DEFAULT_SEARCHABLE_CAPABILITY: &str = "searchable";

/// Page size applied when neither the route nor the request supplies one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Process-wide knobs shared by every registered route.
///
/// [`configure`] replaces the value wholesale. The searchable-capability
/// name is re-read on every request, so reconfiguring it also changes the
/// filter behavior of routes registered earlier. Call `configure` once
/// during startup, before traffic begins; concurrent reconfiguration under
/// live traffic is unsupported.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalConfig {
    /// Warn at registration when a model lacks the searchable capability.
    pub warn_missing_searchable: bool,

    /// Name of the field capability consulted to discover searchable fields.
    pub searchable_capability: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            warn_missing_searchable: true,
            searchable_capability: DEFAULT_SEARCHABLE_CAPABILITY.to_string(),
        }
    }
}

static GLOBAL_CONFIG: LazyLock<RwLock<GlobalConfig>> =
    LazyLock::new(|| RwLock::new(GlobalConfig::default()));

/// Replace the process-wide configuration wholesale (never merged).
pub fn configure(config: GlobalConfig) {
    let mut current = match GLOBAL_CONFIG.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *current = config;
}

/// Snapshot of the current process-wide configuration.
pub fn global_config() -> GlobalConfig {
    let current = match GLOBAL_CONFIG.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    current.clone()
}

/// Query-shaping options of one registered route.
///
/// Built once per registration via [`RouteOptions::merged`] and captured by
/// the route for its lifetime; request handling only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// Page size used when the request does not carry a usable `limit`.
    /// Non-positive values disable pagination for the route.
    pub default_limit: i64,

    /// Conditions every returned record must satisfy; also the base of
    /// every filter disjunction branch.
    pub search_params: ConditionMap,

    /// Field projection handed to the store verbatim.
    pub default_fields: Projection,

    /// Extra store directives passed through verbatim (e.g. `skip`).
    pub default_query_options: IndexMap<String, Value>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            search_params: ConditionMap::new(),
            default_fields: Projection::new(),
            default_query_options: IndexMap::new(),
        }
    }
}

impl RouteOptions {
    /// Apply caller overrides on top of the defaults.
    ///
    /// The merge is shallow per top-level key: a provided `search_params`
    /// (or `default_fields`, or `default_query_options`) replaces its
    /// default entirely rather than deep-merging into it.
    pub fn merged(overrides: RouteOverrides) -> Self {
        let defaults = Self::default();
        Self {
            default_limit: overrides.default_limit.unwrap_or(defaults.default_limit),
            search_params: overrides.search_params.unwrap_or(defaults.search_params),
            default_fields: overrides.default_fields.unwrap_or(defaults.default_fields),
            default_query_options: overrides
                .default_query_options
                .unwrap_or(defaults.default_query_options),
        }
    }
}

/// Caller-supplied route options; unset fields keep their defaults.
///
/// # Example
///
/// ```rust,ignore
/// let overrides = RouteOverrides::default()
///     .with_default_limit(5)
///     .with_search_param("enabled", Condition::equals(true))
///     .with_default_field("label", true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOverrides {
    pub default_limit: Option<i64>,
    pub search_params: Option<ConditionMap>,
    pub default_fields: Option<Projection>,
    pub default_query_options: Option<IndexMap<String, Value>>,
}

impl RouteOverrides {
    /// Load overrides from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let overrides: Self = serde_yaml::from_str(&content)?;
        Ok(overrides)
    }

    /// Load overrides from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let overrides: Self = serde_yaml::from_str(yaml)?;
        Ok(overrides)
    }

    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = Some(limit);
        self
    }

    pub fn with_search_param(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.search_params
            .get_or_insert_with(ConditionMap::new)
            .insert(field.into(), condition);
        self
    }

    pub fn with_default_field(mut self, field: impl Into<String>, include: bool) -> Self {
        self.default_fields
            .get_or_insert_with(Projection::new)
            .insert(field.into(), include);
        self
    }

    pub fn with_query_option(mut self, directive: impl Into<String>, value: Value) -> Self {
        self.default_query_options
            .get_or_insert_with(IndexMap::new)
            .insert(directive.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_options_defaults() {
        let options = RouteOptions::default();

        assert_eq!(options.default_limit, 10);
        assert!(options.search_params.is_empty());
        assert!(options.default_fields.is_empty());
        assert!(options.default_query_options.is_empty());
    }

    #[test]
    fn test_merged_keeps_defaults_for_unset_keys() {
        let options = RouteOptions::merged(RouteOverrides::default().with_default_limit(5));

        assert_eq!(options.default_limit, 5);
        assert!(options.search_params.is_empty());
    }

    #[test]
    fn test_merged_replaces_maps_shallowly() {
        let overrides = RouteOverrides::default()
            .with_search_param("enabled", Condition::equals(true))
            .with_default_field("label", true);
        let options = RouteOptions::merged(overrides);

        assert_eq!(options.default_limit, 10);
        assert_eq!(options.search_params.len(), 1);
        assert_eq!(
            options.default_fields.get("label").copied(),
            Some(true)
        );
    }

    #[test]
    fn test_overrides_from_yaml() {
        let overrides = RouteOverrides::from_yaml_str(
            r#"
default_limit: 5
search_params:
  enabled: true
  label:
    contains: lorem
default_fields:
  label: true
"#,
        )
        .unwrap();

        assert_eq!(overrides.default_limit, Some(5));
        let params = overrides.search_params.as_ref().unwrap();
        assert_eq!(params.get("enabled"), Some(&Condition::equals(true)));
        assert_eq!(params.get("label"), Some(&Condition::contains("lorem")));
        assert!(overrides.default_query_options.is_none());
    }

    #[test]
    fn test_overrides_yaml_garbage_is_an_error() {
        assert!(RouteOverrides::from_yaml_str("default_limit: [nope").is_err());
    }

    #[test]
    fn test_global_config_defaults() {
        let config = GlobalConfig::default();

        assert!(config.warn_missing_searchable);
        assert_eq!(config.searchable_capability, "searchable");
    }
}
