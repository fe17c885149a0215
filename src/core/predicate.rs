//! Store-facing query structures: conditions, predicates, projections and sort

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort field used when a request does not specify one.
///
/// Every collection is expected to carry an identifier under this key, so
/// sorting by it is always well-defined.
pub const DEFAULT_SORT_FIELD: &str = "_id";

/// Sort direction used when a request does not specify one.
pub const DEFAULT_SORT_DIRECTION: &str = "DESC";

/// A single field condition.
///
/// `Contains` carries the raw filter string; store adapters must treat it as
/// a literal, case-sensitive substring. Adapters that translate it into a
/// regex dialect are responsible for escaping it first.
///
/// Deserialization is untagged: a map of the form `{ contains: "text" }`
/// parses as `Contains`, anything else as `Equals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Case-sensitive substring match on a string field.
    Contains { contains: String },

    /// The stored field must equal this JSON value exactly.
    Equals(Value),
}

impl Condition {
    pub fn equals(value: impl Into<Value>) -> Self {
        Condition::Equals(value.into())
    }

    pub fn contains(pattern: impl Into<String>) -> Self {
        Condition::Contains {
            contains: pattern.into(),
        }
    }
}

/// Field-name → condition map. Insertion order is preserved so predicates
/// are deterministic across identical inputs.
pub type ConditionMap = IndexMap<String, Condition>;

/// Field-name → inclusion flag map handed to the store verbatim.
/// An empty map selects the full record.
pub type Projection = IndexMap<String, bool>;

/// Sort specification passed through to the store.
///
/// Neither the field nor the direction is validated here; a field the store
/// cannot sort by surfaces as a query-execution failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: String,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            direction: DEFAULT_SORT_DIRECTION.to_string(),
        }
    }
}

/// Options accompanying a `find` call: the typed sort plus any extra
/// directives the route declared (passed through verbatim).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindOptions {
    pub sort: SortSpec,
    pub directives: IndexMap<String, Value>,
}

/// The condition structure handed to the store's query execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Predicate {
    /// Conjunction: every condition must hold.
    All(ConditionMap),

    /// Disjunction: a record matches if any branch's conditions all hold.
    AnyOf(Vec<ConditionMap>),
}

impl Predicate {
    /// Build the predicate for a request.
    ///
    /// Without a filter the predicate is an independent copy of the route's
    /// default conditions, so downstream mutation can never leak into the
    /// stored defaults. With a filter, each searchable field contributes one
    /// disjunction branch: the default conditions plus a substring match on
    /// that field. A filter with no searchable fields falls back to the
    /// default conditions rather than producing an empty disjunction.
    pub fn for_filter(defaults: &ConditionMap, filter: &str, searchable: &[String]) -> Predicate {
        if filter.is_empty() || searchable.is_empty() {
            return Predicate::All(defaults.clone());
        }

        let branches = searchable
            .iter()
            .map(|field| {
                let mut branch = defaults.clone();
                branch.insert(field.clone(), Condition::contains(filter));
                branch
            })
            .collect();

        Predicate::AnyOf(branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> ConditionMap {
        let mut map = ConditionMap::new();
        map.insert("enabled".to_string(), Condition::equals(true));
        map
    }

    #[test]
    fn test_no_filter_copies_defaults() {
        let base = defaults();
        let predicate = Predicate::for_filter(&base, "", &["label".to_string()]);

        assert_eq!(predicate, Predicate::All(base));
    }

    #[test]
    fn test_filter_builds_one_branch_per_searchable_field() {
        let searchable = vec!["label".to_string(), "description".to_string()];
        let predicate = Predicate::for_filter(&defaults(), "lorem", &searchable);

        let Predicate::AnyOf(branches) = predicate else {
            panic!("expected a disjunction");
        };
        assert_eq!(branches.len(), 2);

        for (branch, field) in branches.iter().zip(&searchable) {
            assert_eq!(branch.get("enabled"), Some(&Condition::equals(true)));
            assert_eq!(branch.get(field), Some(&Condition::contains("lorem")));
            assert_eq!(branch.len(), 2);
        }
    }

    #[test]
    fn test_filter_without_searchable_fields_falls_back_to_defaults() {
        let base = defaults();
        let predicate = Predicate::for_filter(&base, "lorem", &[]);

        assert_eq!(predicate, Predicate::All(base));
    }

    #[test]
    fn test_branch_overrides_default_condition_on_same_field() {
        let mut base = ConditionMap::new();
        base.insert("label".to_string(), Condition::equals("fixed"));

        let predicate = Predicate::for_filter(&base, "lorem", &["label".to_string()]);

        let Predicate::AnyOf(branches) = predicate else {
            panic!("expected a disjunction");
        };
        assert_eq!(branches[0].get("label"), Some(&Condition::contains("lorem")));
        assert_eq!(branches[0].len(), 1);
    }

    #[test]
    fn test_predicate_is_independent_of_defaults() {
        let base = defaults();
        let predicate = Predicate::for_filter(&base, "", &[]);

        if let Predicate::All(mut copy) = predicate {
            copy.insert("extra".to_string(), Condition::equals(json!(1)));
        }

        assert_eq!(base.len(), 1, "stored defaults must not be mutated");
    }

    #[test]
    fn test_condition_deserializes_contains_and_equals() {
        let contains: Condition = serde_json::from_value(json!({ "contains": "abc" })).unwrap();
        assert_eq!(contains, Condition::contains("abc"));

        let equals: Condition = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(equals, Condition::equals(true));
    }
}
