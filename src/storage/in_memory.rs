//! In-memory implementation of ListModel for testing and development

use crate::config::DEFAULT_SEARCHABLE_CAPABILITY;
use crate::core::model::ListModel;
use crate::core::predicate::{Condition, ConditionMap, FindOptions, Predicate, Projection, SortSpec};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const ID_FIELD: &str = "_id";

/// In-memory list model backed by a vector of JSON documents.
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// `find` returns the full matched set (sorted, skipped, projected); the
/// page window is the caller's job.
#[derive(Clone)]
pub struct InMemoryModel {
    name: String,
    capabilities: HashMap<String, Vec<String>>,
    records: Arc<RwLock<Vec<Value>>>,
}

impl InMemoryModel {
    /// Create an empty model with the given diagnostic name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: HashMap::new(),
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Declare a named field-list capability
    pub fn with_capability(mut self, capability: impl Into<String>, fields: &[&str]) -> Self {
        self.capabilities.insert(
            capability.into(),
            fields.iter().map(|field| field.to_string()).collect(),
        );
        self
    }

    /// Declare the default searchable-fields capability
    pub fn with_searchable(self, fields: &[&str]) -> Self {
        self.with_capability(DEFAULT_SEARCHABLE_CAPABILITY, fields)
    }

    /// Seed the model with records
    pub fn with_records(self, records: Vec<Value>) -> Self {
        {
            let mut stored = self
                .records
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *stored = records;
        }
        self
    }

    /// Append a record
    pub fn insert(&self, record: Value) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        records.push(record);

        Ok(())
    }
}

#[async_trait]
impl ListModel for InMemoryModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn field_capability(&self, capability: &str) -> Option<Vec<String>> {
        self.capabilities.get(capability).cloned()
    }

    async fn find(
        &self,
        predicate: &Predicate,
        fields: &Projection,
        options: &FindOptions,
    ) -> Result<Vec<Value>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matched: Vec<Value> = records
            .iter()
            .filter(|record| matches_predicate(record, predicate))
            .cloned()
            .collect();
        drop(records);

        sort_records(&mut matched, &options.sort);

        // The one extra directive this store understands.
        let skip = options
            .directives
            .get("skip")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize;
        if skip > 0 {
            matched = matched.split_off(skip.min(matched.len()));
        }

        Ok(matched
            .into_iter()
            .map(|record| project(record, fields))
            .collect())
    }
}

fn matches_predicate(record: &Value, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::All(conditions) => matches_conditions(record, conditions),
        // An empty disjunction matches nothing.
        Predicate::AnyOf(branches) => branches
            .iter()
            .any(|branch| matches_conditions(record, branch)),
    }
}

fn matches_conditions(record: &Value, conditions: &ConditionMap) -> bool {
    conditions.iter().all(|(field, condition)| {
        let value = record.get(field);
        match condition {
            Condition::Equals(expected) => value == Some(expected),
            Condition::Contains { contains } => value
                .and_then(Value::as_str)
                .is_some_and(|text| text.contains(contains.as_str())),
        }
    })
}

fn sort_records(records: &mut [Value], sort: &SortSpec) {
    let ascending = sort.direction.eq_ignore_ascii_case("asc");
    records.sort_by(|a, b| {
        let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
        if ascending { ordering } else { ordering.reverse() }
    });
}

/// Order two field values; records missing the field sort first.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Apply a field projection. Any `true` flag switches to inclusion mode
/// (listed fields plus the identifier); a map of only `false` flags
/// excludes the listed fields from an otherwise full record.
fn project(record: Value, projection: &Projection) -> Value {
    if projection.is_empty() {
        return record;
    }
    let map = match record {
        Value::Object(map) => map,
        other => return other,
    };

    let inclusive = projection.values().any(|include| *include);
    let filtered = map
        .into_iter()
        .filter(|(key, _)| {
            if inclusive {
                key == ID_FIELD || projection.get(key).copied().unwrap_or(false)
            } else {
                !projection.contains_key(key)
            }
        })
        .collect();

    Value::Object(filtered)
}
