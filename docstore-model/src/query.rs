use docstore_types::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::entity::ID_FIELD;
use crate::error::{ModelError, json_type_name};

/// How a stored field value is compared with a query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The field must be present and equal. `0`, `""` and `false` match normally.
    #[default]
    Strict,
    /// Compatibility mode: a stored `null`, `false`, `0` or `""` never matches,
    /// even when the query asks for exactly that value.
    Truthy,
}

impl MatchMode {
    /// Whether `stored` satisfies a query entry expecting `expected`.
    #[must_use]
    pub fn accepts(self, stored: Option<&Value>, expected: &Value) -> bool {
        match (self, stored) {
            (_, None) => false,
            (Self::Strict, Some(value)) => values_equal(value, expected),
            (Self::Truthy, Some(value)) => is_truthy(value) && values_equal(value, expected),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// `1` and `1.0` compare equal; everything else is structural.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// A partial-match filter: field name to required value.
///
/// Built from a mapping, a single `(key, value)` pair, or with the
/// [`Query::field`] builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(Map<String, Value>);

impl Query {
    /// The empty query, which matches every entity.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Query on the `id` member.
    #[must_use]
    pub fn by_id(id: EntityId) -> Self {
        Self::new().field(ID_FIELD, id)
    }

    /// Adds (or replaces) a required field value.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Query {
    fn from((key, value): (K, V)) -> Self {
        Self::new().field(key, value)
    }
}

impl From<Map<String, Value>> for Query {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<EntityId> for Query {
    fn from(id: EntityId) -> Self {
        Self::by_id(id)
    }
}

impl TryFrom<Value> for Query {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::NotAnObject(json_type_name(&other))),
        }
    }
}

impl FromIterator<(String, Value)> for Query {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
