//! Row access.
//!
//! The [`Record`] trait is the only thing the query engine needs from a row:
//! a way to look a cell up by column key, and a way to list every cell for
//! whole-row search.

use std::collections::{BTreeMap, HashMap};

use crate::value::Value;

/// A JSON object row, the most common row shape.
pub type JsonRow = serde_json::Map<String, serde_json::Value>;

/// Trait for rows that can be searched, ordered and paged.
///
/// # Manual Implementation
///
/// ```
/// use unitable_query::{Number, Record, Value};
///
/// struct Employee {
///     name: String,
///     age: u8,
/// }
///
/// impl Record for Employee {
///     fn field(&self, key: &str) -> Value<'_> {
///         match key {
///             "name" => Value::String(&self.name),
///             "age" => Value::Number(Number::U64(self.age as u64)),
///             _ => Value::None,
///         }
///     }
///
///     fn values(&self) -> Vec<Value<'_>> {
///         vec![self.field("name"), self.field("age")]
///     }
/// }
/// ```
pub trait Record {
    /// Returns the cell stored under `key`, or [`Value::None`] if the row has
    /// no such column.
    fn field(&self, key: &str) -> Value<'_>;

    /// Returns every cell of the row, in no particular order.
    fn values(&self) -> Vec<Value<'_>>;
}

impl Record for JsonRow {
    fn field(&self, key: &str) -> Value<'_> {
        self.get(key).map(Value::from_json).unwrap_or(Value::None)
    }

    fn values(&self) -> Vec<Value<'_>> {
        serde_json::Map::values(self).map(Value::from_json).collect()
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, serde_json::Value, S> {
    fn field(&self, key: &str) -> Value<'_> {
        self.get(key).map(Value::from_json).unwrap_or(Value::None)
    }

    fn values(&self) -> Vec<Value<'_>> {
        HashMap::values(self).map(Value::from_json).collect()
    }
}

impl Record for BTreeMap<String, serde_json::Value> {
    fn field(&self, key: &str) -> Value<'_> {
        self.get(key).map(Value::from_json).unwrap_or(Value::None)
    }

    fn values(&self) -> Vec<Value<'_>> {
        BTreeMap::values(self).map(Value::from_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_row_lookup() {
        let row: JsonRow = json!({"office": "Tokyo", "age": 33}).as_object().cloned().unwrap();

        assert_eq!(row.field("office"), Value::String("Tokyo"));
        assert!(row.field("salary").is_none());
        assert_eq!(Record::values(&row).len(), 2);
    }

    #[test]
    fn hash_map_lookup() {
        let mut row = HashMap::new();
        row.insert("name".to_string(), json!("Dai Rios"));

        assert_eq!(row.field("name"), Value::String("Dai Rios"));
        assert_eq!(Record::values(&row), vec![Value::String("Dai Rios")]);
    }
}
