//! Ordering types for sorting rows.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for column-based ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordering clause: the column to sort by and the direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The column key to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given column.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given column.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two rows according to this ordering.
    pub fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        let ordering = compare_values(&a.field(&self.field), &b.field(&self.field));
        self.dir.apply(ordering)
    }
}

/// Compares two cells with a total relational order.
///
/// Same-kind values compare naturally. Values of different kinds are ranked
/// `None < Bool < Number < String < Composite`, so two missing cells are
/// equal and a column nobody has sorts as a no-op.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Composite(a), Value::Composite(b)) => a.to_string().cmp(&b.to_string()),
        (Value::None, Value::None) => Ordering::Equal,
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use serde_json::json;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_toggle_and_display() {
        assert_eq!(Dir::Asc.toggled(), Dir::Desc);
        assert_eq!(Dir::Desc.toggled(), Dir::Asc);
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn dir_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Dir::Desc).unwrap(), "\"desc\"");
        let dir: Dir = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(dir, Dir::Asc);
    }

    #[test]
    fn compare_same_kind() {
        assert_eq!(
            compare_values(&Value::String("apple"), &Value::String("banana")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::Number(Number::I64(20)), &Value::Number(Number::I64(10))),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&Value::Bool(false), &Value::Bool(true)),
            Ordering::Less
        );
    }

    #[test]
    fn compare_mixed_kinds_by_rank() {
        assert_eq!(
            compare_values(&Value::None, &Value::String("a")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::String("1"), &Value::Number(Number::I64(2))),
            Ordering::Greater
        );
        assert_eq!(compare_values(&Value::None, &Value::None), Ordering::Equal);
    }

    #[test]
    fn order_by_compare_rows() {
        let a = json!({"salary": 100}).as_object().cloned().unwrap();
        let b = json!({"salary": 200}).as_object().cloned().unwrap();

        assert_eq!(OrderBy::asc("salary").compare(&a, &b), Ordering::Less);
        assert_eq!(OrderBy::desc("salary").compare(&a, &b), Ordering::Greater);
        assert_eq!(OrderBy::asc("missing").compare(&a, &b), Ordering::Equal);
    }
}
