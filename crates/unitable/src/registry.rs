//! Registry of host-owned cell templates.
//!
//! Columns name their template with `template_id`. The grid never looks inside
//! a template: it stores whatever the host registers under a name and hands
//! it back on lookup.
//!
//! # Example
//!
//! ```rust
//! use unitable::{Column, TemplateRegistry};
//!
//! let mut registry = TemplateRegistry::new();
//! registry.register("money", "<b>{{ value }}</b>");
//!
//! let column = Column::new("salary", "Salary").template_id("money");
//! assert_eq!(registry.for_column(&column), Some(&"<b>{{ value }}</b>"));
//! assert_eq!(registry.lookup("missing"), None);
//! ```

use std::collections::BTreeMap;

use crate::column::Column;

/// Name-to-template map.
#[derive(Debug, Clone)]
pub struct TemplateRegistry<T> {
    templates: BTreeMap<String, T>,
}

impl<T> Default for TemplateRegistry<T> {
    fn default() -> Self {
        TemplateRegistry {
            templates: BTreeMap::new(),
        }
    }
}

impl<T> TemplateRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `template` under `name`, returning the one it replaces.
    pub fn register(&mut self, name: impl Into<String>, template: T) -> Option<T> {
        self.templates.insert(name.into(), template)
    }

    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.templates.get(name)
    }

    /// Template named by the column's `template_id`, if any.
    pub fn for_column(&self, column: &Column) -> Option<&T> {
        column
            .template_id
            .as_deref()
            .and_then(|name| self.lookup(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.templates.remove(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn clear(&mut self) {
        self.templates.clear();
    }
}
