//! Case-insensitive substring search.

use crate::record::Record;

/// A search term and the columns it is matched against.
///
/// A row matches when the term is empty, or when *any* of the searched
/// columns contains the term, ignoring case. A search without explicit
/// columns looks at every cell of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    needle: String,
    fields: Option<Vec<String>>,
}

impl Search {
    /// Searches `term` in the given columns.
    pub fn new<I, S>(term: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Search {
            needle: term.to_lowercase(),
            fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }

    /// Searches `term` in every cell of the row.
    pub fn all_fields(term: &str) -> Self {
        Search {
            needle: term.to_lowercase(),
            fields: None,
        }
    }

    /// The lowercased term.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// The searched columns, or `None` for whole-row search.
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Returns `true` if the term is empty (matches everything).
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests a single row.
    pub fn matches<T: Record>(&self, row: &T) -> bool {
        if self.is_empty() {
            return true;
        }
        match &self.fields {
            Some(fields) => fields
                .iter()
                .any(|field| self.hit(row.field(field).search_text().as_ref())),
            None => row
                .values()
                .iter()
                .any(|value| self.hit(value.search_text().as_ref())),
        }
    }

    fn hit(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }
}
