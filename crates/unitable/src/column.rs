//! Column schema and the data bundle a host hands to the grid.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Configuration for a single grid column.
///
/// `key` is the column's identity: it addresses row fields, hidden-column
/// sets, the persisted snapshot and sort state. Everything else is
/// presentation data the core only reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique, stable column identifier.
    pub key: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Header text overriding `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_label: Option<String>,
    /// Declared width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Minimum width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    /// Initial visibility. Columns with `visible: false` start user-hidden.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Whether clicking the header sorts by this column.
    #[serde(default = "default_true")]
    pub orderable: bool,
    /// Whether client-side search looks at this column.
    #[serde(default = "default_true")]
    pub searchable: bool,
    /// Higher priority columns are hidden later and restored sooner.
    #[serde(default)]
    pub priority: i32,
    /// Key into the host's template registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Whether the header text may wrap.
    #[serde(default)]
    pub header_wrap: bool,
}

impl Column {
    /// Create a column with the given key and title.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            title: title.into(),
            header_label: None,
            width: None,
            min_width: None,
            visible: true,
            orderable: true,
            searchable: true,
            priority: 0,
            template_id: None,
            header_wrap: false,
        }
    }

    /// Header text: `header_label` if set, otherwise `title`.
    pub fn label(&self) -> &str {
        self.header_label.as_deref().unwrap_or(&self.title)
    }

    pub fn header_label(mut self, label: impl Into<String>) -> Self {
        self.header_label = Some(label.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, width: u32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Start hidden (shorthand for `.visible(false)`).
    pub fn hidden(self) -> Self {
        self.visible(false)
    }

    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn template_id(mut self, id: impl Into<String>) -> Self {
        self.template_id = Some(id.into());
        self
    }

    pub fn header_wrap(mut self, wrap: bool) -> Self {
        self.header_wrap = wrap;
        self
    }
}

/// Columns plus rows, as supplied by the host.
///
/// `total_records` is only meaningful in server-side mode, where `rows` is a
/// single page and the total comes from the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataConfig<R> {
    pub columns: Vec<Column>,
    pub rows: Vec<R>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<usize>,
}

impl<R> DataConfig<R> {
    pub fn new(columns: Vec<Column>, rows: Vec<R>) -> Self {
        DataConfig {
            columns,
            rows,
            total_records: None,
        }
    }

    pub fn total_records(mut self, total: usize) -> Self {
        self.total_records = Some(total);
        self
    }
}

impl<R> Default for DataConfig<R> {
    fn default() -> Self {
        DataConfig {
            columns: Vec::new(),
            rows: Vec::new(),
            total_records: None,
        }
    }
}
