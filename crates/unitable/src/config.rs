//! Grid configuration and its resolution.
//!
//! [`GridConfig`] is what a host supplies: every option is optional, and the
//! serde field names match the option names hosts already use in JSON/YAML
//! (`pageLength`, `serverSide`, `storageKey`, ...). [`GridConfig::resolve`]
//! merges it over the documented defaults into a [`ResolvedConfig`], where
//! every option has a concrete value.
//!
//! Resolution is pure and idempotent:
//!
//! ```rust
//! use unitable::{GridConfig, OverflowMode};
//!
//! let config = GridConfig::new().page_length(5).responsive(true);
//! let resolved = config.resolve();
//!
//! assert_eq!(resolved.page_length, 5);
//! assert_eq!(resolved.overflow, OverflowMode::Responsive);
//! assert_eq!(GridConfig::from(&resolved).resolve(), resolved);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::state::SortDirection;

/// Page length used when none is configured.
pub const DEFAULT_PAGE_LENGTH: usize = 10;

/// Page length choices offered when none are configured.
pub const DEFAULT_PAGE_LENGTH_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// How the grid handles columns that do not fit its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowMode {
    /// Let the table grow past its container.
    #[default]
    Visible,
    /// Scroll horizontally inside the container.
    Scroll,
    /// Hide low-priority columns until the table fits.
    Responsive,
}

/// Presentation of the paging buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagingControlKind {
    #[default]
    Icons,
    Text,
}

/// Initial sort applied before the user picks one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Partial paging-controls options, merged field by field over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagingControlsConfig {
    pub first_last: Option<bool>,
    pub prev_next: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<PagingControlKind>,
    pub first_text: Option<String>,
    pub last_text: Option<String>,
    pub prev_text: Option<String>,
    pub next_text: Option<String>,
}

/// Resolved paging-controls options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingControls {
    pub first_last: bool,
    pub prev_next: bool,
    #[serde(rename = "type")]
    pub kind: PagingControlKind,
    pub first_text: String,
    pub last_text: String,
    pub prev_text: String,
    pub next_text: String,
}

impl Default for PagingControls {
    fn default() -> Self {
        PagingControls {
            first_last: false,
            prev_next: true,
            kind: PagingControlKind::Icons,
            first_text: "First".to_string(),
            last_text: "Last".to_string(),
            prev_text: "Previous".to_string(),
            next_text: "Next".to_string(),
        }
    }
}

impl PagingControlsConfig {
    fn resolve(&self) -> PagingControls {
        let base = PagingControls::default();
        PagingControls {
            first_last: self.first_last.unwrap_or(base.first_last),
            prev_next: self.prev_next.unwrap_or(base.prev_next),
            kind: self.kind.unwrap_or(base.kind),
            first_text: self.first_text.clone().unwrap_or(base.first_text),
            last_text: self.last_text.clone().unwrap_or(base.last_text),
            prev_text: self.prev_text.clone().unwrap_or(base.prev_text),
            next_text: self.next_text.clone().unwrap_or(base.next_text),
        }
    }
}

impl From<&PagingControls> for PagingControlsConfig {
    fn from(controls: &PagingControls) -> Self {
        PagingControlsConfig {
            first_last: Some(controls.first_last),
            prev_next: Some(controls.prev_next),
            kind: Some(controls.kind),
            first_text: Some(controls.first_text.clone()),
            last_text: Some(controls.last_text.clone()),
            prev_text: Some(controls.prev_text.clone()),
            next_text: Some(controls.next_text.clone()),
        }
    }
}

/// Host-supplied grid options. Unset options take their documented default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    pub paging: Option<bool>,
    pub searching: Option<bool>,
    pub col_vis: Option<bool>,
    pub page_length: Option<usize>,
    /// Deprecated: use `overflow: responsive`.
    pub responsive: Option<bool>,
    pub overflow: Option<OverflowMode>,
    pub server_side: Option<bool>,
    pub default_sort: Option<SortState>,
    pub manual_search: Option<bool>,
    pub show_context_menu: Option<bool>,
    pub storage_key: Option<String>,
    pub auto_save_state: Option<bool>,
    pub show_save_controls: Option<bool>,
    pub page_length_options: Option<Vec<usize>>,
    pub paging_controls: Option<PagingControlsConfig>,
}

/// Fully populated grid options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub paging: bool,
    pub searching: bool,
    pub col_vis: bool,
    pub page_length: usize,
    pub overflow: OverflowMode,
    pub server_side: bool,
    pub default_sort: Option<SortState>,
    pub manual_search: bool,
    pub show_context_menu: bool,
    pub storage_key: Option<String>,
    pub auto_save_state: bool,
    pub show_save_controls: bool,
    pub page_length_options: Vec<usize>,
    pub paging_controls: PagingControls,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        GridConfig::default().resolve()
    }
}

impl ResolvedConfig {
    /// Page length choices, falling back to the defaults when none are set.
    pub fn effective_page_length_options(&self) -> &[usize] {
        if self.page_length_options.is_empty() {
            &DEFAULT_PAGE_LENGTH_OPTIONS
        } else {
            &self.page_length_options
        }
    }

    /// Returns `true` if the responsive layout engine should run.
    pub fn is_responsive(&self) -> bool {
        self.overflow == OverflowMode::Responsive
    }

    /// Returns `true` if view state should be written on every change.
    pub fn persists_automatically(&self) -> bool {
        self.auto_save_state && self.storage_key.is_some()
    }
}

impl GridConfig {
    /// Creates an empty config (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GridError::Config {
            format: "JSON",
            message: e.to_string(),
        })
    }

    /// Parses a YAML config document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| GridError::Config {
            format: "YAML",
            message: e.to_string(),
        })
    }

    /// Merges this config over the defaults.
    ///
    /// The deprecated `responsive` flag selects [`OverflowMode::Responsive`]
    /// only when no explicit `overflow` is given. A zero page length is not a
    /// usable page size and resolves to the default.
    pub fn resolve(&self) -> ResolvedConfig {
        let overflow = match (self.overflow, self.responsive) {
            (Some(mode), _) => mode,
            (None, Some(true)) => OverflowMode::Responsive,
            (None, _) => OverflowMode::Visible,
        };

        ResolvedConfig {
            paging: self.paging.unwrap_or(true),
            searching: self.searching.unwrap_or(true),
            col_vis: self.col_vis.unwrap_or(true),
            page_length: self
                .page_length
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_LENGTH),
            overflow,
            server_side: self.server_side.unwrap_or(false),
            default_sort: self.default_sort.clone(),
            manual_search: self.manual_search.unwrap_or(false),
            show_context_menu: self.show_context_menu.unwrap_or(false),
            storage_key: self.storage_key.clone(),
            auto_save_state: self.auto_save_state.unwrap_or(true),
            show_save_controls: self.show_save_controls.unwrap_or(false),
            page_length_options: self
                .page_length_options
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE_LENGTH_OPTIONS.to_vec()),
            paging_controls: self
                .paging_controls
                .as_ref()
                .map(PagingControlsConfig::resolve)
                .unwrap_or_default(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn paging(mut self, enabled: bool) -> Self {
        self.paging = Some(enabled);
        self
    }

    pub fn searching(mut self, enabled: bool) -> Self {
        self.searching = Some(enabled);
        self
    }

    pub fn col_vis(mut self, enabled: bool) -> Self {
        self.col_vis = Some(enabled);
        self
    }

    pub fn page_length(mut self, length: usize) -> Self {
        self.page_length = Some(length);
        self
    }

    /// Deprecated flag kept for older hosts; prefer [`GridConfig::overflow`].
    pub fn responsive(mut self, enabled: bool) -> Self {
        self.responsive = Some(enabled);
        self
    }

    pub fn overflow(mut self, mode: OverflowMode) -> Self {
        self.overflow = Some(mode);
        self
    }

    pub fn server_side(mut self, enabled: bool) -> Self {
        self.server_side = Some(enabled);
        self
    }

    pub fn default_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort = Some(SortState::new(column, direction));
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    pub fn auto_save_state(mut self, enabled: bool) -> Self {
        self.auto_save_state = Some(enabled);
        self
    }

    pub fn show_save_controls(mut self, enabled: bool) -> Self {
        self.show_save_controls = Some(enabled);
        self
    }

    pub fn page_length_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_length_options = Some(options.into());
        self
    }

    pub fn paging_controls(mut self, controls: PagingControlsConfig) -> Self {
        self.paging_controls = Some(controls);
        self
    }
}

impl From<&ResolvedConfig> for GridConfig {
    fn from(resolved: &ResolvedConfig) -> Self {
        GridConfig {
            paging: Some(resolved.paging),
            searching: Some(resolved.searching),
            col_vis: Some(resolved.col_vis),
            page_length: Some(resolved.page_length),
            responsive: None,
            overflow: Some(resolved.overflow),
            server_side: Some(resolved.server_side),
            default_sort: resolved.default_sort.clone(),
            manual_search: Some(resolved.manual_search),
            show_context_menu: Some(resolved.show_context_menu),
            storage_key: resolved.storage_key.clone(),
            auto_save_state: Some(resolved.auto_save_state),
            show_save_controls: Some(resolved.show_save_controls),
            page_length_options: Some(resolved.page_length_options.clone()),
            paging_controls: Some(PagingControlsConfig::from(&resolved.paging_controls)),
        }
    }
}
