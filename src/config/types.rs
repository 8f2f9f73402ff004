use serde::{Deserialize, Serialize};

use crate::view::{MatchMode, SortDirection};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnConfig>,
}

/// Where and how records are fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Collection endpoint (e.g., "https://dummyjson.com/users").
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Pagination, sort and request-volume settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Rows-per-page choices offered by the paginator.
    #[serde(default = "default_page_sizes")]
    pub page_sizes: Vec<usize>,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_sort_field")]
    pub default_sort_field: String,
    #[serde(default)]
    pub default_sort_direction: SortDirection,
    /// Delay before a filter keystroke hits the network (0 disables).
    #[serde(default = "default_filter_debounce_ms")]
    pub filter_debounce_ms: u64,
    /// Abort the in-flight request when a newer one is issued.
    #[serde(default = "default_abort_superseded")]
    pub abort_superseded: bool,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Record field shown in this column (e.g., "firstName").
    pub field: String,
    /// Column title.
    pub header: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filter: Option<FilterConfig>,
}

/// Row filter attached to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub match_mode: MatchMode,
    /// Fixed choices (a dropdown); free text when absent.
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

fn default_endpoint() -> String {
    "https://dummyjson.com/users".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_sizes() -> Vec<usize> {
    vec![10, 20, 30]
}

fn default_page_size() -> usize {
    10
}

fn default_sort_field() -> String {
    "id".to_string()
}

fn default_filter_debounce_ms() -> u64 {
    250
}

fn default_abort_superseded() -> bool {
    true
}

fn column(field: &str, header: &str, filter: Option<FilterConfig>) -> ColumnConfig {
    ColumnConfig {
        field: field.to_string(),
        header: header.to_string(),
        sortable: true,
        filter,
    }
}

fn text_filter(match_mode: MatchMode) -> Option<FilterConfig> {
    Some(FilterConfig {
        match_mode,
        options: None,
    })
}

fn default_columns() -> Vec<ColumnConfig> {
    vec![
        column("id", "ID", None),
        column("firstName", "First Name", text_filter(MatchMode::StartsWith)),
        column("lastName", "Last Name", text_filter(MatchMode::StartsWith)),
        column("age", "Age", None),
        column(
            "gender",
            "Gender",
            Some(FilterConfig {
                match_mode: MatchMode::Equals,
                options: Some(vec!["male".to_string(), "female".to_string()]),
            }),
        ),
        column("address", "Country", text_filter(MatchMode::Contains)),
        column("email", "Email", None),
    ]
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_sizes: default_page_sizes(),
            default_page_size: default_page_size(),
            default_sort_field: default_sort_field(),
            default_sort_direction: SortDirection::Asc,
            filter_debounce_ms: default_filter_debounce_ms(),
            abort_superseded: default_abort_superseded(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            view: ViewConfig::default(),
            columns: default_columns(),
        }
    }
}
