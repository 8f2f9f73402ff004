//! Query parameters of the table: pagination, sort and column filters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mvi::UiState;

/// Sort direction of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Numeric sort order as used by table widgets: 1 ascending, -1 descending.
    pub fn code(self) -> i8 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }

    /// Any non-negative code is ascending.
    pub fn from_code(code: i8) -> Self {
        if code < 0 {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_query(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Comparison requested for a column filter.
///
/// The remote service interprets the mode; it is not enforced locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    StartsWith,
    Contains,
    Equals,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchMode::StartsWith => "starts_with",
            MatchMode::Contains => "contains",
            MatchMode::Equals => "equals",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: "id".to_string(),
            direction: SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    /// `None` means the filter is inactive and left out of the query.
    pub value: Option<String>,
    pub match_mode: MatchMode,
}

impl FilterSpec {
    pub fn inactive(match_mode: MatchMode) -> Self {
        Self {
            value: None,
            match_mode,
        }
    }

    /// The value to send, if the filter is active.
    pub fn active_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Everything the user currently asked to see.
///
/// Replaced wholesale on every interaction, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParameters {
    pub offset: usize,
    pub page_size: usize,
    pub sort: SortSpec,
    pub filters: BTreeMap<String, FilterSpec>,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: 10,
            sort: SortSpec::default(),
            filters: BTreeMap::new(),
        }
    }
}

impl UiState for ViewParameters {}

impl ViewParameters {
    /// Active filters in column order.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter_map(|(column, spec)| spec.active_value().map(|v| (column.as_str(), v)))
    }

    /// Zero-based page index of the current offset.
    pub fn page_index(&self) -> usize {
        self.offset / self.page_size.max(1)
    }
}

/// Identity of one `ViewParameters` value. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Version(u64);

impl Version {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A versioned parameter set: the sole input of one query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamsSnapshot {
    pub version: Version,
    pub params: ViewParameters,
}
