//! Static table layout: which columns exist, sort and filter, and the
//! paginator's page sizes. Fixed at startup.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::Config;
use crate::view::params::{FilterSpec, MatchMode, SortSpec, ViewParameters};

/// A caller passed a value outside the table's contract.
///
/// Rejected before the parameters change or anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Column '{field}' is not sortable")]
    UnsortableField { field: String },

    #[error("Page size {page_size} is not one of {allowed:?}")]
    UnsupportedPageSize { page_size: usize, allowed: Vec<usize> },

    #[error("Column '{column}' is not filterable")]
    UnfilterableColumn { column: String },

    #[error("Column '{column}' filters with {expected}, not {requested}")]
    MatchModeMismatch {
        column: String,
        expected: MatchMode,
        requested: MatchMode,
    },

    #[error("'{value}' is not a filter option of column '{column}'")]
    UnknownFilterOption { column: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub match_mode: MatchMode,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: String,
    pub header: String,
    pub sortable: bool,
    pub filter: Option<ColumnFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSchema {
    pub columns: Vec<ColumnSpec>,
    pub page_sizes: Vec<usize>,
    pub default_page_size: usize,
    pub default_sort: SortSpec,
}

impl ViewSchema {
    /// Builds the schema from a validated config.
    pub fn from_config(config: &Config) -> Self {
        let columns = config
            .columns
            .iter()
            .map(|c| ColumnSpec {
                field: c.field.clone(),
                header: c.header.clone(),
                sortable: c.sortable,
                filter: c.filter.as_ref().map(|f| ColumnFilter {
                    match_mode: f.match_mode,
                    options: f.options.clone(),
                }),
            })
            .collect();

        Self {
            columns,
            page_sizes: config.view.page_sizes.clone(),
            default_page_size: config.view.default_page_size,
            default_sort: SortSpec {
                field: config.view.default_sort_field.clone(),
                direction: config.view.default_sort_direction,
            },
        }
    }

    pub fn column(&self, field: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Parameters at startup: first page, default sort, every filter inactive.
    pub fn initial_parameters(&self) -> ViewParameters {
        let filters: BTreeMap<String, FilterSpec> = self
            .columns
            .iter()
            .filter_map(|c| {
                c.filter
                    .as_ref()
                    .map(|f| (c.field.clone(), FilterSpec::inactive(f.match_mode)))
            })
            .collect();

        ViewParameters {
            offset: 0,
            page_size: self.default_page_size,
            sort: self.default_sort.clone(),
            filters,
        }
    }

    pub fn check_page(&self, page_size: usize) -> Result<(), ValidationError> {
        if self.page_sizes.contains(&page_size) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedPageSize {
                page_size,
                allowed: self.page_sizes.clone(),
            })
        }
    }

    pub fn check_sort(&self, field: &str) -> Result<(), ValidationError> {
        match self.column(field) {
            Some(column) if column.sortable => Ok(()),
            _ => Err(ValidationError::UnsortableField {
                field: field.to_string(),
            }),
        }
    }

    pub fn check_filter(
        &self,
        column: &str,
        value: Option<&str>,
        match_mode: MatchMode,
    ) -> Result<(), ValidationError> {
        let Some(filter) = self.column(column).and_then(|c| c.filter.as_ref()) else {
            return Err(ValidationError::UnfilterableColumn {
                column: column.to_string(),
            });
        };

        if filter.match_mode != match_mode {
            return Err(ValidationError::MatchModeMismatch {
                column: column.to_string(),
                expected: filter.match_mode,
                requested: match_mode,
            });
        }

        if let (Some(options), Some(value)) = (&filter.options, value.filter(|v| !v.is_empty())) {
            if !options.iter().any(|o| o == value) {
                return Err(ValidationError::UnknownFilterOption {
                    column: column.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Default for ViewSchema {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
