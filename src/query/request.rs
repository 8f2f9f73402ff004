//! Mapping of view parameters onto the remote query string.

use crate::view::ViewParameters;

/// One remote query: `limit`, `skip`, `sort` and one parameter per active
/// filter keyed by column name.
///
/// Match modes are not encoded; the remote service decides how it compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub limit: usize,
    pub skip: usize,
    /// `"<field>:<asc|desc>"`
    pub sort: String,
    pub filters: Vec<(String, String)>,
}

impl QueryRequest {
    pub fn from_params(params: &ViewParameters) -> Self {
        Self {
            limit: params.page_size,
            skip: params.offset,
            sort: format!("{}:{}", params.sort.field, params.sort.direction.as_query()),
            filters: params
                .active_filters()
                .map(|(column, value)| (column.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Query parameters in send order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("skip".to_string(), self.skip.to_string()),
            ("sort".to_string(), self.sort.clone()),
        ];
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}
