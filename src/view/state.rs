//! The single source of truth for what the user currently wants to see.

use std::sync::Arc;

use crate::mvi::Reducer;

use super::intent::ViewIntent;
use super::params::{MatchMode, ParamsSnapshot, SortDirection, Version, ViewParameters};
use super::reducer::ViewReducer;
use super::schema::{ValidationError, ViewSchema};

/// Versioned owner of the current [`ViewParameters`].
///
/// Every accepted intent replaces the parameters and bumps the version, even
/// when the new value equals the old one. Rejected intents change nothing.
/// Nothing here touches the network.
#[derive(Debug, Clone)]
pub struct ViewState {
    schema: Arc<ViewSchema>,
    params: ViewParameters,
    version: Version,
}

impl ViewState {
    pub fn new(schema: Arc<ViewSchema>) -> Self {
        let params = schema.initial_parameters();
        Self {
            schema,
            params,
            version: Version::default(),
        }
    }

    pub fn schema(&self) -> &Arc<ViewSchema> {
        &self.schema
    }

    pub fn params(&self) -> &ViewParameters {
        &self.params
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn snapshot(&self) -> ParamsSnapshot {
        ParamsSnapshot {
            version: self.version,
            params: self.params.clone(),
        }
    }

    /// Validates `intent`, reduces it and publishes a new version.
    pub fn apply(&mut self, intent: ViewIntent) -> Result<ParamsSnapshot, ValidationError> {
        self.validate(&intent)?;
        let params = std::mem::take(&mut self.params);
        self.params = ViewReducer::reduce(params, intent);
        self.version = self.version.next();
        Ok(self.snapshot())
    }

    pub fn set_page(
        &mut self,
        offset: usize,
        page_size: usize,
    ) -> Result<ParamsSnapshot, ValidationError> {
        self.apply(ViewIntent::SetPage { offset, page_size })
    }

    pub fn set_sort(
        &mut self,
        field: &str,
        direction: SortDirection,
    ) -> Result<ParamsSnapshot, ValidationError> {
        self.apply(ViewIntent::SetSort {
            field: field.to_string(),
            direction,
        })
    }

    pub fn set_filter(
        &mut self,
        column: &str,
        value: Option<&str>,
        match_mode: MatchMode,
    ) -> Result<ParamsSnapshot, ValidationError> {
        self.apply(ViewIntent::SetFilter {
            column: column.to_string(),
            value: value.map(str::to_string),
            match_mode,
        })
    }

    pub fn refresh(&mut self) -> ParamsSnapshot {
        self.version = self.version.next();
        self.snapshot()
    }

    fn validate(&self, intent: &ViewIntent) -> Result<(), ValidationError> {
        match intent {
            ViewIntent::SetPage { page_size, .. } => self.schema.check_page(*page_size),
            ViewIntent::SetSort { field, .. } => self.schema.check_sort(field),
            ViewIntent::SetFilter {
                column,
                value,
                match_mode,
            } => self
                .schema
                .check_filter(column, value.as_deref(), *match_mode),
            ViewIntent::Refresh => Ok(()),
        }
    }
}
