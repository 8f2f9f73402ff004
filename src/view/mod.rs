//! Table view model: parameters, their versioned owner, and results.

mod intent;
mod params;
mod record;
mod reducer;
mod result;
mod schema;
mod state;

pub use intent::ViewIntent;
pub use params::{
    FilterSpec, MatchMode, ParamsSnapshot, SortDirection, SortSpec, Version, ViewParameters,
};
pub use record::{Record, RemoteAddress, RemoteCompany, RemotePage, RemoteUser};
pub use reducer::ViewReducer;
pub use result::{ViewResult, ViewStatus};
pub use schema::{ColumnFilter, ColumnSpec, ValidationError, ViewSchema};
pub use state::ViewState;
