//! Configuration: remote endpoint, paginator choices and column layout.

mod loader;
mod types;

pub use loader::{ConfigError, ConfigOverrides};
pub use types::{ColumnConfig, Config, FilterConfig, RemoteConfig, ViewConfig};
