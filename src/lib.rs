//! Server-driven table viewer.
//!
//! A [`view::ViewState`] owns the versioned query parameters; a
//! [`query::QueryController`] issues one request per version and applies only
//! the answer for the latest one. The [`service`] module runs both in a single
//! task, and [`ui`] renders it in the terminal.

pub mod config;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod query;
pub mod service;
pub mod ui;
pub mod view;

pub use error::DataViewError;
