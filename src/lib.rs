//! Normalizes multi-year vacation rental booking and expense spreadsheets into typed,
//! validated records.
//!
//! Raw sheet grids come from a `Sheet` (see `api`), are optionally cached, and are turned into
//! `Reservation` and `Expense` records by the row transformers using a per-year column layout.
//! `Pipeline` runs this for a set of years and returns a `ResultSet`.

pub mod api;
pub mod args;
pub mod cache;
pub mod commands;
mod config;
mod error;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod parse;
mod pipeline;
pub mod sources;
pub mod transform;
mod utils;


pub use api::Mode;
pub use config::Config;
pub use error::{Error, PipelineError, Result};
pub use pipeline::{Pipeline, ValidationPolicy};
