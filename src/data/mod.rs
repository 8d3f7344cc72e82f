//! Data module - table loading, typed rows and filtering

mod filter;
mod loader;
mod model;

pub use filter::Filters;
pub use loader::{LoaderError, ProjectTable, Source, TableLoader, DEFAULT_SOURCE, SOURCE_ENV};
pub use model::{capitalize, split_tokens, ColumnSel, Header, Project, Scale, Status};
