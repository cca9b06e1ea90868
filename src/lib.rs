pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{FallbackSource, JsonFileSource, LocalStorage, SheetSource};
pub use crate::core::selector::{select, Selection, SelectionRequest, Selector};
pub use crate::domain::model::{Density, EnrichedProductRecord, ProductRecord, UserInput};
pub use crate::utils::error::{Result, SelectorError};
