pub mod bounds;
pub mod derived;
pub mod filter;
pub mod grid;
pub mod recommendation;
pub mod report;
pub mod selector;
pub mod worn_girth;

pub use crate::domain::model::{
    Density, EnrichedProductRecord, MeasureRange, ProductRecord, Recommendation, UserInput,
    WornGirth,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
