use crate::core::bounds::CatalogBounds;
use crate::core::derived::enrich;
use crate::core::filter::filter;
use crate::core::grid::{display_measure, round_to, LENGTH_PRECISION};
use crate::core::recommendation::recommend;
use crate::core::worn_girth::worn_girth;
use crate::domain::model::{Density, EnrichedProductRecord, MeasureRange, ProductRecord, UserInput};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, SelectorError};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fills in the per-user fields of an enriched record.
pub fn fit(mut record: EnrichedProductRecord, input: &UserInput) -> EnrichedProductRecord {
    let recommended = recommend(input.diameter, &record.record.girth_category);

    record.recommended_diameter = recommended;
    let opening = match recommended.diameter() {
        Some(diameter) => display_measure(diameter),
        None => recommended.to_string(),
    };
    record.recommended_internal_dimensions = format!(
        "{} x {}",
        display_measure(round_to(input.length, LENGTH_PRECISION)),
        opening
    );
    record.girth_when_worn = worn_girth(recommended, record.external_diameter, input.diameter);
    record
}

/// One full pass over the catalog: enrich, fit, filter.
pub fn select(catalog: &[ProductRecord], input: &UserInput) -> Vec<EnrichedProductRecord> {
    let fitted = catalog
        .iter()
        .map(|record| fit(enrich(record, input.selected_density), input))
        .collect();
    filter(fitted, input)
}

/// Either side of a user range; a missing side takes the catalog bound.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeOverride {
    pub fn resolve(&self, default: MeasureRange) -> MeasureRange {
        MeasureRange::new(
            self.min.unwrap_or(default.min),
            self.max.unwrap_or(default.max),
        )
    }
}

impl From<MeasureRange> for RangeOverride {
    fn from(range: MeasureRange) -> Self {
        Self {
            min: Some(range.min),
            max: Some(range.max),
        }
    }
}

/// User measurements with optional range overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    pub diameter: f64,
    pub length: f64,
    pub density: Option<Density>,
    pub girth_range: RangeOverride,
    pub length_range: RangeOverride,
}

impl SelectionRequest {
    pub fn new(diameter: f64, length: f64) -> Self {
        Self {
            diameter,
            length,
            density: None,
            girth_range: RangeOverride::default(),
            length_range: RangeOverride::default(),
        }
    }

    pub fn resolve(&self, bounds: &CatalogBounds) -> UserInput {
        UserInput {
            diameter: self.diameter,
            length: self.length,
            selected_density: self.density,
            girth_range: self.girth_range.resolve(bounds.girth),
            length_range: self.length_range.resolve(bounds.length),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub generated_at: DateTime<Utc>,
    pub input: UserInput,
    pub bounds: CatalogBounds,
    pub catalog_size: usize,
    pub matches: Vec<EnrichedProductRecord>,
}

impl Selection {
    pub fn from_catalog(catalog: &[ProductRecord], request: &SelectionRequest) -> Result<Self> {
        let bounds = CatalogBounds::from_records(catalog).ok_or(SelectorError::EmptyCatalog)?;
        let input = request.resolve(&bounds);
        input.validate()?;

        let matches = select(catalog, &input);

        Ok(Self {
            generated_at: Utc::now(),
            input,
            bounds,
            catalog_size: catalog.len(),
            matches,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Loads the catalog from a source and runs a selection over it.
pub struct Selector<C: CatalogSource> {
    source: C,
}

impl<C: CatalogSource> Selector<C> {
    pub fn new(source: C) -> Self {
        Self { source }
    }

    pub async fn load_catalog(&self) -> Result<Vec<ProductRecord>> {
        tracing::info!("Loading catalog from {}", self.source.name());
        let catalog = self.source.load().await?;
        if catalog.is_empty() {
            return Err(SelectorError::EmptyCatalog);
        }
        tracing::info!("Loaded {} products", catalog.len());
        Ok(catalog)
    }

    pub async fn run(&self, request: &SelectionRequest) -> Result<Selection> {
        let catalog = self.load_catalog().await?;
        let selection = Selection::from_catalog(&catalog, request)?;
        tracing::info!(
            "{} compatible sleeves for diameter {} and length {}",
            selection.matches.len(),
            selection.input.diameter,
            selection.input.length
        );
        Ok(selection)
    }
}
