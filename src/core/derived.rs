//! Per-product fields derived from the raw catalog columns.

use crate::core::grid::round_to;
use crate::domain::model::{
    Density, EnrichedProductRecord, ProductRecord, Recommendation, WornGirth,
};
use std::collections::BTreeSet;
use std::f64::consts::PI;

/// Fixed max internal length for the Prizefighter line.
pub const PRIZEFIGHTER_MAX_INTERNAL_LENGTH: f64 = 6.5;

/// `girth / π`, kept to three decimals.
pub fn external_diameter(girth: f64) -> f64 {
    round_to(girth / PI, 3)
}

pub fn supported_densities(record: &ProductRecord) -> BTreeSet<Density> {
    Density::ALL
        .into_iter()
        .filter(|density| record.capacity(*density).is_some())
        .collect()
}

/// Max internal length when the catalog has no usable per-density value.
///
/// Rules are checked in order: girthy models, curved categories, the
/// Prizefighter line, then everything else.
pub fn heuristic_max_internal_length(record: &ProductRecord) -> f64 {
    let model = record.model.to_lowercase();
    let category = record.girth_category.to_lowercase();

    if model.contains("girthy") {
        record.length - 0.5
    } else if category.contains("curved") {
        record.length - 2.0
    } else if model.contains("prizefighter") {
        PRIZEFIGHTER_MAX_INTERNAL_LENGTH
    } else {
        record.length - 1.0
    }
}

pub fn max_internal_length(record: &ProductRecord, selected_density: Option<Density>) -> f64 {
    selected_density
        .and_then(|density| record.capacity(density))
        .unwrap_or_else(|| heuristic_max_internal_length(record))
}

pub fn min_internal_length(record: &ProductRecord) -> f64 {
    record
        .min_internal_length
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Computes every user-independent field for `record`. The input is left
/// untouched; fit fields are filled in later per user.
pub fn enrich(record: &ProductRecord, selected_density: Option<Density>) -> EnrichedProductRecord {
    let enriched = EnrichedProductRecord {
        record: record.clone(),
        external_diameter: external_diameter(record.girth),
        max_internal_length: max_internal_length(record, selected_density),
        min_internal_length: min_internal_length(record),
        supported_densities: supported_densities(record),
        recommended_diameter: Recommendation::NotApplicable,
        recommended_internal_dimensions: String::new(),
        girth_when_worn: WornGirth::NotApplicable,
    };

    tracing::trace!(
        model = %record.model,
        diameter = enriched.external_diameter,
        max_internal_length = enriched.max_internal_length,
        "derived product fields"
    );

    enriched
}
