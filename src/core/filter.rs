//! Binary compatibility check over fitted catalog records.

use crate::domain::model::{EnrichedProductRecord, Recommendation, UserInput};

/// Why a record was left out. The first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    TooNarrow,
    NoOpening,
    GirthOutOfRange,
    LengthOutOfRange,
    DensityUnsupported,
    MinimumTooLong,
}

/// Checks one record against every predicate.
pub fn check(record: &EnrichedProductRecord, input: &UserInput) -> Result<(), Rejection> {
    if record.max_internal_length < input.length {
        return Err(Rejection::TooShort);
    }
    if input.diameter >= record.external_diameter {
        return Err(Rejection::TooNarrow);
    }
    // An out-of-domain diameter has no concrete opening either.
    if !matches!(record.recommended_diameter, Recommendation::Opening(_)) {
        return Err(Rejection::NoOpening);
    }
    if !input.girth_range.contains(record.record.girth) {
        return Err(Rejection::GirthOutOfRange);
    }
    if !input.length_range.contains(record.record.length) {
        return Err(Rejection::LengthOutOfRange);
    }
    if let Some(density) = input.selected_density {
        if !record.supported_densities.contains(&density) {
            return Err(Rejection::DensityUnsupported);
        }
        if record.min_internal_length > input.length {
            return Err(Rejection::MinimumTooLong);
        }
    }
    Ok(())
}

pub fn is_compatible(record: &EnrichedProductRecord, input: &UserInput) -> bool {
    check(record, input).is_ok()
}

/// Compatible subset of `records`, in catalog order.
pub fn filter(records: Vec<EnrichedProductRecord>, input: &UserInput) -> Vec<EnrichedProductRecord> {
    let total = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|record| match check(record, input) {
            Ok(()) => true,
            Err(reason) => {
                tracing::trace!(model = %record.record.model, ?reason, "excluded");
                false
            }
        })
        .collect();

    tracing::debug!("{} of {} products are compatible", kept.len(), total);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derived::enrich;
    use crate::domain::model::{Density, MeasureRange, ProductRecord, WornGirth};

    fn fitted(record: ProductRecord, density: Option<Density>, opening: f64) -> EnrichedProductRecord {
        let mut enriched = enrich(&record, density);
        enriched.recommended_diameter = Recommendation::Opening(opening);
        enriched.girth_when_worn = WornGirth::Circumference(6.0);
        enriched
    }

    fn input(diameter: f64, length: f64) -> UserInput {
        UserInput::new(
            diameter,
            length,
            MeasureRange::new(0.0, 100.0),
            MeasureRange::new(0.0, 100.0),
        )
    }

    #[test]
    fn test_max_internal_length_bound_is_inclusive() {
        let record = fitted(ProductRecord::new("Classic", 8.0, 5.5, "medium"), None, 1.0);
        assert!(is_compatible(&record, &input(1.4, 7.0)));
        assert_eq!(check(&record, &input(1.4, 7.25)), Err(Rejection::TooShort));
    }

    #[test]
    fn test_user_must_be_narrower_than_sleeve() {
        let record = fitted(ProductRecord::new("Classic", 8.0, 5.5, "medium"), None, 1.0);
        assert_eq!(check(&record, &input(1.751, 6.0)), Err(Rejection::TooNarrow));
        assert!(is_compatible(&record, &input(1.75, 6.0)));
    }

    #[test]
    fn test_missing_opening_excludes() {
        let mut record = fitted(ProductRecord::new("Classic", 8.0, 5.5, "medium"), None, 1.0);
        record.recommended_diameter = Recommendation::NotApplicable;
        assert_eq!(check(&record, &input(1.4, 6.0)), Err(Rejection::NoOpening));

        record.recommended_diameter = Recommendation::NoMatch;
        assert_eq!(check(&record, &input(1.4, 6.0)), Err(Rejection::NoOpening));
    }

    #[test]
    fn test_user_ranges() {
        let record = fitted(ProductRecord::new("Classic", 8.0, 5.5, "medium"), None, 1.0);

        let mut narrow = input(1.4, 6.0);
        narrow.girth_range = MeasureRange::new(5.5, 5.5);
        assert!(is_compatible(&record, &narrow));

        narrow.girth_range = MeasureRange::new(5.6, 7.0);
        assert_eq!(check(&record, &narrow), Err(Rejection::GirthOutOfRange));

        let mut short = input(1.4, 6.0);
        short.length_range = MeasureRange::new(6.0, 7.5);
        assert_eq!(check(&record, &short), Err(Rejection::LengthOutOfRange));
    }

    #[test]
    fn test_density_checks_only_when_density_selected() {
        let raw = ProductRecord::new("Classic", 8.0, 5.5, "medium")
            .with_capacity(Density::Soft, 7.5)
            .with_min_internal_length(6.5);

        let plain = fitted(raw.clone(), None, 1.0);
        assert!(is_compatible(&plain, &input(1.4, 6.0)));

        let soft = fitted(raw.clone(), Some(Density::Soft), 1.0);
        assert_eq!(
            check(&soft, &input(1.4, 6.0).with_density(Density::Soft)),
            Err(Rejection::MinimumTooLong)
        );
        assert!(is_compatible(&soft, &input(1.4, 7.0).with_density(Density::Soft)));

        let firm = fitted(raw, Some(Density::Firm), 1.0);
        assert_eq!(
            check(&firm, &input(1.4, 7.0).with_density(Density::Firm)),
            Err(Rejection::DensityUnsupported)
        );
    }

    #[test]
    fn test_filter_keeps_catalog_order() {
        let records = vec![
            fitted(ProductRecord::new("B", 8.0, 6.0, "low"), None, 1.0),
            fitted(ProductRecord::new("Short", 5.0, 6.0, "low"), None, 1.0),
            fitted(ProductRecord::new("A", 9.0, 6.5, "low"), None, 1.0),
        ];

        let kept = filter(records, &input(1.4, 6.0));
        let models: Vec<_> = kept.iter().map(|r| r.record.model.as_str()).collect();
        assert_eq!(models, vec!["B", "A"]);
    }
}
