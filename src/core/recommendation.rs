//! Opening-size lookup: user diameter and girth category to a recommended
//! internal opening diameter.

use crate::domain::model::Recommendation;

/// Half-open interval `[min, max)` of user diameters and what it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningRange {
    pub min: f64,
    pub max: f64,
    pub recommendation: Recommendation,
}

const fn opening(min: f64, max: f64, diameter: f64) -> OpeningRange {
    OpeningRange {
        min,
        max,
        recommendation: Recommendation::Opening(diameter),
    }
}

const fn not_applicable(min: f64, max: f64) -> OpeningRange {
    OpeningRange {
        min,
        max,
        recommendation: Recommendation::NotApplicable,
    }
}

/// Low and medium girth categories.
pub const SNUG_TABLE: [OpeningRange; 6] = [
    opening(1.0, 1.25, 0.9),
    opening(1.25, 1.5, 1.0),
    opening(1.5, 1.825, 1.125),
    opening(1.825, 2.0, 1.25),
    opening(2.0, 2.15, 1.375),
    not_applicable(2.15, 100.0),
];

/// High girth and every unrecognised category.
pub const WIDE_TABLE: [OpeningRange; 6] = [
    not_applicable(1.0, 1.25),
    opening(1.25, 1.4, 1.0),
    opening(1.4, 1.6, 1.125),
    opening(1.6, 1.875, 1.25),
    opening(1.875, 2.25, 1.375),
    opening(2.25, 100.0, 1.5),
];

pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Table used for a girth category. Unknown categories share the high table.
pub fn table_for(category: &str) -> &'static [OpeningRange] {
    match normalize_category(category).as_str() {
        "low" | "medium" => &SNUG_TABLE,
        _ => &WIDE_TABLE,
    }
}

/// Recommended opening for `user_diameter` in `category`.
///
/// Returns [`Recommendation::NoMatch`] when the diameter falls outside
/// `[1, 100)`, which is kept apart from a table `NotApplicable`.
pub fn recommend(user_diameter: f64, category: &str) -> Recommendation {
    table_for(category)
        .iter()
        .find(|range| range.min <= user_diameter && user_diameter < range.max)
        .map(|range| range.recommendation)
        .unwrap_or(Recommendation::NoMatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_category_smallest_range() {
        for d in [1.0, 1.1, 1.125, 1.249] {
            assert_eq!(recommend(d, "low"), Recommendation::Opening(0.9));
            assert_eq!(recommend(d, "premium"), Recommendation::NotApplicable);
        }
    }

    #[test]
    fn test_high_category_top_range() {
        for d in [2.25, 2.5, 3.0, 99.9] {
            assert_eq!(recommend(d, "high"), Recommendation::Opening(1.5));
        }
    }

    #[test]
    fn test_category_is_normalized() {
        assert_eq!(recommend(1.4, "  Medium "), Recommendation::Opening(1.0));
        assert_eq!(recommend(1.4, "LOW"), Recommendation::Opening(1.0));
        assert_eq!(recommend(1.4, "High"), Recommendation::Opening(1.125));
    }

    #[test]
    fn test_unknown_category_uses_high_table() {
        assert_eq!(recommend(1.7, "curved"), recommend(1.7, "high"));
        assert_eq!(recommend(1.7, ""), Recommendation::Opening(1.25));
    }

    #[test]
    fn test_interval_bounds_are_half_open() {
        assert_eq!(recommend(1.825, "low"), Recommendation::Opening(1.25));
        assert_eq!(recommend(2.0, "medium"), Recommendation::Opening(1.375));
        assert_eq!(recommend(2.15, "medium"), Recommendation::NotApplicable);
        assert_eq!(recommend(1.875, "high"), Recommendation::Opening(1.375));
    }

    #[test]
    fn test_out_of_domain_is_no_match() {
        assert_eq!(recommend(0.99, "low"), Recommendation::NoMatch);
        assert_eq!(recommend(100.0, "high"), Recommendation::NoMatch);
        assert_eq!(recommend(f64::NAN, "high"), Recommendation::NoMatch);
    }

    #[test]
    fn test_tables_are_contiguous() {
        for table in [&SNUG_TABLE, &WIDE_TABLE] {
            assert_eq!(table[0].min, 1.0);
            assert_eq!(table[table.len() - 1].max, 100.0);
            for pair in table.windows(2) {
                assert_eq!(pair[0].max, pair[1].min);
            }
        }
    }
}
