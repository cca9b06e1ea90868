use crate::domain::model::{MeasureRange, ProductRecord};
use serde::Serialize;

/// Smallest and largest length and girth in a catalog. These are the default
/// user ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogBounds {
    pub length: MeasureRange,
    pub girth: MeasureRange,
}

impl CatalogBounds {
    /// `None` for an empty catalog.
    pub fn from_records(records: &[ProductRecord]) -> Option<Self> {
        let first = records.first()?;
        let mut length = MeasureRange::new(first.length, first.length);
        let mut girth = MeasureRange::new(first.girth, first.girth);

        for record in &records[1..] {
            length.min = length.min.min(record.length);
            length.max = length.max.max(record.length);
            girth.min = girth.min.min(record.girth);
            girth.max = girth.max.max(record.girth);
        }

        Some(Self { length, girth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_span_catalog() {
        let records = vec![
            ProductRecord::new("A", 8.0, 5.5, "low"),
            ProductRecord::new("B", 6.5, 7.25, "high"),
            ProductRecord::new("C", 9.0, 6.0, "medium"),
        ];

        let bounds = CatalogBounds::from_records(&records).unwrap();
        assert_eq!(bounds.length, MeasureRange::new(6.5, 9.0));
        assert_eq!(bounds.girth, MeasureRange::new(5.5, 7.25));
    }

    #[test]
    fn test_empty_catalog_has_no_bounds() {
        assert!(CatalogBounds::from_records(&[]).is_none());
    }
}
