use crate::domain::model::ProductRecord;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Tries `primary` first and falls back to `secondary` when it fails or comes
/// back empty. Typical use: remote sheet first, bundled file second.
pub struct FallbackSource<P: CatalogSource, S: CatalogSource> {
    primary: P,
    secondary: S,
    name: String,
}

impl<P: CatalogSource, S: CatalogSource> FallbackSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        let name = format!("{} (fallback: {})", primary.name(), secondary.name());
        Self {
            primary,
            secondary,
            name,
        }
    }
}

#[async_trait]
impl<P: CatalogSource, S: CatalogSource> CatalogSource for FallbackSource<P, S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<ProductRecord>> {
        match self.primary.load().await {
            Ok(records) if !records.is_empty() => return Ok(records),
            Ok(_) => tracing::warn!("{} returned no products", self.primary.name()),
            Err(e) => tracing::warn!(
                "{} failed ({}), using {}",
                self.primary.name(),
                e,
                self.secondary.name()
            ),
        }
        self.secondary.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SelectorError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        name: &'static str,
        records: Option<Vec<ProductRecord>>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn ok(name: &'static str, models: &[&str]) -> Self {
            Self {
                name,
                records: Some(
                    models
                        .iter()
                        .map(|m| ProductRecord::new(*m, 8.0, 5.5, "low"))
                        .collect(),
                ),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                records: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CatalogSource for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        async fn load(&self) -> Result<Vec<ProductRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.records
                .clone()
                .ok_or_else(|| SelectorError::source_failed(self.name, "offline"))
        }
    }

    #[tokio::test]
    async fn test_primary_wins_when_available() {
        let source = FallbackSource::new(Fixed::ok("sheet", &["Remote"]), Fixed::ok("file", &["Local"]));
        let records = source.load().await.unwrap();

        assert_eq!(records[0].model, "Remote");
        assert_eq!(source.secondary.calls.load(Ordering::SeqCst), 0);
        assert_eq!(source.name(), "sheet (fallback: file)");
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let source = FallbackSource::new(Fixed::failing("sheet"), Fixed::ok("file", &["Local"]));
        let records = source.load().await.unwrap();
        assert_eq!(records[0].model, "Local");
    }

    #[tokio::test]
    async fn test_empty_primary_falls_back() {
        let source = FallbackSource::new(Fixed::ok("sheet", &[]), Fixed::ok("file", &["Local"]));
        let records = source.load().await.unwrap();
        assert_eq!(records[0].model, "Local");
    }

    #[tokio::test]
    async fn test_both_failing_reports_secondary_error() {
        let source = FallbackSource::new(Fixed::failing("sheet"), Fixed::failing("file"));
        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("file"));
    }
}
