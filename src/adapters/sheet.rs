use crate::adapters::ingest;
use crate::domain::model::ProductRecord;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, SelectorError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Catalog published as a CSV export of a spreadsheet.
pub struct SheetSource {
    url: String,
    client: Client,
}

impl SheetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn parse(&self, body: &str) -> Vec<ProductRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let rows: Vec<_> = reader
            .deserialize::<ProductRecord>()
            .map(|row| row.map_err(|e| e.to_string()))
            .collect();
        ingest(&self.url, rows)
    }
}

#[async_trait]
impl CatalogSource for SheetSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn load(&self) -> Result<Vec<ProductRecord>> {
        tracing::debug!("Fetching catalog sheet: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Sheet response status: {}", response.status());
        if !response.status().is_success() {
            return Err(SelectorError::source_failed(
                &self.url,
                format!("unexpected status {}", response.status()),
            ));
        }

        let body = response.text().await?;
        Ok(self.parse(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derived::supported_densities;
    use crate::domain::model::Density;
    use httpmock::prelude::*;

    const SHEET: &str = "\
Model,URL,Length,Girth,Girth Category,min_internal_length,max_internal_length_extra_soft,max_internal_length_soft,max_internal_length_medium,max_internal_length_firm
Classic,https://shop.example/classic,8,5.5,Medium,,,,,
Dense,https://shop.example/dense,7.5,6.25, High ,2,7,6.75,NaN,
Nameless,,,5.0,Low,,,,,
";

    fn source(url: String) -> SheetSource {
        SheetSource::new(url, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS)).unwrap()
    }

    #[tokio::test]
    async fn test_load_sheet_csv() {
        let server = MockServer::start();
        let sheet_mock = server.mock(|when, then| {
            when.method(GET).path("/export");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body(SHEET);
        });

        let records = source(server.url("/export")).load().await.unwrap();
        sheet_mock.assert();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].model, "Classic");
        assert_eq!(records[0].min_internal_length, None);
        assert_eq!(records[1].girth_category, "High");
        assert_eq!(records[1].min_internal_length, Some(2.0));
        assert_eq!(records[1].capacity(Density::ExtraSoft), Some(7.0));
        assert_eq!(records[1].capacity(Density::Soft), Some(6.75));
        assert_eq!(records[1].capacity(Density::Medium), None);
        assert_eq!(records[1].capacity(Density::Firm), None);
    }

    #[test]
    fn test_boolean_capacity_cell_keeps_the_row() {
        let body = "\
Model,URL,Length,Girth,Girth Category,min_internal_length,max_internal_length_extra_soft,max_internal_length_soft,max_internal_length_medium,max_internal_length_firm
Flag,https://shop.example/flag,8,5.5,Medium,,,true,6.5,
Numbered,,7,6,3,,,,,
";

        let records = source("https://sheets.example.com/export".to_string()).parse(body);

        assert_eq!(records.len(), 2);
        let densities = supported_densities(&records[0]);
        assert!(!densities.contains(&Density::Soft));
        assert!(densities.contains(&Density::Medium));
        assert_eq!(records[1].girth_category, "3");
    }

    #[tokio::test]
    async fn test_error_status_is_source_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/export");
            then.status(500);
        });

        let err = source(server.url("/export")).load().await.unwrap_err();
        assert!(matches!(err, SelectorError::SourceError { .. }));
    }
}
