use crate::adapters::ingest;
use crate::domain::model::ProductRecord;
use crate::domain::ports::{CatalogSource, Storage};
use crate::utils::error::{Result, SelectorError};
use async_trait::async_trait;

/// A JSON array of catalog records read through [`Storage`].
pub struct JsonFileSource<S: Storage> {
    storage: S,
    path: String,
    name: String,
}

impl<S: Storage> JsonFileSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path),
            storage,
            path,
        }
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<ProductRecord>> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        let serde_json::Value::Array(items) = value else {
            return Err(SelectorError::source_failed(
                &self.name,
                "expected a JSON array of product records",
            ));
        };

        let rows = items
            .into_iter()
            .map(|item| serde_json::from_value::<ProductRecord>(item).map_err(|e| e.to_string()));
        Ok(ingest(&self.name, rows))
    }
}

#[async_trait]
impl<S: Storage> CatalogSource for JsonFileSource<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<ProductRecord>> {
        tracing::debug!("Reading catalog file {}", self.path);
        let bytes = self.storage.read_file(&self.path).await?;
        self.parse(&bytes)
    }
}
