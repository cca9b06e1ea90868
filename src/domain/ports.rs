use crate::domain::model::ProductRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the catalog comes from and how the result is shown.
pub trait ConfigProvider: Send + Sync {
    fn sheet_url(&self) -> Option<&str>;
    fn catalog_path(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn length_grid_start(&self) -> f64;
}

/// Anything able to supply the raw catalog, in catalog order.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    async fn load(&self) -> Result<Vec<ProductRecord>>;
}

#[async_trait]
impl CatalogSource for Box<dyn CatalogSource> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn load(&self) -> Result<Vec<ProductRecord>> {
        (**self).load().await
    }
}
