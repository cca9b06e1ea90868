// Adapters layer: concrete catalog sources and storage backends.

pub mod fallback;
pub mod json_file;
pub mod sheet;
pub mod storage;

pub use fallback::FallbackSource;
pub use json_file::JsonFileSource;
pub use sheet::SheetSource;
pub use storage::LocalStorage;

use crate::domain::model::ProductRecord;

/// Keeps well-formed rows in catalog order and logs the rest.
///
/// `rows` yields either a parsed record or the reason a row could not be
/// parsed; records with non-positive `Length`/`Girth` are dropped too.
pub(crate) fn ingest<I>(source_name: &str, rows: I) -> Vec<ProductRecord>
where
    I: IntoIterator<Item = std::result::Result<ProductRecord, String>>,
{
    let mut records = Vec::new();
    let mut rejected = 0usize;

    for (index, row) in rows.into_iter().enumerate() {
        match row {
            Ok(record) if record.is_well_formed() => records.push(record),
            Ok(record) => {
                rejected += 1;
                tracing::warn!(
                    "{}: skipping row {} ('{}'): length and girth must be positive",
                    source_name,
                    index + 1,
                    record.model
                );
            }
            Err(reason) => {
                rejected += 1;
                tracing::warn!("{}: skipping row {}: {}", source_name, index + 1, reason);
            }
        }
    }

    if rejected > 0 {
        tracing::warn!("{}: rejected {} malformed rows", source_name, rejected);
    }
    tracing::debug!("{}: ingested {} products", source_name, records.len());
    records
}
