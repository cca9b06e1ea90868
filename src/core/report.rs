//! Rendering a selection for people (table) or other tools (JSON, CSV).

use crate::core::selector::Selection;
use crate::domain::model::EnrichedProductRecord;
use crate::utils::error::{Result, SelectorError};
use std::fmt::Write as _;
use std::str::FromStr;

pub const EMPTY_MESSAGE: &str = "No compatible sleeves with the selected filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["table", "json", "csv"];
}

impl FromStr for OutputFormat {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(SelectorError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: format!("Valid formats: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Model,
    Url,
    Length,
    Girth,
    Diameter,
    MaxInternalLength,
    MinInternalLength,
    SupportedDensities,
    RecommendedInternalDimensions,
    GirthWhenWorn,
}

impl Column {
    fn header(&self) -> &'static str {
        match self {
            Column::Model => "Model",
            Column::Url => "URL",
            Column::Length => "Length",
            Column::Girth => "Girth",
            Column::Diameter => "Diameter",
            Column::MaxInternalLength => "Max Internal Length",
            Column::MinInternalLength => "Min Internal Length",
            Column::SupportedDensities => "Supported Densities",
            Column::RecommendedInternalDimensions => "Recommended Internal Dimensions",
            Column::GirthWhenWorn => "Girth When Worn",
        }
    }

    fn cell(&self, record: &EnrichedProductRecord) -> String {
        match self {
            Column::Model => record.record.model.clone(),
            Column::Url => record.record.url.clone(),
            Column::Length => record.record.length.to_string(),
            Column::Girth => record.record.girth.to_string(),
            Column::Diameter => record.external_diameter.to_string(),
            Column::MaxInternalLength => record.max_internal_length.to_string(),
            Column::MinInternalLength => record.min_internal_length.to_string(),
            Column::SupportedDensities => record
                .supported_densities
                .iter()
                .map(|d| d.label())
                .collect::<Vec<_>>()
                .join(" "),
            Column::RecommendedInternalDimensions => record.recommended_internal_dimensions.clone(),
            Column::GirthWhenWorn => record.girth_when_worn.to_string(),
        }
    }
}

const COMPACT: &[Column] = &[
    Column::Model,
    Column::Url,
    Column::Length,
    Column::Girth,
    Column::RecommendedInternalDimensions,
    Column::GirthWhenWorn,
];

const DETAILED: &[Column] = &[
    Column::Model,
    Column::Url,
    Column::Length,
    Column::Girth,
    Column::Diameter,
    Column::MaxInternalLength,
    Column::MinInternalLength,
    Column::SupportedDensities,
    Column::RecommendedInternalDimensions,
    Column::GirthWhenWorn,
];

fn columns(detailed: bool) -> &'static [Column] {
    if detailed {
        DETAILED
    } else {
        COMPACT
    }
}

pub fn render(selection: &Selection, format: OutputFormat, detailed: bool) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(selection, detailed)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(selection)?),
        OutputFormat::Csv => render_csv(&selection.matches, detailed),
    }
}

pub fn render_table(selection: &Selection, detailed: bool) -> String {
    let mut out = format!("{} Compatible Sleeves\n", selection.matches.len());

    if selection.is_empty() {
        out.push_str(EMPTY_MESSAGE);
        out.push('\n');
        return out;
    }

    let columns = columns(detailed);
    let rows: Vec<Vec<String>> = selection
        .matches
        .iter()
        .map(|record| columns.iter().map(|c| c.cell(record)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.header().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut push_line = |cells: Vec<&str>| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    };

    push_line(columns.iter().map(|c| c.header()).collect());
    for row in &rows {
        push_line(row.iter().map(String::as_str).collect());
    }

    out
}

pub fn render_csv(records: &[EnrichedProductRecord], detailed: bool) -> Result<String> {
    let columns = columns(detailed);
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.header()))?;
    for record in records {
        writer.write_record(columns.iter().map(|c| c.cell(record)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SelectorError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| SelectorError::config(format!("CSV output is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selector::SelectionRequest;
    use crate::domain::model::ProductRecord;

    fn selection(diameter: f64) -> Selection {
        let catalog = vec![
            ProductRecord::new("Classic", 8.0, 5.5, "Medium").with_url("https://shop.example/classic"),
            ProductRecord::new("Long", 9.5, 6.0, "high"),
        ];
        Selection::from_catalog(&catalog, &SelectionRequest::new(diameter, 6.0)).unwrap()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" table ".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_lists_matches() {
        let table = render_table(&selection(1.4), false);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], "2 Compatible Sleeves");
        assert!(lines[1].starts_with("Model"));
        assert!(lines[1].contains("Girth When Worn"));
        assert!(!lines[1].contains("Max Internal Length"));
        assert!(lines[2].starts_with("Classic"));
        assert!(lines[2].contains("6.0 x 1.0"));
        assert!(lines[3].starts_with("Long"));
    }

    #[test]
    fn test_detailed_table_adds_columns() {
        let table = render_table(&selection(1.4), true);
        assert!(table.contains("Max Internal Length"));
        assert!(table.contains("1.751"));
    }

    #[test]
    fn test_empty_table_message() {
        let table = render_table(&selection(3.0), false);
        assert!(table.starts_with("0 Compatible Sleeves"));
        assert!(table.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_csv_output() {
        let csv_text = render(&selection(1.4), OutputFormat::Csv, false).unwrap();
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(4), Some("Recommended Internal Dimensions"));

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(0), Some("Classic"));
        assert_eq!(rows[0].get(1), Some("https://shop.example/classic"));
    }

    #[test]
    fn test_json_output_carries_context() {
        let json = render(&selection(1.4), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["catalog_size"], 2);
        assert_eq!(value["input"]["diameter"], 1.4);
        assert_eq!(value["matches"][0]["Model"], "Classic");
        assert_eq!(value["matches"][0]["Recommended Diameter"], 1.0);
        assert!(value["generated_at"].is_string());
    }
}
