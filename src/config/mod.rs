pub mod toml_config;

use crate::adapters::sheet::DEFAULT_TIMEOUT_SECONDS;
use crate::adapters::{FallbackSource, JsonFileSource, LocalStorage, SheetSource};
use crate::core::grid::DEFAULT_LENGTH_START;
use crate::core::report::OutputFormat;
use crate::core::{CatalogSource, ConfigProvider};
use crate::utils::error::{Result, SelectorError};
use std::time::Duration;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Builds the catalog source a config asks for: the sheet with the local file
/// as fallback when both are set, otherwise whichever one is set.
pub fn catalog_source<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn CatalogSource>> {
    let local = config
        .catalog_path()
        .map(|path| JsonFileSource::new(LocalStorage::default(), path));

    let source: Box<dyn CatalogSource> = match (config.sheet_url(), local) {
        (Some(url), Some(local)) => {
            let sheet = SheetSource::new(url, Duration::from_secs(config.timeout_seconds()))?;
            Box::new(FallbackSource::new(sheet, local))
        }
        (Some(url), None) => Box::new(SheetSource::new(
            url,
            Duration::from_secs(config.timeout_seconds()),
        )?),
        (None, Some(local)) => Box::new(local),
        (None, None) => {
            return Err(SelectorError::MissingConfigError {
                field: "catalog (--catalog or --sheet-url)".to_string(),
            })
        }
    };

    tracing::debug!("Catalog source: {}", source.name());
    Ok(source)
}

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::config::toml_config::{validate_grid_start, TomlConfig};
    use crate::core::grid::{diameter_options, is_on_grid, length_options};
    use crate::core::selector::{RangeOverride, SelectionRequest};
    use crate::domain::model::Density;
    use crate::utils::validation::{
        validate_measurement, validate_one_of, validate_path, validate_url, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "sleeve-selector")]
    #[command(about = "Find compatible sleeves and the internal dimensions to order")]
    pub struct CliConfig {
        /// Diameter in inches (average of base, middle and tip); see --list-options for supported values
        #[arg(long)]
        pub diameter: Option<f64>,

        /// Length in inches, base to tip; see --list-options for supported values
        #[arg(long)]
        pub length: Option<f64>,

        /// Density variant (extra-soft, soft, medium, firm); enables density-aware matching
        #[arg(long)]
        pub density: Option<String>,

        #[arg(long, help = "Minimum sleeve girth (defaults to catalog minimum)")]
        pub girth_min: Option<f64>,

        #[arg(long, help = "Maximum sleeve girth (defaults to catalog maximum)")]
        pub girth_max: Option<f64>,

        #[arg(long, help = "Minimum sleeve length (defaults to catalog minimum)")]
        pub length_min: Option<f64>,

        #[arg(long, help = "Maximum sleeve length (defaults to catalog maximum)")]
        pub length_max: Option<f64>,

        /// Local JSON catalog file
        #[arg(long)]
        pub catalog: Option<String>,

        /// CSV export URL of the catalog spreadsheet
        #[arg(long)]
        pub sheet_url: Option<String>,

        /// TOML config file; command line flags win over its values
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, help = "First length option offered (2 or 3 in practice)")]
        pub length_grid_start: Option<f64>,

        #[arg(long, help = "Output format: table, json or csv")]
        pub format: Option<String>,

        #[arg(long, help = "Show diameter and internal length columns")]
        pub detailed: bool,

        #[arg(short, long, help = "Write the report to this file instead of stdout")]
        pub output: Option<String>,

        #[arg(long, help = "Print the selectable diameter and length options")]
        pub list_options: bool,

        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Fills everything not given on the command line from `toml`.
        pub fn merge_toml(&mut self, toml: &TomlConfig) {
            self.sheet_url = self.sheet_url.take().or_else(|| toml.source.sheet_url.clone());
            self.catalog = self.catalog.take().or_else(|| toml.source.local_path.clone());
            self.timeout_seconds = self.timeout_seconds.or(toml.source.timeout_seconds);
            self.length_grid_start = self.length_grid_start.or(toml.grid.length_start);
            self.format = self.format.take().or_else(|| toml.output.format.clone());
            self.output = self.output.take().or_else(|| toml.output.path.clone());
            self.detailed = self.detailed || toml.output.detailed.unwrap_or(false);
        }

        pub fn output_format(&self) -> Result<OutputFormat> {
            self.format
                .as_deref()
                .map(str::parse::<OutputFormat>)
                .transpose()
                .map(Option::unwrap_or_default)
        }

        pub fn selected_density(&self) -> Result<Option<Density>> {
            self.density.as_deref().map(str::parse::<Density>).transpose()
        }

        pub fn selection_request(&self) -> Result<SelectionRequest> {
            let diameter = self
                .diameter
                .ok_or_else(|| SelectorError::MissingConfigError {
                    field: "--diameter".to_string(),
                })?;
            let length = self.length.ok_or_else(|| SelectorError::MissingConfigError {
                field: "--length".to_string(),
            })?;

            Ok(SelectionRequest {
                diameter,
                length,
                density: self.selected_density()?,
                girth_range: RangeOverride {
                    min: self.girth_min,
                    max: self.girth_max,
                },
                length_range: RangeOverride {
                    min: self.length_min,
                    max: self.length_max,
                },
            })
        }
    }

    impl CliConfig {
        /// Messages for measurements that are not on the selectable grids.
        /// Off-grid values still run; the tables are defined for any value.
        pub fn off_grid_warnings(&self) -> Vec<String> {
            let mut warnings = Vec::new();
            if let Some(diameter) = self.diameter {
                if !is_on_grid(diameter, &diameter_options()) {
                    warnings.push(format!(
                        "diameter {} is not one of the offered options (see --list-options)",
                        diameter
                    ));
                }
            }
            if let Some(length) = self.length {
                if !is_on_grid(length, &length_options(self.length_grid_start())) {
                    warnings.push(format!(
                        "length {} is not one of the offered options (see --list-options)",
                        length
                    ));
                }
            }
            warnings
        }
    }

    impl ConfigProvider for CliConfig {
        fn sheet_url(&self) -> Option<&str> {
            self.sheet_url.as_deref()
        }

        fn catalog_path(&self) -> Option<&str> {
            self.catalog.as_deref()
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
        }

        fn length_grid_start(&self) -> f64 {
            self.length_grid_start.unwrap_or(DEFAULT_LENGTH_START)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(url) = &self.sheet_url {
                validate_url("sheet_url", url)?;
            }
            if let Some(path) = &self.catalog {
                validate_path("catalog", path)?;
            }
            if let Some(path) = &self.output {
                validate_path("output", path)?;
            }
            if let Some(format) = &self.format {
                validate_one_of("format", &format.trim().to_lowercase(), &OutputFormat::NAMES)?;
            }
            if self.timeout_seconds == Some(0) {
                return Err(SelectorError::InvalidConfigValueError {
                    field: "timeout_seconds".to_string(),
                    value: "0".to_string(),
                    reason: "Value must be at least 1".to_string(),
                });
            }
            validate_grid_start("length_grid_start", self.length_grid_start())?;

            if self.list_options {
                return Ok(());
            }

            let request = self.selection_request()?;
            validate_measurement("diameter", request.diameter)?;
            validate_measurement("length", request.length)?;
            if self.sheet_url.is_none() && self.catalog.is_none() {
                return Err(SelectorError::MissingConfigError {
                    field: "catalog (--catalog or --sheet-url)".to_string(),
                });
            }
            Ok(())
        }
    }

}
