use crate::core::grid::LENGTH_STOP;
use crate::core::report::OutputFormat;
use crate::utils::error::{Result, SelectorError};
use crate::utils::validation::{validate_one_of, validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub grid: GridConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// CSV export URL of the catalog spreadsheet.
    pub sheet_url: Option<String>,
    /// Local JSON catalog, also the fallback when the sheet is unreachable.
    pub local_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub length_start: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub detailed: Option<bool>,
    pub path: Option<String>,
}

impl TomlConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SelectorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SelectorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| SelectorError::config(format!("bad env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = &self.source.sheet_url {
            validate_url("source.sheet_url", url)?;
        }
        if let Some(path) = &self.source.local_path {
            validate_path("source.local_path", path)?;
        }
        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }
        if let Some(format) = &self.output.format {
            validate_one_of("output.format", format, &OutputFormat::NAMES)?;
        }
        if self.source.timeout_seconds == Some(0) {
            return Err(SelectorError::InvalidConfigValueError {
                field: "source.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        if let Some(start) = self.grid.length_start {
            validate_grid_start("grid.length_start", start)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_grid_start(field: &str, start: f64) -> Result<()> {
    if !(start > 0.0 && start < LENGTH_STOP) {
        return Err(SelectorError::InvalidConfigValueError {
            field: field.to_string(),
            value: start.to_string(),
            reason: format!("Value must be above 0 and below {}", LENGTH_STOP),
        });
    }
    Ok(())
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
sheet_url = "https://docs.example.com/sheet/export?format=csv"
local_path = "sleeve_data.json"
timeout_seconds = 5

[grid]
length_start = 2.0

[output]
format = "csv"
detailed = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.source.sheet_url.as_deref(),
            Some("https://docs.example.com/sheet/export?format=csv")
        );
        assert_eq!(config.source.local_path.as_deref(), Some("sleeve_data.json"));
        assert_eq!(config.source.timeout_seconds, Some(5));
        assert_eq!(config.grid.length_start, Some(2.0));
        assert_eq!(config.output.detailed, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.source.sheet_url, None);
        assert_eq!(config.source.timeout_seconds, None);
        assert_eq!(config.grid.length_start, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SLEEVE_TEST_SHEET_URL", "https://sheets.example.com/export");

        let config = TomlConfig::from_toml_str(
            r#"
[source]
sheet_url = "${SLEEVE_TEST_SHEET_URL}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.source.sheet_url.as_deref(),
            Some("https://sheets.example.com/export")
        );

        std::env::remove_var("SLEEVE_TEST_SHEET_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[source]\nsheet_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_grid = TomlConfig::from_toml_str("[grid]\nlength_start = 10.0\n").unwrap();
        assert!(bad_grid.validate().is_err());

        let bad_timeout = TomlConfig::from_toml_str("[source]\ntimeout_seconds = 0\n").unwrap();
        assert!(bad_timeout.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[source\n").unwrap_err();
        assert!(matches!(err, SelectorError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nlocal_path = \"catalog.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.local_path.as_deref(), Some("catalog.json"));
    }
}
