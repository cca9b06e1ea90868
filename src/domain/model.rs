use crate::utils::error::SelectorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Manufacturing density of a sleeve. Softer variants stretch further and
/// usually carry a longer usable interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Density {
    ExtraSoft,
    Soft,
    Medium,
    Firm,
}

impl Density {
    pub const ALL: [Density; 4] = [
        Density::ExtraSoft,
        Density::Soft,
        Density::Medium,
        Density::Firm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Density::ExtraSoft => "extra-soft",
            Density::Soft => "soft",
            Density::Medium => "medium",
            Density::Firm => "firm",
        }
    }

    /// Catalog column carrying the max internal length for this density.
    pub fn capacity_field(&self) -> &'static str {
        match self {
            Density::ExtraSoft => "max_internal_length_extra_soft",
            Density::Soft => "max_internal_length_soft",
            Density::Medium => "max_internal_length_medium",
            Density::Firm => "max_internal_length_firm",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Density {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Density::ALL
            .into_iter()
            .find(|d| d.label() == normalized)
            .ok_or_else(|| {
                SelectorError::invalid_input(
                    "density",
                    format!(
                        "unknown density '{}', expected one of: extra-soft, soft, medium, firm",
                        s
                    ),
                )
            })
    }
}

/// One raw catalog entry as supplied by a catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "URL", default, deserialize_with = "lenient_text")]
    pub url: String,
    #[serde(rename = "Length")]
    pub length: f64,
    #[serde(rename = "Girth")]
    pub girth: f64,
    #[serde(rename = "Girth Category", default, deserialize_with = "lenient_text")]
    pub girth_category: String,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub min_internal_length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub max_internal_length_extra_soft: Option<f64>,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub max_internal_length_soft: Option<f64>,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub max_internal_length_medium: Option<f64>,
    #[serde(default, deserialize_with = "lenient_measure")]
    pub max_internal_length_firm: Option<f64>,
}

impl ProductRecord {
    pub fn new(
        model: impl Into<String>,
        length: f64,
        girth: f64,
        girth_category: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            url: String::new(),
            length,
            girth,
            girth_category: girth_category.into(),
            min_internal_length: None,
            max_internal_length_extra_soft: None,
            max_internal_length_soft: None,
            max_internal_length_medium: None,
            max_internal_length_firm: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_min_internal_length(mut self, value: f64) -> Self {
        self.min_internal_length = Some(value);
        self
    }

    pub fn with_capacity(mut self, density: Density, value: f64) -> Self {
        let slot = match density {
            Density::ExtraSoft => &mut self.max_internal_length_extra_soft,
            Density::Soft => &mut self.max_internal_length_soft,
            Density::Medium => &mut self.max_internal_length_medium,
            Density::Firm => &mut self.max_internal_length_firm,
        };
        *slot = Some(value);
        self
    }

    /// Max internal length recorded for `density`, if the catalog carries a
    /// usable number for it.
    pub fn capacity(&self, density: Density) -> Option<f64> {
        let value = match density {
            Density::ExtraSoft => self.max_internal_length_extra_soft,
            Density::Soft => self.max_internal_length_soft,
            Density::Medium => self.max_internal_length_medium,
            Density::Firm => self.max_internal_length_firm,
        };
        value.filter(|v| v.is_finite())
    }

    /// Ingestion check: both raw measurements must be positive numbers.
    pub fn is_well_formed(&self) -> bool {
        self.length.is_finite() && self.length > 0.0 && self.girth.is_finite() && self.girth > 0.0
    }
}

/// Opening recommendation for a user diameter within a girth category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation {
    /// Recommended internal opening diameter, inches.
    Opening(f64),
    /// The table says no opening size suits this diameter.
    NotApplicable,
    /// The diameter lies outside every interval of the table.
    NoMatch,
}

impl Recommendation {
    pub fn diameter(&self) -> Option<f64> {
        match self {
            Recommendation::Opening(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Recommendation::NotApplicable)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Opening(d) => write!(f, "{}", d),
            Recommendation::NotApplicable => f.write_str("N/A"),
            Recommendation::NoMatch => f.write_str("undefined"),
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recommendation::Opening(d) => serializer.serialize_f64(*d),
            other => serializer.collect_str(other),
        }
    }
}

/// Estimated circumference of a sleeve while worn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WornGirth {
    Circumference(f64),
    NotApplicable,
}

impl fmt::Display for WornGirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WornGirth::Circumference(c) => write!(f, "{}", c),
            WornGirth::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for WornGirth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WornGirth::Circumference(c) => serializer.serialize_f64(*c),
            WornGirth::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// A catalog record plus everything computed from it for one selection pass.
///
/// The fit fields (`recommended_diameter`, `recommended_internal_dimensions`,
/// `girth_when_worn`) stay `NotApplicable`/empty until the record is fitted to
/// a user's measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedProductRecord {
    #[serde(flatten)]
    pub record: ProductRecord,
    #[serde(rename = "Diameter")]
    pub external_diameter: f64,
    #[serde(rename = "Max Internal Length")]
    pub max_internal_length: f64,
    #[serde(rename = "Min Internal Length")]
    pub min_internal_length: f64,
    #[serde(rename = "Supported Densities")]
    pub supported_densities: BTreeSet<Density>,
    #[serde(rename = "Recommended Diameter")]
    pub recommended_diameter: Recommendation,
    #[serde(rename = "Recommended Internal Dimensions")]
    pub recommended_internal_dimensions: String,
    #[serde(rename = "Girth When Worn")]
    pub girth_when_worn: WornGirth,
}

/// Inclusive `[min, max]` bounds on a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureRange {
    pub min: f64,
    pub max: f64,
}

impl MeasureRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// What the user asked for in one selection pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInput {
    pub diameter: f64,
    pub length: f64,
    /// `Some` switches on the density-aware checks.
    pub selected_density: Option<Density>,
    pub girth_range: MeasureRange,
    pub length_range: MeasureRange,
}

impl UserInput {
    pub fn new(diameter: f64, length: f64, girth_range: MeasureRange, length_range: MeasureRange) -> Self {
        Self {
            diameter,
            length,
            selected_density: None,
            girth_range,
            length_range,
        }
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.selected_density = Some(density);
        self
    }
}

impl crate::utils::validation::Validate for UserInput {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::{validate_bounds, validate_measurement};

        validate_measurement("diameter", self.diameter)?;
        validate_measurement("length", self.length)?;
        validate_bounds("girth_range", self.girth_range.min, self.girth_range.max)?;
        validate_bounds("length_range", self.length_range.min, self.length_range.max)?;
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Other(serde::de::IgnoredAny),
}

/// Optional numeric catalog cell: numbers and numeric strings are kept, while
/// empty cells, nulls, text, booleans, nested values and NaN all read as missing.
fn lenient_measure<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<LenientValue> = Option::deserialize(deserializer)?;
    let value = match raw {
        Some(LenientValue::Number(n)) => Some(n),
        Some(LenientValue::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(LenientValue::Flag(_)) | Some(LenientValue::Other(_)) | None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// Optional text cell. Scalars are stringified, anything else reads as empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<LenientValue> = Option::deserialize(deserializer)?;
    let text = match raw {
        Some(LenientValue::Text(s)) => s,
        Some(LenientValue::Number(n)) => n.to_string(),
        Some(LenientValue::Flag(b)) => b.to_string(),
        Some(LenientValue::Other(_)) | None => String::new(),
    };
    Ok(text)
}
