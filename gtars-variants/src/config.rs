use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Category, VariantType};

///
/// Settings for parsing the variants of one VCF.
///
/// ```toml
/// variant_type = "research"
/// category = "sv"
/// rank_results_header = ["Consequence", "Gene_intolerance_prediction", "Clinical_significance"]
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ParserConfig {
    #[serde(default)]
    pub variant_type: VariantType,
    /// Names of the `RankResult` entries, in vector order.
    #[serde(default)]
    pub rank_results_header: Vec<String>,
    /// Parse every record as this category instead of inferring it from `SVTYPE`.
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ParserConfig {
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

impl TryFrom<&Path> for ParserConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        ParserConfig::from_toml_str(&toml_str)
    }
}
