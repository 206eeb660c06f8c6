use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::VariantIds;
use crate::models::{Category, Coordinates};
use crate::parse::{
    CallerVote, ClinicalSignificance, Compound, Conservation, Frequencies, Gene, GenotypeCall,
};
use crate::rank::RankResult;

/// Whether the variant comes from the clinical or the research VCF of a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantType {
    #[default]
    Clinical,
    Research,
}

impl VariantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantType::Clinical => "clinical",
            VariantType::Research => "research",
        }
    }
}

impl Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VariantType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clinical" => Ok(VariantType::Clinical),
            "research" => Ok(VariantType::Research),
            other => Err(format!("Unknown variant type: {}", other)),
        }
    }
}

///
/// A variant normalized for one case, ready to be stored.
///
/// Built once by [`crate::VariantParser`]; there is no mutation contract after
/// that.
///
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanonicalVariant {
    #[serde(flatten)]
    pub ids: VariantIds,
    pub case_id: String,
    pub category: Category,
    pub variant_type: VariantType,

    pub chromosome: String,
    /// 1-based
    pub position: i64,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    pub reference: String,
    pub alternative: String,

    pub quality: Option<f64>,
    pub filters: Vec<String>,
    pub db_snp_ids: Vec<String>,

    pub rank_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_result: Option<RankResult>,
    pub genetic_models: Vec<String>,

    pub samples: Vec<GenotypeCall>,
    pub compounds: Vec<Compound>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clnsig: Option<ClinicalSignificance>,

    pub genes: Vec<Gene>,
    pub hgnc_symbols: BTreeSet<String>,
    pub ensembl_gene_ids: BTreeSet<String>,

    pub frequencies: Frequencies,
    pub conservation: Conservation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadd_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spidex: Option<f64>,

    pub callers: Vec<CallerVote>,
}

impl CanonicalVariant {
    pub fn end(&self) -> i64 {
        self.coordinates.end()
    }

    pub fn length(&self) -> i64 {
        self.coordinates.length()
    }

    pub fn mate_id(&self) -> Option<&str> {
        self.coordinates.mate_id()
    }
}
