//! Input side of the parser: the loosely-typed record handed over by the VCF
//! tokenizer, and the case context it is parsed against.
//!
//! Nothing here is validated. Typed extraction happens in [`crate::schema`].

use std::collections::HashMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::consts::MISSING_VALUE;

///
/// A scalar field as the tokenizer emits it. Depending on the tokenizer (and on
/// whether the record went through JSON) numbers may arrive as numbers or as text.
///
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    /// `true` for the VCF missing-value marker `.` (and for blank text).
    pub fn is_missing(&self) -> bool {
        match self {
            RawScalar::Text(s) => {
                let s = s.trim();
                s.is_empty() || s == MISSING_VALUE
            }
            _ => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawScalar::Int(v) => Some(*v),
            RawScalar::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            RawScalar::Float(_) => None,
            RawScalar::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawScalar::Int(v) => Some(*v as f64),
            RawScalar::Float(v) => Some(*v),
            RawScalar::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Int(v) => write!(f, "{}", v),
            RawScalar::Float(v) => write!(f, "{}", v),
            RawScalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        RawScalar::Text(value.to_string())
    }
}

impl From<i64> for RawScalar {
    fn from(value: i64) -> Self {
        RawScalar::Int(value)
    }
}

impl From<f64> for RawScalar {
    fn from(value: f64) -> Self {
        RawScalar::Float(value)
    }
}

/// FORMAT values of one sample column, keyed by FORMAT tag (`GT`, `AD`, `DP`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawSampleCall {
    pub sample_id: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

/// A compound partner as annotated by the ranking tool, named `chrom_pos_ref_alt`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawCompound {
    pub variant_name: String,
    #[serde(default)]
    pub compound_score: Option<RawScalar>,
}

///
/// One tokenized VCF line.
///
/// The fixed columns keep their VCF names on the wire. Per-case annotations
/// (`rank_scores`, `genetic_models`, `compound_variants`) are keyed by the case
/// display name, since that is what the ranking tool writes into the VCF.
///
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawVariantRecord {
    #[serde(rename = "CHROM", default)]
    pub chrom: Option<String>,
    #[serde(rename = "POS", default)]
    pub pos: Option<RawScalar>,
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "REF", default)]
    pub reference: Option<String>,
    #[serde(rename = "ALT", default)]
    pub alternative: Option<String>,
    #[serde(rename = "QUAL", default)]
    pub quality: Option<RawScalar>,
    #[serde(rename = "FILTER", default)]
    pub filter: Option<String>,

    #[serde(default)]
    pub info_dict: HashMap<String, Vec<String>>,

    #[serde(default)]
    pub rank_scores: HashMap<String, RawScalar>,
    #[serde(default)]
    pub genetic_models: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub compound_variants: HashMap<String, Vec<RawCompound>>,

    #[serde(default)]
    pub samples: Vec<RawSampleCall>,
    #[serde(default)]
    pub vep_info: Vec<HashMap<String, String>>,
}

impl RawVariantRecord {
    ///
    /// Minimal record with the fixed columns filled in. Mostly useful for
    /// building records by hand.
    ///
    pub fn new(chrom: &str, pos: i64, reference: &str, alternative: &str) -> Self {
        RawVariantRecord {
            chrom: Some(chrom.to_string()),
            pos: Some(RawScalar::Int(pos)),
            id: Some(MISSING_VALUE.to_string()),
            reference: Some(reference.to_string()),
            alternative: Some(alternative.to_string()),
            quality: Some(RawScalar::Text(MISSING_VALUE.to_string())),
            filter: Some("PASS".to_string()),
            ..Default::default()
        }
    }

    /// Set an INFO key, replacing any previous values.
    pub fn with_info(mut self, key: &str, values: &[&str]) -> Self {
        self.info_dict.insert(
            key.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }
}

/// An individual of a case, as known to the case-lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Individual {
    pub individual_id: String,
    pub display_name: String,
}

///
/// Case context the record is parsed for.
///
/// `individuals` decides which sample columns become genotype calls and in which
/// order. When it is empty every sample in the record is used.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Case {
    pub case_id: String,
    pub display_name: String,
    #[serde(default)]
    pub individuals: Vec<Individual>,
}

impl Case {
    pub fn new(case_id: &str, display_name: &str) -> Self {
        Case {
            case_id: case_id.to_string(),
            display_name: display_name.to_string(),
            individuals: Vec::new(),
        }
    }

    pub fn with_individual(mut self, individual_id: &str, display_name: &str) -> Self {
        self.individuals.push(Individual {
            individual_id: individual_id.to_string(),
            display_name: display_name.to_string(),
        });
        self
    }
}
