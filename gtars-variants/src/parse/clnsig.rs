use serde::{Deserialize, Serialize};

use crate::consts::{CLNACC_KEY, CLNSIG_KEY, MAX_CLNSIG_TIER};
use crate::models::RawVariantRecord;
use crate::schema::info_values;

/// ClinVar `CLNSIG` numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinSigCode {
    Uncertain,
    NotProvided,
    Benign,
    LikelyBenign,
    LikelyPathogenic,
    Pathogenic,
    DrugResponse,
    Histocompatibility,
    Other,
}

impl ClinSigCode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ClinSigCode::Uncertain),
            1 => Some(ClinSigCode::NotProvided),
            2 => Some(ClinSigCode::Benign),
            3 => Some(ClinSigCode::LikelyBenign),
            4 => Some(ClinSigCode::LikelyPathogenic),
            5 => Some(ClinSigCode::Pathogenic),
            6 => Some(ClinSigCode::DrugResponse),
            7 => Some(ClinSigCode::Histocompatibility),
            255 => Some(ClinSigCode::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClinicalSignificance {
    pub tier: u8,
    pub accessions: Vec<String>,
    /// Codes listed in `CLNSIG`, for display.
    pub codes: Vec<ClinSigCode>,
}

fn split_values<'a>(raw: &'a RawVariantRecord, key: &str) -> Vec<&'a str> {
    info_values(raw, key)
        .flat_map(|v| v.split(['|', ',']))
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ".")
        .collect()
}

///
/// Extract the ClinVar annotation.
///
/// Only records with accessions get a fragment, and every such record is put
/// in the top tier regardless of the individual codes.
///
pub fn parse_clnsig(raw: &RawVariantRecord) -> Option<ClinicalSignificance> {
    let mut accessions: Vec<String> = Vec::new();
    for acc in split_values(raw, CLNACC_KEY) {
        if !accessions.iter().any(|seen| seen == acc) {
            accessions.push(acc.to_string());
        }
    }
    if accessions.is_empty() {
        return None;
    }

    let codes = split_values(raw, CLNSIG_KEY)
        .into_iter()
        .filter_map(|code| code.parse::<u8>().ok())
        .filter_map(ClinSigCode::from_code)
        .collect();

    Some(ClinicalSignificance {
        tier: MAX_CLNSIG_TIER,
        accessions,
        codes,
    })
}
