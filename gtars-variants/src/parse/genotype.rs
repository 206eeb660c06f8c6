use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::consts::MISSING_VALUE;
use crate::models::{Case, RawSampleCall, RawVariantRecord};

const NO_CALL: &str = "./.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zygosity {
    HomRef,
    Het,
    HomAlt,
    NoCall,
}

impl Zygosity {
    ///
    /// Classify a VCF `GT` value. Phased and unphased separators are treated
    /// alike; any missing allele makes the call a no-call.
    ///
    pub fn from_genotype(gt: &str) -> Self {
        let alleles: Vec<&str> = gt.split(['/', '|']).map(str::trim).collect();
        if alleles.iter().any(|a| a.is_empty() || *a == MISSING_VALUE) {
            return Zygosity::NoCall;
        }
        if alleles.iter().all(|a| *a == "0") {
            Zygosity::HomRef
        } else if alleles.windows(2).all(|w| w[0] == w[1]) {
            Zygosity::HomAlt
        } else {
            Zygosity::Het
        }
    }
}

/// Genotype call of one individual.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenotypeCall {
    pub sample_id: String,
    pub display_name: String,
    pub genotype_call: String,
    pub zygosity: Zygosity,
    /// Reference and (summed) alternative depth from `AD`.
    pub allele_depths: Option<[u32; 2]>,
    pub read_depth: Option<u32>,
    pub genotype_quality: Option<u32>,
    /// Fraction of alternative reads.
    pub allele_balance: Option<f64>,
}

fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if value == MISSING_VALUE {
        return None;
    }
    value.parse().ok()
}

fn parse_allele_depths(value: &str) -> Option<[u32; 2]> {
    let mut depths = value.split(',').map(parse_count);
    let ref_depth = depths.next()??;
    let mut alt_depth = 0u32;
    let mut seen_alt = false;
    for depth in depths {
        alt_depth = alt_depth.saturating_add(depth?);
        seen_alt = true;
    }
    seen_alt.then_some([ref_depth, alt_depth])
}

fn genotype_call(
    sample_id: &str,
    display_name: &str,
    call: Option<&RawSampleCall>,
) -> GenotypeCall {
    let field = |key: &str| call.and_then(|c| c.fields.get(key)).map(String::as_str);

    let genotype = field("GT").unwrap_or(NO_CALL).to_string();
    let allele_depths = field("AD").and_then(parse_allele_depths);
    let read_depth = field("DP")
        .and_then(parse_count)
        .or_else(|| allele_depths.map(|[r, a]| r.saturating_add(a)));
    let allele_balance = allele_depths.and_then(|[r, a]| {
        let total = r as u64 + a as u64;
        (total > 0).then(|| a as f64 / total as f64)
    });

    GenotypeCall {
        sample_id: sample_id.to_string(),
        display_name: display_name.to_string(),
        zygosity: Zygosity::from_genotype(&genotype),
        genotype_call: genotype,
        allele_depths,
        read_depth,
        genotype_quality: field("GQ").and_then(parse_count),
        allele_balance,
    }
}

///
/// Build one genotype call per individual of the case, in case order.
///
/// Individuals without a sample column still get a (no-)call. When the case
/// lists no individuals, every sample column of the record is used instead.
///
pub fn parse_genotypes(raw: &RawVariantRecord, case: &Case) -> Vec<GenotypeCall> {
    if case.individuals.is_empty() {
        return raw
            .samples
            .iter()
            .map(|s| genotype_call(&s.sample_id, &s.sample_id, Some(s)))
            .collect();
    }

    let by_id: FxHashMap<&str, &RawSampleCall> = raw
        .samples
        .iter()
        .map(|s| (s.sample_id.as_str(), s))
        .collect();

    case.individuals
        .iter()
        .map(|ind| {
            genotype_call(
                &ind.individual_id,
                &ind.display_name,
                by_id.get(ind.individual_id.as_str()).copied(),
            )
        })
        .collect()
}
