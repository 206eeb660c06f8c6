//! Typed extraction from a [`RawVariantRecord`].
//!
//! This is the only place that reads the loosely-typed fixed columns. Missing
//! mandatory fields become [`MalformedReason`]s here; optional fields that are
//! absent read as `None`, and optional fields that are present but unreadable
//! read as `None` plus an [`DiagnosticKind::UnparsableField`] entry.

use std::str::FromStr;

use crate::consts::{
    END_KEY, MATEID_KEY, MISSING_VALUE, SVLEN_KEY, SVTYPE_KEY, VCF_LIST_SEPARATOR,
};
use crate::diagnostics::DiagnosticKind;
use crate::errors::MalformedReason;
use crate::models::{Case, Category, RawVariantRecord};
use crate::resolver::SvAnnotation;

fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != MISSING_VALUE).then_some(value)
}

/// The mandatory positional and allele fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields<'a> {
    pub chrom: &'a str,
    pub pos: i64,
    pub reference: &'a str,
    pub alternative: &'a str,
}

///
/// Best-effort locus of a record for error reporting: whatever of CHROM and
/// POS can be read.
///
pub fn locus(raw: &RawVariantRecord) -> (String, Option<i64>) {
    let chrom = raw
        .chrom
        .as_deref()
        .and_then(present)
        .unwrap_or("?")
        .to_string();
    let pos = raw.pos.as_ref().and_then(|p| p.as_i64());
    (chrom, pos)
}

///
/// Read CHROM, POS, REF and ALT. POS must be a positive integer.
///
pub fn required_fields(raw: &RawVariantRecord) -> Result<RequiredFields<'_>, MalformedReason> {
    let chrom = raw
        .chrom
        .as_deref()
        .and_then(present)
        .ok_or(MalformedReason::MissingField("CHROM"))?;

    let raw_pos = raw
        .pos
        .as_ref()
        .filter(|p| !p.is_missing())
        .ok_or(MalformedReason::MissingField("POS"))?;
    let pos = raw_pos
        .as_i64()
        .filter(|p| *p >= 1)
        .ok_or_else(|| MalformedReason::InvalidPosition(raw_pos.to_string()))?;

    let reference = raw
        .reference
        .as_deref()
        .and_then(present)
        .ok_or(MalformedReason::MissingField("REF"))?;
    let alternative = raw
        .alternative
        .as_deref()
        .and_then(present)
        .ok_or(MalformedReason::MissingField("ALT"))?;

    Ok(RequiredFields {
        chrom,
        pos,
        reference,
        alternative,
    })
}

/// All present values of an INFO key.
pub fn info_values<'a>(raw: &'a RawVariantRecord, key: &str) -> impl Iterator<Item = &'a str> {
    raw.info_dict
        .get(key)
        .into_iter()
        .flatten()
        .filter_map(|v| present(v))
}

/// First value of an INFO key. INFO lists are reduced to their head.
pub fn info_first<'a>(raw: &'a RawVariantRecord, key: &str) -> Option<&'a str> {
    raw.info_dict
        .get(key)
        .and_then(|values| values.first())
        .and_then(|v| present(v))
}

///
/// First value of an INFO key parsed as `T`. A value that does not parse is
/// reported to `issues` and read as absent.
///
pub fn info_parsed<T: FromStr>(
    raw: &RawVariantRecord,
    key: &str,
    issues: &mut Vec<DiagnosticKind>,
) -> Option<T> {
    let value = info_first(raw, key)?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            issues.push(DiagnosticKind::UnparsableField {
                field: key.to_string(),
                raw: value.to_string(),
            });
            None
        }
    }
}

///
/// Decide the category. A forced category wins; otherwise a record is
/// structural exactly when it carries `SVTYPE`.
///
pub fn category(raw: &RawVariantRecord, forced: Option<Category>) -> Category {
    forced.unwrap_or_else(|| match info_first(raw, SVTYPE_KEY) {
        Some(_) => Category::Sv,
        None => Category::Snv,
    })
}

///
/// Structural INFO fields, first values only. An `SVLEN` whose magnitude does
/// not fit in an `i64` is reported and read as absent.
///
pub fn sv_annotation<'a>(
    raw: &'a RawVariantRecord,
    issues: &mut Vec<DiagnosticKind>,
) -> SvAnnotation<'a> {
    let sv_len = info_parsed::<i64>(raw, SVLEN_KEY, issues).filter(|len| {
        let representable = len.checked_abs().is_some();
        if !representable {
            issues.push(DiagnosticKind::UnparsableField {
                field: SVLEN_KEY.to_string(),
                raw: len.to_string(),
            });
        }
        representable
    });

    SvAnnotation {
        sv_type: info_first(raw, SVTYPE_KEY),
        sv_len,
        end: info_parsed(raw, END_KEY, issues),
        mate_id: info_first(raw, MATEID_KEY),
    }
}

/// QUAL as a float; `.` reads as absent.
pub fn quality(raw: &RawVariantRecord, issues: &mut Vec<DiagnosticKind>) -> Option<f64> {
    let qual = raw.quality.as_ref().filter(|q| !q.is_missing())?;
    let value = qual.as_f64();
    if value.is_none() {
        issues.push(DiagnosticKind::UnparsableField {
            field: "QUAL".to_string(),
            raw: qual.to_string(),
        });
    }
    value
}

fn split_list(value: Option<&str>) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in value.unwrap_or_default().split(VCF_LIST_SEPARATOR) {
        if let Some(item) = present(item) {
            if !items.iter().any(|seen| seen == item) {
                items.push(item.to_string());
            }
        }
    }
    items
}

/// FILTER tags in their original order, without repeats.
pub fn filters(raw: &RawVariantRecord) -> Vec<String> {
    split_list(raw.filter.as_deref())
}

/// dbSNP ids from the ID column; empty for `.`.
pub fn db_snp_ids(raw: &RawVariantRecord) -> Vec<String> {
    split_list(raw.id.as_deref())
}

///
/// Rank score of the case, `0.0` when the ranking tool did not score it.
///
pub fn rank_score(raw: &RawVariantRecord, case: &Case, issues: &mut Vec<DiagnosticKind>) -> f64 {
    let Some(score) = raw
        .rank_scores
        .get(&case.display_name)
        .filter(|s| !s.is_missing())
    else {
        return 0.0;
    };
    score.as_f64().unwrap_or_else(|| {
        issues.push(DiagnosticKind::UnparsableField {
            field: "rank_score".to_string(),
            raw: score.to_string(),
        });
        0.0
    })
}

/// Inheritance models annotated for the case.
pub fn genetic_models(raw: &RawVariantRecord, case: &Case) -> Vec<String> {
    raw.genetic_models
        .get(&case.display_name)
        .map(|models| {
            models
                .iter()
                .filter_map(|m| present(m))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
