//! Pairing of the positional `RankResult` score vector with the names of the
//! rank model that produced it.

use std::collections::BTreeMap;

use crate::consts::{RANK_RESULT_KEY, RANK_RESULT_SEPARATOR};
use crate::diagnostics::DiagnosticKind;
use crate::models::RawVariantRecord;
use crate::schema::info_first;

/// Named sub-scores of the rank model.
pub type RankResult = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankMapping {
    pub result: RankResult,
    /// `(header length, vector length)` when they differ.
    pub mismatch: Option<(usize, usize)>,
}

///
/// Zip a score vector against the rank model header.
///
/// Pairs beyond the shorter of the two are dropped; a length difference is
/// returned in `mismatch` for the caller to report.
///
pub fn map_rank_result(raw_vector: &[i64], header: &[String]) -> RankMapping {
    let result = header
        .iter()
        .zip(raw_vector)
        .map(|(name, score)| (name.clone(), *score))
        .collect();
    let mismatch = (header.len() != raw_vector.len()).then_some((header.len(), raw_vector.len()));
    RankMapping { result, mismatch }
}

///
/// Read INFO `RankResult` (`|`-separated integers) and name its entries.
///
/// `None` when the record carries no rank result, or when any element is not an
/// integer. Both the unreadable vector and a header/vector length mismatch are
/// pushed to `issues`.
///
pub fn parse_rank_result(
    raw: &RawVariantRecord,
    header: &[String],
    issues: &mut Vec<DiagnosticKind>,
) -> Option<RankResult> {
    let value = info_first(raw, RANK_RESULT_KEY)?;

    let vector: Result<Vec<i64>, _> = value
        .split(RANK_RESULT_SEPARATOR)
        .map(|v| v.trim().parse::<i64>())
        .collect();
    let Ok(vector) = vector else {
        issues.push(DiagnosticKind::UnparsableRankResult(value.to_string()));
        return None;
    };

    let mapping = map_rank_result(&vector, header);
    if let Some((header_len, vector_len)) = mapping.mismatch {
        issues.push(DiagnosticKind::RankResultLengthMismatch {
            header_len,
            vector_len,
        });
    }
    Some(mapping.result)
}
