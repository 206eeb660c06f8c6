use std::fmt::{self, Display};

use thiserror::Error;

///
/// Why a record could not be turned into a variant.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// One of CHROM, POS, REF, ALT is absent or empty.
    MissingField(&'static str),
    InvalidPosition(String),
    /// The record is structural but carries no `SVTYPE`.
    MissingSvType,
    /// A non-breakend structural variant without `END`.
    MissingEnd(String),
    EndBeforePosition { end: i64 },
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingField(field) => write!(f, "missing mandatory field {}", field),
            MalformedReason::InvalidPosition(raw) => {
                write!(f, "POS is not a 1-based position: {}", raw)
            }
            MalformedReason::MissingSvType => write!(f, "structural variant has no SVTYPE"),
            MalformedReason::MissingEnd(sub_category) => {
                write!(f, "structural variant of type {} has no END", sub_category)
            }
            MalformedReason::EndBeforePosition { end } => {
                write!(f, "END {} lies before POS", end)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum VariantError {
    /// Fatal for the record, never for the batch.
    #[error(
        "Malformed variant {chrom}:{position} in case {case_id}: {reason}",
        position = display_pos(.pos)
    )]
    Malformed {
        chrom: String,
        pos: Option<i64>,
        case_id: String,
        reason: MalformedReason,
    },
}

impl VariantError {
    pub fn reason(&self) -> &MalformedReason {
        match self {
            VariantError::Malformed { reason, .. } => reason,
        }
    }
}

fn display_pos(pos: &Option<i64>) -> String {
    pos.map_or_else(|| "?".to_string(), |p| p.to_string())
}

/// Result type alias for gtars-variants operations.
pub type Result<T> = std::result::Result<T, VariantError>;
