//! Non-fatal conditions met while parsing.
//!
//! The parser never logs through shared state of its own. Everything worth
//! telling the operator goes to a [`DiagnosticSink`] the caller hands in, so a
//! batch driver can count, collect or forward them as it sees fit.

use std::fmt::{self, Display};
use std::sync::Mutex;

use log::warn;

use crate::errors::{MalformedReason, VariantError};

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// The rank-model header and the score vector disagree in length; pairs past
    /// the shorter one were dropped.
    RankResultLengthMismatch { header_len: usize, vector_len: usize },
    UnparsableRankResult(String),
    UnparsableField { field: String, raw: String },
    InvalidCompound(String),
    MalformedRecord(MalformedReason),
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::RankResultLengthMismatch {
                header_len,
                vector_len,
            } => write!(
                f,
                "rank result header has {} fields but the score vector has {}",
                header_len, vector_len
            ),
            DiagnosticKind::UnparsableRankResult(raw) => {
                write!(f, "could not parse rank result vector: {}", raw)
            }
            DiagnosticKind::UnparsableField { field, raw } => {
                write!(f, "could not parse {}: {}", field, raw)
            }
            DiagnosticKind::InvalidCompound(name) => write!(f, "invalid compound: {}", name),
            DiagnosticKind::MalformedRecord(reason) => write!(f, "{}", reason),
        }
    }
}

/// A [`DiagnosticKind`] together with the record it was raised for.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub chrom: String,
    pub pos: Option<i64>,
    pub case_id: String,
    pub kind: DiagnosticKind,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{}:{} ({}): {}", self.chrom, pos, self.case_id, self.kind),
            None => write!(f, "{}:? ({}): {}", self.chrom, self.case_id, self.kind),
        }
    }
}

impl From<&VariantError> for Diagnostic {
    fn from(err: &VariantError) -> Self {
        match err {
            VariantError::Malformed {
                chrom,
                pos,
                case_id,
                reason,
            } => Diagnostic {
                chrom: chrom.clone(),
                pos: *pos,
                case_id: case_id.clone(),
                kind: DiagnosticKind::MalformedRecord(reason.clone()),
            },
        }
    }
}

///
/// Receiver of diagnostics. Shared between worker threads, hence `Send + Sync`.
///
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}
