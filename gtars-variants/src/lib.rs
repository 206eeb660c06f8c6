//! # Canonical variant documents from tokenized VCF records
//!
//! This crate turns one tokenized VCF line, parsed for one case, into a
//! [`CanonicalVariant`]: typed coordinates, deterministic identifiers and the
//! per-case annotations a variant browser needs. It provides:
//!
//! - Raw record and case models, deserializable straight from JSON
//! - Coordinate resolution for point and structural variants
//! - Deterministic variant and document ids (md5)
//! - Annotation sub-parsers (genotypes, compounds, genes, clinical significance, ...)
//! - A rayon batch driver that skips malformed records instead of failing
//!
//! ```
//! use gtars_variants::{Case, NullSink, RawVariantRecord, VariantParser};
//!
//! let parser = VariantParser::default();
//! let case = Case::new("cust000-643594", "643594");
//! let raw = RawVariantRecord::new("7", 117199644, "ATCT", "A");
//!
//! let variant = parser.parse(&raw, &case, &NullSink).unwrap();
//! assert_eq!(variant.ids.simple_id, "7_117199644_ATCT_A");
//! assert_eq!(variant.end(), 117199647);
//! ```

pub mod assemble;
pub mod batch;
pub mod config;
pub mod consts;
pub mod diagnostics;
pub mod errors;
pub mod ids;
pub mod models;
pub mod parse;
pub mod rank;
pub mod resolver;
pub mod schema;

pub use assemble::VariantParser;
pub use batch::{BatchReport, parse_batch};
pub use config::{ConfigError, ParserConfig};
pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, LogSink, NullSink,
};
pub use errors::{MalformedReason, Result, VariantError};
pub use ids::{VariantIds, VariantKey};
pub use models::{
    CanonicalVariant, Case, Category, Coordinates, Individual, RawVariantRecord, SubCategory,
    SvType, VariantType,
};
pub use rank::RankResult;
pub use resolver::resolve_coordinates;
