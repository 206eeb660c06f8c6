//! Constants shared across the variant parser: INFO keys, VCF conventions and
//! the numeric sentinels written for lengths that have no measured value.

// VCF conventions

/// The VCF missing-value marker.
pub const MISSING_VALUE: &str = ".";

/// Separator of multiple values in `FILTER` and `ID`.
pub const VCF_LIST_SEPARATOR: char = ';';

// Sentinels

/// Written as both `end` and `length` of a breakend: the distance to the mate
/// is unbounded.
pub const BND_SENTINEL: i64 = 100_000_000_000;

/// Written as `length` of a structural variant that did not declare `SVLEN`.
pub const UNKNOWN_LENGTH_SENTINEL: i64 = -1;

// INFO keys read by the coordinate resolver

pub const SVTYPE_KEY: &str = "SVTYPE";
pub const SVLEN_KEY: &str = "SVLEN";
pub const END_KEY: &str = "END";
pub const MATEID_KEY: &str = "MATEID";

// INFO keys read by the assembler and the annotation parsers

pub const CADD_KEY: &str = "CADD";
pub const SPIDEX_KEY: &str = "SPIDEX";
pub const RANK_RESULT_KEY: &str = "RankResult";
pub const RANK_RESULT_SEPARATOR: char = '|';
pub const CLNACC_KEY: &str = "CLNACC";
pub const CLNSIG_KEY: &str = "CLNSIG";
pub const CALLER_SET_KEY: &str = "set";

/// Severity tier assigned whenever ClinVar accessions are present.
pub const MAX_CLNSIG_TIER: u8 = 5;

/// Callers recognised in the GATK CombineVariants `set` annotation.
pub const KNOWN_CALLERS: [&str; 3] = ["gatk", "freebayes", "samtools"];
