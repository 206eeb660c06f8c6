//! Annotation sub-parsers.
//!
//! Each parser reads one slice of a [`crate::models::RawVariantRecord`] and
//! returns a typed fragment. They do not depend on each other or on the
//! coordinate resolver, and an absent annotation always yields an empty
//! fragment rather than an error.

pub mod callers;
pub mod clnsig;
pub mod compound;
pub mod conservation;
pub mod frequency;
pub mod genes;
pub mod genotype;

pub use callers::{CallerStatus, CallerVote, parse_callers};
pub use clnsig::{ClinSigCode, ClinicalSignificance, parse_clnsig};
pub use compound::{Compound, parse_compounds};
pub use conservation::{Conservation, parse_conservations};
pub use frequency::{Frequencies, parse_frequencies};
pub use genes::{Gene, Transcript, parse_genes};
pub use genotype::{GenotypeCall, Zygosity, parse_genotypes};
