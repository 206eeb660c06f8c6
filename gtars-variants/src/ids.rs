//! Stable identifiers for a variant.
//!
//! Identifiers are md5 digests over the fields that make a call unique. They
//! are deterministic, so re-loading the same VCF yields the same ids, and the
//! category takes part in the digest so that a point variant and a structural
//! call at the same position never collide.
//!
//! Fields are joined with `_` before hashing, as the ranking tool does for
//! compound names. Contig names may themselves contain `_`
//! (`chr1_KI270706v1_random`), so two keys only stay apart as long as the
//! alleles do not contain `_` either; VCF alleles never do.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::models::{Category, VariantType};

/// The fields that identify a call, independent of any annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantKey<'a> {
    pub chrom: &'a str,
    pub pos: i64,
    pub reference: &'a str,
    pub alternative: &'a str,
    pub category: Category,
}

impl VariantKey<'_> {
    /// `chrom_pos_ref_alt`, the name compounds use to refer to each other.
    pub fn simple_id(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.chrom, self.pos, self.reference, self.alternative
        )
    }

    /// Digest shared by every case carrying this call.
    pub fn variant_id(&self, variant_type: VariantType) -> String {
        let pos = self.pos.to_string();
        md5_key(&[
            self.chrom,
            pos.as_str(),
            self.reference,
            self.alternative,
            self.category.as_str(),
            variant_type.as_str(),
        ])
    }

    /// Digest unique to this call within one case.
    pub fn document_id(&self, variant_type: VariantType, case_id: &str) -> String {
        let pos = self.pos.to_string();
        md5_key(&[
            self.chrom,
            pos.as_str(),
            self.reference,
            self.alternative,
            self.category.as_str(),
            variant_type.as_str(),
            case_id,
        ])
    }
}

///
/// Calculate the md5 hex digest of the `_`-joined parts.
///
pub fn md5_key(parts: &[&str]) -> String {
    let mut hasher = Md5::new();
    hasher.update(parts.join("_"));
    let digest = hasher.finalize();
    format!("{:x}", digest)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariantIds {
    pub simple_id: String,
    pub variant_id: String,
    pub display_name: String,
    /// Internal id of the variant document.
    pub document_id: String,
}

impl VariantIds {
    pub fn new(key: &VariantKey, variant_type: VariantType, case_id: &str) -> Self {
        let simple_id = key.simple_id();
        VariantIds {
            display_name: format!("{}_{}", simple_id, variant_type.as_str()),
            simple_id,
            variant_id: key.variant_id(variant_type),
            document_id: key.document_id(variant_type, case_id),
        }
    }
}
