use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticKind;
use crate::ids::VariantKey;
use crate::models::{Case, Category, RawCompound, RawVariantRecord, VariantType};

/// A variant reported together with this one for the case.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Compound {
    /// Document id of the partner variant.
    pub variant: String,
    pub display_name: String,
    pub combined_score: f64,
}

fn parse_compound(
    compound: &RawCompound,
    case: &Case,
    variant_type: VariantType,
    category: Category,
) -> Option<Compound> {
    let combined_score = compound.compound_score.as_ref()?.as_f64()?;

    // from the right: contig names such as chr1_KI270706v1_random carry `_`
    let mut parts = compound.variant_name.rsplitn(4, '_');
    let alternative = parts.next().filter(|s| !s.is_empty())?;
    let reference = parts.next().filter(|s| !s.is_empty())?;
    let pos = parts.next()?.parse::<i64>().ok()?;
    let chrom = parts.next().filter(|s| !s.is_empty())?;

    let key = VariantKey {
        chrom,
        pos,
        reference,
        alternative,
        category,
    };

    Some(Compound {
        variant: key.document_id(variant_type, &case.case_id),
        display_name: compound.variant_name.clone(),
        combined_score,
    })
}

///
/// Resolve the compound partners the ranking tool listed for this case.
///
/// Partners share the category and variant type of the record they were
/// listed on. Entries whose name or score cannot be read are skipped and
/// pushed to `issues`.
///
pub fn parse_compounds(
    raw: &RawVariantRecord,
    case: &Case,
    variant_type: VariantType,
    category: Category,
    issues: &mut Vec<DiagnosticKind>,
) -> Vec<Compound> {
    let Some(entries) = raw.compound_variants.get(&case.display_name) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let compound = parse_compound(entry, case, variant_type, category);
            if compound.is_none() {
                issues.push(DiagnosticKind::InvalidCompound(entry.variant_name.clone()));
            }
            compound
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::models::RawScalar;

    fn compound(name: &str, score: Option<RawScalar>) -> RawCompound {
        RawCompound {
            variant_name: name.to_string(),
            compound_score: score,
        }
    }

    #[rstest]
    fn test_compounds_for_case() {
        let mut raw = RawVariantRecord::new("1", 100, "A", "T");
        raw.compound_variants.insert(
            "643594".to_string(),
            vec![
                compound("1_200_G_C", Some(RawScalar::from("23"))),
                compound("1_x_G_C", Some(RawScalar::from(10i64))),
                compound("1_300_G_C", None),
            ],
        );
        raw.compound_variants.insert(
            "other".to_string(),
            vec![compound("1_400_G_C", Some(RawScalar::from(1i64)))],
        );
        let case = Case::new("cust000-643594", "643594");

        let mut issues = Vec::new();
        let compounds =
            parse_compounds(&raw, &case, VariantType::Clinical, Category::Snv, &mut issues);

        let expected_id = VariantKey {
            chrom: "1",
            pos: 200,
            reference: "G",
            alternative: "C",
            category: Category::Snv,
        }
        .document_id(VariantType::Clinical, "cust000-643594");

        assert_eq!(
            compounds,
            vec![Compound {
                variant: expected_id,
                display_name: "1_200_G_C".to_string(),
                combined_score: 23.0,
            }]
        );
        assert_eq!(
            issues,
            vec![
                DiagnosticKind::InvalidCompound("1_x_G_C".to_string()),
                DiagnosticKind::InvalidCompound("1_300_G_C".to_string()),
            ]
        );
    }

    #[rstest]
    #[case("chr1_KI270706v1_random_1500_A_G", "chr1_KI270706v1_random", 1500, "A", "G")]
    #[case("HLA-A*01:01:01:01_12_T_CA", "HLA-A*01:01:01:01", 12, "T", "CA")]
    #[case("1_200_G_C", "1", 200, "G", "C")]
    fn test_contig_names_with_underscores(
        #[case] name: &str,
        #[case] chrom: &str,
        #[case] pos: i64,
        #[case] reference: &str,
        #[case] alternative: &str,
    ) {
        let mut raw = RawVariantRecord::new("1", 100, "A", "T");
        raw.compound_variants.insert(
            "643594".to_string(),
            vec![compound(name, Some(RawScalar::from(5i64)))],
        );
        let case = Case::new("cust000-643594", "643594");

        let mut issues = Vec::new();
        let compounds =
            parse_compounds(&raw, &case, VariantType::Clinical, Category::Snv, &mut issues);
        assert!(issues.is_empty());

        let expected_id = VariantKey {
            chrom,
            pos,
            reference,
            alternative,
            category: Category::Snv,
        }
        .document_id(VariantType::Clinical, "cust000-643594");
        assert_eq!(compounds[0].variant, expected_id);
    }

    #[rstest]
    fn test_no_compounds_is_empty() {
        let raw = RawVariantRecord::new("1", 100, "A", "T");
        let mut issues = Vec::new();
        let compounds = parse_compounds(
            &raw,
            &Case::new("c", "c"),
            VariantType::Research,
            Category::Snv,
            &mut issues,
        );
        assert!(compounds.is_empty());
        assert!(issues.is_empty());
    }
}
