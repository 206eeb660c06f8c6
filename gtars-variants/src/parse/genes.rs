use std::collections::HashMap;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::consts::MISSING_VALUE;
use crate::models::RawVariantRecord;

/// Sequence Ontology consequence terms, most severe first (Ensembl VEP order).
const CONSEQUENCE_SEVERITY: [&str; 36] = [
    "transcript_ablation",
    "splice_acceptor_variant",
    "splice_donor_variant",
    "stop_gained",
    "frameshift_variant",
    "stop_lost",
    "start_lost",
    "transcript_amplification",
    "inframe_insertion",
    "inframe_deletion",
    "missense_variant",
    "protein_altering_variant",
    "splice_region_variant",
    "incomplete_terminal_codon_variant",
    "start_retained_variant",
    "stop_retained_variant",
    "synonymous_variant",
    "coding_sequence_variant",
    "mature_miRNA_variant",
    "5_prime_UTR_variant",
    "3_prime_UTR_variant",
    "non_coding_transcript_exon_variant",
    "intron_variant",
    "NMD_transcript_variant",
    "non_coding_transcript_variant",
    "upstream_gene_variant",
    "downstream_gene_variant",
    "TFBS_ablation",
    "TFBS_amplification",
    "TF_binding_site_variant",
    "regulatory_region_ablation",
    "regulatory_region_amplification",
    "feature_elongation",
    "regulatory_region_variant",
    "feature_truncation",
    "intergenic_variant",
];

/// Rank of a consequence term; unknown terms rank after every known one.
fn severity_rank(term: &str) -> usize {
    CONSEQUENCE_SEVERITY
        .iter()
        .position(|known| *known == term)
        .unwrap_or(CONSEQUENCE_SEVERITY.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transcript {
    pub transcript_id: String,
    pub biotype: Option<String>,
    pub consequences: Vec<String>,
    pub is_canonical: bool,
    pub hgvs_c: Option<String>,
    pub hgvs_p: Option<String>,
}

/// Annotation of one gene overlapped by the variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Gene {
    pub ensembl_gene_id: String,
    pub hgnc_symbol: Option<String>,
    pub transcripts: Vec<Transcript>,
    pub most_severe_consequence: Option<String>,
}

fn field<'a>(entry: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && *v != MISSING_VALUE)
}

fn transcript(entry: &HashMap<String, String>, transcript_id: &str) -> Transcript {
    Transcript {
        transcript_id: transcript_id.to_string(),
        biotype: field(entry, "BIOTYPE").map(str::to_string),
        consequences: field(entry, "Consequence")
            .map(|c| c.split('&').map(str::to_string).collect())
            .unwrap_or_default(),
        is_canonical: field(entry, "CANONICAL") == Some("YES"),
        hgvs_c: field(entry, "HGVSc").map(str::to_string),
        hgvs_p: field(entry, "HGVSp").map(str::to_string),
    }
}

///
/// Group the per-transcript VEP annotation into one fragment per gene, in
/// order of first appearance.
///
/// Entries without a gene id (intergenic and regulatory features) are skipped.
///
pub fn parse_genes(raw: &RawVariantRecord) -> Vec<Gene> {
    let mut genes: Vec<Gene> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for entry in &raw.vep_info {
        let Some(gene_id) = field(entry, "Gene") else {
            continue;
        };

        let slot = *index.entry(gene_id.to_string()).or_insert_with(|| {
            genes.push(Gene {
                ensembl_gene_id: gene_id.to_string(),
                hgnc_symbol: None,
                transcripts: Vec::new(),
                most_severe_consequence: None,
            });
            genes.len() - 1
        });
        let gene = &mut genes[slot];

        if gene.hgnc_symbol.is_none() {
            gene.hgnc_symbol = field(entry, "SYMBOL").map(str::to_string);
        }
        if let Some(transcript_id) = field(entry, "Feature") {
            gene.transcripts.push(transcript(entry, transcript_id));
        }
    }

    for gene in &mut genes {
        gene.most_severe_consequence = gene
            .transcripts
            .iter()
            .flat_map(|tx| tx.consequences.iter())
            .min_by_key(|c| severity_rank(c))
            .cloned();
    }

    genes
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn entry(fields: &[(&str, &str)]) -> HashMap<String, String> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[fixture]
    fn cftr_record() -> RawVariantRecord {
        let mut raw = RawVariantRecord::new("7", 117199644, "ATCT", "A");
        raw.vep_info = vec![
            entry(&[
                ("Gene", "ENSG00000001626"),
                ("SYMBOL", "CFTR"),
                ("Feature", "ENST00000003084"),
                ("BIOTYPE", "protein_coding"),
                ("Consequence", "inframe_deletion"),
                ("CANONICAL", "YES"),
                ("HGVSc", "ENST00000003084.6:c.1521_1523del"),
                ("HGVSp", "ENSP00000003084.6:p.Phe508del"),
            ]),
            entry(&[
                ("Gene", "ENSG00000001626"),
                ("SYMBOL", "CFTR"),
                ("Feature", "ENST00000426809"),
                ("Consequence", "splice_region_variant&intron_variant"),
            ]),
            entry(&[
                ("Gene", "ENSG00000232661"),
                ("SYMBOL", "."),
                ("Feature", "ENST00000441019"),
                ("Consequence", "upstream_gene_variant"),
            ]),
            entry(&[("Feature", "ENSR00000212711"), ("Consequence", "regulatory_region_variant")]),
        ];
        raw
    }

    #[rstest]
    fn test_one_fragment_per_gene(cftr_record: RawVariantRecord) {
        let genes = parse_genes(&cftr_record);
        let ids: Vec<&str> = genes.iter().map(|g| g.ensembl_gene_id.as_str()).collect();
        assert_eq!(ids, vec!["ENSG00000001626", "ENSG00000232661"]);

        let cftr = &genes[0];
        assert_eq!(cftr.hgnc_symbol.as_deref(), Some("CFTR"));
        assert_eq!(cftr.transcripts.len(), 2);
        assert_eq!(cftr.most_severe_consequence.as_deref(), Some("inframe_deletion"));
        assert!(cftr.transcripts[0].is_canonical);
        assert!(!cftr.transcripts[1].is_canonical);
        assert_eq!(
            cftr.transcripts[1].consequences,
            vec!["splice_region_variant", "intron_variant"]
        );

        assert_eq!(genes[1].hgnc_symbol, None);
    }

    #[rstest]
    fn test_no_annotation() {
        let raw = RawVariantRecord::new("1", 1, "A", "C");
        assert!(parse_genes(&raw).is_empty());
    }

    #[rstest]
    #[case("transcript_ablation", 0)]
    #[case("intergenic_variant", 35)]
    #[case("made_up_term", 36)]
    fn test_severity_rank(#[case] term: &str, #[case] rank: usize) {
        assert_eq!(severity_rank(term), rank);
    }
}
