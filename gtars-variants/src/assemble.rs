//! Assembly of a [`CanonicalVariant`] from one raw record.

use std::collections::BTreeSet;

use crate::config::ParserConfig;
use crate::consts::{CADD_KEY, SPIDEX_KEY};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::errors::{MalformedReason, Result, VariantError};
use crate::ids::{VariantIds, VariantKey};
use crate::models::{CanonicalVariant, Case, RawVariantRecord};
use crate::parse::{
    parse_callers, parse_clnsig, parse_compounds, parse_conservations, parse_frequencies,
    parse_genes, parse_genotypes,
};
use crate::rank::parse_rank_result;
use crate::resolver::resolve_coordinates;
use crate::schema;

///
/// Turns raw records into canonical variants.
///
/// The parser holds configuration only, so one instance can be shared across
/// threads and records.
///
#[derive(Debug, Clone, Default)]
pub struct VariantParser {
    config: ParserConfig,
}

impl VariantParser {
    pub fn new(config: ParserConfig) -> Self {
        VariantParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn malformed(raw: &RawVariantRecord, case: &Case, reason: MalformedReason) -> VariantError {
        let (chrom, pos) = schema::locus(raw);
        VariantError::Malformed {
            chrom,
            pos,
            case_id: case.case_id.clone(),
            reason,
        }
    }

    fn flush(
        raw: &RawVariantRecord,
        case: &Case,
        issues: Vec<DiagnosticKind>,
        sink: &dyn DiagnosticSink,
    ) {
        if issues.is_empty() {
            return;
        }
        let (chrom, pos) = schema::locus(raw);
        for kind in issues {
            sink.report(Diagnostic {
                chrom: chrom.clone(),
                pos,
                case_id: case.case_id.clone(),
                kind,
            });
        }
    }

    ///
    /// Parse one record for `case`.
    ///
    /// Fails only when the record lacks a mandatory field or, for structural
    /// variants, the type or end needed to place it. Everything optional that
    /// cannot be read is left empty and reported to `sink`.
    ///
    pub fn parse(
        &self,
        raw: &RawVariantRecord,
        case: &Case,
        sink: &dyn DiagnosticSink,
    ) -> Result<CanonicalVariant> {
        let mut issues: Vec<DiagnosticKind> = Vec::new();
        let result = self.assemble(raw, case, &mut issues);
        Self::flush(raw, case, issues, sink);
        result
    }

    fn assemble(
        &self,
        raw: &RawVariantRecord,
        case: &Case,
        issues: &mut Vec<DiagnosticKind>,
    ) -> Result<CanonicalVariant> {
        let variant_type = self.config.variant_type;

        // fixed before anything else reads the record
        let category = schema::category(raw, self.config.category);

        let fields =
            schema::required_fields(raw).map_err(|reason| Self::malformed(raw, case, reason))?;

        let sv = schema::sv_annotation(raw, issues);
        let coordinates = resolve_coordinates(
            fields.reference,
            fields.alternative,
            fields.pos,
            category,
            &sv,
        )
        .map_err(|reason| Self::malformed(raw, case, reason))?;

        let key = VariantKey {
            chrom: fields.chrom,
            pos: fields.pos,
            reference: fields.reference,
            alternative: fields.alternative,
            category,
        };
        let ids = VariantIds::new(&key, variant_type, &case.case_id);

        let samples = parse_genotypes(raw, case);
        let compounds = parse_compounds(raw, case, variant_type, category, issues);
        let clnsig = parse_clnsig(raw);
        let genes = parse_genes(raw);
        let frequencies = parse_frequencies(raw);
        let conservation = parse_conservations(raw);
        let callers = parse_callers(raw);
        let rank_result = parse_rank_result(raw, &self.config.rank_results_header, issues);

        // every gene fragment is in; fold them into the lookup sets
        let hgnc_symbols: BTreeSet<String> = genes
            .iter()
            .filter_map(|g| g.hgnc_symbol.clone())
            .collect();
        let ensembl_gene_ids: BTreeSet<String> =
            genes.iter().map(|g| g.ensembl_gene_id.clone()).collect();

        Ok(CanonicalVariant {
            ids,
            case_id: case.case_id.clone(),
            category,
            variant_type,
            chromosome: fields.chrom.to_string(),
            position: fields.pos,
            coordinates,
            reference: fields.reference.to_string(),
            alternative: fields.alternative.to_string(),
            quality: schema::quality(raw, issues),
            filters: schema::filters(raw),
            db_snp_ids: schema::db_snp_ids(raw),
            rank_score: schema::rank_score(raw, case, issues),
            rank_result,
            genetic_models: schema::genetic_models(raw, case),
            samples,
            compounds,
            clnsig,
            genes,
            hgnc_symbols,
            ensembl_gene_ids,
            frequencies,
            conservation,
            cadd_score: schema::info_parsed(raw, CADD_KEY, issues),
            spidex: schema::info_parsed(raw, SPIDEX_KEY, issues),
            callers,
        })
    }
}
