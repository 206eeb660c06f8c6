use rayon::prelude::*;

use crate::assemble::VariantParser;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::errors::VariantError;
use crate::models::{CanonicalVariant, Case, RawVariantRecord};

/// Outcome of parsing a batch of records for one case.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Parsed variants, in input order.
    pub variants: Vec<CanonicalVariant>,
    /// Records that could not be parsed, in input order.
    pub malformed: Vec<VariantError>,
}

impl BatchReport {
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }
}

///
/// Parse every record of a VCF for `case` in parallel.
///
/// A malformed record is skipped and reported to `sink`; it never fails the
/// batch. The order of `records` is kept in both halves of the report.
///
pub fn parse_batch(
    records: &[RawVariantRecord],
    case: &Case,
    parser: &VariantParser,
    sink: &dyn DiagnosticSink,
) -> BatchReport {
    let results: Vec<_> = records
        .par_iter()
        .map(|raw| parser.parse(raw, case, sink))
        .collect();

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(variant) => report.variants.push(variant),
            Err(err) => {
                sink.report(Diagnostic::from(&err));
                report.malformed.push(err);
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::config::ParserConfig;
    use crate::consts::SVTYPE_KEY;
    use crate::diagnostics::{CollectingSink, DiagnosticKind};
    use crate::errors::MalformedReason;

    #[rstest]
    fn test_malformed_records_are_skipped() {
        let case = Case::new("cust000-1", "1");
        let parser = VariantParser::new(ParserConfig::default());
        let sink = CollectingSink::new();

        let records: Vec<RawVariantRecord> = (1..=50)
            .map(|pos| {
                if pos % 10 == 0 {
                    RawVariantRecord::new("3", pos, "N", "<DEL>").with_info(SVTYPE_KEY, &["DEL"])
                } else {
                    RawVariantRecord::new("3", pos, "A", "C")
                }
            })
            .collect();

        let report = parse_batch(&records, &case, &parser, &sink);

        assert_eq!(report.variants.len(), 45);
        assert_eq!(report.malformed_count(), 5);
        let positions: Vec<i64> = report.variants.iter().map(|v| v.position).collect();
        let expected: Vec<i64> = (1..=50).filter(|p| p % 10 != 0).collect();
        assert_eq!(positions, expected);

        assert_eq!(sink.len(), 5);
        assert!(sink.diagnostics().iter().all(|d| d.kind
            == DiagnosticKind::MalformedRecord(MalformedReason::MissingEnd("del".to_string()))));
    }

    #[rstest]
    fn test_empty_batch() {
        let report = parse_batch(
            &[],
            &Case::new("cust000-1", "1"),
            &VariantParser::default(),
            &CollectingSink::new(),
        );
        assert!(report.variants.is_empty());
        assert_eq!(report.malformed_count(), 0);
    }
}
