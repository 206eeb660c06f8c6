use serde::{Deserialize, Serialize};

use crate::models::RawVariantRecord;
use crate::schema::info_values;

/// Population allele frequencies, one per source database.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Frequencies {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thousand_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thousand_g_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exac: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exac_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gnomad: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gnomad_max: Option<f64>,
}

impl Frequencies {
    pub fn is_empty(&self) -> bool {
        *self == Frequencies::default()
    }
}

///
/// First parsable frequency under any of `keys`, tried in order.
///
fn frequency(raw: &RawVariantRecord, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        info_values(raw, key)
            .next()
            .and_then(|v| v.parse::<f64>().ok())
    })
}

pub fn parse_frequencies(raw: &RawVariantRecord) -> Frequencies {
    Frequencies {
        thousand_g: frequency(raw, &["1000GAF"]),
        thousand_g_max: frequency(raw, &["1000G_MAX_AF"]),
        exac: frequency(raw, &["EXACAF"]),
        exac_max: frequency(raw, &["ExAC_MAX_AF", "EXAC_MAX_AF"]),
        gnomad: frequency(raw, &["GNOMADAF", "gnomAD_AF"]),
        gnomad_max: frequency(raw, &["GNOMADAF_MAX", "GNOMADAF_popmax"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_sources_and_aliases() {
        let raw = RawVariantRecord::new("1", 1, "A", "G")
            .with_info("1000GAF", &["0.0234"])
            .with_info("EXAC_MAX_AF", &["0.1"])
            .with_info("GNOMADAF", &["junk"])
            .with_info("gnomAD_AF", &["0.002"]);

        assert_eq!(
            parse_frequencies(&raw),
            Frequencies {
                thousand_g: Some(0.0234),
                exac_max: Some(0.1),
                gnomad: Some(0.002),
                ..Default::default()
            }
        );
    }

    #[rstest]
    fn test_no_frequencies() {
        let raw = RawVariantRecord::new("1", 1, "A", "G").with_info("EXACAF", &["."]);
        assert!(parse_frequencies(&raw).is_empty());
    }
}
