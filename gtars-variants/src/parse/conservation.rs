use serde::{Deserialize, Serialize};

use crate::models::RawVariantRecord;
use crate::schema::info_values;

const GERP_KEY: &str = "GERP++_RS_prediction_term";
const PHAST_KEY: &str = "phastCons100way_vertebrate_prediction_term";
const PHYLOP_KEY: &str = "phyloP100way_vertebrate_prediction_term";

/// Conservation terms (`Conserved`, `NotConserved`) per track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Conservation {
    pub gerp: Vec<String>,
    pub phast: Vec<String>,
    pub phylop: Vec<String>,
}

fn terms(raw: &RawVariantRecord, key: &str) -> Vec<String> {
    info_values(raw, key).map(str::to_string).collect()
}

pub fn parse_conservations(raw: &RawVariantRecord) -> Conservation {
    Conservation {
        gerp: terms(raw, GERP_KEY),
        phast: terms(raw, PHAST_KEY),
        phylop: terms(raw, PHYLOP_KEY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_tracks() {
        let raw = RawVariantRecord::new("1", 1, "A", "G")
            .with_info(GERP_KEY, &["Conserved", "NotConserved"])
            .with_info(PHYLOP_KEY, &["."]);

        assert_eq!(
            parse_conservations(&raw),
            Conservation {
                gerp: vec!["Conserved".to_string(), "NotConserved".to_string()],
                phast: vec![],
                phylop: vec![],
            }
        );
    }
}
