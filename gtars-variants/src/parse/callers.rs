use serde::{Deserialize, Serialize};

use crate::consts::{CALLER_SET_KEY, KNOWN_CALLERS};
use crate::models::RawVariantRecord;
use crate::schema::info_first;

const INTERSECTION: &str = "Intersection";
const FILTERED_IN_ALL: &str = "FilteredInAll";
const FILTERED_PREFIX: &str = "filterIn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CallerStatus {
    Pass,
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CallerVote {
    pub caller: String,
    pub status: CallerStatus,
}

///
/// Read the caller votes from the GATK CombineVariants `set` annotation, e.g.
/// `gatk-filterInfreebayes` or `Intersection`.
///
/// Votes come back in [`KNOWN_CALLERS`] order; callers that the annotation
/// does not mention are left out.
///
pub fn parse_callers(raw: &RawVariantRecord) -> Vec<CallerVote> {
    let mut votes: [Option<CallerStatus>; KNOWN_CALLERS.len()] = [None; KNOWN_CALLERS.len()];

    let Some(set) = info_first(raw, CALLER_SET_KEY) else {
        return Vec::new();
    };

    for call in set.split('-') {
        if call == FILTERED_IN_ALL {
            votes = [Some(CallerStatus::Filtered); KNOWN_CALLERS.len()];
        } else if call == INTERSECTION {
            votes = [Some(CallerStatus::Pass); KNOWN_CALLERS.len()];
        } else if let Some(filtered) = call.strip_prefix(FILTERED_PREFIX) {
            for (vote, caller) in votes.iter_mut().zip(KNOWN_CALLERS) {
                if filtered.contains(caller) {
                    *vote = Some(CallerStatus::Filtered);
                }
            }
        } else if let Some(i) = KNOWN_CALLERS.iter().position(|c| *c == call) {
            votes[i] = Some(CallerStatus::Pass);
        }
    }

    KNOWN_CALLERS
        .iter()
        .zip(votes)
        .filter_map(|(caller, status)| {
            status.map(|status| CallerVote {
                caller: caller.to_string(),
                status,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn votes(set: &str) -> Vec<(String, CallerStatus)> {
        let raw = RawVariantRecord::new("1", 1, "A", "G").with_info(CALLER_SET_KEY, &[set]);
        parse_callers(&raw)
            .into_iter()
            .map(|v| (v.caller, v.status))
            .collect()
    }

    #[rstest]
    fn test_intersection() {
        assert_eq!(
            votes("Intersection"),
            vec![
                ("gatk".to_string(), CallerStatus::Pass),
                ("freebayes".to_string(), CallerStatus::Pass),
                ("samtools".to_string(), CallerStatus::Pass),
            ]
        );
    }

    #[rstest]
    fn test_filtered_in_all() {
        assert!(votes("FilteredInAll")
            .iter()
            .all(|(_, status)| *status == CallerStatus::Filtered));
    }

    #[rstest]
    fn test_mixed() {
        assert_eq!(
            votes("gatk-filterInfreebayes"),
            vec![
                ("gatk".to_string(), CallerStatus::Pass),
                ("freebayes".to_string(), CallerStatus::Filtered),
            ]
        );
    }

    #[rstest]
    fn test_no_set_annotation() {
        let raw = RawVariantRecord::new("1", 1, "A", "G");
        assert!(parse_callers(&raw).is_empty());
    }
}
