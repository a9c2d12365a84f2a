//! IR construction from annotated single-copy regions: the IRs are the
//! two complement arcs between the LSC and the SSC.

use crate::feature_location::feature_bounds;
use crate::ir::{IrPair, IrRegion};
use crate::note_match::{note, NoteMatcher, JUNCTION_BLACKLIST};
use gb_io::seq::Feature;
use log::debug;

const LSC_NOTE: NoteMatcher =
    NoteMatcher::new(&["lsc", "large single copy"], &[], JUNCTION_BLACKLIST);
const SSC_NOTE: NoteMatcher =
    NoteMatcher::new(&["ssc", "small single copy"], &[], JUNCTION_BLACKLIST);

/// Derive IR intervals as the complement arcs around the annotated
/// single-copy regions; fills only slots the caller has not resolved.
/// The arc crossing the origin is mapped to `..record_len` so no
/// interval has negative length.
pub fn build_irs_from_single_copy(
    record_len: i64,
    features: &[&Feature],
    mut pair: IrPair,
) -> IrPair {
    let mut lsc = None;
    let mut ssc = None;
    for feature in features {
        let Some(text) = note(feature) else {
            continue;
        };
        let lower = text.to_ascii_lowercase();
        if SSC_NOTE.matches_hard(&lower) {
            debug!("found identifier for SSC");
            ssc = feature_bounds(feature);
        }
        if LSC_NOTE.matches_hard(&lower) {
            debug!("found identifier for LSC");
            lsc = feature_bounds(feature);
        }
    }

    let (Some(lsc), Some(ssc)) = (lsc, ssc) else {
        return pair;
    };

    // The region with the smaller start decides the arrangement; the arc
    // behind the later region wraps to the record end when the earlier
    // region starts at the origin.
    if lsc.0 < ssc.0 {
        let ira_end = if lsc.0 == 0 { record_len } else { lsc.0 };
        if pair.ira.is_none() {
            debug!("constructing IRa from single-copy positions");
            pair.ira = Some(IrRegion::new(ssc.1, ira_end));
        }
        if pair.irb.is_none() {
            debug!("constructing IRb from single-copy positions");
            pair.irb = Some(IrRegion::new(lsc.1, ssc.0));
        }
    } else {
        let ira_end = if ssc.0 == 0 { record_len } else { ssc.0 };
        if pair.ira.is_none() {
            debug!("constructing IRa from single-copy positions");
            pair.ira = Some(IrRegion::new(lsc.1, ira_end));
        }
        if pair.irb.is_none() {
            debug!("constructing IRb from single-copy positions");
            pair.irb = Some(IrRegion::new(ssc.1, lsc.0));
        }
    }

    pair
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_io::seq::{FeatureKind, Location};

    fn misc(start: i64, end: i64, note_text: &str) -> Feature {
        Feature {
            kind: FeatureKind::from("misc_feature"),
            location: Location::simple_range(start, end),
            qualifiers: vec![("note".into(), Some(note_text.to_string()))],
        }
    }

    #[test]
    fn complement_arcs_sum_to_record_length() {
        let features = vec![
            misc(0, 100, "large single copy region (LSC)"),
            misc(5_000, 5_100, "small single copy region (SSC)"),
        ];
        let refs: Vec<&Feature> = features.iter().collect();
        let pair = build_irs_from_single_copy(10_000, &refs, IrPair::default());
        let ira = pair.ira.unwrap();
        let irb = pair.irb.unwrap();
        assert_eq!(irb, IrRegion::new(100, 5_000));
        assert_eq!(ira, IrRegion::new(5_100, 10_000));
        assert_eq!(ira.len_in(10_000) + irb.len_in(10_000) + 100 + 100, 10_000);
    }

    #[test]
    fn ssc_before_lsc_swaps_the_arcs() {
        let features = vec![
            misc(0, 2_000, "SSC"),
            misc(30_000, 110_000, "LSC"),
        ];
        let refs: Vec<&Feature> = features.iter().collect();
        let pair = build_irs_from_single_copy(140_000, &refs, IrPair::default());
        assert_eq!(pair.ira, Some(IrRegion::new(110_000, 140_000)));
        assert_eq!(pair.irb, Some(IrRegion::new(2_000, 30_000)));
    }

    #[test]
    fn junction_notes_do_not_count_as_single_copy_regions() {
        let features = vec![
            misc(0, 100, "LSC"),
            misc(5_000, 5_100, "SSC-IRa junction"),
        ];
        let refs: Vec<&Feature> = features.iter().collect();
        assert_eq!(
            build_irs_from_single_copy(10_000, &refs, IrPair::default()),
            IrPair::default()
        );
    }

    #[test]
    fn does_not_overwrite_resolved_slots() {
        let features = vec![misc(0, 100, "LSC"), misc(5_000, 5_100, "SSC")];
        let refs: Vec<&Feature> = features.iter().collect();
        let existing = IrPair {
            irb: Some(IrRegion::new(200, 4_800)),
            ira: None,
        };
        let pair = build_irs_from_single_copy(10_000, &refs, existing);
        assert_eq!(pair.irb, Some(IrRegion::new(200, 4_800)));
        assert_eq!(pair.ira, Some(IrRegion::new(5_100, 10_000)));
    }
}
