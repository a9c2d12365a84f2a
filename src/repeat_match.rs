//! Direct IRa/IRb matching: first over `repeat_region` features, then
//! over `misc_feature` notes.

use crate::feature_location::{feature_bounds, feature_len};
use crate::ir::{IrPair, IrRegion};
use crate::note_match::{has_qualifier, note, rpt_type, NoteMatcher, JUNCTION_BLACKLIST};
use gb_io::seq::Feature;
use itertools::Itertools;
use log::{debug, info};

const IRA_IDENTIFIERS: &[&str] = &["ira", "inverted repeat a"];
const IRB_IDENTIFIERS: &[&str] = &["irb", "inverted repeat b"];

const IRA_NOTE: NoteMatcher = NoteMatcher::new(IRA_IDENTIFIERS, &[], JUNCTION_BLACKLIST);
const IRB_NOTE: NoteMatcher = NoteMatcher::new(IRB_IDENTIFIERS, &[], JUNCTION_BLACKLIST);

/// Minimum span for a misc_feature note to count as an IR annotation.
const MIN_MISC_IR_LEN: i64 = 100;

fn contains_any(note_lower: &str, identifiers: &[&str]) -> bool {
    identifiers.iter().any(|token| note_lower.contains(token))
}

/// The general-IR tier: "inverted" and "repeat" co-occurring in any
/// case, or a literal upper-case "IR" token.
fn has_general_ir_token(raw: &str, lower: &str) -> bool {
    (lower.contains("inverted") && lower.contains("repeat")) || raw.contains("IR")
}

/// Candidates sorted by start coordinate, so ordinal fallback means
/// "leftmost in the genome", not "first in the feature table".
fn by_start<'a>(
    features: &[&'a Feature],
    filter: impl Fn(&Feature) -> bool,
) -> Vec<&'a Feature> {
    features
        .iter()
        .copied()
        .filter(|feature| filter(feature))
        .sorted_by_key(|feature| feature_bounds(feature).map(|(start, _)| start).unwrap_or(i64::MAX))
        .collect()
}

/// Scan `repeat_region` features for the IR pair.
///
/// First pass: features typed `rpt_type=inverted` and longer than
/// `min_ir_len`. An identifying note assigns the copy directly; without
/// one, the first unassigned slot is filled IRb-first (IRb precedes IRa
/// in the canonical layout). Second pass: the same ordinal rule over
/// note-bearing repeat features lacking the `rpt_type` qualifier.
pub fn match_repeat_features(features: &[&Feature], mut pair: IrPair, min_ir_len: i64) -> IrPair {
    debug!("checking repeat_region features with rpt_type qualifier for IR information");
    for feature in by_start(features, |f| has_qualifier(f, "rpt_type")) {
        if !rpt_type(feature)
            .map(|value| value.eq_ignore_ascii_case("inverted"))
            .unwrap_or(false)
        {
            continue;
        }
        let Some(region) = IrRegion::from_feature(feature) else {
            continue;
        };
        if feature_len(feature) <= min_ir_len {
            info!(
                "inverted repeat at {}..{} is too small (<= {} bp) to be IRa or IRb",
                region.start, region.end, min_ir_len
            );
            continue;
        }
        match note(feature).map(|text| text.to_ascii_lowercase()) {
            Some(lower) if contains_any(&lower, IRA_IDENTIFIERS) => {
                debug!("found identifier for IRa");
                pair.ira = Some(region);
            }
            Some(lower) if contains_any(&lower, IRB_IDENTIFIERS) => {
                debug!("found identifier for IRb");
                pair.irb = Some(region);
            }
            _ if pair.irb.is_none() => {
                debug!("no identifying note; assigned feature as IRb");
                pair.irb = Some(region);
            }
            _ if pair.ira.is_none() => {
                debug!("no identifying note; assigned feature as IRa");
                pair.ira = Some(region);
            }
            _ => {}
        }
    }

    if pair.is_complete() {
        return pair;
    }

    debug!(
        "{} of 2 IR positions found; checking repeat_region features without rpt_type qualifier",
        pair.found_count()
    );
    for feature in by_start(features, |f| !has_qualifier(f, "rpt_type")) {
        let Some(raw) = note(feature) else {
            continue;
        };
        let Some(region) = IrRegion::from_feature(feature) else {
            continue;
        };
        let lower = raw.to_ascii_lowercase();
        if contains_any(&lower, IRA_IDENTIFIERS) {
            debug!("found identifier for IRa");
            pair.ira = Some(region);
        } else if contains_any(&lower, IRB_IDENTIFIERS) {
            debug!("found identifier for IRb");
            pair.irb = Some(region);
        } else if has_general_ir_token(raw, &lower) {
            if pair.irb.is_none() {
                debug!("general IR identifier; assigned feature as IRb");
                pair.irb = Some(region);
            } else if pair.ira.is_none() {
                debug!("general IR identifier; assigned feature as IRa");
                pair.ira = Some(region);
            }
        } else {
            info!(
                "repeat region at {}..{} has no identifying information; ignored",
                region.start, region.end
            );
        }
    }

    pair
}

/// Scan pseudo-free `misc_feature` notes for the IR pair, filling only
/// open slots. Hard IRa/IRb identifiers first, then the general-IR
/// tier, all blacklist-filtered and length-filtered.
pub fn match_misc_features(features: &[&Feature], mut pair: IrPair) -> IrPair {
    for feature in features {
        let Some(raw) = note(feature) else {
            continue;
        };
        let lower = raw.to_ascii_lowercase();
        if pair.ira.is_none() && IRA_NOTE.matches_hard(&lower) {
            debug!("found identifier for IRa: `{raw}`");
            if feature_len(feature) > MIN_MISC_IR_LEN {
                pair.ira = IrRegion::from_feature(feature);
            } else {
                debug!("feature is too short ({} bp) to be an IR", feature_len(feature));
            }
        }
        if pair.irb.is_none() && IRB_NOTE.matches_hard(&lower) {
            debug!("found identifier for IRb: `{raw}`");
            if feature_len(feature) > MIN_MISC_IR_LEN {
                pair.irb = IrRegion::from_feature(feature);
            } else {
                debug!("feature is too short ({} bp) to be an IR", feature_len(feature));
            }
        }
    }

    if pair.is_complete() {
        return pair;
    }

    for feature in features {
        let Some(raw) = note(feature) else {
            continue;
        };
        let lower = raw.to_ascii_lowercase();
        if !has_general_ir_token(raw, &lower)
            || JUNCTION_BLACKLIST.iter().any(|token| lower.contains(token))
        {
            continue;
        }
        debug!("found general identifier for IRs: `{raw}`");
        if feature_len(feature) <= MIN_MISC_IR_LEN {
            debug!("feature is too short ({} bp) to be an IR", feature_len(feature));
            continue;
        }
        if pair.irb.is_none() {
            pair.irb = IrRegion::from_feature(feature);
        } else if pair.ira.is_none() {
            pair.ira = IrRegion::from_feature(feature);
        }
    }

    pair
}
