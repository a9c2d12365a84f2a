//! The cascading IR resolver: direct repeat-feature evidence, then
//! misc_feature notes, then junction algebra, then single-copy
//! complements, each stage filling only the slots still open and each
//! tentative IR re-checked against the minimum-length floor.

use crate::ir::{IrPair, IrSettings};
use crate::junction::{build_irs_from_junctions, JunctionSet};
use crate::note_match::{has_qualifier, note};
use crate::record::PlastidRecord;
use crate::{repeat_match, single_copy};
use gb_io::seq::Feature;
use log::{debug, warn};
use rayon::prelude::*;
use std::error::Error;
use std::fmt;

/// Terminal failures: the record's annotation lacks what the resolver
/// depends on. A partial pair (one IR found) is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// Neither `repeat_region` nor `misc_feature` features present.
    NoIrBearingFeatures,
    /// No `misc_feature` carries the `note` qualifier the IRs are
    /// typically named with.
    NoNoteQualifiers,
    /// No pseudo-free `misc_feature` marks the single-copy regions.
    NoSingleCopyFeatures,
    /// Every stage exhausted with neither IR resolved.
    Unresolvable,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResolveError::NoIrBearingFeatures => write!(
                f,
                "record does not contain any features which the IRs are typically marked with \
                 (i.e., `repeat_region`, `misc_feature`)"
            ),
            ResolveError::NoNoteQualifiers => write!(
                f,
                "record does not contain any `note` qualifiers for feature `misc_feature` \
                 which the IRs are typically named with"
            ),
            ResolveError::NoSingleCopyFeatures => write!(
                f,
                "record does not contain any features which the single-copy regions are \
                 typically marked with (i.e., `misc_feature`)"
            ),
            ResolveError::Unresolvable => write!(
                f,
                "record does not contain the information necessary to infer the position of \
                 either the IRs or the single-copy regions"
            ),
        }
    }
}

impl Error for ResolveError {}

/// Locate IRa and IRb in one record.
///
/// Returns the pair on success, which may have one side unresolved
/// (a valid partial result the caller is expected to report).
pub fn resolve_inverted_repeats(
    record: &PlastidRecord,
    settings: IrSettings,
) -> Result<IrPair, ResolveError> {
    let record_len = record.len() as i64;
    let repeat_features = record.features_of_kind("repeat_region");
    let misc_features = record.features_of_kind("misc_feature");
    // Pseudogene annotations must not be mistaken for IR or single-copy
    // markers.
    let misc_no_pseudo: Vec<&Feature> = misc_features
        .iter()
        .copied()
        .filter(|feature| !has_qualifier(feature, "pseudo"))
        .collect();

    if repeat_features.is_empty() && misc_features.is_empty() {
        return Err(ResolveError::NoIrBearingFeatures);
    }

    let mut pair = repeat_match::match_repeat_features(
        &repeat_features,
        IrPair::default(),
        settings.min_ir_len,
    );

    if pair.found_count() == 0 && !misc_features.iter().any(|feature| note(feature).is_some()) {
        return Err(ResolveError::NoNoteQualifiers);
    }

    if !pair.is_complete() {
        debug!(
            "{} of 2 IR positions found; checking misc_feature note qualifiers",
            pair.found_count()
        );
        pair = repeat_match::match_misc_features(&misc_no_pseudo, pair);
    }
    pair = discard_short(pair, record_len, settings.min_ir_len);

    if !pair.is_complete() {
        debug!(
            "{} of 2 IR positions found; checking misc_features for junction information",
            pair.found_count()
        );
        let junctions = JunctionSet::collect(&misc_features, record_len);
        pair.merge_open(build_irs_from_junctions(record_len, &junctions));
        pair = discard_short(pair, record_len, settings.min_ir_len);
    }

    if !pair.is_complete() {
        debug!(
            "{} of 2 IR positions found; inferring from single-copy region positions",
            pair.found_count()
        );
        if misc_no_pseudo.is_empty() && pair.found_count() == 0 {
            return Err(ResolveError::NoSingleCopyFeatures);
        }
        pair = single_copy::build_irs_from_single_copy(record_len, &misc_no_pseudo, pair);
        pair = discard_short(pair, record_len, settings.min_ir_len);
    }

    if pair.found_count() == 0 {
        return Err(ResolveError::Unresolvable);
    }
    Ok(pair)
}

/// Records are independent; resolve a batch in parallel.
pub fn resolve_batch(
    records: &[PlastidRecord],
    settings: IrSettings,
) -> Vec<Result<IrPair, ResolveError>> {
    records
        .par_iter()
        .map(|record| resolve_inverted_repeats(record, settings))
        .collect()
}

/// The sanity check: a tentatively assigned IR shorter than the floor is
/// discarded and its slot reopened for the next stage.
fn discard_short(mut pair: IrPair, record_len: i64, min_ir_len: i64) -> IrPair {
    if let Some(ira) = pair.ira {
        if ira.len_in(record_len) < min_ir_len {
            warn!(
                "selected IRa ({} bp) is too short to be a genuine IR; discarded",
                ira.len_in(record_len)
            );
            pair.ira = None;
        }
    }
    if let Some(irb) = pair.irb {
        if irb.len_in(record_len) < min_ir_len {
            warn!(
                "selected IRb ({} bp) is too short to be a genuine IR; discarded",
                irb.len_in(record_len)
            );
            pair.irb = None;
        }
    }
    pair
}
