//! Orientation reconciliation: depositors disagree on whether IRb is
//! annotated on the forward or the reverse strand, so the extracted pair
//! is compared both ways before reporting.

use crate::ir::IrPair;
use crate::record::PlastidRecord;
use bio::alignment::distance::levenshtein;
use bio::alphabets::dna::revcomp;
use log::debug;

/// Normalized similarity of two sequences on a 0-100 scale, based on
/// edit distance. Identical inputs score 100; the scale tolerates the
/// ~10% divergence real IR pairs can show.
pub fn similarity_ratio(a: &[u8], b: &[u8]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 100.0;
    }
    let distance = levenshtein(a, b) as f64;
    100.0 * (1.0 - distance / longest as f64)
}

/// Whether IRb must be reported as its reverse complement: true iff the
/// reverse-complemented comparison scores strictly higher than the pair
/// as given.
pub fn irb_needs_reverse_complement(ira: &[u8], irb: &[u8]) -> bool {
    let as_given = similarity_ratio(ira, irb);
    let flipped = similarity_ratio(ira, &revcomp(irb));
    debug!("IR orientation scores: as given {as_given:.1}, reverse-complemented {flipped:.1}");
    as_given < flipped
}

/// Extract both IR sequences from the record and decide the flag in one
/// call. `None` when the pair is incomplete or a region lies outside the
/// sequence.
pub fn check_orientation(record: &PlastidRecord, pair: &IrPair) -> Option<bool> {
    let ira = record.extract_region(&pair.ira?)?;
    let irb = record.extract_region(&pair.irb?)?;
    Some(irb_needs_reverse_complement(&ira, &irb))
}
