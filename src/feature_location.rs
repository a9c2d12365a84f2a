//! Location and strand utilities over gb-io feature locations.

use gb_io::seq::{Feature, Location};

/// Half-open, 0-based bounds of a feature, as annotated.
///
/// Compound locations (join/order) collapse to their outer envelope, which
/// is what the IR arithmetic works on.
pub fn feature_bounds(feature: &Feature) -> Option<(i64, i64)> {
    feature.location.find_bounds().ok()
}

/// Annotated span of a feature. Unresolvable locations count as zero.
pub fn feature_len(feature: &Feature) -> i64 {
    match feature_bounds(feature) {
        Some((start, end)) => end - start,
        None => 0,
    }
}

fn collect_strands(location: &Location, reverse: bool, strands: &mut Vec<bool>) {
    match location {
        Location::Range(_, _) | Location::Between(_, _) => strands.push(reverse),
        Location::Complement(inner) => collect_strands(inner, !reverse, strands),
        Location::Join(parts)
        | Location::Order(parts)
        | Location::Bond(parts)
        | Location::OneOf(parts) => {
            for part in parts {
                collect_strands(part, reverse, strands);
            }
        }
        Location::External(_, maybe_loc) => {
            if let Some(loc) = maybe_loc {
                collect_strands(loc, reverse, strands);
            }
        }
        Location::Gap(_) => {}
    }
}

/// Whether the feature is annotated on the complement strand
/// (majority vote over its location parts).
pub fn feature_is_reverse(feature: &Feature) -> bool {
    let mut strands = Vec::new();
    collect_strands(&feature.location, false, &mut strands);
    if strands.is_empty() {
        false
    } else {
        strands.iter().filter(|is_reverse| **is_reverse).count() > strands.len() / 2
    }
}

/// Junction annotations sometimes collapse to a single point (GenBank
/// `start^end` notation), leaving `start == end`, which breaks interval
/// arithmetic. Rewrite such bounds to the base just before the end.
/// Idempotent: adjusted bounds are no longer degenerate.
pub fn adjust_point_bounds(bounds: (i64, i64)) -> (i64, i64) {
    if bounds.0 == bounds.1 {
        (bounds.0 - 1, bounds.1)
    } else {
        bounds
    }
}
