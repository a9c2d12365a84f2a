use crate::feature_location::{feature_bounds, feature_is_reverse};
use gb_io::seq::Feature;
use serde::{Deserialize, Serialize};

/// Half-open, 0-based interval of one inverted repeat copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrRegion {
    pub start: i64,
    pub end: i64,
    /// Annotated on the complement strand. Only set for directly matched
    /// features; regions constructed from junctions or single-copy arcs
    /// are always forward.
    pub reverse: bool,
}

impl IrRegion {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            reverse: false,
        }
    }

    /// Take over the annotated bounds and strand of an existing feature.
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let (start, end) = feature_bounds(feature)?;
        Some(Self {
            start,
            end,
            reverse: feature_is_reverse(feature),
        })
    }

    /// Region length; wraps through the origin when `end < start`
    /// (the genome is circular).
    pub fn len_in(&self, record_len: i64) -> i64 {
        if self.end >= self.start {
            self.end - self.start
        } else {
            record_len - self.start + self.end
        }
    }
}

/// The resolved pair. Either, both, or neither side may be set; a pair
/// with one side missing is a valid partial result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrPair {
    pub ira: Option<IrRegion>,
    pub irb: Option<IrRegion>,
}

impl IrPair {
    pub fn is_complete(&self) -> bool {
        self.ira.is_some() && self.irb.is_some()
    }

    pub fn found_count(&self) -> usize {
        self.ira.iter().count() + self.irb.iter().count()
    }

    /// Fill open slots from `other`; never overwrites a resolved slot.
    pub fn merge_open(&mut self, other: IrPair) {
        if self.ira.is_none() {
            self.ira = other.ira;
        }
        if self.irb.is_none() {
            self.irb = other.irb;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrSettings {
    /// Minimum length an accepted IR must have, in bp.
    pub min_ir_len: i64,
}

impl Default for IrSettings {
    fn default() -> Self {
        Self { min_ir_len: 1000 }
    }
}
