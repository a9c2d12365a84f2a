//! Locates the pair of large inverted repeats (IRa/IRb) in annotated
//! plastid genome records, working from whatever evidence the
//! depositor left behind: typed repeat features, free-text notes,
//! junction markers, or annotated single-copy regions.

pub mod feature_location;
pub mod ir;
pub mod junction;
pub mod note_match;
pub mod orientation;
pub mod pipeline;
pub mod record;
pub mod repeat_match;
pub mod report;
pub mod single_copy;

pub use ir::{IrPair, IrRegion, IrSettings};
pub use pipeline::{resolve_batch, resolve_inverted_repeats, ResolveError};
pub use record::PlastidRecord;
pub use report::IrReport;
