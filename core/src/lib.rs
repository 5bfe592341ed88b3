//! alnedit core library
//!
//! Conversions between the three shapes of a pairwise alignment used in read
//! mapping: two gapped rows, a per-column edit string (`M`/`I`/`D`) and a
//! run-length encoded CIGAR string.

pub mod types;
pub mod error;
pub mod blocks;
pub mod cigar;
pub mod align;

// Re-export commonly used types and functions
pub use types::{Alignment, EditOp, EditSpans, ExtractedEdits, GAP};
pub use error::{AlignError, AlignResult, BoundsError, ParseError};
pub use blocks::split_blocks;
pub use cigar::{
    cigar_to_edits, edit_spans, edits_to_cigar, format_pairs, normalize_cigar, split_pairs,
    CigarTokens,
};
pub use align::{
    align, edit_dist, get_edits, local_align, AlignParams, DoubleGapPolicy, EditAligner,
};

/// Version information for the alnedit core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
