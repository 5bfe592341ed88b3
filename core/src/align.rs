//! Alignment reconstruction from edit strings
//!
//! Rebuilds the two rows of a pairwise alignment from ungapped sequences and
//! an edit script, recovers the edit script from aligned rows, and scores a
//! reconstructed alignment by its differing columns.
//!
//! Row 1 is always the query (read) and row 2 the reference. A `D` column
//! holds a query residue against a reference gap, an `I` column holds a
//! reference residue against a query gap.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{AlignError, AlignResult, BoundsError, ParseError};
use crate::types::{Alignment, EditOp, ExtractedEdits, GAP};

/// Handling of a column that holds a gap in both rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleGapPolicy {
    /// Report the column as an insertion
    #[default]
    Insertion,
    /// Fail with [`AlignError::DoubleGap`]
    Reject,
}

/// Parameters for alignment reconstruction and edit extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignParams {
    /// Gap symbol written to and read from aligned rows
    pub gap: char,
    /// What `get_edits` does with gap-vs-gap columns
    pub double_gap: DoubleGapPolicy,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            gap: GAP,
            double_gap: DoubleGapPolicy::Insertion,
        }
    }
}

/// Converts between ungapped sequences, edit strings and aligned rows
#[derive(Debug, Clone, Default)]
pub struct EditAligner {
    params: AlignParams,
}

impl EditAligner {
    pub fn new(params: AlignParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    /// Align `query` against the reference window starting at `start_offset`.
    ///
    /// The offset may equal the reference length, leaving an empty window
    /// that only deletion columns can use. Nothing is returned unless every
    /// column could be filled.
    pub fn local_align(
        &self,
        query: &str,
        reference: &str,
        start_offset: usize,
        edits: &str,
    ) -> AlignResult<Alignment> {
        let reference_len = reference.chars().count();
        if start_offset > reference_len {
            debug!(
                "Start offset {} outside reference of length {}",
                start_offset, reference_len
            );
            return Err(BoundsError::OffsetOutOfRange {
                offset: start_offset,
                len: reference_len,
            }
            .into());
        }

        let gap = self.params.gap;
        let mut query_chars = query.chars();
        let mut reference_chars = reference.chars().skip(start_offset);
        let mut query_row = String::with_capacity(edits.len());
        let mut reference_row = String::with_capacity(edits.len());

        for (column, code) in edits.chars().enumerate() {
            let op = EditOp::from_char(code).ok_or(ParseError::UnknownOperation {
                position: column,
                op: code,
            })?;

            let q = if op.consumes_query() {
                query_chars.next().ok_or_else(|| BoundsError::QueryExhausted {
                    column,
                    len: query.chars().count(),
                })?
            } else {
                gap
            };
            let r = if op.consumes_reference() {
                reference_chars
                    .next()
                    .ok_or(BoundsError::ReferenceExhausted {
                        column,
                        available: reference_len - start_offset,
                    })?
            } else {
                gap
            };

            query_row.push(q);
            reference_row.push(r);
        }

        trace!(
            "Reconstructed {} columns from reference offset {}",
            edits.len(),
            start_offset
        );
        Ok(Alignment::new(query_row, reference_row))
    }

    /// Global alignment: `reference` is exactly the consumed window
    pub fn align(&self, query: &str, reference: &str, edits: &str) -> AlignResult<Alignment> {
        self.local_align(query, reference, 0, edits)
    }

    /// Recover the ungapped sequences and the edit string from two rows
    pub fn get_edits(&self, query_row: &str, reference_row: &str) -> AlignResult<ExtractedEdits> {
        let query_len = query_row.chars().count();
        let reference_len = reference_row.chars().count();
        if query_len != reference_len {
            debug!(
                "Aligned rows differ in length: {} vs {}",
                query_len, reference_len
            );
            return Err(AlignError::LengthMismatch {
                query: query_len,
                reference: reference_len,
            });
        }

        let gap = self.params.gap;
        let mut query = String::with_capacity(query_row.len());
        let mut reference = String::with_capacity(reference_row.len());
        let mut edits = String::with_capacity(query_len);

        for (column, (q, r)) in query_row.chars().zip(reference_row.chars()).enumerate() {
            let op = match (q == gap, r == gap) {
                (true, true) if self.params.double_gap == DoubleGapPolicy::Reject => {
                    debug!("Column {} is gapped in both rows", column);
                    return Err(AlignError::DoubleGap { column });
                }
                (true, _) => EditOp::Insertion,
                (false, true) => EditOp::Deletion,
                (false, false) => EditOp::Match,
            };

            if q != gap {
                query.push(q);
            }
            if r != gap {
                reference.push(r);
            }
            edits.push(op.code());
        }

        Ok(ExtractedEdits {
            query,
            reference,
            edits,
        })
    }

    /// Number of differing columns in the alignment the edits describe
    pub fn edit_dist(
        &self,
        query: &str,
        reference: &str,
        start_offset: usize,
        edits: &str,
    ) -> AlignResult<usize> {
        let alignment = self.local_align(query, reference, start_offset, edits)?;
        Ok(alignment.mismatches())
    }
}

/// [`EditAligner::local_align`] with default parameters
pub fn local_align(
    query: &str,
    reference: &str,
    start_offset: usize,
    edits: &str,
) -> AlignResult<Alignment> {
    EditAligner::default().local_align(query, reference, start_offset, edits)
}

/// [`EditAligner::align`] with default parameters
pub fn align(query: &str, reference: &str, edits: &str) -> AlignResult<Alignment> {
    EditAligner::default().align(query, reference, edits)
}

/// [`EditAligner::get_edits`] with default parameters
pub fn get_edits(query_row: &str, reference_row: &str) -> AlignResult<ExtractedEdits> {
    EditAligner::default().get_edits(query_row, reference_row)
}

/// [`EditAligner::edit_dist`] with default parameters
pub fn edit_dist(
    query: &str,
    reference: &str,
    start_offset: usize,
    edits: &str,
) -> AlignResult<usize> {
    EditAligner::default().edit_dist(query, reference, start_offset, edits)
}
