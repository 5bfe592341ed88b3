//! Value types shared by the CIGAR codec and alignment reconstruction
//!
//! Edit operations, gapped alignment rows and the results of edit extraction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default gap symbol in aligned rows
pub const GAP: char = '-';

/// One aligned column, classified relative to the query (row 1) and the
/// reference (row 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOp {
    /// Both rows hold a residue, equal or not
    #[serde(rename = "M")]
    Match,
    /// Reference residue against a gap in the query row
    #[serde(rename = "I")]
    Insertion,
    /// Query residue against a gap in the reference row
    #[serde(rename = "D")]
    Deletion,
}

impl EditOp {
    /// Parse a single-letter operation code
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(EditOp::Match),
            'I' => Some(EditOp::Insertion),
            'D' => Some(EditOp::Deletion),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            EditOp::Match => 'M',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
        }
    }

    /// Whether this column takes a character from the query
    pub fn consumes_query(self) -> bool {
        matches!(self, EditOp::Match | EditOp::Deletion)
    }

    /// Whether this column takes a character from the reference window
    pub fn consumes_reference(self) -> bool {
        matches!(self, EditOp::Match | EditOp::Insertion)
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<EditOp> for char {
    fn from(op: EditOp) -> Self {
        op.code()
    }
}

/// Number of characters an edit string consumes on each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSpans {
    pub columns: usize,
    pub query: usize,
    pub reference: usize,
}

impl EditSpans {
    pub fn record(&mut self, op: EditOp) {
        self.columns += 1;
        if op.consumes_query() {
            self.query += 1;
        }
        if op.consumes_reference() {
            self.reference += 1;
        }
    }
}

/// Two gapped rows of equal length
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    pub query_row: String,
    pub reference_row: String,
}

impl Alignment {
    pub fn new(query_row: String, reference_row: String) -> Self {
        Self {
            query_row,
            reference_row,
        }
    }

    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.query_row.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.query_row.is_empty()
    }

    /// Column pairs `(query, reference)` in order
    pub fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.query_row.chars().zip(self.reference_row.chars())
    }

    /// Columns whose two characters differ; a gap never equals a residue
    pub fn mismatches(&self) -> usize {
        self.columns().filter(|(q, r)| q != r).count()
    }

    pub fn into_rows(self) -> (String, String) {
        (self.query_row, self.reference_row)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.query_row)?;
        write!(f, "{}", self.reference_row)
    }
}

/// Ungapped sequences and edit string recovered from two aligned rows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedEdits {
    pub query: String,
    pub reference: String,
    pub edits: String,
}

impl ExtractedEdits {
    pub fn into_parts(self) -> (String, String, String) {
        (self.query, self.reference, self.edits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_op_codes() {
        for op in [EditOp::Match, EditOp::Insertion, EditOp::Deletion] {
            assert_eq!(EditOp::from_char(op.code()), Some(op));
            assert_eq!(char::from(op), op.code());
        }
        assert_eq!(EditOp::from_char('X'), None);
        assert_eq!(EditOp::from_char('m'), None);
        assert_eq!(EditOp::Deletion.to_string(), "D");
    }

    #[test]
    fn test_edit_op_consumption() {
        assert!(EditOp::Match.consumes_query());
        assert!(EditOp::Match.consumes_reference());
        assert!(EditOp::Deletion.consumes_query());
        assert!(!EditOp::Deletion.consumes_reference());
        assert!(!EditOp::Insertion.consumes_query());
        assert!(EditOp::Insertion.consumes_reference());
    }

    #[test]
    fn test_spans_record() {
        let mut spans = EditSpans::default();
        spans.record(EditOp::Match);
        spans.record(EditOp::Deletion);
        spans.record(EditOp::Insertion);
        assert_eq!(
            spans,
            EditSpans {
                columns: 3,
                query: 2,
                reference: 2
            }
        );
    }

    #[test]
    fn test_alignment_mismatches() {
        let aln = Alignment::new("AC-T".to_string(), "AGAT".to_string());
        assert_eq!(aln.len(), 4);
        assert!(!aln.is_empty());
        assert_eq!(aln.mismatches(), 2);
        assert_eq!(aln.to_string(), "AC-T\nAGAT");

        let (q, r) = aln.into_rows();
        assert_eq!(q, "AC-T");
        assert_eq!(r, "AGAT");
    }

    #[test]
    fn test_edit_op_serde_codes() {
        let json = serde_json::to_string(&vec![EditOp::Match, EditOp::Insertion]).unwrap();
        assert_eq!(json, r#"["M","I"]"#);
        let ops: Vec<EditOp> = serde_json::from_str(r#"["D","M"]"#).unwrap();
        assert_eq!(ops, vec![EditOp::Deletion, EditOp::Match]);
    }
}
