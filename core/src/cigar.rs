//! CIGAR codec
//!
//! Translates between run-length encoded CIGAR strings (`1M1D6M`) and
//! expanded edit strings (`MDMMMMMM`). Only the `M`, `I` and `D` operations
//! are understood. Run lengths may span several digits.

use log::debug;
use std::iter::{self, FusedIterator};
use std::str::Chars;

use crate::blocks::split_blocks;
use crate::error::ParseError;
use crate::types::{EditOp, EditSpans};

/// Tokenizer yielding `(count, op)` pairs from a CIGAR string.
///
/// Each pair is a maximal run of ASCII digits followed by one operation
/// character. The iterator stops after the first error.
#[derive(Debug, Clone)]
pub struct CigarTokens<'a> {
    chars: Chars<'a>,
    position: usize,
    failed: bool,
}

impl<'a> CigarTokens<'a> {
    pub fn new(cigar: &'a str) -> Self {
        Self {
            chars: cigar.chars(),
            position: 0,
            failed: false,
        }
    }

    /// Characters consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    fn next_pair(&mut self) -> Option<Result<(usize, EditOp), ParseError>> {
        let mut count: Option<usize> = None;
        let mut start = None;

        for c in self.chars.by_ref() {
            let position = self.position;
            self.position += 1;

            if let Some(digit) = c.to_digit(10) {
                start.get_or_insert(position);
                match count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                {
                    Some(n) => count = Some(n),
                    None => return Some(Err(ParseError::CountOverflow { position })),
                }
                continue;
            }

            let pair = match (count, EditOp::from_char(c)) {
                (None, _) => Err(ParseError::MissingCount { position, op: c }),
                (Some(_), None) => Err(ParseError::UnknownOperation { position, op: c }),
                (Some(0), Some(_)) => Err(ParseError::ZeroCount { position }),
                (Some(n), Some(op)) => Ok((n, op)),
            };
            return Some(pair);
        }

        start.map(|position| Err(ParseError::MissingOperation { position }))
    }
}

impl Iterator for CigarTokens<'_> {
    type Item = Result<(usize, EditOp), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let pair = self.next_pair()?;
        if let Err(e) = &pair {
            debug!("Rejecting CIGAR: {}", e);
            self.failed = true;
        }
        Some(pair)
    }
}

impl FusedIterator for CigarTokens<'_> {}

/// Split a CIGAR string into its `(count, op)` pairs
pub fn split_pairs(cigar: &str) -> Result<Vec<(usize, EditOp)>, ParseError> {
    CigarTokens::new(cigar).collect()
}

/// Expand a CIGAR string into one edit operation per column
pub fn cigar_to_edits(cigar: &str) -> Result<String, ParseError> {
    let mut edits = String::with_capacity(cigar.len());
    let mut tokens = CigarTokens::new(cigar);

    while let Some(pair) = tokens.next() {
        let (count, op) = pair?;
        if edits.try_reserve(count).is_err() {
            let err = ParseError::RunTooLong {
                position: tokens.position() - 1,
                count,
            };
            debug!("Rejecting CIGAR: {}", err);
            return Err(err);
        }
        edits.extend(iter::repeat(op.code()).take(count));
    }
    Ok(edits)
}

/// Encode an edit string as a canonical CIGAR
pub fn edits_to_cigar(edits: &str) -> Result<String, ParseError> {
    let mut pairs = Vec::new();
    let mut column = 0;

    // Blocks are never empty
    for block in split_blocks(edits) {
        if let Some(code) = block.chars().next() {
            let op = EditOp::from_char(code).ok_or(ParseError::UnknownOperation {
                position: column,
                op: code,
            })?;
            let run = block.len() / code.len_utf8();
            pairs.push((run, op));
            column += run;
        }
    }

    Ok(format_pairs(&pairs))
}

/// Render `(count, op)` pairs as CIGAR text
pub fn format_pairs(pairs: &[(usize, EditOp)]) -> String {
    pairs
        .iter()
        .map(|(count, op)| format!("{}{}", count, op))
        .collect()
}

/// Merge adjacent pairs sharing an operation, without expanding the CIGAR
pub fn normalize_cigar(cigar: &str) -> Result<String, ParseError> {
    let mut merged: Vec<(usize, EditOp)> = Vec::new();
    let mut tokens = CigarTokens::new(cigar);

    while let Some(pair) = tokens.next() {
        let (count, op) = pair?;
        if let Some((run, last)) = merged.last_mut() {
            if *last == op {
                *run = run.checked_add(count).ok_or(ParseError::CountOverflow {
                    position: tokens.position() - 1,
                })?;
                continue;
            }
        }
        merged.push((count, op));
    }

    Ok(format_pairs(&merged))
}

/// Count how many query and reference characters an edit string consumes
pub fn edit_spans(edits: &str) -> Result<EditSpans, ParseError> {
    let mut spans = EditSpans::default();
    for (position, c) in edits.chars().enumerate() {
        let op = EditOp::from_char(c).ok_or(ParseError::UnknownOperation { position, op: c })?;
        spans.record(op);
    }
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use EditOp::{Deletion as D, Insertion as I, Match as M};

    #[test]
    fn test_split_pairs() {
        assert_eq!(
            split_pairs("1M1D6M1I4M").unwrap(),
            vec![(1, M), (1, D), (6, M), (1, I), (4, M)]
        );
    }

    #[test]
    fn test_split_pairs_multi_digit() {
        assert_eq!(
            split_pairs("120M3I15D").unwrap(),
            vec![(120, M), (3, I), (15, D)]
        );
    }

    #[test]
    fn test_cigar_to_edits() {
        assert_eq!(cigar_to_edits("1M1D6M1I4M").unwrap(), "MDMMMMMMIMMMM");
        assert_eq!(cigar_to_edits("12M").unwrap(), "M".repeat(12));
        assert_eq!(cigar_to_edits("").unwrap(), "");
    }

    #[test]
    fn test_edits_to_cigar() {
        assert_eq!(edits_to_cigar("MDMMMMMMIMMMM").unwrap(), "1M1D6M1I4M");
        assert_eq!(edits_to_cigar(&"I".repeat(11)).unwrap(), "11I");
        assert_eq!(edits_to_cigar("").unwrap(), "");
    }

    #[test]
    fn test_edits_to_cigar_rejects_unknown_op() {
        assert_eq!(
            edits_to_cigar("MMXM"),
            Err(ParseError::UnknownOperation { position: 2, op: 'X' })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            split_pairs("M"),
            Err(ParseError::MissingCount { position: 0, op: 'M' })
        );
        assert_eq!(
            split_pairs("3M0I"),
            Err(ParseError::ZeroCount { position: 3 })
        );
        assert_eq!(
            split_pairs("3M5X"),
            Err(ParseError::UnknownOperation { position: 3, op: 'X' })
        );
        assert_eq!(
            split_pairs("3M12"),
            Err(ParseError::MissingOperation { position: 2 })
        );
        assert_eq!(
            split_pairs("3M-1D"),
            Err(ParseError::MissingCount { position: 2, op: '-' })
        );
        assert!(matches!(
            split_pairs("99999999999999999999999M"),
            Err(ParseError::CountOverflow { .. })
        ));
    }

    #[test]
    fn test_huge_run_is_rejected_without_panic() {
        let cigar = format!("2M{}M", usize::MAX);
        assert_eq!(
            cigar_to_edits(&cigar),
            Err(ParseError::RunTooLong {
                position: cigar.len() - 1,
                count: usize::MAX
            })
        );
        // The run itself is well formed
        assert_eq!(split_pairs(&cigar).unwrap()[1], (usize::MAX, M));
    }

    #[test]
    fn test_tokens_stop_after_error() {
        let mut tokens = CigarTokens::new("2MXX3I");
        assert_eq!(tokens.next(), Some(Ok((2, M))));
        assert!(matches!(tokens.next(), Some(Err(_))));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn test_normalize_cigar() {
        assert_eq!(normalize_cigar("2M3M1I1I4D").unwrap(), "5M2I4D");
        assert_eq!(normalize_cigar("1M1D6M1I4M").unwrap(), "1M1D6M1I4M");
        assert_eq!(normalize_cigar("").unwrap(), "");
        assert!(normalize_cigar("2M3").is_err());
    }

    #[test]
    fn test_edit_spans() {
        let spans = edit_spans("MDMMMMMMIMMMM").unwrap();
        assert_eq!(spans.columns, 13);
        assert_eq!(spans.query, 12);
        assert_eq!(spans.reference, 12);

        let spans = edit_spans("MDMMIMMMMIIM").unwrap();
        assert_eq!(spans.query, 9);
        assert_eq!(spans.reference, 11);

        assert_eq!(
            edit_spans("MM-"),
            Err(ParseError::UnknownOperation { position: 2, op: '-' })
        );
    }
}
