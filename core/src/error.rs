//! Error types for CIGAR parsing and alignment reconstruction
//!
//! Positions are character indices into the offending input; columns are
//! indices into the edit string.

use thiserror::Error;

/// Malformed CIGAR or edit string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing run length before '{op}' at position {position}")]
    MissingCount { position: usize, op: char },

    #[error("zero run length for operation at position {position}")]
    ZeroCount { position: usize },

    #[error("run length overflows at position {position}")]
    CountOverflow { position: usize },

    #[error("unknown edit operation '{op}' at position {position}")]
    UnknownOperation { position: usize, op: char },

    #[error("run of {count} at position {position} is too long to expand")]
    RunTooLong { position: usize, count: usize },

    #[error("run length starting at position {position} has no operation")]
    MissingOperation { position: usize },
}

/// Edit string asks for more characters than a sequence provides
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("start offset {offset} is past the end of a reference of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("query exhausted at column {column} (query length {len})")]
    QueryExhausted { column: usize, len: usize },

    #[error("reference exhausted at column {column} ({available} characters after the start offset)")]
    ReferenceExhausted { column: usize, available: usize },
}

/// Errors raised by alignment reconstruction and edit extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    #[error("aligned rows differ in length: {query} vs {reference}")]
    LengthMismatch { query: usize, reference: usize },

    #[error("column {column} holds a gap in both rows")]
    DoubleGap { column: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

pub type AlignResult<T> = Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::UnknownOperation { position: 3, op: 'X' };
        assert_eq!(err.to_string(), "unknown edit operation 'X' at position 3");

        let err: AlignError = BoundsError::QueryExhausted { column: 7, len: 6 }.into();
        assert_eq!(err.to_string(), "query exhausted at column 7 (query length 6)");
        assert!(matches!(err, AlignError::Bounds(_)));
    }
}
