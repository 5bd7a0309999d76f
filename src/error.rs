use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// Two sequences (or a sequence and an edit script) disagree on length.
    #[error("Length mismatch in {context}: expected {expected}, found {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Offset {pos} is out of the reference (length {len})")]
    OutOfRange { pos: usize, len: usize },
    /// Both rows have a gap at this column.
    #[error("Gap against gap at column {column}")]
    InvalidAlignment { column: usize },
    #[error("Invalid edit operation '{op}' at {pos}")]
    InvalidOperation { pos: usize, op: char },
    #[error("Invalid CIGAR string: {0}")]
    InvalidCigar(String),
}

pub type Result<T> = std::result::Result<T, AlignError>;
