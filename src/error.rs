use std::fmt;

/// Error types for VTT message decoding.
///
/// Only structural damage to a delta frame surfaces as an error; every
/// other rejection path yields "no record" instead.
#[derive(Debug)]
pub enum DecodeError {
    /// A delta frame declared more payload bytes than remain in the buffer
    TruncatedFrame { declared: usize, remaining: usize },
    /// End of buffer reached while a frame header was still expected
    UnexpectedEof,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TruncatedFrame {
                declared,
                remaining,
            } => write!(
                f,
                "Truncated delta frame: entry declares {} payload bytes but only {} remain",
                declared, remaining
            ),
            DecodeError::UnexpectedEof => write!(f, "Unexpected end of buffer"),
        }
    }
}

impl std::error::Error for DecodeError {}

pub type Result<T> = std::result::Result<T, DecodeError>;
