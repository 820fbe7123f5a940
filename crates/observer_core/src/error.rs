//! Error types for observer log parsing.

use thiserror::Error;

/// Result type alias using [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors produced while parsing an observer log.
///
/// The log format is positional, so every variant carries the token offset
/// at which parsing failed. A truncated round or unit record is fatal; no
/// partial round is ever accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token stream ended before the expected value.
    #[error("log ended while reading {expected} (token {offset})")]
    UnexpectedEnd {
        /// What the parser was reading when the stream ended.
        expected: &'static str,
        /// Index of the missing token.
        offset: usize,
    },

    /// A token could not be parsed as an integer.
    #[error("token {offset} ({token:?}) is not a valid integer while reading {expected}")]
    InvalidToken {
        /// What the parser was reading.
        expected: &'static str,
        /// The offending token text.
        token: String,
        /// Index of the offending token.
        offset: usize,
    },

    /// An integer was read but falls outside the value's valid range.
    #[error("token {offset}: {value} is out of range for {expected}")]
    OutOfRange {
        /// What the parser was reading.
        expected: &'static str,
        /// The parsed value.
        value: i64,
        /// Index of the offending token.
        offset: usize,
    },

    /// Map dimensions that make array bounds impossible.
    #[error("unusable map dimensions {rows}x{cols}")]
    BadDimensions {
        /// Parsed row count.
        rows: i64,
        /// Parsed column count.
        cols: i64,
    },

    /// An enumerated code (terrain, owner, unit type, perspective) that is
    /// not part of the format.
    #[error("token {offset}: unknown {what} code {code}")]
    UnknownCode {
        /// Which enumeration was being decoded.
        what: &'static str,
        /// The unrecognized code.
        code: i64,
        /// Index of the offending token.
        offset: usize,
    },

    /// A coordinate pair pointing outside the map grid.
    #[error("token {offset}: cell ({row}, {col}) is outside the {rows}x{cols} map")]
    CellOutOfBounds {
        /// Parsed row.
        row: i64,
        /// Parsed column.
        col: i64,
        /// Map row count.
        rows: u32,
        /// Map column count.
        cols: u32,
        /// Index of the offending token.
        offset: usize,
    },

    /// The log contained the map header but no round snapshots.
    #[error("log contains no round snapshots")]
    NoRounds,
}
