use thiserror::Error;

/// Errors produced by the chess core.
///
/// [`ChessError::Parse`] is returned whenever user-facing text (FEN strings, squares, pieces, moves)
/// could not be decoded. Nothing is partially applied when this is returned.
///
/// [`ChessError::Invariant`] is returned when a position is internally inconsistent,
/// such as a check query for a side that has no King.
#[derive(Error, Clone, PartialEq, Eq, Debug, Hash)]
pub enum ChessError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl ChessError {
    /// Returns `true` if this is a [`ChessError::Parse`].
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns `true` if this is a [`ChessError::Invariant`].
    pub const fn is_invariant(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}

/// Result alias for every fallible operation in the chess core.
pub type Result<T> = std::result::Result<T, ChessError>;

/// Returns early with a [`ChessError::Parse`], formatted like [`format!`].
#[macro_export]
macro_rules! bail_parse {
    ($($arg:tt)*) => {
        return Err($crate::ChessError::Parse(format!($($arg)*)))
    };
}
