use std::{fmt, str::FromStr};

use types::{bail_parse, ChessError, Result, Square};

/// Represents a move made on a chess board, as a plain `from` / `to` pair of [`Square`]s.
///
/// A [`Move`] carries no information about captures, promotions, castling or en passant.
/// Whatever sits on `to` when the move is made is simply overwritten.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from the given [`Square`]s.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Move, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Fetches the source (or "from") part of this [`Move`], as a [`Square`].
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the destination (or "to") part of this [`Move`], as a [`Square`].
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Fetches the parts of this [`Move`] in a tuple of `(from, to)`.
    pub const fn parts(&self) -> (Square, Square) {
        (self.from, self.to)
    }

    /// Creates a [`Move`] from a string in long algebraic notation, such as `"e2e4"`.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Move, Square};
    /// let mv = Move::from_uci("g1f3").unwrap();
    /// assert_eq!(mv.parts(), (Square::G1, Square::F3));
    /// assert!(Move::from_uci("g1").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        if uci.len() != 4 || !uci.is_ascii() {
            bail_parse!("move must be of the form <from><to>, such as \"e2e4\". got {uci:?}");
        }

        let from = Square::from_uci(&uci[0..2])?;
        let to = Square::from_uci(&uci[2..4])?;

        Ok(Self::new(from, to))
    }

    /// Converts this [`Move`] to a string in long algebraic notation, such as `"e2e4"`.
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ChessError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({:?} -> {:?})", self.from, self.to)
    }
}
