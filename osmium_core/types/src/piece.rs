use std::{fmt, ops::Neg, str::FromStr};

use super::{bail_parse, ChessError, Direction, Result};

/// Represents the color of a player or piece.
///
/// In Western chess, White traditionally moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Creates a new [`Color`] from a `bool`, where `true = White`.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Color;
    /// assert_eq!(Color::from_is_white(true), Color::White);
    /// assert_eq!(Color::from_is_white(false), Color::Black);
    /// ```
    pub const fn from_is_white(is_white: bool) -> Self {
        if is_white {
            Self::White
        } else {
            Self::Black
        }
    }

    /// Returns `true` if this [`Color`] is White.
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this [`Color`] is Black.
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The direction in which this [`Color`]'s Pawns advance.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::{Color, Direction};
    /// assert_eq!(Color::White.forward(), Direction::UP);
    /// assert_eq!(Color::Black.forward(), Direction::DOWN);
    /// ```
    pub const fn forward(&self) -> Direction {
        match self {
            Self::White => Direction::UP,
            Self::Black => Direction::DOWN,
        }
    }

    /// The rank on which this [`Color`]'s major pieces start.
    pub const fn back_rank(&self) -> i8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// The rank on which this [`Color`]'s Pawns start, and from which they may advance two squares.
    pub const fn pawn_rank(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => 6,
        }
    }

    /// Creates a [`Color`] from a `char`, as found in the active color field of a FEN string.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Color;
    /// assert_eq!(Color::from_uci('w'), Ok(Color::White));
    /// assert!(Color::from_uci('W').is_err());
    /// ```
    pub fn from_uci(color: char) -> Result<Self> {
        match color {
            'w' => Ok(Self::White),
            'b' => Ok(Self::Black),
            _ => bail_parse!("color must be either 'w' or 'b', got {color:?}"),
        }
    }

    /// Converts this [`Color`] to a char, as found in the active color field of a FEN string.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = ChessError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_uci(c),
            _ => bail_parse!("color must be either \"w\" or \"b\", got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// Represents the kind (or "class") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Creates a new [`PieceKind`] from a character, ignoring case.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::PieceKind;
    /// assert_eq!(PieceKind::from_uci('Q'), Ok(PieceKind::Queen));
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail_parse!("pieces must be [p | n | b | r | q | k] or uppercase equivalent, got {kind:?}"),
        }
    }

    /// Converts this [`PieceKind`] to a character.
    ///
    /// Will always be a lowercase letter.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Returns `true` if this kind moves by sliding along rays (Bishop, Rook, Queen).
    pub const fn is_rider(&self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Returns `true` if this kind moves by fixed offsets (Knight, King).
    pub const fn is_leaper(&self) -> bool {
        matches!(self, Self::Knight | Self::King)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents a chess piece on the game board.
///
/// A [`Piece`] is a plain value: copying it out of (or into) a board never shares it with another square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);

    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);

    /// Creates a new [`Piece`] from the given [`Color`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use osmium_types::{Color, PieceKind, Piece};
    /// let white_knight = Piece::new(Color::White, PieceKind::Knight);
    /// assert_eq!(white_knight.color(), Color::White);
    /// assert_eq!(white_knight.kind(), PieceKind::Knight);
    /// ```
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this [`Piece`] is White.
    pub const fn is_white(&self) -> bool {
        self.color.is_white()
    }

    /// Returns `true` if this [`Piece`] is a King.
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns a copy of this [`Piece`] with its color flipped.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Piece;
    /// assert_eq!(Piece::WHITE_ROOK.inverted(), Piece::BLACK_ROOK);
    /// ```
    pub const fn inverted(self) -> Self {
        Self::new(self.color.opponent(), self.kind)
    }

    /// Creates a [`Piece`] from a character: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Piece;
    /// assert_eq!(Piece::from_uci('N'), Ok(Piece::WHITE_KNIGHT));
    /// assert_eq!(Piece::from_uci('q'), Ok(Piece::BLACK_QUEEN));
    /// assert!(Piece::from_uci('x').is_err());
    /// ```
    pub fn from_uci(piece: char) -> Result<Self> {
        let kind = PieceKind::from_uci(piece)?;
        let color = Color::from_is_white(piece.is_ascii_uppercase());
        Ok(Self::new(color, kind))
    }

    /// Converts this [`Piece`] to a character: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Piece;
    /// assert_eq!(Piece::BLACK_KING.char(), 'k');
    /// assert_eq!(Piece::WHITE_PAWN.char(), 'P');
    /// ```
    pub const fn char(&self) -> char {
        let c = self.kind.to_uci();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Unicode chess symbol for this [`Piece`].
    ///
    /// Follows the convention of a light-on-dark terminal, where the hollow glyphs read as
    /// dark pieces and the filled glyphs read as light pieces.
    pub const fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (Color::Black, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::Knight) => '♘',
            (Color::Black, PieceKind::Bishop) => '♗',
            (Color::Black, PieceKind::Rook) => '♖',
            (Color::Black, PieceKind::Queen) => '♕',
            (Color::Black, PieceKind::King) => '♔',
            (Color::White, PieceKind::Pawn) => '♟',
            (Color::White, PieceKind::Knight) => '♞',
            (Color::White, PieceKind::Bishop) => '♝',
            (Color::White, PieceKind::Rook) => '♜',
            (Color::White, PieceKind::Queen) => '♛',
            (Color::White, PieceKind::King) => '♚',
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = ChessError;
    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_from_char_all_pieces() {
        let chars = ['p', 'n', 'b', 'r', 'q', 'k'];

        for (c, kind) in chars.into_iter().zip(PieceKind::all()) {
            let white = Piece::new(Color::White, kind);
            let black = Piece::new(Color::Black, kind);
            assert_eq!(Piece::from_uci(c.to_ascii_uppercase()), Ok(white));
            assert_eq!(Piece::from_uci(c), Ok(black));
        }
    }

    #[test]
    fn test_piece_codec_is_inverse() {
        for color in Color::all() {
            for kind in PieceKind::all() {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_uci(piece.char()), Ok(piece));
            }
        }
    }

    #[test]
    fn test_piece_from_unknown_char() {
        for c in ['x', 'A', '1', ' ', '-', '/'] {
            assert!(Piece::from_uci(c).unwrap_err().is_parse());
        }
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("w".parse::<Color>(), Ok(Color::White));
        assert_eq!("b".parse::<Color>(), Ok(Color::Black));
        assert!("white".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
        assert_eq!(-Color::White, Color::Black);
        assert!(Color::Black.is_black() && !Color::Black.is_white());
        assert!(Color::White.is_white() && !Color::White.is_black());
    }

    #[test]
    fn test_piece_kind_classes() {
        let riders: Vec<_> = PieceKind::all().into_iter().filter(|k| k.is_rider()).collect();
        assert_eq!(riders, [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]);

        let leapers: Vec<_> = PieceKind::all().into_iter().filter(|k| k.is_leaper()).collect();
        assert_eq!(leapers, [PieceKind::Knight, PieceKind::King]);
    }
}
