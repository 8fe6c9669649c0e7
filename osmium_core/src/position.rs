use std::{
    fmt,
    ops::{Deref, Index, IndexMut},
    str::FromStr,
    sync::LazyLock,
};

use log::debug;
use types::{
    bail_parse, ChessError, Color, Piece, Result, Square, FEN_STARTPOS, NUM_CASTLING_RIGHTS,
};

use super::Move;

/// The standard starting position, parsed once on first use.
static STARTPOS: LazyLock<Position> = LazyLock::new(|| {
    // Safe unwrap because the FEN for startpos is always valid
    Position::from_fen(FEN_STARTPOS).unwrap()
});

/// Represents the castling rights of both players, as a set of four flags.
///
/// Castling itself is never performed by [`Position::make_move`]. These rights are only
/// parsed, stored, and printed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: Self = Self(0);
    pub const WHITE_KINGSIDE: Self = Self(1);
    pub const WHITE_QUEENSIDE: Self = Self(2);
    pub const BLACK_KINGSIDE: Self = Self(4);
    pub const BLACK_QUEENSIDE: Self = Self(8);
    pub const ALL: Self = Self(15);

    /// Canonical string for every combination of rights, indexed by [`CastlingRights::bits`].
    const UCI_TABLE: [&'static str; NUM_CASTLING_RIGHTS] = [
        "-", "K", "Q", "KQ", "k", "Kk", "Qk", "KQk", "q", "Kq", "Qq", "KQq", "kq", "Kkq", "Qkq",
        "KQkq",
    ];

    /// Creates an empty set of [`CastlingRights`].
    pub const fn new() -> Self {
        Self::NONE
    }

    /// Creates [`CastlingRights`] from raw bits, ignoring anything above the low four bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// The raw bits of these rights, always `[0, 15]`.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` if every right in `other` is also in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Adds the rights in `other` to `self`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Removes the rights in `other` from `self`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Returns `true` if no rights are held by either player.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Parses the castling field of a FEN string.
    ///
    /// The field must be `-`, or some combination of `KQkq` with no repeated characters.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::CastlingRights;
    /// let all = CastlingRights::from_uci("KQkq").unwrap();
    /// assert_eq!(all.bits(), 15);
    /// let none = CastlingRights::from_uci("-").unwrap();
    /// assert_eq!(none.bits(), 0);
    /// assert!(CastlingRights::from_uci("KK").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        if uci == "-" {
            return Ok(Self::NONE);
        }
        if uci.is_empty() {
            bail_parse!("castling rights must be \"-\" or some of \"KQkq\", got an empty string");
        }

        let mut rights = Self::NONE;
        for c in uci.chars() {
            let right = match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => bail_parse!("invalid castling rights char {c:?} in {uci:?}"),
            };

            if rights.contains(right) {
                bail_parse!("castling rights char {c:?} appears twice in {uci:?}");
            }
            rights.insert(right);
        }

        Ok(rights)
    }

    /// Formats these rights as the castling field of a FEN string, in the order `KQkq`.
    pub const fn to_uci(&self) -> &'static str {
        Self::UCI_TABLE[self.0 as usize]
    }
}

impl FromStr for CastlingRights {
    type Err = ChessError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl<T> Index<CastlingRights> for [T; NUM_CASTLING_RIGHTS] {
    type Output = T;
    /// [`CastlingRights`] can be used to index into a list of 16 elements.
    fn index(&self, index: CastlingRights) -> &Self::Output {
        &self[index.bits() as usize]
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// Represents the current state of the game, including move counters.
///
/// Analogous to a FEN string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Piece placements.
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Castling rights for each player.
    castling_rights: CastlingRights,

    /// Optional attack square for en passant.
    ep_square: Option<Square>,

    /// Used to enforce the fifty-move rule.
    halfmove: u32,

    /// Number of moves since the beginning of the game.
    /// A fullmove is a complete turn by white and then by black.
    fullmove: u32,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No en passant square available
    /// * Halfmove counter set to 0
    /// * Fullmove counter set to 1
    ///
    /// # Example
    /// ```
    /// # use osmium_core::Position;
    /// let state = Position::new();
    /// assert_eq!(state.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Returns a copy of the standard starting position.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Position, FEN_STARTPOS};
    /// assert_eq!(Position::startpos().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn startpos() -> Self {
        STARTPOS.clone()
    }

    /// Creates a new [`Position`] from the provided FEN string.
    ///
    /// All six fields are required. Anything that does not follow the FEN grammar is rejected
    /// with a [`ChessError::Parse`].
    pub fn from_fen(fen: &str) -> Result<Self> {
        let fields: Vec<&str> = fen.trim().split(' ').collect();
        let &[placements, active_color, castling, en_passant_target, halfmove, fullmove] =
            fields.as_slice()
        else {
            bail_parse!(
                "FEN string must have 6 space-separated fields, got {}: {fen:?}",
                fields.len()
            );
        };

        let board = Board::from_fen(placements)?;
        let side_to_move = Color::from_str(active_color)?;
        let castling_rights = CastlingRights::from_uci(castling)?;

        let ep_square = match en_passant_target {
            "-" => None,
            square => Some(Square::from_uci(square)?),
        };

        let halfmove = parse_counter(halfmove, "halfmove")?;

        let fullmove = parse_counter(fullmove, "fullmove")?;
        if fullmove == 0 {
            bail_parse!("FEN string must have a positive fullmove counter, got {fullmove}");
        }

        debug!("Parsed FEN {fen:?}");

        Ok(Self {
            board,
            side_to_move,
            castling_rights,
            ep_square,
            halfmove,
            fullmove,
        })
    }

    /// Generates a FEN string from this [`Position`].
    pub fn to_fen(&self) -> String {
        let placements = self.board().to_fen();
        let active_color = self.side_to_move();
        let castling = self.castling_rights();

        let en_passant_target = if let Some(square) = self.ep_square {
            square.to_uci()
        } else {
            String::from("-")
        };

        let halfmove = self.halfmove;
        let fullmove = self.fullmove;

        format!("{placements} {active_color} {castling} {en_passant_target} {halfmove} {fullmove}")
    }

    /// Returns the current player as a [`Color`].
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// If en passant can be performed, returns the en passant [`Square`].
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the [`CastlingRights`] of the current position.
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the half-move counter of the current position.
    pub const fn halfmove(&self) -> u32 {
        self.halfmove
    }

    /// Returns the full-move counter of the current position.
    pub const fn fullmove(&self) -> u32 {
        self.fullmove
    }

    /// Toggles the current player from White to Black (or vice versa).
    ///
    /// [`Position::make_move`] never does this on its own.
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Fetches this position's [`Board`].
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Places a copy of `piece` on `square`, or clears `square` if `piece` is `None`.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Piece, Position, Square};
    /// let mut pos = Position::new();
    /// pos.set_piece(Square::C4, Some(Piece::WHITE_KNIGHT));
    /// assert_eq!(pos.piece_at(Square::C4), Some(Piece::WHITE_KNIGHT));
    /// pos.set_piece(Square::C4, None);
    /// assert_eq!(pos.piece_at(Square::C4), None);
    /// ```
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        match piece {
            Some(piece) => self.board.place(piece, square),
            None => self.board.clear(square),
        }
    }

    /// Consumes `self` and returns a [`Position`] after having applied the provided [`Move`].
    pub fn with_move_made(mut self, mv: Move) -> Self {
        self.make_move(mv);
        self
    }

    /// Moves the piece on `mv.from()` to `mv.to()`, overwriting anything that was there.
    ///
    /// Does nothing if there is no piece on `mv.from()`. No enforcement of legality.
    ///
    /// Only piece placement changes: the side to move, castling rights, en passant square,
    /// and move counters are left as they were.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Move, Position, Square};
    /// let mut pos = Position::startpos();
    /// pos.make_move(Move::new(Square::E2, Square::E4));
    /// assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1");
    /// ```
    pub fn make_move(&mut self, mv: Move) {
        let Some(piece) = self.board.take(mv.from()) else {
            return;
        };

        self.board.place(piece, mv.to());
    }
}

/// Parses a move counter field of a FEN string, which must be a plain decimal number.
fn parse_counter(field: &str, name: &str) -> Result<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        bail_parse!("FEN string must have a valid {name} counter, got {field:?}");
    }

    field
        .parse()
        .map_err(|_| ChessError::Parse(format!("{name} counter {field:?} is too large")))
}

impl FromStr for Position {
    type Err = ChessError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Deref for Position {
    type Target = Board;
    fn deref(&self) -> &Self::Target {
        self.board()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(512);
        for rank in (0..8).rev() {
            board_str += &format!("{}|", rank + 1);
            for file in 0..8 {
                let piece = self.piece_at(Square::new(file, rank));
                let piece_char = piece.map(|p| p.char()).unwrap_or('.');
                board_str += &format!(" {piece_char}");
            }

            match rank {
                6 => board_str += &format!("           FEN: {}", self.to_fen()),
                5 => board_str += &format!("          Side: {}", self.side_to_move().name()),
                4 => board_str += &format!("      Castling: {}", self.castling_rights()),
                3 => {
                    let ep = self
                        .ep_square()
                        .map(|sq| sq.to_uci())
                        .unwrap_or(String::from("-"));
                    board_str += &format!("            EP: {ep}");
                }
                2 => board_str += &format!("     Half-move: {}", self.halfmove()),
                1 => board_str += &format!("     Full-move: {}", self.fullmove()),
                _ => {}
            }
            board_str += "\n";
        }
        board_str += " +----------------\n   a b c d e f g h ";

        write!(f, "{board_str}")
    }
}

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of castling rights, en passant, or move counters. If you need those, see [`Position`].
///
/// Internally an `8x8` grid of optional [`Piece`]s, indexed by `[rank][file]`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    pub const fn new() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Constructs a [`Board`] from the piece placement field of a FEN string.
    ///
    /// The field must describe exactly 8 ranks, each covering exactly 8 files.
    pub fn from_fen(placements: &str) -> Result<Self> {
        let mut board = Self::new();

        let ranks: Vec<&str> = placements.split('/').collect();
        if ranks.len() != 8 {
            bail_parse!(
                "piece placements must describe 8 ranks, found {} in {placements:?}",
                ranks.len()
            );
        }

        // Need to reverse this so that White pieces are at the "bottom" of the board
        for (rank, rank_placements) in ranks.into_iter().rev().enumerate() {
            let rank = rank as i8;
            let mut file = 0;

            for piece_char in rank_placements.chars() {
                if file >= 8 {
                    bail_parse!("rank {} overflows 8 files in {placements:?}", rank + 1);
                }

                if let Some(empty) = piece_char.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        bail_parse!("invalid empty square count {piece_char:?} in {placements:?}");
                    }
                    file += empty as i8;
                } else {
                    let piece = Piece::from_uci(piece_char)?;
                    board.place(piece, Square::new(file, rank));
                    file += 1;
                }
            }

            if file != 8 {
                bail_parse!(
                    "rank {} covers {file} files instead of 8 in {placements:?}",
                    rank + 1
                );
            }
        }

        Ok(board)
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    pub fn has(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Fetches a copy of the [`Piece`] at the provided [`Square`], if there is one.
    ///
    /// Squares off the board never hold a piece.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Board, Piece, Square};
    /// let board = Board::default();
    /// assert_eq!(board.piece_at(Square::A2), Some(Piece::WHITE_PAWN));
    /// assert!(board.piece_at(Square::E4).is_none());
    /// ```
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.is_in_bounds() {
            return None;
        }
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Fetches a copy of the [`Piece`] at the provided rank and file, both `[0, 7]`.
    ///
    /// This is the accessor renderers use to walk the board row by row.
    pub fn piece_at_coords(&self, rank: usize, file: usize) -> Option<Piece> {
        self.squares.get(rank)?.get(file).copied().flatten()
    }

    /// Places the provided [`Piece`] at the supplied [`Square`], replacing whatever was there.
    ///
    /// Off-board squares are ignored.
    pub fn place(&mut self, piece: Piece, square: Square) {
        if square.is_in_bounds() {
            self.squares[square.rank() as usize][square.file() as usize] = Some(piece);
        }
    }

    /// Clears the supplied [`Square`] of any pieces.
    pub fn clear(&mut self, square: Square) {
        self.take(square);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Board, Piece, Square};
    /// let mut board = Board::from_fen("k7/8/8/8/2N5/8/8/7K").unwrap();
    /// let taken = board.take(Square::C4);
    /// assert_eq!(board.to_fen(), "k7/8/8/8/8/8/8/7K");
    /// assert_eq!(taken, Some(Piece::WHITE_KNIGHT));
    /// ```
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        if !square.is_in_bounds() {
            return None;
        }
        self.squares[square.rank() as usize][square.file() as usize].take()
    }

    /// Creates an iterator over all occupied [`Square`]s in this [`Board`], along with their pieces.
    ///
    /// Squares are visited rank by rank from `a1` to `h8`.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| Some((square, self.piece_at(square)?)))
    }

    /// Returns an iterator over all of the pieces of `color` on this board along with their locations.
    pub fn all_for(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color() == color)
    }

    /// Generates the piece placement field of a [FEN](https://www.chess.com/terms/fen-chess) string.
    pub fn to_fen(&self) -> String {
        let mut placements: [String; 8] = Default::default();

        for rank in 0..8 {
            let mut empty_spaces = 0;
            for file in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        placements[rank as usize] += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placements[rank as usize].push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placements[rank as usize] += &empty_spaces.to_string();
            }
        }
        placements.reverse();

        placements.join("/")
    }
}

impl Default for Board {
    fn default() -> Self {
        Position::startpos().board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for rank in (0..8).rev() {
            board += &format!("{}| ", rank + 1);

            for file in 0..8 {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.char())
                    .unwrap_or('.');

                board += &format!("{occupant} ");
            }

            board += "\n"
        }
        board += " +----------------\n   a b c d e f g h ";

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    /// Off-board squares index as empty.
    fn index(&self, index: Square) -> &Self::Output {
        if index.is_in_bounds() {
            &self.squares[index.rank() as usize][index.file() as usize]
        } else {
            &None
        }
    }
}

impl IndexMut<Square> for Board {
    /// # Panics
    /// If `index` is off the board.
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        assert!(index.is_in_bounds(), "cannot index off-board square {index}");
        &mut self.squares[index.rank() as usize][index.file() as usize]
    }
}
