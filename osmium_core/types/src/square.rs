use std::{
    fmt,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use super::{bail_parse, ChessError, Result};

/// Represents a single square on an `8x8` chess board, as a `(file, rank)` coordinate pair.
///
/// File `0` is the `a` file and rank `0` is the first rank, regardless of whose turn it is.
///
/// A [`Square`] may hold coordinates that lie outside of the board, which is what allows
/// walking off the edge of the board one step at a time. Use [`Square::is_in_bounds`] before
/// treating a [`Square`] as a location on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    pub const A1: Self = Self::new(0, 0);
    pub const A2: Self = Self::new(0, 1);
    pub const A3: Self = Self::new(0, 2);
    pub const A4: Self = Self::new(0, 3);
    pub const A5: Self = Self::new(0, 4);
    pub const A6: Self = Self::new(0, 5);
    pub const A7: Self = Self::new(0, 6);
    pub const A8: Self = Self::new(0, 7);

    pub const B1: Self = Self::new(1, 0);
    pub const B2: Self = Self::new(1, 1);
    pub const B3: Self = Self::new(1, 2);
    pub const B4: Self = Self::new(1, 3);
    pub const B5: Self = Self::new(1, 4);
    pub const B6: Self = Self::new(1, 5);
    pub const B7: Self = Self::new(1, 6);
    pub const B8: Self = Self::new(1, 7);

    pub const C1: Self = Self::new(2, 0);
    pub const C2: Self = Self::new(2, 1);
    pub const C3: Self = Self::new(2, 2);
    pub const C4: Self = Self::new(2, 3);
    pub const C5: Self = Self::new(2, 4);
    pub const C6: Self = Self::new(2, 5);
    pub const C7: Self = Self::new(2, 6);
    pub const C8: Self = Self::new(2, 7);

    pub const D1: Self = Self::new(3, 0);
    pub const D2: Self = Self::new(3, 1);
    pub const D3: Self = Self::new(3, 2);
    pub const D4: Self = Self::new(3, 3);
    pub const D5: Self = Self::new(3, 4);
    pub const D6: Self = Self::new(3, 5);
    pub const D7: Self = Self::new(3, 6);
    pub const D8: Self = Self::new(3, 7);

    pub const E1: Self = Self::new(4, 0);
    pub const E2: Self = Self::new(4, 1);
    pub const E3: Self = Self::new(4, 2);
    pub const E4: Self = Self::new(4, 3);
    pub const E5: Self = Self::new(4, 4);
    pub const E6: Self = Self::new(4, 5);
    pub const E7: Self = Self::new(4, 6);
    pub const E8: Self = Self::new(4, 7);

    pub const F1: Self = Self::new(5, 0);
    pub const F2: Self = Self::new(5, 1);
    pub const F3: Self = Self::new(5, 2);
    pub const F4: Self = Self::new(5, 3);
    pub const F5: Self = Self::new(5, 4);
    pub const F6: Self = Self::new(5, 5);
    pub const F7: Self = Self::new(5, 6);
    pub const F8: Self = Self::new(5, 7);

    pub const G1: Self = Self::new(6, 0);
    pub const G2: Self = Self::new(6, 1);
    pub const G3: Self = Self::new(6, 2);
    pub const G4: Self = Self::new(6, 3);
    pub const G5: Self = Self::new(6, 4);
    pub const G6: Self = Self::new(6, 5);
    pub const G7: Self = Self::new(6, 6);
    pub const G8: Self = Self::new(6, 7);

    pub const H1: Self = Self::new(7, 0);
    pub const H2: Self = Self::new(7, 1);
    pub const H3: Self = Self::new(7, 2);
    pub const H4: Self = Self::new(7, 3);
    pub const H5: Self = Self::new(7, 4);
    pub const H6: Self = Self::new(7, 5);
    pub const H7: Self = Self::new(7, 6);
    pub const H8: Self = Self::new(7, 7);

    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a new [`Square`] from a file and a rank, without any bounds checks.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Square;
    /// let e4 = Square::new(4, 3);
    /// assert_eq!(e4, Square::E4);
    /// ```
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Returns an iterator over all 64 squares of the board.
    ///
    /// Squares are yielded rank by rank, starting at `a1` and ending at `h8`.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.next(), Some(Square::A1));
    /// assert_eq!(iter.next(), Some(Square::B1));
    /// assert_eq!(iter.last(), Some(Square::H8));
    /// ```
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Self::new(file, rank)))
    }

    /// Fetches the file of this [`Square`], where `0` is the `a` file.
    pub const fn file(&self) -> i8 {
        self.file
    }

    /// Fetches the rank of this [`Square`], where `0` is the first rank.
    pub const fn rank(&self) -> i8 {
        self.rank
    }

    /// Returns `true` if this [`Square`] lies on the board.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::{Direction, Square};
    /// assert!(Square::H8.is_in_bounds());
    /// assert!(!(Square::H8 + Direction::UP).is_in_bounds());
    /// ```
    pub const fn is_in_bounds(&self) -> bool {
        0 <= self.file && self.file < 8 && 0 <= self.rank && self.rank < 8
    }

    /// Steps once in `direction`, yielding `None` if that leaves the board.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::{Direction, Square};
    /// assert_eq!(Square::E4.offset(Direction::UP_LEFT), Some(Square::D5));
    /// assert_eq!(Square::A1.offset(Direction::LEFT), None);
    /// ```
    pub fn offset(self, direction: Direction) -> Option<Self> {
        let shifted = self + direction;
        shifted.is_in_bounds().then_some(shifted)
    }

    /// Returns `true` if this [`Square`] is a light square.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Square;
    /// assert!(Square::H1.is_light());
    /// assert!(!Square::A1.is_light());
    /// ```
    pub const fn is_light(&self) -> bool {
        (self.file + self.rank) % 2 != 0
    }

    /// Creates a [`Square`] from a string in algebraic notation, such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Square;
    /// let e4 = Square::from_uci("e4");
    /// assert_eq!(e4, Ok(Square::E4));
    ///
    /// assert!(Square::from_uci("i9").is_err());
    /// assert!(Square::from_uci("e44").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail_parse!("square must be exactly two characters <file><rank>, got {square:?}");
        };

        if !('a'..='h').contains(&file) {
            bail_parse!("file chars must be [a, h], got {file:?} in {square:?}");
        }
        if !('1'..='8').contains(&rank) {
            bail_parse!("rank chars must be [1, 8], got {rank:?} in {square:?}");
        }

        Ok(Self::new(
            (file as u8 - b'a') as i8,
            (rank as u8 - b'1') as i8,
        ))
    }

    /// Converts this [`Square`] to algebraic notation, such as `"e4"`.
    ///
    /// Only meaningful for squares that are [in bounds](Square::is_in_bounds).
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Square;
    /// assert_eq!(Square::C4.to_uci(), "c4");
    /// ```
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.file_char(), self.rank + 1)
    }

    /// The file of this [`Square`] as a letter, `'a'` through `'h'`.
    pub fn file_char(&self) -> char {
        (b'a' as i8 + self.file) as u8 as char
    }
}

impl FromStr for Square {
    type Err = ChessError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_in_bounds() {
            write!(f, "{}", self.to_uci())
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

/// A displacement on the board, measured in files and ranks.
///
/// Adding a [`Direction`] to a [`Square`] yields another [`Square`], and subtracting two
/// [`Square`]s yields the [`Direction`] between them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Direction {
    file: i8,
    rank: i8,
}

impl Direction {
    pub const UP: Self = Self::new(0, 1);
    pub const RIGHT: Self = Self::new(1, 0);
    pub const DOWN: Self = Self::new(0, -1);
    pub const LEFT: Self = Self::new(-1, 0);

    pub const UP_RIGHT: Self = Self::new(1, 1);
    pub const DOWN_RIGHT: Self = Self::new(1, -1);
    pub const DOWN_LEFT: Self = Self::new(-1, -1);
    pub const UP_LEFT: Self = Self::new(-1, 1);

    /// Directions of movement for the Rook.
    pub const ORTHOGONAL: [Self; 4] = [Self::UP, Self::RIGHT, Self::DOWN, Self::LEFT];

    /// Directions of movement for the Bishop.
    pub const DIAGONAL: [Self; 4] = [
        Self::UP_RIGHT,
        Self::DOWN_RIGHT,
        Self::DOWN_LEFT,
        Self::UP_LEFT,
    ];

    /// Directions of movement for the Queen and King, clockwise from `UP`.
    pub const ALL: [Self; 8] = [
        Self::UP,
        Self::UP_RIGHT,
        Self::RIGHT,
        Self::DOWN_RIGHT,
        Self::DOWN,
        Self::DOWN_LEFT,
        Self::LEFT,
        Self::UP_LEFT,
    ];

    /// Offsets of the Knight's leaps, clockwise from `(1, 2)`.
    pub const LEAPER: [Self; 8] = [
        Self::new(1, 2),
        Self::new(2, 1),
        Self::new(2, -1),
        Self::new(1, -2),
        Self::new(-1, -2),
        Self::new(-2, -1),
        Self::new(-2, 1),
        Self::new(-1, 2),
    ];

    /// Creates a new [`Direction`] from a file delta and a rank delta.
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Change in file.
    pub const fn file(&self) -> i8 {
        self.file
    }

    /// Change in rank.
    pub const fn rank(&self) -> i8 {
        self.rank
    }

    /// Reduces each component of this [`Direction`] to `-1`, `0`, or `1`.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::{Direction, Square};
    /// let delta = Square::H8 - Square::A1;
    /// assert_eq!(delta.signum(), Direction::UP_RIGHT);
    /// ```
    pub const fn signum(self) -> Self {
        Self::new(self.file.signum(), self.rank.signum())
    }

    /// Absolute change in file and rank, as a `(file, rank)` tuple.
    pub const fn abs(self) -> (i8, i8) {
        (self.file.abs(), self.rank.abs())
    }

    /// Number of king steps needed to cover this displacement.
    ///
    /// # Example
    /// ```
    /// # use osmium_types::Square;
    /// assert_eq!((Square::E4 - Square::B2).chebyshev(), 3);
    /// ```
    pub const fn chebyshev(self) -> i8 {
        let (file, rank) = self.abs();
        if file > rank {
            file
        } else {
            rank
        }
    }
}

impl Add for Direction {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl Sub for Direction {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}

impl Neg for Direction {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.file, -self.rank)
    }
}

impl Mul<i8> for Direction {
    type Output = Self;
    fn mul(self, rhs: i8) -> Self::Output {
        Self::new(self.file * rhs, self.rank * rhs)
    }
}

impl Add<Direction> for Square {
    type Output = Self;
    fn add(self, rhs: Direction) -> Self::Output {
        Self::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl AddAssign<Direction> for Square {
    fn add_assign(&mut self, rhs: Direction) {
        *self = *self + rhs;
    }
}

impl Sub<Direction> for Square {
    type Output = Self;
    fn sub(self, rhs: Direction) -> Self::Output {
        self + -rhs
    }
}

impl SubAssign<Direction> for Square {
    fn sub_assign(&mut self, rhs: Direction) {
        *self = *self - rhs;
    }
}

impl Sub for Square {
    type Output = Direction;
    /// The [`Direction`] that leads from `rhs` to `self`.
    fn sub(self, rhs: Self) -> Self::Output {
        Direction::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}
