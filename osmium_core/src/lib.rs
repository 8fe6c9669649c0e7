/// Ray casting and King attack detection.
pub mod attacks;
/// Pseudo-legal and legal move generation.
pub mod movegen;
/// Moves as a pair of squares, and their UCI notation.
pub mod moves;
/// The game board, FEN parsing, and castling rights.
pub mod position;

pub use movegen::*;
pub use moves::*;
pub use position::*;
pub use types::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::position::*;
    pub use types::prelude::*;
}
