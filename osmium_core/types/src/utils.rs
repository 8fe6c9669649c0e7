/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A position with only a rook between the kings, useful for eyeballing rays and renderers.
pub const FEN_ROOK_VS_KING: &str = "k7/8/8/8/8/8/8/R6K w - - 0 1";

/// <https://www.chessprogramming.org/Chess_Position#cite_note-4>
pub const MAX_NUM_MOVES: usize = 218;

/// Number of possible combinations of castling rights.
pub const NUM_CASTLING_RIGHTS: usize = 16;

/// Most destinations a single piece can have: a Queen in the middle of an empty board.
pub const MAX_PIECE_MOVES: usize = 27;
