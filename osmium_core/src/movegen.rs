use arrayvec::ArrayVec;
use log::trace;
use types::{Color, Direction, Piece, PieceKind, Result, Square, MAX_NUM_MOVES, MAX_PIECE_MOVES};

use super::{Move, Position};

/// Every destination available to a single piece.
pub type PieceMoves = ArrayVec<Move, MAX_PIECE_MOVES>;

/// Every move available to one side of a [`Position`], in board scan order.
pub type MoveList = Vec<Move>;

impl Position {
    /// Generates the pseudo-legal moves of the piece on `square`.
    ///
    /// Moves that would leave the mover's King attacked are included; see [`Position::legal_moves`].
    /// An empty square yields no moves.
    pub fn moves_for(&self, square: Square) -> PieceMoves {
        let mut moves = PieceMoves::new();
        let Some(piece) = self.piece_at(square) else {
            return moves;
        };

        match piece.kind() {
            PieceKind::Pawn => self.pawn_moves(square, piece.color(), &mut moves),
            PieceKind::Knight => self.leaper_moves(square, piece, &Direction::LEAPER, &mut moves),
            PieceKind::Bishop => self.rider_moves(square, piece, &Direction::DIAGONAL, &mut moves),
            PieceKind::Rook => self.rider_moves(square, piece, &Direction::ORTHOGONAL, &mut moves),
            PieceKind::Queen => self.rider_moves(square, piece, &Direction::ALL, &mut moves),
            PieceKind::King => self.leaper_moves(square, piece, &Direction::ALL, &mut moves),
        }

        moves
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut PieceMoves) {
        let forward = color.forward();

        // Pushes
        if let Some(one) = from.offset(forward).filter(|&to| !self.has(to)) {
            moves.push(Move::new(from, one));

            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(forward).filter(|&to| !self.has(to)) {
                    moves.push(Move::new(from, two));
                }
            }
        }

        // Captures, left then right
        for side in [Direction::LEFT, Direction::RIGHT] {
            let Some(to) = from.offset(forward + side) else {
                continue;
            };

            let captures = match self.piece_at(to) {
                Some(victim) => victim.color() != color,
                None => self.ep_square() == Some(to),
            };

            if captures {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn rider_moves(
        &self,
        from: Square,
        piece: Piece,
        directions: &[Direction],
        moves: &mut PieceMoves,
    ) {
        for &direction in directions {
            let mut to = from + direction;
            while to.is_in_bounds() {
                match self.piece_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(blocker) => {
                        if blocker.color() != piece.color() {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                to += direction;
            }
        }
    }

    fn leaper_moves(
        &self,
        from: Square,
        piece: Piece,
        offsets: &[Direction],
        moves: &mut PieceMoves,
    ) {
        let targets = offsets.iter().filter_map(|&offset| from.offset(offset));

        for to in targets {
            match self.piece_at(to) {
                Some(other) if other.color() == piece.color() => {}
                _ => moves.push(Move::new(from, to)),
            }
        }
    }

    /// Generates every pseudo-legal move for the side to move.
    ///
    /// Pieces are visited rank by rank from `a1` to `h8`, and each piece's moves are kept in the
    /// order they were generated.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::with_capacity(MAX_NUM_MOVES);

        for (square, _) in self.all_for(self.side_to_move()) {
            moves.extend(self.moves_for(square));
        }

        moves
    }

    /// Generates every legal move for the side to move.
    ///
    /// Each pseudo-legal move is tried on a copy of this [`Position`], and kept only if it does not
    /// leave the mover's King attacked. `self` is never modified.
    ///
    /// Fails with [`ChessError::Invariant`](types::ChessError::Invariant) if the side to move has
    /// no King.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::Position;
    /// let pos = Position::startpos();
    /// let moves = pos.legal_moves().unwrap();
    /// assert_eq!(moves.len(), 20);
    /// assert_eq!(moves[0].to_string(), "b1c3");
    /// ```
    pub fn legal_moves(&self) -> Result<MoveList> {
        let color = self.side_to_move();
        self.king_square(color)?;

        let mut legal = MoveList::with_capacity(MAX_NUM_MOVES);
        for mv in self.pseudo_legal_moves() {
            let trial = self.clone().with_move_made(mv);
            if trial.is_king_in_check(color)? {
                trace!("{mv} leaves the {} king in check", color.name());
                continue;
            }
            legal.push(mv);
        }

        Ok(legal)
    }

    /// Returns `true` if `mv` is one of this position's legal moves.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Move, Position, Square};
    /// let pos = Position::startpos();
    /// assert_eq!(pos.is_legal(Move::new(Square::E2, Square::E4)), Ok(true));
    /// assert_eq!(pos.is_legal(Move::new(Square::E2, Square::E5)), Ok(false));
    /// ```
    pub fn is_legal(&self, mv: Move) -> Result<bool> {
        Ok(self.legal_moves()?.contains(&mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ucis(moves: impl IntoIterator<Item = Move>) -> Vec<String> {
        moves.into_iter().map(|mv| mv.to_uci()).collect()
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        let pos = Position::startpos();
        assert!(pos.moves_for(Square::E4).is_empty());
    }

    #[test]
    fn test_pawn_pushes_from_home_rank() {
        let pos = Position::startpos();
        assert_eq!(ucis(pos.moves_for(Square::E2)), ["e2e3", "e2e4"]);
        assert_eq!(ucis(pos.moves_for(Square::D7)), ["d7d6", "d7d5"]);
    }

    #[test]
    fn test_pawn_double_push_needs_both_squares_empty() {
        let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(pos.moves_for(Square::E2).is_empty());

        let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::E2)), ["e2e3"]);

        // Off the home rank, only single pushes
        let pos = Position::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::E3)), ["e3e4"]);
    }

    #[test]
    fn test_pawn_right_capture_is_forward_right() {
        // Only an enemy on f5 is capturable
        let pos = Position::from_fen("4k3/8/8/5p2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::E4)), ["e4e5", "e4f5"]);

        // Only an enemy on d5 is capturable
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::E4)), ["e4e5", "e4d5"]);

        // Black captures downwards
        let pos = Position::from_fen("4k3/8/8/4p3/3P1P2/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::E5)), ["e5e4", "e5d4", "e5f4"]);
    }

    #[test]
    fn test_pawn_never_captures_own_piece() {
        let pos = Position::from_fen("4k3/8/8/3P1P2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::E4)), ["e4e5"]);
    }

    #[test]
    fn test_pawn_captures_onto_ep_square() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::E5)), ["e5e6", "e5d6"]);
    }

    #[test]
    fn test_rider_stops_at_blockers() {
        let pos = Position::from_fen("4k3/8/8/1p6/8/3B4/8/1N2K3 w - - 0 1").unwrap();
        assert_eq!(
            ucis(pos.moves_for(Square::D3)),
            ["d3e4", "d3f5", "d3g6", "d3h7", "d3e2", "d3f1", "d3c2", "d3c4", "d3b5"]
        );
    }

    #[test]
    fn test_queen_on_open_board_fills_piece_moves() {
        let pos = Position::from_fen("8/8/8/8/3Q4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(pos.moves_for(Square::D4).len(), MAX_PIECE_MOVES);
    }

    #[test]
    fn test_leapers_stay_on_board() {
        let pos = Position::from_fen("7k/8/8/8/8/8/8/N6K w - - 0 1").unwrap();
        assert_eq!(ucis(pos.moves_for(Square::A1)), ["a1b3", "a1c2"]);
        assert_eq!(ucis(pos.moves_for(Square::H1)), ["h1h2", "h1g1", "h1g2"]);
    }

    #[test]
    fn test_pseudo_legal_only_for_side_to_move() {
        let pos = Position::startpos();
        assert!(pos
            .pseudo_legal_moves()
            .iter()
            .all(|mv| pos.piece_at(mv.from()).is_some_and(|p| p.color() == Color::White)));
    }

    #[test]
    fn test_legal_moves_filter_pins() {
        // The f7 pawn is pinned against the King by the queen on h5
        let pos =
            Position::from_fen("r1bqkbnr/pppppppp/2n5/7Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 2 2")
                .unwrap();
        let pseudo = pos.pseudo_legal_moves();
        let legal = pos.legal_moves().unwrap();
        assert_eq!(legal.len(), 19);
        assert!(pseudo.contains(&Move::new(Square::F7, Square::F6)));
        assert!(!legal.contains(&Move::new(Square::F7, Square::F6)));
    }

    #[test]
    fn test_legal_moves_is_idempotent_and_pure() {
        let pos = Position::startpos();
        let before = pos.clone();
        let first = pos.legal_moves().unwrap();
        let second = pos.legal_moves().unwrap();
        assert_eq!(first, second);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_legal_moves_without_king_is_invariant_violation() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/8 w - - 0 1").unwrap();
        assert!(pos.legal_moves().unwrap_err().is_invariant());
        assert!(pos.is_legal(Move::new(Square::E2, Square::E3)).is_err());
    }

    #[test]
    fn test_king_cannot_step_into_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").unwrap();
        assert_eq!(ucis(pos.legal_moves().unwrap()), ["e1f1", "e1d2"]);
    }
}
