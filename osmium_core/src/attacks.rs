use types::{ChessError, Color, Direction, Piece, PieceKind, Result, Square};

use super::Position;

impl Position {
    /// Walks from `origin` in `direction` and returns a copy of the first [`Piece`] encountered.
    ///
    /// `origin` itself is never inspected. Returns `None` if the ray reaches the edge of the board.
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Direction, Piece, Position, Square};
    /// let pos = Position::from_fen("k7/8/8/8/8/8/8/R6K w - - 0 1").unwrap();
    /// assert_eq!(pos.raycast(Square::A1, Direction::UP), Some(Piece::BLACK_KING));
    /// assert_eq!(pos.raycast(Square::A1, Direction::UP_RIGHT), None);
    /// ```
    pub fn raycast(&self, origin: Square, direction: Direction) -> Option<Piece> {
        self.raycast_hit_square(origin, direction)
            .and_then(|square| self.piece_at(square))
    }

    /// Walks from `origin` in `direction` and returns the [`Square`] of the first piece encountered.
    ///
    /// `origin` itself is never inspected. Returns `None` if the ray reaches the edge of the board.
    pub fn raycast_hit_square(&self, origin: Square, direction: Direction) -> Option<Square> {
        // A zero direction would never leave `origin`
        if direction == Direction::default() {
            return None;
        }

        let mut square = origin + direction;
        while square.is_in_bounds() {
            if self.has(square) {
                return Some(square);
            }
            square += direction;
        }

        None
    }

    /// Returns `true` if `piece`, standing on `attacker`, attacks the King on `king`.
    ///
    /// Only geometry and blockers are considered; the caller is responsible for `king` actually
    /// holding the enemy King.
    pub fn piece_checks(&self, attacker: Square, piece: Piece, king: Square) -> bool {
        let delta = king - attacker;

        match piece.kind() {
            PieceKind::Pawn => {
                let forward = piece.color().forward();
                delta == forward + Direction::LEFT || delta == forward + Direction::RIGHT
            }
            PieceKind::Knight => matches!(delta.abs(), (1, 2) | (2, 1)),
            PieceKind::Bishop => self.bishop_checks(attacker, king),
            PieceKind::Rook => self.rook_checks(attacker, king),
            PieceKind::Queen => {
                self.rook_checks(attacker, king) || self.bishop_checks(attacker, king)
            }
            PieceKind::King => attacker != king && delta.chebyshev() <= 1,
        }
    }

    fn bishop_checks(&self, attacker: Square, king: Square) -> bool {
        let delta = king - attacker;
        let (file, rank) = delta.abs();

        file == rank && file != 0 && self.first_hit_is(attacker, delta.signum(), king)
    }

    fn rook_checks(&self, attacker: Square, king: Square) -> bool {
        let delta = king - attacker;

        // Exactly one of the two must be zero, so that `attacker != king`
        (delta.file() == 0) != (delta.rank() == 0)
            && self.first_hit_is(attacker, delta.signum(), king)
    }

    fn first_hit_is(&self, origin: Square, direction: Direction, target: Square) -> bool {
        self.raycast_hit_square(origin, direction) == Some(target)
    }

    /// Locates the King of the provided [`Color`].
    ///
    /// The board is scanned from `color`'s back rank outward, files `a` through `h`, and the first
    /// matching King is returned. A missing King is a [`ChessError::Invariant`].
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Color, Position, Square};
    /// let pos = Position::startpos();
    /// assert_eq!(pos.king_square(Color::Black), Ok(Square::E8));
    /// ```
    pub fn king_square(&self, color: Color) -> Result<Square> {
        let king = Piece::new(color, PieceKind::King);
        let (back_rank, outward) = (color.back_rank(), color.forward().rank());

        (0..8)
            .map(|step| back_rank + step * outward)
            .flat_map(|rank| (0..8).map(move |file| Square::new(file, rank)))
            .find(|&square| self.piece_at(square) == Some(king))
            .ok_or_else(|| {
                ChessError::Invariant(format!(
                    "no {} king on the board: {}",
                    color.name(),
                    self.to_fen()
                ))
            })
    }

    /// Returns the squares of every enemy piece currently attacking `color`'s King, in scan order.
    pub fn checkers(&self, color: Color) -> Result<Vec<Square>> {
        let king = self.king_square(color)?;

        Ok(self
            .all_for(color.opponent())
            .filter(|&(square, piece)| self.piece_checks(square, piece, king))
            .map(|(square, _)| square)
            .collect())
    }

    /// Returns `true` if the King of the provided [`Color`] is attacked by any enemy piece.
    ///
    /// A missing King is a [`ChessError::Invariant`].
    ///
    /// # Example
    /// ```
    /// # use osmium_core::{Color, Position};
    /// let pos = Position::from_fen("4k3/8/8/8/8/8/8/4KR2 b - - 0 1").unwrap();
    /// assert_eq!(pos.is_king_in_check(Color::Black), Ok(false));
    /// assert_eq!(pos.is_king_in_check(Color::White), Ok(false));
    ///
    /// let pos = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").unwrap();
    /// assert_eq!(pos.is_king_in_check(Color::Black), Ok(true));
    /// ```
    pub fn is_king_in_check(&self, color: Color) -> Result<bool> {
        let king = self.king_square(color)?;

        Ok(self
            .all_for(color.opponent())
            .any(|(square, piece)| self.piece_checks(square, piece, king)))
    }

    /// Returns `true` if the side to move is in check.
    pub fn is_in_check(&self) -> Result<bool> {
        self.is_king_in_check(self.side_to_move())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raycast_hits_king_up_the_file() {
        let pos = Position::from_fen("k7/8/8/8/8/8/8/R6K w - - 0 1").unwrap();
        assert_eq!(pos.raycast(Square::A1, Direction::UP), Some(Piece::BLACK_KING));
        assert_eq!(pos.raycast_hit_square(Square::A1, Direction::UP), Some(Square::A8));
        assert_eq!(pos.raycast(Square::A1, Direction::RIGHT), Some(Piece::WHITE_KING));
        assert_eq!(pos.raycast(Square::H1, Direction::LEFT), Some(Piece::WHITE_ROOK));
    }

    #[test]
    fn test_raycast_on_empty_board_hits_wall() {
        let pos = Position::new();
        for square in Square::iter() {
            for direction in Direction::ALL {
                assert_eq!(pos.raycast(square, direction), None);
                assert_eq!(pos.raycast_hit_square(square, direction), None);
            }
        }
    }

    #[test]
    fn test_raycast_ignores_origin() {
        let pos = Position::from_fen("8/8/8/8/3Q4/8/8/8 w - - 0 1").unwrap();
        assert_eq!(pos.raycast(Square::D4, Direction::UP), None);
        assert_eq!(pos.raycast(Square::D1, Direction::UP), Some(Piece::WHITE_QUEEN));
    }

    #[test]
    fn test_queen_on_d7_checks_king_on_e8() {
        let pos =
            Position::from_fen("r1bqkb1r/pppQ1ppp/5n2/8/4P3/8/PPP2PPP/RNB1KB1R b KQkq - 0 6")
                .unwrap();
        let queen = pos.piece_at(Square::D7).unwrap();
        assert_eq!(queen, Piece::WHITE_QUEEN);
        assert!(pos.piece_checks(Square::D7, queen, Square::E8));
        assert_eq!(pos.is_king_in_check(Color::Black), Ok(true));
        assert_eq!(pos.checkers(Color::Black), Ok(vec![Square::D7]));
    }

    #[test]
    fn test_white_not_in_check() {
        let pos =
            Position::from_fen("1rbqkbnr/pppppppp/2n5/7Q/4P3/8/PPPP1PPP/RNB1KBNR w KQk - 3 3")
                .unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(false));
        assert_eq!(pos.is_in_check(), Ok(false));
    }

    #[test]
    fn test_pawn_attacks_forward_diagonals_only() {
        let pos = Position::new();
        let white = Piece::WHITE_PAWN;
        assert!(pos.piece_checks(Square::E4, white, Square::D5));
        assert!(pos.piece_checks(Square::E4, white, Square::F5));
        assert!(!pos.piece_checks(Square::E4, white, Square::E5));
        assert!(!pos.piece_checks(Square::E4, white, Square::D3));

        let black = Piece::BLACK_PAWN;
        assert!(pos.piece_checks(Square::E5, black, Square::D4));
        assert!(pos.piece_checks(Square::E5, black, Square::F4));
        assert!(!pos.piece_checks(Square::E5, black, Square::F6));
    }

    #[test]
    fn test_knight_and_king_geometry() {
        let pos = Position::new();
        let knight = Piece::BLACK_KNIGHT;
        for target in [Square::F6, Square::G5, Square::C3, Square::D2] {
            assert!(pos.piece_checks(Square::E4, knight, target), "{target}");
        }
        assert!(!pos.piece_checks(Square::E4, knight, Square::E6));

        let king = Piece::BLACK_KING;
        assert!(pos.piece_checks(Square::E4, king, Square::F5));
        assert!(pos.piece_checks(Square::E4, king, Square::E3));
        assert!(!pos.piece_checks(Square::E4, king, Square::E6));
    }

    #[test]
    fn test_sliders_are_blocked() {
        // The knight on e2 shields the white King from the rook on e8
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(false));

        let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(true));

        // Bishop on a5 is blocked by the pawn on c3
        let pos = Position::from_fen("6k1/8/8/b7/8/2P5/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(false));

        let pos = Position::from_fen("6k1/8/8/b7/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(true));

        // Queens check along both lines
        let pos = Position::from_fen("6k1/8/8/8/8/8/8/q3K3 w - - 0 1").unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(true));
        let pos = Position::from_fen("6k1/8/8/q7/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(true));
    }

    #[test]
    fn test_own_pieces_never_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/3P4/4KR2 w - - 0 1").unwrap();
        assert_eq!(pos.is_king_in_check(Color::White), Ok(false));
    }

    #[test]
    fn test_king_search_order() {
        // Two white kings: the one nearest White's back rank wins
        let pos = Position::from_fen("K3k3/8/8/8/8/8/8/7K w - - 0 1").unwrap();
        assert_eq!(pos.king_square(Color::White), Ok(Square::H1));

        // Two black kings: the one nearest Black's back rank wins
        let pos = Position::from_fen("7k/8/8/8/8/8/8/k3K3 w - - 0 1").unwrap();
        assert_eq!(pos.king_square(Color::Black), Ok(Square::H8));

        // Ranks are searched in order, so a nearer rank beats an earlier file
        let pos = Position::from_fen("8/8/8/k7/7k/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pos.king_square(Color::Black), Ok(Square::A5));
        let pos = Position::from_fen("4k3/8/8/7K/K7/8/8/8 w - - 0 1").unwrap();
        assert_eq!(pos.king_square(Color::White), Ok(Square::A4));
    }

    #[test]
    fn test_missing_king_is_invariant_violation() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let err = pos.is_king_in_check(Color::Black).unwrap_err();
        assert!(err.is_invariant());
        assert!(pos.checkers(Color::Black).is_err());
    }
}
