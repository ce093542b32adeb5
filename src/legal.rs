/*
 * Mantis, a chess rules engine
 * Copyright (C) 2024 Ciekce
 *
 * Mantis is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mantis is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mantis. If not, see <https://www.gnu.org/licenses/>.
 */

//! Narrows pseudolegal moves down to the ones that keep the mover's king
//! safe.

use crate::bitboard::Bitboard;
use crate::chess_move::{ChessMove, MoveFlag};
use crate::core::{PieceKind, Square};
use crate::movegen::{generate_pseudolegal, MoveList, PseudoMoveList};
use crate::position::BoardState;
use crate::rays::{diagonally_aligned, orthogonally_aligned, ray_between};

/// Exposure of the side to move's king: who gives check and which
/// friendly pieces are pinned, and by whom.
#[derive(Debug, Clone)]
pub(crate) struct KingSafety {
    king: Square,
    checkers: Bitboard,
    pinned: Bitboard,
    pinners: [Option<Square>; 64],
}

impl KingSafety {
    pub fn analyze(state: &BoardState) -> Self {
        let us = state.side_to_move;
        let them = us.flip();

        let king = state.king_square(us);
        let occ = state.occupied;
        let ours = state.color_occupancy(us);

        let checkers = state.attackers_to(king, them, occ);

        let their_queens = state.pieces(them, PieceKind::Queen);
        let orthogonal = state.pieces(them, PieceKind::Rook) | their_queens;
        let diagonal = state.pieces(them, PieceKind::Bishop) | their_queens;

        let mut pinned = Bitboard::EMPTY;
        let mut pinners = [None; 64];

        for slider in orthogonal | diagonal {
            let aligned = (orthogonal.get(slider) && orthogonally_aligned(king, slider))
                || (diagonal.get(slider) && diagonally_aligned(king, slider));

            if !aligned {
                continue;
            }

            let blockers = ray_between(king, slider) & occ;

            if blockers.popcount() == 1 && !(blockers & ours).is_empty() {
                let sq = blockers.lowest_square();
                pinned.set(sq);
                pinners[sq.idx()] = Some(slider);
            }
        }

        Self {
            king,
            checkers,
            pinned,
            pinners,
        }
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        !self.checkers().is_empty()
    }

    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        self.checkers
    }

    #[must_use]
    pub fn is_pinned(&self, sq: Square) -> bool {
        self.pinned.get(sq)
    }

    /// Squares a piece on `sq` may move to without breaking its pin:
    /// the line up to and including the pinner, or everything.
    #[must_use]
    pub fn pin_ray(&self, sq: Square) -> Bitboard {
        match self.pinners[sq.idx()] {
            Some(pinner) => ray_between(self.king, pinner).with(pinner),
            None => Bitboard::ALL,
        }
    }

    fn king_move_is_safe(&self, state: &BoardState, mv: ChessMove) -> bool {
        let them = state.side_to_move.flip();

        // a slider's ray must be able to pass through the king's old square
        let occ = state.occupied.without(self.king);

        if mv.flag() == MoveFlag::Castling {
            if self.in_check() {
                return false;
            }

            let path = ray_between(mv.src(), mv.dst()).with(mv.dst());
            return path.into_iter().all(|sq| !state.is_attacked(sq, them, occ));
        }

        !state.is_attacked(mv.dst(), them, occ)
    }

    // En passant removes two pieces from the board, one of which is not
    // the mover, so pins through the captured pawn go unseen. Replay the
    // capture on a copy and look at the king directly.
    fn en_passant_is_safe(&self, state: &BoardState, mv: ChessMove) -> bool {
        let mut scratch = *state;
        scratch.make_move(mv);

        !scratch.is_attacked(self.king, state.side_to_move.flip(), scratch.occupied)
    }

    #[must_use]
    pub fn permits(&self, state: &BoardState, mv: ChessMove) -> bool {
        let src = mv.src();
        let dst = mv.dst();

        if src == self.king {
            return self.king_move_is_safe(state, mv);
        }

        let allowed = match self.checkers.popcount() {
            0 => self.pin_ray(src).get(dst),
            1 => {
                let checker = self.checkers.lowest_square();
                let evasion = ray_between(self.king, checker).with(checker);

                let takes_checker_en_passant = mv.flag() == MoveFlag::EnPassant
                    && dst.offset(-state.side_to_move.forward()) == checker;

                !self.is_pinned(src) && (evasion.get(dst) || takes_checker_en_passant)
            }
            _ => false,
        };

        allowed && (mv.flag() != MoveFlag::EnPassant || self.en_passant_is_safe(state, mv))
    }
}

/// Fills `moves` with the legal moves of `state`, keeping pseudolegal
/// generation order.
pub(crate) fn generate_legal(moves: &mut MoveList, state: &BoardState, safety: &KingSafety) {
    let mut pseudolegal = PseudoMoveList::new();
    generate_pseudolegal(&mut pseudolegal, state);

    moves.extend(
        pseudolegal
            .into_iter()
            .filter(|mv| safety.permits(state, *mv)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen;

    fn legal(fen: &str) -> Vec<String> {
        let state = fen::parse(fen).unwrap();
        let safety = KingSafety::analyze(&state);
        let mut moves = MoveList::new();
        generate_legal(&mut moves, &state, &safety);
        moves.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_pins_and_pinners() {
        let state = fen::parse("4k3/8/8/b7/8/8/3N4/4K3 w - - 0 1").unwrap();
        let safety = KingSafety::analyze(&state);

        assert!(!safety.in_check());
        assert!(safety.is_pinned(Square::D2));
        assert_eq!(
            safety.pin_ray(Square::D2),
            [Square::D2, Square::C3, Square::B4, Square::A5]
                .into_iter()
                .collect::<Bitboard>()
        );
        assert_eq!(safety.pin_ray(Square::E1), Bitboard::ALL);
    }

    #[test]
    fn two_blockers_are_not_a_pin() {
        let state = fen::parse("4k3/4r3/8/8/4N3/8/4P3/4K3 w - - 0 1").unwrap();
        let safety = KingSafety::analyze(&state);

        assert!(!safety.is_pinned(Square::E4));
        assert!(!safety.is_pinned(Square::E2));
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let moves = legal("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!moves.iter().any(|mv| mv.starts_with("e2")));
    }

    #[test]
    fn single_check_must_be_answered() {
        // Rb8+ against the king on b1: block on b2..b7, take the rook, or step aside
        let moves = legal("1r2k3/8/8/8/8/8/6B1/1K6 w - - 0 1");
        assert!(moves.contains(&"g2b7".to_owned()));
        assert!(!moves.contains(&"g2h3".to_owned()));
        assert!(moves.contains(&"b1a1".to_owned()));
        assert!(!moves.contains(&"b1b2".to_owned()));
    }

    #[test]
    fn double_check_leaves_only_king_moves() {
        let state = fen::parse("4k3/8/8/8/8/5n2/8/R3K2r w Q - 0 1").unwrap();
        let safety = KingSafety::analyze(&state);
        assert_eq!(safety.checkers().popcount(), 2);

        let moves = legal("4k3/8/8/8/8/5n2/8/R3K2r w Q - 0 1");
        assert!(moves.iter().all(|mv| mv.starts_with("e1")));
        assert!(!moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn king_cannot_retreat_along_the_checking_line() {
        let moves = legal("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(!moves.contains(&"e1f1".to_owned()));
        assert!(moves.contains(&"e1e2".to_owned()));
    }

    #[test]
    fn castling_through_attacked_square() {
        // d1 is covered by the rook on d8, b1 on the queen side is not on the king's path
        let moves = legal("3rk3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.contains(&"e1g1".to_owned()));
        assert!(!moves.contains(&"e1c1".to_owned()));

        let moves = legal("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn en_passant_evades_pawn_check() {
        // d7d5 gave check to the king on e4; exd6 removes the checker
        let moves = legal("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
        assert!(moves.contains(&"e5d6".to_owned()));
    }
}
