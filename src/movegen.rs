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

//! Pseudolegal move generation: moves that follow piece movement rules
//! and board occupancy but may leave the mover's king attacked.

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::chess_move::{ChessMove, PromotionPiece};
use crate::core::{Color, PieceKind, Square};
use crate::position::BoardState;
use crate::rays::ray_between;
use arrayvec::ArrayVec;

/// Legal moves of one position. No legal position has more than 218.
pub type MoveList = ArrayVec<ChessMove, 256>;

// pseudolegal lists may include king walks into check and moves of
// pinned pieces, so leave extra room
pub(crate) type PseudoMoveList = ArrayVec<ChessMove, 512>;

fn serialize_normal(moves: &mut PseudoMoveList, src: Square, dsts: Bitboard) {
    for dst in dsts {
        moves.push(ChessMove::normal(src, dst));
    }
}

fn serialize_normal_pawn(moves: &mut PseudoMoveList, offset: i32, dsts: Bitboard) {
    for dst in dsts {
        moves.push(ChessMove::normal(dst.offset(-offset), dst));
    }
}

fn serialize_promo_pawn(moves: &mut PseudoMoveList, offset: i32, dsts: Bitboard) {
    for dst in dsts {
        let src = dst.offset(-offset);
        for promo in PromotionPiece::ALL {
            moves.push(ChessMove::promotion(src, dst, promo));
        }
    }
}

fn generate_pawn_moves(moves: &mut PseudoMoveList, state: &BoardState) {
    let stm = state.side_to_move;
    let nstm = stm.flip();

    let pawns = state.pieces(stm, PieceKind::Pawn);
    let them = state.color_occupancy(nstm);
    let empty = state.empty;

    let (promo_rank, double_push_rank) = match stm {
        Color::White => (Bitboard::RANK_8, Bitboard::RANK_4),
        Color::Black => (Bitboard::RANK_1, Bitboard::RANK_5),
    };

    let single_offset = stm.forward();
    let double_offset = single_offset * 2;

    let (left_offset, right_offset) = match stm {
        Color::White => (7, 9),
        Color::Black => (-9, -7),
    };

    let single_pushes = pawns.shift_up_relative(stm) & empty;
    let double_pushes = single_pushes.shift_up_relative(stm) & empty & double_push_rank;

    serialize_normal_pawn(moves, single_offset, single_pushes & !promo_rank);
    serialize_promo_pawn(moves, single_offset, single_pushes & promo_rank);
    serialize_normal_pawn(moves, double_offset, double_pushes);

    let left_captures = pawns.shift_up_left_relative(stm) & them;
    let right_captures = pawns.shift_up_right_relative(stm) & them;

    serialize_normal_pawn(moves, left_offset, left_captures & !promo_rank);
    serialize_promo_pawn(moves, left_offset, left_captures & promo_rank);

    serialize_normal_pawn(moves, right_offset, right_captures & !promo_rank);
    serialize_promo_pawn(moves, right_offset, right_captures & promo_rank);

    if let Some(ep_sq) = state.en_passant {
        // the pawn that just double-pushed must really be there
        let victim = ep_sq.offset(-single_offset);
        if state.pieces(nstm, PieceKind::Pawn).get(victim) && empty.get(ep_sq) {
            for capturer in pawns & attacks::pawn_attacks(nstm, ep_sq) {
                moves.push(ChessMove::en_passant(capturer, ep_sq));
            }
        }
    }
}

fn generate_knight_moves(moves: &mut PseudoMoveList, state: &BoardState) {
    let stm = state.side_to_move;
    let us = state.color_occupancy(stm);

    for knight in state.pieces(stm, PieceKind::Knight) {
        serialize_normal(moves, knight, attacks::knight_attacks(knight) & !us);
    }
}

fn generate_king_moves(moves: &mut PseudoMoveList, state: &BoardState) {
    let stm = state.side_to_move;
    let us = state.color_occupancy(stm);

    for king in state.pieces(stm, PieceKind::King) {
        serialize_normal(moves, king, attacks::king_attacks(king) & !us);
    }

    generate_castling(moves, state);
}

// Only checks rights, piece placement and empty squares. Whether the king
// is in check or crosses an attacked square is left to the legal filter.
fn generate_castling(moves: &mut PseudoMoveList, state: &BoardState) {
    let stm = state.side_to_move;
    let rights = state.castling;

    let rank = stm.back_rank();
    let king = Square::from_coords(rank, 4);

    if !state.pieces(stm, PieceKind::King).get(king) {
        return;
    }

    let rooks = state.pieces(stm, PieceKind::Rook);
    let occ = state.occupied;

    let mut gen_castling = |rook: Square, king_dst_file: u32| {
        if rooks.get(rook) && (ray_between(king, rook) & occ).is_empty() {
            moves.push(ChessMove::castling(
                king,
                Square::from_coords(rank, king_dst_file),
            ));
        }
    };

    if rights.short(stm) {
        gen_castling(Square::from_coords(rank, 7), Square::G1.file());
    }

    if rights.long(stm) {
        gen_castling(Square::from_coords(rank, 0), Square::C1.file());
    }
}

fn generate_slider_moves(
    moves: &mut PseudoMoveList,
    state: &BoardState,
    kind: PieceKind,
    slider_attacks: fn(Square, Bitboard) -> Bitboard,
) {
    let stm = state.side_to_move;
    let us = state.color_occupancy(stm);
    let occ = state.occupied;

    for slider in state.pieces(stm, kind) {
        serialize_normal(moves, slider, slider_attacks(slider, occ) & !us);
    }
}

/// Appends every pseudolegal move for the side to move, grouped by piece
/// kind in the order pawns, knights, king, rooks, bishops, queens.
pub(crate) fn generate_pseudolegal(moves: &mut PseudoMoveList, state: &BoardState) {
    generate_pawn_moves(moves, state);
    generate_knight_moves(moves, state);
    generate_king_moves(moves, state);
    generate_slider_moves(moves, state, PieceKind::Rook, attacks::rook_attacks);
    generate_slider_moves(moves, state, PieceKind::Bishop, attacks::bishop_attacks);
    generate_slider_moves(moves, state, PieceKind::Queen, attacks::queen_attacks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::MoveFlag;
    use crate::fen;

    fn pseudolegal(fen: &str) -> PseudoMoveList {
        let state = fen::parse(fen).unwrap();
        let mut moves = PseudoMoveList::new();
        generate_pseudolegal(&mut moves, &state);
        moves
    }

    fn names(moves: &PseudoMoveList) -> Vec<String> {
        moves.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn startpos_order() {
        let moves = pseudolegal("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let names = names(&moves);

        assert_eq!(moves.len(), 20);
        assert_eq!(&names[..2], ["a2a3", "b2b3"]);
        assert_eq!(&names[8..10], ["a2a4", "b2b4"]);
        assert_eq!(&names[16..], ["b1a3", "b1c3", "g1f3", "g1h3"]);
    }

    #[test]
    fn promotions_fan_out_in_selector_order() {
        let moves = pseudolegal("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let promos: Vec<String> = moves
            .iter()
            .filter(|mv| mv.flag() == MoveFlag::Promotion)
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            promos,
            ["a7a8r", "a7a8n", "a7a8b", "a7a8q", "a7b8r", "a7b8n", "a7b8b", "a7b8q"]
        );
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let moves = names(&pseudolegal("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1"));
        assert!(!moves.iter().any(|mv| mv.starts_with("e2")));

        let moves = names(&pseudolegal("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1"));
        assert!(moves.contains(&"e2e3".to_owned()));
        assert!(!moves.contains(&"e2e4".to_owned()));
    }

    #[test]
    fn en_passant_from_both_sides() {
        let moves = pseudolegal("4k3/8/8/2PpP3/8/8/8/4K3 w - d6 0 1");
        let ep: Vec<String> = moves
            .iter()
            .filter(|mv| mv.flag() == MoveFlag::EnPassant)
            .map(ToString::to_string)
            .collect();

        assert_eq!(ep, ["c5d6", "e5d6"]);
    }

    #[test]
    fn castling_ignores_attacks_but_not_blockers() {
        // f1 is attacked, which only the legal filter cares about
        let moves = pseudolegal("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<String> = moves
            .iter()
            .filter(|mv| mv.flag() == MoveFlag::Castling)
            .map(ToString::to_string)
            .collect();
        assert_eq!(castles, ["e1g1", "e1c1"]);

        let moves = pseudolegal("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert!(!moves.iter().any(|mv| mv.flag() == MoveFlag::Castling));
    }

    #[test]
    fn sliders_stop_at_pieces() {
        let moves = names(&pseudolegal("4k3/8/8/8/1p6/8/3P4/R3K3 w - - 0 1"));
        assert!(moves.contains(&"a1a8".to_owned()));
        assert!(moves.contains(&"a1d1".to_owned()));
        assert!(!moves.contains(&"a1e1".to_owned()));
    }
}
