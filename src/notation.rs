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

//! Standard algebraic notation for the move log.

use crate::bitboard::Bitboard;
use crate::chess_move::{ChessMove, MoveFlag};
use crate::core::{PieceKind, Square};
use crate::position::{BoardState, Status};

/// Describes `mv`, which must be in `legal`, as played from `state`.
/// Check and mate marks depend on the resulting position and are added
/// with [`status_suffix`].
pub(crate) fn describe(state: &BoardState, legal: &[ChessMove], mv: ChessMove) -> String {
    let us = state.side_to_move;
    let src = mv.src();
    let dst = mv.dst();

    if mv.flag() == MoveFlag::Castling {
        let side = if dst.file() > src.file() { "O-O" } else { "O-O-O" };
        return side.to_owned();
    }

    let Some(kind) = state.kind_at(us, src) else {
        return mv.to_string();
    };

    let capture = mv.flag() == MoveFlag::EnPassant || state.color_occupancy(us.flip()).get(dst);

    let mut san = String::with_capacity(8);

    if kind == PieceKind::Pawn {
        if capture {
            san.push(src.file_char());
            san.push('x');
        }

        push_square(&mut san, dst);

        if let Some(promo) = mv.promotion_piece() {
            san.push('=');
            san.push(promo.kind().to_char().to_ascii_uppercase());
        }

        return san;
    }

    san.push(kind.to_char().to_ascii_uppercase());
    push_disambiguation(&mut san, state, legal, mv, kind);

    if capture {
        san.push('x');
    }

    push_square(&mut san, dst);
    san
}

fn push_square(san: &mut String, sq: Square) {
    san.push(sq.file_char());
    san.push(sq.rank_char());
}

// Other pieces of the same kind that can reach the same square force the
// origin file, else the rank, else the whole square.
fn push_disambiguation(
    san: &mut String,
    state: &BoardState,
    legal: &[ChessMove],
    mv: ChessMove,
    kind: PieceKind,
) {
    let src = mv.src();
    let us = state.side_to_move;

    let rivals: Bitboard = legal
        .iter()
        .filter(|other| other.dst() == mv.dst() && other.src() != src)
        .map(|other| other.src())
        .filter(|sq| state.kind_at(us, *sq) == Some(kind))
        .collect();

    if rivals.is_empty() {
        return;
    }

    if (rivals & Bitboard::file(src.file())).is_empty() {
        san.push(src.file_char());
    } else if (rivals & Bitboard::rank(src.rank())).is_empty() {
        san.push(src.rank_char());
    } else {
        push_square(san, src);
    }
}

pub(crate) const fn status_suffix(status: Status) -> &'static str {
    match status {
        Status::Check => "+",
        Status::Checkmate => "#",
        Status::Normal | Status::Stalemate => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn san_after(fen: &str, moves: &[&str]) -> Vec<String> {
        let mut pos = Position::from_fen(fen).unwrap();
        for mv in moves {
            pos.play(mv).unwrap();
        }
        pos.history().to_vec()
    }

    #[test]
    fn pieces_pawns_and_captures() {
        let log = san_after(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3"],
        );
        assert_eq!(log, ["e4", "d5", "exd5", "Qxd5", "Nc3"]);
    }

    #[test]
    fn file_and_rank_disambiguation() {
        let log = san_after("4k3/8/8/8/8/8/4K3/R6R w - - 0 1", &["a1d1"]);
        assert_eq!(log, ["Rad1"]);

        let log = san_after("4k3/R7/8/8/8/8/8/R3K3 w - - 0 1", &["a1a4"]);
        assert_eq!(log, ["R1a4"]);

        let log = san_after("1k6/8/8/8/4Q2Q/8/8/K6Q w - - 0 1", &["h4e1"]);
        assert_eq!(log, ["Qh4e1"]);
    }

    #[test]
    fn promotion_and_en_passant() {
        let log = san_after("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1", &["b7b8n"]);
        assert_eq!(log, ["b8=N"]);

        let log = san_after("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", &["e5d6"]);
        assert_eq!(log, ["exd6"]);
    }

    #[test]
    fn check_and_mate_marks() {
        let log = san_after(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &["f2f3", "e7e5", "g2g4", "d8h4"],
        );
        assert_eq!(log, ["f3", "e5", "g4", "Qh4#", "0-1"]);

        let log = san_after("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", &["a1a8"]);
        assert_eq!(log, ["Ra8+"]);
    }

    #[test]
    fn stalemate_logs_a_draw() {
        let log = san_after("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1", &["f1f7"]);
        assert_eq!(log, ["Qf7", "1/2-1/2"]);
    }
}
