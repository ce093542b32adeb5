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

//! Forsyth-Edwards Notation import and export.

use crate::bitboard::Bitboard;
use crate::core::{Color, Piece, PieceKind, Square};
use crate::position::{BoardState, CastlingRights};

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FenError {
    #[error("expected 6 fields, found {0}")]
    WrongFieldCount(usize),
    #[error("not enough ranks")]
    NotEnoughRanks,
    #[error("too many ranks")]
    TooManyRanks,
    #[error("not enough files in rank {}", .0 + 1)]
    NotEnoughFiles(u32),
    #[error("too many files in rank {}", .0 + 1)]
    TooManyFiles(u32),
    #[error("invalid character '{0}'")]
    InvalidChar(char),
    #[error("invalid side to move")]
    InvalidStm,
    #[error("invalid castling rights")]
    InvalidCastling,
    #[error("invalid en passant square")]
    InvalidEnPassant,
    #[error("invalid halfmove clock")]
    InvalidHalfmove,
    #[error("invalid fullmove number")]
    InvalidFullmove,
    #[error("{0} must have exactly one king")]
    KingCount(Color),
    #[error("pawn on a back rank")]
    PawnOnBackRank,
    #[error("side not to move is in check")]
    OpponentInCheck,
    #[error("{0} has more material than a legal game allows")]
    TooMuchMaterial(Color),
}

pub(crate) fn parse(fen: &str) -> Result<BoardState, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();

    let &[placement, stm, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
        return Err(FenError::WrongFieldCount(fields.len()));
    };

    let mut state = BoardState::empty();

    parse_placement(&mut state, placement)?;

    state.side_to_move = match stm {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(FenError::InvalidStm),
    };

    state.castling = parse_castling(castling)?;
    state.en_passant = parse_en_passant(en_passant, state.side_to_move)?;

    state.halfmove = halfmove.parse().map_err(|_| FenError::InvalidHalfmove)?;
    state.fullmove = fullmove.parse().map_err(|_| FenError::InvalidFullmove)?;

    state.recompute_aggregates();
    validate(&state)?;

    Ok(state)
}

fn parse_placement(state: &mut BoardState, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();

    if ranks.len() < 8 {
        return Err(FenError::NotEnoughRanks);
    } else if ranks.len() > 8 {
        return Err(FenError::TooManyRanks);
    }

    // first row is rank 8
    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row as u32;
        let mut file = 0u32;

        for c in text.chars() {
            if file >= 8 {
                return Err(FenError::TooManyFiles(rank));
            }

            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FenError::InvalidChar(c));
                }
                file += run;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidChar(c))?;
                let sq = Square::from_coords(rank, file);
                state.pieces[piece.color.idx()][piece.kind.idx()].set(sq);
                file += 1;
            }
        }

        if file > 8 {
            return Err(FenError::TooManyFiles(rank));
        } else if file < 8 {
            return Err(FenError::NotEnoughFiles(rank));
        }
    }

    Ok(())
}

fn parse_castling(text: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;

    if text == "-" {
        return Ok(rights);
    }

    for c in text.chars() {
        let flag = match c {
            'K' => &mut rights.white_short,
            'Q' => &mut rights.white_long,
            'k' => &mut rights.black_short,
            'q' => &mut rights.black_long,
            _ => return Err(FenError::InvalidCastling),
        };

        if *flag {
            return Err(FenError::InvalidCastling);
        }
        *flag = true;
    }

    Ok(rights)
}

fn parse_en_passant(text: &str, stm: Color) -> Result<Option<Square>, FenError> {
    if text == "-" {
        return Ok(None);
    }

    let sq: Square = text.parse().map_err(|_| FenError::InvalidEnPassant)?;

    // the target sits behind a pawn that just moved two squares
    let expected_rank = match stm {
        Color::White => 5,
        Color::Black => 2,
    };

    if sq.rank() == expected_rank {
        Ok(Some(sq))
    } else {
        Err(FenError::InvalidEnPassant)
    }
}

fn validate(state: &BoardState) -> Result<(), FenError> {
    for color in Color::ALL {
        if state.pieces(color, PieceKind::King).popcount() != 1 {
            return Err(FenError::KingCount(color));
        }
    }

    let pawns =
        state.pieces(Color::White, PieceKind::Pawn) | state.pieces(Color::Black, PieceKind::Pawn);
    if !(pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_empty() {
        return Err(FenError::PawnOnBackRank);
    }

    for color in Color::ALL {
        if !material_is_reachable(state, color) {
            return Err(FenError::TooMuchMaterial(color));
        }
    }

    let stm = state.side_to_move;
    let their_king = state.king_square(stm.flip());
    if state.is_attacked(their_king, stm, state.occupied) {
        return Err(FenError::OpponentInCheck);
    }

    Ok(())
}

/// Every piece beyond the starting complement must have been a pawn.
fn material_is_reachable(state: &BoardState, color: Color) -> bool {
    let count = |kind| state.pieces(color, kind).popcount();

    let pawns = count(PieceKind::Pawn);
    if pawns > 8 || state.color_occupancy(color).popcount() > 16 {
        return false;
    }

    let promoted: u32 = [
        (PieceKind::Knight, 2),
        (PieceKind::Bishop, 2),
        (PieceKind::Rook, 2),
        (PieceKind::Queen, 1),
    ]
    .into_iter()
    .map(|(kind, initial)| count(kind).saturating_sub(initial))
    .sum();

    promoted <= 8 - pawns
}

pub(crate) fn write(state: &BoardState) -> String {
    let mut placement = String::with_capacity(72);

    for rank in (0..8).rev() {
        let mut empty = 0u8;

        for file in 0..8 {
            if let Some(piece) = state.piece_at(Square::from_coords(rank, file)) {
                if empty > 0 {
                    placement.push((b'0' + empty) as char);
                    empty = 0;
                }
                placement.push(piece.to_char());
            } else {
                empty += 1;
            }
        }

        if empty > 0 {
            placement.push((b'0' + empty) as char);
        }

        if rank > 0 {
            placement.push('/');
        }
    }

    let en_passant = state
        .en_passant
        .map_or_else(|| "-".to_owned(), |sq| sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        placement,
        state.side_to_move.to_char(),
        state.castling,
        en_passant,
        state.halfmove,
        state.fullmove
    )
}
