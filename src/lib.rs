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

//! Mantis: a bitboard chess rules engine.
//!
//! [`Position`] holds a game in progress. It enumerates legal moves,
//! applies and takes back moves, reports check, mate and stalemate, and
//! reads and writes FEN. [`perft`] counts move paths for generator
//! verification, and [`Position::to_numeric_encoding`] exposes the board
//! as fixed-shape numeric planes.
//!
//! ```
//! use mantis_chess::{Position, Status};
//!
//! let mut pos = Position::startpos();
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     pos.play(mv).unwrap();
//! }
//!
//! assert_eq!(pos.status(), Status::Checkmate);
//! assert!(pos.legal_moves().is_empty());
//! ```

#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

mod macros;

pub mod attacks;
pub mod bitboard;
pub mod chess_move;
pub mod core;
pub mod encoding;
pub mod error;
pub mod fen;
mod legal;
pub mod movegen;
mod notation;
pub mod perft;
pub mod position;
pub mod rays;

pub use crate::bitboard::Bitboard;
pub use crate::chess_move::{ChessMove, MoveFlag, PromotionPiece};
pub use crate::core::{to_internal, to_visible, Color, Piece, PieceKind, Square, SquareStrError};
pub use crate::encoding::{PerspectivePlanes, PiecePlanes};
pub use crate::error::{ChessError, InputError};
pub use crate::fen::FenError;
pub use crate::movegen::MoveList;
pub use crate::perft::{perft, perft_divide};
pub use crate::position::{CastlingRights, Outcome, Position, Status, STARTPOS_FEN};
