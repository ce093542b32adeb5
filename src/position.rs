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

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::chess_move::{ChessMove, MoveFlag, PromotionPiece};
use crate::core::{Color, Piece, PieceKind, Square};
use crate::error::{ChessError, InputError};
use crate::fen;
use crate::legal::{self, KingSafety};
use crate::movegen::MoveList;
use crate::notation;
use log::{debug, warn};
use std::fmt::{Display, Formatter};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights {
    pub white_short: bool,
    pub white_long: bool,
    pub black_short: bool,
    pub black_long: bool,
}

impl CastlingRights {
    pub const NONE: Self = Self {
        white_short: false,
        white_long: false,
        black_short: false,
        black_long: false,
    };

    pub const ALL: Self = Self {
        white_short: true,
        white_long: true,
        black_short: true,
        black_long: true,
    };

    #[must_use]
    pub const fn short(self, c: Color) -> bool {
        match c {
            Color::White => self.white_short,
            Color::Black => self.black_short,
        }
    }

    #[must_use]
    pub const fn long(self, c: Color) -> bool {
        match c {
            Color::White => self.white_long,
            Color::Black => self.black_long,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.white_short || self.white_long || self.black_short || self.black_long)
    }

    // Any move from or to a king or rook home square ends the matching
    // rights for good, which also covers rooks captured at home.
    fn revoke_touching(&mut self, sq: Square) {
        match sq {
            Square::E1 => {
                self.white_short = false;
                self.white_long = false;
            }
            Square::H1 => self.white_short = false,
            Square::A1 => self.white_long = false,
            Square::E8 => {
                self.black_short = false;
                self.black_long = false;
            }
            Square::H8 => self.black_short = false,
            Square::A8 => self.black_long = false,
            _ => {}
        }
    }
}

/// The FEN castling field.
impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }

        for (set, c) in [
            (self.white_short, 'K'),
            (self.white_long, 'Q'),
            (self.black_short, 'k'),
            (self.black_long, 'q'),
        ] {
            if set {
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl Status {
    #[must_use]
    pub const fn derive(in_check: bool, has_moves: bool) -> Self {
        match (in_check, has_moves) {
            (false, true) => Self::Normal,
            (true, true) => Self::Check,
            (true, false) => Self::Checkmate,
            (false, false) => Self::Stalemate,
        }
    }

    #[must_use]
    pub const fn in_check(self) -> bool {
        matches!(self, Self::Check | Self::Checkmate)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    /// Static terminal evaluation from `color`'s point of view.
    #[must_use]
    pub const fn score_for(self, color: Color) -> i32 {
        match (self, color) {
            (Self::Draw, _) => 0,
            (Self::WhiteWins, Color::White) | (Self::BlackWins, Color::Black) => 1,
            _ => -1,
        }
    }

    #[must_use]
    pub const fn result_token(self) -> &'static str {
        match self {
            Self::WhiteWins => "1-0",
            Self::BlackWins => "0-1",
            Self::Draw => "1/2-1/2",
        }
    }
}

/// Everything that defines a position on the board, as a plain value.
/// Aggregates are kept in sync by [`BoardState::recompute_aggregates`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct BoardState {
    pub pieces: [[Bitboard; 6]; 2],
    pub white: Bitboard,
    pub black: Bitboard,
    pub occupied: Bitboard,
    pub empty: Bitboard,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove: u16,
    pub fullmove: u32,
}

#[allow(clippy::unreadable_literal)]
impl BoardState {
    pub fn empty() -> Self {
        Self {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            white: Bitboard::EMPTY,
            black: Bitboard::EMPTY,
            occupied: Bitboard::EMPTY,
            empty: Bitboard::ALL,
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    pub fn startpos() -> Self {
        let white = [
            Bitboard::RANK_2,
            Bitboard::from_raw(0x42),
            Bitboard::from_raw(0x24),
            Bitboard::from_raw(0x81),
            Bitboard::from_raw(0x08),
            Bitboard::from_raw(0x10),
        ];
        let black = white.map(|board| Bitboard::from_raw(board.raw().swap_bytes()));

        let mut state = Self::empty();
        state.pieces = [white, black];
        state.castling = CastlingRights::ALL;
        state.recompute_aggregates();
        state
    }

    pub fn recompute_aggregates(&mut self) {
        let union = |boards: &[Bitboard; 6]| boards.iter().fold(Bitboard::EMPTY, |acc, &b| acc | b);

        self.white = union(&self.pieces[Color::White.idx()]);
        self.black = union(&self.pieces[Color::Black.idx()]);
        self.occupied = self.white | self.black;
        self.empty = !self.occupied;
    }

    #[must_use]
    pub fn pieces(&self, c: Color, kind: PieceKind) -> Bitboard {
        self.pieces[c.idx()][kind.idx()]
    }

    #[must_use]
    pub fn color_occupancy(&self, c: Color) -> Bitboard {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[must_use]
    pub fn kind_at(&self, c: Color, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces(c, *kind).get(sq))
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let color = if self.white.get(sq) {
            Color::White
        } else if self.black.get(sq) {
            Color::Black
        } else {
            return None;
        };

        self.kind_at(color, sq).map(|kind| kind.colored(color))
    }

    #[must_use]
    pub fn king_square(&self, c: Color) -> Square {
        self.pieces(c, PieceKind::King).lowest_square()
    }

    /// Pieces of color `by` attacking `sq`, with sliders seeing through
    /// `occupancy` rather than the real board.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, by: Color, occupancy: Bitboard) -> Bitboard {
        let theirs = &self.pieces[by.idx()];
        let queens = theirs[PieceKind::Queen.idx()];

        (attacks::pawn_attacks(by.flip(), sq) & theirs[PieceKind::Pawn.idx()])
            | (attacks::knight_attacks(sq) & theirs[PieceKind::Knight.idx()])
            | (attacks::king_attacks(sq) & theirs[PieceKind::King.idx()])
            | (attacks::bishop_attacks(sq, occupancy) & (theirs[PieceKind::Bishop.idx()] | queens))
            | (attacks::rook_attacks(sq, occupancy) & (theirs[PieceKind::Rook.idx()] | queens))
    }

    #[must_use]
    pub fn is_attacked(&self, sq: Square, by: Color, occupancy: Bitboard) -> bool {
        !self.attackers_to(sq, by, occupancy).is_empty()
    }

    /// Plays `mv` without any legality check.
    pub fn make_move(&mut self, mv: ChessMove) {
        let us = self.side_to_move;
        let them = us.flip();

        let src = mv.src();
        let dst = mv.dst();

        let moving = self.kind_at(us, src);
        debug_assert!(moving.is_some(), "no {us} piece on {src}");

        let captured = if mv.flag() == MoveFlag::EnPassant {
            let victim = dst.offset(-us.forward());
            self.pieces[them.idx()][PieceKind::Pawn.idx()].clear(victim);
            Some(PieceKind::Pawn)
        } else {
            let captured = self.kind_at(them, dst);
            if let Some(kind) = captured {
                self.pieces[them.idx()][kind.idx()].clear(dst);
            }
            captured
        };

        let ours = &mut self.pieces[us.idx()];

        match mv.flag() {
            MoveFlag::Promotion => {
                let promo = mv.promotion_piece().unwrap_or(PromotionPiece::Queen);
                ours[PieceKind::Pawn.idx()].clear(src);
                ours[promo.kind().idx()].set(dst);
            }
            MoveFlag::Castling => {
                let rank = src.rank();
                let (rook_src, rook_dst) = if dst.file() > src.file() {
                    (Square::from_coords(rank, 7), Square::from_coords(rank, 5))
                } else {
                    (Square::from_coords(rank, 0), Square::from_coords(rank, 3))
                };

                ours[PieceKind::King.idx()].toggle(src);
                ours[PieceKind::King.idx()].toggle(dst);
                ours[PieceKind::Rook.idx()].toggle(rook_src);
                ours[PieceKind::Rook.idx()].toggle(rook_dst);
            }
            MoveFlag::Normal | MoveFlag::EnPassant => {
                if let Some(kind) = moving {
                    ours[kind.idx()].clear(src);
                    ours[kind.idx()].set(dst);
                }
            }
        }

        self.castling.revoke_touching(src);
        self.castling.revoke_touching(dst);

        let pawn_move = moving == Some(PieceKind::Pawn);

        self.en_passant = if pawn_move && src.raw().abs_diff(dst.raw()) == 16 {
            Some(src.offset(us.forward()))
        } else {
            None
        };

        if pawn_move || captured.is_some() {
            self.halfmove = 0;
        } else {
            self.halfmove = self.halfmove.saturating_add(1);
        }

        if us == Color::Black {
            self.fullmove = self.fullmove.saturating_add(1);
        }

        self.side_to_move = them;
        self.recompute_aggregates();
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Undo {
    state: BoardState,
    legal: MoveList,
    status: Status,
    history_len: usize,
}

/// A game in progress: the board, its legal moves and status, the
/// notation log, and the undo stack.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Position {
    state: BoardState,
    legal: MoveList,
    status: Status,
    history: Vec<String>,
    undo: Vec<Undo>,
}

impl Position {
    #[must_use]
    pub fn new() -> Self {
        Self::startpos()
    }

    #[must_use]
    pub fn startpos() -> Self {
        Self::from_state(BoardState::startpos())
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let state = fen::parse(fen)?;
        debug!("loaded position {fen}");
        Ok(Self::from_state(state))
    }

    fn from_state(state: BoardState) -> Self {
        let mut result = Self {
            state,
            legal: MoveList::new(),
            status: Status::Normal,
            history: Vec::new(),
            undo: Vec::with_capacity(256),
        };
        result.refresh();
        result
    }

    /// Replaces the whole position, starting a fresh line. On error the
    /// position is left as it was.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        let state = fen::parse(fen)?;

        self.state = state;
        self.history.clear();
        self.undo.clear();
        self.refresh();

        debug!("loaded position {fen}");
        Ok(())
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        fen::write(&self.state)
    }

    fn refresh(&mut self) {
        let safety = KingSafety::analyze(&self.state);

        self.legal.clear();
        legal::generate_legal(&mut self.legal, &self.state, &safety);

        self.status = Status::derive(safety.in_check(), !self.legal.is_empty());
    }

    /// Legal moves in generation order: pawns, knights, king, rooks,
    /// bishops, queens.
    #[must_use]
    pub fn legal_moves(&self) -> &[ChessMove] {
        &self.legal
    }

    pub(crate) fn legal_list(&self) -> &MoveList {
        &self.legal
    }

    #[must_use]
    pub fn is_legal(&self, mv: ChessMove) -> bool {
        self.legal.contains(&mv)
    }

    /// Plays a legal move, logging it in standard algebraic notation.
    pub fn apply(&mut self, mv: ChessMove) -> Result<(), ChessError> {
        if !self.is_legal(mv) {
            warn!("rejected illegal move {mv} in {}", self.to_fen());
            return Err(ChessError::IllegalMove(mv.to_string()));
        }

        let mut san = notation::describe(&self.state, &self.legal, mv);

        self.apply_unchecked(mv);

        san.push_str(notation::status_suffix(self.status));
        self.history.push(san);

        if let Some(outcome) = self.outcome() {
            debug!("game over after {mv}: {}", outcome.result_token());
            self.history.push(outcome.result_token().to_owned());
        }

        Ok(())
    }

    // Caller guarantees legality. Skips the notation log.
    pub(crate) fn apply_unchecked(&mut self, mv: ChessMove) {
        self.undo.push(Undo {
            state: self.state,
            legal: self.legal.clone(),
            status: self.status,
            history_len: self.history.len(),
        });

        self.state.make_move(mv);
        self.refresh();
    }

    /// Takes back the last move. Does nothing at the start of the line.
    pub fn unmake(&mut self) {
        if let Some(frame) = self.undo.pop() {
            self.state = frame.state;
            self.legal = frame.legal;
            self.status = frame.status;
            self.history.truncate(frame.history_len);
        }
    }

    #[must_use]
    pub fn can_unmake(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Resolves a long algebraic move string (`e2e4`, `a7a8q`, `e1g1`)
    /// against the current legal moves.
    pub fn find_move(&self, text: &str) -> Result<ChessMove, ChessError> {
        let malformed = || ChessError::from(InputError::Move(text.to_owned()));

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }

        let src: Square = text[0..2].parse()?;
        let dst: Square = text[2..4].parse()?;
        let promo = text[4..]
            .chars()
            .next()
            .map(|c| PromotionPiece::from_char(c).ok_or_else(malformed))
            .transpose()?;

        self.legal
            .iter()
            .copied()
            .find(|mv| mv.src() == src && mv.dst() == dst && mv.promotion_piece() == promo)
            .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))
    }

    /// [`find_move`](Self::find_move) followed by [`apply`](Self::apply).
    pub fn play(&mut self, text: &str) -> Result<ChessMove, ChessError> {
        let mv = self.find_move(text)?;
        self.apply(mv)?;
        Ok(mv)
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        self.status.in_check()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Checkmate => Some(match self.state.side_to_move {
                Color::White => Outcome::BlackWins,
                Color::Black => Outcome::WhiteWins,
            }),
            Status::Stalemate => Some(Outcome::Draw),
            Status::Normal | Status::Check => None,
        }
    }

    /// Notation log of the current line, including a result token once
    /// the game has ended.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn pieces(&self, c: Color, kind: PieceKind) -> Bitboard {
        self.state.pieces(c, kind)
    }

    #[must_use]
    pub fn color_occupancy(&self, c: Color) -> Bitboard {
        self.state.color_occupancy(c)
    }

    #[must_use]
    pub fn white_occupancy(&self) -> Bitboard {
        self.state.white
    }

    #[must_use]
    pub fn black_occupancy(&self) -> Bitboard {
        self.state.black
    }

    #[must_use]
    pub fn occupancy(&self) -> Bitboard {
        self.state.occupied
    }

    #[must_use]
    pub fn empty_squares(&self) -> Bitboard {
        self.state.empty
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.state.piece_at(sq)
    }

    #[must_use]
    pub fn king_square(&self, c: Color) -> Square {
        self.state.king_square(c)
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.state.castling
    }

    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.state.en_passant
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u16 {
        self.state.halfmove
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.state.fullmove
    }

    /// Compares the board and game state, ignoring the notation log and
    /// the undo stack.
    #[must_use]
    pub fn same_position(&self, other: &Position) -> bool {
        self.state == other.state
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            write!(f, "{}", 8 - row)?;

            for col in 0..8 {
                let sq = Square::from_visible(row * 8 + col);
                let c = self.state.piece_at(sq).map_or('.', Piece::to_char);
                write!(f, " {c}")?;
            }

            writeln!(f)?;
        }

        writeln!(f, "  a b c d e f g h")?;
        writeln!(f)?;

        writeln!(f, "side to move: {}", self.state.side_to_move)?;
        writeln!(f, "castling: {}", self.state.castling)?;
        match self.state.en_passant {
            Some(sq) => writeln!(f, "en passant: {sq}")?,
            None => writeln!(f, "en passant: -")?,
        }
        writeln!(f, "halfmove clock: {}", self.state.halfmove)?;
        write!(f, "fullmove number: {}", self.state.fullmove)
    }
}
