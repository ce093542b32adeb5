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

use crate::core::SquareStrError;
use crate::fen::FenError;

/// Text handed to the engine that could not be understood.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("malformed fen: {0}")]
    Fen(#[from] FenError),
    #[error("malformed square: {0}")]
    Square(#[from] SquareStrError),
    #[error("malformed move '{0}'")]
    Move(String),
}

/// Errors surfaced to callers of [`Position`](crate::Position). Both are
/// fatal to the request that caused them and leave the position untouched.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ChessError {
    #[error(transparent)]
    MalformedInput(#[from] InputError),
    #[error("illegal move {0}")]
    IllegalMove(String),
}

impl From<FenError> for ChessError {
    fn from(err: FenError) -> Self {
        Self::MalformedInput(InputError::Fen(err))
    }
}

impl From<SquareStrError> for ChessError {
    fn from(err: SquareStrError) -> Self {
        Self::MalformedInput(InputError::Square(err))
    }
}
