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

use crate::core::{PieceKind, Square};
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MoveFlag {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// Piece a pawn promotes to. The discriminant is the 2-bit selector
/// stored in a [`ChessMove`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PromotionPiece {
    Rook = 0,
    Knight = 1,
    Bishop = 2,
    Queen = 3,
}

impl PromotionPiece {
    /// Generation order for promotion fan-out.
    pub const ALL: [Self; 4] = [Self::Rook, Self::Knight, Self::Bishop, Self::Queen];

    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            Self::Rook => PieceKind::Rook,
            Self::Knight => PieceKind::Knight,
            Self::Bishop => PieceKind::Bishop,
            Self::Queen => PieceKind::Queen,
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(Self::Rook),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'q' => Some(Self::Queen),
            _ => None,
        }
    }

    const fn from_bits(bits: u16) -> Self {
        match bits & 0x3 {
            0 => Self::Rook,
            1 => Self::Knight,
            2 => Self::Bishop,
            _ => Self::Queen,
        }
    }
}

/// A move packed into 16 bits:
///
/// | bits    | field                                          |
/// |---------|------------------------------------------------|
/// | 10..16  | origin square                                  |
/// | 4..10   | target square                                  |
/// | 2..4    | promotion piece (rook, knight, bishop, queen)  |
/// | 0..2    | flag (normal, promotion, en passant, castling) |
///
/// Castling is stored as the king's own move, e.g. e1g1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChessMove {
    value: u16,
}

impl ChessMove {
    const SRC_SHIFT: u32 = 10;
    const DST_SHIFT: u32 = 4;
    const PROMO_SHIFT: u32 = 2;

    const SQUARE_MASK: u16 = 0x3f;
    const FLAG_MASK: u16 = 0x3;

    const fn pack(src: Square, dst: Square, promo: u16, flag: MoveFlag) -> Self {
        Self {
            value: ((src.raw() as u16) << Self::SRC_SHIFT)
                | ((dst.raw() as u16) << Self::DST_SHIFT)
                | (promo << Self::PROMO_SHIFT)
                | flag as u16,
        }
    }

    #[must_use]
    pub const fn normal(src: Square, dst: Square) -> Self {
        Self::pack(src, dst, 0, MoveFlag::Normal)
    }

    #[must_use]
    pub const fn promotion(src: Square, dst: Square, promo: PromotionPiece) -> Self {
        Self::pack(src, dst, promo as u16, MoveFlag::Promotion)
    }

    #[must_use]
    pub const fn en_passant(src: Square, dst: Square) -> Self {
        Self::pack(src, dst, 0, MoveFlag::EnPassant)
    }

    #[must_use]
    pub const fn castling(king_src: Square, king_dst: Square) -> Self {
        Self::pack(king_src, king_dst, 0, MoveFlag::Castling)
    }

    /// Every 16-bit word decodes to some move; whether it is legal is a
    /// question for the position.
    #[must_use]
    pub const fn from_raw(value: u16) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.value
    }

    #[must_use]
    pub const fn src(self) -> Square {
        Square::from_raw(((self.value >> Self::SRC_SHIFT) & Self::SQUARE_MASK) as u8)
    }

    #[must_use]
    pub const fn dst(self) -> Square {
        Square::from_raw(((self.value >> Self::DST_SHIFT) & Self::SQUARE_MASK) as u8)
    }

    #[must_use]
    pub const fn flag(self) -> MoveFlag {
        match self.value & Self::FLAG_MASK {
            0 => MoveFlag::Normal,
            1 => MoveFlag::Promotion,
            2 => MoveFlag::EnPassant,
            _ => MoveFlag::Castling,
        }
    }

    #[must_use]
    pub const fn promotion_piece(self) -> Option<PromotionPiece> {
        match self.flag() {
            MoveFlag::Promotion => Some(PromotionPiece::from_bits(self.value >> Self::PROMO_SHIFT)),
            _ => None,
        }
    }
}

/// Long algebraic form, e.g. `e2e4`, `e7e8q`, `e1g1`.
impl Display for ChessMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.src(), self.dst())?;

        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.kind().to_char())?;
        }

        Ok(())
    }
}
