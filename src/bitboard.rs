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

use crate::core::{Color, Square};
use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A set of squares, one bit per square (bit 0 = a1, bit 63 = h8).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Bitboard {
    value: u64,
}

#[allow(unused, clippy::unreadable_literal)]
impl Bitboard {
    pub const RANK_1: Self = Self::from_raw(0x00000000000000ff);
    pub const RANK_2: Self = Self::from_raw(0x000000000000ff00);
    pub const RANK_3: Self = Self::from_raw(0x0000000000ff0000);
    pub const RANK_4: Self = Self::from_raw(0x00000000ff000000);
    pub const RANK_5: Self = Self::from_raw(0x000000ff00000000);
    pub const RANK_6: Self = Self::from_raw(0x0000ff0000000000);
    pub const RANK_7: Self = Self::from_raw(0x00ff000000000000);
    pub const RANK_8: Self = Self::from_raw(0xff00000000000000);

    pub const FILE_A: Self = Self::from_raw(0x0101010101010101);
    pub const FILE_H: Self = Self::from_raw(0x8080808080808080);

    pub const ALL: Self = Self::from_raw(!0);
    pub const EMPTY: Self = Self::from_raw(0);

    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.value
    }

    #[must_use]
    pub const fn rank(rank: u32) -> Self {
        debug_assert!(rank < 8);
        Self::RANK_1.bit_shl(rank * 8)
    }

    #[must_use]
    pub const fn file(file: u32) -> Self {
        debug_assert!(file < 8);
        Self::FILE_A.bit_shl(file)
    }

    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.value.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.value == 0
    }

    #[must_use]
    pub const fn get(self, sq: Square) -> bool {
        !self.and(sq.bit()).is_empty()
    }

    pub fn set(&mut self, sq: Square) {
        *self |= sq.bit();
    }

    pub fn clear(&mut self, sq: Square) {
        *self &= !sq.bit();
    }

    pub fn toggle(&mut self, sq: Square) {
        *self ^= sq.bit();
    }

    #[must_use]
    pub const fn with(self, sq: Square) -> Self {
        self.or(sq.bit())
    }

    #[must_use]
    pub const fn without(self, sq: Square) -> Self {
        self.and(sq.bit().inverse())
    }

    #[must_use]
    pub const fn and(self, rhs: Self) -> Self {
        Self::from_raw(self.value & rhs.value)
    }

    #[must_use]
    pub const fn or(self, rhs: Self) -> Self {
        Self::from_raw(self.value | rhs.value)
    }

    #[must_use]
    pub const fn xor(self, rhs: Self) -> Self {
        Self::from_raw(self.value ^ rhs.value)
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        Self::from_raw(!self.value)
    }

    #[must_use]
    pub const fn bit_shl(self, rhs: u32) -> Self {
        Self::from_raw(self.value << rhs)
    }

    #[must_use]
    pub const fn bit_shr(self, rhs: u32) -> Self {
        Self::from_raw(self.value >> rhs)
    }

    // Shifts are named from white's point of view. Sideways and diagonal
    // shifts mask off the file a bit wraps onto.

    #[must_use]
    pub const fn shift_up(self) -> Self {
        self.bit_shl(8)
    }

    #[must_use]
    pub const fn shift_down(self) -> Self {
        self.bit_shr(8)
    }

    #[must_use]
    pub const fn shift_left(self) -> Self {
        self.bit_shr(1).and(Self::FILE_H.inverse())
    }

    #[must_use]
    pub const fn shift_right(self) -> Self {
        self.bit_shl(1).and(Self::FILE_A.inverse())
    }

    #[must_use]
    pub const fn shift_up_left(self) -> Self {
        self.bit_shl(7).and(Self::FILE_H.inverse())
    }

    #[must_use]
    pub const fn shift_up_right(self) -> Self {
        self.bit_shl(9).and(Self::FILE_A.inverse())
    }

    #[must_use]
    pub const fn shift_down_left(self) -> Self {
        self.bit_shr(9).and(Self::FILE_H.inverse())
    }

    #[must_use]
    pub const fn shift_down_right(self) -> Self {
        self.bit_shr(7).and(Self::FILE_A.inverse())
    }

    /// One rank towards the opponent of `c`.
    #[must_use]
    pub const fn shift_up_relative(self, c: Color) -> Self {
        match c {
            Color::White => self.shift_up(),
            Color::Black => self.shift_down(),
        }
    }

    /// Towards the opponent and towards the a-file.
    #[must_use]
    pub const fn shift_up_left_relative(self, c: Color) -> Self {
        match c {
            Color::White => self.shift_up_left(),
            Color::Black => self.shift_down_left(),
        }
    }

    /// Towards the opponent and towards the h-file.
    #[must_use]
    pub const fn shift_up_right_relative(self, c: Color) -> Self {
        match c {
            Color::White => self.shift_up_right(),
            Color::Black => self.shift_down_right(),
        }
    }

    #[must_use]
    pub const fn lowest_square(self) -> Square {
        debug_assert!(!self.is_empty());
        Square::from_raw(self.value.trailing_zeros() as u8)
    }

    #[must_use]
    pub const fn highest_square(self) -> Square {
        debug_assert!(!self.is_empty());
        Square::from_raw(self.value.leading_zeros() as u8 ^ 0x3f)
    }

    pub fn pop_lowest_square(&mut self) -> Square {
        let square = self.lowest_square();
        self.value &= self.value - 1;
        square
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Biterator;

    fn into_iter(self) -> Self::IntoIter {
        Biterator { board: self }
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Bitboard::EMPTY, |board, sq| board.with(sq))
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.value &= rhs.value;
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.value |= rhs.value;
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.xor(rhs)
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.value ^= rhs.value;
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.inverse()
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0u32..8).rev() {
            for file in 0u32..8 {
                if file > 0 {
                    write!(f, " ")?;
                }

                let c = if self.get(Square::from_coords(rank, file)) {
                    '1'
                } else {
                    '.'
                };
                write!(f, "{c}")?;
            }

            if rank > 0 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

pub struct Biterator {
    board: Bitboard,
}

impl Iterator for Biterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.board.is_empty() {
            None
        } else {
            Some(self.board.pop_lowest_square())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.board.popcount() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Biterator {}
