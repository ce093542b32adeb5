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

use crate::bitboard::Bitboard;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Maps a bitboard square index (bit 0 = a1, rank-major from the white
/// side) to the row-major array index used by board rendering and the
/// numeric planes (index 0 = a8, index 63 = h1).
#[must_use]
pub const fn to_visible(internal: usize) -> usize {
    debug_assert!(internal < 64);
    internal ^ 56
}

/// Inverse of [`to_visible`].
#[must_use]
pub const fn to_internal(visible: usize) -> usize {
    debug_assert!(visible < 64);
    visible ^ 56
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
pub struct Square(u8);

#[allow(unused)]
impl Square {
    pub const A1: Self = Self(0);
    pub const B1: Self = Self(1);
    pub const C1: Self = Self(2);
    pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);
    pub const F1: Self = Self(5);
    pub const G1: Self = Self(6);
    pub const H1: Self = Self(7);
    pub const A2: Self = Self(8);
    pub const B2: Self = Self(9);
    pub const C2: Self = Self(10);
    pub const D2: Self = Self(11);
    pub const E2: Self = Self(12);
    pub const F2: Self = Self(13);
    pub const G2: Self = Self(14);
    pub const H2: Self = Self(15);
    pub const A3: Self = Self(16);
    pub const B3: Self = Self(17);
    pub const C3: Self = Self(18);
    pub const D3: Self = Self(19);
    pub const E3: Self = Self(20);
    pub const F3: Self = Self(21);
    pub const G3: Self = Self(22);
    pub const H3: Self = Self(23);
    pub const A4: Self = Self(24);
    pub const B4: Self = Self(25);
    pub const C4: Self = Self(26);
    pub const D4: Self = Self(27);
    pub const E4: Self = Self(28);
    pub const F4: Self = Self(29);
    pub const G4: Self = Self(30);
    pub const H4: Self = Self(31);
    pub const A5: Self = Self(32);
    pub const B5: Self = Self(33);
    pub const C5: Self = Self(34);
    pub const D5: Self = Self(35);
    pub const E5: Self = Self(36);
    pub const F5: Self = Self(37);
    pub const G5: Self = Self(38);
    pub const H5: Self = Self(39);
    pub const A6: Self = Self(40);
    pub const B6: Self = Self(41);
    pub const C6: Self = Self(42);
    pub const D6: Self = Self(43);
    pub const E6: Self = Self(44);
    pub const F6: Self = Self(45);
    pub const G6: Self = Self(46);
    pub const H6: Self = Self(47);
    pub const A7: Self = Self(48);
    pub const B7: Self = Self(49);
    pub const C7: Self = Self(50);
    pub const D7: Self = Self(51);
    pub const E7: Self = Self(52);
    pub const F7: Self = Self(53);
    pub const G7: Self = Self(54);
    pub const H7: Self = Self(55);
    pub const A8: Self = Self(56);
    pub const B8: Self = Self(57);
    pub const C8: Self = Self(58);
    pub const D8: Self = Self(59);
    pub const E8: Self = Self(60);
    pub const F8: Self = Self(61);
    pub const G8: Self = Self(62);
    pub const H8: Self = Self(63);

    pub const COUNT: usize = 64;

    #[must_use]
    pub const fn from_raw(value: u8) -> Self {
        debug_assert!(value < 64);
        Self(value)
    }

    #[must_use]
    pub const fn from_coords(rank: u32, file: u32) -> Self {
        debug_assert!(rank < 8);
        debug_assert!(file < 8);
        Self((rank * 8 + file) as u8)
    }

    /// Square at a row-major visible index (see [`to_visible`]).
    #[must_use]
    pub const fn from_visible(visible: usize) -> Self {
        Self(to_internal(visible) as u8)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn visible(self) -> usize {
        to_visible(self.idx())
    }

    #[must_use]
    pub const fn bit(self) -> Bitboard {
        Bitboard::from_raw(1 << self.idx())
    }

    #[must_use]
    pub const fn rank(self) -> u32 {
        self.0 as u32 / 8
    }

    #[must_use]
    pub const fn file(self) -> u32 {
        self.0 as u32 % 8
    }

    /// Moves the square by a raw index delta. The caller guarantees the
    /// result stays on the board.
    #[must_use]
    pub const fn offset(self, delta: i32) -> Self {
        let target = self.0 as i32 + delta;
        debug_assert!(target >= 0 && target < 64);
        Self(target as u8)
    }

    /// Mirrors the square across the horizontal centre line (a1 <-> a8).
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Self(self.0 ^ 0b111_000)
    }

    #[must_use]
    pub const fn file_char(self) -> char {
        (b'a' + self.file() as u8) as char
    }

    #[must_use]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank() as u8) as char
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SquareStrError {
    #[error("wrong size")]
    WrongSize,
    #[error("invalid file")]
    InvalidFile,
    #[error("invalid rank")]
    InvalidRank,
    #[error("square index {0} out of range")]
    OutOfRange(u8),
}

impl TryFrom<u8> for Square {
    type Error = SquareStrError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 64 {
            Ok(Self(value))
        } else {
            Err(SquareStrError::OutOfRange(value))
        }
    }
}

impl FromStr for Square {
    type Err = SquareStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file, rank] = s.as_bytes() else {
            return Err(SquareStrError::WrongSize);
        };

        if !(b'a'..=b'h').contains(&file) {
            return Err(SquareStrError::InvalidFile);
        } else if !(b'1'..=b'8').contains(&rank) {
            return Err(SquareStrError::InvalidRank);
        }

        Ok(Self::from_coords(u32::from(rank - b'1'), u32::from(file - b'a')))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Self; 2] = [Self::White, Self::Black];

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[must_use]
    pub const fn idx(self) -> usize {
        self as usize
    }

    /// Rank the pieces of this color start on (0-based, from white's side).
    #[must_use]
    pub const fn back_rank(self) -> u32 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    /// Index delta of a single pawn push.
    #[must_use]
    pub const fn forward(self) -> i32 {
        match self {
            Self::White => 8,
            Self::Black => -8,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    /// Lowercase letter, as used in FEN for black pieces.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    #[must_use]
    pub const fn idx(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn colored(self, color: Color) -> Piece {
        Piece { color, kind: self }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// Parses a FEN piece letter: uppercase is white, lowercase is black.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Some(kind.colored(color))
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_flip() {
        assert_eq!(Color::Black.flip(), Color::White);
        assert_eq!(Color::White.flip(), Color::Black);

        assert_eq!(Color::Black.flip().flip(), Color::Black);
        assert_eq!(Color::White.flip().flip(), Color::White);
    }

    #[test]
    fn visible_index_round_trips() {
        for internal in 0..64 {
            assert_eq!(to_internal(to_visible(internal)), internal);
        }

        assert_eq!(to_visible(Square::A8.idx()), 0);
        assert_eq!(to_visible(Square::H8.idx()), 7);
        assert_eq!(to_visible(Square::A1.idx()), 56);
        assert_eq!(to_visible(Square::H1.idx()), 63);
        assert_eq!(Square::from_visible(12), Square::E7);
    }

    #[test]
    fn square_names() {
        assert_eq!(Square::E4.to_string(), "e4");
        assert_eq!("h8".parse::<Square>(), Ok(Square::H8));
        assert_eq!("a1".parse::<Square>(), Ok(Square::A1));

        assert_eq!("e".parse::<Square>(), Err(SquareStrError::WrongSize));
        assert_eq!("e44".parse::<Square>(), Err(SquareStrError::WrongSize));
        assert_eq!("i4".parse::<Square>(), Err(SquareStrError::InvalidFile));
        assert_eq!("e9".parse::<Square>(), Err(SquareStrError::InvalidRank));

        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>(), Ok(sq));
        }
    }

    #[test]
    fn square_from_index() {
        assert_eq!(Square::try_from(28u8), Ok(Square::E4));
        assert_eq!(Square::try_from(63u8), Ok(Square::H8));
        assert_eq!(Square::try_from(64u8), Err(SquareStrError::OutOfRange(64)));
        assert_eq!(Square::try_from(200u8), Err(SquareStrError::OutOfRange(200)));
    }

    #[test]
    fn square_geometry() {
        assert_eq!(Square::G6.rank(), 5);
        assert_eq!(Square::G6.file(), 6);
        assert_eq!(Square::E2.offset(16), Square::E4);
        assert_eq!(Square::C3.flip_vertical(), Square::C6);
    }

    #[test]
    fn piece_chars() {
        for kind in PieceKind::ALL {
            for color in Color::ALL {
                let piece = kind.colored(color);
                assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            }
        }

        assert_eq!(Piece::from_char('N'), Some(PieceKind::Knight.colored(Color::White)));
        assert_eq!(Piece::from_char('x'), None);
    }
}
