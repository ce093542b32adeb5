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

//! Precomputed attack patterns and the blocker-aware slider query.

use crate::bitboard::Bitboard;
use crate::core::{Color, Square};
use crate::macros::const_table;

/// Sliding direction. North is towards rank 8, east towards the h-file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East,
    South,
    West,
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
    ];

    pub const ROOK: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];
    pub const BISHOP: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
    ];

    #[must_use]
    pub const fn idx(self) -> usize {
        self as usize
    }

    /// Whether squares along this direction have increasing bit indices.
    /// Decides which end of a blocker set is nearest to the source.
    #[must_use]
    pub const fn toward_higher_index(self) -> bool {
        matches!(self, Self::North | Self::East | Self::NorthWest | Self::NorthEast)
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
            Self::NorthEast => Self::SouthWest,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
        }
    }
}

const DIAG: u64 = 0x8040_2010_0804_0201;

// diagonal parallel to a1-h8 with file - rank == i - 7
const fn diag_mask(i: u32) -> u64 {
    if i > 7 {
        DIAG >> (8 * (i - 7))
    } else {
        DIAG << (8 * (7 - i))
    }
}

const fn squares_above(sq: usize) -> u64 {
    if sq == 63 {
        0
    } else {
        !0u64 << (sq + 1)
    }
}

const fn squares_below(sq: usize) -> u64 {
    (1u64 << sq) - 1
}

const fn empty_board_ray(dir: Direction, sq_idx: usize) -> Bitboard {
    let sq = Square::from_raw(sq_idx as u8);

    let rank = Bitboard::rank(sq.rank()).raw();
    let file = Bitboard::file(sq.file()).raw();
    let diag = diag_mask(7 + sq.file() - sq.rank());
    let anti_diag = diag_mask(sq.rank() + sq.file()).swap_bytes();

    let line = match dir {
        Direction::North | Direction::South => file,
        Direction::East | Direction::West => rank,
        Direction::NorthEast | Direction::SouthWest => diag,
        Direction::NorthWest | Direction::SouthEast => anti_diag,
    };

    let side = if dir.toward_higher_index() {
        squares_above(sq_idx)
    } else {
        squares_below(sq_idx)
    };

    Bitboard::from_raw(line & side)
}

const RAYS: [[Bitboard; 64]; 8] =
    const_table!(|dir, 8| const_table!(|sq, 64| empty_board_ray(Direction::ALL[dir], sq)));

const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    const_table!(|sq_idx, 64| {
        // white
        let bit = Square::from_raw(sq_idx as u8).bit();
        bit.shift_up_left().or(bit.shift_up_right())
    }),
    const_table!(|sq_idx, 64| {
        // black
        let bit = Square::from_raw(sq_idx as u8).bit();
        bit.shift_down_left().or(bit.shift_down_right())
    }),
];

const KNIGHT_ATTACKS: [Bitboard; 64] = const_table!(|sq_idx, 64| {
    let bit = Square::from_raw(sq_idx as u8).bit();

    let mut attacks = Bitboard::EMPTY;

    attacks = attacks.or(bit.shift_up().shift_up_left());
    attacks = attacks.or(bit.shift_up().shift_up_right());
    attacks = attacks.or(bit.shift_left().shift_up_left());
    attacks = attacks.or(bit.shift_left().shift_down_left());
    attacks = attacks.or(bit.shift_right().shift_up_right());
    attacks = attacks.or(bit.shift_right().shift_down_right());
    attacks = attacks.or(bit.shift_down().shift_down_left());
    attacks = attacks.or(bit.shift_down().shift_down_right());

    attacks
});

const KING_ATTACKS: [Bitboard; 64] = const_table!(|sq_idx, 64| {
    let bit = Square::from_raw(sq_idx as u8).bit();

    let orthogonal = bit
        .shift_up()
        .or(bit.shift_down())
        .or(bit.shift_left())
        .or(bit.shift_right());
    let diagonal = bit
        .shift_up_left()
        .or(bit.shift_up_right())
        .or(bit.shift_down_left())
        .or(bit.shift_down_right());

    orthogonal.or(diagonal)
});

/// Every square along `dir` from `sq` on an empty board, `sq` excluded.
#[must_use]
#[inline(always)]
pub const fn ray(dir: Direction, sq: Square) -> Bitboard {
    RAYS[dir.idx()][sq.idx()]
}

/// Squares a slider on `sq` reaches along `dir` given `occupancy`. The
/// slide stops on, and includes, the first occupied square whatever its
/// color; callers strip friendly pieces.
#[must_use]
#[inline(always)]
pub const fn ray_attacks(dir: Direction, sq: Square, occupancy: Bitboard) -> Bitboard {
    let full = ray(dir, sq);
    let blockers = full.and(occupancy);

    if blockers.is_empty() {
        return full;
    }

    let nearest = if dir.toward_higher_index() {
        blockers.lowest_square()
    } else {
        blockers.highest_square()
    };

    full.xor(ray(dir, nearest))
}

const fn slider_attacks(dirs: &[Direction; 4], sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let mut i = 0;

    while i < dirs.len() {
        attacks = attacks.or(ray_attacks(dirs[i], sq, occupancy));
        i += 1;
    }

    attacks
}

#[must_use]
#[inline(always)]
pub const fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(&Direction::ROOK, sq, occupancy)
}

#[must_use]
#[inline(always)]
pub const fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(&Direction::BISHOP, sq, occupancy)
}

#[must_use]
#[inline(always)]
pub const fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(sq, occupancy).or(bishop_attacks(sq, occupancy))
}

/// Squares a pawn of color `c` standing on `sq` attacks.
#[must_use]
#[inline(always)]
pub const fn pawn_attacks(c: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[c.idx()][sq.idx()]
}

#[must_use]
#[inline(always)]
pub const fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.idx()]
}

#[must_use]
#[inline(always)]
pub const fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.idx()]
}
