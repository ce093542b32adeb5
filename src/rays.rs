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

use crate::attacks::{ray, Direction};
use crate::bitboard::Bitboard;
use crate::core::Square;
use crate::macros::const_table;

const fn squares_between(src_idx: usize, dst_idx: usize) -> Bitboard {
    let src = Square::from_raw(src_idx as u8);
    let dst = Square::from_raw(dst_idx as u8);

    let mut i = 0;
    while i < Direction::ALL.len() {
        let dir = Direction::ALL[i];
        let outward = ray(dir, src);

        if outward.get(dst) {
            // everything past src up to and including dst, minus dst
            return outward.xor(ray(dir, dst)).without(dst);
        }

        i += 1;
    }

    Bitboard::EMPTY
}

const BETWEEN_RAYS: [[Bitboard; 64]; 64] =
    const_table!(|src_idx, 64| const_table!(|dst_idx, 64| squares_between(src_idx, dst_idx)));

/// Squares strictly between `a` and `b` when they share a rank, file or
/// diagonal; empty otherwise (including adjacent and identical squares).
#[must_use]
#[inline(always)]
pub const fn ray_between(a: Square, b: Square) -> Bitboard {
    BETWEEN_RAYS[a.idx()][b.idx()]
}

/// Whether `a` and `b` lie on a common rank or file.
#[must_use]
pub const fn orthogonally_aligned(a: Square, b: Square) -> bool {
    a.idx() != b.idx() && (a.rank() == b.rank() || a.file() == b.file())
}

/// Whether `a` and `b` lie on a common diagonal.
#[must_use]
pub const fn diagonally_aligned(a: Square, b: Square) -> bool {
    a.idx() != b.idx() && a.rank().abs_diff(b.rank()) == a.file().abs_diff(b.file())
}
