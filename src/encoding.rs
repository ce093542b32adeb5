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

//! Fixed-shape numeric views of a position for external evaluators.
//!
//! Every plane is 8x8, indexed `[row][column]` by the visible square index
//! (row 0 is rank 8, column 0 is the a-file).

use crate::core::{Color, PieceKind, Square};
use crate::position::Position;

/// One plane per color and piece kind. Plane `color * 6 + kind`: white
/// pawn, knight, bishop, rook, queen, king, then the same for black.
pub type PiecePlanes = [[[f32; 8]; 8]; 12];

/// Side to move's pieces, empty squares, opponent's pieces.
pub type PerspectivePlanes = [[[f32; 8]; 8]; 3];

fn mark(plane: &mut [[f32; 8]; 8], sq: Square) {
    let visible = sq.visible();
    plane[visible / 8][visible % 8] = 1.0;
}

impl Position {
    #[must_use]
    pub fn to_numeric_encoding(&self) -> PiecePlanes {
        let mut planes = [[[0.0; 8]; 8]; 12];

        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let plane = &mut planes[color.idx() * 6 + kind.idx()];
                for sq in self.pieces(color, kind) {
                    mark(plane, sq);
                }
            }
        }

        planes
    }

    #[must_use]
    pub fn perspective_planes(&self) -> PerspectivePlanes {
        let mut planes = [[[0.0; 8]; 8]; 3];

        let stm = self.side_to_move();

        for sq in self.color_occupancy(stm) {
            mark(&mut planes[0], sq);
        }

        for sq in self.empty_squares() {
            mark(&mut planes[1], sq);
        }

        for sq in self.color_occupancy(stm.flip()) {
            mark(&mut planes[2], sq);
        }

        planes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(plane: &[[f32; 8]; 8]) -> usize {
        plane.iter().flatten().filter(|v| **v > 0.5).count()
    }

    #[test]
    fn piece_planes_of_startpos() {
        let planes = Position::startpos().to_numeric_encoding();

        // white pawns on rank 2, i.e. row 6
        assert_eq!(planes[0][6], [1.0; 8]);
        assert_eq!(count(&planes[0]), 8);

        // white king on e1: row 7, column 4
        assert_eq!(planes[5][7][4], 1.0);
        assert_eq!(count(&planes[5]), 1);

        // black queen on d8: row 0, column 3
        assert_eq!(planes[6 + 4][0][3], 1.0);

        let total: usize = planes.iter().map(count).sum();
        assert_eq!(total, 32);
    }

    #[test]
    fn perspective_follows_side_to_move() {
        let mut pos = Position::startpos();
        pos.play("e2e4").unwrap();

        let planes = pos.perspective_planes();

        // black to move, so black's pieces come first
        assert_eq!(planes[0][0], [1.0; 8]);
        assert_eq!(planes[2][4][4], 1.0);
        assert_eq!(planes[1][6][4], 1.0);
        assert_eq!(count(&planes[1]), 32);
    }
}
