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

//! Move-path enumeration, used to check the generator against known
//! node counts.

use crate::chess_move::ChessMove;
use crate::position::Position;
use log::{debug, trace};
use std::time::Instant;

fn do_perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    // leaves are counted straight off the legal list
    if depth == 1 {
        return pos.legal_moves().len() as u64;
    }

    let moves = pos.legal_list().clone();
    let mut total = 0u64;

    for mv in moves {
        pos.apply_unchecked(mv);
        total += do_perft(pos, depth - 1);
        pos.unmake();
    }

    total
}

/// Number of leaf positions `depth` plies below `pos`. The position is
/// back in its original state when this returns.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    do_perft(pos, depth)
}

/// Per-root-move breakdown of [`perft`], in legal-move order. Empty when
/// `depth` is 0.
pub fn perft_divide(pos: &mut Position, depth: u32) -> Vec<(ChessMove, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let start = Instant::now();

    let moves = pos.legal_list().clone();
    let mut split = Vec::with_capacity(moves.len());

    for mv in moves {
        pos.apply_unchecked(mv);
        let nodes = do_perft(pos, depth - 1);
        pos.unmake();

        trace!("{mv}\t{nodes}");
        split.push((mv, nodes));
    }

    let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
    debug!(
        "perft divide depth {depth}: {total} nodes in {:.3}s",
        start.elapsed().as_secs_f64()
    );

    split
}
