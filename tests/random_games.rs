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

//! Seeded random playouts checking invariants that must hold in every
//! reachable position.

use mantis_chess::{Color, PieceKind, Position, Status};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const GAMES: u64 = 24;
const MAX_PLIES: usize = 160;

fn check_aggregates(pos: &Position) {
    let white = pos.white_occupancy();
    let black = pos.black_occupancy();

    assert!((white & black).is_empty());
    assert_eq!(pos.occupancy(), white | black);
    assert_eq!(pos.empty_squares(), !pos.occupancy());

    for (color, occupancy) in [(Color::White, white), (Color::Black, black)] {
        let union = PieceKind::ALL
            .into_iter()
            .fold(mantis_chess::Bitboard::EMPTY, |acc, kind| {
                acc | pos.pieces(color, kind)
            });
        assert_eq!(union, occupancy);
        assert_eq!(pos.pieces(color, PieceKind::King).popcount(), 1);
    }
}

fn check_status(pos: &Position) {
    let expected = Status::derive(pos.in_check(), !pos.legal_moves().is_empty());
    assert_eq!(pos.status(), expected);
}

#[test]
fn playouts_keep_invariants() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pos = Position::startpos();
        let mut line = Vec::new();

        for _ in 0..MAX_PLIES {
            check_aggregates(&pos);
            check_status(&pos);

            let reloaded = Position::from_fen(&pos.to_fen()).unwrap();
            assert!(reloaded.same_position(&pos), "{}", pos.to_fen());
            assert_eq!(reloaded.legal_moves(), pos.legal_moves());

            let Some(&mv) = pos.legal_moves().choose(&mut rng) else {
                break;
            };

            let before = pos.clone();
            pos.apply(mv).unwrap();
            pos.unmake();
            assert_eq!(pos, before, "undo of {mv} in {}", pos.to_fen());

            pos.apply(mv).unwrap();
            line.push(pos.clone());
        }

        // walking all the way back lands on the start position
        while pos.can_unmake() {
            pos.unmake();
            line.pop();
            if let Some(expected) = line.last() {
                assert_eq!(&pos, expected);
            }
        }
        assert_eq!(pos, Position::startpos());
    }
}

#[test]
fn castling_rights_never_come_back() {
    for seed in 100..100 + GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pos = Position::startpos();
        let mut rights = pos.castling_rights();

        for _ in 0..MAX_PLIES {
            let Some(&mv) = pos.legal_moves().choose(&mut rng) else {
                break;
            };
            pos.apply(mv).unwrap();

            let now = pos.castling_rights();
            assert!(rights.white_short || !now.white_short);
            assert!(rights.white_long || !now.white_long);
            assert!(rights.black_short || !now.black_short);
            assert!(rights.black_long || !now.black_long);
            rights = now;
        }
    }
}
