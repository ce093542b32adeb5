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

//! FEN loading through the public API.

use mantis_chess::{ChessError, Color, FenError, InputError, Position, Square, STARTPOS_FEN};

#[test]
fn load_replaces_the_line() {
    let mut pos = Position::startpos();
    pos.play("e2e4").unwrap();
    pos.play("e7e5").unwrap();

    pos.load_fen("4k3/8/8/8/8/8/8/4K2R b K - 3 40").unwrap();

    assert!(pos.history().is_empty());
    assert!(!pos.can_unmake());
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.halfmove_clock(), 3);
    assert_eq!(pos.fullmove_number(), 40);
    assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/4K2R b K - 3 40");
}

#[test]
fn failed_load_changes_nothing() {
    let mut pos = Position::startpos();
    pos.play("d2d4").unwrap();
    let before = pos.clone();

    let err = pos.load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1");
    assert_eq!(
        err,
        Err(ChessError::MalformedInput(InputError::Fen(
            FenError::NotEnoughRanks
        )))
    );
    assert_eq!(pos, before);

    assert!(pos.load_fen("").is_err());
    assert!(pos.load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
    assert_eq!(pos, before);
}

#[test]
fn error_text_names_the_problem() {
    let err = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNZ w KQkq - 0 1")
        .unwrap_err();
    assert_eq!(err.to_string(), "malformed fen: invalid character 'Z'");
}

#[test]
fn exports_after_moves() {
    let mut pos = Position::from_fen(STARTPOS_FEN).unwrap();

    pos.play("e2e4").unwrap();
    assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

    pos.play("c7c5").unwrap();
    pos.play("g1f3").unwrap();
    assert_eq!(pos.to_fen(), "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2");
}

#[test]
fn round_trip_keeps_the_position() {
    for fen in [
        STARTPOS_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        let reloaded = Position::from_fen(&pos.to_fen()).unwrap();

        assert_eq!(pos.to_fen(), fen);
        assert!(reloaded.same_position(&pos));
        assert_eq!(reloaded.legal_moves(), pos.legal_moves());
    }
}

#[test]
fn en_passant_square_is_read() {
    let pos = Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();

    assert_eq!(pos.en_passant(), Some(Square::E3));
    assert!(pos.find_move("d4e3").is_ok());
}
