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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mantis_chess::{perft, Position, STARTPOS_FEN};
use std::hint::black_box;

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: u32,
    expected_nodes: u64,
}

const CASES: [BenchCase; 3] = [
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        depth: 4,
        expected_nodes: 197_281,
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 3,
        expected_nodes: 97_862,
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 4,
        expected_nodes: 43_238,
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    for case in &CASES {
        let mut pos = Position::from_fen(case.fen).expect("bench fen parses");
        assert_eq!(perft(&mut pos, case.depth), case.expected_nodes, "{}", case.name);

        group.bench_with_input(BenchmarkId::new(case.name, case.depth), &case.depth, |b, &depth| {
            b.iter(|| perft(black_box(&mut pos), depth));
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let pos = Position::from_fen(CASES[1].fen).expect("bench fen parses");

    c.bench_function("refresh_after_move", |b| {
        let mut pos = pos.clone();
        let mv = pos.legal_moves()[0];
        b.iter(|| {
            pos.apply(black_box(mv)).expect("first legal move applies");
            pos.unmake();
        });
    });
}

criterion_group!(benches, bench_perft, bench_movegen);
criterion_main!(benches);
