//! Replay engine benchmarks for observer_core.
//!
//! Run with: `cargo bench -p observer_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use observer_core::prelude::*;
use std::fmt::Write;

/// Build a synthetic 32x32 log with 100 rounds of 40 moving units.
fn synthetic_log() -> String {
    const SIZE: u32 = 32;
    const ROUNDS: u32 = 100;
    const UNITS: u32 = 40;

    let mut log = String::new();
    writeln!(log, "-1").unwrap();
    writeln!(log, "{SIZE} {SIZE}").unwrap();
    for i in 0..SIZE * SIZE {
        write!(log, "{} ", i % 3).unwrap();
    }
    log.push('\n');
    for i in 0..SIZE * SIZE {
        write!(log, "{} ", i % 5).unwrap();
    }
    log.push('\n');
    // every cell sees its own row
    for row in 0..SIZE {
        for _col in 0..SIZE {
            write!(log, "{SIZE} ").unwrap();
            for c in 0..SIZE {
                write!(log, "{row} {c} ").unwrap();
            }
            log.push('\n');
        }
    }
    for round in 0..ROUNDS {
        let is_final = u32::from(round + 1 == ROUNDS);
        writeln!(log, "{round} 0 {is_final} {UNITS}").unwrap();
        for id in 0..UNITS {
            let row = (id + round) % SIZE;
            let col = id % SIZE;
            let owner = id % 2;
            let kind = id % 2;
            writeln!(log, "{row} {col} {id} {owner} {kind} 100 100").unwrap();
        }
    }
    log
}

pub fn engine_benchmark(c: &mut Criterion) {
    let log = synthetic_log();
    let record = parse_match_record(&log).expect("synthetic log must parse");

    c.bench_function("parse_match_record", |b| {
        b.iter(|| parse_match_record(black_box(&log)).unwrap())
    });

    c.bench_function("compute_fog_side", |b| {
        b.iter(|| {
            compute_fog(
                Perspective::Side(Side::Defender),
                black_box(&record.visibility),
                black_box(&record.rounds[0].units),
            )
        })
    });

    c.bench_function("interpolate_round", |b| {
        let (current, next) = record.round_pair(0);
        b.iter(|| interpolate(black_box(current), black_box(next), black_box(0.5)))
    });
}

criterion_group!(benches, engine_benchmark);
criterion_main!(benches);
