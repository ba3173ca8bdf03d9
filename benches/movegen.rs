use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use lib::chess::{moves, Board, Color};
use lib::game::{Mode, Session};
use rand::{rngs::StdRng, SeedableRng};

fn bench(c: &mut Criterion) {
    let placements = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R",
        "4k3/8/8/3QR3/3BN3/8/8/4K3",
    ];

    for fen in placements {
        let board: Board = fen.parse().unwrap();
        let count = moves(&board, Color::White).count();
        c.benchmark_group("moves")
            .throughput(Throughput::Elements(count as u64))
            .bench_function(fen, |b| b.iter(|| moves(&board, Color::White).count()));
    }

    c.benchmark_group("session").bench_function("reply", |b| {
        b.iter_batched_ref(
            || Session::new(Mode::HumanVsAutomated, StdRng::seed_from_u64(0)),
            |s| {
                s.select("e2".parse().unwrap()).ok();
                s.confirm("e4".parse().unwrap()).ok()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
