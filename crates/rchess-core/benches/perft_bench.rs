use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rchess_core::movegen::perft;
use rchess_core::position::{Position, KIWIPETE_FEN};

fn bench_perft_startpos(c: &mut Criterion) {
    rchess_core::init_tables_once();

    let mut group = c.benchmark_group("perft_startpos");
    for depth in [3u32, 4] {
        let mut pos = Position::startpos();
        let nodes = perft(&mut pos, depth);
        group.throughput(Throughput::Elements(nodes));
        group.bench_function(format!("depth_{depth}"), |b| {
            let mut pos = Position::startpos();
            b.iter(|| perft(&mut pos, depth));
        });
    }
    group.finish();
}

fn bench_perft_kiwipete(c: &mut Criterion) {
    rchess_core::init_tables_once();

    let mut group = c.benchmark_group("perft_kiwipete");
    let depth = 3u32;
    let mut pos = Position::from_fen(KIWIPETE_FEN).unwrap();
    let nodes = perft(&mut pos, depth);
    group.throughput(Throughput::Elements(nodes));
    group.bench_function(format!("depth_{depth}"), |b| {
        let mut pos = Position::from_fen(KIWIPETE_FEN).unwrap();
        b.iter(|| perft(&mut pos, depth));
    });
    group.finish();
}

criterion_group!(benches, bench_perft_startpos, bench_perft_kiwipete);
criterion_main!(benches);
