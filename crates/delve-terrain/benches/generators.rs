use criterion::{Criterion, black_box, criterion_group, criterion_main};
use delve_terrain::*;

const WIDTH: i32 = 160;
const HEIGHT: i32 = 90;

fn bench_family(c: &mut Criterion, kind: AlgorithmKind) {
    let request = GenerationRequest {
        width: WIDTH,
        height: HEIGHT,
        seed: Seed(417.0),
        algorithm: kind.default_algorithm(),
    };
    c.bench_function(kind.name(), |bencher| {
        bencher.iter(|| black_box(generate(black_box(&request))))
    });
}

fn bench_heightmaps(c: &mut Criterion) {
    bench_family(c, AlgorithmKind::Noise);
    bench_family(c, AlgorithmKind::SmoothedNoise);
    bench_family(c, AlgorithmKind::RandomWalk);
    bench_family(c, AlgorithmKind::SmoothedRandomWalk);
}

fn bench_caves(c: &mut Criterion) {
    bench_family(c, AlgorithmKind::NoiseCave);
    bench_family(c, AlgorithmKind::RandomWalkCave);
    bench_family(c, AlgorithmKind::Tunnel);
}

fn bench_automata(c: &mut Criterion) {
    bench_family(c, AlgorithmKind::RandomFill);
    bench_family(c, AlgorithmKind::MooreAutomaton);
    bench_family(c, AlgorithmKind::VonNeumannAutomaton);
}

fn bench_smooth_pass(c: &mut Criterion) {
    let start = random_fill(WIDTH, HEIGHT, Seed(3.0), &FillParams::default()).unwrap();
    let params = AutomatonParams {
        passes: 1,
        ..Default::default()
    };
    c.bench_function("smooth_single_pass", |bencher| {
        bencher.iter(|| {
            let mut grid = start.clone();
            smooth(&mut grid, &params).unwrap();
            black_box(grid)
        })
    });
}

criterion_group!(
    benches,
    bench_heightmaps,
    bench_caves,
    bench_automata,
    bench_smooth_pass,
);
criterion_main!(benches);
