use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use secp256k1_arith::{ProjectivePoint, Scalar, scalar_mul, scalar_mul_basepoint};

fn bench_ecmult(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecmult");
    let mut rng = rand::thread_rng();

    group.bench_function("scalar_mul_basepoint", |b| {
        b.iter_batched(
            || Scalar::random(&mut rng),
            |k| scalar_mul_basepoint(&k),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("scalar_mul", |b| {
        b.iter_batched(
            || (Scalar::random(&mut rng), ProjectivePoint::random(&mut rng)),
            |(k, p)| scalar_mul(&k, &p),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_ecmult);
criterion_main!(benches);
