use criterion::{black_box, criterion_group, criterion_main, Criterion};
use oslab::crypto::{modmath, primes};

fn bench_mod_exp(c: &mut Criterion) {
    c.bench_function("mod_exp large prime", |b| {
        let m = u64::MAX - 58;
        b.iter(|| modmath::mod_exp(black_box(m - 2), black_box(m / 2), black_box(m)))
    });
}

fn bench_is_prime(c: &mut Criterion) {
    c.bench_function("is_prime 170503", |b| {
        b.iter(|| primes::is_prime(black_box(170_503)))
    });
}

criterion_group!(benches, bench_mod_exp, bench_is_prime);
criterion_main!(benches);
