use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mixed_radix_p3::{MixedRadixEvaluationDomain, Radix2EvaluationDomain, SmallSubgroupConfig};
use p3_baby_bear::BabyBear;
use p3_field::PrimeCharacteristicRing;
use rand::{Rng, rng};

type F = BabyBear;

fn generate_random_coeffs(size: usize) -> Vec<F> {
    let mut rng = rng();
    (0..size).map(|_| F::from_u32(rng.random())).collect()
}

fn bench_mixed_radix_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_radix_fft");
    let config = SmallSubgroupConfig::<F>::new(3, 1);

    // Sizes of the form 3 * 2^k, which a radix-2 domain would round up.
    for &log_n in &[14, 16, 18] {
        let n = 3 << log_n;
        let domain = MixedRadixEvaluationDomain::new(n, &config).unwrap();
        assert_eq!(domain.size(), n);
        let coeffs = generate_random_coeffs(n);

        group.bench_with_input(BenchmarkId::new("fft", n), &coeffs, |b, coeffs| {
            b.iter(|| domain.fft(coeffs));
        });

        let evals = domain.fft(&coeffs);
        group.bench_with_input(BenchmarkId::new("ifft", n), &evals, |b, evals| {
            b.iter(|| domain.ifft(evals));
        });
    }

    group.finish();
}

fn bench_radix2_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("radix2_fft");

    for &log_n in &[14, 16, 18] {
        let n = 1 << log_n;
        let domain = Radix2EvaluationDomain::<F>::new(n).unwrap();
        let coeffs = generate_random_coeffs(n);

        group.bench_with_input(BenchmarkId::new("fft", n), &coeffs, |b, coeffs| {
            b.iter(|| domain.fft(coeffs));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mixed_radix_fft, bench_radix2_fft);
criterion_main!(benches);
