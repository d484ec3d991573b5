use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{stack, Array2, Axis};
use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};
use rand_xoshiro::Xoshiro256Plus;
use unmix::benchmarks::config;
use unmix::traits::Fit;
use unmix_datasets::generate;
use unmix_ica::{Algorithm, Contrast, FastIca};

fn perform_ica(mixture: &Array2<f64>, contrast: Contrast, algorithm: Algorithm) {
    let ica = FastIca::params()
        .contrast(contrast)
        .algorithm(algorithm)
        .random_state(42);

    let _ica = ica.fit(mixture).and_then(|ica| ica.optimize());
}

fn create_data(nsamples: usize) -> Array2<f64> {
    let mut sources = stack![
        Axis(0),
        generate::sine(nsamples, 2.),
        generate::square(nsamples, 4.)
    ];

    // Adding noise to the signals
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    sources += &Array2::random_using((2, nsamples), Uniform::new(0.0, 1.0), &mut rng).mapv(|x| x * 0.2);

    let mixing = ndarray::array![[1., 1.], [0.5, 2.]];
    generate::mix(&mixing, &sources)
}

fn bench(c: &mut Criterion, algorithm: Algorithm) {
    let mut group = c.benchmark_group(format!("Fast ICA {:?}", algorithm));
    config::set_default_benchmark_configs(&mut group);

    let contrasts = [
        ("Logcosh", Contrast::Logcosh(1.0)),
        ("Cube", Contrast::Cube),
        ("Exp", Contrast::Exp),
    ];

    for size in [1_000, 10_000, 100_000].iter() {
        let mixture = create_data(*size);
        for (name, contrast) in contrasts.iter() {
            group.bench_with_input(BenchmarkId::new(*name, size), &mixture, |b, mixture| {
                b.iter(|| perform_ica(mixture, *contrast, algorithm));
            });
        }
    }
    group.finish();
}

fn deflation_bench(c: &mut Criterion) {
    bench(c, Algorithm::Deflation);
}

fn parallel_bench(c: &mut Criterion) {
    bench(c, Algorithm::Parallel);
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = config::get_default_profiling_configs();
    targets = deflation_bench, parallel_bench
}
#[cfg(target_os = "windows")]
criterion_group!(benches, deflation_bench, parallel_bench);

criterion_main!(benches);
