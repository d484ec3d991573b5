//! The more independent sources are mixed, the more Gaussian every mixture looks and the harder
//! the separation gets. The mean estimation error should grow with the number of sources.

use ndarray::{Array1, Axis};
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use unmix::{correlation::cross_correlation, metrics::SeparationMetrics, traits::Fit};
use unmix_datasets::generate;
use unmix_ica::FastIca;

const SOURCE_COUNTS: [usize; 5] = [2, 5, 10, 15, 20];
const NSAMPLES: usize = 2000;
const NTRIALS: u64 = 3;

fn ranks(values: &[f64]) -> Array1<f64> {
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap());

    let mut ranks = Array1::zeros(values.len());
    for (rank, &i) in order.iter().enumerate() {
        ranks[i] = rank as f64;
    }
    ranks
}

fn spearman(a: &[f64], b: &[f64]) -> f64 {
    let a = ranks(a).insert_axis(Axis(0));
    let b = ranks(b).insert_axis(Axis(0));

    cross_correlation(&a, &b).unwrap()[(0, 0)]
}

fn mean_estimation_error(nsources: usize) -> f64 {
    let total: f64 = (0..NTRIALS)
        .map(|trial| {
            let mut rng = Xoshiro256Plus::seed_from_u64(1000 * nsources as u64 + trial);
            let sources = generate::uniform_sources(nsources, NSAMPLES, &mut rng);
            let mixing = generate::random_mixing(nsources, &mut rng);
            let mixture = generate::mix(&mixing, &sources);

            let ica = FastIca::params()
                .random_state(trial)
                .fit(&mixture)
                .unwrap()
                .optimize()
                .unwrap();
            let estimated = ica.separate_sources(&mixture).unwrap();

            sources.estimation_error(&estimated).unwrap()
        })
        .sum();

    total / NTRIALS as f64
}

#[test]
fn spearman_of_ordered_values() {
    assert!((spearman(&[1., 2., 3.], &[10., 20., 30.]) - 1.).abs() < 1e-12);
    assert!((spearman(&[1., 2., 3.], &[3., 1., -5.]) + 1.).abs() < 1e-12);
}

#[test]
fn error_grows_with_number_of_sources() {
    let counts = SOURCE_COUNTS.iter().map(|&n| n as f64).collect::<Vec<_>>();
    let errors = SOURCE_COUNTS
        .iter()
        .map(|&n| mean_estimation_error(n))
        .collect::<Vec<_>>();

    let rho = spearman(&counts, &errors);
    assert!(rho > 0., "errors {:?}, spearman {}", errors, rho);
}
