//! Utility functions for generating source signals and their mixtures

use ndarray::{Array, Array1, Array2, ArrayBase, Data, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, Uniform},
    RandomExt,
};
use std::f64::consts::PI;

/// Upper bound of the time axis shared by the periodic generators
const DURATION: f64 = 8.;

fn time_axis(nsamples: usize) -> Array1<f64> {
    Array::linspace(0., DURATION, nsamples)
}

/// Sine wave `sin(frequency * t)` sampled at `nsamples` points of `t` in `[0, 8]`
pub fn sine(nsamples: usize, frequency: f64) -> Array1<f64> {
    time_axis(nsamples).mapv(|t| (frequency * t).sin())
}

/// Square wave switching between `1` and `-1` in phase with [`sine`]
pub fn square(nsamples: usize, frequency: f64) -> Array1<f64> {
    sine(nsamples, frequency).mapv(|x| if x > 0. { 1. } else { -1. })
}

/// Sawtooth wave in `[-1, 1)` with the same period as [`sine`]
pub fn sawtooth(nsamples: usize, frequency: f64) -> Array1<f64> {
    time_axis(nsamples).mapv(|t| {
        let phase = frequency * t / (2. * PI);
        2. * (phase - (phase + 0.5).floor())
    })
}

/// Draw `nsources` independent rows of `nsamples` values from `distribution`
pub fn random_sources(
    nsources: usize,
    nsamples: usize,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    Array::random_using((nsources, nsamples), distribution, rng)
}

/// Independent uniform sources with zero mean and unit variance
///
/// Uniform noise is sub-Gaussian but the sum of many such sources quickly approaches a normal
/// distribution, which makes them a good probe for how separation degrades with the number of
/// mixed signals.
pub fn uniform_sources(nsources: usize, nsamples: usize, rng: &mut impl Rng) -> Array2<f64> {
    let bound = 3f64.sqrt();
    random_sources(nsources, nsamples, Uniform::new(-bound, bound), rng)
}

/// Square mixing matrix with entries drawn uniformly from `[-1, 1)`
pub fn random_mixing(nsignals: usize, rng: &mut impl Rng) -> Array2<f64> {
    Array::random_using((nsignals, nsignals), Uniform::new(-1., 1.), rng)
}

/// Mix `sources` (one signal per row) into `mixing.nrows()` observed signals
pub fn mix(
    mixing: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    sources: &ArrayBase<impl Data<Elem = f64>, Ix2>,
) -> Array2<f64> {
    mixing.dot(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_periodic_shapes() {
        let s = sine(500, 2.);
        assert_eq!(s.len(), 500);
        assert!(s.iter().all(|x| x.abs() <= 1.));

        assert!(square(500, 2.).iter().all(|x| *x == 1. || *x == -1.));

        let saw = sawtooth(500, 3.);
        assert!(saw.iter().all(|x| (-1. ..1.).contains(x)));
        assert_abs_diff_eq!(saw[0], 0.);
    }

    #[test]
    fn test_uniform_sources_have_unit_variance() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let sources = uniform_sources(3, 20_000, &mut rng);

        for row in sources.rows() {
            assert_abs_diff_eq!(row.mean().unwrap(), 0., epsilon = 0.05);
            assert_abs_diff_eq!(row.var(0.), 1., epsilon = 0.05);
        }
    }

    #[test]
    fn test_mix() {
        let sources = array![[1., 0., 2.], [0., 1., 1.]];
        let mixing = array![[1., 1.], [0.5, 2.]];

        assert_eq!(
            mix(&mixing, &sources),
            array![[1., 1., 3.], [0.5, 2., 3.]]
        );
    }
}
