//! Metrics for blind source separation
//!
//! Separated sources are only identified up to permutation, sign and scale. The metrics in this
//! module standardize every signal and match each reference source greedily to the estimate
//! closest to it, so that they can score the raw output of a separation algorithm.

use ndarray::{Array2, ArrayBase, ArrayView1, Axis, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Float;

/// Scale every row to zero mean and unit variance
///
/// The variance is normalized by the number of samples. Fails on constant rows, which cannot be
/// standardized.
pub fn standardize_rows<F: Float, D: Data<Elem = F>>(x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
    let mean = x.mean_axis(Axis(1)).ok_or(Error::NotEnoughSamples)?;
    let mut x = x - &mean.insert_axis(Axis(1));

    for (i, mut row) in x.rows_mut().into_iter().enumerate() {
        let std = (row.dot(&row) / F::cast(row.len())).sqrt();
        if std <= F::epsilon() {
            return Err(Error::ConstantSignal(i));
        }
        row.mapv_inplace(|v| v / std);
    }

    Ok(x)
}

/// Mean squared error between two standardized signals, minimized over the sign of `b`
fn signed_mse<F: Float>(a: ArrayView1<F>, b: ArrayView1<F>) -> F {
    let n = F::cast(a.len());
    let (plus, minus) = a
        .iter()
        .zip(b.iter())
        .fold((F::zero(), F::zero()), |(plus, minus), (&a, &b)| {
            (plus + (a - b) * (a - b), minus + (a + b) * (a + b))
        });

    (plus / n).min(minus / n)
}

/// Assignment of one reference source to an estimated source
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceMatch<F> {
    /// Row index of the reference source
    pub source: usize,
    /// Row index of the estimate assigned to it
    pub estimate: usize,
    /// Mean squared error between both after standardization
    pub error: F,
}

/// Scoring of estimated sources against reference sources
///
/// `self` holds the reference sources, one per row. Estimates may contain more rows than
/// references, but never fewer.
pub trait SeparationMetrics<F: Float> {
    /// Greedily match every reference source to the closest unused estimate
    ///
    /// Reference rows are visited in order; each picks the estimate with the smallest
    /// standardized mean squared error among the estimates not matched yet. Sign flips of the
    /// estimate are free.
    fn match_sources<D: Data<Elem = F>>(
        &self,
        estimated: &ArrayBase<D, Ix2>,
    ) -> Result<Vec<SourceMatch<F>>>;

    /// Mean of the matched errors returned by [`match_sources`](Self::match_sources)
    fn estimation_error<D: Data<Elem = F>>(&self, estimated: &ArrayBase<D, Ix2>) -> Result<F> {
        let matches = self.match_sources(estimated)?;
        if matches.is_empty() {
            return Err(Error::MismatchedShapes("no reference sources".into()));
        }
        let total = matches.iter().map(|m| m.error).sum::<F>();

        Ok(total / F::cast(matches.len()))
    }
}

impl<F: Float, S: Data<Elem = F>> SeparationMetrics<F> for ArrayBase<S, Ix2> {
    fn match_sources<D: Data<Elem = F>>(
        &self,
        estimated: &ArrayBase<D, Ix2>,
    ) -> Result<Vec<SourceMatch<F>>> {
        if self.ncols() != estimated.ncols() {
            return Err(Error::MismatchedShapes(format!(
                "reference sources have {} samples, estimates {}",
                self.ncols(),
                estimated.ncols()
            )));
        }
        if estimated.nrows() < self.nrows() {
            return Err(Error::MismatchedShapes(format!(
                "cannot match {} reference sources against {} estimates",
                self.nrows(),
                estimated.nrows()
            )));
        }

        let reference = standardize_rows(self)?;
        let estimated = standardize_rows(estimated)?;

        let mut used = vec![false; estimated.nrows()];
        let mut matches = Vec::with_capacity(reference.nrows());

        for (source, row) in reference.rows().into_iter().enumerate() {
            let best = estimated
                .rows()
                .into_iter()
                .enumerate()
                .filter(|(j, _)| !used[*j])
                .map(|(j, est)| (j, signed_mse(row, est)))
                .fold(None, |best: Option<(usize, F)>, (j, err)| match best {
                    Some((_, best_err)) if best_err <= err => best,
                    _ => Some((j, err)),
                });

            let (estimate, error) = best.ok_or_else(|| {
                Error::MismatchedShapes(format!("no estimate left for source {}", source))
            })?;
            used[estimate] = true;
            matches.push(SourceMatch {
                source,
                estimate,
                error,
            });
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array};
    use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn test_standardize_rows() {
        let x = array![[1., 2., 3., 4.], [10., 10., 20., 20.]];
        let x = standardize_rows(&x).unwrap();

        for row in x.rows() {
            assert_abs_diff_eq!(row.mean().unwrap(), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(row.dot(&row) / 4., 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_standardize_constant_row() {
        let x = array![[1., 2., 3.], [5., 5., 5.]];
        assert!(matches!(
            standardize_rows(&x),
            Err(Error::ConstantSignal(1))
        ));
    }

    #[test]
    fn test_permuted_scaled_and_flipped_estimates_match_exactly() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let sources = Array::random_using((3, 200), Uniform::new(-1., 1.), &mut rng);

        let mut estimated = Array2::zeros((3, 200));
        estimated.row_mut(0).assign(&sources.row(2).mapv(|x| -2. * x));
        estimated.row_mut(1).assign(&sources.row(0).mapv(|x| 5. * x + 1.));
        estimated.row_mut(2).assign(&sources.row(1));

        let matches = sources.match_sources(&estimated).unwrap();
        let assigned = matches.iter().map(|m| m.estimate).collect::<Vec<_>>();
        assert_eq!(assigned, vec![1, 2, 0]);

        assert_abs_diff_eq!(sources.estimation_error(&estimated).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_estimates_are_consumed_once() {
        // both references are closest to the first estimate, the second reference has to take
        // the remaining one
        let sources = array![[1., 2., 3., 4., 5.], [1., 2., 3., 5., 4.]];
        let estimated = array![[1., 2., 3., 4., 5.], [5., -1., 2., 0., 1.]];

        let matches = sources.match_sources(&estimated).unwrap();
        assert_eq!(matches[0].estimate, 0);
        assert_eq!(matches[1].estimate, 1);
        assert!(matches[1].error > matches[0].error);
    }

    #[test]
    fn test_more_estimates_than_sources() {
        let sources = array![[1., -1., 1., -1.]];
        let estimated = array![[0., 1., 0., 2.], [-1., 1., -1., 1.]];

        let matches = sources.match_sources(&estimated).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].estimate, 1);
    }

    #[test]
    fn test_shape_errors() {
        let sources = array![[1., 2., 3.], [3., 1., 2.]];

        assert!(sources.match_sources(&array![[1., 2., 3.]]).is_err());
        assert!(sources.match_sources(&array![[1., 2.], [2., 1.]]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_autotraits() {
        fn is_serde<T: Serialize + for<'de> Deserialize<'de>>() {}
        is_serde::<SourceMatch<f64>>();
        is_serde::<Error>();
    }
}
