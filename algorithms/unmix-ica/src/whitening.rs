//! Centering and whitening of mixtures
//!
//! Whitening maps the centered mixture `X` (`nsignals × nsamples`) to `Z = K·X` whose sample
//! covariance is the identity. `K` is built from the eigendecomposition `C = E·Λ·Eᵀ` of the
//! covariance of `X`: keeping the `ncomponents` largest eigenpairs, `K = Λ^(-1/2)·Eᵀ`.
//!
//! The covariance is normalized by the number of samples `n` (not `n - 1`), so `Z·Zᵀ / n = I`.

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix2};
use ndarray_linalg::{Eigh, UPLO};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use unmix::{traits::Transformer, Float, Records, WithLapack, WithoutLapack};

use crate::error::{FastIcaError, Result};

/// Subtract the mean of every row
///
/// Returns the centered matrix together with the row means.
pub fn center<F: Float, D: Data<Elem = F>>(
    x: &ArrayBase<D, Ix2>,
) -> Result<(Array2<F>, Array1<F>)> {
    let mean = x
        .mean_axis(Axis(1))
        .ok_or(FastIcaError::NotEnoughSamples(0))?;
    let centered = x - &mean.view().insert_axis(Axis(1));

    Ok((centered, mean))
}

/// Sample covariance `X·Xᵀ / n` of an already centered matrix
pub fn covariance<F: Float, D: Data<Elem = F>>(centered: &ArrayBase<D, Ix2>) -> Array2<F> {
    centered.dot(&centered.t()) / F::cast(centered.ncols())
}

/// Fitted centering and whitening transform of a mixture
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Whitening<F> {
    mean: Array1<F>,
    transform: Array2<F>,
    eigenvalues: Array1<F>,
}

impl<F: Float> Whitening<F> {
    /// Learn the whitening transform of `x` keeping `ncomponents` dimensions
    ///
    /// Returns the transform together with the whitened mixture (`ncomponents × nsamples`).
    ///
    /// # Errors
    ///
    /// * [`FastIcaError::NotEnoughSamples`] with fewer than two samples
    /// * [`FastIcaError::InvalidComponents`] if `ncomponents` is zero or greater than the number
    ///   of signals
    /// * [`FastIcaError::IllConditioned`] if one of the kept eigenvalues is not larger than
    ///   `rcond` times the largest eigenvalue
    pub fn fit<D: Data<Elem = F>>(
        x: &ArrayBase<D, Ix2>,
        ncomponents: usize,
        rcond: F,
    ) -> Result<(Self, Array2<F>)> {
        let (nsignals, nsamples) = (x.nsignals(), x.nsamples());
        if nsamples < 2 {
            return Err(FastIcaError::NotEnoughSamples(nsamples));
        }
        if ncomponents == 0 || ncomponents > nsignals {
            return Err(FastIcaError::InvalidComponents {
                ncomponents,
                nsignals,
            });
        }

        tracing::debug!(nsignals, nsamples, ncomponents, "whitening mixture");

        let (centered, mean) = center(x)?;
        let cov = covariance(&centered);

        let (eig_val, eig_vec) = cov.with_lapack().eigh(UPLO::Upper)?;
        let eig_val = eig_val.mapv(|v| F::cast(v));
        let eig_vec = WithoutLapack::<F, _, _>::without_lapack(eig_vec);

        // LAPACK returns the spectrum in ascending order
        let mut order = (0..nsignals).collect::<Vec<_>>();
        order.sort_by(|&a, &b| {
            eig_val[b]
                .partial_cmp(&eig_val[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order.truncate(ncomponents);

        let largest = eig_val[order[0]];
        let threshold = rcond * largest;
        for (index, &i) in order.iter().enumerate() {
            let eigenvalue = eig_val[i];
            if !(largest > F::zero()) || !(eigenvalue > threshold) {
                return Err(FastIcaError::IllConditioned {
                    index,
                    eigenvalue: eigenvalue.to_f64().unwrap_or(f64::NAN),
                    threshold: threshold.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        let eigenvalues = order.iter().map(|&i| eig_val[i]).collect::<Array1<F>>();
        tracing::debug!(eigenvalues = %eigenvalues, "selected covariance spectrum");

        let mut transform = Array2::zeros((ncomponents, nsignals));
        for (mut row, &i) in transform.rows_mut().into_iter().zip(order.iter()) {
            let vector = eig_vec.column(i);
            // fix the sign so that the largest entry is positive
            let pivot = vector
                .iter()
                .fold(F::zero(), |acc, &v| if v.abs() > acc.abs() { v } else { acc });
            let scale = if pivot < F::zero() {
                -eig_val[i].sqrt().recip()
            } else {
                eig_val[i].sqrt().recip()
            };
            row.assign(&vector.mapv(|v| v * scale));
        }

        let whitened = transform.dot(&centered);

        Ok((
            Whitening {
                mean,
                transform,
                eigenvalues,
            },
            whitened,
        ))
    }

    /// Row means of the fitted mixture
    pub fn mean(&self) -> ArrayView1<F> {
        self.mean.view()
    }

    /// The whitening matrix `K` (`ncomponents × nsignals`)
    pub fn transformation_matrix(&self) -> ArrayView2<F> {
        self.transform.view()
    }

    /// Kept eigenvalues of the covariance matrix in descending order
    ///
    /// These are the variances of the mixture along each whitened direction before scaling.
    pub fn eigenvalues(&self) -> ArrayView1<F> {
        self.eigenvalues.view()
    }

    pub fn ncomponents(&self) -> usize {
        self.transform.nrows()
    }

    pub fn nsignals(&self) -> usize {
        self.transform.ncols()
    }

    pub(crate) fn check_signals(&self, nsignals: usize) -> Result<()> {
        if nsignals != self.nsignals() {
            return Err(FastIcaError::DimensionMismatch {
                expected: self.nsignals(),
                actual: nsignals,
            });
        }
        Ok(())
    }
}

impl<F: Float, D: Data<Elem = F>> Transformer<&ArrayBase<D, Ix2>, Result<Array2<F>>>
    for Whitening<F>
{
    /// Center `x` with the fitted mean and project it into whitened space
    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.check_signals(x.nrows())?;
        let centered = x - &self.mean.view().insert_axis(Axis(1));

        Ok(self.transform.dot(&centered))
    }
}
