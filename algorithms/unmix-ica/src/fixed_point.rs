//! Fixed-point iteration recovering the unmixing matrix in whitened space

use ndarray::{s, Array1, Array2, ArrayBase, ArrayView2, Axis, Data, Ix2};
use ndarray_linalg::{Eigh, UPLO};
use ndarray_rand::{rand::Rng, rand_distr::StandardNormal, RandomExt};
use ndarray_stats::QuantileExt;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use unmix::{Float, WithLapack, WithoutLapack};

use crate::error::{FastIcaError, Result};
use crate::hyperparams::FastIcaValidParams;

/// Strategy used to extract the independent components
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
pub enum Algorithm {
    /// Extract one direction at a time, orthogonalizing every new direction against the ones
    /// accepted before it
    Deflation,
    /// Update all directions simultaneously and decorrelate them symmetrically after every step
    Parallel,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Deflation
    }
}

/// Convergence report of one extracted component
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComponentStatus<F> {
    /// Whether the direction stabilized within the tolerance
    pub converged: bool,
    /// Number of fixed-point iterations spent
    pub iterations: usize,
    /// Final value of `| |⟨w_new, w⟩| - 1 |`
    pub lim: F,
}

/// Unmixing matrix in whitened space together with the per-row convergence status
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<F> {
    pub unmixing: Array2<F>,
    pub status: Vec<ComponentStatus<F>>,
}

/// Draw a direction uniformly from the unit sphere
pub fn random_unit_vector<F: Float, R: Rng>(dim: usize, rng: &mut R) -> Array1<F> {
    let w = Array1::<f64>::random_using(dim, StandardNormal, rng).mapv(F::cast);
    let norm = w.dot(&w).sqrt();
    w / norm
}

/// Remove from `w` its projection onto every row of `accepted`
fn deflate<F: Float, D: Data<Elem = F>>(w: &mut Array1<F>, accepted: &ArrayBase<D, Ix2>) {
    for row in accepted.rows() {
        let proj = w.dot(&row);
        w.scaled_add(-proj, &row);
    }
}

/// Scale `w` to unit length, failing when it collapsed
fn normalize<F: Float>(mut w: Array1<F>, component: usize) -> Result<Array1<F>> {
    let norm = w.dot(&w).sqrt();
    if !(norm > F::epsilon()) || !norm.is_finite() {
        return Err(FastIcaError::Degenerate(component));
    }
    w.mapv_inplace(|v| v / norm);
    Ok(w)
}

impl<F: Float> FastIcaValidParams<F> {
    /// Recover the unmixing matrix of the whitened data `z` (`ncomponents × nsamples`)
    pub(crate) fn extract<R: Rng>(&self, z: ArrayView2<F>, rng: &mut R) -> Result<Extraction<F>> {
        match self.algorithm() {
            Algorithm::Deflation => self.ica_deflation(z, rng),
            Algorithm::Parallel => self.ica_parallel(z, rng),
        }
    }

    // Deflationary FastICA
    //
    // The components are found sequentially, each new direction depends on all previously
    // accepted rows through the Gram-Schmidt step.
    fn ica_deflation<R: Rng>(&self, z: ArrayView2<F>, rng: &mut R) -> Result<Extraction<F>> {
        let ncomponents = z.nrows();
        let nsamples = F::cast(z.ncols());

        let mut unmixing = Array2::zeros((ncomponents, ncomponents));
        let mut status = Vec::with_capacity(ncomponents);

        for component in 0..ncomponents {
            let accepted = unmixing.slice(s![..component, ..]);

            let mut w = random_unit_vector(ncomponents, rng);
            deflate(&mut w, &accepted);
            w = normalize(w, component)?;

            let mut report = ComponentStatus {
                converged: false,
                iterations: 0,
                lim: F::infinity(),
            };

            for iteration in 0..self.max_iter() {
                let (gwtz, g_wtz) = self
                    .contrast()
                    .exec(&w.dot(&z).insert_axis(Axis(0)));

                // w_new = E[z g(wᵀz)] - E[g'(wᵀz)] w
                let mut wnew = z.dot(&gwtz.row(0)) / nsamples - &w * g_wtz[0];
                deflate(&mut wnew, &accepted);
                let wnew = normalize(wnew, component)?;

                let lim = (wnew.dot(&w).abs() - F::one()).abs();
                w = wnew;

                report.iterations = iteration + 1;
                report.lim = lim;
                tracing::trace!(component, iteration, lim = %lim, "fixed-point step");

                if lim < self.tol() {
                    report.converged = true;
                    break;
                }
            }

            if report.converged {
                tracing::debug!(
                    component,
                    iterations = report.iterations,
                    "component converged"
                );
            } else {
                tracing::warn!(
                    component,
                    max_iter = self.max_iter(),
                    lim = %report.lim,
                    "component did not converge, keeping the last iterate"
                );
            }

            unmixing.row_mut(component).assign(&w);
            status.push(report);
        }

        Ok(Extraction { unmixing, status })
    }

    // Parallel FastICA
    //
    // All rows are updated at once and kept orthonormal by symmetric decorrelation.
    fn ica_parallel<R: Rng>(&self, z: ArrayView2<F>, rng: &mut R) -> Result<Extraction<F>> {
        let ncomponents = z.nrows();
        let nsamples = F::cast(z.ncols());

        let w = Array2::<f64>::random_using((ncomponents, ncomponents), StandardNormal, rng)
            .mapv(F::cast);
        let mut w = Self::sym_decorrelation(&w)?;

        let mut converged = false;
        let mut iterations = 0;
        let mut lim = F::infinity();

        for iteration in 0..self.max_iter() {
            let (gwtz, g_wtz) = self.contrast().exec(&w.dot(&z));

            let lhs = gwtz.dot(&z.t()) / nsamples;
            let rhs = &w * &g_wtz.insert_axis(Axis(1));
            let wnew = Self::sym_decorrelation(&(lhs - rhs))?;

            // `lim` let us check for convergence between the old and
            // new weight values, we want their dot-product to almost equal one
            lim = *wnew
                .outer_iter()
                .zip(w.outer_iter())
                .map(|(a, b)| (a.dot(&b).abs() - F::one()).abs())
                .collect::<Array1<F>>()
                .max()
                .map_err(|_| FastIcaError::Degenerate(0))?;

            w = wnew;
            iterations = iteration + 1;
            tracing::trace!(iteration, lim = %lim, "symmetric fixed-point step");

            if lim < self.tol() {
                converged = true;
                break;
            }
        }

        if converged {
            tracing::debug!(iterations, "unmixing matrix converged");
        } else {
            tracing::warn!(
                max_iter = self.max_iter(),
                lim = %lim,
                "unmixing matrix did not converge, keeping the last iterate"
            );
        }

        let status = vec![
            ComponentStatus {
                converged,
                iterations,
                lim,
            };
            ncomponents
        ];

        Ok(Extraction {
            unmixing: w,
            status,
        })
    }

    // Symmetric decorrelation
    //
    // W <- (W * W.T)^{-1/2} * W
    pub(crate) fn sym_decorrelation(w: &Array2<F>) -> Result<Array2<F>> {
        let (eig_val, eig_vec) = w.dot(&w.t()).with_lapack().eigh(UPLO::Upper)?;
        let eig_val = eig_val.mapv(|v| F::cast(v));
        let eig_vec = WithoutLapack::<F, _, _>::without_lapack(eig_vec);

        let tmp = &eig_vec
            * &(eig_val.mapv(|x| x.sqrt()).mapv(|x| {
                // We lower bound the float value at 1e-7 when taking the reciprocal
                let lower_bound = F::cast(1e-7);
                if x < lower_bound {
                    return lower_bound.recip();
                }
                x.recip()
            }))
            .insert_axis(Axis(0));

        Ok(tmp.dot(&eig_vec.t()).dot(w))
    }
}

/// `true` when the rows of `w` are orthonormal within `eps`
#[cfg(test)]
pub(crate) fn is_orthonormal<F: Float, D: Data<Elem = F>>(w: &ArrayBase<D, Ix2>, eps: F) -> bool {
    let gram = w.dot(&w.t());
    gram.indexed_iter().all(|((i, j), &v)| {
        let target = if i == j { F::one() } else { F::zero() };
        (v - target).abs() < eps
    })
}
