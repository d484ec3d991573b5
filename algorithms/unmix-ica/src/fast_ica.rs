//! Fast algorithm for Independent Component Analysis (ICA)

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix2};
use ndarray_rand::rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use unmix::{
    traits::{Fit, Transformer},
    Float,
};

use crate::error::{FastIcaError, Result};
use crate::fixed_point::{ComponentStatus, Extraction};
use crate::hyperparams::FastIcaValidParams;
use crate::whitening::Whitening;

impl<F: Float, D: Data<Elem = F>> Fit<ArrayBase<D, Ix2>, FastIcaError> for FastIcaValidParams<F> {
    type Object = Constructed<F>;

    /// Center and whiten the mixture `x` (one signal per row, one sample per column)
    ///
    /// The unmixing matrix is not computed here, call [`Constructed::optimize`] on the result.
    ///
    /// # Errors
    ///
    /// * [`FastIcaError::InvalidComponents`] if `ncomponents` is zero or larger than the number of
    ///   signals
    /// * [`FastIcaError::NotEnoughSamples`] with fewer than two samples
    /// * [`FastIcaError::IllConditioned`] if the covariance of the kept dimensions is singular
    fn fit(&self, x: &ArrayBase<D, Ix2>) -> Result<Self::Object> {
        let ncomponents = self.ncomponents().unwrap_or_else(|| x.nrows());
        let (whitening, whitened) = Whitening::fit(x, ncomponents, self.rcond())?;

        Ok(Constructed {
            params: *self,
            mixture: x.to_owned(),
            whitening,
            whitened,
        })
    }
}

/// A FastICA model whose mixture has been centered and whitened
///
/// Only the preprocessing is available in this state, the unmixing matrix is obtained by
/// calling [`optimize`](Constructed::optimize).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Constructed<F: Float> {
    params: FastIcaValidParams<F>,
    mixture: Array2<F>,
    whitening: Whitening<F>,
    whitened: Array2<F>,
}

impl<F: Float> Constructed<F> {
    pub fn params(&self) -> &FastIcaValidParams<F> {
        &self.params
    }

    /// The fitted mixture, one signal per row
    pub fn mixture(&self) -> ArrayView2<F> {
        self.mixture.view()
    }

    pub fn whitening(&self) -> &Whitening<F> {
        &self.whitening
    }

    /// Centered mixture projected into whitened space (`ncomponents × nsamples`)
    pub fn whitened(&self) -> ArrayView2<F> {
        self.whitened.view()
    }

    /// Row means removed from the mixture before whitening
    pub fn mean(&self) -> ArrayView1<F> {
        self.whitening.mean()
    }

    pub fn whitening_matrix(&self) -> ArrayView2<F> {
        self.whitening.transformation_matrix()
    }

    pub fn ncomponents(&self) -> usize {
        self.whitening.ncomponents()
    }

    pub fn nsignals(&self) -> usize {
        self.whitening.nsignals()
    }

    pub fn nsamples(&self) -> usize {
        self.mixture.ncols()
    }

    /// Run the fixed-point iteration and return the optimized model
    ///
    /// The random initialization is seeded with `random_state` if set, otherwise drawn from
    /// system entropy on every call.
    pub fn optimize(&self) -> Result<Optimized<F>> {
        self.optimize_with_rng(&mut self.rng())
    }

    /// Run the fixed-point iteration drawing the initial directions from `rng`
    pub fn optimize_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Optimized<F>> {
        let extraction = self.extract(rng)?;

        Ok(self.clone().into_optimized(extraction))
    }

    fn rng(&self) -> Xoshiro256Plus {
        match self.params.random_state() {
            Some(seed) => Xoshiro256Plus::seed_from_u64(*seed),
            None => Xoshiro256Plus::from_entropy(),
        }
    }

    fn extract<R: Rng>(&self, rng: &mut R) -> Result<Extraction<F>> {
        tracing::debug!(
            ncomponents = self.ncomponents(),
            algorithm = ?self.params.algorithm(),
            contrast = ?self.params.contrast(),
            "optimizing unmixing matrix"
        );

        self.params.extract(self.whitened.view(), rng)
    }

    fn into_optimized(self, extraction: Extraction<F>) -> Optimized<F> {
        let components = extraction
            .unmixing
            .dot(&self.whitening.transformation_matrix());

        Optimized {
            constructed: self,
            unmixing: extraction.unmixing,
            components,
            status: extraction.status,
        }
    }

    // Move the data matrices out, leaving empty arrays behind
    fn take(&mut self) -> Self {
        Constructed {
            params: self.params,
            mixture: std::mem::take(&mut self.mixture),
            whitening: self.whitening.clone(),
            whitened: std::mem::take(&mut self.whitened),
        }
    }
}

/// A FastICA model with a recovered unmixing matrix
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Optimized<F: Float> {
    constructed: Constructed<F>,
    unmixing: Array2<F>,
    components: Array2<F>,
    status: Vec<ComponentStatus<F>>,
}

impl<F: Float> Optimized<F> {
    /// The preprocessing this model was optimized from
    pub fn constructed(&self) -> &Constructed<F> {
        &self.constructed
    }

    /// Unmixing matrix in whitened space (`ncomponents × ncomponents`)
    pub fn whitened_unmixer(&self) -> ArrayView2<F> {
        self.unmixing.view()
    }

    /// Unmixing matrix applicable to centered mixtures (`ncomponents × nsignals`)
    ///
    /// This is the product of the whitened unmixer and the whitening matrix.
    pub fn unwhitened_unmixer(&self) -> ArrayView2<F> {
        self.components.view()
    }

    pub fn mean(&self) -> ArrayView1<F> {
        self.constructed.mean()
    }

    /// Mean of the fitted mixture expressed in source space
    pub fn mean_offset(&self) -> Array1<F> {
        self.components.dot(&self.constructed.mean())
    }

    /// Convergence report of every extracted component, in extraction order
    pub fn convergence(&self) -> &[ComponentStatus<F>] {
        &self.status
    }

    /// `true` if every component converged within `max_iter` iterations
    pub fn converged(&self) -> bool {
        self.status.iter().all(|s| s.converged)
    }

    /// Sources of the fitted mixture (`ncomponents × nsamples`)
    pub fn sources(&self) -> Array2<F> {
        self.unmixing.dot(&self.constructed.whitened)
    }

    /// Recover the sources of a mixture with the same signals as the fitted one
    ///
    /// `x` is centered with the fitted mean before the unwhitened unmixer is applied.
    pub fn separate_sources<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.constructed.whitening.check_signals(x.nrows())?;
        let centered = x - &self.mean().insert_axis(Axis(1));

        Ok(self.components.dot(&centered))
    }

    /// Run the optimization again from the same preprocessing
    pub fn optimize(&self) -> Result<Optimized<F>> {
        self.constructed.optimize()
    }
}

impl<F: Float, D: Data<Elem = F>> Transformer<&ArrayBase<D, Ix2>, Result<Array2<F>>>
    for Optimized<F>
{
    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.separate_sources(x)
    }
}

/// Fast Independent Component Analysis (ICA)
///
/// FastICA separates a multivariate signal into additive, statistically independent
/// non-Gaussian sources. The mixture is centered and whitened on construction, the unmixing
/// matrix is found by a fixed-point iteration maximizing the non-Gaussianity of every
/// projection once [`optimize`](FastIca::optimize) is called.
///
/// This enum is the estimator for callers holding a single mutable model. Accessors of the
/// optimized state fail with [`FastIcaError::NotOptimized`] before optimization. The typestates
/// [`Constructed`] and [`Optimized`] offer the same functionality with the ordering checked at
/// compile time.
///
/// # Example
///
/// ```
/// use ndarray::{array, Array1, Axis};
/// use unmix_ica::FastIca;
///
/// let sine = Array1::linspace(0., 8., 1000).mapv(|t| (2. * t).sin());
/// let square = Array1::linspace(0., 8., 1000).mapv(|t| (3. * t).sin().signum());
/// let sources = ndarray::stack![Axis(0), sine, square];
/// let mixture = array![[1., 1.], [0.5, 2.]].dot(&sources);
///
/// let mut ica = FastIca::construct(2, &mixture)?;
/// assert!(ica.unwhitened_unmixer().is_err());
///
/// ica.optimize()?;
/// let estimated = ica.separate_sources(&mixture)?;
/// assert_eq!(estimated.dim(), (2, 1000));
/// # Ok::<(), unmix_ica::FastIcaError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum FastIca<F: Float> {
    Constructed(Constructed<F>),
    Optimized(Optimized<F>),
}

impl<F: Float> FastIca<F> {
    /// Whiten `x` keeping `ncomponents` dimensions, using default hyperparameters otherwise
    pub fn construct<D: Data<Elem = F>>(ncomponents: usize, x: &ArrayBase<D, Ix2>) -> Result<Self> {
        let constructed = Self::params().ncomponents(ncomponents).fit(x)?;

        Ok(Self::Constructed(constructed))
    }

    /// Recover the unmixing matrix
    ///
    /// Calling it again restarts from a new random initialization unless `random_state` is set.
    /// The model is left untouched if the optimization fails.
    pub fn optimize(&mut self) -> Result<&Optimized<F>> {
        let mut rng = self.constructed().rng();

        self.optimize_with_rng(&mut rng)
    }

    /// Recover the unmixing matrix drawing the initial directions from `rng`
    pub fn optimize_with_rng<R: Rng>(&mut self, rng: &mut R) -> Result<&Optimized<F>> {
        let extraction = self.constructed().extract(rng)?;

        // the mixture moves into the new state instead of being copied
        let constructed = match self {
            Self::Constructed(constructed) => constructed.take(),
            Self::Optimized(optimized) => optimized.constructed.take(),
        };
        *self = Self::Optimized(constructed.into_optimized(extraction));

        self.optimized()
    }

    pub fn is_optimized(&self) -> bool {
        matches!(self, Self::Optimized(_))
    }

    pub fn constructed(&self) -> &Constructed<F> {
        match self {
            Self::Constructed(constructed) => constructed,
            Self::Optimized(optimized) => optimized.constructed(),
        }
    }

    pub fn optimized(&self) -> Result<&Optimized<F>> {
        match self {
            Self::Constructed(_) => Err(FastIcaError::NotOptimized),
            Self::Optimized(optimized) => Ok(optimized),
        }
    }

    /// Row means of the fitted mixture
    pub fn mean(&self) -> ArrayView1<F> {
        self.constructed().mean()
    }

    pub fn whitening_matrix(&self) -> ArrayView2<F> {
        self.constructed().whitening_matrix()
    }

    pub fn whitened_unmixer(&self) -> Result<ArrayView2<F>> {
        Ok(self.optimized()?.whitened_unmixer())
    }

    pub fn unwhitened_unmixer(&self) -> Result<ArrayView2<F>> {
        Ok(self.optimized()?.unwhitened_unmixer())
    }

    pub fn separate_sources<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.optimized()?.separate_sources(x)
    }
}

impl<F: Float> From<Constructed<F>> for FastIca<F> {
    fn from(constructed: Constructed<F>) -> Self {
        Self::Constructed(constructed)
    }
}

impl<F: Float> From<Optimized<F>> for FastIca<F> {
    fn from(optimized: Optimized<F>) -> Self {
        Self::Optimized(optimized)
    }
}
