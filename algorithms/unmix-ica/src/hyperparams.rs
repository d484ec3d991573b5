use crate::{
    contrast::Contrast,
    error::FastIcaError,
    fast_ica::FastIca,
    fixed_point::Algorithm,
};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use unmix::{Float, ParamGuard};

/// Fast Independent Component Analysis (ICA)
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct FastIcaValidParams<F: Float> {
    ncomponents: Option<usize>,
    algorithm: Algorithm,
    contrast: Contrast,
    max_iter: usize,
    tol: F,
    random_state: Option<u64>,
    rcond: F,
}

impl<F: Float> FastIcaValidParams<F> {
    pub fn ncomponents(&self) -> &Option<usize> {
        &self.ncomponents
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn contrast(&self) -> &Contrast {
        &self.contrast
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn tol(&self) -> F {
        self.tol
    }

    pub fn random_state(&self) -> &Option<u64> {
        &self.random_state
    }

    pub fn rcond(&self) -> F {
        self.rcond
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct FastIcaParams<F: Float>(FastIcaValidParams<F>);

impl<F: Float> Default for FastIcaParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> FastIca<F> {
    pub fn params() -> FastIcaParams<F> {
        FastIcaParams::new()
    }
}

impl<F: Float> FastIcaParams<F> {
    /// Create new FastICA algorithm with default values for its parameters
    pub fn new() -> Self {
        Self(FastIcaValidParams {
            ncomponents: None,
            algorithm: Algorithm::default(),
            contrast: Contrast::default(),
            max_iter: 200,
            tol: F::cast(1e-4),
            random_state: None,
            rcond: F::epsilon().sqrt(),
        })
    }

    /// Set the number of components to use, if not set all are used
    pub fn ncomponents(mut self, ncomponents: usize) -> Self {
        self.0.ncomponents = Some(ncomponents);
        self
    }

    /// Extract components one by one or all at once, refer [`Algorithm`]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.0.algorithm = algorithm;
        self
    }

    /// G function used in the approximation to neg-entropy, refer [`Contrast`]
    pub fn contrast(mut self, contrast: Contrast) -> Self {
        self.0.contrast = contrast;
        self
    }

    /// Set maximum number of fixed-point iterations per component
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.0.max_iter = max_iter;
        self
    }

    /// Set tolerance on the change of direction between two iterations
    pub fn tol(mut self, tol: F) -> Self {
        self.0.tol = tol;
        self
    }

    /// Set seed for random number generator for reproducible results.
    pub fn random_state(mut self, random_state: u64) -> Self {
        self.0.random_state = Some(random_state);
        self
    }

    /// Set the smallest eigenvalue, relative to the largest one, accepted during whitening
    pub fn rcond(mut self, rcond: F) -> Self {
        self.0.rcond = rcond;
        self
    }
}

impl<F: Float> ParamGuard for FastIcaParams<F> {
    type Checked = FastIcaValidParams<F>;
    type Error = FastIcaError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if !(self.0.tol > F::zero()) {
            Err(FastIcaError::InvalidTolerance(
                self.0.tol.to_f32().unwrap_or(f32::NAN),
            ))
        } else if self.0.max_iter == 0 {
            Err(FastIcaError::InvalidMaxIter)
        } else if !(self.0.rcond >= F::zero() && self.0.rcond < F::one()) {
            Err(FastIcaError::InvalidRcond(
                self.0.rcond.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            self.0.contrast.validate()?;
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FastIca::<f64>::params().check().unwrap();

        assert_eq!(*params.ncomponents(), None);
        assert_eq!(params.algorithm(), Algorithm::Deflation);
        assert_eq!(*params.contrast(), Contrast::Logcosh(1.));
        assert_eq!(params.max_iter(), 200);
        assert_eq!(*params.random_state(), None);
        assert!(params.rcond() > 0. && params.rcond() < 1e-6);
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            FastIca::<f64>::params().tol(0.).check(),
            Err(FastIcaError::InvalidTolerance(_))
        ));
        assert!(matches!(
            FastIca::<f64>::params().tol(-1e-3).check(),
            Err(FastIcaError::InvalidTolerance(_))
        ));
        assert!(matches!(
            FastIca::<f64>::params().max_iter(0).check(),
            Err(FastIcaError::InvalidMaxIter)
        ));
        assert!(matches!(
            FastIca::<f64>::params().rcond(1.5).check(),
            Err(FastIcaError::InvalidRcond(_))
        ));
        assert!(matches!(
            FastIca::<f64>::params()
                .contrast(Contrast::Logcosh(3.))
                .check(),
            Err(FastIcaError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_builder() {
        let params = FastIca::<f32>::params()
            .ncomponents(3)
            .algorithm(Algorithm::Parallel)
            .contrast(Contrast::Cube)
            .max_iter(50)
            .tol(1e-3)
            .random_state(7)
            .check_unwrap();

        assert_eq!(*params.ncomponents(), Some(3));
        assert_eq!(params.algorithm(), Algorithm::Parallel);
        assert_eq!(*params.contrast(), Contrast::Cube);
        assert_eq!(params.max_iter(), 50);
        assert_eq!(params.tol(), 1e-3);
        assert_eq!(*params.random_state(), Some(7));
    }
}
