//! Contrast functions approximating negentropy
//!
//! FastICA maximizes `E[G(wᵀz)]` for a non-quadratic function `G`. The fixed-point update only
//! needs the first and second derivatives of `G`, called `g` and `g'` below.

use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use unmix::Float;

use crate::error::{FastIcaError, Result};

/// Some standard non-linear functions
///
/// * `Logcosh(alpha)`: `G(u) = log(cosh(αu)) / α`, a good general purpose choice, `alpha`
///   must lie in `[1, 2]`
/// * `Exp`: `G(u) = -exp(-u²/2)`, robust for highly super-Gaussian sources
/// * `Cube`: `G(u) = u⁴/4`, kurtosis based, suited to sub-Gaussian sources
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum Contrast {
    Logcosh(f64),
    Exp,
    Cube,
}

impl Default for Contrast {
    fn default() -> Self {
        Self::Logcosh(1.)
    }
}

impl Contrast {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Self::Logcosh(alpha) if !(1.0..=2.0).contains(alpha) => {
                Err(FastIcaError::InvalidValue(format!(
                    "alpha must be between 1 and 2 inclusive, got {}",
                    alpha
                )))
            }
            _ => Ok(()),
        }
    }

    /// Apply `g` element-wise and average `g'` along every row
    ///
    /// Returns a tuple of `g(x)` with the shape of `x` and the row means of `g'(x)`. `x` must
    /// hold at least one column.
    pub(crate) fn exec<A: Float, D: Data<Elem = A>>(
        &self,
        x: &ArrayBase<D, Ix2>,
    ) -> (Array2<A>, Array1<A>) {
        match self {
            Self::Cube => Self::cube(x),
            Self::Exp => Self::exp(x),
            Self::Logcosh(alpha) => Self::logcosh(x, *alpha),
        }
    }

    fn cube<A: Float, D: Data<Elem = A>>(x: &ArrayBase<D, Ix2>) -> (Array2<A>, Array1<A>) {
        (
            x.mapv(|x| x.powi(3)),
            x.mapv(|x| A::cast(3.) * x.powi(2))
                .mean_axis(Axis(1))
                .unwrap(),
        )
    }

    fn exp<A: Float, D: Data<Elem = A>>(x: &ArrayBase<D, Ix2>) -> (Array2<A>, Array1<A>) {
        let exp = x.mapv(|x| (-x.powi(2) / A::cast(2.)).exp());
        (
            x * &exp,
            (x.mapv(|x| A::one() - x.powi(2)) * &exp)
                .mean_axis(Axis(1))
                .unwrap(),
        )
    }

    fn logcosh<A: Float, D: Data<Elem = A>>(
        x: &ArrayBase<D, Ix2>,
        alpha: f64,
    ) -> (Array2<A>, Array1<A>) {
        let alpha = A::cast(alpha);

        let gx = x.mapv(|x| (x * alpha).tanh());
        let g_x = gx.mapv(|x| alpha * (A::one() - x.powi(2)));

        (gx, g_x.mean_axis(Axis(1)).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    const POINTS: [f64; 7] = [-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0];

    // the contrast function `G` itself
    fn objective(contrast: Contrast, u: f64) -> f64 {
        match contrast {
            Contrast::Logcosh(alpha) => (u * alpha).cosh().ln() / alpha,
            Contrast::Exp => -(-u * u / 2.).exp(),
            Contrast::Cube => u.powi(4) / 4.,
        }
    }

    // `g` has to be the derivative of `G` and the averaged `g'` the derivative of `g`
    fn check_derivatives(contrast: Contrast) {
        let eps = 1e-6;

        for &u in POINTS.iter() {
            let numerical_g = (objective(contrast, u + eps) - objective(contrast, u - eps)) / (2. * eps);
            let (g, _) = contrast.exec(&array![[u]]);
            assert_abs_diff_eq!(g[(0, 0)], numerical_g, epsilon = 1e-6);

            let (g_plus, _) = contrast.exec(&array![[u + eps]]);
            let (g_minus, _) = contrast.exec(&array![[u - eps]]);
            let numerical_dg = (g_plus[(0, 0)] - g_minus[(0, 0)]) / (2. * eps);
            let (_, dg) = contrast.exec(&array![[u]]);
            assert_abs_diff_eq!(dg[0], numerical_dg, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_logcosh_derivatives() {
        check_derivatives(Contrast::Logcosh(1.));
        check_derivatives(Contrast::Logcosh(1.7));
    }

    #[test]
    fn test_exp_derivatives() {
        check_derivatives(Contrast::Exp);
    }

    #[test]
    fn test_cube_derivatives() {
        check_derivatives(Contrast::Cube);
    }

    #[test]
    fn test_derivative_is_averaged_per_row() {
        let x = array![[1., -1., 2.], [0., 0., 0.]];
        let (gx, dg) = Contrast::Cube.exec(&x);

        assert_eq!(gx, array![[1., -1., 8.], [0., 0., 0.]]);
        assert_abs_diff_eq!(dg, array![6., 0.]);
    }

    #[test]
    fn test_alpha_range() {
        assert!(Contrast::Logcosh(1.).validate().is_ok());
        assert!(Contrast::Logcosh(2.).validate().is_ok());
        assert!(Contrast::Logcosh(0.5).validate().is_err());
        assert!(Contrast::Logcosh(10.).validate().is_err());
        assert!(Contrast::Cube.validate().is_ok());
    }
}
