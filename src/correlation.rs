//! Correlation analysis between signal matrices
//!
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

use crate::error::{Error, Result};
use crate::Float;

/// Center every row and return it together with the row norms
fn centered_rows<F: Float, D: Data<Elem = F>>(x: &ArrayBase<D, Ix2>) -> (Array2<F>, Array1<F>) {
    // callers reject empty sample axes before getting here
    let mean = x.mean_axis(Axis(1)).unwrap();
    let centered = x - &mean.insert_axis(Axis(1));
    let norms = centered
        .rows()
        .into_iter()
        .map(|row| row.dot(&row).sqrt())
        .collect();

    (centered, norms)
}

/// Pearson correlation between every row of `a` and every row of `b`
///
/// Entry `(i, j)` of the returned matrix is the correlation coefficient between signal `i` of
/// `a` and signal `j` of `b`. Both matrices must hold the same number of samples. Constant rows
/// have no defined correlation and produce zero entries.
pub fn cross_correlation<F: Float, D1: Data<Elem = F>, D2: Data<Elem = F>>(
    a: &ArrayBase<D1, Ix2>,
    b: &ArrayBase<D2, Ix2>,
) -> Result<Array2<F>> {
    if a.ncols() != b.ncols() {
        return Err(Error::MismatchedShapes(format!(
            "cannot correlate signals of {} and {} samples",
            a.ncols(),
            b.ncols()
        )));
    }
    if a.ncols() < 2 {
        return Err(Error::NotEnoughSamples);
    }

    let (a, a_norms) = centered_rows(a);
    let (b, b_norms) = centered_rows(b);

    let mut corr = a.dot(&b.t());
    for ((i, j), val) in corr.indexed_iter_mut() {
        let denom = a_norms[i] * b_norms[j];
        *val = if denom > F::zero() {
            *val / denom
        } else {
            F::zero()
        };
    }

    Ok(corr)
}
