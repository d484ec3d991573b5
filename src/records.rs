use crate::Float;
use ndarray::{ArrayBase, Axis, Data, Ix2};

/// Signal records
///
/// A record matrix stores one signal per row and one sample per column.
pub trait Records: Sized {
    type Elem;

    /// Number of signals (rows)
    fn nsignals(&self) -> usize;
    /// Number of samples per signal (columns)
    fn nsamples(&self) -> usize;
}

/// Implement records for NdArrays
impl<F: Float, S: Data<Elem = F>> Records for ArrayBase<S, Ix2> {
    type Elem = F;

    fn nsignals(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn nsamples(&self) -> usize {
        self.len_of(Axis(1))
    }
}

/// Implement records for references
impl<R: Records> Records for &R {
    type Elem = R::Elem;

    fn nsignals(&self) -> usize {
        (*self).nsignals()
    }

    fn nsamples(&self) -> usize {
        (*self).nsamples()
    }
}
