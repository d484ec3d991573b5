use crate::Float;
use ndarray::{ArrayBase, Data, Dimension, OwnedRepr, ViewRepr};

/// Add the LAPACK trait bounds of [`Float::Lapack`] to an array
pub trait WithLapack<D: Data + WithLapackData, I: Dimension> {
    fn with_lapack(self) -> ArrayBase<D::D, I>;
}

impl<F: Float, D, I> WithLapack<D, I> for ArrayBase<D, I>
where
    D: Data<Elem = F> + WithLapackData,
    I: Dimension,
{
    fn with_lapack(self) -> ArrayBase<D::D, I> {
        D::with_lapack(self)
    }
}

/// Remove the LAPACK trait bounds again, returning to the plain [`Float`] element
pub trait WithoutLapack<F: Float, D: Data + WithoutLapackData<F>, I: Dimension> {
    fn without_lapack(self) -> ArrayBase<D::D, I>;
}

impl<F: Float, D, I> WithoutLapack<F, D, I> for ArrayBase<D, I>
where
    D: Data<Elem = F::Lapack> + WithoutLapackData<F>,
    I: Dimension,
{
    fn without_lapack(self) -> ArrayBase<D::D, I> {
        D::without_lapack(self)
    }
}

pub trait WithLapackData
where
    Self: Data,
{
    type D: Data;

    /// Add trait bound `Lapack` and `Scalar` to NdArray's floating point
    ///
    /// This is safe, because only implemented for D == Self
    fn with_lapack<I>(x: ArrayBase<Self, I>) -> ArrayBase<Self::D, I>
    where
        I: Dimension,
    {
        unsafe {
            let ret = std::ptr::read(&x as *const ArrayBase<Self, I> as *const ArrayBase<Self::D, I>);
            std::mem::forget(x);
            ret
        }
    }
}

impl<F: Float> WithLapackData for OwnedRepr<F> {
    type D = OwnedRepr<F::Lapack>;
}

impl<'a, F: Float> WithLapackData for ViewRepr<&'a F> {
    type D = ViewRepr<&'a F::Lapack>;
}

pub trait WithoutLapackData<F: Float>
where
    Self: Data,
{
    type D: Data<Elem = F>;

    /// Remove trait bound `Lapack` and `Scalar` from NdArray's floating point
    ///
    /// This is safe, because only implemented for D == Self
    fn without_lapack<I>(x: ArrayBase<Self, I>) -> ArrayBase<Self::D, I>
    where
        I: Dimension,
    {
        unsafe {
            let ret = std::ptr::read(&x as *const ArrayBase<Self, I> as *const ArrayBase<Self::D, I>);
            std::mem::forget(x);
            ret
        }
    }
}

impl<F: Float> WithoutLapackData<F> for OwnedRepr<F::Lapack> {
    type D = OwnedRepr<F>;
}

impl<'a, F: Float> WithoutLapackData<F> for ViewRepr<&'a F::Lapack> {
    type D = ViewRepr<&'a F>;
}

#[cfg(test)]
mod tests {
    use super::{WithLapack, WithoutLapack};
    use ndarray::array;

    #[test]
    fn lapack_roundtrip_keeps_values() {
        let x = array![[1.0f64, 2.0], [3.0, 4.0]];
        let y = x.clone().with_lapack();
        let z = WithoutLapack::<f64, _, _>::without_lapack(y);
        assert_eq!(x, z);

        let view = x.view().with_lapack();
        assert_eq!(view[(1, 0)], 3.0);
    }
}
