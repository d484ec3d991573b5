//! Provide traits for different classes of algorithms
//!

use crate::records::Records;
use std::convert::From;

/// Transformation algorithms
///
/// A transformer takes a set of records and transforms them into a different representation,
/// for example projecting mixtures into whitened space or recovering their sources.
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a record matrix and creates a concept of some kind about it. For
/// example FastICA learns the whitening transform of a mixture and, once optimized, the
/// unmixing matrix recovering its sources.
pub trait Fit<R: Records, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, records: &R) -> Result<Self::Object, E>;
}
