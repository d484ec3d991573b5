//! Error types in unmix
//!

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("mismatched shapes: {0}")]
    MismatchedShapes(String),
    #[error("signal {0} is constant and cannot be standardized")]
    ConstantSignal(usize),
    #[error("Not enough samples to compute the mean")]
    NotEnoughSamples,
}
