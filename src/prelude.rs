//! unmix prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::{Float, ParamGuard, Records};

#[doc(no_inline)]
pub use crate::metrics_separation::{SeparationMetrics, SourceMatch};

#[doc(no_inline)]
pub use crate::correlation::cross_correlation;
