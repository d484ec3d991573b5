//! `unmix-datasets` provides synthetic signals ready to be used in tests and benchmarks.
//!
//! ## The Big Picture
//!
//! `unmix-datasets` is a crate in the `unmix` workspace. Separation algorithms are judged on
//! mixtures of sources whose ground truth is known, so this crate generates such sources
//! (periodic waveforms and random noise) and mixes them.
//!
//! ## Using a signal
//!
//! ```
//! use ndarray::{array, stack, Axis};
//! use unmix_datasets::generate;
//!
//! let sources = stack![
//!     Axis(0),
//!     generate::sine(1000, 2.0),
//!     generate::sawtooth(1000, 1.5)
//! ];
//! let mixture = generate::mix(&array![[1., 1.], [0.5, 2.]], &sources);
//! assert_eq!(mixture.dim(), (2, 1000));
//! ```

pub mod generate;
