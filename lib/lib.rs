//! Provides functions and higher-level constructs for the design of
//! variable-density spiral gradient waveforms for MRI, subject to a maximum
//! gradient amplitude, a maximum slew rate, and a field-of-view (FOV) that may
//! vary as a polynomial in k-space radius.
//!
//! The design proceeds by fixed-step explicit Euler integration of the
//! trajectory radius and angle, where at every sample the second derivatives
//! are chosen so that the trajectory sits exactly at the tighter of the
//! amplitude and slew-rate limits:
//! - [`solver`]: per-sample second derivatives of radius and angle
//! - [`integrate`]: two-pass integration into a gradient waveform
//! - [`waveform`]: k-space, slew, timing, and interleave rotation derived from
//!   a gradient waveform
//!
//! See [`docs`] for the derivation.
//!
//! ```
//! use vdspiral::{ integrate, params::VdsParams };
//!
//! let params = VdsParams {
//!     slew_max: 15000.0,
//!     grad_max: 4.0,
//!     grad_sample_period: 4e-6,
//!     data_sample_period: 4e-6,
//!     interleaves: 16,
//!     fov: vec![24.0],
//!     max_radius: 2.0,
//!     max_samples: 100_000,
//! };
//! let spiral = integrate::calc_vds(&params).unwrap();
//! assert!(spiral.is_complete());
//! assert!(spiral.final_radius() >= 2.0);
//! ```

pub mod error;
pub mod fov;
pub mod integrate;
pub mod io;
pub mod params;
pub mod solver;
pub mod units;
pub mod waveform;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
