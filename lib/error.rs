//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Two conditions that a design may run into are deliberately *not* errors:
//! negative discriminants in the slew-limited solver step are recovered locally
//! and counted (see [`Spiral::degenerate_steps`][crate::integrate::Spiral::degenerate_steps]),
//! and running out of samples before the target radius is reached is reported
//! through [`Termination`][crate::integrate::Termination].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        Self::check_len(a.len(), b.len())
    }

    pub(crate) fn check_len(na: usize, nb: usize) -> Result<(), Self> {
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when design parameters are rejected before integration begins.
#[derive(Debug, Error)]
pub enum InputError {
    /// Returned when the FOV polynomial has no coefficients.
    #[error("FOV polynomial must have at least one coefficient")]
    EmptyFov,

    /// Returned when the FOV at the k-space origin (`fov[0]`) is not positive.
    #[error("FOV at the k-space origin must be greater than 0; got {0}")]
    NonPositiveFov(f64),

    /// Returned when the FOV at the target k-space radius is not positive.
    #[error("FOV at k-space radius {0} must be greater than 0; got {1}")]
    NonPositiveFovAtRadius(f64, f64),

    /// Returned when a parameter is NaN or infinite.
    #[error("{0} must be finite")]
    NonFinite(&'static str),

    /// Returned when the number of interleaves is zero.
    #[error("number of interleaves must be greater than 0; got {0}")]
    BadInterleaves(usize),

    /// Returned when a sampling period is not positive.
    #[error("{0} must be greater than 0; got {1}")]
    BadPeriod(&'static str, f64),

    /// Returned when a gradient or slew limit is negative.
    #[error("{0} must be non-negative; got {1}")]
    NegativeLimit(&'static str, f64),

    /// Returned when the target k-space radius is negative.
    #[error("maximum k-space radius must be non-negative; got {0}")]
    NegativeRadius(f64),
}

impl InputError {
    pub(crate) fn check_finite(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        val.is_finite().then_some(()).ok_or(Self::NonFinite(name))
    }

    pub(crate) fn check_period(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        Self::check_finite(name, val)?;
        (val > 0.0).then_some(()).ok_or(Self::BadPeriod(name, val))
    }

    pub(crate) fn check_limit(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        Self::check_finite(name, val)?;
        (val >= 0.0).then_some(()).ok_or(Self::NegativeLimit(name, val))
    }
}

/// Returned from waveform design and waveform I/O functions.
#[derive(Debug, Error)]
pub enum VdsError {
    /// [`InputError`]
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// Returned when reading or writing a waveform file fails.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
