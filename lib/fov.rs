//! Evaluation of a field-of-view profile expressed as a polynomial in k-space
//! radius,
//! ```text
//! FOV(r) = fov[0] + fov[1] r + fov[2] r² + ... + fov[n - 1] r^(n - 1)
//! ```
//!
//! ```
//! use vdspiral::fov::polyval;
//!
//! let (f, df) = polyval(&[24.0, -2.0, 0.5], 2.0);
//! assert_eq!(f, 24.0 - 4.0 + 2.0);
//! assert_eq!(df, -2.0 + 2.0);
//! ```

use num_traits::Float;

/// Evaluate a polynomial and its first derivative at `x`.
///
/// Terms are summed in order of increasing power, each computed directly as
/// `c[i] * x^i`, rather than by Horner's scheme.
///
/// An empty coefficient list evaluates to zero.
pub fn polyval<A>(coeffs: &[A], x: A) -> (A, A)
where A: Float
{
    coeffs.iter().enumerate()
        .fold((A::zero(), A::zero()), |(f, df), (i, &c)| {
            let n = A::from(i).unwrap_or_else(A::zero);
            let f = f + c * x.powf(n);
            let df
                = if i > 0 { df + n * c * x.powf(n - A::one()) } else { df };
            (f, df)
        })
}

/// Evaluate a polynomial at `x`.
pub fn fov_at<A>(coeffs: &[A], x: A) -> A
where A: Float
{
    polyval(coeffs, x).0
}

/// Evaluate the derivative of a polynomial at `x`.
pub fn dfov_at<A>(coeffs: &[A], x: A) -> A
where A: Float
{
    polyval(coeffs, x).1
}
