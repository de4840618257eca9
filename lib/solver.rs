//! Per-sample solution for the second time derivatives of k-space radius and
//! angle.
//!
//! At each sample, the trajectory is driven at whichever of two limits is
//! tighter: the gradient amplitude limit (the lesser of the hardware limit and
//! the FOV-implied limit set by the data sampling rate), or the slew-rate
//! limit. The latter requires the solution of a quadratic equation in the
//! radial acceleration; see [`docs`][crate::docs#slew-limited-motion] for the
//! derivation of its coefficients.

use log::trace;
use crate::{
    fov,
    units::{ GAMMA, PI },
};

/// Describes which constraint determined the radial acceleration for a single
/// solver step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Regime {
    /// The radial velocity exceeded its amplitude-limited maximum and is
    /// pulled back to it in one step.
    AmplitudeLimited,
    /// The radial acceleration was chosen so that the slew rate sits exactly
    /// at its maximum.
    SlewLimited,
    /// As for `SlewLimited`, but the quadratic had a negative discriminant and
    /// only the real part of its root was used.
    Degenerate,
}

impl Regime {
    /// Return `true` if `self` is `AmplitudeLimited`.
    pub fn is_amplitude_limited(&self) -> bool {
        matches!(self, Self::AmplitudeLimited)
    }

    /// Return `true` if `self` is `SlewLimited` or `Degenerate`.
    pub fn is_slew_limited(&self) -> bool {
        matches!(self, Self::SlewLimited | Self::Degenerate)
    }

    /// Return `true` if `self` is `Degenerate`.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

/// Second time derivatives of angle and radius for a single step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Derivatives {
    /// Angular acceleration (rad s^-2)
    pub thetadotdot: f64,
    /// Radial acceleration (cm^-1 s^-2)
    pub krdotdot: f64,
    /// Constraint that determined `krdotdot`.
    pub regime: Regime,
}

/// Maximum radial velocity permitted by a gradient amplitude `gmax` when the
/// angular velocity is tied to the radial velocity by an FOV of `fov` at radius
/// `kr`.
///
/// ```text
///                  (γ gmax)²
/// ṙ_max² = ---------------------
///          1 + (2π FOV kr / N)²
/// ```
pub fn max_krdot(gmax: f64, fov: f64, kr: f64, interleaves: usize) -> f64 {
    (
        (GAMMA * gmax).powi(2)
        / (1.0 + (2.0 * PI * fov * kr / interleaves as f64).powi(2))
    ).sqrt()
}

/// Roots of `a x² + b x + c = 0` split into the real part common to both,
/// `-b / 2a`, and the discriminant term `b² / 4a² - c / a` whose square root
/// is added to or subtracted from it.
fn quadratic_parts(a: f64, b: f64, c: f64) -> (f64, f64) {
    (-b / (2.0 * a), b * b / (4.0 * a * a) - c / a)
}

/// Compute the second derivatives of angle and radius for the current radius
/// `kr` and radial velocity `krdot`.
///
/// `fov` holds the coefficients of the FOV polynomial, lowest power first. The
/// gradient limit `grad_max` is further reduced at this step if the FOV
/// (through `data_sample_period`) demands it.
///
/// If the slew-limited quadratic turns out to have complex roots, the real
/// part of the larger root is used and the step is marked
/// [`Regime::Degenerate`].
#[allow(clippy::too_many_arguments)]
pub fn calc_derivatives(
    slew_max: f64,
    grad_max: f64,
    kr: f64,
    krdot: f64,
    grad_sample_period: f64,
    data_sample_period: f64,
    interleaves: usize,
    fov: &[f64],
) -> Derivatives
{
    let (fovval, dfovdr) = fov::polyval(fov, kr);

    let gmax_fov = 1.0 / GAMMA / fovval / data_sample_period;
    let gmax = if grad_max > gmax_fov { gmax_fov } else { grad_max };

    let maxkrdot = max_krdot(gmax, fovval, kr, interleaves);

    // 2π F / N and its square appear throughout
    let tpf = 2.0 * PI * fovval / interleaves as f64;
    let tpfsq = tpf.powi(2);

    let (krdotdot, regime)
        = if krdot > maxkrdot {
            ((maxkrdot - krdot) / grad_sample_period, Regime::AmplitudeLimited)
        } else {
            let krdotsq = krdot * krdot;
            let qa = 1.0 + tpfsq * kr * kr;
            let qb
                = 2.0 * tpfsq * kr * krdotsq
                + 2.0 * tpfsq / fovval * dfovdr * kr * kr * krdotsq;
            let qc
                = (tpfsq * kr * krdotsq).powi(2)
                + 4.0 * tpfsq * krdot.powi(4)
                + (tpf * dfovdr / fovval * kr * krdotsq).powi(2)
                + 4.0 * tpfsq * dfovdr / fovval * kr * krdot.powi(4)
                - (GAMMA * slew_max).powi(2);
            let (re, disc) = quadratic_parts(qa, qb, qc);
            trace!(
                "calc_derivatives: qa = {qa:e}, qb = {qb:e}, qc = {qc:e}, \
                re = {re:e}, disc = {disc:e}"
            );
            if disc < 0.0 {
                (re, Regime::Degenerate)
            } else {
                (re + disc.sqrt(), Regime::SlewLimited)
            }
        };

    let thetadotdot
        = tpf * dfovdr / fovval * krdot * krdot + tpf * krdotdot;
    trace!(
        "calc_derivatives: r = {kr:.4}, r' = {krdot:.4}, r'' = {krdotdot:e}, \
        q'' = {thetadotdot:e} ({regime:?})"
    );
    Derivatives { thetadotdot, krdotdot, regime }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    const S: f64 = 15000.0;
    const T: f64 = 1e-6;
    const TD: f64 = 4e-6;

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn starts_at_full_slew() {
        let d = calc_derivatives(S, 4.0, 0.0, 0.0, T, TD, 40, &[24.0]);
        check!(d.regime == Regime::SlewLimited);
        check!(rel_close(d.krdotdot, GAMMA * S, 1e-12));
        let tpf = 2.0 * PI * 24.0 / 40.0;
        check!(rel_close(d.thetadotdot, tpf * GAMMA * S, 1e-12));
    }

    #[test]
    fn constant_fov_closed_form() {
        let f = 24.0;
        let n = 16;
        let tpf = 2.0 * PI * f / n as f64;
        let tpfsq = tpf * tpf;
        for (kr, krdot) in [(0.1, 100.0), (0.5, 1000.0), (0.8, 600.0)] {
            let d = calc_derivatives(S, 4.0, kr, krdot, T, TD, n, &[f]);
            check!(d.regime == Regime::SlewLimited);
            let a = 1.0 + tpfsq * kr * kr;
            let b = 2.0 * tpfsq * kr * krdot * krdot;
            let c
                = (tpfsq * kr * krdot * krdot).powi(2)
                + 4.0 * tpfsq * krdot.powi(4)
                - (GAMMA * S).powi(2);
            let expected = (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a);
            check!(rel_close(d.krdotdot, expected, 1e-9));
            check!(rel_close(d.thetadotdot, tpf * d.krdotdot, 1e-12));
        }
    }

    #[test]
    fn slew_limited_step_meets_slew() {
        // with thetadot = tpf * krdot and the chosen accelerations, the
        // magnitude of d²k/dt² must equal γ S
        let f = 24.0;
        let n = 16;
        let tpf = 2.0 * PI * f / n as f64;
        let (kr, krdot) = (0.6, 800.0);
        let d = calc_derivatives(S, 4.0, kr, krdot, T, TD, n, &[f]);
        let thetadot = tpf * krdot;
        let radial = d.krdotdot - kr * thetadot.powi(2);
        let tangential = 2.0 * krdot * thetadot + kr * d.thetadotdot;
        let accel = (radial.powi(2) + tangential.powi(2)).sqrt();
        check!(rel_close(accel, GAMMA * S, 1e-6));
    }

    #[test]
    fn amplitude_limited_pulls_back() {
        let (f, n, kr) = (24.0, 40, 1.0);
        let gmax = crate::units::fov_limited_gradient(f, TD).min(4.0);
        let vmax = max_krdot(gmax, f, kr, n);
        let krdot = 1.5 * vmax;
        let d = calc_derivatives(S, 4.0, kr, krdot, T, TD, n, &[f]);
        check!(d.regime == Regime::AmplitudeLimited);
        check!(rel_close(krdot + d.krdotdot * T, vmax, 1e-9));
    }

    #[test]
    fn fov_limit_tightens_gradient() {
        // a long data sampling period lowers the effective gradient limit
        let (f, n, kr) = (24.0, 40, 1.0);
        let slow = crate::units::fov_limited_gradient(f, 1e-4);
        let krdot = 0.5 * (max_krdot(slow, f, kr, n) + max_krdot(4.0, f, kr, n));
        let d = calc_derivatives(S, 4.0, kr, krdot, T, 1e-4, n, &[f]);
        check!(d.regime.is_amplitude_limited());
        let d = calc_derivatives(S, 4.0, kr, krdot, T, 1e-9, n, &[f]);
        check!(d.regime.is_slew_limited());
    }

    #[test]
    fn negative_discriminant_uses_real_part() {
        // a tiny slew limit with a fast-moving trajectory and no amplitude
        // limit to speak of
        let d = calc_derivatives(1.0, 1e6, 0.0, 1000.0, T, 1e-12, 1, &[24.0]);
        check!(d.regime == Regime::Degenerate);
        check!(d.regime.is_degenerate());
        check!(d.krdotdot == 0.0);
    }

    #[test]
    fn variable_fov_angular_term() {
        let fov = [24.0, -3.0];
        let n = 16;
        let (kr, krdot) = (1.0, 1000.0);
        let d = calc_derivatives(S, 4.0, kr, krdot, T, TD, n, &fov);
        let f = 21.0;
        let tpf = 2.0 * PI * f / n as f64;
        let expected = tpf * (-3.0) / f * krdot * krdot + tpf * d.krdotdot;
        check!(rel_close(d.thetadotdot, expected, 1e-12));
    }
}
