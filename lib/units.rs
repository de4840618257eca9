//! Fixed constants and conversions between the CGS-style units used throughout
//! this crate (G/cm, G/cm/s, cm⁻¹) and the SI-style units more common on
//! scanner consoles (mT/m, T/m/s, m⁻¹).
//!
//! The values of [`GAMMA`] and [`PI`] are deliberately truncated; waveforms
//! (and in particular their lengths) depend on them exactly.

/// Gyromagnetic ratio of ¹H (Hz G^-1)
pub const GAMMA: f64 = 4258.0;
//                 truncated from 4257.7478

/// π, truncated
pub const PI: f64 = 3.141592;

/// 1 G/cm in mT/m
pub const G_CM_TO_MT_M: f64 = 10.0;

/// 1 G/cm/s in T/m/s
pub const G_CM_S_TO_T_M_S: f64 = 0.01;

/// Convert a gradient amplitude from G/cm to mT/m.
pub fn gauss_cm_to_mt_m(g: f64) -> f64 { g * G_CM_TO_MT_M }

/// Convert a gradient amplitude from mT/m to G/cm.
pub fn mt_m_to_gauss_cm(g: f64) -> f64 { g / G_CM_TO_MT_M }

/// Convert a slew rate from G/cm/s to T/m/s.
pub fn gauss_cm_s_to_t_m_s(s: f64) -> f64 { s * G_CM_S_TO_T_M_S }

/// Convert a slew rate from T/m/s to G/cm/s.
pub fn t_m_s_to_gauss_cm_s(s: f64) -> f64 { s / G_CM_S_TO_T_M_S }

/// Maximum k-space radius (cm⁻¹) needed for a given spatial resolution (cm).
///
/// ```text
/// kmax = 1 / (2 * resolution)
/// ```
pub fn kmax_from_resolution(resolution: f64) -> f64 {
    (2.0 * resolution).recip()
}

/// FOV-limited gradient amplitude (G/cm) for a given FOV (cm) and data
/// sampling period (s).
///
/// Above this amplitude, consecutive data samples are spaced further than
/// `1 / FOV` apart in k-space.
pub fn fov_limited_gradient(fov: f64, data_sample_period: f64) -> f64 {
    1.0 / GAMMA / fov / data_sample_period
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn conversions_invert() {
        check!((mt_m_to_gauss_cm(gauss_cm_to_mt_m(4.0)) - 4.0).abs() < 1e-12);
        check!((gauss_cm_s_to_t_m_s(15000.0) - 150.0).abs() < 1e-9);
        check!((t_m_s_to_gauss_cm_s(150.0) - 15000.0).abs() < 1e-9);
    }

    #[test]
    fn resolution_to_radius() {
        // 1 mm resolution
        check!((kmax_from_resolution(0.1) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn fov_limit() {
        let g = fov_limited_gradient(24.0, 4e-6);
        check!((g - 2.446375).abs() < 1e-6);
    }
}
