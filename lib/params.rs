//! Design parameters for a single spiral interleave.

use serde::{ Deserialize, Serialize };
use crate::{
    error::InputError,
    fov,
    units,
};

/// Complete set of inputs to [`calc_vds`][crate::integrate::calc_vds].
///
/// Field names follow the keys of a parameter file, so this type can be
/// deserialized directly from e.g. TOML:
/// ```text
/// slew_max = 15000.0
/// grad_max = 4.0
/// grad_sample_period = 1e-6
/// data_sample_period = 4e-6
/// interleaves = 40
/// fov = [24.0]
/// max_radius = 5.0
/// max_samples = 100000
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VdsParams {
    /// Maximum slew rate (G/cm/s).
    pub slew_max: f64,
    /// Maximum gradient amplitude (G/cm).
    pub grad_max: f64,
    /// Gradient sampling period (s), also the integration step.
    pub grad_sample_period: f64,
    /// Data (acquisition) sampling period (s).
    pub data_sample_period: f64,
    /// Number of interleaves.
    pub interleaves: usize,
    /// FOV polynomial coefficients (cm, cm², ...), lowest power first.
    pub fov: Vec<f64>,
    /// k-space radius at which to stop (cm⁻¹).
    pub max_radius: f64,
    /// Hard cap on the number of gradient samples.
    pub max_samples: usize,
}

impl VdsParams {
    /// Construct with the target radius given by a spatial resolution (cm)
    /// instead of a k-space radius.
    #[allow(clippy::too_many_arguments)]
    pub fn from_resolution(
        slew_max: f64,
        grad_max: f64,
        grad_sample_period: f64,
        data_sample_period: f64,
        interleaves: usize,
        fov: Vec<f64>,
        resolution: f64,
        max_samples: usize,
    ) -> Self {
        Self {
            slew_max,
            grad_max,
            grad_sample_period,
            data_sample_period,
            interleaves,
            fov,
            max_radius: units::kmax_from_resolution(resolution),
            max_samples,
        }
    }

    /// Check that all parameters describe a physically meaningful design.
    ///
    /// This rejects an empty or non-finite FOV polynomial, a non-positive FOV
    /// at the k-space origin or at the target radius, zero interleaves,
    /// non-positive sampling periods, and negative (or non-finite) limits and
    /// target radius.
    ///
    /// The FOV is only checked at the two ends of `[0, max_radius]`; a
    /// polynomial that dips to zero or below in between and recovers before
    /// the target radius is not caught.
    pub fn validate(&self) -> Result<(), InputError> {
        InputError::check_limit("slew_max", self.slew_max)?;
        InputError::check_limit("grad_max", self.grad_max)?;
        InputError::check_period("grad_sample_period", self.grad_sample_period)?;
        InputError::check_period("data_sample_period", self.data_sample_period)?;
        if self.interleaves == 0 {
            return Err(InputError::BadInterleaves(self.interleaves));
        }
        let f0 = *self.fov.first().ok_or(InputError::EmptyFov)?;
        self.fov.iter()
            .try_for_each(|&c| InputError::check_finite("fov", c))?;
        if f0 <= 0.0 { return Err(InputError::NonPositiveFov(f0)); }
        InputError::check_finite("max_radius", self.max_radius)?;
        if self.max_radius < 0.0 {
            return Err(InputError::NegativeRadius(self.max_radius));
        }
        let f_end = fov::fov_at(&self.fov, self.max_radius);
        if f_end <= 0.0 || f_end.is_nan() {
            return Err(
                InputError::NonPositiveFovAtRadius(self.max_radius, f_end));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{ check, let_assert };

    fn base() -> VdsParams {
        VdsParams {
            slew_max: 15000.0,
            grad_max: 4.0,
            grad_sample_period: 1e-6,
            data_sample_period: 4e-6,
            interleaves: 40,
            fov: vec![24.0],
            max_radius: 5.0,
            max_samples: 100_000,
        }
    }

    #[test]
    fn accepts_reference() {
        check!(base().validate().is_ok());
    }

    #[test]
    fn accepts_zero_limits() {
        let params = VdsParams { slew_max: 0.0, grad_max: 0.0, ..base() };
        check!(params.validate().is_ok());
    }

    #[test]
    fn rejects_empty_fov() {
        let params = VdsParams { fov: Vec::new(), ..base() };
        let_assert!(Err(InputError::EmptyFov) = params.validate());
    }

    #[test]
    fn rejects_nonpositive_fov() {
        let params = VdsParams { fov: vec![0.0, 1.0], ..base() };
        let_assert!(Err(InputError::NonPositiveFov(f)) = params.validate());
        check!(f == 0.0);
    }

    #[test]
    fn rejects_fov_negative_at_target_radius() {
        // 24 - 6 r crosses zero at r = 4
        let params = VdsParams { fov: vec![24.0, -6.0], ..base() };
        let_assert!(
            Err(InputError::NonPositiveFovAtRadius(r, f)) = params.validate());
        check!(r == 5.0);
        check!(f == -6.0);
        let params = VdsParams { max_radius: 3.0, ..params };
        check!(params.validate().is_ok());
    }

    #[test]
    fn rejects_nan_fov() {
        let params = VdsParams { fov: vec![24.0, f64::NAN], ..base() };
        let_assert!(Err(InputError::NonFinite("fov")) = params.validate());
    }

    #[test]
    fn rejects_zero_interleaves() {
        let params = VdsParams { interleaves: 0, ..base() };
        let_assert!(Err(InputError::BadInterleaves(0)) = params.validate());
    }

    #[test]
    fn rejects_bad_periods() {
        let params = VdsParams { grad_sample_period: 0.0, ..base() };
        let_assert!(
            Err(InputError::BadPeriod("grad_sample_period", _))
                = params.validate()
        );
        let params = VdsParams { data_sample_period: -4e-6, ..base() };
        let_assert!(
            Err(InputError::BadPeriod("data_sample_period", _))
                = params.validate()
        );
        let params = VdsParams { data_sample_period: f64::INFINITY, ..base() };
        let_assert!(
            Err(InputError::NonFinite("data_sample_period"))
                = params.validate()
        );
    }

    #[test]
    fn rejects_negative_limits() {
        let params = VdsParams { slew_max: -1.0, ..base() };
        let_assert!(
            Err(InputError::NegativeLimit("slew_max", _)) = params.validate());
        let params = VdsParams { grad_max: -4.0, ..base() };
        let_assert!(
            Err(InputError::NegativeLimit("grad_max", _)) = params.validate());
    }

    #[test]
    fn rejects_negative_radius() {
        let params = VdsParams { max_radius: -5.0, ..base() };
        let_assert!(Err(InputError::NegativeRadius(_)) = params.validate());
    }

    #[test]
    fn from_resolution() {
        let params = VdsParams::from_resolution(
            15000.0, 4.0, 1e-6, 4e-6, 40, vec![24.0], 0.1, 100_000);
        check!(params == base());
    }

    #[test]
    fn from_toml() {
        let src = r#"
            slew_max = 15000.0
            grad_max = 4.0
            grad_sample_period = 1e-6
            data_sample_period = 4e-6
            interleaves = 40
            fov = [24.0]
            max_radius = 5.0
            max_samples = 100000
        "#;
        let_assert!(Ok(params) = toml::from_str::<VdsParams>(src));
        check!(params == base());
    }
}
