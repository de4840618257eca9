//! Fixed-step integration of the spiral design equations into a gradient
//! waveform.
//!
//! Integration runs twice over identical inputs: once to find the number of
//! samples needed to reach the target radius (or the sample cap), and once to
//! fill arrays allocated to exactly that length. Both passes share a single
//! loop, so they traverse identical states.

use log::{ debug, info, warn };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ LengthError, VdsError },
    params::VdsParams,
    solver::{ calc_derivatives, Derivatives },
    units::GAMMA,
    waveform,
};

pub type VdsResult<T> = Result<T, VdsError>;

/// Describes how an integration run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The trajectory reached the target k-space radius.
    Completed,
    /// The sample cap was reached first; the trajectory stops short of the
    /// target radius.
    Truncated,
}

impl Termination {
    /// Return `true` if `self` is `Completed`.
    pub fn is_completed(&self) -> bool { matches!(self, Self::Completed) }

    /// Return `true` if `self` is `Truncated`.
    pub fn is_truncated(&self) -> bool { matches!(self, Self::Truncated) }
}

/// Radius and angle of the trajectory, with their first time derivatives.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct State {
    /// k-space radius (cm^-1)
    pub kr: f64,
    /// Radial velocity (cm^-1 s^-1)
    pub krdot: f64,
    /// k-space angle (rad)
    pub theta: f64,
    /// Angular velocity (rad s^-1)
    pub thetadot: f64,
}

impl State {
    /// Advance by one explicit Euler step of size `dt`.
    ///
    /// Velocities are updated first and the updated values are used to
    /// advance the positions.
    pub fn step(&mut self, d: &Derivatives, dt: f64) {
        self.thetadot += d.thetadotdot * dt;
        self.theta += self.thetadot * dt;
        self.krdot += d.krdotdot * dt;
        self.kr += self.krdot * dt;
    }

    /// Cartesian k-space position `kx + i ky`.
    pub fn k(&self) -> C64 { C64::from_polar(self.kr, self.theta) }
}

// outcome of a single pass
#[derive(Copy, Clone, Debug)]
struct Pass {
    count: usize,
    last: State,
    degenerate: usize,
}

// run the integration loop from the zero state, handing each post-step state
// to `sink` along with its sample index
fn run_pass<F>(params: &VdsParams, mut sink: F) -> Pass
where F: FnMut(usize, &State)
{
    let dt = params.grad_sample_period;
    let mut state = State::default();
    let mut count: usize = 0;
    let mut degenerate: usize = 0;
    while state.kr < params.max_radius && count < params.max_samples {
        let d = calc_derivatives(
            params.slew_max,
            params.grad_max,
            state.kr,
            state.krdot,
            dt,
            params.data_sample_period,
            params.interleaves,
            &params.fov,
        );
        if d.regime.is_degenerate() {
            degenerate += 1;
            debug!(
                "integrate::calc_vds: complex root at sample {count} \
                (kr = {:.6}); using its real part",
                state.kr,
            );
        }
        state.step(&d, dt);
        sink(count, &state);
        count += 1;
    }
    Pass { count, last: state, degenerate }
}

/// Compute the number of gradient samples [`calc_vds`] will produce for a set
/// of parameters, without storing the waveform.
pub fn sample_count(params: &VdsParams) -> VdsResult<usize> {
    params.validate()?;
    Ok(run_pass(params, |_, _| { }).count)
}

/// A single designed spiral interleave.
///
/// Usually only returned by [`calc_vds`]; all arrays have the same length, one
/// entry per gradient sample.
#[derive(Clone, Debug)]
pub struct Spiral {
    // x-gradient (G/cm)
    gx: nd::Array1<f64>,
    // y-gradient (G/cm)
    gy: nd::Array1<f64>,
    // k-space radius at the end of each sample (cm^-1)
    kr: nd::Array1<f64>,
    // k-space angle at the end of each sample (rad)
    theta: nd::Array1<f64>,
    // gradient sampling period (s)
    dt: f64,
    termination: Termination,
    degenerate: usize,
}

impl Spiral {
    /// Number of gradient samples.
    pub fn len(&self) -> usize { self.gx.len() }

    /// Return `true` if no samples were produced.
    pub fn is_empty(&self) -> bool { self.gx.is_empty() }

    /// x-component of the gradient waveform (G/cm).
    pub fn gx(&self) -> &nd::Array1<f64> { &self.gx }

    /// y-component of the gradient waveform (G/cm).
    pub fn gy(&self) -> &nd::Array1<f64> { &self.gy }

    /// Designed k-space radius at the end of each sample (cm^-1).
    pub fn kr(&self) -> &nd::Array1<f64> { &self.kr }

    /// Designed k-space angle at the end of each sample (rad).
    pub fn theta(&self) -> &nd::Array1<f64> { &self.theta }

    /// Gradient sampling period (s).
    pub fn dt(&self) -> f64 { self.dt }

    /// How the design ended.
    pub fn termination(&self) -> Termination { self.termination }

    /// Return `true` if the target radius was reached.
    pub fn is_complete(&self) -> bool { self.termination.is_completed() }

    /// Number of solver steps in which the slew-limited quadratic had complex
    /// roots and only their real part was used.
    pub fn degenerate_steps(&self) -> usize { self.degenerate }

    /// k-space radius reached at the last sample, or zero if there are no
    /// samples.
    pub fn final_radius(&self) -> f64 {
        self.kr.last().copied().unwrap_or(0.0)
    }

    /// Gradient waveform as `gx + i gy` (G/cm).
    pub fn gradient(&self) -> nd::Array1<C64> {
        nd::Zip::from(&self.gx).and(&self.gy)
            .map_collect(|x, y| C64::new(*x, *y))
    }

    /// Designed k-space trajectory as `kx + i ky` (cm^-1).
    pub fn kspace(&self) -> nd::Array1<C64> {
        nd::Zip::from(&self.kr).and(&self.theta)
            .map_collect(|r, q| C64::from_polar(*r, *q))
    }

    /// Slew-rate waveform `(sx, sy)` (G/cm/s).
    pub fn slew(&self) -> (nd::Array1<f64>, nd::Array1<f64>) {
        waveform::slew_unchecked(&self.gx, &self.gy, self.dt)
    }

    /// Time at the end of each gradient sample (s).
    pub fn time(&self) -> nd::Array1<f64> {
        waveform::time_axis(self.len(), self.dt)
    }

    /// All `count` interleaves of the design, one per row, each rotated from
    /// the last by `2π / count`.
    pub fn interleaves(&self, count: usize) -> nd::Array2<C64> {
        waveform::interleaves(&self.gradient(), count)
    }

    /// Take ownership of the gradient components `(gx, gy)`.
    pub fn into_parts(self) -> (nd::Array1<f64>, nd::Array1<f64>) {
        (self.gx, self.gy)
    }
}

/// Design a variable-density spiral gradient waveform for a single interleave.
///
/// Parameters are [validated][VdsParams::validate] before integration begins.
/// The returned waveform holds exactly as many samples as are needed for the
/// radius to reach `params.max_radius`, or `params.max_samples` samples if
/// that comes first (in which case the result is marked
/// [`Termination::Truncated`]).
///
/// The gradient at each sample is the finite difference of consecutive k-space
/// positions, starting from the origin, divided by `γ dt`.
pub fn calc_vds(params: &VdsParams) -> VdsResult<Spiral> {
    params.validate()?;
    let dt = params.grad_sample_period;

    debug!("integrate::calc_vds: sizing pass");
    let sizing = run_pass(params, |_, _| { });
    let n = sizing.count;
    debug!("integrate::calc_vds: allocating for {n} gradient samples");

    let mut gx: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut gy: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut kr: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut theta: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut k_prev = C64::new(0.0, 0.0);
    let scale = 1.0 / GAMMA / dt;

    debug!("integrate::calc_vds: fill pass");
    let fill
        = run_pass(params, |i, state| {
            if i >= n { return; }
            let k = state.k();
            gx[i] = scale * (k.re - k_prev.re);
            gy[i] = scale * (k.im - k_prev.im);
            kr[i] = state.kr;
            theta[i] = state.theta;
            k_prev = k;
        });
    LengthError::check_len(sizing.count, fill.count)?;

    let termination
        = if fill.last.kr >= params.max_radius {
            Termination::Completed
        } else {
            info!(
                "integrate::calc_vds: sample cap ({}) reached at kr = {:.6}, \
                short of {:.6}",
                params.max_samples, fill.last.kr, params.max_radius,
            );
            Termination::Truncated
        };
    if fill.degenerate > 0 {
        warn!(
            "integrate::calc_vds: {} of {n} steps used the real part of a \
            complex root",
            fill.degenerate,
        );
    }

    Ok(Spiral {
        gx,
        gy,
        kr,
        theta,
        dt,
        termination,
        degenerate: fill.degenerate,
    })
}

/// Thin interface to [`calc_vds`] taking bare parameters and returning only the
/// gradient components `(gx, gy)`.
#[allow(clippy::too_many_arguments)]
pub fn calc_vds_raw(
    slew_max: f64,
    grad_max: f64,
    grad_sample_period: f64,
    data_sample_period: f64,
    interleaves: usize,
    fov: &[f64],
    max_radius: f64,
    max_samples: usize,
) -> VdsResult<(nd::Array1<f64>, nd::Array1<f64>)>
{
    let params = VdsParams {
        slew_max,
        grad_max,
        grad_sample_period,
        data_sample_period,
        interleaves,
        fov: fov.to_vec(),
        max_radius,
        max_samples,
    };
    calc_vds(&params).map(Spiral::into_parts)
}
