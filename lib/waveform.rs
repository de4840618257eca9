//! Quantities derived from a sampled gradient waveform.
//!
//! Gradient samples are taken to be constant over each sampling period, and
//! sample `n` to end at time `(n + 1) dt`; the k-space position at the end of
//! sample `n` is then `γ dt Σ_{m ≤ n} g[m]`.

use std::f64::consts::TAU;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::LengthError,
    units::GAMMA,
};

// return an array of differences between adjacent elements of a source array,
// taking the element before the first to be zero
fn array_diff_from_zero<S>(a: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    a.iter().scan(0.0, |prev, ak| {
        let d = *ak - *prev;
        *prev = *ak;
        Some(d)
    })
    .collect()
}

/// Time at the end of each of `n` samples of period `dt`.
pub fn time_axis(n: usize, dt: f64) -> nd::Array1<f64> {
    (1..=n).map(|k| k as f64 * dt).collect()
}

/// Combine gradient components into `gx + i gy`.
pub fn to_complex<S, T>(gx: &Arr1<S>, gy: &Arr1<T>)
    -> Result<nd::Array1<C64>, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(gx, gy)?;
    Ok(nd::Zip::from(gx).and(gy).map_collect(|x, y| C64::new(*x, *y)))
}

/// Pointwise magnitude of a two-component waveform.
pub fn magnitude<S, T>(gx: &Arr1<S>, gy: &Arr1<T>)
    -> Result<nd::Array1<f64>, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(gx, gy)?;
    Ok(nd::Zip::from(gx).and(gy).map_collect(|x, y| x.hypot(*y)))
}

/// Largest element of an array, ignoring NaNs, or `None` if the array is
/// empty.
pub fn peak<S>(a: &Arr1<S>) -> Option<f64>
where S: nd::Data<Elem = f64>
{
    a.iter().copied()
        .filter(|ak| !ak.is_nan())
        .max_by(|l, r| l.total_cmp(r))
}

/// k-space trajectory `kx + i ky` (cm⁻¹) traced by a gradient waveform (G/cm)
/// sampled with period `dt` (s), starting from the origin.
pub fn kspace<S, T>(gx: &Arr1<S>, gy: &Arr1<T>, dt: f64)
    -> Result<nd::Array1<C64>, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(gx, gy)?;
    let scale = GAMMA * dt;
    let k: nd::Array1<C64>
        = gx.iter().zip(gy)
        .scan(C64::new(0.0, 0.0), |acc, (x, y)| {
            *acc += C64::new(*x, *y) * scale;
            Some(*acc)
        })
        .collect();
    Ok(k)
}

/// Slew-rate waveform `(sx, sy)` (G/cm/s) of a gradient waveform (G/cm)
/// sampled with period `dt` (s).
///
/// The gradient is taken to be zero before the first sample, so the first
/// slew sample is `g[0] / dt`.
pub fn slew<S, T>(gx: &Arr1<S>, gy: &Arr1<T>, dt: f64)
    -> Result<(nd::Array1<f64>, nd::Array1<f64>), LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(gx, gy)?;
    Ok(slew_unchecked(gx, gy, dt))
}

pub(crate) fn slew_unchecked<S, T>(gx: &Arr1<S>, gy: &Arr1<T>, dt: f64)
    -> (nd::Array1<f64>, nd::Array1<f64>)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let sx = array_diff_from_zero(gx) / dt;
    let sy = array_diff_from_zero(gy) / dt;
    (sx, sy)
}

/// Return a copy of a complex waveform rotated by `angle` radians.
pub fn rotate<S>(g: &Arr1<S>, angle: f64) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let phase = C64::cis(angle);
    g.mapv(|gk| gk * phase)
}

/// Return interleave `index` of `count`, i.e. the base waveform rotated by
/// `2π index / count`.
///
/// *Panics if `count` is zero*.
pub fn interleave<S>(g: &Arr1<S>, index: usize, count: usize)
    -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    assert!(count > 0, "waveform::interleave: count must be non-zero");
    rotate(g, TAU * index as f64 / count as f64)
}

/// Return all `count` interleaves of a base waveform, one per row.
pub fn interleaves<S>(g: &Arr1<S>, count: usize) -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    let mut all: nd::Array2<C64> = nd::Array2::zeros((count, g.len()));
    all.axis_iter_mut(nd::Axis(0)).enumerate()
        .for_each(|(i, row)| { interleave(g, i, count).move_into(row); });
    all
}
