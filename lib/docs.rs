//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [FOV constraint](#fov-constraint)
//! - [Amplitude-limited motion](#amplitude-limited-motion)
//! - [Slew-limited motion](#slew-limited-motion)
//! - [Integration](#integration)
//!
//! # Background
//! A spiral k-space trajectory is written in polar form as
//! ```text
//! k(t) = r(t) exp(i θ(t))
//! ```
//! with both the radius *r* and angle *θ* increasing monotonically in time.
//! The gradient waveform and its slew rate follow from time derivatives of
//! *k*,
//! ```text
//!        1 dk              1 d²k
//! g(t) = - --,      s(t) = - ---
//!        γ dt              γ dt²
//! ```
//! where *γ* is the gyromagnetic ratio (Hz/G). Writing *ṙ*, *r̈*, *θ̇*, *θ̈* for
//! the first and second derivatives,
//! ```text
//! γ g = (ṙ + i r θ̇) exp(i θ)
//! γ s = ((r̈ - r θ̇²) + i (2 ṙ θ̇ + r θ̈)) exp(i θ)
//! ```
//! Hardware limits require |*g*| ≤ *G*<sub>max</sub> and
//! |*s*| ≤ *S*<sub>max</sub> at all times. The fastest trajectory satisfying
//! both is found by choosing, at every instant, whichever of the two limits is
//! tighter and running exactly at it.
//!
//! # FOV constraint
//! To support an (unaliased) field of view *F* with *N* interleaves, adjacent
//! turns of the full set of interleaves may be no further than 1/*F* apart in
//! radius. Each interleave must therefore advance in radius by at most
//! *N*/*F* per full turn:
//! ```text
//! dr     N
//! -- = -----
//! dθ   2π F
//! ```
//! Here *F* = *F*(*r*) may be any polynomial in the radius, which is what
//! makes the spiral *variable-density*. By the chain rule this ties the angular
//! derivatives to the radial ones,
//! ```text
//!      2π F
//! θ̇ = ---- ṙ
//!       N
//!
//!      2π dF        2π F
//! θ̈ = -- -- ṙ²  +  ---- r̈
//!      N  dr          N
//! ```
//! so that the trajectory is described by *r* alone. In what follows, *τ* =
//! 2π*F*/*N*.
//!
//! The FOV also sets an upper bound on the gradient amplitude through the data
//! sampling period *T*<sub>d</sub>: consecutive data samples may be no further
//! than 1/*F* apart along the trajectory, giving
//! ```text
//!                  1
//! G_FOV = ----------------
//!          γ F(r) T_d
//! ```
//! and the effective amplitude limit at radius *r* is the lesser of
//! *G*<sub>max</sub> and *G*<sub>FOV</sub>.
//!
//! # Amplitude-limited motion
//! Substituting *θ̇* = *τ* *ṙ* into |*γ g*| = *γ G* gives the largest radial
//! velocity compatible with the amplitude limit,
//! ```text
//!               (γ G)²
//! ṙ_max² = ------------
//!          1 + (τ r)²
//! ```
//! Whenever the current *ṙ* exceeds this value, the radial acceleration is set
//! to bring *ṙ* back to *ṙ*<sub>max</sub> within a single step *Δt*:
//! ```text
//!      ṙ_max - ṙ
//! r̈ = ---------
//!          Δt
//! ```
//! This is a one-step correction rather than a value derived from the slew
//! constraint.
//!
//! # Slew-limited motion
//! Otherwise the radial acceleration is chosen so that |*γ s*| = *γ S*.
//! Substituting both FOV relations into the expression for *γ s* and squaring
//! its magnitude gives a quadratic in *r̈*,
//! ```text
//! A r̈² + B r̈ + C = 0
//!
//! A = 1 + τ² r²
//! B = 2 τ² r ṙ² + 2 τ² (F'/F) r² ṙ²
//! C = (τ² r ṙ²)² + 4 τ² ṙ⁴ + (τ (F'/F) r ṙ²)² + 4 τ² (F'/F) r ṙ⁴ - (γ S)²
//! ```
//! with *F*' = d*F*/d*r*. The larger root
//! ```text
//!        B      ┌  B²     C ┐½
//! r̈ = - -- +  │ --- -  - │
//!       2A     └ 4A²    A ┘
//! ```
//! is taken. Physically the discriminant should never be negative, but it can
//! be in practice, e.g. for very coarse steps; in that case only the real part
//! -*B*/2*A* of the (complex) root is used.
//!
//! For a constant FOV, *F*' = 0 and the quadratic reduces to
//! ```text
//! A = 1 + τ² r²
//! B = 2 τ² r ṙ²
//! C = (τ² r ṙ²)² + 4 τ² ṙ⁴ - (γ S)²
//! ```
//!
//! # Integration
//! With *r̈* (and hence *θ̈*) known, the state (*r*, *ṙ*, *θ*, *θ̇*) is advanced
//! by explicit Euler steps of size *Δt* equal to the gradient sampling period,
//! updating velocities before positions:
//! ```text
//! θ̇ ← θ̇ + θ̈ Δt      θ ← θ + θ̇ Δt
//! ṙ ← ṙ + r̈ Δt      r ← r + ṙ Δt
//! ```
//! starting from rest at the origin and stopping once *r* reaches the target
//! radius (or a sample cap is hit). The gradient at each step is the finite
//! difference of consecutive k-space positions,
//! ```text
//!        k[n] - k[n - 1]
//! g[n] = ---------------,    k[-1] = 0
//!            γ Δt
//! ```
//! Oversampling the gradient relative to the data (*Δt* < *T*<sub>d</sub>)
//! makes the integration noticeably more stable.
