//! Free-return corridor check.
//!
//! Evaluates the Jacobi integral of the circular restricted three-body
//! problem for a synodic-frame state and compares it against
//! [`C_LOWER_LIMIT`]:
//!
//! ```text
//! r1²   = (x + μ)² + y² + z²
//! r2²   = (x − 1 + μ)² + y² + z²
//! Ω     = ½(x² + y²) + (1 − μ)/r1 + μ/r2
//! C     = 2Ω − (vx² + vy² + vz²)
//! ```
//!
//! The Earth sits at `x = −μ` and the Moon at `x = 1 − μ`.  `C` is rounded to
//! [`JACOBI_DECIMALS`] places (ties away from zero) and the *rounded* value is
//! what gets compared, so a raw `3.149996` is still nominal.
//!
//! A corridor exit is a normal verdict, not an error.
//!
//! # Example
//!
//! ```
//! use aegis_kernel::corridor::verify_trajectory_safety;
//! use aegis_types::CorridorStatus;
//!
//! let verdict = verify_trajectory_safety(&[1.0, 0.0, 0.0, 5.0, 5.0, 5.0]).unwrap();
//! assert_eq!(verdict.status, CorridorStatus::CriticalViolationCorridorExit);
//!
//! assert!(verify_trajectory_safety(&[1.0, 0.0, 0.0]).is_err());
//! ```

use aegis_types::{
    AegisError, C_LOWER_LIMIT, CorridorStatus, CorridorVerdict, JACOBI_DECIMALS, MU, Primary,
    StateVector,
};
use tracing::{debug, warn};

use crate::validate::ensure_all_finite;

/// Validate `state` as a six-component vector and run [`verify_state`].
///
/// Fails with [`AegisError::Dimension`] before anything else is looked at.
pub fn verify_trajectory_safety(state: &[f64]) -> Result<CorridorVerdict, AegisError> {
    let state = StateVector::try_from(state)?;
    verify_state(&state)
}

/// Compute the rounded Jacobi constant of `state` and judge it against
/// [`C_LOWER_LIMIT`].
pub fn verify_state(state: &StateVector) -> Result<CorridorVerdict, AegisError> {
    let jacobi = round_decimals(jacobi_constant(state)?, JACOBI_DECIMALS);

    let status = if jacobi < C_LOWER_LIMIT {
        warn!(jacobi, limit = C_LOWER_LIMIT, "free-return corridor exit");
        CorridorStatus::CriticalViolationCorridorExit
    } else {
        debug!(jacobi, "corridor nominal");
        CorridorStatus::Nominal
    };

    Ok(CorridorVerdict { jacobi, status })
}

/// Unrounded Jacobi constant `2Ω − v²`.
///
/// Fails with [`AegisError::AlgorithmFailure`] if the result is NaN, which
/// can only happen when intermediate terms overflow.
pub fn jacobi_constant(state: &StateVector) -> Result<f64, AegisError> {
    let omega = potential(state)?;
    let v_sq = state.vx().powi(2) + state.vy().powi(2) + state.vz().powi(2);
    let jacobi = 2.0 * omega - v_sq;

    if jacobi.is_nan() {
        return Err(AegisError::AlgorithmFailure(format!(
            "Jacobi calculation resulted in NaN (omega = {omega}, v_sq = {v_sq})"
        )));
    }
    Ok(jacobi)
}

/// Effective potential Ω of the rotating frame at the position of `state`.
pub fn potential(state: &StateVector) -> Result<f64, AegisError> {
    ensure_all_finite("state", state.as_array())?;

    let (x, y, z) = (state.x(), state.y(), state.z());
    let r1_sq = (x + MU).powi(2) + y.powi(2) + z.powi(2);
    let r2_sq = (x - 1.0 + MU).powi(2) + y.powi(2) + z.powi(2);
    check_separation(r1_sq, r2_sq)?;

    let (r1, r2) = (r1_sq.sqrt(), r2_sq.sqrt());
    Ok(0.5 * (x.powi(2) + y.powi(2)) + (1.0 - MU) / r1 + MU / r2)
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Reject positions coincident with either primary's center.
fn check_separation(r1_sq: f64, r2_sq: f64) -> Result<(), AegisError> {
    if r1_sq <= 0.0 {
        return Err(AegisError::PhysicalImpossibility {
            primary: Primary::Earth,
        });
    }
    if r2_sq <= 0.0 {
        return Err(AegisError::PhysicalImpossibility {
            primary: Primary::Moon,
        });
    }
    Ok(())
}

/// Round to `decimals` places, ties away from zero.
///
/// Magnitudes of `2^52 / 10^decimals` and above carry no fractional digits
/// at that scale and are returned unchanged, so scaling never overflows.
fn round_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    if value.abs() >= (1u64 << 52) as f64 / factor {
        return value;
    }
    (value * factor).round() / factor
}
