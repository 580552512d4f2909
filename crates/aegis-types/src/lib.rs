//! `aegis-types` – shared data model for the AEGIS safety monitor.
//!
//! Holds the physical constants, the [`StateVector`] and [`SensorTriple`]
//! inputs, the verdicts returned by `aegis-kernel`, and the workspace-wide
//! [`AegisError`].  The audit report records live in [`report`].

pub mod report;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use report::{AuditReport, CheckOutcome, CheckRecord};

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

/// Normalized Earth-Moon mass ratio.
pub const MU: f64 = 0.0121505856;

/// Jacobi constant below which the trajectory has left the free-return
/// corridor.  Compared against the *rounded* Jacobi value.
pub const C_LOWER_LIMIT: f64 = 3.15;

/// Default agreement tolerance for the TMR voter.
pub const DEFAULT_TOLERANCE: f64 = 0.005;

/// Decimal places the Jacobi constant is rounded to before the threshold
/// comparison.  Ties round half away from zero.
pub const JACOBI_DECIMALS: i32 = 5;

/// Number of components in a [`StateVector`].
pub const STATE_DIM: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Synodic-frame state `[x, y, z, vx, vy, vz]` relative to the Earth-Moon
/// barycenter, normalized so the Earth-Moon distance is 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct StateVector([f64; STATE_DIM]);

impl StateVector {
    pub fn new(x: f64, y: f64, z: f64, vx: f64, vy: f64, vz: f64) -> Self {
        Self([x, y, z, vx, vy, vz])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }
    pub fn y(&self) -> f64 {
        self.0[1]
    }
    pub fn z(&self) -> f64 {
        self.0[2]
    }
    pub fn vx(&self) -> f64 {
        self.0[3]
    }
    pub fn vy(&self) -> f64 {
        self.0[4]
    }
    pub fn vz(&self) -> f64 {
        self.0[5]
    }

    /// All six components in `[x, y, z, vx, vy, vz]` order.
    pub fn as_array(&self) -> &[f64; STATE_DIM] {
        &self.0
    }
}

impl From<[f64; STATE_DIM]> for StateVector {
    fn from(components: [f64; STATE_DIM]) -> Self {
        Self(components)
    }
}

impl TryFrom<&[f64]> for StateVector {
    type Error = AegisError;

    /// Fails with [`AegisError::Dimension`] unless the slice has exactly six
    /// components.  Finiteness is checked by the kernel, not here.
    fn try_from(components: &[f64]) -> Result<Self, Self::Error> {
        let array: [f64; STATE_DIM] =
            components.try_into().map_err(|_| AegisError::Dimension {
                expected: STATE_DIM,
                actual: components.len(),
            })?;
        Ok(Self(array))
    }
}

/// Three redundant readings of the same physical quantity.  `None` marks an
/// offline sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SensorTriple {
    pub s1: Option<f64>,
    pub s2: Option<f64>,
    pub s3: Option<f64>,
}

impl SensorTriple {
    pub fn new(s1: Option<f64>, s2: Option<f64>, s3: Option<f64>) -> Self {
        Self { s1, s2, s3 }
    }

    /// Convenience constructor for three live readings.
    pub fn readings(s1: f64, s2: f64, s3: f64) -> Self {
        Self::new(Some(s1), Some(s2), Some(s3))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Status tokens
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of the corridor check.  The serialized tokens are part of the
/// external interface and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorridorStatus {
    Nominal,
    CriticalViolationCorridorExit,
}

impl CorridorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorridorStatus::Nominal => "NOMINAL",
            CorridorStatus::CriticalViolationCorridorExit => "CRITICAL_VIOLATION_CORRIDOR_EXIT",
        }
    }
}

impl std::fmt::Display for CorridorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the TMR vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteStatus {
    VoteSuccess,
    FaultDisagreementTotal,
}

impl VoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteStatus::VoteSuccess => "VOTE_SUCCESS",
            VoteStatus::FaultDisagreementTotal => "FAULT_DISAGREEMENT_TOTAL",
        }
    }
}

impl std::fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Verdicts
// ────────────────────────────────────────────────────────────────────────────

/// Rounded Jacobi constant together with the corridor decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CorridorVerdict {
    pub jacobi: f64,
    pub status: CorridorStatus,
}

impl CorridorVerdict {
    pub fn is_nominal(&self) -> bool {
        self.status == CorridorStatus::Nominal
    }

    pub fn into_pair(self) -> (f64, CorridorStatus) {
        (self.jacobi, self.status)
    }
}

/// Trusted reading (if any) together with the vote decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VoteVerdict {
    pub value: Option<f64>,
    pub status: VoteStatus,
}

impl VoteVerdict {
    pub fn is_success(&self) -> bool {
        self.status == VoteStatus::VoteSuccess
    }

    pub fn into_pair(self) -> (Option<f64>, VoteStatus) {
        (self.value, self.status)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Gravitating body of the Earth-Moon system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Primary {
    Earth,
    Moon,
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primary::Earth => write!(f, "Earth"),
            Primary::Moon => write!(f, "Moon"),
        }
    }
}

/// Hard failures of a safety check.
///
/// Negative verdicts (corridor exit, total disagreement) are *not* errors;
/// they come back as `Ok` verdicts.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AegisError {
    #[error("Dimension Error: expected {expected} components, got {actual}")]
    Dimension { expected: usize, actual: usize },

    #[error("Non-Numeric Data: {field}[{index}] = {value} is not a finite number")]
    NonNumeric {
        field: String,
        index: usize,
        value: f64,
    },

    #[error("Physical Impossibility: singular position at {primary} center")]
    PhysicalImpossibility { primary: Primary },

    #[error("Algorithm Failure: {0}")]
    AlgorithmFailure(String),

    #[error("Null Sensor: reading s{index} is offline")]
    NullSensor { index: usize },
}

impl AegisError {
    /// Stable token naming the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            AegisError::Dimension { .. } => "DIMENSION",
            AegisError::NonNumeric { .. } => "NON_NUMERIC",
            AegisError::PhysicalImpossibility { .. } => "PHYSICAL_IMPOSSIBILITY",
            AegisError::AlgorithmFailure(_) => "ALGORITHM_FAILURE",
            AegisError::NullSensor { .. } => "NULL_SENSOR",
        }
    }

    /// `true` for malformed caller input, `false` for domain-level faults.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AegisError::Dimension { .. }
                | AegisError::NonNumeric { .. }
                | AegisError::NullSensor { .. }
        )
    }
}
