//! Triple modular redundancy voter.
//!
//! Three readings of the same quantity are compared pairwise in a fixed
//! order, and the first pair closer than `tolerance` wins:
//!
//! | Pair | Returned reading |
//! |---|---|
//! | s1–s2 | `s1` |
//! | s1–s3 | `s1` |
//! | s2–s3 | `s2` |
//!
//! This is first-match, not majority consensus.  The s2–s3 branch returning
//! `s2` rather than the first reading of the triple is long-standing
//! observable behavior and callers may depend on it.
//!
//! Agreement is strict: a difference exactly equal to `tolerance` is not a
//! match.  When no pair agrees the verdict is
//! [`VoteStatus::FaultDisagreementTotal`] with no value; that is a negative
//! verdict, not an error.
//!
//! # Example
//!
//! ```
//! use aegis_kernel::tmr::sensor_vote_tmr;
//! use aegis_types::{DEFAULT_TOLERANCE, VoteStatus};
//!
//! // s3 took a single event upset; s1 and s2 still agree.
//! let verdict = sensor_vote_tmr(Some(1.012), Some(1.012), Some(0.0), DEFAULT_TOLERANCE).unwrap();
//! assert_eq!(verdict.value, Some(1.012));
//! assert_eq!(verdict.status, VoteStatus::VoteSuccess);
//! ```

use aegis_types::{AegisError, DEFAULT_TOLERANCE, SensorTriple, VoteStatus, VoteVerdict};
use tracing::{debug, warn};

use crate::validate::ensure_finite;

/// Vote on a [`SensorTriple`] with [`DEFAULT_TOLERANCE`].
pub fn sensor_vote(triple: &SensorTriple) -> Result<VoteVerdict, AegisError> {
    sensor_vote_tmr(triple.s1, triple.s2, triple.s3, DEFAULT_TOLERANCE)
}

/// Vote on three readings.
///
/// Fails with [`AegisError::NullSensor`] (1-based index) for the first
/// offline reading, and with [`AegisError::NonNumeric`] for a NaN or
/// infinite reading or tolerance.
pub fn sensor_vote_tmr(
    s1: Option<f64>,
    s2: Option<f64>,
    s3: Option<f64>,
    tolerance: f64,
) -> Result<VoteVerdict, AegisError> {
    let s1 = require_reading(1, s1)?;
    let s2 = require_reading(2, s2)?;
    let s3 = require_reading(3, s3)?;
    let tolerance = ensure_finite("tolerance", 0, tolerance)?;

    let diff_12 = (s1 - s2).abs();
    let diff_13 = (s1 - s3).abs();
    let diff_23 = (s2 - s3).abs();

    let winner = if diff_12 < tolerance {
        Some(("s1-s2", s1))
    } else if diff_13 < tolerance {
        Some(("s1-s3", s1))
    } else if diff_23 < tolerance {
        Some(("s2-s3", s2))
    } else {
        None
    };

    match winner {
        Some((pair, value)) => {
            debug!(pair, value, "TMR vote agreed");
            Ok(VoteVerdict {
                value: Some(value),
                status: VoteStatus::VoteSuccess,
            })
        }
        None => {
            warn!(s1, s2, s3, tolerance, "TMR total disagreement");
            Ok(VoteVerdict {
                value: None,
                status: VoteStatus::FaultDisagreementTotal,
            })
        }
    }
}

fn require_reading(index: usize, reading: Option<f64>) -> Result<f64, AegisError> {
    let value = reading.ok_or(AegisError::NullSensor { index })?;
    ensure_finite("sensor", index, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(s1: f64, s2: f64, s3: f64) -> VoteVerdict {
        sensor_vote_tmr(Some(s1), Some(s2), Some(s3), DEFAULT_TOLERANCE).unwrap()
    }

    // ------------------------------------------------------------------ agreement

    #[test]
    fn s1_s2_agreement_isolates_faulted_s3() {
        let v = vote(1.012, 1.012, 0.0);
        assert_eq!(v.into_pair(), (Some(1.012), VoteStatus::VoteSuccess));
    }

    #[test]
    fn s1_s3_agreement_returns_s1() {
        let v = vote(1.000, 7.0, 1.003);
        assert_eq!(v.into_pair(), (Some(1.000), VoteStatus::VoteSuccess));
    }

    #[test]
    fn s2_s3_agreement_returns_s2() {
        let v = vote(7.0, 2.001, 2.003);
        assert_eq!(v.into_pair(), (Some(2.001), VoteStatus::VoteSuccess));
    }

    #[test]
    fn s1_s2_checked_before_other_pairs() {
        // All three pairs agree; the first pair wins.
        let v = vote(1.001, 1.002, 1.003);
        assert_eq!(v.value, Some(1.001));
    }

    #[test]
    fn s1_s3_checked_before_s2_s3() {
        // s1–s3 and s2–s3 agree, s1–s2 does not.
        let v = vote(1.000, 1.008, 1.004);
        assert_eq!(v.value, Some(1.000));
    }

    // ------------------------------------------------------------------ disagreement

    #[test]
    fn total_disagreement_has_no_value() {
        let v = vote(1.0, 2.0, 3.0);
        assert_eq!(v.into_pair(), (None, VoteStatus::FaultDisagreementTotal));
    }

    #[test]
    fn difference_equal_to_tolerance_is_not_a_match() {
        let v = sensor_vote_tmr(Some(0.0), Some(0.5), Some(10.0), 0.5).unwrap();
        assert_eq!(v.status, VoteStatus::FaultDisagreementTotal);

        let v = sensor_vote_tmr(Some(0.0), Some(0.25), Some(10.0), 0.5).unwrap();
        assert_eq!(v.value, Some(0.0));
    }

    #[test]
    fn zero_tolerance_never_matches() {
        let v = sensor_vote_tmr(Some(1.0), Some(1.0), Some(1.0), 0.0).unwrap();
        assert_eq!(v.status, VoteStatus::FaultDisagreementTotal);
    }

    #[test]
    fn custom_tolerance_widens_agreement() {
        let v = sensor_vote_tmr(Some(1.0), Some(2.0), Some(3.0), 1.5).unwrap();
        assert_eq!(v.into_pair(), (Some(1.0), VoteStatus::VoteSuccess));
    }

    // ------------------------------------------------------------------ validation

    #[test]
    fn null_sensor_rejected() {
        assert!(matches!(
            sensor_vote_tmr(None, Some(1.0), Some(1.0), DEFAULT_TOLERANCE),
            Err(AegisError::NullSensor { index: 1 })
        ));
        assert!(matches!(
            sensor_vote_tmr(Some(1.0), Some(1.0), None, DEFAULT_TOLERANCE),
            Err(AegisError::NullSensor { index: 3 })
        ));
    }

    #[test]
    fn null_sensor_rejected_even_when_others_agree() {
        let triple = SensorTriple::new(Some(1.0), None, Some(1.0));
        assert!(matches!(
            sensor_vote(&triple),
            Err(AegisError::NullSensor { index: 2 })
        ));
    }

    #[test]
    fn nan_reading_rejected() {
        assert!(matches!(
            sensor_vote_tmr(Some(1.0), Some(f64::NAN), Some(1.0), DEFAULT_TOLERANCE),
            Err(AegisError::NonNumeric { index: 2, .. })
        ));
    }

    #[test]
    fn non_finite_tolerance_rejected() {
        assert!(matches!(
            sensor_vote_tmr(Some(1.0), Some(1.0), Some(1.0), f64::INFINITY),
            Err(AegisError::NonNumeric { ref field, .. }) if field == "tolerance"
        ));
    }

    #[test]
    fn sensor_vote_uses_default_tolerance() {
        let triple = SensorTriple::readings(5.0, 5.004, 9.0);
        assert_eq!(sensor_vote(&triple).unwrap().value, Some(5.0));

        let triple = SensorTriple::readings(5.0, 5.006, 9.0);
        assert_eq!(
            sensor_vote(&triple).unwrap().status,
            VoteStatus::FaultDisagreementTotal
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = vote(3.2, 3.2001, 9.9);
        for _ in 0..10 {
            assert_eq!(vote(3.2, 3.2001, 9.9), first);
        }
    }
}
