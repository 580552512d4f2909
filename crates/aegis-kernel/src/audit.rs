//! Built-in verification scenarios.
//!
//! [`run_audit`] stress-tests both checks against known fault conditions and
//! collects the results into an [`AuditReport`]:
//!
//! - **radiation_seu_mitigation** – a bit-flip zeroes s3; the voter must
//!   still return the s1/s2 reading.
//! - **corridor_breach** – a state with far too much kinetic energy must
//!   raise the corridor-exit alarm.

use aegis_types::{
    AuditReport, CheckOutcome, CheckRecord, CorridorStatus, SensorTriple, StateVector, VoteStatus,
};
use tracing::info;

use crate::{corridor, tmr};

const SOURCE: &str = "aegis-kernel::audit";

/// Run every scenario with the given voter `tolerance`.
pub fn run_audit(tolerance: f64) -> AuditReport {
    let checks = vec![radiation_seu_mitigation(tolerance), corridor_breach()];
    let report = AuditReport::new(SOURCE, checks);
    info!(
        id = %report.id,
        passed = report.all_passed(),
        checks = report.checks.len(),
        "audit complete"
    );
    report
}

fn radiation_seu_mitigation(tolerance: f64) -> CheckRecord {
    let triple = SensorTriple::readings(1.012, 1.012, 0.0);
    let (outcome, passed) =
        match tmr::sensor_vote_tmr(triple.s1, triple.s2, triple.s3, tolerance) {
            Ok(verdict) => {
                let passed =
                    verdict.value == Some(1.012) && verdict.status == VoteStatus::VoteSuccess;
                (CheckOutcome::Vote(verdict), passed)
            }
            Err(e) => (CheckOutcome::from(&e), false),
        };
    CheckRecord {
        name: "radiation_seu_mitigation".to_string(),
        outcome,
        passed,
    }
}

fn corridor_breach() -> CheckRecord {
    let state = StateVector::new(1.0, 0.0, 0.0, 5.0, 5.0, 5.0);
    let (outcome, passed) = match corridor::verify_state(&state) {
        Ok(verdict) => {
            let passed = verdict.status == CorridorStatus::CriticalViolationCorridorExit;
            (CheckOutcome::Corridor(verdict), passed)
        }
        Err(e) => (CheckOutcome::from(&e), false),
    };
    CheckRecord {
        name: "corridor_breach".to_string(),
        outcome,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_types::DEFAULT_TOLERANCE;

    #[test]
    fn default_audit_passes() {
        let report = run_audit(DEFAULT_TOLERANCE);
        assert_eq!(report.checks.len(), 2);
        assert!(report.all_passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());
        assert_eq!(report.source, SOURCE);
    }

    #[test]
    fn seu_check_records_vote_outcome() {
        let record = radiation_seu_mitigation(DEFAULT_TOLERANCE);
        assert!(matches!(
            record.outcome,
            CheckOutcome::Vote(v) if v.value == Some(1.012)
        ));
    }

    #[test]
    fn zero_tolerance_fails_seu_check() {
        let report = run_audit(0.0);
        assert!(!report.all_passed());
        let failed: Vec<_> = report.failures().map(|c| c.name.as_str()).collect();
        assert_eq!(failed, vec!["radiation_seu_mitigation"]);
    }

    #[test]
    fn invalid_tolerance_recorded_as_fault() {
        let record = radiation_seu_mitigation(f64::NAN);
        assert!(!record.passed);
        assert!(matches!(
            record.outcome,
            CheckOutcome::Fault { ref kind, .. } if kind == "NON_NUMERIC"
        ));
    }

    #[test]
    fn each_run_gets_a_fresh_id() {
        let a = run_audit(DEFAULT_TOLERANCE);
        let b = run_audit(DEFAULT_TOLERANCE);
        assert_ne!(a.id, b.id);
    }
}
