//! Audit report records produced by `aegis_kernel::audit::run_audit`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AegisError, CorridorVerdict, VoteVerdict};

/// What a single audit check produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "check", content = "result", rename_all = "snake_case")]
pub enum CheckOutcome {
    Corridor(CorridorVerdict),
    Vote(VoteVerdict),
    /// The check failed hard instead of returning a verdict.
    Fault { kind: String, message: String },
}

impl From<&AegisError> for CheckOutcome {
    fn from(err: &AegisError) -> Self {
        CheckOutcome::Fault {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// One named scenario and whether it matched its expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckRecord {
    pub name: String,
    pub outcome: CheckOutcome,
    pub passed: bool,
}

/// A complete verification run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g. "aegis-kernel::audit"
    pub source: String,
    pub checks: Vec<CheckRecord>,
}

impl AuditReport {
    pub fn new(source: &str, checks: Vec<CheckRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.to_string(),
            checks,
        }
    }

    /// `true` when every check met its expectation.  An empty report passes.
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckRecord> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CorridorStatus, Primary, VoteStatus};

    fn vote_record(passed: bool) -> CheckRecord {
        CheckRecord {
            name: "vote".into(),
            outcome: CheckOutcome::Vote(VoteVerdict {
                value: Some(1.0),
                status: VoteStatus::VoteSuccess,
            }),
            passed,
        }
    }

    #[test]
    fn all_passed_requires_every_check() {
        let report = AuditReport::new("test", vec![vote_record(true), vote_record(false)]);
        assert!(!report.all_passed());
        assert_eq!(report.failures().count(), 1);

        let report = AuditReport::new("test", vec![vote_record(true)]);
        assert!(report.all_passed());
    }

    #[test]
    fn fault_outcome_from_error() {
        let err = AegisError::PhysicalImpossibility {
            primary: Primary::Moon,
        };
        match CheckOutcome::from(&err) {
            CheckOutcome::Fault { kind, message } => {
                assert_eq!(kind, "PHYSICAL_IMPOSSIBILITY");
                assert!(message.contains("Moon"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn report_roundtrip() {
        let report = AuditReport::new(
            "aegis-kernel::audit",
            vec![CheckRecord {
                name: "corridor_breach".into(),
                outcome: CheckOutcome::Corridor(CorridorVerdict {
                    jacobi: -70.04781,
                    status: CorridorStatus::CriticalViolationCorridorExit,
                }),
                passed: true,
            }],
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"check\":\"corridor\""));
        assert!(json.contains("CRITICAL_VIOLATION_CORRIDOR_EXIT"));

        let back: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, report.id);
        assert_eq!(back.checks, report.checks);
    }
}
