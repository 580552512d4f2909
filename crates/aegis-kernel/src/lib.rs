//! `aegis-kernel` – stateless safety checks.
//!
//! Nothing here holds state or performs I/O; every function is a pure
//! mapping from its inputs and the constants in `aegis_types`.
//!
//! # Modules
//!
//! - [`corridor`] – [`verify_trajectory_safety`][corridor::verify_trajectory_safety]:
//!   evaluates the Jacobi constant of a synodic-frame state and judges
//!   whether the trajectory is still inside the free-return corridor.
//! - [`tmr`] – [`sensor_vote_tmr`][tmr::sensor_vote_tmr]: triple modular
//!   redundancy voter that masks a single faulty reading.
//! - [`validate`] – finiteness checks shared by both components.
//! - [`audit`] – [`run_audit`][audit::run_audit]: the built-in verification
//!   scenarios, collected into an [`AuditReport`][aegis_types::AuditReport].

pub mod audit;
pub mod corridor;
pub mod tmr;
pub mod validate;

pub use audit::run_audit;
pub use corridor::{jacobi_constant, potential, verify_state, verify_trajectory_safety};
pub use tmr::{sensor_vote, sensor_vote_tmr};
