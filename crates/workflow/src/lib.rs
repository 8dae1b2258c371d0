//! # Acuity Workflow
//!
//! Caller-side sequencing around the triage engine.
//!
//! ## Components
//!
//! - `AssessmentSession` - One patient assessment and its explicit state
//! - `TriageDesk` - Runs sessions against a shared engine and records the audit trail

pub mod session;
pub mod desk;

pub use session::{AssessmentSession, FinalizedAssessment, SessionState};
pub use desk::TriageDesk;
