//! # Acuity Triage
//!
//! Deterministic urgency classification for emergency triage.
//!
//! ## Components
//!
//! - `TriageEngine` - Resolves a level from a complaint, discriminators and vitals
//! - `apply_override` - Merges a clinician override into a final decision

pub mod engine;
pub mod decision;

pub use engine::TriageEngine;
pub use decision::apply_override;
