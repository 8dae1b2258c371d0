//! # Acuity Audit
//!
//! In-memory audit trail for triage decisions.

mod audit_logger;

pub use audit_logger::{AuditEntry, AuditEventType, AuditLogger, AuditStats};
