//! TriageDesk - Runs assessment sessions and keeps the audit trail

use audit::AuditLogger;
use protocol::ProtocolCatalog;
use shared::{TriageDecision, TriageError, TriageResult, UrgencyLevel};
use std::sync::Arc;
use triage::TriageEngine;

use crate::{AssessmentSession, FinalizedAssessment};

/// TriageDesk - one triage station.
///
/// Several desks may share one engine; each keeps its own audit trail.
pub struct TriageDesk {
    engine: Arc<TriageEngine>,
    audit_logger: AuditLogger,
}

impl TriageDesk {
    /// Create a new TriageDesk
    pub fn new(engine: Arc<TriageEngine>) -> Self {
        Self {
            engine,
            audit_logger: AuditLogger::default(),
        }
    }

    /// Create a desk with a custom audit capacity
    pub fn with_audit_capacity(engine: Arc<TriageEngine>, max_entries: usize) -> Self {
        Self {
            engine,
            audit_logger: AuditLogger::new(max_entries),
        }
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &ProtocolCatalog {
        self.engine.catalog()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit_logger
    }

    /// Start a new assessment
    pub fn open_session(&self) -> AssessmentSession {
        let session = AssessmentSession::new();
        tracing::debug!(session = %session.id(), "assessment opened");
        session
    }

    /// Classify a session and record it
    pub fn classify(&mut self, session: &mut AssessmentSession) -> shared::Result<TriageResult> {
        let result = session.classify(&self.engine)?.clone();
        self.audit_logger
            .log_classified(session.id(), session.complaint_id(), &result);
        Ok(result)
    }

    /// Apply an override and record it; refused overrides are recorded too
    pub fn apply_override(
        &mut self,
        session: &mut AssessmentSession,
        level: Option<UrgencyLevel>,
        reason: Option<&str>,
    ) -> shared::Result<TriageDecision> {
        match session.apply_override(level, reason).cloned() {
            Ok(decision) => {
                if decision.overridden {
                    self.audit_logger
                        .log_override(session.id(), session.complaint_id(), &decision);
                }
                Ok(decision)
            }
            Err(err @ TriageError::InvalidOverride { .. }) => {
                if let (Some(result), Some(requested)) = (session.result(), level) {
                    self.audit_logger
                        .log_override_rejected(session.id(), session.complaint_id(), result, requested);
                }
                tracing::warn!(session = %session.id(), "override rejected without justification");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Finalize a session and record the decision
    pub fn finalize(&mut self, session: &mut AssessmentSession) -> shared::Result<FinalizedAssessment> {
        let finalized = session.finalize(&self.engine)?;
        self.audit_logger
            .log_finalized(session.id(), session.complaint_id(), &finalized.decision);

        tracing::info!(
            session = %finalized.session_id,
            level = %finalized.decision.level,
            overridden = finalized.decision.overridden,
            respond_by = %finalized.respond_by,
            "assessment finalized"
        );
        Ok(finalized)
    }
}

impl Default for TriageDesk {
    fn default() -> Self {
        Self::new(Arc::new(TriageEngine::with_defaults()))
    }
}
