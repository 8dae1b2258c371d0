//! AuditLogger - Audit trail for triage decisions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{TriageDecision, TriageResult, UrgencyLevel, OVERRIDE_PREFIX};
use std::collections::VecDeque;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,
    pub session_id: Uuid,
    pub complaint_id: Option<String>,
    /// Level after this event (the requested level for a rejected override)
    pub level: UrgencyLevel,
    /// Engine-computed level, when it differs in meaning from `level`
    pub computed_level: Option<UrgencyLevel>,
    pub justification: String,
    pub reason: Option<String>,
}

/// Types of audit events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    Classified,
    OverrideApplied,
    OverrideRejected,
    Finalized,
}

/// Bounded audit logger; the oldest entries are evicted first
#[derive(Debug)]
pub struct AuditLogger {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLogger {
    /// Create a new AuditLogger
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: AuditEntry) {
        if self.max_entries == 0 {
            return;
        }
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Log a classification
    pub fn log_classified(&mut self, session_id: Uuid, complaint_id: Option<&str>, result: &TriageResult) {
        self.log(AuditEntry {
            timestamp: Utc::now(),
            event_type: AuditEventType::Classified,
            session_id,
            complaint_id: complaint_id.map(|s| s.to_string()),
            level: result.level,
            computed_level: None,
            justification: result.justification.clone(),
            reason: None,
        });
    }

    /// Log an accepted override
    pub fn log_override(&mut self, session_id: Uuid, complaint_id: Option<&str>, decision: &TriageDecision) {
        self.log(AuditEntry {
            timestamp: Utc::now(),
            event_type: AuditEventType::OverrideApplied,
            session_id,
            complaint_id: complaint_id.map(|s| s.to_string()),
            level: decision.level,
            computed_level: Some(decision.computed_level),
            justification: decision.justification.clone(),
            reason: decision
                .justification
                .strip_prefix(OVERRIDE_PREFIX)
                .map(|s| s.to_string()),
        });
    }

    /// Log an override refused for lack of a justification
    pub fn log_override_rejected(
        &mut self,
        session_id: Uuid,
        complaint_id: Option<&str>,
        result: &TriageResult,
        requested: UrgencyLevel,
    ) {
        self.log(AuditEntry {
            timestamp: Utc::now(),
            event_type: AuditEventType::OverrideRejected,
            session_id,
            complaint_id: complaint_id.map(|s| s.to_string()),
            level: requested,
            computed_level: Some(result.level),
            justification: result.justification.clone(),
            reason: Some("Missing clinical justification".to_string()),
        });
    }

    /// Log a finalized decision
    pub fn log_finalized(&mut self, session_id: Uuid, complaint_id: Option<&str>, decision: &TriageDecision) {
        self.log(AuditEntry {
            timestamp: Utc::now(),
            event_type: AuditEventType::Finalized,
            session_id,
            complaint_id: complaint_id.map(|s| s.to_string()),
            level: decision.level,
            computed_level: decision.overridden.then_some(decision.computed_level),
            justification: decision.justification.clone(),
            reason: None,
        });
    }

    /// Get recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Get recent applied overrides, newest first
    pub fn get_overrides(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.event_type == AuditEventType::OverrideApplied)
            .take(limit)
            .collect()
    }

    /// All entries for one session, oldest first
    pub fn get_session(&self, session_id: Uuid) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| e.session_id == session_id).collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> AuditStats {
        let count = |event_type: AuditEventType| self.entries.iter().filter(|e| e.event_type == event_type).count();

        AuditStats {
            total_entries: self.entries.len(),
            classification_count: count(AuditEventType::Classified),
            override_count: count(AuditEventType::OverrideApplied),
            rejected_override_count: count(AuditEventType::OverrideRejected),
            finalized_count: count(AuditEventType::Finalized),
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }
}

/// Audit statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStats {
    pub total_entries: usize,
    pub classification_count: usize,
    pub override_count: usize,
    pub rejected_override_count: usize,
    pub finalized_count: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(10000)
    }
}
