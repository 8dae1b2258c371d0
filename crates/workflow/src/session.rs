//! AssessmentSession - One patient assessment from complaint to final decision

use chrono::{DateTime, Duration, Utc};
use protocol::ProtocolCatalog;
use serde::{Deserialize, Serialize};
use shared::{
    TriageDecision, TriageError, TriageResult, UnknownComplaintError, UnknownDiscriminatorError,
    UrgencyLevel, UrgencyLevelInfo, VitalSigns,
};
use std::collections::HashSet;
use std::fmt;
use triage::TriageEngine;
use uuid::Uuid;

/// Where an assessment currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NoComplaint,
    ComplaintSelected,
    DiscriminatorsChosen,
    Classified,
    OverrideApplied,
    Finalized,
}

impl SessionState {
    pub fn is_classified(&self) -> bool {
        matches!(self, SessionState::Classified | SessionState::OverrideApplied)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::NoComplaint => "NoComplaint",
            SessionState::ComplaintSelected => "ComplaintSelected",
            SessionState::DiscriminatorsChosen => "DiscriminatorsChosen",
            SessionState::Classified => "Classified",
            SessionState::OverrideApplied => "OverrideApplied",
            SessionState::Finalized => "Finalized",
        };
        f.write_str(name)
    }
}

/// A finalized decision ready for display and external storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedAssessment {
    pub session_id: Uuid,
    pub complaint_id: Option<String>,
    pub decision: TriageDecision,
    pub level_info: UrgencyLevelInfo,
    pub vitals: Option<VitalSigns>,
    pub finalized_at: DateTime<Utc>,
    /// Latest time the patient should be seen
    pub respond_by: DateTime<Utc>,
}

/// Caller-held assessment state. The engine itself stays stateless.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    id: Uuid,
    state: SessionState,
    complaint_id: Option<String>,
    selected: HashSet<String>,
    vitals: Option<VitalSigns>,
    result: Option<TriageResult>,
    decision: Option<TriageDecision>,
    opened_at: DateTime<Utc>,
}

impl AssessmentSession {
    /// Create a new AssessmentSession
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::NoComplaint,
            complaint_id: None,
            selected: HashSet::new(),
            vitals: None,
            result: None,
            decision: None,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn complaint_id(&self) -> Option<&str> {
        self.complaint_id.as_deref()
    }

    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn vitals(&self) -> Option<&VitalSigns> {
        self.vitals.as_ref()
    }

    /// Latest classification, if still current
    pub fn result(&self) -> Option<&TriageResult> {
        self.result.as_ref()
    }

    /// Decision after an override, if one was applied
    pub fn decision(&self) -> Option<&TriageDecision> {
        self.decision.as_ref()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Choose the presenting complaint. Clears any discriminator selection.
    pub fn select_complaint(&mut self, catalog: &ProtocolCatalog, complaint_id: &str) -> shared::Result<()> {
        self.ensure_open("select a complaint")?;

        if catalog.find_complaint(complaint_id).is_none() {
            return Err(UnknownComplaintError {
                complaint_id: complaint_id.to_string(),
                available_complaints: catalog.complaint_ids().iter().map(|s| s.to_string()).collect(),
            }
            .into());
        }

        self.complaint_id = Some(complaint_id.to_string());
        self.selected.clear();
        self.invalidate();
        Ok(())
    }

    /// Add a discriminator of the chosen complaint
    pub fn select_discriminator(&mut self, catalog: &ProtocolCatalog, discriminator_id: &str) -> shared::Result<()> {
        self.ensure_open("select a discriminator")?;

        let complaint = self
            .complaint_id
            .as_deref()
            .and_then(|id| catalog.find_complaint(id))
            .ok_or_else(|| TriageError::InvalidTransition {
                action: "select a discriminator".to_string(),
                state: self.state.to_string(),
            })?;

        if !complaint.has_discriminator(discriminator_id) {
            return Err(UnknownDiscriminatorError {
                discriminator_id: discriminator_id.to_string(),
                complaint_id: complaint.id.clone(),
            }
            .into());
        }

        self.selected.insert(discriminator_id.to_string());
        self.invalidate();
        Ok(())
    }

    /// Remove a discriminator; returns whether it was selected
    pub fn deselect_discriminator(&mut self, discriminator_id: &str) -> shared::Result<bool> {
        self.ensure_open("deselect a discriminator")?;

        let removed = self.selected.remove(discriminator_id);
        if removed {
            self.invalidate();
        }
        Ok(removed)
    }

    /// Replace the vitals snapshot
    pub fn record_vitals(&mut self, vitals: VitalSigns) -> shared::Result<()> {
        self.ensure_open("record vitals")?;

        self.vitals = Some(vitals);
        self.invalidate();
        Ok(())
    }

    /// Run the engine on the current inputs
    pub fn classify(&mut self, engine: &TriageEngine) -> shared::Result<&TriageResult> {
        self.ensure_open("classify")?;

        let result = engine.classify(self.complaint_id.as_deref(), &self.selected, self.vitals.as_ref());
        self.decision = None;
        self.state = SessionState::Classified;
        Ok(self.result.insert(result))
    }

    /// Apply or clear a clinician override on the current classification
    pub fn apply_override(
        &mut self,
        level: Option<UrgencyLevel>,
        reason: Option<&str>,
    ) -> shared::Result<&TriageDecision> {
        let result = self.require_result("apply an override")?;
        let decision = triage::apply_override(result, level, reason)?;

        self.state = if decision.overridden {
            SessionState::OverrideApplied
        } else {
            SessionState::Classified
        };
        Ok(self.decision.insert(decision))
    }

    /// Close the assessment. No further changes are accepted afterwards.
    pub fn finalize(&mut self, engine: &TriageEngine) -> shared::Result<FinalizedAssessment> {
        let result = self.require_result("finalize")?;
        let decision = self
            .decision
            .clone()
            .unwrap_or_else(|| TriageDecision::accept(result));

        let level_info = engine.level_info(decision.level).clone();
        let finalized_at = Utc::now();
        let respond_by = finalized_at + Duration::minutes(i64::from(level_info.target_minutes));

        self.decision = Some(decision.clone());
        self.state = SessionState::Finalized;

        Ok(FinalizedAssessment {
            session_id: self.id,
            complaint_id: self.complaint_id.clone(),
            decision,
            level_info,
            vitals: self.vitals.clone(),
            finalized_at,
            respond_by,
        })
    }

    fn ensure_open(&self, action: &str) -> shared::Result<()> {
        if self.state == SessionState::Finalized {
            return Err(self.transition_error(action));
        }
        Ok(())
    }

    fn require_result(&self, action: &str) -> shared::Result<&TriageResult> {
        match (&self.result, self.state.is_classified()) {
            (Some(result), true) => Ok(result),
            _ => Err(self.transition_error(action)),
        }
    }

    fn transition_error(&self, action: &str) -> TriageError {
        TriageError::InvalidTransition {
            action: action.to_string(),
            state: self.state.to_string(),
        }
    }

    /// Drop any stale classification and fall back to the input state
    fn invalidate(&mut self) {
        self.result = None;
        self.decision = None;
        self.state = match (&self.complaint_id, self.selected.is_empty()) {
            (None, _) => SessionState::NoComplaint,
            (Some(_), true) => SessionState::ComplaintSelected,
            (Some(_), false) => SessionState::DiscriminatorsChosen,
        };
    }
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Consciousness;

    fn engine() -> TriageEngine {
        TriageEngine::with_defaults()
    }

    // ============== Input State Tests ==============

    #[test]
    fn test_new_session() {
        let session = AssessmentSession::new();
        assert_eq!(session.state(), SessionState::NoComplaint);
        assert!(session.complaint_id().is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_select_complaint_then_discriminators() {
        let engine = engine();
        let mut session = AssessmentSession::new();

        session.select_complaint(engine.catalog(), "chest-pain").unwrap();
        assert_eq!(session.state(), SessionState::ComplaintSelected);

        session.select_discriminator(engine.catalog(), "pleuritic-pain").unwrap();
        assert_eq!(session.state(), SessionState::DiscriminatorsChosen);
        assert!(session.selected().contains("pleuritic-pain"));

        assert!(session.deselect_discriminator("pleuritic-pain").unwrap());
        assert_eq!(session.state(), SessionState::ComplaintSelected);
        assert!(!session.deselect_discriminator("pleuritic-pain").unwrap());
    }

    #[test]
    fn test_unknown_complaint_rejected() {
        let engine = engine();
        let mut session = AssessmentSession::new();

        let err = session.select_complaint(engine.catalog(), "toothache").unwrap_err();
        assert!(matches!(err, TriageError::UnknownComplaint(_)));
        assert_eq!(session.state(), SessionState::NoComplaint);
    }

    #[test]
    fn test_discriminator_requires_complaint() {
        let engine = engine();
        let mut session = AssessmentSession::new();

        let err = session.select_discriminator(engine.catalog(), "pleuritic-pain").unwrap_err();
        assert!(matches!(err, TriageError::InvalidTransition { .. }));
    }

    #[test]
    fn test_discriminator_from_other_complaint_rejected() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.select_complaint(engine.catalog(), "headache").unwrap();

        let err = session.select_discriminator(engine.catalog(), "pleuritic-pain").unwrap_err();
        assert!(matches!(err, TriageError::UnknownDiscriminator(_)));
    }

    #[test]
    fn test_changing_complaint_clears_selection() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.select_complaint(engine.catalog(), "chest-pain").unwrap();
        session.select_discriminator(engine.catalog(), "pleuritic-pain").unwrap();

        session.select_complaint(engine.catalog(), "fever").unwrap();
        assert!(session.selected().is_empty());
        assert_eq!(session.state(), SessionState::ComplaintSelected);
    }

    // ============== Classification Tests ==============

    #[test]
    fn test_classify_without_complaint() {
        let engine = engine();
        let mut session = AssessmentSession::new();

        let result = session.classify(&engine).unwrap();
        assert_eq!(result.level, UrgencyLevel::NonUrgent);
        assert_eq!(session.state(), SessionState::Classified);
    }

    #[test]
    fn test_editing_inputs_invalidates_result() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.select_complaint(engine.catalog(), "fever").unwrap();
        session.classify(&engine).unwrap();

        session
            .record_vitals(VitalSigns::new().with_consciousness(Consciousness::Verbal))
            .unwrap();
        assert!(session.result().is_none());
        assert_eq!(session.state(), SessionState::ComplaintSelected);

        let result = session.classify(&engine).unwrap();
        assert_eq!(result.level, UrgencyLevel::Immediate);
    }

    // ============== Override Tests ==============

    #[test]
    fn test_override_before_classify_rejected() {
        let mut session = AssessmentSession::new();
        let err = session
            .apply_override(Some(UrgencyLevel::Immediate), Some("reason"))
            .unwrap_err();
        assert!(matches!(err, TriageError::InvalidTransition { .. }));
    }

    #[test]
    fn test_override_and_clear() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.select_complaint(engine.catalog(), "limb-injury").unwrap();
        session.select_discriminator(engine.catalog(), "unable-to-bear-weight").unwrap();
        session.classify(&engine).unwrap();

        let decision = session
            .apply_override(Some(UrgencyLevel::VeryUrgent), Some("Pale, cool foot"))
            .unwrap();
        assert!(decision.overridden);
        assert_eq!(session.state(), SessionState::OverrideApplied);

        let decision = session.apply_override(None, None).unwrap();
        assert!(!decision.overridden);
        assert_eq!(decision.level, UrgencyLevel::Standard);
        assert_eq!(session.state(), SessionState::Classified);
    }

    #[test]
    fn test_blank_override_keeps_state() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.classify(&engine).unwrap();

        let err = session.apply_override(Some(UrgencyLevel::Immediate), Some(" ")).unwrap_err();
        assert!(matches!(err, TriageError::InvalidOverride { .. }));
        assert_eq!(session.state(), SessionState::Classified);
        assert!(session.decision().is_none());
    }

    // ============== Finalization Tests ==============

    #[test]
    fn test_finalize_requires_classification() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.select_complaint(engine.catalog(), "fever").unwrap();

        let err = session.finalize(&engine).unwrap_err();
        assert_eq!(err.to_string(), "Cannot finalize while assessment is ComplaintSelected");
    }

    #[test]
    fn test_finalize_computes_respond_by() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.select_complaint(engine.catalog(), "fever").unwrap();
        session.select_discriminator(engine.catalog(), "fever-rigors").unwrap();
        session.classify(&engine).unwrap();

        let finalized = session.finalize(&engine).unwrap();
        assert_eq!(finalized.decision.level, UrgencyLevel::Urgent);
        assert_eq!(finalized.level_info.name, "Urgent");
        assert_eq!(finalized.respond_by - finalized.finalized_at, Duration::minutes(60));
        assert_eq!(finalized.session_id, session.id());
        assert_eq!(session.state(), SessionState::Finalized);
    }

    #[test]
    fn test_finalize_keeps_override() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.classify(&engine).unwrap();
        session
            .apply_override(Some(UrgencyLevel::Immediate), Some("Patient deteriorating on reassessment"))
            .unwrap();

        let finalized = session.finalize(&engine).unwrap();
        assert_eq!(finalized.decision.level, UrgencyLevel::Immediate);
        assert!(finalized.decision.overridden);
        assert_eq!(finalized.respond_by, finalized.finalized_at);
    }

    #[test]
    fn test_finalized_session_is_closed() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.classify(&engine).unwrap();
        session.finalize(&engine).unwrap();

        assert!(session.select_complaint(engine.catalog(), "fever").is_err());
        assert!(session.record_vitals(VitalSigns::new()).is_err());
        assert!(session.classify(&engine).is_err());
        assert!(session.apply_override(None, None).is_err());
        assert!(session.finalize(&engine).is_err());
    }

    #[test]
    fn test_finalized_assessment_serialization() {
        let engine = engine();
        let mut session = AssessmentSession::new();
        session.classify(&engine).unwrap();
        let finalized = session.finalize(&engine).unwrap();

        let value = serde_json::to_value(&finalized).unwrap();
        assert_eq!(value["decision"]["level"], 5);
        assert_eq!(value["levelInfo"]["name"], "Non-Urgent");
        assert!(value["respondBy"].is_string());
    }
}
