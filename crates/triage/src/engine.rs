//! TriageEngine - Urgency resolution from discriminators and vital signs

use protocol::{Discriminator, PresentingComplaint, ProtocolCatalog};
use shared::{
    TriageConfig, TriageResult, TriageTrigger, UrgencyLevel, UrgencyLevelInfo, VitalRule,
    VitalSigns, VitalThresholds, NO_COMPLAINT_JUSTIFICATION, NO_TRIGGER_JUSTIFICATION,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless classification engine.
///
/// Holds only the read-only catalog and thresholds, so one instance can be
/// shared between any number of triage stations.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    catalog: Arc<ProtocolCatalog>,
    thresholds: VitalThresholds,
}

impl TriageEngine {
    /// Create a new TriageEngine
    pub fn new(catalog: Arc<ProtocolCatalog>, thresholds: VitalThresholds) -> Self {
        Self { catalog, thresholds }
    }

    /// Builtin catalog with canonical thresholds and level table
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(ProtocolCatalog::builtin()), VitalThresholds::default())
    }

    /// Apply a validated configuration to a catalog
    pub fn from_config(catalog: ProtocolCatalog, config: &TriageConfig) -> shared::Result<Self> {
        config.validate()?;
        let catalog = catalog.with_level_config(config.levels.clone())?;
        Ok(Self::new(Arc::new(catalog), config.thresholds.clone()))
    }

    pub fn catalog(&self) -> &ProtocolCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> &VitalThresholds {
        &self.thresholds
    }

    /// Metadata for a level
    pub fn level_info(&self, level: UrgencyLevel) -> &UrgencyLevelInfo {
        self.catalog.level_info(level)
    }

    /// Target response time in minutes for a level
    pub fn target_response(&self, level: UrgencyLevel) -> u32 {
        self.catalog.levels().target_minutes(level)
    }

    /// Classify an assessment.
    ///
    /// Never fails: an unknown complaint or an assessment with no triggers
    /// degrades to the least urgent level.
    pub fn classify(
        &self,
        complaint_id: Option<&str>,
        selected: &HashSet<String>,
        vitals: Option<&VitalSigns>,
    ) -> TriageResult {
        let Some(complaint) = complaint_id.and_then(|id| self.catalog.find_complaint(id)) else {
            if vitals.is_some_and(|v| !v.is_empty()) {
                warn!(
                    complaint_id = complaint_id.unwrap_or(""),
                    "no complaint resolved; recorded vitals were not evaluated"
                );
            }
            return TriageResult::fallback(NO_COMPLAINT_JUSTIFICATION);
        };

        let stray: Vec<&str> = selected
            .iter()
            .map(String::as_str)
            .filter(|id| !complaint.has_discriminator(id))
            .collect();
        if !stray.is_empty() {
            warn!(complaint = %complaint.id, ignored = ?stray, "selected discriminators outside complaint");
        }

        let discriminator = most_urgent_discriminator(complaint, selected);
        let vital = vitals.and_then(|v| self.evaluate_vitals(v));

        // Equal levels name the discriminator
        let result = match (discriminator, vital) {
            (Some(d), Some(rule)) if rule.level() < d.level => vital_result(rule),
            (Some(d), _) => discriminator_result(d),
            (None, Some(rule)) => vital_result(rule),
            (None, None) => TriageResult::fallback(NO_TRIGGER_JUSTIFICATION),
        };

        debug!(
            complaint = %complaint.id,
            selected = selected.len(),
            level = %result.level,
            justification = %result.justification,
            "classified"
        );
        result
    }

    /// Most urgent vital-sign rule triggered by a snapshot.
    ///
    /// Ties go to the earliest rule in `VitalRule::ORDER`.
    pub fn evaluate_vitals(&self, vitals: &VitalSigns) -> Option<VitalRule> {
        VitalRule::ORDER
            .into_iter()
            .filter(|rule| rule_triggers(*rule, vitals, &self.thresholds))
            .min_by_key(|rule| rule.level())
    }

    /// Every rule a snapshot triggers, in evaluation order
    pub fn triggered_rules(&self, vitals: &VitalSigns) -> Vec<VitalRule> {
        VitalRule::ORDER
            .into_iter()
            .filter(|rule| rule_triggers(*rule, vitals, &self.thresholds))
            .collect()
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// First discriminator, in complaint order, with the lowest level among the selection
fn most_urgent_discriminator<'a>(
    complaint: &'a PresentingComplaint,
    selected: &HashSet<String>,
) -> Option<&'a Discriminator> {
    complaint
        .discriminators
        .iter()
        .filter(|d| selected.contains(&d.id))
        .min_by_key(|d| d.level)
}

fn rule_triggers(rule: VitalRule, vitals: &VitalSigns, t: &VitalThresholds) -> bool {
    match rule {
        VitalRule::LowOxygenSaturation => vitals
            .oxygen_saturation
            .is_some_and(|spo2| spo2 < t.oxygen_saturation_min),
        VitalRule::AbnormalBloodPressure => vitals
            .systolic_bp
            .is_some_and(|sbp| sbp > t.systolic_high || sbp < t.systolic_low),
        VitalRule::AbnormalHeartRate => vitals
            .heart_rate
            .is_some_and(|hr| hr > t.heart_rate_high || hr < t.heart_rate_low),
        VitalRule::AbnormalTemperature => vitals
            .temperature
            .is_some_and(|temp| temp > t.temperature_high || temp < t.temperature_low),
        VitalRule::ReducedConsciousness => vitals.consciousness.is_some_and(|c| !c.is_alert()),
        VitalRule::SeverePain => vitals
            .pain_scale
            .is_some_and(|pain| pain >= t.pain_severe_threshold),
    }
}

fn discriminator_result(d: &Discriminator) -> TriageResult {
    TriageResult::triggered(
        d.level,
        TriageTrigger::Discriminator {
            id: d.id.clone(),
            description: d.description.clone(),
        },
    )
}

fn vital_result(rule: VitalRule) -> TriageResult {
    TriageResult::triggered(rule.level(), TriageTrigger::Vital { rule })
}
