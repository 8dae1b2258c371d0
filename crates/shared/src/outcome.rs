//! Classification outputs: results, triggers and final decisions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::UrgencyLevel;

/// Justification used when no complaint could be resolved
pub const NO_COMPLAINT_JUSTIFICATION: &str = "No complaint selected";

/// Justification used when nothing nominated a level
pub const NO_TRIGGER_JUSTIFICATION: &str = "No discriminators or critical vitals identified";

/// Prefix of every overridden justification
pub const OVERRIDE_PREFIX: &str = "Override: ";

/// Vital-sign safety rule, declared in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalRule {
    LowOxygenSaturation,
    AbnormalBloodPressure,
    AbnormalHeartRate,
    AbnormalTemperature,
    ReducedConsciousness,
    SeverePain,
}

impl VitalRule {
    /// Evaluation order; earlier rules win ties
    pub const ORDER: [VitalRule; 6] = [
        VitalRule::LowOxygenSaturation,
        VitalRule::AbnormalBloodPressure,
        VitalRule::AbnormalHeartRate,
        VitalRule::AbnormalTemperature,
        VitalRule::ReducedConsciousness,
        VitalRule::SeverePain,
    ];

    /// Human-readable label used as justification
    pub fn label(&self) -> &'static str {
        match self {
            VitalRule::LowOxygenSaturation => "Low oxygen saturation",
            VitalRule::AbnormalBloodPressure => "Abnormal blood pressure",
            VitalRule::AbnormalHeartRate => "Abnormal heart rate",
            VitalRule::AbnormalTemperature => "Abnormal temperature",
            VitalRule::ReducedConsciousness => "Reduced consciousness",
            VitalRule::SeverePain => "Severe pain",
        }
    }

    /// Level nominated when the rule triggers
    pub fn level(&self) -> UrgencyLevel {
        match self {
            VitalRule::LowOxygenSaturation => UrgencyLevel::VeryUrgent,
            VitalRule::AbnormalBloodPressure => UrgencyLevel::VeryUrgent,
            VitalRule::AbnormalHeartRate => UrgencyLevel::Urgent,
            VitalRule::AbnormalTemperature => UrgencyLevel::Urgent,
            VitalRule::ReducedConsciousness => UrgencyLevel::Immediate,
            VitalRule::SeverePain => UrgencyLevel::VeryUrgent,
        }
    }
}

impl fmt::Display for VitalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What produced a computed level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriageTrigger {
    /// A selected discriminator
    Discriminator { id: String, description: String },
    /// A vital-sign safety rule
    Vital { rule: VitalRule },
}

impl TriageTrigger {
    /// Text naming this trigger in a justification
    pub fn describe(&self) -> &str {
        match self {
            TriageTrigger::Discriminator { description, .. } => description,
            TriageTrigger::Vital { rule } => rule.label(),
        }
    }
}

/// Output of a classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub level: UrgencyLevel,

    /// Names the single most severe trigger
    pub justification: String,

    /// `None` when the level is a degraded default
    pub trigger: Option<TriageTrigger>,
}

impl TriageResult {
    /// Result produced by a trigger; the justification names it
    pub fn triggered(level: UrgencyLevel, trigger: TriageTrigger) -> Self {
        Self {
            level,
            justification: trigger.describe().to_string(),
            trigger: Some(trigger),
        }
    }

    /// Least-urgent default with a fixed justification
    pub fn fallback(justification: &str) -> Self {
        Self {
            level: UrgencyLevel::NonUrgent,
            justification: justification.to_string(),
            trigger: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.trigger.is_none()
    }
}

/// Final decision after an optional clinician override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageDecision {
    pub level: UrgencyLevel,
    pub justification: String,

    /// Set when a clinician replaced the computed level
    pub overridden: bool,

    /// Level the engine computed before any override
    pub computed_level: UrgencyLevel,
}

impl TriageDecision {
    /// Decision that takes the computed result as final
    pub fn accept(result: &TriageResult) -> Self {
        Self {
            level: result.level,
            justification: result.justification.clone(),
            overridden: false,
            computed_level: result.level,
        }
    }
}
