//! Clinician override merge

use shared::{TriageDecision, TriageError, TriageResult, UrgencyLevel, OVERRIDE_PREFIX};

/// Merge an optional clinician override into a final decision.
///
/// Without an override level the computed result is final and any reason is
/// ignored. With one, the reason must be non-blank; the override level wins
/// whether it raises or lowers urgency.
pub fn apply_override(
    result: &TriageResult,
    override_level: Option<UrgencyLevel>,
    override_reason: Option<&str>,
) -> shared::Result<TriageDecision> {
    let Some(level) = override_level else {
        return Ok(TriageDecision::accept(result));
    };

    let reason = override_reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(TriageError::InvalidOverride { level: level.value() })?;

    tracing::info!(
        computed_level = %result.level,
        override_level = %level,
        "urgency override applied"
    );

    Ok(TriageDecision {
        level,
        justification: format!("{}{}", OVERRIDE_PREFIX, reason),
        overridden: true,
        computed_level: result.level,
    })
}
