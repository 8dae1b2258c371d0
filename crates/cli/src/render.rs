//! Terminal rendering for catalog entries and decisions

use console::style;
use protocol::{LevelTable, PresentingComplaint};
use shared::{LevelColor, TriageDecision, TriageResult, UrgencyLevelInfo};

/// Colored "[n] Name" badge for a level
pub fn level_badge(info: &UrgencyLevelInfo) -> String {
    let badge = style(format!("[{}] {}", info.level, info.name)).bold();
    let badge = match info.color {
        LevelColor::Red => badge.red(),
        LevelColor::Orange => badge.color256(208),
        LevelColor::Yellow => badge.yellow(),
        LevelColor::Green => badge.green(),
        LevelColor::Blue => badge.blue(),
    };
    badge.to_string()
}

/// Complaint with its discriminators, one per line
pub fn format_complaint(complaint: &PresentingComplaint) -> String {
    let mut out = format!("{} ({})\n", style(&complaint.name).bold(), complaint.id);
    for d in &complaint.discriminators {
        out.push_str(&format!("  {} {:<32} {}\n", d.level, d.id, d.description));
    }
    out
}

pub fn format_result(result: &TriageResult, info: &UrgencyLevelInfo) -> String {
    format!(
        "Computed: {}  (see within {} min)\nReason:   {}",
        level_badge(info),
        info.target_minutes,
        result.justification
    )
}

pub fn format_decision(decision: &TriageDecision, info: &UrgencyLevelInfo) -> String {
    let mut out = format!(
        "Final:    {}  (see within {} min)\nReason:   {}",
        level_badge(info),
        info.target_minutes,
        decision.justification
    );
    if decision.overridden {
        out.push_str(&format!(
            "\n{}",
            style(format!("Clinician override (computed level {})", decision.computed_level)).dim()
        ));
    }
    out
}

pub fn format_levels(levels: &LevelTable) -> String {
    levels
        .iter()
        .map(|info| format!("{:<24} {:>4} min  {}", level_badge(info), info.target_minutes, info.color.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}
