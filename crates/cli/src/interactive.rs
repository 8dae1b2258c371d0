//! Interactive REPL mode

use console::style;
use shared::{UrgencyLevel, VitalSigns};
use std::io::{self, Write};
use std::sync::Arc;
use triage::TriageEngine;
use workflow::{AssessmentSession, TriageDesk};

use crate::render;

/// Interactive CLI driving one assessment at a time
pub struct InteractiveCli {
    desk: TriageDesk,
    session: AssessmentSession,
}

impl InteractiveCli {
    pub fn new(engine: TriageEngine) -> Self {
        let desk = TriageDesk::new(Arc::new(engine));
        let session = desk.open_session();
        Self { desk, session }
    }

    /// Run the interactive REPL
    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("Acuity Interactive Mode");
        println!("Type /help for commands, /quit to exit");
        println!();

        loop {
            let complaint = self.session.complaint_id().unwrap_or("no complaint");
            print!("[{}] > ", complaint);
            io::stdout().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            if !input.starts_with('/') {
                println!("Commands start with '/'. Type /help for a list.");
                continue;
            }

            match self.handle_command(input) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => println!("{} {}", style("Error:").red(), e),
            }
        }

        Ok(())
    }

    fn handle_command(&mut self, input: &str) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");
        let args = parts.get(1..).unwrap_or_default();

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                return Ok(true);
            }
            "/help" | "/h" => {
                println!("Commands:");
                println!("  /complaints              - List presenting complaints");
                println!("  /complaint <id>          - Choose the presenting complaint");
                println!("  /disc <id>               - Select a discriminator");
                println!("  /undisc <id>             - Deselect a discriminator");
                println!("  /vitals k=v ...          - Record vitals (hr sbp spo2 rr temp pain avpu)");
                println!("  /classify                - Compute the urgency level");
                println!("  /override <level> <why>  - Override the computed level");
                println!("  /finalize                - Finalize and start a new assessment");
                println!("  /status                  - Show the current assessment");
                println!("  /reset                   - Discard and start over");
                println!("  /audit                   - Show recent audit entries");
                println!("  /quit                    - Exit");
            }
            "/complaints" => {
                for complaint in self.desk.catalog().list_complaints() {
                    println!("  {:<22} {}", complaint.id, complaint.name);
                }
            }
            "/complaint" => {
                let id = required(args, "/complaint <id>")?;
                self.session.select_complaint(self.desk.catalog(), id)?;
                if let Some(complaint) = self.desk.catalog().find_complaint(id) {
                    print!("{}", render::format_complaint(complaint));
                }
            }
            "/disc" => {
                let id = required(args, "/disc <id>")?;
                self.session.select_discriminator(self.desk.catalog(), id)?;
                println!("Selected: {}", id);
            }
            "/undisc" => {
                let id = required(args, "/undisc <id>")?;
                if self.session.deselect_discriminator(id)? {
                    println!("Deselected: {}", id);
                } else {
                    println!("Not selected: {}", id);
                }
            }
            "/vitals" => {
                let mut vitals = self.session.vitals().cloned().unwrap_or_default();
                apply_vitals(&mut vitals, args)?;
                self.session.record_vitals(vitals)?;
                println!("Vitals recorded");
            }
            "/classify" => {
                let result = self.desk.classify(&mut self.session)?;
                println!("{}", render::format_result(&result, self.desk.engine().level_info(result.level)));
            }
            "/override" => {
                let (level, reason) = parse_override(args)?;
                let decision = self.desk.apply_override(&mut self.session, level, reason.as_deref())?;
                println!("{}", render::format_decision(&decision, self.desk.engine().level_info(decision.level)));
            }
            "/finalize" => {
                let finalized = self.desk.finalize(&mut self.session)?;
                println!(
                    "{}",
                    render::format_decision(&finalized.decision, &finalized.level_info)
                );
                println!("Respond by: {}", finalized.respond_by.format("%H:%M:%S UTC"));
                self.session = self.desk.open_session();
            }
            "/status" => self.print_status(),
            "/reset" => {
                self.session = self.desk.open_session();
                println!("Assessment discarded");
            }
            "/audit" => {
                let stats = self.desk.audit().get_stats();
                println!(
                    "Audit: {} entries ({} classified, {} overrides, {} rejected, {} finalized)",
                    stats.total_entries,
                    stats.classification_count,
                    stats.override_count,
                    stats.rejected_override_count,
                    stats.finalized_count
                );
                for entry in self.desk.audit().get_recent(10) {
                    println!(
                        "  {} {:?} level {} {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.event_type,
                        entry.level,
                        entry.justification
                    );
                }
            }
            _ => {
                println!("Unknown command: {}", cmd);
            }
        }

        Ok(false)
    }

    fn print_status(&self) {
        println!("Status:");
        println!("  Session: {}", self.session.id());
        println!("  State: {}", self.session.state());
        println!("  Complaint: {}", self.session.complaint_id().unwrap_or("-"));

        let mut selected: Vec<_> = self.session.selected().iter().map(String::as_str).collect();
        selected.sort_unstable();
        println!("  Discriminators: {}", if selected.is_empty() { "-".to_string() } else { selected.join(", ") });

        match self.session.vitals() {
            Some(vitals) => println!("  Vitals: {:?}", vitals),
            None => println!("  Vitals: -"),
        }
        if let Some(result) = self.session.result() {
            println!("  Computed: {} ({})", result.level, result.justification);
        }
        if let Some(decision) = self.session.decision().filter(|d| d.overridden) {
            println!("  Override: {} ({})", decision.level, decision.justification);
        }
    }
}

fn required<'a>(args: &[&'a str], usage: &str) -> anyhow::Result<&'a str> {
    args.first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Usage: {}", usage))
}

fn apply_vitals(vitals: &mut VitalSigns, args: &[&str]) -> anyhow::Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: /vitals k=v ...");
    }
    for pair in args {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected key=value, got '{}'", pair))?;
        vitals.set_field(key, value)?;
    }
    Ok(())
}

/// `/override` with no arguments clears a previous override
fn parse_override(args: &[&str]) -> anyhow::Result<(Option<UrgencyLevel>, Option<String>)> {
    let Some((level, reason)) = args.split_first() else {
        return Ok((None, None));
    };
    let level: u8 = level
        .parse()
        .map_err(|_| anyhow::anyhow!("Override level must be 1-5, got '{}'", level))?;
    Ok((Some(UrgencyLevel::try_from(level)?), Some(reason.join(" "))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Consciousness, TriageError};
    use workflow::SessionState;

    fn cli() -> InteractiveCli {
        InteractiveCli::new(TriageEngine::with_defaults())
    }

    // ============== Basic Creation Tests ==============

    #[test]
    fn test_new_cli() {
        let cli = cli();
        assert_eq!(cli.session.state(), SessionState::NoComplaint);
        assert_eq!(cli.desk.audit().get_stats().total_entries, 0);
    }

    // ============== Command Handling Tests ==============

    #[test]
    fn test_handle_quit_commands() {
        let mut cli = cli();
        for cmd in ["/quit", "/exit", "/q"] {
            assert!(cli.handle_command(cmd).unwrap(), "{}", cmd);
        }
    }

    #[test]
    fn test_informational_commands_continue() {
        let mut cli = cli();
        for cmd in ["/help", "/h", "/complaints", "/status", "/audit", "/unknown", "/"] {
            assert!(!cli.handle_command(cmd).unwrap(), "{}", cmd);
        }
    }

    #[test]
    fn test_full_assessment() {
        let mut cli = cli();
        cli.handle_command("/complaint headache").unwrap();
        cli.handle_command("/disc headache-mild").unwrap();
        cli.handle_command("/vitals hr=130").unwrap();
        cli.handle_command("/classify").unwrap();

        let result = cli.session.result().unwrap();
        assert_eq!(result.level, UrgencyLevel::Urgent);
        assert_eq!(result.justification, "Abnormal heart rate");

        let finished = cli.session.id();
        cli.handle_command("/finalize").unwrap();

        assert_ne!(cli.session.id(), finished);
        assert_eq!(cli.session.state(), SessionState::NoComplaint);
        assert_eq!(cli.desk.audit().get_session(finished).len(), 2);
    }

    #[test]
    fn test_override_with_multi_word_reason() {
        let mut cli = cli();
        cli.handle_command("/complaint head-injury").unwrap();
        cli.handle_command("/disc scalp-wound").unwrap();
        cli.handle_command("/classify").unwrap();
        cli.handle_command("/override 1 Patient deteriorating on reassessment").unwrap();

        let decision = cli.session.decision().unwrap();
        assert_eq!(decision.level, UrgencyLevel::Immediate);
        assert_eq!(decision.justification, "Override: Patient deteriorating on reassessment");
        assert_eq!(cli.session.state(), SessionState::OverrideApplied);
    }

    #[test]
    fn test_override_without_reason_is_rejected() {
        let mut cli = cli();
        cli.handle_command("/classify").unwrap();

        let err = cli.handle_command("/override 2").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TriageError>(),
            Some(TriageError::InvalidOverride { .. })
        ));
        assert_eq!(cli.desk.audit().get_stats().rejected_override_count, 1);
    }

    #[test]
    fn test_override_bad_level() {
        let mut cli = cli();
        cli.handle_command("/classify").unwrap();
        assert!(cli.handle_command("/override 9 reason").is_err());
        assert!(cli.handle_command("/override high reason").is_err());
    }

    #[test]
    fn test_vitals_accumulate() {
        let mut cli = cli();
        cli.handle_command("/vitals hr=88 spo2=97").unwrap();
        cli.handle_command("/vitals avpu=v").unwrap();

        let vitals = cli.session.vitals().unwrap();
        assert_eq!(vitals.heart_rate, Some(88));
        assert_eq!(vitals.oxygen_saturation, Some(97.0));
        assert_eq!(vitals.consciousness, Some(Consciousness::Verbal));
    }

    #[test]
    fn test_vitals_errors() {
        let mut cli = cli();
        assert!(cli.handle_command("/vitals").is_err());
        assert!(cli.handle_command("/vitals hr").is_err());
        assert!(cli.handle_command("/vitals bp=120").is_err());
        assert!(cli.session.vitals().is_none());
    }

    #[test]
    fn test_indeterminate_vitals_not_recorded() {
        let mut cli = cli();
        cli.handle_command("/complaint unwell-adult").unwrap();

        let err = cli.handle_command("/vitals spo2=NaN temp=nan").unwrap_err();
        assert!(matches!(err.downcast_ref::<TriageError>(), Some(TriageError::InvalidVital(_))));
        assert!(cli.handle_command("/vitals spo2=250").is_err());
        assert!(cli.session.vitals().is_none());
    }

    #[test]
    fn test_missing_arguments() {
        let mut cli = cli();
        assert!(cli.handle_command("/complaint").is_err());
        assert!(cli.handle_command("/disc").is_err());
        assert!(cli.handle_command("/undisc").is_err());
    }

    #[test]
    fn test_unknown_complaint_is_error() {
        let mut cli = cli();
        assert!(cli.handle_command("/complaint toothache").is_err());
        assert_eq!(cli.session.state(), SessionState::NoComplaint);
    }

    #[test]
    fn test_undisc_and_reset() {
        let mut cli = cli();
        cli.handle_command("/complaint chest-pain").unwrap();
        cli.handle_command("/disc pleuritic-pain").unwrap();
        assert_eq!(cli.session.state(), SessionState::DiscriminatorsChosen);

        cli.handle_command("/undisc pleuritic-pain").unwrap();
        assert_eq!(cli.session.state(), SessionState::ComplaintSelected);

        cli.handle_command("/reset").unwrap();
        assert!(cli.session.complaint_id().is_none());
    }

    // ============== Helper Tests ==============

    #[test]
    fn test_parse_override_clear() {
        assert_eq!(parse_override(&[]).unwrap(), (None, None));
    }

    #[test]
    fn test_parse_override_level_only() {
        let (level, reason) = parse_override(&["3"]).unwrap();
        assert_eq!(level, Some(UrgencyLevel::Urgent));
        assert_eq!(reason.as_deref(), Some(""));
    }
}
