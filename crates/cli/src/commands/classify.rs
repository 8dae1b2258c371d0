//! acuity classify command

use clap::Args;
use serde_json::json;
use shared::{Consciousness, UrgencyLevel, VitalSigns};
use std::collections::HashSet;
use triage::{apply_override, TriageEngine};

use crate::render;

#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// Presenting complaint id
    #[arg(short, long)]
    pub complaint: Option<String>,

    /// Selected discriminator id (repeatable)
    #[arg(short = 'd', long = "discriminator")]
    pub discriminators: Vec<String>,

    /// Heart rate (bpm)
    #[arg(long)]
    pub heart_rate: Option<u32>,

    /// Systolic blood pressure (mmHg)
    #[arg(long)]
    pub systolic: Option<u32>,

    /// Oxygen saturation (%)
    #[arg(long, value_parser = shared::parse_oxygen_saturation)]
    pub spo2: Option<f64>,

    /// Respiratory rate (breaths/min)
    #[arg(long)]
    pub resp_rate: Option<u32>,

    /// Temperature (°C)
    #[arg(long, value_parser = shared::parse_temperature)]
    pub temperature: Option<f64>,

    /// Pain score 0-10
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub pain: Option<u8>,

    /// AVPU state: alert, verbal, pain or unresponsive
    #[arg(long)]
    pub consciousness: Option<Consciousness>,

    /// Clinician override level 1-5
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5), requires = "override_reason")]
    pub override_level: Option<u8>,

    /// Clinical justification for the override
    #[arg(long)]
    pub override_reason: Option<String>,
}

impl ClassifyCommand {
    pub fn run(&self, engine: &TriageEngine, json: bool) -> anyhow::Result<()> {
        println!("{}", self.output(engine, json)?);
        Ok(())
    }

    pub fn output(&self, engine: &TriageEngine, json: bool) -> anyhow::Result<String> {
        let selected: HashSet<String> = self.discriminators.iter().cloned().collect();
        let vitals = self.vitals();

        let result = engine.classify(self.complaint.as_deref(), &selected, vitals.as_ref());

        let override_level = self.override_level.map(UrgencyLevel::try_from).transpose()?;
        let decision = apply_override(&result, override_level, self.override_reason.as_deref())?;
        let info = engine.level_info(decision.level);

        if json {
            let value = json!({
                "complaint": self.complaint,
                "result": result,
                "decision": decision,
                "levelInfo": info,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut out = render::format_result(&result, engine.level_info(result.level));
        if decision.overridden {
            out.push('\n');
            out.push_str(&render::format_decision(&decision, info));
        }
        Ok(out)
    }

    fn vitals(&self) -> Option<VitalSigns> {
        let vitals = VitalSigns {
            heart_rate: self.heart_rate,
            systolic_bp: self.systolic,
            oxygen_saturation: self.spo2,
            respiratory_rate: self.resp_rate,
            temperature: self.temperature,
            pain_scale: self.pain,
            consciousness: self.consciousness,
        };
        (!vitals.is_empty()).then_some(vitals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        classify: ClassifyCommand,
    }

    fn parse(args: &[&str]) -> ClassifyCommand {
        let mut argv = vec!["acuity"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).classify
    }

    fn json_output(args: &[&str]) -> serde_json::Value {
        let engine = TriageEngine::with_defaults();
        let text = parse(args).output(&engine, true).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    // ============== Parsing Tests ==============

    #[test]
    fn test_parse_full_command() {
        let cmd = parse(&[
            "--complaint", "headache",
            "-d", "headache-mild",
            "-d", "thunderclap-onset",
            "--heart-rate", "130",
            "--consciousness", "verbal",
        ]);

        assert_eq!(cmd.complaint.as_deref(), Some("headache"));
        assert_eq!(cmd.discriminators.len(), 2);
        assert_eq!(cmd.heart_rate, Some(130));
        assert_eq!(cmd.consciousness, Some(Consciousness::Verbal));
    }

    #[test]
    fn test_override_level_out_of_range_rejected() {
        let argv = ["acuity", "--override-level", "6", "--override-reason", "x"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_override_level_requires_reason() {
        assert!(TestCli::try_parse_from(["acuity", "--override-level", "1"]).is_err());
    }

    #[test]
    fn test_indeterminate_vitals_rejected() {
        for argv in [
            ["acuity", "--spo2", "NaN"],
            ["acuity", "--spo2", "250"],
            ["acuity", "--temperature", "inf"],
        ] {
            assert!(TestCli::try_parse_from(argv).is_err(), "{:?}", argv);
        }
        assert_eq!(parse(&["--spo2", "88"]).spo2, Some(88.0));
    }

    #[test]
    fn test_no_vitals_flags_means_no_vitals() {
        assert!(parse(&["--complaint", "fever"]).vitals().is_none());
        assert!(parse(&["--spo2", "95"]).vitals().is_some());
    }

    // ============== Output Tests ==============

    #[test]
    fn test_classify_json() {
        let value = json_output(&["--complaint", "headache", "-d", "headache-mild", "--heart-rate", "130"]);

        assert_eq!(value["result"]["level"], 3);
        assert_eq!(value["result"]["justification"], "Abnormal heart rate");
        assert_eq!(value["decision"]["overridden"], false);
        assert_eq!(value["levelInfo"]["name"], "Urgent");
    }

    #[test]
    fn test_classify_with_override_json() {
        let value = json_output(&[
            "--complaint", "head-injury",
            "-d", "scalp-wound",
            "--override-level", "1",
            "--override-reason", "Patient deteriorating on reassessment",
        ]);

        assert_eq!(value["result"]["level"], 4);
        assert_eq!(value["decision"]["level"], 1);
        assert_eq!(value["decision"]["justification"], "Override: Patient deteriorating on reassessment");
        assert_eq!(value["levelInfo"]["targetMinutes"], 0);
    }

    #[test]
    fn test_blank_override_reason_fails() {
        let engine = TriageEngine::with_defaults();
        let cmd = parse(&["--override-level", "2", "--override-reason", "  "]);
        assert!(cmd.output(&engine, false).is_err());
    }

    #[test]
    fn test_classify_plain_without_complaint() {
        let engine = TriageEngine::with_defaults();
        let text = parse(&[]).output(&engine, false).unwrap();
        let text = console::strip_ansi_codes(&text);
        assert!(text.contains("[5] Non-Urgent"));
        assert!(text.contains("No complaint selected"));
    }
}
