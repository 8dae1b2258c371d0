//! acuity complaints command

use clap::Args;
use shared::UnknownComplaintError;
use triage::TriageEngine;

use crate::render;

#[derive(Debug, Args)]
pub struct ComplaintsCommand {
    /// Show a single complaint
    pub id: Option<String>,
}

impl ComplaintsCommand {
    pub fn run(&self, engine: &TriageEngine, json: bool) -> anyhow::Result<()> {
        println!("{}", self.output(engine, json)?);
        Ok(())
    }

    pub fn output(&self, engine: &TriageEngine, json: bool) -> anyhow::Result<String> {
        let catalog = engine.catalog();

        let complaints = match &self.id {
            Some(id) => {
                let complaint = catalog.find_complaint(id).ok_or_else(|| UnknownComplaintError {
                    complaint_id: id.clone(),
                    available_complaints: catalog.complaint_ids().iter().map(|s| s.to_string()).collect(),
                })?;
                vec![complaint]
            }
            None => catalog.list_complaints().iter().collect(),
        };

        if json {
            return Ok(serde_json::to_string_pretty(&complaints)?);
        }

        let mut out = format!("Protocol catalog v{} ({} complaints)\n\n", catalog.version(), catalog.len());
        for complaint in complaints {
            out.push_str(&render::format_complaint(complaint));
            out.push('\n');
        }
        Ok(out.trim_end().to_string())
    }
}
