//! acuity levels command

use clap::Args;
use triage::TriageEngine;

use crate::render;

#[derive(Debug, Args)]
pub struct LevelsCommand {}

impl LevelsCommand {
    pub fn run(&self, engine: &TriageEngine, json: bool) -> anyhow::Result<()> {
        println!("{}", self.output(engine, json)?);
        Ok(())
    }

    pub fn output(&self, engine: &TriageEngine, json: bool) -> anyhow::Result<String> {
        let levels = engine.catalog().levels();
        if json {
            let levels: Vec<_> = levels.iter().collect();
            return Ok(serde_json::to_string_pretty(&levels)?);
        }
        Ok(render::format_levels(levels))
    }
}
