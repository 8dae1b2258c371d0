//! # Acuity CLI
//!
//! Command-line front end for the triage engine.

pub mod commands;
pub mod interactive;
pub mod render;

use protocol::ProtocolCatalog;
use shared::TriageConfig;
use std::path::Path;
use triage::TriageEngine;

/// Build the engine from optional config and catalog files
pub fn load_engine(config: Option<&Path>, catalog: Option<&Path>) -> anyhow::Result<TriageEngine> {
    let config = match config {
        Some(path) => TriageConfig::from_file(path)?,
        None => TriageConfig::default(),
    };
    let catalog = match catalog {
        Some(path) => ProtocolCatalog::from_file(path)?,
        None => ProtocolCatalog::builtin(),
    };

    tracing::debug!(version = catalog.version(), complaints = catalog.len(), "engine configured");
    Ok(TriageEngine::from_config(catalog, &config)?)
}
