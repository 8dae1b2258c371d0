//! # Acuity Protocol
//!
//! Immutable reference data for triage.
//!
//! ## Components
//!
//! - `ProtocolCatalog` - Presenting complaints and their discriminators
//! - `LevelTable` - Urgency level labels, colors and target response times

pub mod catalog;
pub mod levels;
mod builtin;

pub use catalog::{CatalogDocument, Discriminator, PresentingComplaint, ProtocolCatalog};
pub use levels::LevelTable;
