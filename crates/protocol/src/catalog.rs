//! ProtocolCatalog - Presenting complaints and discriminators

use serde::{Deserialize, Serialize};
use shared::{is_yaml_path, TriageError, UrgencyLevel, UrgencyLevelInfo};
use std::collections::HashMap;
use std::path::Path;

use crate::LevelTable;

/// Stable key format for complaint and discriminator ids
const ID_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

/// A clinical finding that maps to an urgency level under one complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Unique across the whole catalog
    pub id: String,

    pub description: String,

    /// Intrinsic urgency of this finding
    pub level: UrgencyLevel,
}

impl Discriminator {
    pub fn new(id: impl Into<String>, description: impl Into<String>, level: UrgencyLevel) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            level,
        }
    }
}

/// A presenting complaint and its discriminators.
///
/// Discriminator order is presentation order only; priority comes from levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentingComplaint {
    pub id: String,

    /// Display name (e.g. "Chest Pain")
    pub name: String,

    #[serde(default)]
    pub discriminators: Vec<Discriminator>,
}

impl PresentingComplaint {
    /// Create a complaint with no discriminators
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            discriminators: Vec::new(),
        }
    }

    /// Builder: append a discriminator
    pub fn with_discriminator(
        mut self,
        id: impl Into<String>,
        description: impl Into<String>,
        level: UrgencyLevel,
    ) -> Self {
        self.discriminators.push(Discriminator::new(id, description, level));
        self
    }

    /// Get a discriminator of this complaint by id
    pub fn discriminator(&self, id: &str) -> Option<&Discriminator> {
        self.discriminators.iter().find(|d| d.id == id)
    }

    /// Check if a discriminator belongs to this complaint
    pub fn has_discriminator(&self, id: &str) -> bool {
        self.discriminator(id).is_some()
    }

    /// Most urgent level any discriminator of this complaint can produce
    pub fn highest_acuity(&self) -> Option<UrgencyLevel> {
        self.discriminators.iter().map(|d| d.level).min()
    }
}

/// Serialized form of a catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    /// Protocol version
    pub version: String,

    #[serde(default)]
    pub complaints: Vec<PresentingComplaint>,
}

/// Versioned, read-only protocol table.
///
/// Complaints keep their insertion order. Lookups go through key indexes built
/// once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument", into = "CatalogDocument")]
pub struct ProtocolCatalog {
    version: String,
    complaints: Vec<PresentingComplaint>,
    levels: LevelTable,
    /// complaint id -> position in `complaints`
    complaint_index: HashMap<String, usize>,
    /// discriminator id -> (complaint position, discriminator position)
    discriminator_index: HashMap<String, (usize, usize)>,
}

impl ProtocolCatalog {
    /// Build a catalog, validating ids and uniqueness
    pub fn new(version: impl Into<String>, complaints: Vec<PresentingComplaint>) -> shared::Result<Self> {
        let version = version.into();
        validate(&version, &complaints)?;
        Ok(Self::from_parts(version, complaints))
    }

    /// The protocol table shipped with Acuity
    pub fn builtin() -> Self {
        Self::from_parts(crate::builtin::VERSION.to_string(), crate::builtin::complaints())
    }

    fn from_parts(version: String, complaints: Vec<PresentingComplaint>) -> Self {
        let mut complaint_index = HashMap::new();
        let mut discriminator_index = HashMap::new();

        for (ci, complaint) in complaints.iter().enumerate() {
            complaint_index.insert(complaint.id.clone(), ci);
            for (di, discriminator) in complaint.discriminators.iter().enumerate() {
                discriminator_index.insert(discriminator.id.clone(), (ci, di));
            }
        }

        Self {
            version,
            complaints,
            levels: LevelTable::default(),
            complaint_index,
            discriminator_index,
        }
    }

    /// Builder: replace the level table
    pub fn with_levels(mut self, levels: LevelTable) -> Self {
        self.levels = levels;
        self
    }

    /// Builder: replace the level table from configuration records
    pub fn with_level_config(self, levels: Vec<UrgencyLevelInfo>) -> shared::Result<Self> {
        Ok(self.with_levels(LevelTable::new(levels)?))
    }

    /// Parse a catalog from JSON
    pub fn from_json_str(s: &str) -> shared::Result<Self> {
        let document: CatalogDocument = serde_json::from_str(s)?;
        Self::try_from(document)
    }

    /// Parse a catalog from YAML
    pub fn from_yaml_str(s: &str) -> shared::Result<Self> {
        let document: CatalogDocument = serde_yaml::from_str(s)?;
        Self::try_from(document)
    }

    /// Load a catalog from a file; `.yaml`/`.yml` are YAML, anything else JSON
    pub fn from_file(path: &Path) -> shared::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = if is_yaml_path(path) {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            version = %catalog.version,
            complaints = catalog.complaints.len(),
            "loaded protocol catalog"
        );
        Ok(catalog)
    }

    /// Protocol version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// All complaints in insertion order
    pub fn list_complaints(&self) -> &[PresentingComplaint] {
        &self.complaints
    }

    /// Complaint ids in insertion order
    pub fn complaint_ids(&self) -> Vec<&str> {
        self.complaints.iter().map(|c| c.id.as_str()).collect()
    }

    /// Get a complaint by id
    pub fn find_complaint(&self, id: &str) -> Option<&PresentingComplaint> {
        self.complaint_index.get(id).map(|&i| &self.complaints[i])
    }

    /// Get a discriminator anywhere in the catalog, with its owning complaint
    pub fn find_discriminator(&self, id: &str) -> Option<(&PresentingComplaint, &Discriminator)> {
        self.discriminator_index.get(id).map(|&(ci, di)| {
            let complaint = &self.complaints[ci];
            (complaint, &complaint.discriminators[di])
        })
    }

    /// Metadata for a level
    pub fn level_info(&self, level: UrgencyLevel) -> &UrgencyLevelInfo {
        self.levels.info(level)
    }

    /// The level table
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.complaints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complaints.is_empty()
    }
}

impl TryFrom<CatalogDocument> for ProtocolCatalog {
    type Error = TriageError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(document.version, document.complaints)
    }
}

impl From<ProtocolCatalog> for CatalogDocument {
    fn from(catalog: ProtocolCatalog) -> Self {
        CatalogDocument {
            version: catalog.version,
            complaints: catalog.complaints,
        }
    }
}

impl Default for ProtocolCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(version: &str, complaints: &[PresentingComplaint]) -> shared::Result<()> {
    if version.trim().is_empty() {
        return Err(TriageError::Catalog("catalog version must not be empty".to_string()));
    }

    let id_pattern = regex::Regex::new(ID_PATTERN).map_err(|e| TriageError::Catalog(e.to_string()))?;
    let mut complaint_ids = std::collections::HashSet::new();
    let mut discriminator_owners: HashMap<&str, &str> = HashMap::new();

    for complaint in complaints {
        if !id_pattern.is_match(&complaint.id) {
            return Err(TriageError::Catalog(format!(
                "invalid complaint id '{}': ids must be lowercase words joined by '-'",
                complaint.id
            )));
        }
        if complaint.name.trim().is_empty() {
            return Err(TriageError::Catalog(format!("complaint '{}' has an empty name", complaint.id)));
        }
        if !complaint_ids.insert(complaint.id.as_str()) {
            return Err(TriageError::Catalog(format!("duplicate complaint id '{}'", complaint.id)));
        }
        if complaint.discriminators.is_empty() {
            return Err(TriageError::Catalog(format!(
                "complaint '{}' has no discriminators",
                complaint.id
            )));
        }

        for discriminator in &complaint.discriminators {
            if !id_pattern.is_match(&discriminator.id) {
                return Err(TriageError::Catalog(format!(
                    "invalid discriminator id '{}' in complaint '{}'",
                    discriminator.id, complaint.id
                )));
            }
            if let Some(owner) = discriminator_owners.insert(&discriminator.id, &complaint.id) {
                return Err(TriageError::Catalog(format!(
                    "discriminator id '{}' is used by both '{}' and '{}'",
                    discriminator.id, owner, complaint.id
                )));
            }
        }
    }

    Ok(())
}
