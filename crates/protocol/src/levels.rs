//! LevelTable - Urgency level metadata lookup

use shared::{validate_level_table, TriageError, UrgencyLevel, UrgencyLevelInfo};

/// The five level records, indexed by level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    levels: [UrgencyLevelInfo; 5],
}

impl LevelTable {
    /// Build a table from configuration records.
    ///
    /// The records may come in any order but must cover levels 1-5 exactly once.
    pub fn new(mut levels: Vec<UrgencyLevelInfo>) -> shared::Result<Self> {
        validate_level_table(&levels)?;
        levels.sort_by_key(|info| info.level);

        let levels: [UrgencyLevelInfo; 5] = levels
            .try_into()
            .map_err(|_| TriageError::Config("level table must define exactly 5 levels".to_string()))?;
        Ok(Self { levels })
    }

    /// Metadata for a level. Total: every `UrgencyLevel` has an entry.
    pub fn info(&self, level: UrgencyLevel) -> &UrgencyLevelInfo {
        &self.levels[level.index()]
    }

    /// Target response time in minutes
    pub fn target_minutes(&self, level: UrgencyLevel) -> u32 {
        self.info(level).target_minutes
    }

    /// All levels, most urgent first
    pub fn iter(&self) -> impl Iterator<Item = &UrgencyLevelInfo> {
        self.levels.iter()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: UrgencyLevelInfo::default_table(),
        }
    }
}
