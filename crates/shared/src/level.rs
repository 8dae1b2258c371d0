//! Urgency levels and their presentation/SLA metadata

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TriageError;

/// Urgency category, 1 = most urgent.
///
/// The derived ordering follows the numeric value, so the most urgent level
/// compares as the smallest and `min` always selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UrgencyLevel {
    Immediate = 1,
    VeryUrgent = 2,
    Urgent = 3,
    Standard = 4,
    NonUrgent = 5,
}

impl UrgencyLevel {
    /// All levels, most urgent first
    pub const ALL: [UrgencyLevel; 5] = [
        UrgencyLevel::Immediate,
        UrgencyLevel::VeryUrgent,
        UrgencyLevel::Urgent,
        UrgencyLevel::Standard,
        UrgencyLevel::NonUrgent,
    ];

    /// Numeric value (1-5)
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Zero-based position, used to index level tables
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Check if this level is more urgent than another
    pub fn is_more_urgent_than(self, other: UrgencyLevel) -> bool {
        self < other
    }
}

impl TryFrom<u8> for UrgencyLevel {
    type Error = TriageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UrgencyLevel::Immediate),
            2 => Ok(UrgencyLevel::VeryUrgent),
            3 => Ok(UrgencyLevel::Urgent),
            4 => Ok(UrgencyLevel::Standard),
            5 => Ok(UrgencyLevel::NonUrgent),
            other => Err(TriageError::InvalidLevel(other)),
        }
    }
}

impl From<UrgencyLevel> for u8 {
    fn from(level: UrgencyLevel) -> Self {
        level.value()
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Presentation color for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl LevelColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelColor::Red => "red",
            LevelColor::Orange => "orange",
            LevelColor::Yellow => "yellow",
            LevelColor::Green => "green",
            LevelColor::Blue => "blue",
        }
    }
}

/// Label, color and target response time for one urgency level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyLevelInfo {
    pub level: UrgencyLevel,

    /// Display name (e.g. "Very Urgent")
    pub name: String,

    pub color: LevelColor,

    /// Maximum minutes before the patient should be seen
    pub target_minutes: u32,
}

impl UrgencyLevelInfo {
    pub fn new(level: UrgencyLevel, name: impl Into<String>, color: LevelColor, target_minutes: u32) -> Self {
        Self {
            level,
            name: name.into(),
            color,
            target_minutes,
        }
    }

    /// The canonical five-level table as configuration records
    pub fn defaults() -> Vec<UrgencyLevelInfo> {
        Self::default_table().to_vec()
    }

    /// The canonical five-level table, most urgent first
    pub fn default_table() -> [UrgencyLevelInfo; 5] {
        [
            Self::new(UrgencyLevel::Immediate, "Immediate", LevelColor::Red, 0),
            Self::new(UrgencyLevel::VeryUrgent, "Very Urgent", LevelColor::Orange, 10),
            Self::new(UrgencyLevel::Urgent, "Urgent", LevelColor::Yellow, 60),
            Self::new(UrgencyLevel::Standard, "Standard", LevelColor::Green, 120),
            Self::new(UrgencyLevel::NonUrgent, "Non-Urgent", LevelColor::Blue, 240),
        ]
    }
}
