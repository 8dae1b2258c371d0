//! Error types for Acuity

use thiserror::Error;

/// Error thrown when a session references a complaint the catalog does not define
#[derive(Debug, Error)]
#[error("Complaint '{complaint_id}' not found. Available complaints: {}", .available_complaints.join(", "))]
pub struct UnknownComplaintError {
    pub complaint_id: String,
    pub available_complaints: Vec<String>,
}

/// Error thrown when a discriminator does not belong to the selected complaint
#[derive(Debug, Error)]
#[error("Discriminator '{discriminator_id}' is not part of complaint '{complaint_id}'")]
pub struct UnknownDiscriminatorError {
    pub discriminator_id: String,
    pub complaint_id: String,
}

/// General triage error type
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Invalid override: an override to level {level} requires a non-empty clinical justification")]
    InvalidOverride { level: u8 },

    #[error("Invalid urgency level {0}: expected 1-5")]
    InvalidLevel(u8),

    #[error(transparent)]
    UnknownComplaint(#[from] UnknownComplaintError),

    #[error(transparent)]
    UnknownDiscriminator(#[from] UnknownDiscriminatorError),

    #[error("Cannot {action} while assessment is {state}")]
    InvalidTransition { action: String, state: String },

    #[error("Invalid vital sign: {0}")]
    InvalidVital(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_complaint_message_lists_available() {
        let err: TriageError = UnknownComplaintError {
            complaint_id: "toothache".to_string(),
            available_complaints: vec!["chest-pain".to_string(), "headache".to_string()],
        }
        .into();

        let msg = err.to_string();
        assert!(msg.contains("toothache"));
        assert!(msg.contains("chest-pain, headache"));
    }

    #[test]
    fn test_invalid_override_message() {
        let err = TriageError::InvalidOverride { level: 1 };
        assert!(err.to_string().contains("level 1"));
        assert!(err.to_string().contains("justification"));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = TriageError::InvalidTransition {
            action: "finalize".to_string(),
            state: "ComplaintSelected".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot finalize while assessment is ComplaintSelected");
    }
}
