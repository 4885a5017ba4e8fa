//! Error types shared by the engine, the collaborators and the API layer.

use thiserror::Error;

/// Errors surfaced by the recommendation engine and its collaborators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisorError {
    /// Unknown variety or category id (user-input error, surfaced verbatim)
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// A numeric input is NaN, infinite or outside its domain
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Weather or advice-generation collaborator failed
    #[error("{service} unavailable: {reason}")]
    UpstreamUnavailable { service: &'static str, reason: String },
}

impl AdvisorError {
    pub fn variety_not_found(id: &str) -> Self {
        AdvisorError::NotFound { entity: "variety", id: id.to_string() }
    }

    pub fn category_not_found(id: &str) -> Self {
        AdvisorError::NotFound { entity: "category", id: id.to_string() }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AdvisorError::InvalidInput { field, reason: reason.into() }
    }

    pub fn upstream(service: &'static str, reason: impl Into<String>) -> Self {
        AdvisorError::UpstreamUnavailable { service, reason: reason.into() }
    }

    /// Stable kind string used in structured error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AdvisorError::NotFound { .. } => "NotFound",
            AdvisorError::InvalidInput { .. } => "InvalidInput",
            AdvisorError::UpstreamUnavailable { .. } => "UpstreamUnavailable",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(AdvisorError::variety_not_found("x").kind(), "NotFound");
        assert_eq!(AdvisorError::invalid("soil_ph", "NaN").kind(), "InvalidInput");
        assert_eq!(AdvisorError::upstream("weather", "timeout").kind(), "UpstreamUnavailable");
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = AdvisorError::invalid("soil_moisture_pct", "must be within [0, 100], got 140");
        assert_eq!(
            err.to_string(),
            "invalid soil_moisture_pct: must be within [0, 100], got 140"
        );

        let err = AdvisorError::variety_not_found("rice_unknown");
        assert_eq!(err.to_string(), "variety 'rice_unknown' not found");
    }
}
