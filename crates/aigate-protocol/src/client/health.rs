use serde::{Deserialize, Serialize};

/// Envelope for `GET /api/health`. Reports credential presence per provider,
/// not connectivity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub services: HealthServices,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthServices {
    pub api: ServiceStatus,
    pub aiml: ServiceStatus,
    pub luma: ServiceStatus,
    pub serper: ServiceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Operational,
    Configured,
    MissingKey,
}

impl ServiceStatus {
    pub fn from_configured(configured: bool) -> Self {
        if configured {
            ServiceStatus::Configured
        } else {
            ServiceStatus::MissingKey
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ServiceStatus::MissingKey).unwrap(),
            r#""missing_key""#
        );
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Configured).unwrap(),
            r#""configured""#
        );
    }
}
