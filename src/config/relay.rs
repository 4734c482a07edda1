//! Relay endpoint configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Paths the relay serves.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// WebSocket upgrade path for subscribers
    #[serde(default = "default_ws_path")]
    pub ws_path: String,

    /// Admin publish path
    #[serde(default = "default_publish_path")]
    pub publish_path: String,

    /// Health check path
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

impl RelayConfig {
    /// Validate relay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for path in [&self.ws_path, &self.publish_path, &self.health_path] {
            if !path.starts_with('/') {
                return Err(ValidationError::InvalidPath(path.clone()));
            }
        }
        if self.ws_path == self.publish_path
            || self.ws_path == self.health_path
            || self.publish_path == self.health_path
        {
            return Err(ValidationError::DuplicatePath);
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ws_path: default_ws_path(),
            publish_path: default_publish_path(),
            health_path: default_health_path(),
        }
    }
}

fn default_ws_path() -> String {
    "/ws".to_string()
}

fn default_publish_path() -> String {
    "/admin/message".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.ws_path, "/ws");
        assert_eq!(config.publish_path, "/admin/message");
        assert_eq!(config.health_path, "/health");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_relative_path() {
        let config = RelayConfig {
            ws_path: "ws".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_validation_duplicate_path() {
        let config = RelayConfig {
            publish_path: "/ws".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::DuplicatePath)
        ));
    }
}
