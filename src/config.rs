//! Server identity reported during `initialize`.

use rmcp::model::{Implementation, ProtocolVersion};

pub const DEFAULT_SERVER_NAME: &str = "Classic ML Training Server";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    /// Accepted protocol revisions, newest first.
    pub protocol_versions: Vec<ProtocolVersion>,
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_versions: vec![
                ProtocolVersion::V_2025_06_18,
                ProtocolVersion::V_2025_03_26,
                ProtocolVersion::V_2024_11_05,
            ],
            instructions: Some(
                "Call train_classifier_from_csv with a CSV path and the name of its label column."
                    .to_string(),
            ),
        }
    }
}

impl ServerConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn server_info(&self) -> Implementation {
        Implementation {
            name: self.name.clone(),
            version: self.version.clone(),
            ..Implementation::from_build_env()
        }
    }

    pub fn latest_protocol(&self) -> ProtocolVersion {
        self.protocol_versions
            .first()
            .cloned()
            .unwrap_or(ProtocolVersion::V_2025_06_18)
    }

    /// Echo the client's revision when supported, else offer our newest.
    pub fn negotiate_protocol(&self, requested: &ProtocolVersion) -> ProtocolVersion {
        if self.protocol_versions.contains(requested) {
            requested.clone()
        } else {
            self.latest_protocol()
        }
    }
}
