use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the backend deployments the board can talk to.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Backend running on this machine.
    #[default]
    Local,
    /// The hosted restaurant backend.
    Production,
    /// Any other backend, addressed by its base URL.
    Custom { backend_url: String },
}

impl Environment {
    /// Returns the REST base URL associated with the environment.
    pub fn backend_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Production => "https://api.kitchen-board.app".to_string(),
            Environment::Custom { backend_url } => backend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the WebSocket endpoint of the backend's Socket.IO server.
    pub fn socket_url(&self) -> String {
        let base = self.backend_url();
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base
        };
        format!("{}/socket.io/?EIO=4&transport=websocket", ws_base)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((scheme, rest)) = trimmed.split_once("://") {
            // Scheme is kept lowercase for the WebSocket swap.
            let scheme = scheme.to_ascii_lowercase();
            return match scheme.as_str() {
                "http" | "https" => Ok(Environment::Custom {
                    backend_url: format!("{}://{}", scheme, rest),
                }),
                _ => Err(()),
            };
        }
        match trimmed.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.backend_url())
    }
}
