//! Application configuration.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Get the path to the board's config file, typically located at ~/.kitchen-board/config.json.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    let config_path = home_path.join(".kitchen-board").join("config.json");
    Ok(config_path)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token issued by the backend at login.
    pub token: String,

    /// Backend user the token belongs to.
    #[serde(default)]
    pub user_id: String,

    /// Restaurant (kitchen) the user is linked to.
    #[serde(default)]
    pub restaurant_id: String,

    /// Backend the token was issued by.
    #[serde(default)]
    pub environment: Environment,
}

impl Config {
    /// Create Config with the given session details.
    pub fn new(
        token: String,
        user_id: String,
        restaurant_id: String,
        environment: Environment,
    ) -> Self {
        Config {
            token,
            user_id,
            restaurant_id,
            environment,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the stored session, if any.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
