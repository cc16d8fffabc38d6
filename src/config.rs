//! Client configuration.
//!
//! Stored as JSON at `~/.tt/config.json`: the service base URL, the group
//! and default task list the client talks to, and an optional bearer token.
//! `TT_API_URL`, `TT_GROUP`, `TT_LIST` and `TT_TOKEN` override the file,
//! which keeps tokens out of it entirely when preferred.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub task_list_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            group_id: None,
            task_list_id: None,
            token: None,
        }
    }
}

impl Config {
    /// The client's data directory (`~/.tt`), also home to the TUI log.
    pub fn default_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".tt")
    }

    pub fn default_path() -> PathBuf {
        Self::default_dir().join("config.json")
    }

    /// Load from JSON file, falling back to defaults if the file doesn't
    /// exist or fails to parse.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        let mut buf = String::new();
        match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => match serde_json::from_str(&buf) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config, using defaults: {e}");
                    Config::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config, using defaults: {e}");
                Config::default()
            }
        }
    }

    /// Save to JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Apply `TT_*` environment overrides on top of the file values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TT_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Ok(group) = std::env::var("TT_GROUP") {
            if !group.trim().is_empty() {
                self.group_id = Some(group);
            }
        }
        if let Ok(list) = std::env::var("TT_LIST") {
            if let Ok(id) = list.trim().parse() {
                self.task_list_id = Some(id);
            }
        }
        if let Ok(token) = std::env::var("TT_TOKEN") {
            if !token.trim().is_empty() {
                self.token = Some(token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.group_id.is_none());
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            api_url: "https://api.example.com".to_string(),
            group_id: Some("3".to_string()),
            task_list_id: Some(7),
            token: Some("secret".to_string()),
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path);
        assert_eq!(loaded.api_url, "https://api.example.com");
        assert_eq!(loaded.group_id.as_deref(), Some("3"));
        assert_eq!(loaded.task_list_id, Some(7));
        assert_eq!(loaded.token.as_deref(), Some("secret"));
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        let config = Config::load(&path);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
