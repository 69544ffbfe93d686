//! Persisted configuration: credentials, workspace, saved repositories, and
//! the per-repository branch selections remembered between runs.
//!
//! The whole document lives in one JSON file under `~/.config/bbpr/` and is
//! rewritten wholesale at every save checkpoint. A missing or unreadable
//! file falls back to defaults; configuration problems are never fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BbprError, Result};
use crate::output::{print_warning, GREEN, RESET};
use crate::prompt::Prompt;

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "bbpr";
const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bitbucket username.
    #[serde(default)]
    pub username: String,

    /// Bitbucket app password.
    #[serde(default)]
    pub password: String,

    /// Workspace (account or organization namespace) containing the repos.
    #[serde(default)]
    pub workspace: String,

    /// Saved repository names, unique, in the order they were added.
    #[serde(default)]
    pub repos: Vec<String>,

    /// Last-used source branch, keyed by repository name. The map enforces
    /// the at-most-one-entry-per-repo invariant.
    #[serde(default)]
    pub source_branches: BTreeMap<String, String>,

    /// Last-used destination branch set, keyed by repository name, kept in
    /// the order the branches were selected.
    #[serde(default)]
    pub destination_branches: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Whether credentials are complete enough to talk to the API.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.workspace.is_empty()
    }

    pub fn source_branch_for(&self, repo: &str) -> Option<&str> {
        self.source_branches.get(repo).map(String::as_str)
    }

    pub fn destination_branches_for(&self, repo: &str) -> Option<&[String]> {
        self.destination_branches
            .get(repo)
            .filter(|set| !set.is_empty())
            .map(Vec::as_slice)
    }

    /// Record the branches a workflow run resolved, overwriting any prior
    /// entry for the repository.
    pub fn remember_branches(&mut self, repo: &str, source: &str, destinations: &[String]) {
        self.source_branches
            .insert(repo.to_string(), source.to_string());
        self.destination_branches
            .insert(repo.to_string(), destinations.to_vec());
    }
}

/// Config value paired with the file it was loaded from.
///
/// Replaces the usual global mutable config: callers hold a store, mutate
/// `config`, and call [`save`](ConfigStore::save) at checkpoints.
pub struct ConfigStore {
    path: PathBuf,
    pub config: Config,
}

impl ConfigStore {
    /// Load from the default per-user location, falling back to defaults if
    /// the file is missing or unreadable.
    pub fn open() -> Result<Self> {
        Ok(Self::at(config_path()?))
    }

    /// Load from an explicit path (tests point this at a temp file).
    pub fn at(path: PathBuf) -> Self {
        let config = load_config(&path);
        Self { path, config }
    }

    /// Write the whole document back to disk, creating parent directories
    /// as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Path to `~/.config/bbpr/config.json`.
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BbprError::Config("Could not determine home directory".to_string()))?;
    Ok(home
        .join(".config")
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILENAME))
}

fn load_config(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                print_warning(&format!(
                    "Could not parse {}: {}. Using defaults.",
                    path.display(),
                    e
                ));
                Config::default()
            }
        },
        Err(e) => {
            print_warning(&format!(
                "Could not read {}: {}. Using defaults.",
                path.display(),
                e
            ));
            Config::default()
        }
    }
}

/// First-run (or `--configure`) setup: prompt for credentials and workspace,
/// then save immediately.
pub fn setup(prompt: &dyn Prompt, store: &mut ConfigStore) -> Result<()> {
    store.config.username = prompt.input("Enter your Bitbucket username")?;
    store.config.password = prompt.input("Enter your Bitbucket app password")?;
    store.config.workspace = prompt.input("Enter your Bitbucket workspace")?;
    store.save()?;
    println!("{GREEN}Configuration saved.{RESET}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join("config.json"))
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.config, Config::default());
        assert!(!store.config.is_configured());
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.config.username = "alice".to_string();
        store.config.password = "app-pass".to_string();
        store.config.workspace = "acme".to_string();
        store.config.repos.push("svc-api".to_string());
        store.config.remember_branches(
            "svc-api",
            "develop",
            &["staging".to_string(), "prod".to_string()],
        );
        store.save().unwrap();

        let reloaded = store_in(&dir);
        assert_eq!(reloaded.config, store.config);
        assert!(reloaded.config.is_configured());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        let store = ConfigStore::at(path);
        assert_eq!(store.config, Config::default());
    }

    #[test]
    fn partial_document_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"username": "alice", "workspace": "acme"}"#).unwrap();
        let store = ConfigStore::at(path);
        assert_eq!(store.config.username, "alice");
        assert!(store.config.password.is_empty());
        assert!(store.config.repos.is_empty());
        assert!(!store.config.is_configured());
    }

    #[test]
    fn remember_branches_overwrites_prior_entry() {
        let mut config = Config::default();
        config.remember_branches("svc-api", "develop", &["staging".to_string()]);
        config.remember_branches("svc-api", "main", &["prod".to_string()]);

        assert_eq!(config.source_branch_for("svc-api"), Some("main"));
        assert_eq!(
            config.destination_branches_for("svc-api"),
            Some(&["prod".to_string()][..])
        );
        assert_eq!(config.source_branches.len(), 1);
    }

    #[test]
    fn empty_destination_set_reads_as_absent() {
        let mut config = Config::default();
        config
            .destination_branches
            .insert("svc-api".to_string(), Vec::new());
        assert_eq!(config.destination_branches_for("svc-api"), None);
    }
}
