//! Layered configuration.
//!
//! Values are merged from, in increasing priority:
//!
//! 1. built-in defaults,
//! 2. a configuration file: either the one given explicitly (TOML, YAML or
//!    JSON, chosen by extension) or `config.toml` in the user's configuration
//!    directory, if it exists,
//! 3. environment variables prefixed with `SHELF_`, with `__` separating
//!    sections from keys (`SHELF_RENAME__DEFER_ON_ERROR=false`).
//!
//! ```toml
//! [rename]
//! strategy = "legacy"
//! script = "/home/me/.config/shelf/default.script"
//! max_episode_title_length = 40
//!
//! [placement]
//! skip_disk_space_checks = false
//! io_timeout_secs = 10
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use shelf_placement::{DEFAULT_IO_TIMEOUT, PlacementOptions};
use shelf_script::{DEFAULT_MAX_EPISODE_TITLE_LENGTH, RenameOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;

pub const ENV_PREFIX: &str = "SHELF_";
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Strategy used when none is configured.
pub const DEFAULT_STRATEGY: &str = "legacy";
pub const DEFAULT_SCRIPT_NAME: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rename: RenameConfig,
    pub placement: PlacementConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Episode titles longer than this are truncated.
    pub max_episode_title_length: usize,
    /// Try the next strategy when the preferred one fails.
    pub defer_on_error: bool,
    /// Identifier of the preferred renaming strategy.
    pub strategy: String,
    /// Path to the renaming script.
    pub script: Option<PathBuf>,
    pub script_name: String,
}
impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            max_episode_title_length: DEFAULT_MAX_EPISODE_TITLE_LENGTH,
            defer_on_error: true,
            strategy: DEFAULT_STRATEGY.to_string(),
            script: None,
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
        }
    }
}
impl RenameConfig {
    pub fn options(&self) -> RenameOptions {
        RenameOptions {
            max_episode_title_length: self.max_episode_title_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub skip_disk_space_checks: bool,
    /// Limit for each filesystem query, in seconds; `0` disables it.
    pub io_timeout_secs: u64,
}
impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            skip_disk_space_checks: false,
            io_timeout_secs: DEFAULT_IO_TIMEOUT.as_secs(),
        }
    }
}
impl PlacementConfig {
    pub fn options(&self) -> PlacementOptions {
        PlacementOptions {
            skip_disk_space_checks: self.skip_disk_space_checks,
            io_timeout: (self.io_timeout_secs > 0).then(|| Duration::from_secs(self.io_timeout_secs)),
        }
    }
}

impl Config {
    /// Location of the configuration file used when none is given.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "shelf").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Builds the layered provider without extracting it.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match path {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::Load(format!("{} is not a file", path.display())));
                }
                let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
                match extension.as_deref() {
                    Some("toml") => figment.merge(Toml::file(path)),
                    Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                    Some("json") => figment.merge(Json::file(path)),
                    _ => exn::bail!(ErrorKind::Load(format!(
                        "unsupported configuration format: {}",
                        path.display()
                    ))),
                }
            },
            None => match Self::default_path() {
                Some(default) => figment.merge(Toml::file(default)),
                None => figment,
            },
        };
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_figment(&Self::figment(path)?)
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Load("unable to extract values".to_string()))?;
        config.validate()?;
        tracing::debug!(strategy = %config.rename.strategy, "Configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rename.max_episode_title_length == 0 {
            exn::bail!(ErrorKind::Invalid("rename.max_episode_title_length must be at least 1".to_string()));
        }
        if self.rename.strategy.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("rename.strategy must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_figment(&Figment::from(Serialized::defaults(Config::default()))).unwrap();
        assert_eq!(config.rename.max_episode_title_length, 33);
        assert!(config.rename.defer_on_error);
        assert_eq!(config.rename.strategy, "legacy");
        assert_eq!(config.rename.script, None);
        assert!(!config.placement.skip_disk_space_checks);
        assert_eq!(config.placement.options().io_timeout, Some(Duration::from_secs(10)));
    }

    #[rstest]
    #[case(
        "config.toml",
        "[rename]\nmax_episode_title_length = 40\nscript = \"/scripts/default.txt\"\n[placement]\nio_timeout_secs = 0\n"
    )]
    #[case(
        "config.yaml",
        "rename:\n  max_episode_title_length: 40\n  script: /scripts/default.txt\nplacement:\n  io_timeout_secs: 0\n"
    )]
    #[case(
        "config.json",
        r#"{"rename": {"max_episode_title_length": 40, "script": "/scripts/default.txt"}, "placement": {"io_timeout_secs": 0}}"#
    )]
    fn test_load_file(#[case] name: &str, #[case] contents: &str) {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, name, contents);
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.rename.max_episode_title_length, 40);
        assert_eq!(config.rename.script, Some(PathBuf::from("/scripts/default.txt")));
        // Unset values keep their defaults.
        assert_eq!(config.rename.script_name, "default");
        assert_eq!(config.rename.options().max_episode_title_length, 40);
        assert_eq!(config.placement.options().io_timeout, None);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.ini", "[rename]\n");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load(_)));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "[rename]\nmax_episode_title_length = \"long\"\n");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load(_)));
    }

    #[test]
    fn test_zero_title_length_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "[rename]\nmax_episode_title_length = 0\n");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid(_)));
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[rename]\nstrategy = \"from-file\"\ndefer_on_error = true\n")?;
            jail.set_env("SHELF_RENAME__DEFER_ON_ERROR", "false");
            jail.set_env("SHELF_PLACEMENT__SKIP_DISK_SPACE_CHECKS", "true");
            let config = Config::load(Some(Path::new("config.toml"))).map_err(|e| (*e).to_string())?;
            assert_eq!(config.rename.strategy, "from-file");
            assert!(!config.rename.defer_on_error);
            assert!(config.placement.skip_disk_space_checks);
            Ok(())
        });
    }
}
