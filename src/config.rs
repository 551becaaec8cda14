//! User configuration: `config.json` in the platform config directory, plus
//! command-line overrides.

use crate::checkers::{Difficulty, DEFAULT_AI_THINK_TICKS};
use crate::error::{CheckersError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckersConfig {
    /// Starting AI difficulty
    pub difficulty: Difficulty,

    /// Ticks the AI waits before playing a move
    pub ai_think_ticks: u32,

    /// Length of one UI tick in milliseconds
    pub tick_ms: u64,

    /// Random seed for reproducible AI play (None = random)
    pub seed: Option<u64>,

    /// `tracing` filter used when `CHECKERS_LOG` is unset
    pub log_filter: String,
}

impl Default for CheckersConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            ai_think_ticks: DEFAULT_AI_THINK_TICKS,
            tick_ms: 100,
            seed: None,
            log_filter: "info".to_string(),
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Play,
    Version,
    Help,
}

impl CheckersConfig {
    /// Reject values the game loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(CheckersError::Config {
                message: "tick_ms must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Apply command-line arguments (without the program name) on top of
    /// this config.
    pub fn apply_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<CliCommand> {
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--version" | "-v" => return Ok(CliCommand::Version),
                "--help" | "-h" => return Ok(CliCommand::Help),
                _ => {}
            }

            if let Some(value) = arg.strip_prefix("--difficulty=") {
                self.difficulty = Difficulty::parse(value).ok_or_else(|| CheckersError::Config {
                    message: format!("unknown difficulty '{}'", value),
                })?;
            } else if let Some(value) = arg.strip_prefix("--seed=") {
                let seed = value.parse().map_err(|_| CheckersError::Config {
                    message: format!("invalid seed '{}'", value),
                })?;
                self.seed = Some(seed);
            } else {
                return Err(CheckersError::Config {
                    message: format!("unknown argument '{}'", arg),
                });
            }
        }
        Ok(CliCommand::Play)
    }
}

/// Reads and writes the config file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store in the platform config directory, created if needed.
    pub fn new() -> Result<Self> {
        let dirs = project_dirs()?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self::at(config_dir.join(CONFIG_FILE)))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config. A missing file gives defaults; a malformed one is
    /// logged and replaced by defaults.
    pub fn load(&self) -> Result<CheckersConfig> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(CheckersConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: CheckersConfig = match serde_json::from_str(&json) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Malformed config, using defaults");
                return Ok(CheckersConfig::default());
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &CheckersConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Record `difficulty` in the stored file, leaving its other values (and
    /// any command-line overrides of this session) alone.
    pub fn save_difficulty(&self, difficulty: Difficulty) -> Result<()> {
        let mut stored = self.load()?;
        if stored.difficulty == difficulty {
            return Ok(());
        }
        stored.difficulty = difficulty;
        self.save(&stored)?;
        tracing::debug!(difficulty = difficulty.name(), "Saved difficulty");
        Ok(())
    }
}

/// Platform data directory (log file location), created if needed.
pub fn data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let dir = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "checkers").ok_or_else(|| {
        CheckersError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config directory",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A store in a unique temporary directory
    fn test_store() -> ConfigStore {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "checkers-config-test-{}-{}",
            std::process::id(),
            test_id
        ));
        ConfigStore::at(dir.join(CONFIG_FILE))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let store = test_store();
        assert_eq!(store.load().unwrap(), CheckersConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let store = test_store();
        let config = CheckersConfig {
            difficulty: Difficulty::Hard,
            ai_think_ticks: 2,
            seed: Some(42),
            ..Default::default()
        };

        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let store = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{ "difficulty": "easy" }"#).unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.ai_think_ticks, DEFAULT_AI_THINK_TICKS);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let store = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load().unwrap(), CheckersConfig::default());

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_save_difficulty_keeps_other_values() {
        let store = test_store();
        let stored = CheckersConfig {
            ai_think_ticks: 3,
            log_filter: "debug".to_string(),
            ..Default::default()
        };
        store.save(&stored).unwrap();

        store.save_difficulty(Difficulty::Easy).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.difficulty, Difficulty::Easy);
        assert_eq!(loaded.ai_think_ticks, 3);
        assert_eq!(loaded.log_filter, "debug");
        assert_eq!(loaded.seed, None);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_save_difficulty_creates_missing_file() {
        let store = test_store();

        store.save_difficulty(Difficulty::Hard).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.difficulty, Difficulty::Hard);
        assert_eq!(loaded.tick_ms, CheckersConfig::default().tick_ms);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let store = test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{ "tick_ms": 0 }"#).unwrap();

        assert!(matches!(store.load(), Err(CheckersError::Config { .. })));

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_args_override_config() {
        let mut config = CheckersConfig::default();
        let command = config
            .apply_args(&["--difficulty=hard", "--seed=7"])
            .unwrap();

        assert_eq!(command, CliCommand::Play);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_args_version_and_help() {
        let mut config = CheckersConfig::default();
        assert_eq!(config.apply_args(&["--version"]).unwrap(), CliCommand::Version);
        assert_eq!(config.apply_args(&["-h"]).unwrap(), CliCommand::Help);
        assert_eq!(config.apply_args::<&str>(&[]).unwrap(), CliCommand::Play);
    }

    #[test]
    fn test_bad_args_rejected() {
        let mut config = CheckersConfig::default();
        assert!(config.apply_args(&["--difficulty=expert"]).is_err());
        assert!(config.apply_args(&["--seed=abc"]).is_err());
        assert!(config.apply_args(&["--turbo"]).is_err());
    }
}
