//! `specht.toml` settings.
//!
//! ```toml
//! database = "data.db"
//!
//! [evaluator]
//! strategy = "distributed"
//! workers = 8
//! max_n = 40
//! ```
//!
//! Every key is optional. `SPECHT_DB` overrides `database`; command-line
//! flags override both.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use specht::EvaluatorConfig;

use crate::error::{Result, StoreError};

/// Settings file looked up in the working directory.
pub const DEFAULT_FILE: &str = "specht.toml";

/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "SPECHT_DB";

/// Database location and evaluator knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// SQLite database path.
    pub database: PathBuf,
    /// Evaluator and population loop configuration.
    pub evaluator: EvaluatorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: PathBuf::from("data.db"),
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl Settings {
    /// Parses settings text; `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SettingsParse`] for invalid TOML or unknown keys.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| StoreError::SettingsParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SettingsIo`] if the file cannot be read, or
    /// [`StoreError::SettingsParse`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Loads `explicit` if given, else [`DEFAULT_FILE`] if present, else the
    /// defaults, then applies [`DATABASE_ENV`].
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load); a missing default file is not an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let default = Path::new(DEFAULT_FILE);
                if default.is_file() {
                    Self::load(default)?
                } else {
                    Self::default()
                }
            }
        };
        settings.override_database(std::env::var_os(DATABASE_ENV));
        Ok(settings)
    }

    /// Replaces the database path with a non-empty `value`.
    pub fn override_database(&mut self, value: Option<OsString>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            tracing::debug!(database = ?value, "database path from environment");
            self.database = PathBuf::from(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specht::{OrbitPolicy, Strategy};

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml("", Path::new("specht.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.evaluator.min_n, 2);
        assert!(settings.evaluator.skip_known_families);
    }

    #[test]
    fn evaluator_table() {
        let text = r#"
            database = "/var/lib/specht/data.db"

            [evaluator]
            strategy = "distributed"
            workers = 8
            max_n = 40
            policy = "set"
        "#;
        let settings = Settings::from_toml(text, Path::new("specht.toml")).unwrap();
        assert_eq!(settings.database, PathBuf::from("/var/lib/specht/data.db"));
        assert_eq!(settings.evaluator.strategy, Strategy::Distributed);
        assert_eq!(settings.evaluator.workers, Some(8));
        assert_eq!(settings.evaluator.max_n, Some(40));
        assert_eq!(settings.evaluator.policy, OrbitPolicy::Set);
        assert_eq!(settings.evaluator.min_n, 2);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Settings::from_toml("[evaluator]\nthreads = 4\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, StoreError::SettingsParse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load(Path::new("/nonexistent/specht.toml")).unwrap_err();
        assert!(matches!(err, StoreError::SettingsIo { .. }));
    }

    #[test]
    fn database_override() {
        let mut settings = Settings::default();
        settings.override_database(Some(OsString::new()));
        assert_eq!(settings.database, PathBuf::from("data.db"));
        settings.override_database(Some(OsString::from("other.db")));
        assert_eq!(settings.database, PathBuf::from("other.db"));
        settings.override_database(None);
        assert_eq!(settings.database, PathBuf::from("other.db"));
    }
}
