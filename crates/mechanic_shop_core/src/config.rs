//! Process configuration: positional connection arguments and logging
//! environment variables.
//!
//! # Invariants
//! - Exactly three positional arguments: `<dbname> <port> <user>`.
//! - Parsing never touches the store.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const USAGE: &str = "Usage: mechanic_shop <dbname> <port> <user>";

pub const LOG_LEVEL_ENV: &str = "MECHANIC_SHOP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "MECHANIC_SHOP_LOG_DIR";

const DEFAULT_DB_EXTENSION: &str = "db";

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Wrong number of positional arguments.
    Arity(usize),
    /// The port argument is not a TCP port number.
    Port(String),
}

impl Display for UsageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arity(count) => write!(f, "expected 3 arguments, got {count}"),
            Self::Port(value) => write!(f, "invalid port `{value}`"),
        }
    }
}

impl Error for UsageError {}

/// Where and as whom the session connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectArgs {
    pub dbname: String,
    pub port: u16,
    pub user: String,
}

impl ConnectArgs {
    /// Parses the arguments that follow the program name.
    pub fn parse(args: &[String]) -> Result<Self, UsageError> {
        let [dbname, port, user] = args else {
            return Err(UsageError::Arity(args.len()));
        };
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| UsageError::Port(port.clone()))?;
        Ok(Self {
            dbname: dbname.clone(),
            port,
            user: user.clone(),
        })
    }

    /// SQLite file backing `dbname`; `.db` is appended when no extension is given.
    pub fn database_path(&self) -> PathBuf {
        let path = Path::new(&self.dbname);
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(DEFAULT_DB_EXTENSION)
        }
    }
}

/// Logging level and directory resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub dir: PathBuf,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to build-mode defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let level = lookup(LOG_LEVEL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());
        let dir = lookup(LOG_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("mechanic_shop").join("logs"));
        Self { level, dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_accepts_three_arguments() {
        let parsed = ConnectArgs::parse(&args(&["shop", "5432", "desk"])).unwrap();
        assert_eq!(parsed.port, 5432);
        assert_eq!(parsed.database_path(), PathBuf::from("shop.db"));
    }

    #[test]
    fn parse_rejects_wrong_arity_and_bad_port() {
        assert_eq!(
            ConnectArgs::parse(&args(&["shop"])),
            Err(UsageError::Arity(1))
        );
        assert_eq!(
            ConnectArgs::parse(&args(&["shop", "port", "desk"])),
            Err(UsageError::Port("port".to_string()))
        );
    }

    #[test]
    fn database_path_keeps_explicit_extension() {
        let parsed = ConnectArgs::parse(&args(&["/tmp/shop.sqlite3", "1", "u"])).unwrap();
        assert_eq!(parsed.database_path(), PathBuf::from("/tmp/shop.sqlite3"));
    }

    #[test]
    fn log_settings_fall_back_to_defaults() {
        let settings = LogSettings::from_lookup(|_| None);
        assert_eq!(settings.level, default_log_level());
        assert!(settings.dir.ends_with("mechanic_shop/logs"));

        let settings = LogSettings::from_lookup(|key| match key {
            LOG_LEVEL_ENV => Some("warn".to_string()),
            LOG_DIR_ENV => Some("/var/log/shop".to_string()),
            _ => None,
        });
        assert_eq!(settings.level, "warn");
        assert_eq!(settings.dir, PathBuf::from("/var/log/shop"));
    }
}
