use std::path::{Path, PathBuf};

use super::Config;
use crate::{Error, Result};

/// Returns the config directory: `~/.config/winlabel/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("winlabel"))
}

/// Returns the config file path: `~/.config/winlabel/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Reads, parses and validates a config file.
///
/// Returns the config together with the repairs made by
/// [`Config::validate`].
pub fn try_load_from(path: &Path) -> Result<(Config, Vec<String>)> {
    let config_err = |reason: String| Error::Config {
        path: path.to_path_buf(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
    let mut config: Config = toml::from_str(&content).map_err(|e| config_err(e.to_string()))?;
    let warnings = config.validate();
    Ok((config, warnings))
}

/// Tries to load `~/.config/winlabel/config.toml`.
pub fn try_load() -> Result<(Config, Vec<String>)> {
    let path = config_path().ok_or_else(|| Error::Config {
        path: PathBuf::from("~/.config/winlabel/config.toml"),
        reason: "could not determine home directory".into(),
    })?;
    try_load_from(&path)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults. Parse errors and repairs
/// are reported on stderr since logging is not set up yet.
pub fn load() -> Config {
    if !config_path().is_some_and(|p| p.exists()) {
        return Config::default();
    }
    match try_load() {
        Ok((config, warnings)) => {
            for w in warnings {
                eprintln!("Warning: {w}");
            }
            config
        }
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_validates_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[widget]\nmonitor_exclusive = false\n\n[widget.callbacks]\non_left = \"nope\"\n",
        )
        .unwrap();

        // Act
        let (config, warnings) = try_load_from(&path).unwrap();

        // Assert
        assert!(!config.widget.monitor_exclusive);
        assert_eq!(config.widget.callbacks.on_left, "do_nothing");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn parse_error_names_the_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[widget\nlabel = 1").unwrap();

        // Act
        let err = try_load_from(&path).unwrap_err();

        // Assert
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn missing_file_is_an_error_for_try_load_from() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_load_from(&dir.path().join("absent.toml")).is_err());
    }
}
