use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not parse config.toml: {0}")]
    EditParseError(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("could not determine config directory (no HOME or XDG_CONFIG_HOME)")]
    NoConfigDir,
}

/// `$XDG_CONFIG_HOME/taskboard`, else the platform config dir
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join("taskboard"));
    }
    dirs::config_dir()
        .map(|d| d.join("taskboard"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Default location of config.toml
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Directory for session.json when the config does not name one
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("taskboard"))
        .unwrap_or_else(|| std::env::temp_dir().join("taskboard"))
}

/// Where session.json lives: `[session] dir`, else the data dir
pub fn session_dir(config: &AppConfig) -> PathBuf {
    match config.session.dir.as_deref() {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => default_data_dir(),
    }
}

/// Read config.toml. A missing file yields defaults.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read the raw document for format-preserving edits (empty if missing)
pub fn read_config_doc(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::WriteError {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, doc.to_string()).map_err(|source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Set a dotted key (`store.url`, `ui.drag_threshold`, `ui.colors.<slot>`, ...)
pub fn set_config_value(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["store", "url"] => {
            ensure_table(doc, "store");
            doc["store"]["url"] = toml_edit::value(value);
        }
        ["session", "dir"] => {
            ensure_table(doc, "session");
            doc["session"]["dir"] = toml_edit::value(value);
        }
        ["ui", "drag_threshold"] => {
            let n: i64 = value.parse().map_err(|_| invalid())?;
            if !(0..=u16::MAX as i64).contains(&n) {
                return Err(invalid());
            }
            ensure_table(doc, "ui");
            doc["ui"]["drag_threshold"] = toml_edit::value(n);
        }
        ["ui", "show_key_hints"] => {
            let b: bool = value.parse().map_err(|_| invalid())?;
            ensure_table(doc, "ui");
            doc["ui"]["show_key_hints"] = toml_edit::value(b);
        }
        ["ui", "colors", slot] => {
            if !value.starts_with('#') || value.len() != 7 {
                return Err(invalid());
            }
            ensure_table(doc, "ui");
            if doc["ui"].get("colors").is_none() {
                doc["ui"]["colors"] = toml_edit::Item::Table(toml_edit::Table::new());
            }
            doc["ui"]["colors"][*slot] = toml_edit::value(value);
        }
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}

fn ensure_table(doc: &mut toml_edit::DocumentMut, name: &str) {
    if !doc.contains_key(name) {
        doc[name] = toml_edit::Item::Table(toml_edit::Table::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r##"# board settings
[store]
url = "https://board.example.com"

[ui]
show_key_hints = false
"##
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("config.toml")).unwrap();
        assert!(config.store.url.is_none());
        assert_eq!(config.ui.drag_threshold, 10);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[store\nurl=").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn round_trip_preserves_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, sample_config()).unwrap();

        let doc = read_config_doc(&path).unwrap();
        write_config_doc(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), sample_config());
    }

    #[test]
    fn set_store_url_keeps_other_settings() {
        let mut doc: toml_edit::DocumentMut = sample_config().parse().unwrap();
        set_config_value(&mut doc, "store.url", "file:///tmp/db.json").unwrap();
        let text = doc.to_string();
        assert!(text.contains("# board settings"));
        let config: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.store.url.as_deref(), Some("file:///tmp/db.json"));
        assert!(!config.ui.show_key_hints);
    }

    #[test]
    fn set_creates_missing_tables() {
        let mut doc = toml_edit::DocumentMut::new();
        set_config_value(&mut doc, "ui.drag_threshold", "4").unwrap();
        set_config_value(&mut doc, "ui.colors.background", "#101010").unwrap();
        let config: AppConfig = toml::from_str(&doc.to_string()).unwrap();
        assert_eq!(config.ui.drag_threshold, 4);
        assert_eq!(config.ui.colors.get("background").unwrap(), "#101010");
    }

    #[test]
    fn set_rejects_bad_keys_and_values() {
        let mut doc = toml_edit::DocumentMut::new();
        assert!(matches!(
            set_config_value(&mut doc, "store.token", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            set_config_value(&mut doc, "ui.drag_threshold", "-1"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            set_config_value(&mut doc, "ui.colors.text", "red"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
