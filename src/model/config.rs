use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store (`https://…` or `file:///path/db.json`)
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Pointer movement (in pixels) that turns a press into a drag
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            drag_threshold: default_drag_threshold(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding session.json (default: the data dir)
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_drag_threshold() -> u16 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.store.url.is_none());
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.drag_threshold, 10);
        assert!(config.session.dir.is_none());
    }

    #[test]
    fn partial_ui_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
[store]
url = "https://board.example.com"

[ui]
drag_threshold = 4

[ui.colors]
background = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(config.store.url.as_deref(), Some("https://board.example.com"));
        assert_eq!(config.ui.drag_threshold, 4);
        assert!(config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("background").unwrap(), "#000000");
    }
}
