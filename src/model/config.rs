use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows per page. Clamped to what fits in the terminal.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Show the key hint line in browse mode
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `border = "#444444"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            page_size: default_page_size(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor used when `$EDITOR` is unset
    #[serde(default)]
    pub command: Option<String>,
}

fn default_page_size() -> usize {
    15
}

fn default_true() -> bool {
    true
}
