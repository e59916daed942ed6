use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storymate_editor::{EditorConfig, FileStore};

pub const DEFAULT_CONFIG_NAME: &str = "storymate.config.json";

/// StoryMate configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per project
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Editor layout overrides
    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_data_dir() -> String {
    ".storymate".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }

    pub fn store(&self, cwd: &Path) -> FileStore {
        FileStore::new(self.get_data_dir(cwd))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            editor: EditorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "stories",
            "editor": { "placementOffset": 300, "storyPlaceholder": "..." }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "stories");
        assert_eq!(config.editor.placement_offset, 300.0);
        assert_eq!(config.editor.story_placeholder, "...");
        assert_eq!(config.editor.snap_radius(), 34.0);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, ".storymate");
        assert_eq!(
            config.get_data_dir(Path::new("/work")),
            PathBuf::from("/work/.storymate")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.data_dir, ".storymate");
    }
}
