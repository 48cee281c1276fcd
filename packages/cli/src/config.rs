use mailframe_editor::EditorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const DEFAULT_CONFIG_NAME: &str = "mailframe.config.json";

/// Mailframe configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding design JSON files
    #[serde(default = "default_designs_dir")]
    pub designs_dir: String,

    /// Where rendered HTML is written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Editor and renderer settings
    #[serde(default)]
    pub editor: EditorOptions,
}

fn default_designs_dir() -> String {
    "designs".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_designs_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.designs_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            designs_dir: default_designs_dir(),
            out_dir: default_out_dir(),
            editor: EditorOptions::default(),
        }
    }
}

/// Design files under `dir`, sorted, skipping the config file itself
pub fn find_design_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .filter(|path| path.file_name().and_then(|s| s.to_str()) != Some(DEFAULT_CONFIG_NAME))
        .collect();
    files.sort();
    files
}

/// Files named by `input`: the file itself, or every design under a directory
pub fn resolve_inputs(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else if input.is_dir() {
        Ok(find_design_files(input))
    } else {
        Err(anyhow::anyhow!("Input path does not exist: {}", input.display()))
    }
}
