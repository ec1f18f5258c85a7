use crate::error::SiteError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config files probed, in order, when none is given explicitly.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["mdsite.config.json", "config/mdsite.config.json"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Markdown source tree.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// HTML page template with `{{ Title }}` and `{{ Content }}` placeholders.
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Assets copied verbatim into the output tree.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_dest_dir")]
    pub dest_dir: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_template_path() -> PathBuf {
    PathBuf::from("template.html")
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_dest_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_dir: default_content_dir(),
            template_path: default_template_path(),
            static_dir: default_static_dir(),
            dest_dir: default_dest_dir(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, SiteError> {
        let text = fs::read_to_string(path).map_err(SiteError::io(path))?;
        serde_json::from_str(&text).map_err(|source| SiteError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the first config file found in `DEFAULT_CONFIG_PATHS`, or defaults.
    pub fn discover() -> Result<Config, SiteError> {
        for p in DEFAULT_CONFIG_PATHS {
            let path = Path::new(p);
            if path.is_file() {
                return Config::load(path);
            }
        }
        Ok(Config::default())
    }
}
