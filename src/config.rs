use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::images::DEFAULT_DOWNLOAD_BASE;
use crate::page::{BodyFormat, MissingStoryPolicy, RenderOptions};
use crate::storage::query::DEFAULT_COLLECTION;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryviewConfig {
    pub database: String,
    pub port: u16,
    pub collection: String,
    pub site_title: String,
    /// Static files served for any path that is not a story route
    pub assets: String,
    pub render: RenderConfig,
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub body_format: BodyFormat,
    pub missing_story: MissingStoryPolicy,
    pub nav_glyphs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub download_base: String,
}

impl Default for StoryviewConfig {
    fn default() -> Self {
        Self {
            database: default_database_path().to_string_lossy().into_owned(),
            port: 8080,
            collection: DEFAULT_COLLECTION.to_string(),
            site_title: "Short Stories".to_string(),
            assets: "public".to_string(),
            render: RenderConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            body_format: BodyFormat::default(),
            missing_story: MissingStoryPolicy::default(),
            nav_glyphs: true,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
        }
    }
}

impl StoryviewConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            collection: self.collection.clone(),
            site_title: self.site_title.clone(),
            body_format: self.render.body_format,
            missing_story: self.render.missing_story,
            nav_glyphs: self.render.nav_glyphs,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("storyview.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from(".storyview").join("stories.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<StoryviewConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: StoryviewConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &StoryviewConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
