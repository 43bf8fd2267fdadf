//! Discovery of entity folders and their configuration files.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

const LOG_TARGET: &str = "    walker";

/// Conventional names inside each entity folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    /// Directory holding the configuration files, searched recursively
    pub config_dir: String,

    /// Project descriptor file directly inside the entity folder
    pub project_descriptor: String,

    /// Directory whose subdirectories are counted as plugin data
    pub plugin_data_dir: String,

    /// File extension of configuration files, without the dot
    pub extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            config_dir: "buildTypes".into(),
            project_descriptor: "project-config.xml".into(),
            plugin_data_dir: "pluginData".into(),
            extension: "xml".into(),
        }
    }
}

/// One immediate subdirectory of the analysis root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFolder {
    pub name: String,
    pub path: Utf8PathBuf,

    /// Configuration files in walk order
    pub config_files: Vec<Utf8PathBuf>,

    pub project_descriptor: Option<Utf8PathBuf>,
    pub plugin_data_dir: Option<Utf8PathBuf>,
}

/// Enumerate every entity folder beneath `root`, sorted by name.
///
/// A missing root yields no entities. Entries that cannot be read are skipped with a warning.
#[must_use]
pub fn discover(root: &Utf8Path, layout: &Layout) -> Vec<EntityFolder> {
    if !root.is_dir() {
        log::warn!(target: LOG_TARGET, "Root directory '{root}' does not exist, nothing to analyze");
        return Vec::new();
    }

    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut entities = Vec::new();
    for entry in entries {
        let Some(path) = utf8_entry(entry) else {
            continue;
        };

        if !path.is_dir() {
            continue;
        }

        let entity = scan_entity(path, layout);
        log::debug!(
            target: LOG_TARGET,
            "Found entity '{}' with {} configuration file(s){}",
            entity.name,
            entity.config_files.len(),
            if entity.project_descriptor.is_some() { " and a project descriptor" } else { "" }
        );
        entities.push(entity);
    }

    entities
}

fn scan_entity(path: Utf8PathBuf, layout: &Layout) -> EntityFolder {
    let name = path.file_name().unwrap_or_default().to_string();

    let config_dir = path.join(&layout.config_dir);
    let config_files = if config_dir.is_dir() {
        find_config_files(&config_dir, &layout.extension)
    } else {
        Vec::new()
    };

    let descriptor = path.join(&layout.project_descriptor);
    let plugin_data = path.join(&layout.plugin_data_dir);

    EntityFolder {
        name,
        config_files,
        project_descriptor: descriptor.is_file().then_some(descriptor),
        plugin_data_dir: plugin_data.is_dir().then_some(plugin_data),
        path,
    }
}

fn find_config_files(dir: &Utf8Path, extension: &str) -> Vec<Utf8PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(utf8_entry)
        .filter(|p| p.is_file() && p.extension() == Some(extension))
        .collect()
}

fn utf8_entry(entry: walkdir::Result<DirEntry>) -> Option<Utf8PathBuf> {
    match Utf8PathBuf::from_path_buf(readable_entry(entry)?.into_path()) {
        Ok(path) => Some(path),
        Err(path) => {
            log::warn!(target: LOG_TARGET, "Skipping non-UTF-8 path '{}'", path.display());
            None
        }
    }
}

fn readable_entry(entry: walkdir::Result<DirEntry>) -> Option<DirEntry> {
    entry
        .inspect_err(|e| log::warn!(target: LOG_TARGET, "Skipping unreadable entry: {e}"))
        .ok()
}

/// Count the immediate subdirectories of a plugin data directory.
#[must_use]
pub fn count_subdirectories(dir: &Utf8Path) -> u64 {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(readable_entry)
        .filter(|e| e.file_type().is_dir())
        .count() as u64
}
