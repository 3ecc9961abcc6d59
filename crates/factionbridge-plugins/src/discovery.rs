//! Scanning a plugins folder on disk.
//!
//! The folder contains one sub-directory per installed plugin, each with a
//! `plugin.toml` manifest:
//!
//! ```text
//! plugins/
//! ├── Factions/plugin.toml
//! └── Towny/plugin.toml
//! ```

use crate::descriptor::{PluginDescriptor, PluginManifest, MANIFEST_FILE};
use crate::directory::{PluginDirectory, StaticDirectory};
use crate::error::PluginResult;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Get the default plugins directory.
pub fn default_plugins_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "raibid-labs", "factionbridge")
        .map(|dirs| dirs.data_dir().join("plugins"))
}

/// A [`PluginDirectory`] populated from a folder on disk.
#[derive(Debug, Clone)]
pub struct ScannedDirectory {
    root: PathBuf,
    plugins: StaticDirectory,
}

impl ScannedDirectory {
    /// Scan `root`. A missing folder yields an empty directory.
    pub fn scan(root: &Path) -> PluginResult<Self> {
        let mut plugins = StaticDirectory::new();
        scan_into(root, &mut plugins)?;
        info!("Found {} installed plugin(s) in {:?}", plugins.len(), root);

        Ok(Self {
            root: root.to_path_buf(),
            plugins,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginDirectory for ScannedDirectory {
    fn get(&self, name: &str) -> Option<PluginDescriptor> {
        self.plugins.get(name)
    }

    fn plugins(&self) -> Vec<PluginDescriptor> {
        self.plugins.plugins()
    }
}

/// Read every plugin folder under `dir` into `plugins`.
///
/// Entries are visited in path order so duplicate display names resolve the
/// same way on every run; the first one wins.
pub fn scan_into(dir: &Path, plugins: &mut StaticDirectory) -> PluginResult<()> {
    if !dir.exists() {
        debug!("Plugins directory {:?} does not exist", dir);
        return Ok(());
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read plugins directory {:?}: {}", dir, e);
            return Ok(());
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    paths.sort();

    for path in paths {
        let manifest_path = path.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            debug!("Skipping {:?}: no {}", path, MANIFEST_FILE);
            continue;
        }

        match PluginManifest::from_file(&manifest_path) {
            Ok(manifest) => {
                let descriptor = manifest.descriptor();
                debug!(
                    "Found plugin: {} v{} by {:?} at {:?}",
                    descriptor.name, descriptor.version, descriptor.authors, path
                );
                let name = descriptor.name.clone();
                if !plugins.insert(descriptor) {
                    warn!("Skipping duplicate plugin '{}' at {:?}", name, path);
                }
            }
            Err(e) => {
                warn!("Failed to load manifest from {:?}: {}", manifest_path, e);
            }
        }
    }

    Ok(())
}
