//! Plugin manifests and the descriptors derived from them.
//!
//! Every installed plugin ships a `plugin.toml` describing its display name,
//! declared version and authors. The resolver only ever sees the flattened
//! [`PluginDescriptor`].

use crate::error::{PluginError, PluginResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of a plugin manifest inside a plugin folder.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// On-disk manifest structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin metadata.
    pub plugin: PluginMetadata,
}

/// The `[plugin]` table of a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Display name other plugins look this plugin up by.
    pub name: String,

    /// Declared version string. Free-form; not necessarily semver.
    pub version: String,

    /// Single author, listed before `authors`.
    #[serde(default)]
    pub author: Option<String>,

    /// Author list.
    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub website: Option<String>,
}

impl PluginManifest {
    /// Load a manifest from a TOML file.
    pub fn from_file(path: &Path) -> PluginResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_str(content: &str) -> PluginResult<Self> {
        let manifest: PluginManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> PluginResult<()> {
        if self.plugin.name.trim().is_empty() {
            return Err(PluginError::InvalidManifest(
                "Plugin name cannot be empty".to_string(),
            ));
        }

        if self.plugin.version.trim().is_empty() {
            return Err(PluginError::InvalidManifest(format!(
                "Plugin '{}' has an empty version",
                self.plugin.name
            )));
        }

        Ok(())
    }

    /// Flatten into the descriptor handed to the resolver.
    pub fn descriptor(&self) -> PluginDescriptor {
        let meta = &self.plugin;
        let mut authors: Vec<String> = Vec::with_capacity(meta.authors.len() + 1);
        for author in meta.author.iter().chain(meta.authors.iter()) {
            if !authors.contains(author) {
                authors.push(author.clone());
            }
        }

        PluginDescriptor {
            name: meta.name.clone(),
            version: meta.version.clone(),
            authors,
            description: meta.description.clone(),
            website: meta.website.clone(),
        }
    }
}

/// What the host reports about one installed plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub version: String,
    /// Declared authors in declaration order.
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl PluginDescriptor {
    pub fn new<I, S>(name: impl Into<String>, version: impl Into<String>, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            version: version.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            description: None,
            website: None,
        }
    }

    /// Load the descriptor of the plugin folder at `dir`.
    pub fn from_dir(dir: &Path) -> PluginResult<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(PluginError::PluginNotFound(dir.display().to_string()));
        }
        Ok(PluginManifest::from_file(&manifest_path)?.descriptor())
    }
}
