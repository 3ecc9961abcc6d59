//! # factionbridge-plugins
//!
//! The installed-plugin directory the resolver reads from.
//!
//! This crate provides:
//! - [`PluginDescriptor`] - name, declared version and authors of one plugin
//! - [`PluginManifest`] - the `plugin.toml` file a descriptor is read from
//! - [`PluginDirectory`] - lookup by display name, implemented by
//!   [`StaticDirectory`] (in memory) and [`ScannedDirectory`] (on disk)

pub mod descriptor;
pub mod directory;
pub mod discovery;
pub mod error;

pub use descriptor::{PluginDescriptor, PluginManifest, PluginMetadata, MANIFEST_FILE};
pub use directory::{PluginDirectory, StaticDirectory};
pub use discovery::{default_plugins_dir, scan_into, ScannedDirectory};
pub use error::{PluginError, PluginResult};
