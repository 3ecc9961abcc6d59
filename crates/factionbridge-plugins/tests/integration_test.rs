//! Integration tests for reading installed plugins from disk.

use factionbridge_plugins::{
    PluginDescriptor, PluginDirectory, PluginError, ScannedDirectory, MANIFEST_FILE,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ==============================================================================
// Test Fixture Helpers
// ==============================================================================

/// Write a plugin folder with a manifest built from `config`.
fn create_test_plugin(dir: &Path, folder: &str, config: PluginConfig) -> PathBuf {
    let plugin_dir = dir.join(folder);
    std::fs::create_dir_all(&plugin_dir).unwrap();

    let mut manifest = format!(
        r#"[plugin]
name = "{name}"
version = "{version}"
"#,
        name = config.name.unwrap_or(folder),
        version = config.version.unwrap_or("1.0.0"),
    );

    if let Some(author) = config.author {
        manifest.push_str(&format!("author = \"{}\"\n", author));
    }

    if !config.authors.is_empty() {
        let quoted: Vec<String> = config.authors.iter().map(|a| format!("\"{}\"", a)).collect();
        manifest.push_str(&format!("authors = [{}]\n", quoted.join(", ")));
    }

    if let Some(website) = config.website {
        manifest.push_str(&format!("website = \"{}\"\n", website));
    }

    std::fs::write(plugin_dir.join(MANIFEST_FILE), manifest).unwrap();
    plugin_dir
}

/// Configuration for creating a test plugin.
#[derive(Default)]
struct PluginConfig<'a> {
    name: Option<&'a str>,
    version: Option<&'a str>,
    author: Option<&'a str>,
    authors: Vec<&'a str>,
    website: Option<&'a str>,
}

// ==============================================================================
// Discovery Tests
// ==============================================================================

#[test]
fn test_descriptor_from_dir() {
    let temp_dir = TempDir::new().unwrap();
    let plugin_dir = create_test_plugin(
        temp_dir.path(),
        "factions",
        PluginConfig {
            name: Some("Factions"),
            version: Some("1.6.9.5-U0.6.33"),
            author: Some("drtshock"),
            authors: vec!["Savag3life", "mbaxter"],
            website: Some("https://www.spigotmc.org/resources/factionsuuid.1035/"),
        },
    );

    let descriptor = PluginDescriptor::from_dir(&plugin_dir).unwrap();
    assert_eq!(descriptor.name, "Factions");
    assert_eq!(descriptor.version, "1.6.9.5-U0.6.33");
    assert_eq!(descriptor.authors, vec!["drtshock", "Savag3life", "mbaxter"]);
    assert!(descriptor.website.is_some());
}

#[test]
fn test_descriptor_from_dir_without_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let result = PluginDescriptor::from_dir(temp_dir.path());
    assert!(matches!(result, Err(PluginError::PluginNotFound(_))));
}

#[test]
fn test_scan_skips_invalid_and_foreign_entries() {
    let temp_dir = TempDir::new().unwrap();

    create_test_plugin(
        temp_dir.path(),
        "towny",
        PluginConfig {
            name: Some("Towny"),
            authors: vec!["Shade", "ElgarL", "LlmDl"],
            ..Default::default()
        },
    );

    // Folder without a manifest
    std::fs::create_dir_all(temp_dir.path().join("empty")).unwrap();

    // Folder with a broken manifest
    let broken = temp_dir.path().join("broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join(MANIFEST_FILE), "[plugin\nname = ").unwrap();

    // Folder with an invalid manifest
    create_test_plugin(
        temp_dir.path(),
        "nameless",
        PluginConfig {
            name: Some(""),
            ..Default::default()
        },
    );

    // A loose file
    std::fs::write(temp_dir.path().join("README.txt"), "hello").unwrap();

    let directory = ScannedDirectory::scan(temp_dir.path()).unwrap();
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.root(), temp_dir.path());

    let towny = directory.get("Towny").unwrap();
    assert_eq!(towny.authors, vec!["Shade", "ElgarL", "LlmDl"]);
}

#[test]
fn test_scan_is_deterministic() {
    let temp_dir = TempDir::new().unwrap();
    for folder in ["c", "a", "b"] {
        create_test_plugin(temp_dir.path(), folder, PluginConfig::default());
    }

    let first = ScannedDirectory::scan(temp_dir.path()).unwrap().plugins();
    let second = ScannedDirectory::scan(temp_dir.path()).unwrap().plugins();

    let names: Vec<&str> = first.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(first, second);
}
