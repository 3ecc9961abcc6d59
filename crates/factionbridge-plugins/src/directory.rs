//! The installed-plugin directory as seen by the resolver.

use crate::descriptor::PluginDescriptor;

/// Read-only view of the plugins installed on the host.
pub trait PluginDirectory: Send + Sync {
    /// Descriptor of the plugin registered under display name `name`.
    fn get(&self, name: &str) -> Option<PluginDescriptor>;

    /// All installed plugins, in a stable order.
    fn plugins(&self) -> Vec<PluginDescriptor>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// An in-memory directory, for hosts that already know their plugin list.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    plugins: Vec<PluginDescriptor>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin. A later plugin with an already present name is ignored.
    pub fn with(mut self, descriptor: PluginDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Returns `false` if a plugin with the same name was already present.
    pub fn insert(&mut self, descriptor: PluginDescriptor) -> bool {
        if self.plugins.iter().any(|p| p.name == descriptor.name) {
            return false;
        }
        self.plugins.push(descriptor);
        true
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl FromIterator<PluginDescriptor> for StaticDirectory {
    fn from_iter<T: IntoIterator<Item = PluginDescriptor>>(iter: T) -> Self {
        let mut directory = StaticDirectory::new();
        for descriptor in iter {
            directory.insert(descriptor);
        }
        directory
    }
}

impl PluginDirectory for StaticDirectory {
    fn get(&self, name: &str) -> Option<PluginDescriptor> {
        self.plugins.iter().find(|p| p.name == name).cloned()
    }

    fn plugins(&self) -> Vec<PluginDescriptor> {
        self.plugins.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_directory_lookup() {
        let directory = StaticDirectory::new()
            .with(PluginDescriptor::new("Factions", "1.0", ["a"]))
            .with(PluginDescriptor::new("Towny", "0.100", ["b"]));

        assert_eq!(directory.len(), 2);
        assert!(directory.contains("Factions"));
        assert!(!directory.contains("factions"));
        assert_eq!(directory.get("Towny").unwrap().version, "0.100");
    }

    #[test]
    fn test_first_plugin_with_name_wins() {
        let directory: StaticDirectory = vec![
            PluginDescriptor::new("Factions", "1.0", ["a"]),
            PluginDescriptor::new("Factions", "2.0", ["b"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("Factions").unwrap().version, "1.0");
    }
}
