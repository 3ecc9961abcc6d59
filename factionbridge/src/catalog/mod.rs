//! # Provider Catalog
//!
//! The immutable, ordered table of faction plugins the bridge knows how to
//! talk to. Each entry pairs the identity of a plugin (display name plus the
//! author fingerprints it is recognised by) with the factory that builds an
//! adapter for it.
//!
//! The catalog is built once through [`ProviderCatalogBuilder`] and never
//! changes afterwards. Registration order is resolution order: when several
//! entries could bind, the first one registered wins.

mod known;

pub use known::{KnownFingerprint, KnownProvider, KNOWN_PROVIDERS};

use crate::matcher::AuthorConfiguration;
use factionbridge_core::{AdapterError, BridgeError, FactionsAdapter, Result};
use factionbridge_plugins::PluginDescriptor;
use std::fmt;
use std::sync::Arc;

/// Builds the adapter for a provider once its plugin has been identified.
pub type AdapterFactory = Arc<
    dyn Fn(&PluginDescriptor) -> std::result::Result<Arc<dyn FactionsAdapter>, AdapterError>
        + Send
        + Sync,
>;

/// Wrap a closure as an [`AdapterFactory`].
pub fn factory<F>(f: F) -> AdapterFactory
where
    F: Fn(&PluginDescriptor) -> std::result::Result<Arc<dyn FactionsAdapter>, AdapterError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// A factory that hands out the same, already constructed adapter.
pub fn shared_factory(adapter: Arc<dyn FactionsAdapter>) -> AdapterFactory {
    Arc::new(move |_| Ok(Arc::clone(&adapter)))
}

/// Identifier with everything up to and including the first `_` removed.
///
/// `Factions_FactionsUUID` becomes `FactionsUUID`. An identifier without `_`
/// is its own shorthand.
pub fn shorthand(id: &str) -> &str {
    id.split_once('_').map_or(id, |(_, rest)| rest)
}

// ============================================================================
// Identity
// ============================================================================

/// Everything needed to recognise a provider's plugin, without a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub id: String,
    pub plugin_name: String,
    pub fingerprints: Vec<AuthorConfiguration>,
}

impl ProviderIdentity {
    pub fn new(
        id: impl Into<String>,
        plugin_name: impl Into<String>,
        fingerprints: Vec<AuthorConfiguration>,
    ) -> Self {
        Self {
            id: id.into(),
            plugin_name: plugin_name.into(),
            fingerprints,
        }
    }

    pub fn shorthand(&self) -> &str {
        shorthand(&self.id)
    }

    /// Whether `name` is this provider's identifier or shorthand, ignoring case.
    pub fn answers_to(&self, name: &str) -> bool {
        self.id.eq_ignore_ascii_case(name) || self.shorthand().eq_ignore_ascii_case(name)
    }
}

// ============================================================================
// Provider
// ============================================================================

/// A catalog entry: a provider identity plus its adapter factory.
#[derive(Clone)]
pub struct Provider {
    identity: ProviderIdentity,
    factory: AdapterFactory,
}

impl Provider {
    pub fn new(identity: ProviderIdentity, factory: AdapterFactory) -> Self {
        Self { identity, factory }
    }

    pub fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn shorthand(&self) -> &str {
        self.identity.shorthand()
    }

    pub fn plugin_name(&self) -> &str {
        &self.identity.plugin_name
    }

    pub fn fingerprints(&self) -> &[AuthorConfiguration] {
        &self.identity.fingerprints
    }

    /// Run the factory against the matched plugin.
    pub fn construct(
        &self,
        plugin: &PluginDescriptor,
    ) -> std::result::Result<Arc<dyn FactionsAdapter>, AdapterError> {
        (self.factory)(plugin)
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.identity.id)
            .field("plugin_name", &self.identity.plugin_name)
            .field("fingerprints", &self.identity.fingerprints.len())
            .finish()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered, immutable set of providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderCatalog {
    providers: Vec<Provider>,
}

impl ProviderCatalog {
    pub fn builder() -> ProviderCatalogBuilder {
        ProviderCatalogBuilder::default()
    }

    /// Build a catalog from [`KNOWN_PROVIDERS`], in table order.
    ///
    /// `attach` is asked for a factory for every known provider; providers it
    /// returns `None` for are left out.
    pub fn from_known<F>(mut attach: F) -> Result<Self>
    where
        F: FnMut(&KnownProvider) -> Option<AdapterFactory>,
    {
        let mut builder = Self::builder();
        for known in KNOWN_PROVIDERS {
            if let Some(factory) = attach(known) {
                builder = builder.register(Provider::new(known.identity(), factory))?;
            }
        }
        Ok(builder.build())
    }

    /// Find a provider by identifier or shorthand, ignoring case.
    ///
    /// # Arguments
    ///
    /// * `name` - e.g. `Factions_FactionsUUID` or `factionsuuid`
    ///
    /// # Returns
    ///
    /// The provider, or `None` if no entry answers to `name`.
    pub fn lookup(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.identity.answers_to(name))
    }

    /// All providers in resolution order.
    pub fn all(&self) -> &[Provider] {
        &self.providers
    }

    pub fn identities(&self) -> Vec<ProviderIdentity> {
        self.providers.iter().map(|p| p.identity.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Collects providers in registration order.
#[derive(Debug, Default)]
pub struct ProviderCatalogBuilder {
    providers: Vec<Provider>,
}

impl ProviderCatalogBuilder {
    /// Append a provider.
    ///
    /// Fails with [`BridgeError::InvalidArgument`] when its identifier or
    /// shorthand collides, ignoring case, with one already registered.
    pub fn register(mut self, provider: Provider) -> Result<Self> {
        if provider.id().is_empty() || provider.plugin_name().is_empty() {
            return Err(BridgeError::InvalidArgument(
                "provider id and plugin name must not be empty".to_string(),
            ));
        }

        if let Some(existing) = self.providers.iter().find(|existing| {
            existing.identity.answers_to(provider.id())
                || existing.identity.answers_to(provider.shorthand())
                || provider.identity.answers_to(existing.shorthand())
        }) {
            return Err(BridgeError::InvalidArgument(format!(
                "provider '{}' collides with already registered '{}'",
                provider.id(),
                existing.id()
            )));
        }

        self.providers.push(provider);
        Ok(self)
    }

    pub fn build(self) -> ProviderCatalog {
        ProviderCatalog {
            providers: self.providers,
        }
    }
}
