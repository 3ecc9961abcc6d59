//! # Bridge
//!
//! The context handle a consuming plugin holds. It resolves the installed
//! faction plugin once, on the first successful [`Bridge::connect`], and keeps
//! the binding and the negotiation policy fixed from then on.
//!
//! ```no_run
//! use factionbridge::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = ProviderCatalog::builder().build();
//! let directory = StaticDirectory::new();
//! let mut bridge = Bridge::new(catalog, Arc::new(directory));
//!
//! let owner = PluginDescriptor::new("MyPlugin", "1.0", ["me"]);
//! bridge.connect(Some(owner), true, true, false)?;
//!
//! if let Some(api) = bridge.factions_api() {
//!     println!("{} factions", api.factions()?.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::catalog::ProviderCatalog;
use crate::config::{BridgeConfig, BridgeSection};
use crate::diagnostics::{DiagnosticReport, DiagnosticReporter, ResolutionOutcome, TracingReporter};
use crate::resolver::{Binding, Resolver};
use anyhow::Context;
use factionbridge_core::{BridgeError, FactionsApi, NegotiationPolicy, Result};
use factionbridge_plugins::{PluginDescriptor, PluginDirectory, ScannedDirectory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle of a [`Bridge`]. `Connected` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeState {
    #[default]
    Uninitialized,
    Connecting,
    Connected,
}

pub struct Bridge {
    catalog: ProviderCatalog,
    directory: Arc<dyn PluginDirectory>,
    forced_provider: Option<String>,
    reporter: Arc<dyn DiagnosticReporter>,
    defaults: BridgeSection,

    state: BridgeState,
    owner: Option<PluginDescriptor>,
    binding: Option<Binding>,
    api: Option<FactionsApi>,
    policy: NegotiationPolicy,
    report: Option<DiagnosticReport>,
}

impl Bridge {
    pub fn new(catalog: ProviderCatalog, directory: Arc<dyn PluginDirectory>) -> Self {
        Self {
            catalog,
            directory,
            forced_provider: None,
            reporter: Arc::new(TracingReporter),
            defaults: BridgeSection::default(),
            state: BridgeState::Uninitialized,
            owner: None,
            binding: None,
            api: None,
            policy: NegotiationPolicy::strict(),
            report: None,
        }
    }

    /// Build a bridge over the plugins directory named by `config`.
    ///
    /// The connect flags in `config.bridge` become the ones used by
    /// [`Bridge::connect_with_defaults`].
    pub fn from_config(config: &BridgeConfig, catalog: ProviderCatalog) -> anyhow::Result<Self> {
        let dir = config.plugins_dir()?;
        let directory = ScannedDirectory::scan(&dir)
            .with_context(|| format!("Failed to scan plugins directory: {}", dir.display()))?;

        let mut bridge = Self::new(catalog, Arc::new(directory))
            .with_forced_provider(config.bridge.forced_provider.clone());
        bridge.defaults = config.bridge.clone();
        Ok(bridge)
    }

    /// Bind this provider (id or shorthand) whenever its plugin is installed.
    pub fn with_forced_provider(mut self, forced: Option<String>) -> Self {
        self.forced_provider = forced;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn DiagnosticReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Resolve and bind the installed faction plugin.
    ///
    /// # Arguments
    ///
    /// * `owner` - the plugin using the bridge
    /// * `console_output` - log the resolution summary at info
    /// * `requires_factions` - fail instead of warning on a missing owner or a
    ///   repeated connect
    /// * `suppress_exceptions` - facade calls default instead of failing with
    ///   [`BridgeError::MethodUnsupported`]
    ///
    /// # Returns
    ///
    /// `Ok` when resolution ran or the call was ignored. Finding no provider
    /// is not an error; check [`Bridge::connected`] or [`Bridge::last_report`].
    ///
    /// Resolution runs at most once per bridge. Any completed `connect` moves
    /// the bridge to [`BridgeState::Connected`], including one that bound no
    /// provider, and every later call is refused with
    /// [`BridgeError::AlreadyConnected`] (or ignored with a warning when
    /// `requires_factions` is false). Build a new [`Bridge`] to resolve again.
    pub fn connect(
        &mut self,
        owner: Option<PluginDescriptor>,
        console_output: bool,
        requires_factions: bool,
        suppress_exceptions: bool,
    ) -> Result<()> {
        let Some(owner) = owner else {
            if requires_factions {
                return Err(BridgeError::InvalidArgument(
                    "an owner plugin is required to connect".to_string(),
                ));
            }
            warn!("connect called without an owner plugin; ignoring");
            return Ok(());
        };

        if self.state == BridgeState::Connected {
            if requires_factions {
                return Err(BridgeError::AlreadyConnected);
            }
            warn!(owner = %owner.name, "Faction bridge already connected; ignoring");
            return Ok(());
        }

        self.state = BridgeState::Connecting;
        self.policy = NegotiationPolicy {
            suppress_exceptions,
        };

        let resolution =
            Resolver::new(&self.catalog).discover(self.directory.as_ref(), self.forced_provider.as_deref());
        self.reporter.report(&resolution.report, console_output);

        match &resolution.binding {
            Some(binding) if console_output => info!(
                owner = %owner.name,
                "Faction bridge connected to {} {}",
                binding.plugin().name,
                binding.plugin().version
            ),
            Some(binding) => debug!(
                owner = %owner.name,
                "Faction bridge connected to {} {}",
                binding.plugin().name,
                binding.plugin().version
            ),
            None if requires_factions => warn!(
                owner = %owner.name,
                "No supported faction plugin found: {}",
                resolution.report.summary()
            ),
            None => debug!(owner = %owner.name, "No supported faction plugin found"),
        }

        self.api = resolution.binding.as_ref().map(|b| b.api(self.policy));
        self.binding = resolution.binding;
        self.report = Some(resolution.report);
        self.owner = Some(owner);
        self.state = BridgeState::Connected;
        Ok(())
    }

    /// [`Bridge::connect`] with the flags the bridge was configured with.
    pub fn connect_with_defaults(&mut self, owner: Option<PluginDescriptor>) -> Result<()> {
        let BridgeSection {
            console_output,
            requires_factions,
            suppress_exceptions,
            ..
        } = self.defaults;
        self.connect(owner, console_output, requires_factions, suppress_exceptions)
    }

    /// True once a provider is bound and its plugin reports ready.
    pub fn connected(&self) -> bool {
        self.binding.as_ref().is_some_and(Binding::is_ready)
    }

    /// The facade, if a provider was bound.
    pub fn factions_api(&self) -> Option<&FactionsApi> {
        self.api.as_ref()
    }

    /// The facade, or the reason there is none.
    pub fn require_api(&self) -> Result<&FactionsApi> {
        if let Some(api) = &self.api {
            return Ok(api);
        }

        match self.report.as_ref().map(|r| &r.outcome) {
            Some(ResolutionOutcome::AdapterConstructionFailed {
                provider_id,
                reason,
            }) => Err(BridgeError::AdapterConstructionFailed {
                provider: provider_id.clone(),
                reason: reason.clone(),
            }),
            _ => Err(BridgeError::NoProviderResolved),
        }
    }

    /// The plugin that connected the bridge.
    pub fn owner(&self) -> Option<&PluginDescriptor> {
        self.owner.as_ref()
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub fn policy(&self) -> NegotiationPolicy {
        self.policy
    }

    /// Report of the resolution run by the successful connect.
    pub fn last_report(&self) -> Option<&DiagnosticReport> {
        self.report.as_ref()
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("state", &self.state)
            .field("owner", &self.owner.as_ref().map(|o| &o.name))
            .field("binding", &self.binding)
            .field("policy", &self.policy)
            .field("forced_provider", &self.forced_provider)
            .finish()
    }
}
