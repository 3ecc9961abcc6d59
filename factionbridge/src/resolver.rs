//! # Resolver
//!
//! Walks the catalog in order against the installed plugins and binds the first
//! provider whose plugin is present and whose fingerprint is accepted.
//!
//! A candidate is accepted when, with its plugin installed:
//!
//! 1. it is the forced provider, or
//! 2. one of its fingerprints equals the installed author set, or
//! 3. one of its fingerprints is fully covered by the installed authors.
//!
//! Accepting a provider and constructing its adapter are one step. If the
//! factory fails, resolution stops there with no binding.

use crate::catalog::{Provider, ProviderCatalog, ProviderIdentity};
use crate::diagnostics::{CandidateReport, DiagnosticReport, FingerprintCheck, ResolutionOutcome};
use crate::matcher::full_coverage;
use chrono::Utc;
use factionbridge_core::{FactionsAdapter, FactionsApi, NegotiationPolicy, Negotiator};
use factionbridge_plugins::{PluginDescriptor, PluginDirectory};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// The provider bound for the lifetime of a bridge, with its adapter.
#[derive(Clone)]
pub struct Binding {
    provider_id: String,
    plugin_name: String,
    plugin: PluginDescriptor,
    adapter: Arc<dyn FactionsAdapter>,
    forced: bool,
}

impl Binding {
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    /// The installed plugin the provider was matched against.
    pub fn plugin(&self) -> &PluginDescriptor {
        &self.plugin
    }

    pub fn adapter(&self) -> &Arc<dyn FactionsAdapter> {
        &self.adapter
    }

    pub fn forced(&self) -> bool {
        self.forced
    }

    pub fn is_ready(&self) -> bool {
        self.adapter.is_ready()
    }

    /// Facade over this binding's adapter, settled under `policy`.
    pub fn api(&self, policy: NegotiationPolicy) -> FactionsApi {
        FactionsApi::new(
            Arc::clone(&self.adapter),
            Negotiator::new(self.provider_id.clone(), policy),
        )
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("provider_id", &self.provider_id)
            .field("plugin", &self.plugin.name)
            .field("version", &self.plugin.version)
            .field("forced", &self.forced)
            .finish()
    }
}

/// Result of [`Resolver::discover`].
#[derive(Debug)]
pub struct Resolution {
    pub binding: Option<Binding>,
    pub report: DiagnosticReport,
}

/// Result of [`Resolver::identify`]. Nothing is constructed.
#[derive(Debug, Clone)]
pub struct Identification {
    /// Id of the accepted provider and the plugin it matched.
    pub matched: Option<(String, PluginDescriptor)>,
    pub report: DiagnosticReport,
}

/// Resolves one provider out of a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a ProviderCatalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a ProviderCatalog) -> Self {
        Self { catalog }
    }

    /// Find and construct the provider for the installed plugins.
    ///
    /// # Arguments
    ///
    /// * `directory` - the installed plugins
    /// * `forced` - provider id or shorthand to accept without a fingerprint
    ///
    /// # Returns
    ///
    /// The binding, if any, and the report of the run. An empty result is not
    /// an error: the report's outcome says why nothing was bound.
    pub fn discover(&self, directory: &dyn PluginDirectory, forced: Option<&str>) -> Resolution {
        let providers = self.catalog.all();
        warn_unknown_forced(providers.iter().map(Provider::identity), forced);

        let mut scan = scan(providers.iter().map(Provider::identity), directory, forced);
        let Some(accepted) = scan.accepted.take() else {
            return Resolution {
                binding: None,
                report: scan.into_report(ResolutionOutcome::Unresolved),
            };
        };

        let provider = &providers[accepted.index];
        match provider.construct(&accepted.plugin) {
            Ok(adapter) => {
                debug!(
                    provider = %provider.id(),
                    plugin = %accepted.plugin.name,
                    version = %accepted.plugin.version,
                    forced = accepted.forced,
                    "constructed adapter"
                );
                let outcome = ResolutionOutcome::Bound {
                    provider_id: provider.id().to_string(),
                    forced: accepted.forced,
                };
                Resolution {
                    binding: Some(Binding {
                        provider_id: provider.id().to_string(),
                        plugin_name: provider.plugin_name().to_string(),
                        plugin: accepted.plugin,
                        adapter,
                        forced: accepted.forced,
                    }),
                    report: scan.into_report(outcome),
                }
            }
            Err(e) => {
                warn!("Failed to construct adapter for {}: {}", provider.id(), e);
                Resolution {
                    binding: None,
                    report: scan.into_report(ResolutionOutcome::AdapterConstructionFailed {
                        provider_id: provider.id().to_string(),
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }

    /// Match `identities` against the installed plugins without constructing
    /// any adapter.
    pub fn identify(
        identities: &[ProviderIdentity],
        directory: &dyn PluginDirectory,
        forced: Option<&str>,
    ) -> Identification {
        warn_unknown_forced(identities.iter(), forced);

        let mut scan = scan(identities.iter(), directory, forced);
        match scan.accepted.take() {
            Some(accepted) => {
                let identity = &identities[accepted.index];
                let outcome = ResolutionOutcome::Matched {
                    provider_id: identity.id.clone(),
                    forced: accepted.forced,
                };
                Identification {
                    matched: Some((identity.id.clone(), accepted.plugin)),
                    report: scan.into_report(outcome),
                }
            }
            None => Identification {
                matched: None,
                report: scan.into_report(ResolutionOutcome::Unresolved),
            },
        }
    }
}

#[derive(Debug)]
struct Accepted {
    index: usize,
    plugin: PluginDescriptor,
    forced: bool,
}

struct Scan {
    forced: Option<String>,
    installed: Vec<PluginDescriptor>,
    candidates: Vec<CandidateReport>,
    accepted: Option<Accepted>,
}

impl Scan {
    fn into_report(self, outcome: ResolutionOutcome) -> DiagnosticReport {
        DiagnosticReport {
            generated_at: Utc::now(),
            forced_provider: self.forced,
            installed: self.installed,
            candidates: self.candidates,
            outcome,
        }
    }
}

/// Evaluate candidates in order until one is accepted.
fn scan<'i>(
    identities: impl Iterator<Item = &'i ProviderIdentity>,
    directory: &dyn PluginDirectory,
    forced: Option<&str>,
) -> Scan {
    let mut candidates = Vec::new();
    let mut accepted = None;

    for (index, identity) in identities.enumerate() {
        let is_forced = forced.is_some_and(|name| identity.answers_to(name));
        let Some(plugin) = directory.get(&identity.plugin_name) else {
            candidates.push(CandidateReport {
                provider_id: identity.id.clone(),
                plugin_name: identity.plugin_name.clone(),
                present: false,
                forced: is_forced,
                fingerprints: Vec::new(),
                accepted: false,
            });
            continue;
        };

        let fingerprints: Vec<FingerprintCheck> = identity
            .fingerprints
            .iter()
            .map(|fp| FingerprintCheck {
                version: fp.version.clone(),
                exact: fp.matches(&plugin.authors),
                coverage: fp.coverage(&plugin.authors),
            })
            .collect();

        let exact = fingerprints.iter().any(|check| check.exact);
        let covered = !is_forced && !exact && fingerprints.iter().any(|c| full_coverage(&c.coverage));
        let is_accepted = is_forced || exact || covered;

        if covered {
            debug!(
                provider = %identity.id,
                authors = ?plugin.authors,
                "accepted on author coverage"
            );
        }

        candidates.push(CandidateReport {
            provider_id: identity.id.clone(),
            plugin_name: identity.plugin_name.clone(),
            present: true,
            forced: is_forced,
            fingerprints,
            accepted: is_accepted,
        });

        if is_accepted {
            accepted = Some(Accepted {
                index,
                plugin,
                forced: is_forced,
            });
            break;
        }
    }

    Scan {
        forced: forced.map(str::to_string),
        installed: directory.plugins(),
        candidates,
        accepted,
    }
}

fn warn_unknown_forced<'i>(
    mut identities: impl Iterator<Item = &'i ProviderIdentity>,
    forced: Option<&str>,
) {
    if let Some(name) = forced {
        if !identities.any(|identity| identity.answers_to(name)) {
            warn!("Forced provider '{}' is not in the catalog; ignoring", name);
        }
    }
}
