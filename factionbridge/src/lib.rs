//! # factionbridge
//!
//! Binds one faction facade to whichever supported land-claiming plugin is
//! installed on a server.
//!
//! - [`catalog`] - the fixed table of known providers and their factories
//! - [`matcher`] - author fingerprint comparison
//! - [`resolver`] - picks the provider for the installed plugins
//! - [`bridge`] - the connect-once context handle consumers hold
//! - [`diagnostics`] - what resolution saw and decided
//! - [`config`] - `config.toml` loading
//!
//! The facade itself ([`FactionsApi`] and friends) lives in
//! `factionbridge-core` and is re-exported here.

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod matcher;
pub mod resolver;

pub use bridge::{Bridge, BridgeState};
pub use catalog::{
    factory, shared_factory, shorthand, AdapterFactory, KnownProvider, Provider,
    ProviderCatalog, ProviderCatalogBuilder, ProviderIdentity, KNOWN_PROVIDERS,
};
pub use config::BridgeConfig;
pub use diagnostics::{
    CandidateReport, DiagnosticReport, DiagnosticReporter, FingerprintCheck, ResolutionOutcome,
    TracingReporter,
};
pub use matcher::{full_coverage, matches, partial_match, AuthorConfiguration};
pub use resolver::{Binding, Identification, Resolution, Resolver};

pub use factionbridge_core::{
    AdapterError, BridgeError, ChunkPos, Claim, Faction, FactionPlayer, FactionsAdapter,
    FactionsApi, HostPlayer, Location, NegotiationPolicy, Negotiator, Relationship, Role,
    ServerFactionKind, Support,
};
pub use factionbridge_plugins::{PluginDescriptor, PluginDirectory, ScannedDirectory, StaticDirectory};

pub mod prelude {
    pub use crate::{
        AuthorConfiguration, Bridge, BridgeConfig, BridgeState, DiagnosticReport, Provider,
        ProviderCatalog, ProviderIdentity, Resolver,
    };
    pub use factionbridge_core::prelude::*;
    pub use factionbridge_plugins::{PluginDescriptor, PluginDirectory, StaticDirectory};
}
