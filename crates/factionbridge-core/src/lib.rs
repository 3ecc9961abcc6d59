//! # factionbridge-core
//!
//! The stable contract that calling code programs against, whatever
//! land-claiming/faction plugin happens to be installed.
//!
//! - [`FactionsApi`], [`Faction`], [`FactionPlayer`], [`Claim`] - the facade
//! - [`FactionsAdapter`], [`FactionHandle`], [`PlayerHandle`], [`ClaimHandle`] -
//!   what a per-plugin adapter implements
//! - [`Support`], [`NegotiationPolicy`], [`Negotiator`] - capability negotiation
//!   between the two
//!
//! Adapters answer optional operations with [`Support::Unsupported`] when their
//! plugin has no equivalent. The facade turns that into either
//! [`BridgeError::MethodUnsupported`] or the operation's benign default
//! (`0`, `false`, `None`, empty, no-op) according to the policy.

pub mod adapter;
pub mod api;
pub mod claim;
pub mod error;
pub mod faction;
pub mod negotiation;
pub mod player;
pub mod types;

pub use adapter::{
    AdapterResult, ClaimHandle, ClaimRef, FactionHandle, FactionRef, FactionsAdapter,
    PlayerHandle, PlayerRef,
};
pub use api::FactionsApi;
pub use claim::Claim;
pub use error::{AdapterError, BridgeError, Result};
pub use faction::Faction;
pub use negotiation::{NegotiationPolicy, Negotiator, Support};
pub use player::FactionPlayer;
pub use types::{ChunkPos, HostPlayer, Location, Relationship, Role, ServerFactionKind};

pub mod prelude {
    pub use crate::{
        AdapterError, AdapterResult, BridgeError, ChunkPos, Claim, ClaimHandle, ClaimRef,
        Faction, FactionHandle, FactionPlayer, FactionRef, FactionsAdapter, FactionsApi,
        HostPlayer, Location, NegotiationPolicy, Negotiator, PlayerHandle, PlayerRef,
        Relationship, Result, Role, ServerFactionKind, Support,
    };
}
