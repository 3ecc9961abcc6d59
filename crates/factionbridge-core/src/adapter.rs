//! Adapter-side traits.
//!
//! One adapter exists per supported third-party plugin. It exposes the
//! plugin's native objects through the handle traits below. Every optional
//! operation has a default body answering [`Support::Unsupported`], so an
//! adapter only overrides what its plugin can actually do. A few operations
//! are derived from others by default (`faction_by_tag`, `has_faction`,
//! `is_claimed`, ...); adapters may override them with a native shortcut.

use crate::error::AdapterError;
use crate::negotiation::Support;
use crate::types::{ChunkPos, HostPlayer, Location, Relationship, Role};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

pub type FactionRef = Arc<dyn FactionHandle>;
pub type PlayerRef = Arc<dyn PlayerHandle>;
pub type ClaimRef = Arc<dyn ClaimHandle>;

/// Result type for adapter operations that can fail natively.
pub type AdapterResult<T> = std::result::Result<Support<T>, AdapterError>;

/// Root of an adapter: lookups and faction lifecycle.
pub trait FactionsAdapter: Send + Sync {
    /// Readiness check of the underlying plugin.
    fn is_ready(&self) -> bool {
        true
    }

    fn factions(&self) -> Support<Vec<FactionRef>> {
        Support::Unsupported
    }

    fn faction_by_id(&self, id: &str) -> Support<Option<FactionRef>> {
        self.factions()
            .map(|all| all.into_iter().find(|f| f.id() == id))
    }

    /// Lookup by tag, case-insensitive.
    fn faction_by_tag(&self, tag: &str) -> Support<Option<FactionRef>> {
        self.factions()
            .map(|all| all.into_iter().find(|f| f.name().eq_ignore_ascii_case(tag)))
    }

    fn faction_by_player(&self, player: &HostPlayer) -> Support<Option<FactionRef>> {
        self.player(player).and_then(|p| match p {
            Some(p) => p.faction(),
            None => Support::Available(None),
        })
    }

    fn faction_at(&self, _chunk: &ChunkPos) -> Support<Option<FactionRef>> {
        Support::Unsupported
    }

    fn claim_at(&self, _chunk: &ChunkPos) -> Support<Option<ClaimRef>> {
        Support::Unsupported
    }

    fn player(&self, _player: &HostPlayer) -> Support<Option<PlayerRef>> {
        Support::Unsupported
    }

    fn create_faction(&self, _name: &str) -> AdapterResult<Option<FactionRef>> {
        Ok(Support::Unsupported)
    }

    fn delete_faction(&self, _faction: &dyn FactionHandle) -> AdapterResult<()> {
        Ok(Support::Unsupported)
    }

    fn wilderness(&self) -> Support<Option<FactionRef>> {
        Support::Unsupported
    }

    fn warzone(&self) -> Support<Option<FactionRef>> {
        Support::Unsupported
    }

    fn safezone(&self) -> Support<Option<FactionRef>> {
        Support::Unsupported
    }
}

/// A native faction object.
pub trait FactionHandle: Send + Sync {
    /// Stable native identifier; facade equality is based on it.
    fn id(&self) -> String;

    fn name(&self) -> String;

    fn leader(&self) -> Support<Option<PlayerRef>> {
        Support::Unsupported
    }

    fn members(&self) -> Support<Vec<PlayerRef>> {
        Support::Unsupported
    }

    fn home(&self) -> Support<Option<Location>> {
        Support::Unsupported
    }

    fn set_home(&self, _location: Location) -> Support<()> {
        Support::Unsupported
    }

    fn is_wilderness(&self) -> Support<bool> {
        Support::Unsupported
    }

    fn is_warzone(&self) -> Support<bool> {
        Support::Unsupported
    }

    fn is_safezone(&self) -> Support<bool> {
        Support::Unsupported
    }

    fn is_peaceful(&self) -> Support<bool> {
        Support::Unsupported
    }

    fn power(&self) -> Support<f64> {
        Support::Unsupported
    }

    fn set_power(&self, _power: f64) -> Support<()> {
        Support::Unsupported
    }

    fn points(&self) -> Support<i64> {
        Support::Unsupported
    }

    fn set_points(&self, _points: i64) -> Support<()> {
        Support::Unsupported
    }

    fn bank_balance(&self) -> Support<f64> {
        Support::Unsupported
    }

    fn set_bank_balance(&self, _balance: f64) -> Support<()> {
        Support::Unsupported
    }

    fn warps(&self) -> Support<BTreeMap<String, Location>> {
        Support::Unsupported
    }

    fn warp(&self, name: &str) -> Support<Option<Location>> {
        self.warps().map(|mut warps| warps.remove(name))
    }

    fn create_warp(&self, _name: &str, _location: Location) -> Support<()> {
        Support::Unsupported
    }

    fn delete_warp(&self, _name: &str) -> Support<()> {
        Support::Unsupported
    }

    fn add_strike(&self, _reason: &str) -> Support<()> {
        Support::Unsupported
    }

    fn remove_strike(&self, _reason: &str) -> Support<()> {
        Support::Unsupported
    }

    fn clear_strikes(&self) -> Support<()> {
        Support::Unsupported
    }

    fn strike_count(&self) -> Support<u32> {
        Support::Unsupported
    }

    /// Relation towards `other`; inconclusive native data maps to
    /// [`Relationship::None`].
    fn relationship_to(&self, _other: &dyn FactionHandle) -> Support<Relationship> {
        Support::Unsupported
    }
}

/// A native player record.
pub trait PlayerHandle: Send + Sync {
    fn unique_id(&self) -> Uuid;

    fn name(&self) -> String;

    /// The host identity behind this record.
    fn host_player(&self) -> HostPlayer;

    /// Owning faction; `None` for players without one.
    fn faction(&self) -> Support<Option<FactionRef>> {
        Support::Unsupported
    }

    fn has_faction(&self) -> Support<bool> {
        self.faction().map(|f| f.is_some())
    }

    fn power(&self) -> Support<f64> {
        Support::Unsupported
    }

    fn set_power(&self, _power: f64) -> Support<()> {
        Support::Unsupported
    }

    fn title(&self) -> Support<Option<String>> {
        Support::Unsupported
    }

    fn set_title(&self, _title: Option<String>) -> Support<()> {
        Support::Unsupported
    }

    fn role(&self) -> Support<Option<Role>> {
        Support::Unsupported
    }
}

/// A native claim record.
pub trait ClaimHandle: Send + Sync {
    fn chunk(&self) -> ChunkPos;

    fn owner(&self) -> Support<Option<FactionRef>> {
        Support::Unsupported
    }

    /// Owned by some faction other than the wilderness.
    fn is_claimed(&self) -> Support<bool> {
        self.owner().map(|owner| {
            owner.is_some_and(|f| !matches!(f.is_wilderness(), Support::Available(true)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, bool);

    impl FactionHandle for Named {
        fn id(&self) -> String {
            self.0.to_lowercase()
        }

        fn name(&self) -> String {
            self.0.to_string()
        }

        fn is_wilderness(&self) -> Support<bool> {
            Support::Available(self.1)
        }
    }

    struct TwoFactions;

    impl FactionsAdapter for TwoFactions {
        fn factions(&self) -> Support<Vec<FactionRef>> {
            Support::Available(vec![
                Arc::new(Named("Wilderness", true)),
                Arc::new(Named("Vikings", false)),
            ])
        }
    }

    struct Bare;

    impl FactionsAdapter for Bare {}

    struct FixedClaim(Option<FactionRef>);

    impl ClaimHandle for FixedClaim {
        fn chunk(&self) -> ChunkPos {
            ChunkPos::new("world", 0, 0)
        }

        fn owner(&self) -> Support<Option<FactionRef>> {
            Support::Available(self.0.clone())
        }
    }

    #[test]
    fn test_defaults_are_unsupported() {
        let adapter = Bare;
        assert!(adapter.is_ready());
        assert!(!adapter.factions().is_available());
        assert!(!adapter.faction_by_tag("x").is_available());
        assert!(matches!(adapter.create_faction("x"), Ok(Support::Unsupported)));
    }

    #[test]
    fn test_lookup_derived_from_factions() {
        let adapter = TwoFactions;
        let found = adapter.faction_by_tag("vikings").ok().flatten().unwrap();
        assert_eq!(found.name(), "Vikings");

        let found = adapter.faction_by_id("wilderness").ok().flatten().unwrap();
        assert_eq!(found.name(), "Wilderness");

        assert!(adapter.faction_by_tag("nobody").ok().unwrap().is_none());
    }

    #[test]
    fn test_is_claimed_derived_from_owner() {
        let unowned = FixedClaim(None);
        assert_eq!(unowned.is_claimed(), Support::Available(false));

        let wild = FixedClaim(Some(Arc::new(Named("Wilderness", true))));
        assert_eq!(wild.is_claimed(), Support::Available(false));

        let owned = FixedClaim(Some(Arc::new(Named("Vikings", false))));
        assert_eq!(owned.is_claimed(), Support::Available(true));
    }
}
