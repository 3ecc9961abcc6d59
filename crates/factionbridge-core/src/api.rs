//! Root of the facade handed to calling code.

use crate::adapter::{ClaimRef, FactionHandle, FactionRef, FactionsAdapter, PlayerRef};
use crate::claim::Claim;
use crate::error::{BridgeError, Result};
use crate::faction::Faction;
use crate::negotiation::{NegotiationPolicy, Negotiator, Support};
use crate::player::FactionPlayer;
use crate::types::{ChunkPos, HostPlayer, Location};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Unified faction API over whichever adapter was bound at connect time.
///
/// Cheap to clone; all clones share the adapter and the negotiation policy.
#[derive(Clone)]
pub struct FactionsApi {
    adapter: Arc<dyn FactionsAdapter>,
    negotiator: Arc<Negotiator>,
}

impl FactionsApi {
    pub fn new(adapter: Arc<dyn FactionsAdapter>, negotiator: Negotiator) -> Self {
        Self {
            adapter,
            negotiator: Arc::new(negotiator),
        }
    }

    /// Identifier of the provider whose adapter backs this API.
    pub fn provider_id(&self) -> &str {
        self.negotiator.provider_id()
    }

    pub fn policy(&self) -> NegotiationPolicy {
        self.negotiator.policy()
    }

    pub fn adapter(&self) -> &Arc<dyn FactionsAdapter> {
        &self.adapter
    }

    pub fn is_ready(&self) -> bool {
        self.adapter.is_ready()
    }

    fn faction(&self, handle: FactionRef) -> Faction {
        Faction::new(handle, Arc::clone(&self.negotiator))
    }

    fn wrap(&self, handle: Option<FactionRef>) -> Option<Faction> {
        handle.map(|h| self.faction(h))
    }

    fn player_of(&self, handle: PlayerRef) -> FactionPlayer {
        FactionPlayer::new(handle, Arc::clone(&self.negotiator))
    }

    fn claim(&self, handle: ClaimRef) -> Claim {
        Claim::new(handle, Arc::clone(&self.negotiator))
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    pub fn factions(&self) -> Result<Vec<Faction>> {
        let all = self
            .negotiator
            .settle("FactionsApi::factions", self.adapter.factions())?;
        Ok(all.into_iter().map(|h| self.faction(h)).collect())
    }

    pub fn faction_by_id(&self, id: &str) -> Result<Option<Faction>> {
        self.negotiator
            .settle("FactionsApi::faction_by_id", self.adapter.faction_by_id(id))
            .map(|h| self.wrap(h))
    }

    pub fn faction_by_tag(&self, tag: &str) -> Result<Option<Faction>> {
        self.negotiator
            .settle("FactionsApi::faction_by_tag", self.adapter.faction_by_tag(tag))
            .map(|h| self.wrap(h))
    }

    pub fn faction_by_player(&self, player: &HostPlayer) -> Result<Option<Faction>> {
        self.negotiator
            .settle(
                "FactionsApi::faction_by_player",
                self.adapter.faction_by_player(player),
            )
            .map(|h| self.wrap(h))
    }

    pub fn faction_at(&self, location: &Location) -> Result<Option<Faction>> {
        self.faction_at_chunk(&location.chunk())
    }

    pub fn faction_at_chunk(&self, chunk: &ChunkPos) -> Result<Option<Faction>> {
        self.negotiator
            .settle("FactionsApi::faction_at", self.adapter.faction_at(chunk))
            .map(|h| self.wrap(h))
    }

    pub fn claim_at(&self, location: &Location) -> Result<Option<Claim>> {
        self.claim_at_chunk(&location.chunk())
    }

    pub fn claim_at_chunk(&self, chunk: &ChunkPos) -> Result<Option<Claim>> {
        let claim = self
            .negotiator
            .settle("FactionsApi::claim_at", self.adapter.claim_at(chunk))?;
        Ok(claim.map(|h| self.claim(h)))
    }

    pub fn player(&self, player: &HostPlayer) -> Result<Option<FactionPlayer>> {
        let handle = self
            .negotiator
            .settle("FactionsApi::player", self.adapter.player(player))?;
        Ok(handle.map(|h| self.player_of(h)))
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Create a faction named `name`.
    ///
    /// Fails with [`BridgeError::AlreadyExists`] when a faction that is not a
    /// server faction already carries that tag.
    pub fn create_faction(&self, name: &str) -> Result<Option<Faction>> {
        if let Support::Available(Some(existing)) = self.adapter.faction_by_tag(name) {
            if !is_server_faction(existing.as_ref()) {
                return Err(BridgeError::AlreadyExists(name.to_string()));
            }
        }

        let created = self.negotiator.settle_result(
            "FactionsApi::create_faction",
            self.adapter.create_faction(name),
        )?;
        if let Some(handle) = &created {
            debug!(provider = %self.provider_id(), id = %handle.id(), "created faction {}", name);
        }
        Ok(self.wrap(created))
    }

    pub fn delete_faction(&self, faction: &Faction) -> Result<()> {
        self.negotiator.settle_result(
            "FactionsApi::delete_faction",
            self.adapter.delete_faction(faction.handle().as_ref()),
        )?;
        debug!(provider = %self.provider_id(), id = %faction.id(), "deleted faction");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Server factions
    // ------------------------------------------------------------------------

    pub fn wilderness(&self) -> Result<Option<Faction>> {
        self.negotiator
            .settle("FactionsApi::wilderness", self.adapter.wilderness())
            .map(|h| self.wrap(h))
    }

    pub fn warzone(&self) -> Result<Option<Faction>> {
        self.negotiator
            .settle("FactionsApi::warzone", self.adapter.warzone())
            .map(|h| self.wrap(h))
    }

    pub fn safezone(&self) -> Result<Option<Faction>> {
        self.negotiator
            .settle("FactionsApi::safezone", self.adapter.safezone())
            .map(|h| self.wrap(h))
    }
}

impl fmt::Debug for FactionsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactionsApi")
            .field("provider", &self.negotiator.provider_id())
            .field("policy", &self.negotiator.policy())
            .finish()
    }
}

/// Unsupported classification counts as "not a server faction".
fn is_server_faction(handle: &dyn FactionHandle) -> bool {
    [
        handle.is_wilderness(),
        handle.is_warzone(),
        handle.is_safezone(),
    ]
    .into_iter()
    .any(|s| s == Support::Available(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterResult, PlayerHandle};
    use crate::types::Relationship;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct TestFaction {
        id: &'static str,
        wilderness: bool,
    }

    impl FactionHandle for TestFaction {
        fn id(&self) -> String {
            self.id.to_string()
        }

        fn name(&self) -> String {
            self.id.to_string()
        }

        fn is_wilderness(&self) -> Support<bool> {
            Support::Available(self.wilderness)
        }

        fn power(&self) -> Support<f64> {
            Support::Available(12.5)
        }

        fn relationship_to(&self, _other: &dyn FactionHandle) -> Support<Relationship> {
            Support::Available(Relationship::Ally)
        }
    }

    struct TestPlayer(bool);

    impl PlayerHandle for TestPlayer {
        fn unique_id(&self) -> Uuid {
            Uuid::nil()
        }

        fn name(&self) -> String {
            "Steve".to_string()
        }

        fn host_player(&self) -> HostPlayer {
            HostPlayer {
                unique_id: Uuid::nil(),
                name: "Steve".to_string(),
                online: self.0,
            }
        }
    }

    #[derive(Default)]
    struct TestAdapter {
        created: Mutex<Vec<String>>,
    }

    impl FactionsAdapter for TestAdapter {
        fn factions(&self) -> Support<Vec<FactionRef>> {
            Support::Available(vec![
                Arc::new(TestFaction {
                    id: "Wilderness",
                    wilderness: true,
                }),
                Arc::new(TestFaction {
                    id: "Vikings",
                    wilderness: false,
                }),
            ])
        }

        fn player(&self, player: &HostPlayer) -> Support<Option<PlayerRef>> {
            Support::Available(Some(Arc::new(TestPlayer(player.online))))
        }

        fn create_faction(&self, name: &str) -> AdapterResult<Option<FactionRef>> {
            self.created.lock().unwrap().push(name.to_string());
            Ok(Support::Available(None))
        }
    }

    fn api(suppress: bool) -> FactionsApi {
        let policy = NegotiationPolicy {
            suppress_exceptions: suppress,
        };
        FactionsApi::new(
            Arc::new(TestAdapter::default()),
            Negotiator::new("Test_Provider", policy),
        )
    }

    #[test]
    fn test_supported_operations_pass_through() {
        let api = api(false);
        let vikings = api.faction_by_tag("vikings").unwrap().unwrap();
        assert_eq!(vikings.power().unwrap(), 12.5);
        assert!(!vikings.is_wilderness().unwrap());
        assert_eq!(api.factions().unwrap().len(), 2);
    }

    #[test]
    fn test_strict_policy_raises_on_unsupported() {
        let api = api(false);
        let vikings = api.faction_by_tag("Vikings").unwrap().unwrap();
        assert_eq!(
            vikings.points(),
            Err(BridgeError::MethodUnsupported {
                provider: "Test_Provider".to_string(),
                method: "Faction::points".to_string(),
            })
        );
        assert!(api.claim_at_chunk(&ChunkPos::new("world", 0, 0)).is_err());
    }

    #[test]
    fn test_lenient_policy_defaults_on_unsupported() {
        let api = api(true);
        let vikings = api.faction_by_tag("Vikings").unwrap().unwrap();
        assert_eq!(vikings.points(), Ok(0));
        assert_eq!(vikings.bank_balance(), Ok(0.0));
        assert_eq!(vikings.is_peaceful(), Ok(false));
        assert_eq!(vikings.home(), Ok(None));
        assert!(vikings.members().unwrap().is_empty());
        assert_eq!(vikings.set_points(5), Ok(()));
        assert!(api.warzone().unwrap().is_none());
    }

    #[test]
    fn test_server_faction_needs_all_three_checks_under_strict_policy() {
        let api = api(false);
        let wilderness = api.faction_by_tag("Wilderness").unwrap().unwrap();
        // Short-circuits on the first supported `true`.
        assert_eq!(wilderness.is_server_faction(), Ok(true));

        let vikings = api.faction_by_tag("Vikings").unwrap().unwrap();
        assert!(vikings.is_server_faction().is_err());
    }

    #[test]
    fn test_relationship_to_self_is_member() {
        let api = api(false);
        let vikings = api.faction_by_tag("Vikings").unwrap().unwrap();
        let wilderness = api.faction_by_tag("Wilderness").unwrap().unwrap();
        assert_eq!(vikings.relationship_to(&vikings), Ok(Relationship::Member));
        assert_eq!(vikings.relationship_to(&wilderness), Ok(Relationship::Ally));
    }

    #[test]
    fn test_create_faction_rejects_existing_player_faction() {
        let api = api(false);
        assert_eq!(
            api.create_faction("VIKINGS").unwrap_err(),
            BridgeError::AlreadyExists("VIKINGS".to_string())
        );
        // A server faction with the same tag does not block creation.
        assert!(api.create_faction("Wilderness").is_ok());
        assert!(api.create_faction("Saxons").is_ok());
    }

    #[test]
    fn test_player_online_flag() {
        let api = api(false);
        let host = HostPlayer::offline(Uuid::nil(), "Steve");
        let player = api.player(&host).unwrap().unwrap();
        assert!(!player.is_online());
        assert_eq!(player.name(), "Steve");
    }
}
