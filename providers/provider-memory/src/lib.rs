//! # provider-memory
//!
//! An in-memory faction adapter for testing and development.
//!
//! It keeps factions, players, claims and relations in process memory and does
//! not talk to any real plugin. Each optional capability can be switched off
//! through [`Features`], which makes it the reference adapter for exercising
//! capability negotiation.

use factionbridge_core::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

pub const WILDERNESS_ID: &str = "wilderness";
pub const WARZONE_ID: &str = "warzone";
pub const SAFEZONE_ID: &str = "safezone";

// ============================================================================
// Features
// ============================================================================

/// An optional capability of the memory adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Creating and deleting factions.
    Lifecycle,
    Claims,
    Players,
    Members,
    Homes,
    ServerFactions,
    Peaceful,
    Power,
    Points,
    Bank,
    Warps,
    Strikes,
    Relations,
    Titles,
    Roles,
}

impl Feature {
    pub const ALL: [Feature; 15] = [
        Feature::Lifecycle,
        Feature::Claims,
        Feature::Players,
        Feature::Members,
        Feature::Homes,
        Feature::ServerFactions,
        Feature::Peaceful,
        Feature::Power,
        Feature::Points,
        Feature::Bank,
        Feature::Warps,
        Feature::Strikes,
        Feature::Relations,
        Feature::Titles,
        Feature::Roles,
    ];
}

/// The set of capabilities an adapter instance reports as supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features(HashSet<Feature>);

impl Features {
    pub fn all() -> Self {
        Self(Feature::ALL.into_iter().collect())
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.0.insert(feature);
        self
    }

    pub fn without(mut self, feature: Feature) -> Self {
        self.0.remove(&feature);
        self
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone)]
struct FactionRecord {
    id: String,
    name: String,
    kind: ServerFactionKind,
    leader: Option<Uuid>,
    peaceful: bool,
    power: f64,
    points: i64,
    bank: f64,
    home: Option<Location>,
    warps: BTreeMap<String, Location>,
    strikes: Vec<String>,
}

impl FactionRecord {
    fn new(id: &str, name: &str, kind: ServerFactionKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            leader: None,
            peaceful: false,
            power: 0.0,
            points: 0,
            bank: 0.0,
            home: None,
            warps: BTreeMap::new(),
            strikes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct PlayerRecord {
    host: HostPlayer,
    faction: Option<String>,
    power: f64,
    title: Option<String>,
    role: Option<Role>,
}

impl PlayerRecord {
    fn unaffiliated(host: HostPlayer) -> Self {
        Self {
            host,
            faction: None,
            power: 0.0,
            title: None,
            role: None,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    /// Keyed by faction id, iterated in id order.
    factions: BTreeMap<String, FactionRecord>,
    players: HashMap<Uuid, PlayerRecord>,
    claims: HashMap<ChunkPos, String>,
    relations: HashMap<(String, String), Relationship>,
    next_id: u64,
}

impl State {
    fn seeded() -> Self {
        let mut state = State::default();
        for (id, name, kind) in [
            (WILDERNESS_ID, "Wilderness", ServerFactionKind::Wilderness),
            (WARZONE_ID, "WarZone", ServerFactionKind::WarZone),
            (SAFEZONE_ID, "SafeZone", ServerFactionKind::SafeZone),
        ] {
            state
                .factions
                .insert(id.to_string(), FactionRecord::new(id, name, kind));
        }
        state
    }

    fn find_by_tag(&self, tag: &str) -> Option<&FactionRecord> {
        self.factions
            .values()
            .find(|f| f.name.eq_ignore_ascii_case(tag))
    }

    /// Player factions only; server factions never block a new tag.
    fn player_faction_tagged(&self, tag: &str) -> Option<&FactionRecord> {
        self.factions
            .values()
            .filter(|f| f.kind == ServerFactionKind::None)
            .find(|f| f.name.eq_ignore_ascii_case(tag))
    }

    fn relation(&self, a: &str, b: &str) -> Relationship {
        self.relations
            .get(&(a.to_string(), b.to_string()))
            .or_else(|| self.relations.get(&(b.to_string(), a.to_string())))
            .copied()
            .unwrap_or_default()
    }
}

struct Inner {
    features: Features,
    ready: AtomicBool,
    state: RwLock<State>,
}

impl Inner {
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// `Unsupported` unless `feature` is enabled, else `f()`.
    fn gate<T>(&self, feature: Feature, f: impl FnOnce() -> T) -> Support<T> {
        if self.features.has(feature) {
            Support::Available(f())
        } else {
            Support::Unsupported
        }
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// In-memory adapter. Clones share the same state.
#[derive(Clone)]
pub struct MemoryAdapter {
    inner: Arc<Inner>,
}

impl MemoryAdapter {
    /// Create an adapter with the well-known server factions already present.
    pub fn new(features: Features) -> Self {
        Self {
            inner: Arc::new(Inner {
                features,
                ready: AtomicBool::new(true),
                state: RwLock::new(State::seeded()),
            }),
        }
    }

    /// This adapter as a facade-ready trait object.
    pub fn shared(&self) -> Arc<dyn FactionsAdapter> {
        Arc::new(self.clone())
    }

    pub fn features(&self) -> &Features {
        &self.inner.features
    }

    /// Simulate the native plugin becoming (un)available.
    pub fn set_ready(&self, ready: bool) {
        self.inner.ready.store(ready, Ordering::SeqCst);
    }

    /// Seed a player faction and return its id.
    pub fn add_faction(&self, name: &str) -> String {
        let mut state = self.inner.write();
        insert_faction(&mut state, name)
    }

    /// Seed a member. The first member to join as `Role::Leader` becomes leader.
    pub fn add_member(&self, faction_id: &str, host: HostPlayer, role: Role) {
        let mut state = self.inner.write();
        if role == Role::Leader {
            if let Some(faction) = state.factions.get_mut(faction_id) {
                faction.leader.get_or_insert(host.unique_id);
            }
        }
        state.players.insert(
            host.unique_id,
            PlayerRecord {
                faction: Some(faction_id.to_string()),
                role: Some(role),
                ..PlayerRecord::unaffiliated(host)
            },
        );
    }

    /// Number of players the adapter holds a record for.
    pub fn player_count(&self) -> usize {
        self.inner.read().players.len()
    }

    pub fn add_claim(&self, faction_id: &str, chunk: ChunkPos) {
        self.inner
            .write()
            .claims
            .insert(chunk, faction_id.to_string());
    }

    /// Record a symmetric relation between two factions.
    pub fn set_relation(&self, a: &str, b: &str, relationship: Relationship) {
        self.inner
            .write()
            .relations
            .insert((a.to_string(), b.to_string()), relationship);
    }

    fn faction_ref(&self, id: &str) -> FactionRef {
        Arc::new(MemoryFaction {
            id: id.to_string(),
            inner: Arc::clone(&self.inner),
        })
    }

    fn server_faction(&self, id: &str) -> Support<Option<FactionRef>> {
        self.inner
            .gate(Feature::ServerFactions, || Some(self.faction_ref(id)))
    }
}

fn insert_faction(state: &mut State, name: &str) -> String {
    state.next_id += 1;
    let id = format!("f{}", state.next_id);
    state.factions.insert(
        id.clone(),
        FactionRecord::new(&id, name, ServerFactionKind::None),
    );
    id
}

impl FactionsAdapter for MemoryAdapter {
    fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::SeqCst)
    }

    fn factions(&self) -> Support<Vec<FactionRef>> {
        let ids: Vec<String> = self.inner.read().factions.keys().cloned().collect();
        Support::Available(ids.iter().map(|id| self.faction_ref(id)).collect())
    }

    fn faction_by_id(&self, id: &str) -> Support<Option<FactionRef>> {
        let exists = self.inner.read().factions.contains_key(id);
        Support::Available(exists.then(|| self.faction_ref(id)))
    }

    fn faction_by_tag(&self, tag: &str) -> Support<Option<FactionRef>> {
        let id = self.inner.read().find_by_tag(tag).map(|f| f.id.clone());
        Support::Available(id.map(|id| self.faction_ref(&id)))
    }

    fn faction_at(&self, chunk: &ChunkPos) -> Support<Option<FactionRef>> {
        self.inner.gate(Feature::Claims, || {
            let id = self
                .inner
                .read()
                .claims
                .get(chunk)
                .cloned()
                .unwrap_or_else(|| WILDERNESS_ID.to_string());
            Some(self.faction_ref(&id))
        })
    }

    fn claim_at(&self, chunk: &ChunkPos) -> Support<Option<ClaimRef>> {
        self.inner.gate(Feature::Claims, || {
            Some(Arc::new(MemoryClaim {
                chunk: chunk.clone(),
                adapter: self.clone(),
            }) as ClaimRef)
        })
    }

    fn player(&self, player: &HostPlayer) -> Support<Option<PlayerRef>> {
        self.inner.gate(Feature::Players, || {
            Some(Arc::new(MemoryPlayer {
                host: player.clone(),
                inner: Arc::clone(&self.inner),
            }) as PlayerRef)
        })
    }

    fn create_faction(&self, name: &str) -> AdapterResult<Option<FactionRef>> {
        if !self.inner.features.has(Feature::Lifecycle) {
            return Ok(Support::Unsupported);
        }

        let mut state = self.inner.write();
        if state.player_faction_tagged(name).is_some() {
            return Err(AdapterError::AlreadyExists(name.to_string()));
        }
        let id = insert_faction(&mut state, name);
        debug!("memory adapter created faction {} ({})", name, id);
        Ok(Support::Available(Some(self.faction_ref(&id))))
    }

    fn delete_faction(&self, faction: &dyn FactionHandle) -> AdapterResult<()> {
        if !self.inner.features.has(Feature::Lifecycle) {
            return Ok(Support::Unsupported);
        }

        let id = faction.id();
        let mut state = self.inner.write();
        match state.factions.get(&id) {
            None => return Err(AdapterError::NotFound(id)),
            Some(record) if record.kind != ServerFactionKind::None => {
                return Err(AdapterError::Rejected(format!(
                    "server faction '{}' cannot be deleted",
                    record.name
                )));
            }
            Some(_) => {}
        }

        state.factions.remove(&id);
        state.claims.retain(|_, owner| *owner != id);
        state.relations.retain(|(a, b), _| *a != id && *b != id);
        for player in state.players.values_mut() {
            if player.faction.as_deref() == Some(id.as_str()) {
                player.faction = None;
                player.role = None;
            }
        }
        Ok(Support::Available(()))
    }

    fn wilderness(&self) -> Support<Option<FactionRef>> {
        self.server_faction(WILDERNESS_ID)
    }

    fn warzone(&self) -> Support<Option<FactionRef>> {
        self.server_faction(WARZONE_ID)
    }

    fn safezone(&self) -> Support<Option<FactionRef>> {
        self.server_faction(SAFEZONE_ID)
    }
}

// ============================================================================
// Handles
// ============================================================================

struct MemoryFaction {
    id: String,
    inner: Arc<Inner>,
}

impl MemoryFaction {
    /// Read a field of the record; a deleted faction reads as `default`.
    fn read<T>(&self, default: T, f: impl FnOnce(&FactionRecord) -> T) -> T {
        self.inner.read().factions.get(&self.id).map_or(default, f)
    }

    fn update(&self, f: impl FnOnce(&mut FactionRecord)) {
        if let Some(record) = self.inner.write().factions.get_mut(&self.id) {
            f(record);
        }
    }

    fn player_ref(&self, unique_id: Uuid) -> PlayerRef {
        Arc::new(MemoryPlayer::known(&self.inner, unique_id))
    }
}

impl FactionHandle for MemoryFaction {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> String {
        self.read(String::new(), |f| f.name.clone())
    }

    fn leader(&self) -> Support<Option<PlayerRef>> {
        self.inner.gate(Feature::Members, || {
            self.read(None, |f| f.leader).map(|id| self.player_ref(id))
        })
    }

    fn members(&self) -> Support<Vec<PlayerRef>> {
        self.inner.gate(Feature::Members, || {
            let mut ids: Vec<(String, Uuid)> = self
                .inner
                .read()
                .players
                .values()
                .filter(|p| p.faction.as_deref() == Some(self.id.as_str()))
                .map(|p| (p.host.name.clone(), p.host.unique_id))
                .collect();
            ids.sort();
            ids.into_iter().map(|(_, id)| self.player_ref(id)).collect()
        })
    }

    fn home(&self) -> Support<Option<Location>> {
        self.inner
            .gate(Feature::Homes, || self.read(None, |f| f.home.clone()))
    }

    fn set_home(&self, location: Location) -> Support<()> {
        self.inner
            .gate(Feature::Homes, || self.update(|f| f.home = Some(location)))
    }

    fn is_wilderness(&self) -> Support<bool> {
        self.inner.gate(Feature::ServerFactions, || {
            self.read(false, |f| f.kind == ServerFactionKind::Wilderness)
        })
    }

    fn is_warzone(&self) -> Support<bool> {
        self.inner.gate(Feature::ServerFactions, || {
            self.read(false, |f| f.kind == ServerFactionKind::WarZone)
        })
    }

    fn is_safezone(&self) -> Support<bool> {
        self.inner.gate(Feature::ServerFactions, || {
            self.read(false, |f| f.kind == ServerFactionKind::SafeZone)
        })
    }

    fn is_peaceful(&self) -> Support<bool> {
        self.inner
            .gate(Feature::Peaceful, || self.read(false, |f| f.peaceful))
    }

    fn power(&self) -> Support<f64> {
        self.inner.gate(Feature::Power, || self.read(0.0, |f| f.power))
    }

    fn set_power(&self, power: f64) -> Support<()> {
        self.inner
            .gate(Feature::Power, || self.update(|f| f.power = power))
    }

    fn points(&self) -> Support<i64> {
        self.inner.gate(Feature::Points, || self.read(0, |f| f.points))
    }

    fn set_points(&self, points: i64) -> Support<()> {
        self.inner
            .gate(Feature::Points, || self.update(|f| f.points = points))
    }

    fn bank_balance(&self) -> Support<f64> {
        self.inner.gate(Feature::Bank, || self.read(0.0, |f| f.bank))
    }

    fn set_bank_balance(&self, balance: f64) -> Support<()> {
        self.inner
            .gate(Feature::Bank, || self.update(|f| f.bank = balance))
    }

    fn warps(&self) -> Support<BTreeMap<String, Location>> {
        self.inner
            .gate(Feature::Warps, || self.read(BTreeMap::new(), |f| f.warps.clone()))
    }

    fn create_warp(&self, name: &str, location: Location) -> Support<()> {
        self.inner.gate(Feature::Warps, || {
            self.update(|f| {
                f.warps.insert(name.to_string(), location);
            })
        })
    }

    fn delete_warp(&self, name: &str) -> Support<()> {
        self.inner.gate(Feature::Warps, || {
            self.update(|f| {
                f.warps.remove(name);
            })
        })
    }

    fn add_strike(&self, reason: &str) -> Support<()> {
        self.inner.gate(Feature::Strikes, || {
            self.update(|f| f.strikes.push(reason.to_string()))
        })
    }

    fn remove_strike(&self, reason: &str) -> Support<()> {
        self.inner.gate(Feature::Strikes, || {
            self.update(|f| {
                if let Some(pos) = f.strikes.iter().position(|s| s == reason) {
                    f.strikes.remove(pos);
                }
            })
        })
    }

    fn clear_strikes(&self) -> Support<()> {
        self.inner
            .gate(Feature::Strikes, || self.update(|f| f.strikes.clear()))
    }

    fn strike_count(&self) -> Support<u32> {
        self.inner.gate(Feature::Strikes, || {
            self.read(0, |f| u32::try_from(f.strikes.len()).unwrap_or(u32::MAX))
        })
    }

    fn relationship_to(&self, other: &dyn FactionHandle) -> Support<Relationship> {
        self.inner.gate(Feature::Relations, || {
            self.inner.read().relation(&self.id, &other.id())
        })
    }
}

/// A player handle. Lookups never create a record; the first write does.
struct MemoryPlayer {
    /// Identity as the caller last saw it; written into the record on update.
    host: HostPlayer,
    inner: Arc<Inner>,
}

impl MemoryPlayer {
    /// Handle for a player the adapter already tracks, e.g. a faction member.
    fn known(inner: &Arc<Inner>, unique_id: Uuid) -> Self {
        let host = inner
            .read()
            .players
            .get(&unique_id)
            .map(|p| p.host.clone())
            .unwrap_or_else(|| HostPlayer::offline(unique_id, String::new()));
        Self {
            host,
            inner: Arc::clone(inner),
        }
    }

    fn read<T>(&self, default: T, f: impl FnOnce(&PlayerRecord) -> T) -> T {
        self.inner
            .read()
            .players
            .get(&self.host.unique_id)
            .map_or(default, f)
    }

    fn update(&self, f: impl FnOnce(&mut PlayerRecord)) {
        let mut state = self.inner.write();
        let record = state
            .players
            .entry(self.host.unique_id)
            .or_insert_with(|| PlayerRecord::unaffiliated(self.host.clone()));
        record.host = self.host.clone();
        f(record);
    }
}

impl PlayerHandle for MemoryPlayer {
    fn unique_id(&self) -> Uuid {
        self.host.unique_id
    }

    fn name(&self) -> String {
        self.host.name.clone()
    }

    fn host_player(&self) -> HostPlayer {
        self.host.clone()
    }

    fn faction(&self) -> Support<Option<FactionRef>> {
        let id = self.read(None, |p| p.faction.clone());
        Support::Available(id.map(|id| {
            Arc::new(MemoryFaction {
                id,
                inner: Arc::clone(&self.inner),
            }) as FactionRef
        }))
    }

    fn power(&self) -> Support<f64> {
        self.inner.gate(Feature::Power, || self.read(0.0, |p| p.power))
    }

    fn set_power(&self, power: f64) -> Support<()> {
        self.inner
            .gate(Feature::Power, || self.update(|p| p.power = power))
    }

    fn title(&self) -> Support<Option<String>> {
        self.inner
            .gate(Feature::Titles, || self.read(None, |p| p.title.clone()))
    }

    fn set_title(&self, title: Option<String>) -> Support<()> {
        self.inner
            .gate(Feature::Titles, || self.update(|p| p.title = title))
    }

    fn role(&self) -> Support<Option<Role>> {
        self.inner.gate(Feature::Roles, || self.read(None, |p| p.role))
    }
}

struct MemoryClaim {
    chunk: ChunkPos,
    adapter: MemoryAdapter,
}

impl ClaimHandle for MemoryClaim {
    fn chunk(&self) -> ChunkPos {
        self.chunk.clone()
    }

    fn owner(&self) -> Support<Option<FactionRef>> {
        let owner = self.adapter.inner.read().claims.get(&self.chunk).cloned();
        Support::Available(Some(
            self.adapter
                .faction_ref(owner.as_deref().unwrap_or(WILDERNESS_ID)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steve() -> HostPlayer {
        HostPlayer::online(Uuid::from_u128(1), "Steve")
    }

    fn alex() -> HostPlayer {
        HostPlayer::offline(Uuid::from_u128(2), "Alex")
    }

    fn api(adapter: &MemoryAdapter, suppress: bool) -> FactionsApi {
        FactionsApi::new(
            adapter.shared(),
            Negotiator::new(
                "Memory_Memory",
                NegotiationPolicy {
                    suppress_exceptions: suppress,
                },
            ),
        )
    }

    #[test]
    fn test_server_factions_are_seeded() {
        let adapter = MemoryAdapter::new(Features::all());
        let api = api(&adapter, false);

        let wilderness = api.wilderness().unwrap().unwrap();
        assert!(wilderness.is_wilderness().unwrap());
        assert!(wilderness.is_server_faction().unwrap());
        assert_eq!(wilderness.server_kind().unwrap(), ServerFactionKind::Wilderness);

        let safezone = api.safezone().unwrap().unwrap();
        assert_eq!(safezone.server_kind().unwrap(), ServerFactionKind::SafeZone);
        assert_eq!(api.factions().unwrap().len(), 3);
    }

    #[test]
    fn test_members_and_online_split() {
        let adapter = MemoryAdapter::new(Features::all());
        let id = adapter.add_faction("Vikings");
        adapter.add_member(&id, steve(), Role::Leader);
        adapter.add_member(&id, alex(), Role::Normal);
        let api = api(&adapter, false);

        let vikings = api.faction_by_id(&id).unwrap().unwrap();
        assert_eq!(vikings.members().unwrap().len(), 2);
        assert_eq!(vikings.online_members().unwrap()[0].name(), "Steve");
        assert_eq!(vikings.offline_members().unwrap()[0].name(), "Alex");
        assert_eq!(vikings.leader().unwrap().unwrap().name(), "Steve");

        let player = api.player(&alex()).unwrap().unwrap();
        assert!(player.has_faction().unwrap());
        assert_eq!(player.role().unwrap(), Some(Role::Normal));
        assert_eq!(player.faction().unwrap().unwrap(), vikings);
        assert_eq!(api.faction_by_player(&alex()).unwrap().unwrap(), vikings);
    }

    #[test]
    fn test_unknown_player_has_no_faction() {
        let adapter = MemoryAdapter::new(Features::all());
        let api = api(&adapter, false);

        let player = api.player(&steve()).unwrap().unwrap();
        assert!(!player.has_faction().unwrap());
        assert!(player.faction().unwrap().is_none());
    }

    #[test]
    fn test_claims() {
        let adapter = MemoryAdapter::new(Features::all());
        let id = adapter.add_faction("Vikings");
        adapter.add_claim(&id, ChunkPos::new("world", 2, 3));
        let api = api(&adapter, false);

        let claimed = api
            .claim_at(&Location::new("world", 40.0, 70.0, 50.0))
            .unwrap()
            .unwrap();
        assert!(claimed.is_claimed().unwrap());
        assert_eq!(claimed.owner().unwrap().unwrap().name(), "Vikings");
        assert_eq!((claimed.world(), claimed.x(), claimed.z()), ("world".to_string(), 2, 3));

        let wild = api
            .claim_at_chunk(&ChunkPos::new("world", 0, 0))
            .unwrap()
            .unwrap();
        assert!(!wild.is_claimed().unwrap());

        let at = api.faction_at_chunk(&ChunkPos::new("world", 0, 0)).unwrap();
        assert!(at.unwrap().is_wilderness().unwrap());
    }

    #[test]
    fn test_economy_and_warps() {
        let adapter = MemoryAdapter::new(Features::all());
        let id = adapter.add_faction("Vikings");
        let api = api(&adapter, false);
        let vikings = api.faction_by_id(&id).unwrap().unwrap();

        vikings.set_power(20.0).unwrap();
        vikings.set_points(7).unwrap();
        vikings.set_bank_balance(99.5).unwrap();
        assert_eq!(vikings.power().unwrap(), 20.0);
        assert_eq!(vikings.points().unwrap(), 7);
        assert_eq!(vikings.bank_balance().unwrap(), 99.5);

        let spot = Location::new("world", 1.0, 64.0, 1.0);
        vikings.create_warp("base", spot.clone()).unwrap();
        assert_eq!(vikings.warp("base").unwrap(), Some(spot));
        assert_eq!(vikings.warps().unwrap().len(), 1);
        vikings.delete_warp("base").unwrap();
        assert!(vikings.warp("base").unwrap().is_none());

        vikings.add_strike("griefing").unwrap();
        vikings.add_strike("spam").unwrap();
        vikings.remove_strike("griefing").unwrap();
        assert_eq!(vikings.strike_count().unwrap(), 1);
        vikings.clear_strikes().unwrap();
        assert_eq!(vikings.strike_count().unwrap(), 0);
    }

    #[test]
    fn test_relations_are_symmetric_and_total() {
        let adapter = MemoryAdapter::new(Features::all());
        let a = adapter.add_faction("Vikings");
        let b = adapter.add_faction("Saxons");
        let c = adapter.add_faction("Franks");
        adapter.set_relation(&a, &b, Relationship::Enemy);
        let api = api(&adapter, false);

        let vikings = api.faction_by_id(&a).unwrap().unwrap();
        let saxons = api.faction_by_id(&b).unwrap().unwrap();
        let franks = api.faction_by_id(&c).unwrap().unwrap();
        assert_eq!(vikings.relationship_to(&saxons).unwrap(), Relationship::Enemy);
        assert_eq!(saxons.relationship_to(&vikings).unwrap(), Relationship::Enemy);
        assert_eq!(vikings.relationship_to(&franks).unwrap(), Relationship::None);
    }

    #[test]
    fn test_create_and_delete() {
        let adapter = MemoryAdapter::new(Features::all());
        let api = api(&adapter, false);

        let created = api.create_faction("Vikings").unwrap().unwrap();
        assert_eq!(created.name(), "Vikings");
        assert_eq!(
            api.create_faction("vikings").unwrap_err(),
            BridgeError::AlreadyExists("vikings".to_string())
        );

        api.delete_faction(&created).unwrap();
        assert!(api.faction_by_tag("Vikings").unwrap().is_none());

        let wilderness = api.wilderness().unwrap().unwrap();
        assert!(matches!(
            api.delete_faction(&wilderness),
            Err(BridgeError::Adapter(_))
        ));
    }

    #[test]
    fn test_server_faction_tags_do_not_block_creation() {
        let adapter = MemoryAdapter::new(Features::all());
        let api = api(&adapter, false);

        let created = api.create_faction("Wilderness").unwrap().unwrap();
        assert!(!created.is_server_faction().unwrap());
        assert!(api.wilderness().unwrap().unwrap().is_wilderness().unwrap());
        assert!(api.create_faction("warzone").is_ok());

        api.create_faction("Vikings").unwrap();
        assert_eq!(
            api.create_faction("vikings").unwrap_err(),
            BridgeError::AlreadyExists("vikings".to_string())
        );
        assert_eq!(
            api.create_faction("WILDERNESS").unwrap_err(),
            BridgeError::AlreadyExists("WILDERNESS".to_string())
        );
    }

    #[test]
    fn test_player_lookups_do_not_create_records() {
        let adapter = MemoryAdapter::new(Features::all());
        let api = api(&adapter, false);

        let player = api.player(&steve()).unwrap().unwrap();
        assert_eq!(player.name(), "Steve");
        assert!(player.title().unwrap().is_none());
        assert!(api.faction_by_player(&steve()).unwrap().is_none());
        assert_eq!(adapter.player_count(), 0);

        player.set_title(Some("Wanderer".to_string())).unwrap();
        assert_eq!(adapter.player_count(), 1);
        let again = api.player(&steve()).unwrap().unwrap();
        assert_eq!(again.title().unwrap().as_deref(), Some("Wanderer"));
        assert!(!again.has_faction().unwrap());
    }

    #[test]
    fn test_disabled_features_negotiate() {
        let adapter = MemoryAdapter::new(Features::all().without(Feature::Points));
        let id = adapter.add_faction("Vikings");

        let strict = api(&adapter, false);
        let vikings = strict.faction_by_id(&id).unwrap().unwrap();
        assert!(matches!(
            vikings.points(),
            Err(BridgeError::MethodUnsupported { .. })
        ));

        let lenient = api(&adapter, true);
        let vikings = lenient.faction_by_id(&id).unwrap().unwrap();
        assert_eq!(vikings.points().unwrap(), 0);
        assert!(vikings.set_points(4).is_ok());
    }

    #[test]
    fn test_readiness_toggle() {
        let adapter = MemoryAdapter::new(Features::none());
        assert!(adapter.is_ready());
        adapter.set_ready(false);
        assert!(!adapter.shared().is_ready());
    }
}
