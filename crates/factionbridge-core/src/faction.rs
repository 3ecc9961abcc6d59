//! Faction facade.

use crate::adapter::FactionRef;
use crate::error::Result;
use crate::negotiation::Negotiator;
use crate::player::FactionPlayer;
use crate::types::{Location, Relationship, ServerFactionKind};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A faction as seen by calling code, independent of the bound plugin.
#[derive(Clone)]
pub struct Faction {
    handle: FactionRef,
    negotiator: Arc<Negotiator>,
}

impl Faction {
    pub fn new(handle: FactionRef, negotiator: Arc<Negotiator>) -> Self {
        Self { handle, negotiator }
    }

    /// The wrapped native handle.
    pub fn handle(&self) -> &FactionRef {
        &self.handle
    }

    pub fn id(&self) -> String {
        self.handle.id()
    }

    pub fn name(&self) -> String {
        self.handle.name()
    }

    fn player(&self, handle: crate::adapter::PlayerRef) -> FactionPlayer {
        FactionPlayer::new(handle, Arc::clone(&self.negotiator))
    }

    pub fn leader(&self) -> Result<Option<FactionPlayer>> {
        let leader = self.negotiator.settle("Faction::leader", self.handle.leader())?;
        Ok(leader.map(|p| self.player(p)))
    }

    pub fn members(&self) -> Result<Vec<FactionPlayer>> {
        let members = self
            .negotiator
            .settle("Faction::members", self.handle.members())?;
        Ok(members.into_iter().map(|p| self.player(p)).collect())
    }

    pub fn online_members(&self) -> Result<Vec<FactionPlayer>> {
        Ok(self
            .members()?
            .into_iter()
            .filter(|p| p.is_online())
            .collect())
    }

    pub fn offline_members(&self) -> Result<Vec<FactionPlayer>> {
        Ok(self
            .members()?
            .into_iter()
            .filter(|p| !p.is_online())
            .collect())
    }

    pub fn home(&self) -> Result<Option<Location>> {
        self.negotiator.settle("Faction::home", self.handle.home())
    }

    pub fn set_home(&self, location: Location) -> Result<()> {
        self.negotiator
            .settle("Faction::set_home", self.handle.set_home(location))
    }

    // ------------------------------------------------------------------------
    // Server faction classification
    // ------------------------------------------------------------------------

    pub fn is_wilderness(&self) -> Result<bool> {
        self.negotiator
            .settle("Faction::is_wilderness", self.handle.is_wilderness())
    }

    pub fn is_warzone(&self) -> Result<bool> {
        self.negotiator
            .settle("Faction::is_warzone", self.handle.is_warzone())
    }

    pub fn is_safezone(&self) -> Result<bool> {
        self.negotiator
            .settle("Faction::is_safezone", self.handle.is_safezone())
    }

    pub fn is_server_faction(&self) -> Result<bool> {
        Ok(self.is_wilderness()? || self.is_warzone()? || self.is_safezone()?)
    }

    pub fn server_kind(&self) -> Result<ServerFactionKind> {
        if self.is_wilderness()? {
            Ok(ServerFactionKind::Wilderness)
        } else if self.is_warzone()? {
            Ok(ServerFactionKind::WarZone)
        } else if self.is_safezone()? {
            Ok(ServerFactionKind::SafeZone)
        } else {
            Ok(ServerFactionKind::None)
        }
    }

    pub fn is_peaceful(&self) -> Result<bool> {
        self.negotiator
            .settle("Faction::is_peaceful", self.handle.is_peaceful())
    }

    // ------------------------------------------------------------------------
    // Power, points, bank
    // ------------------------------------------------------------------------

    pub fn power(&self) -> Result<f64> {
        self.negotiator.settle("Faction::power", self.handle.power())
    }

    pub fn set_power(&self, power: f64) -> Result<()> {
        self.negotiator
            .settle("Faction::set_power", self.handle.set_power(power))
    }

    pub fn points(&self) -> Result<i64> {
        self.negotiator.settle("Faction::points", self.handle.points())
    }

    pub fn set_points(&self, points: i64) -> Result<()> {
        self.negotiator
            .settle("Faction::set_points", self.handle.set_points(points))
    }

    pub fn bank_balance(&self) -> Result<f64> {
        self.negotiator
            .settle("Faction::bank_balance", self.handle.bank_balance())
    }

    pub fn set_bank_balance(&self, balance: f64) -> Result<()> {
        self.negotiator.settle(
            "Faction::set_bank_balance",
            self.handle.set_bank_balance(balance),
        )
    }

    // ------------------------------------------------------------------------
    // Warps
    // ------------------------------------------------------------------------

    pub fn warp(&self, name: &str) -> Result<Option<Location>> {
        self.negotiator.settle("Faction::warp", self.handle.warp(name))
    }

    pub fn warps(&self) -> Result<BTreeMap<String, Location>> {
        self.negotiator.settle("Faction::warps", self.handle.warps())
    }

    pub fn create_warp(&self, name: &str, location: Location) -> Result<()> {
        self.negotiator
            .settle("Faction::create_warp", self.handle.create_warp(name, location))
    }

    pub fn delete_warp(&self, name: &str) -> Result<()> {
        self.negotiator
            .settle("Faction::delete_warp", self.handle.delete_warp(name))
    }

    // ------------------------------------------------------------------------
    // Strikes
    // ------------------------------------------------------------------------

    pub fn add_strike(&self, reason: &str) -> Result<()> {
        self.negotiator
            .settle("Faction::add_strike", self.handle.add_strike(reason))
    }

    pub fn remove_strike(&self, reason: &str) -> Result<()> {
        self.negotiator
            .settle("Faction::remove_strike", self.handle.remove_strike(reason))
    }

    pub fn clear_strikes(&self) -> Result<()> {
        self.negotiator
            .settle("Faction::clear_strikes", self.handle.clear_strikes())
    }

    pub fn strike_count(&self) -> Result<u32> {
        self.negotiator
            .settle("Faction::strike_count", self.handle.strike_count())
    }

    /// Relation towards `other`. A faction is always `Member` of itself.
    pub fn relationship_to(&self, other: &Faction) -> Result<Relationship> {
        if self == other {
            return Ok(Relationship::Member);
        }
        self.negotiator.settle(
            "Faction::relationship_to",
            self.handle.relationship_to(other.handle.as_ref()),
        )
    }
}

impl PartialEq for Faction {
    fn eq(&self, other: &Self) -> bool {
        self.handle.id() == other.handle.id()
    }
}

impl Eq for Faction {}

impl fmt::Debug for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Faction")
            .field("id", &self.handle.id())
            .field("name", &self.handle.name())
            .field("provider", &self.negotiator.provider_id())
            .finish()
    }
}
