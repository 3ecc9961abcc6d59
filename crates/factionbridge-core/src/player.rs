//! Player facade.

use crate::adapter::PlayerRef;
use crate::error::Result;
use crate::faction::Faction;
use crate::negotiation::Negotiator;
use crate::types::{HostPlayer, Role};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Faction membership view of a host player.
#[derive(Clone)]
pub struct FactionPlayer {
    handle: PlayerRef,
    negotiator: Arc<Negotiator>,
}

impl FactionPlayer {
    pub fn new(handle: PlayerRef, negotiator: Arc<Negotiator>) -> Self {
        Self { handle, negotiator }
    }

    pub fn handle(&self) -> &PlayerRef {
        &self.handle
    }

    pub fn unique_id(&self) -> Uuid {
        self.handle.unique_id()
    }

    pub fn name(&self) -> String {
        self.handle.name()
    }

    pub fn host_player(&self) -> HostPlayer {
        self.handle.host_player()
    }

    pub fn is_online(&self) -> bool {
        self.handle.host_player().online
    }

    pub fn faction(&self) -> Result<Option<Faction>> {
        let faction = self
            .negotiator
            .settle("FactionPlayer::faction", self.handle.faction())?;
        Ok(faction.map(|f| Faction::new(f, Arc::clone(&self.negotiator))))
    }

    pub fn has_faction(&self) -> Result<bool> {
        self.negotiator
            .settle("FactionPlayer::has_faction", self.handle.has_faction())
    }

    pub fn power(&self) -> Result<f64> {
        self.negotiator
            .settle("FactionPlayer::power", self.handle.power())
    }

    pub fn set_power(&self, power: f64) -> Result<()> {
        self.negotiator
            .settle("FactionPlayer::set_power", self.handle.set_power(power))
    }

    pub fn title(&self) -> Result<Option<String>> {
        self.negotiator
            .settle("FactionPlayer::title", self.handle.title())
    }

    pub fn set_title(&self, title: Option<String>) -> Result<()> {
        self.negotiator
            .settle("FactionPlayer::set_title", self.handle.set_title(title))
    }

    pub fn role(&self) -> Result<Option<Role>> {
        self.negotiator.settle("FactionPlayer::role", self.handle.role())
    }
}

impl PartialEq for FactionPlayer {
    fn eq(&self, other: &Self) -> bool {
        self.handle.unique_id() == other.handle.unique_id()
    }
}

impl Eq for FactionPlayer {}

impl fmt::Debug for FactionPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactionPlayer")
            .field("unique_id", &self.handle.unique_id())
            .field("name", &self.handle.name())
            .finish()
    }
}
