//! Claim facade.

use crate::adapter::ClaimRef;
use crate::error::Result;
use crate::faction::Faction;
use crate::negotiation::Negotiator;
use crate::types::ChunkPos;
use std::fmt;
use std::sync::Arc;

/// One chunk of territory, claimed or not.
#[derive(Clone)]
pub struct Claim {
    handle: ClaimRef,
    negotiator: Arc<Negotiator>,
}

impl Claim {
    pub fn new(handle: ClaimRef, negotiator: Arc<Negotiator>) -> Self {
        Self { handle, negotiator }
    }

    pub fn handle(&self) -> &ClaimRef {
        &self.handle
    }

    pub fn chunk(&self) -> ChunkPos {
        self.handle.chunk()
    }

    pub fn world(&self) -> String {
        self.handle.chunk().world
    }

    pub fn x(&self) -> i32 {
        self.handle.chunk().x
    }

    pub fn z(&self) -> i32 {
        self.handle.chunk().z
    }

    pub fn owner(&self) -> Result<Option<Faction>> {
        let owner = self.negotiator.settle("Claim::owner", self.handle.owner())?;
        Ok(owner.map(|f| Faction::new(f, Arc::clone(&self.negotiator))))
    }

    pub fn is_claimed(&self) -> Result<bool> {
        self.negotiator
            .settle("Claim::is_claimed", self.handle.is_claimed())
    }
}

impl PartialEq for Claim {
    fn eq(&self, other: &Self) -> bool {
        self.handle.chunk() == other.handle.chunk()
    }
}

impl Eq for Claim {}

impl fmt::Debug for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claim")
            .field("chunk", &self.handle.chunk())
            .finish()
    }
}
