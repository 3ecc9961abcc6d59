//! Plain value types passed across the facade.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Geometry
// ============================================================================

/// A position inside a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// The chunk this location falls into.
    ///
    /// Block coordinates are floored before shifting, so `-0.5` lands in chunk `-1`.
    pub fn chunk(&self) -> ChunkPos {
        let block_x = self.x.floor() as i32;
        let block_z = self.z.floor() as i32;
        ChunkPos::new(self.world.clone(), block_x >> 4, block_z >> 4)
    }
}

/// Chunk coordinates; the unit of claimed territory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPos {
    pub world: String,
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(world: impl Into<String>, x: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            z,
        }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}, {}]", self.world, self.x, self.z)
    }
}

// ============================================================================
// Players
// ============================================================================

/// The host's view of a player identity, online or offline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostPlayer {
    pub unique_id: Uuid,
    pub name: String,
    pub online: bool,
}

impl HostPlayer {
    pub fn online(unique_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            unique_id,
            name: name.into(),
            online: true,
        }
    }

    pub fn offline(unique_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            unique_id,
            name: name.into(),
            online: false,
        }
    }
}

/// Rank of a player inside their faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Leader,
    Coleader,
    Moderator,
    Normal,
    Recruit,
}

impl Role {
    /// Map a plugin's native role name onto the unified set.
    pub fn from_native(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "leader" | "admin" | "owner" | "king" => Some(Role::Leader),
            "coleader" | "co-leader" | "co_leader" => Some(Role::Coleader),
            "moderator" | "mod" | "officer" => Some(Role::Moderator),
            "normal" | "member" => Some(Role::Normal),
            "recruit" => Some(Role::Recruit),
            _ => None,
        }
    }
}

// ============================================================================
// Factions
// ============================================================================

/// How one faction regards another.
///
/// `None` is both the neutral relation and the answer when the native data is
/// inconclusive, so every pair of factions maps onto exactly one variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Enemy,
    Truce,
    Ally,
    Member,
    #[default]
    None,
}

impl Relationship {
    pub const ALL: [Relationship; 5] = [
        Relationship::Enemy,
        Relationship::Truce,
        Relationship::Ally,
        Relationship::Member,
        Relationship::None,
    ];

    /// Map a plugin's native relation name onto the unified set.
    pub fn from_native(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "enemy" | "enemies" | "war" => Relationship::Enemy,
            "truce" => Relationship::Truce,
            "ally" | "allies" | "alliance" => Relationship::Ally,
            "member" | "members" | "own" | "self" => Relationship::Member,
            _ => Relationship::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Enemy => "enemy",
            Relationship::Truce => "truce",
            Relationship::Ally => "ally",
            Relationship::Member => "member",
            Relationship::None => "none",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of factions that are not owned by players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerFactionKind {
    Wilderness,
    WarZone,
    SafeZone,
    #[default]
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_chunk() {
        let loc = Location::new("world", 31.9, 64.0, 16.0);
        assert_eq!(loc.chunk(), ChunkPos::new("world", 1, 1));

        let loc = Location::new("world", -0.5, 64.0, -17.0);
        assert_eq!(loc.chunk(), ChunkPos::new("world", -1, -2));
    }

    #[test]
    fn test_relationship_from_native_is_total() {
        assert_eq!(Relationship::from_native("ENEMY"), Relationship::Enemy);
        assert_eq!(Relationship::from_native(" Ally "), Relationship::Ally);
        assert_eq!(Relationship::from_native("TRUCE"), Relationship::Truce);
        assert_eq!(Relationship::from_native("MEMBER"), Relationship::Member);
        assert_eq!(Relationship::from_native("NEUTRAL"), Relationship::None);
        assert_eq!(Relationship::from_native(""), Relationship::None);
        assert_eq!(Relationship::default(), Relationship::None);
    }

    #[test]
    fn test_relationship_serde() {
        let json = serde_json::to_string(&Relationship::Ally).unwrap();
        assert_eq!(json, "\"ally\"");
    }

    #[test]
    fn test_role_from_native() {
        assert_eq!(Role::from_native("ADMIN"), Some(Role::Leader));
        assert_eq!(Role::from_native("COLEADER"), Some(Role::Coleader));
        assert_eq!(Role::from_native("recruit"), Some(Role::Recruit));
        assert_eq!(Role::from_native("peasant"), None);
    }
}
