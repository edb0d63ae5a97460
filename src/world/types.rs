//! World graph data types: areas, locations, connections.
//!
//! Area and connection ids serialize as their display strings (`"A1-3"`,
//! `"A0-0~A1-3"`) so they can key serialized maps.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable area identity: a pure function of world position, never of RNG
/// state, so connections can reference an area before it is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AreaId {
    pub distance: u32,
    pub index: u32,
}

impl AreaId {
    pub const HUB: AreaId = AreaId {
        distance: 0,
        index: 0,
    };

    pub fn new(distance: u32, index: u32) -> Self {
        Self { distance, index }
    }

    pub fn is_hub(&self) -> bool {
        *self == Self::HUB
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}-{}", self.distance, self.index)
    }
}

impl FromStr for AreaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix('A')
            .ok_or_else(|| format!("area id missing 'A' prefix: {s}"))?;
        let (distance, index) = body
            .split_once('-')
            .ok_or_else(|| format!("area id missing '-': {s}"))?;
        Ok(AreaId {
            distance: distance
                .parse()
                .map_err(|_| format!("bad distance in area id: {s}"))?,
            index: index
                .parse()
                .map_err(|_| format!("bad index in area id: {s}"))?,
        })
    }
}

impl Serialize for AreaId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AreaId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Location identity: the owning area plus a slot within it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LocationId {
    pub area: AreaId,
    pub slot: u32,
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:L{}", self.area, self.slot)
    }
}

/// What a location is, with the fields that kind needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationKind {
    GatheringNode {
        resource: String,
        required_skill: String,
        tier: u32,
    },
    MobCamp {
        threat: u32,
    },
    GuildHall {
        guild: String,
    },
    Warehouse,
}

impl LocationKind {
    pub fn describe(&self) -> &'static str {
        match self {
            LocationKind::GatheringNode { .. } => "gathering node",
            LocationKind::MobCamp { .. } => "mob camp",
            LocationKind::GuildHall { .. } => "guild hall",
            LocationKind::Warehouse => "warehouse",
        }
    }
}

/// A point of interest inside an area. Immutable once its area is
/// materialized; discovery flags live in the knowledge store, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub kind: LocationKind,
}

/// A node in the world graph.
///
/// Areas exist in two stages: referenced (`generated == false`, no
/// locations yet) and materialized. They are never deleted or regenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    pub generated: bool,
    pub locations: Vec<Location>,
}

impl Area {
    /// A referenced-but-ungenerated area. The name is filled in when the
    /// area materializes.
    pub fn placeholder(id: AreaId) -> Self {
        Self {
            id,
            name: String::new(),
            generated: false,
            locations: Vec::new(),
        }
    }
}

/// Undirected connection identity: the endpoint pair in canonical order,
/// so `(a, b)` and `(b, a)` name the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId {
    lo: AreaId,
    hi: AreaId,
}

impl ConnectionId {
    pub fn new(a: AreaId, b: AreaId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn endpoints(&self) -> (AreaId, AreaId) {
        (self.lo, self.hi)
    }

    /// The endpoint that is not `from`. Panics if `from` is not an
    /// endpoint: callers asking that question have a corrupted graph.
    pub fn other(&self, from: AreaId) -> AreaId {
        if from == self.lo {
            self.hi
        } else if from == self.hi {
            self.lo
        } else {
            panic!("area {from} is not an endpoint of connection {self}");
        }
    }

    pub fn touches(&self, area: AreaId) -> bool {
        self.lo == area || self.hi == area
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.lo, self.hi)
    }
}

impl FromStr for ConnectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once('~')
            .ok_or_else(|| format!("connection id missing '~': {s}"))?;
        Ok(ConnectionId::new(a.parse()?, b.parse()?))
    }
}

impl Serialize for ConnectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConnectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// An edge between two areas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    /// Travel time factor, 1..=4.
    pub travel_time_multiplier: u32,
}
