use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

fn default_wall_half_extents() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

/// Pickup placed by level design, referenced by catalog id.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedPickup {
    pub item: String,
    pub position: [f32; 3],
}

/// Scanner-blocking static geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct WallDef {
    pub center: [f32; 3],
    #[serde(default = "default_wall_half_extents")]
    pub half_extents: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeleportDef {
    pub position: [f32; 3],
    pub half_extents: [f32; 3],
    pub destination: [f32; 3],
    #[serde(default)]
    pub next_level: Option<String>,
    /// Ends the run when entered.
    #[serde(default)]
    pub finishes_run: bool,
    #[serde(default)]
    pub sound: Option<String>,
}

/// Layout of a single level, deserialized from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDef {
    pub id: String,
    pub spawn: [f32; 3],
    #[serde(default)]
    pub pickups: Vec<PlacedPickup>,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub teleports: Vec<TeleportDef>,
}

/// All known levels by id. Inserted as a Resource after asset loading.
#[derive(Resource, Debug, Default)]
pub struct LevelRegistry {
    levels: HashMap<String, LevelDef>,
}

impl LevelRegistry {
    pub fn from_defs(defs: Vec<LevelDef>) -> Self {
        Self {
            levels: defs.into_iter().map(|def| (def.id.clone(), def)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&LevelDef> {
        self.levels.get(id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
