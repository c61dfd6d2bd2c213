use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use crate::math::INTERACTION_LAYER;

fn default_interaction_layers() -> u32 {
    INTERACTION_LAYER
}

fn default_sprint_multiplier() -> f32 {
    2.0
}

/// Collecting agent tunables loaded from RON.
#[derive(Resource, Asset, TypePath, Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub speed: f32,
    #[serde(default = "default_sprint_multiplier")]
    pub sprint_multiplier: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub look_sensitivity: f32,
    pub interaction_distance: f32,
    #[serde(default = "default_interaction_layers")]
    pub interaction_layers: u32,
    pub eye_height: f32,
    pub body_radius: f32,
    pub drop_distance: f32,
    pub start_level: String,
}
