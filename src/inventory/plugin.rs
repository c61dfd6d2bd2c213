use bevy::prelude::*;

use super::systems::handle_inventory_commands;
use crate::registry::AppState;
use crate::sets::GameSet;

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            handle_inventory_commands
                .in_set(GameSet::Act)
                .run_if(in_state(AppState::InGame)),
        );
    }
}
