mod agent;
mod camera;
mod interaction;
mod inventory;
mod item;
mod level;
mod math;
mod registry;
mod session;
mod sets;
#[cfg(test)]
mod test_helpers;
mod ui;

use bevy::prelude::*;

use sets::GameSet;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dropper".into(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .configure_sets(
            Update,
            (
                GameSet::Input,
                GameSet::Movement,
                GameSet::Scan,
                GameSet::Act,
                GameSet::Contact,
                GameSet::Session,
                GameSet::Presentation,
            )
                .chain(),
        )
        .add_plugins(registry::RegistryPlugin)
        .add_plugins(session::SessionPlugin)
        .add_plugins(agent::AgentPlugin)
        .add_plugins(interaction::InteractionPlugin)
        .add_plugins(item::ItemPlugin)
        .add_plugins(inventory::InventoryPlugin)
        .add_plugins(level::LevelPlugin)
        .add_plugins(camera::CameraPlugin)
        .add_plugins(ui::UiPlugin)
        .run();
}
