pub mod status;

use bevy::prelude::*;

use crate::registry::AppState;
use crate::sets::GameSet;

pub use status::{StatusFeed, StatusSeverity, StatusText};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<StatusText>()
            .init_resource::<StatusFeed>()
            .add_systems(OnEnter(AppState::InGame), status::spawn_status_hud)
            .add_systems(
                Update,
                (
                    status::collect_status,
                    status::expire_status,
                    status::update_status_hud,
                    status::update_score_hud,
                )
                    .chain()
                    .in_set(GameSet::Presentation),
            );
    }
}
