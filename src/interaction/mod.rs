pub mod contact;
pub mod scanner;
pub mod target;

use bevy::prelude::*;

use crate::registry::AppState;
use crate::sets::GameSet;

pub use target::{Interactable, InteractionListener, InteractionPayload};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<contact::BeginOverlap>().add_systems(
            Update,
            (
                scanner::scan_for_targets.in_set(GameSet::Scan),
                scanner::interact_with_target.in_set(GameSet::Act),
                contact::detect_contacts.in_set(GameSet::Contact),
            )
                .run_if(in_state(AppState::InGame)),
        );
    }
}
