use bevy::prelude::*;

use super::pickup::{animate_bob, collect_on_contact, init_pickup_listeners, prepare_pickup_assets};
use super::registry::ItemRegistry;
use crate::interaction::contact::detect_contacts;
use crate::registry::AppState;
use crate::sets::GameSet;

pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        init_pickup_listeners(app.world_mut());
        app.add_systems(OnEnter(AppState::InGame), prepare_pickup_assets)
            .add_systems(
                Update,
                (
                    prepare_pickup_assets
                        .run_if(resource_exists_and_changed::<ItemRegistry>)
                        .in_set(GameSet::Input),
                    collect_on_contact
                        .after(detect_contacts)
                        .in_set(GameSet::Contact),
                    animate_bob.in_set(GameSet::Presentation),
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
