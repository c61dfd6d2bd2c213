//! Asset loading pipeline: data files → registries and config resources.

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::agent::AgentConfig;
use super::assets::{ItemCatalogAsset, LevelRegistryAsset};
use super::level::LevelRegistry;
use super::{AppState, RegistryHandles};

use crate::agent::input::InputMap;
use crate::item::ItemRegistry;
use crate::ui::StatusText;

/// Handles for assets being loaded.
#[derive(Resource)]
pub(crate) struct LoadingAssets {
    items: Handle<ItemCatalogAsset>,
    agent: Handle<AgentConfig>,
    input: Handle<InputMap>,
    levels: Handle<LevelRegistryAsset>,
    failed: bool,
}

pub(crate) fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(LoadingAssets {
        items: asset_server.load("data/items.catalog.ron"),
        agent: asset_server.load("data/agent.def.ron"),
        input: asset_server.load("data/input.map.ron"),
        levels: asset_server.load("data/levels.registry.ron"),
        failed: false,
    });
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn check_loading(
    mut commands: Commands,
    mut loading: ResMut<LoadingAssets>,
    asset_server: Res<AssetServer>,
    item_assets: Res<Assets<ItemCatalogAsset>>,
    agent_assets: Res<Assets<AgentConfig>>,
    input_assets: Res<Assets<InputMap>>,
    level_assets: Res<Assets<LevelRegistryAsset>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut status: MessageWriter<StatusText>,
) {
    if loading.failed {
        return;
    }

    let required = [
        ("item catalog", asset_server.load_state(&loading.items)),
        ("agent definition", asset_server.load_state(&loading.agent)),
        ("level registry", asset_server.load_state(&loading.levels)),
    ];
    for (name, state) in &required {
        if let LoadState::Failed(err) = state {
            error!("Failed to load {name}: {err}");
            loading.failed = true;
        }
    }
    if loading.failed {
        return;
    }

    let input_failed = matches!(
        asset_server.load_state(&loading.input),
        LoadState::Failed(_)
    );
    let input = input_assets.get(&loading.input);
    if input.is_none() && !input_failed {
        return; // input map still loading
    }

    let (Some(items), Some(agent), Some(levels)) = (
        item_assets.get(&loading.items),
        agent_assets.get(&loading.agent),
        level_assets.get(&loading.levels),
    ) else {
        return; // not loaded yet
    };

    commands.insert_resource(ItemRegistry::from_defs(items.items.clone()));
    commands.insert_resource(agent.clone());
    commands.insert_resource(LevelRegistry::from_defs(levels.levels.clone()));
    match input {
        Some(map) => commands.insert_resource(map.clone()),
        None => {
            warn!("Input map failed to load, agent has no key bindings");
            status.write(StatusText::warning("Missing the input map!"));
        }
    }

    commands.insert_resource(RegistryHandles {
        items: loading.items.clone(),
        agent: loading.agent.clone(),
        input: loading.input.clone(),
        levels: loading.levels.clone(),
    });
    commands.remove_resource::<LoadingAssets>();
    next_state.set(AppState::InGame);
    info!(
        "Loaded {} items and {} levels, entering InGame state",
        items.items.len(),
        levels.levels.len()
    );
}
