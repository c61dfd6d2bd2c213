pub mod agent;
pub mod assets;
pub mod hot_reload;
pub mod level;
pub mod loader;
pub mod loading;

use bevy::prelude::*;

use agent::AgentConfig;
use assets::{ItemCatalogAsset, LevelRegistryAsset};
use loader::DataLoader;

use crate::agent::input::InputMap;

/// Application state: Loading waits for assets, InGame runs gameplay.
#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    InGame,
}

/// Keeps loaded data handles alive for hot-reload detection.
#[derive(Resource)]
pub(crate) struct RegistryHandles {
    pub(crate) items: Handle<ItemCatalogAsset>,
    pub(crate) agent: Handle<AgentConfig>,
    pub(crate) input: Handle<InputMap>,
    pub(crate) levels: Handle<LevelRegistryAsset>,
}

pub struct RegistryPlugin;

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_asset::<ItemCatalogAsset>()
            .init_asset::<AgentConfig>()
            .init_asset::<InputMap>()
            .init_asset::<LevelRegistryAsset>()
            .register_asset_loader(DataLoader::<ItemCatalogAsset>::new(&["catalog.ron"]))
            .register_asset_loader(DataLoader::<AgentConfig>::new(&["def.ron"]))
            .register_asset_loader(DataLoader::<InputMap>::new(&["map.ron"]))
            .register_asset_loader(DataLoader::<LevelRegistryAsset>::new(&["registry.ron"]))
            .add_systems(Startup, loading::start_loading)
            .add_systems(
                Update,
                loading::check_loading.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                (
                    hot_reload::hot_reload_items,
                    hot_reload::hot_reload_agent,
                    hot_reload::hot_reload_input,
                    hot_reload::hot_reload_levels,
                )
                    .run_if(resource_exists::<RegistryHandles>),
            );
    }
}
