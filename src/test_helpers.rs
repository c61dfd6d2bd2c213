pub mod fixtures {
    use bevy::prelude::*;

    use crate::agent::agent_bundle;
    use crate::agent::input::{AgentAction, AgentCommand};
    use crate::interaction::contact::BeginOverlap;
    use crate::item::pickup::init_pickup_listeners;
    use crate::item::{ItemDef, ItemId, ItemRegistry, PickupClass};
    use crate::level::LoadLevel;
    use crate::math::INTERACTION_LAYER;
    use crate::registry::agent::AgentConfig;
    use crate::registry::level::{LevelDef, LevelRegistry, PlacedPickup, TeleportDef};
    use crate::session::{LevelLoaded, SessionState};
    use crate::sets::GameSet;
    use crate::ui::{StatusFeed, StatusText};

    pub const COIN: ItemId = ItemId(0);
    pub const POTION: ItemId = ItemId(1);
    pub const DRAGON_BALL: ItemId = ItemId(2);
    pub const TOKEN: ItemId = ItemId(3);

    pub const COIN_VALUE: u32 = 5;

    pub fn test_item_registry() -> ItemRegistry {
        ItemRegistry::from_defs(vec![
            ItemDef {
                id: "coin".into(),
                name: "Coin".into(),
                description: "Shiny and round".into(),
                class: PickupClass::Coin { value: COIN_VALUE },
                sound: None,
            },
            ItemDef {
                id: "potion".into(),
                name: "Potion".into(),
                description: "Restores a little health".into(),
                class: PickupClass::Item,
                sound: None,
            },
            ItemDef {
                id: "dragon_ball".into(),
                name: "Dragon Ball".into(),
                description: "One of seven".into(),
                class: PickupClass::DragonBall,
                sound: None,
            },
            ItemDef {
                id: "token".into(),
                name: "Token".into(),
                description: "Gone on touch".into(),
                class: PickupClass::Token,
                sound: None,
            },
        ])
    }

    /// Eye at ground level, so scans run along y = 0 straight down -Z.
    pub fn test_agent_config() -> AgentConfig {
        AgentConfig {
            speed: 5.0,
            sprint_multiplier: 2.0,
            jump_velocity: 5.0,
            gravity: 9.8,
            look_sensitivity: 0.003,
            interaction_distance: 10.0,
            interaction_layers: INTERACTION_LAYER,
            eye_height: 0.0,
            body_radius: 0.4,
            drop_distance: 1.5,
            start_level: "level_01".into(),
        }
    }

    pub fn test_level_registry() -> LevelRegistry {
        LevelRegistry::from_defs(vec![
            LevelDef {
                id: "level_01".into(),
                spawn: [0.0, 0.0, 4.0],
                pickups: vec![
                    PlacedPickup {
                        item: "coin".into(),
                        position: [2.0, 0.5, -3.0],
                    },
                    PlacedPickup {
                        item: "potion".into(),
                        position: [-2.0, 0.5, -3.0],
                    },
                    PlacedPickup {
                        item: "no_such_item".into(),
                        position: [0.0, 0.5, -6.0],
                    },
                ],
                walls: vec![],
                teleports: vec![TeleportDef {
                    position: [0.0, 1.0, -20.0],
                    half_extents: [1.0, 1.0, 1.0],
                    destination: [0.0, 0.0, 0.0],
                    next_level: Some("level_02".into()),
                    finishes_run: false,
                    sound: None,
                }],
            },
            LevelDef {
                id: "level_02".into(),
                spawn: [0.0, 0.0, 0.0],
                pickups: vec![PlacedPickup {
                    item: "dragon_ball".into(),
                    position: [5.0, 0.5, 5.0],
                }],
                walls: vec![],
                teleports: vec![],
            },
        ])
    }

    /// Headless app with the shared resources, messages and set ordering.
    /// Tests add the systems under test themselves.
    pub fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.configure_sets(
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
        );
        app.add_message::<AgentCommand>()
            .add_message::<BeginOverlap>()
            .add_message::<StatusText>()
            .add_message::<LevelLoaded>()
            .add_message::<LoadLevel>();
        app.insert_resource(test_item_registry());
        app.insert_resource(test_agent_config());
        app.init_resource::<SessionState>();
        app.init_resource::<StatusFeed>();
        init_pickup_listeners(app.world_mut());
        app
    }

    pub fn spawn_test_agent(app: &mut App, at: Vec3) -> Entity {
        let config = test_agent_config();
        app.world_mut().spawn(agent_bundle(&config, at)).id()
    }

    pub fn command(app: &mut App, agent: Entity, action: AgentAction) {
        app.world_mut().write_message(AgentCommand { agent, action });
    }
}
