pub mod teleport;

use bevy::prelude::*;

use crate::agent::{Agent, Velocity};
use crate::interaction::contact::Sensor;
use crate::item::{Pickup, PickupSpawner};
use crate::math::{Collider, WORLD_LAYER};
use crate::registry::AppState;
use crate::registry::agent::AgentConfig;
use crate::registry::level::{LevelDef, LevelRegistry};
use crate::session::{LevelLoaded, on_level_loaded};
use crate::sets::GameSet;
use crate::ui::StatusText;
use teleport::Teleport;

/// Request to replace the current level with the named one.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct LoadLevel(pub String);

/// Owned by the current level; despawned when another level loads.
#[derive(Component, Debug, Default)]
pub struct LevelEntity;

/// Render handles for level geometry. Absent in headless runs.
#[derive(Resource, Debug)]
pub struct LevelAssets {
    pub cube: Handle<Mesh>,
    pub wall: Handle<StandardMaterial>,
    pub teleport: Handle<StandardMaterial>,
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LoadLevel>()
            .add_systems(
                OnEnter(AppState::InGame),
                (setup_scene, request_start_level),
            )
            .add_systems(
                Update,
                (
                    teleport::handle_teleports
                        .after(crate::interaction::contact::detect_contacts)
                        .in_set(GameSet::Contact),
                    load_level
                        .before(on_level_loaded)
                        .in_set(GameSet::Session),
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.45, 0.3))),
        Name::new("Ground"),
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(LevelAssets {
        cube: meshes.add(Cuboid::from_size(Vec3::splat(2.0))),
        wall: materials.add(Color::srgb(0.55, 0.5, 0.45)),
        teleport: materials.add(StandardMaterial {
            base_color: Color::srgba(0.4, 0.2, 0.9, 0.5),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }),
    });
}

fn request_start_level(config: Res<AgentConfig>, mut requests: MessageWriter<LoadLevel>) {
    requests.write(LoadLevel(config.start_level.clone()));
}

/// Spawns every static part of `def`. Pickups go through the factory.
fn spawn_layout(
    commands: &mut Commands,
    def: &LevelDef,
    spawner: &PickupSpawner,
    assets: Option<&LevelAssets>,
    asset_server: Option<&AssetServer>,
) {
    let factory = spawner.factory();
    for placed in &def.pickups {
        let Some(kind) = factory.registry.by_name(&placed.item) else {
            warn!("Level {} places unknown item '{}'", def.id, placed.item);
            continue;
        };
        factory.spawn(commands, kind, Vec3::from_array(placed.position));
    }

    for wall in &def.walls {
        let half_extents = Vec3::from_array(wall.half_extents);
        let mut entity = commands.spawn((
            LevelEntity,
            Collider::cuboid(half_extents).with_layers(WORLD_LAYER),
            Transform::from_translation(Vec3::from_array(wall.center)),
            Visibility::default(),
        ));
        if let Some(assets) = assets {
            // Collider reads translation only, scale just sizes the unit cube mesh.
            entity.insert((
                Mesh3d(assets.cube.clone()),
                MeshMaterial3d(assets.wall.clone()),
                Transform::from_translation(Vec3::from_array(wall.center))
                    .with_scale(half_extents),
            ));
        }
    }

    for teleport in &def.teleports {
        let half_extents = Vec3::from_array(teleport.half_extents);
        let sound = teleport
            .sound
            .as_ref()
            .zip(asset_server)
            .map(|(path, server)| server.load(path.clone()));
        let mut entity = commands.spawn((
            LevelEntity,
            Teleport {
                destination: Vec3::from_array(teleport.destination),
                next_level: teleport.next_level.clone(),
                finishes_run: teleport.finishes_run,
                sound,
            },
            Sensor,
            Collider::cuboid(half_extents).with_layers(0),
            Transform::from_translation(Vec3::from_array(teleport.position)),
            Visibility::default(),
        ));
        if let Some(assets) = assets {
            entity.insert((
                Mesh3d(assets.cube.clone()),
                MeshMaterial3d(assets.teleport.clone()),
                Transform::from_translation(Vec3::from_array(teleport.position))
                    .with_scale(half_extents),
            ));
        }
    }
}

/// Replaces the current layout with the last requested level of this frame.
#[allow(clippy::too_many_arguments)]
pub fn load_level(
    mut commands: Commands,
    mut requests: MessageReader<LoadLevel>,
    levels: Res<LevelRegistry>,
    spawner: PickupSpawner,
    assets: Option<Res<LevelAssets>>,
    asset_server: Option<Res<AssetServer>>,
    stale: Query<Entity, Or<(With<LevelEntity>, With<Pickup>)>>,
    mut agents: Query<(&mut Transform, &mut Velocity), With<Agent>>,
    mut loaded: MessageWriter<LevelLoaded>,
    mut status: MessageWriter<StatusText>,
) {
    let Some(LoadLevel(id)) = requests.read().last() else {
        return;
    };
    let Some(def) = levels.get(id) else {
        status.write(StatusText::warning(format!("Unknown level '{id}'")));
        return;
    };

    for entity in &stale {
        commands.entity(entity).try_despawn();
    }
    spawn_layout(
        &mut commands,
        def,
        &spawner,
        assets.as_deref(),
        asset_server.as_deref(),
    );

    let spawn = Vec3::from_array(def.spawn);
    for (mut transform, mut velocity) in &mut agents {
        transform.translation = spawn;
        velocity.0 = Vec3::ZERO;
    }

    info!(
        "Loaded level {id}: {} pickups, {} teleports",
        def.pickups.len(),
        def.teleports.len()
    );
    loaded.write(LevelLoaded(id.clone()));
}
