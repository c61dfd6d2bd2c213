use std::collections::HashMap;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::definition::{Collection, PickupClass};
use super::registry::{ItemId, ItemRegistry};
use crate::agent::Collector;
use crate::interaction::contact::{BeginOverlap, Sensor};
use crate::interaction::{Interactable, InteractionListener, InteractionPayload};
use crate::inventory::{Inventory, add_pickup};
use crate::math::{Collider, INTERACTION_LAYER};
use crate::session::SessionState;
use crate::ui::StatusText;

pub const PICKUP_RADIUS: f32 = 0.5;

/// World object holding one unit of an item kind.
#[derive(Component, Debug)]
pub struct Pickup {
    pub kind: ItemId,
    /// Set before the first collection side effect. A collected pickup ignores
    /// every later interact or overlap until its despawn is applied.
    pub collected: bool,
}

impl Pickup {
    pub fn new(kind: ItemId) -> Self {
        Self {
            kind,
            collected: false,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct PickupSound(pub Handle<AudioSource>);

/// Floating animation between `origin` and `origin + delta`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bob {
    pub origin: Vec3,
    pub delta: Vec3,
    pub speed: f32,
}

/// Interpolation factor of a bob at `elapsed` seconds, in `[0, 1]`.
pub fn bob_factor(elapsed: f32, speed: f32) -> f32 {
    0.5 - 0.5 * (elapsed * speed).cos()
}

/// Interaction listeners shared by every scanner-collected pickup.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PickupListeners {
    pub collect: InteractionListener,
}

pub fn init_pickup_listeners(world: &mut World) {
    let collect = world.register_system(collect_on_interact);
    world.insert_resource(PickupListeners { collect });
}

/// Render and audio handles for pickups. Absent in headless runs.
#[derive(Resource, Debug, Default)]
pub struct PickupAssets {
    pub mesh: Handle<Mesh>,
    pub materials: HashMap<ItemId, Handle<StandardMaterial>>,
    pub sounds: HashMap<ItemId, Handle<AudioSource>>,
}

fn class_color(class: PickupClass) -> Color {
    match class {
        PickupClass::Item => Color::srgb(0.3, 0.5, 0.9),
        PickupClass::Coin { .. } => Color::srgb(1.0, 0.8, 0.1),
        PickupClass::DragonBall => Color::srgb(1.0, 0.45, 0.0),
        PickupClass::Token => Color::srgb(0.7, 0.7, 0.7),
    }
}

/// Rebuilt whenever the item catalog changes, so reloaded kinds get a look too.
pub fn prepare_pickup_assets(
    mut commands: Commands,
    registry: Res<ItemRegistry>,
    asset_server: Option<Res<AssetServer>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut assets = PickupAssets {
        mesh: meshes.add(Sphere::new(PICKUP_RADIUS * 0.6)),
        ..default()
    };
    for (id, def) in registry.iter() {
        assets.materials.insert(
            id,
            materials.add(StandardMaterial {
                base_color: class_color(def.class),
                metallic: 0.6,
                perceptual_roughness: 0.3,
                ..default()
            }),
        );
        if let (Some(path), Some(server)) = (&def.sound, asset_server.as_ref()) {
            assets.sounds.insert(id, server.load(path.clone()));
        }
    }
    commands.insert_resource(assets);
}

/// System param bundling what the pickup factory reads.
#[derive(SystemParam)]
pub struct PickupSpawner<'w> {
    pub registry: Res<'w, ItemRegistry>,
    pub listeners: Res<'w, PickupListeners>,
    pub assets: Option<Res<'w, PickupAssets>>,
}

impl PickupSpawner<'_> {
    pub fn factory(&self) -> PickupFactory<'_> {
        PickupFactory {
            registry: &self.registry,
            listeners: &self.listeners,
            assets: self.assets.as_deref(),
        }
    }
}

/// Builds pickup entities wired for their item's class.
pub struct PickupFactory<'a> {
    pub registry: &'a ItemRegistry,
    pub listeners: &'a PickupListeners,
    pub assets: Option<&'a PickupAssets>,
}

impl PickupFactory<'_> {
    /// Spawns one pickup of `kind` at `position`. Unknown kinds spawn nothing.
    pub fn spawn(&self, commands: &mut Commands, kind: ItemId, position: Vec3) -> Option<Entity> {
        let Some(def) = self.registry.get(kind) else {
            warn!("Cannot spawn pickup for unknown item {kind:?}");
            return None;
        };

        let mut entity = commands.spawn((
            Pickup::new(kind),
            Name::new(def.name.clone()),
            Transform::from_translation(position),
            Visibility::default(),
        ));

        match def.class.collection() {
            Collection::Interact => {
                entity.insert((
                    Collider::sphere(PICKUP_RADIUS).with_layers(INTERACTION_LAYER),
                    Interactable::new(def.name.clone()).with_listener(self.listeners.collect),
                ));
            }
            // Kept off every scan layer so contact pickups never block the scanner.
            Collection::Contact => {
                entity.insert((Collider::sphere(PICKUP_RADIUS).with_layers(0), Sensor));
            }
        }

        if matches!(def.class, PickupClass::Coin { .. }) {
            entity.insert(Bob {
                origin: position,
                delta: Vec3::new(0.0, 0.5, 0.0),
                speed: 1.0,
            });
        }

        if let Some(assets) = self.assets {
            if let Some(sound) = assets.sounds.get(&kind) {
                entity.insert(PickupSound(sound.clone()));
            }
            if let Some(material) = assets.materials.get(&kind) {
                entity.insert((Mesh3d(assets.mesh.clone()), MeshMaterial3d(material.clone())));
            }
        }

        Some(entity.id())
    }
}

fn play_sound(commands: &mut Commands, sound: Option<&PickupSound>) {
    if let Some(sound) = sound {
        commands.spawn((AudioPlayer::new(sound.0.clone()), PlaybackSettings::DESPAWN));
    }
}

/// Interaction listener of scanner-collected pickups.
pub fn collect_on_interact(
    In(payload): In<InteractionPayload>,
    mut commands: Commands,
    registry: Res<ItemRegistry>,
    mut session: ResMut<SessionState>,
    mut pickups: Query<(&mut Pickup, Option<&PickupSound>)>,
    mut collectors: Query<&mut Inventory, With<Collector>>,
    mut status: MessageWriter<StatusText>,
) {
    let Ok((mut pickup, sound)) = pickups.get_mut(payload.target) else {
        return;
    };
    if pickup.collected {
        return;
    }
    let Ok(mut inventory) = collectors.get_mut(payload.interactor) else {
        return;
    };

    play_sound(&mut commands, sound);
    let total = match add_pickup(&mut commands, &mut inventory, payload.target, &mut pickup) {
        Ok(total) => total,
        Err(err) => {
            warn!("Pickup {} not collected: {err}", payload.target);
            return;
        }
    };

    let Some(def) = registry.get(pickup.kind) else {
        return;
    };
    if let Some(value) = def.class.coin_value() {
        session.total_coin_value += value;
        session.total_coins += 1;
        status.write(StatusText::info(format!(
            "Total value: {}",
            session.total_coin_value
        )));
        status.write(StatusText::info(format!(
            "You have now {} coins in total",
            session.total_coins
        )));
        status.write(StatusText::info("New coin obtained!"));
    } else {
        status.write(StatusText::info(format!("{}: {total}", def.name)));
    }
}

/// Collects contact pickups on the first frame a collector touches them.
pub fn collect_on_contact(
    mut commands: Commands,
    registry: Res<ItemRegistry>,
    mut session: ResMut<SessionState>,
    mut overlaps: MessageReader<BeginOverlap>,
    mut pickups: Query<(&mut Pickup, Option<&PickupSound>), With<Sensor>>,
    mut collectors: Query<&mut Inventory, With<Collector>>,
    mut status: MessageWriter<StatusText>,
) {
    for overlap in overlaps.read() {
        let Ok((mut pickup, sound)) = pickups.get_mut(overlap.sensor) else {
            continue;
        };
        if pickup.collected {
            continue;
        }
        let Ok(mut inventory) = collectors.get_mut(overlap.other) else {
            continue;
        };
        let Some(class) = registry.get(pickup.kind).map(|def| def.class) else {
            continue;
        };

        play_sound(&mut commands, sound);
        if !class.is_stored() {
            pickup.collected = true;
            commands.entity(overlap.sensor).try_despawn();
            continue;
        }

        if let Err(err) = add_pickup(&mut commands, &mut inventory, overlap.sensor, &mut pickup) {
            warn!("Pickup {} not collected: {err}", overlap.sensor);
            continue;
        }
        if class == PickupClass::DragonBall {
            session.dragon_balls += 1;
            status.write(StatusText::info("Congratulations! You got a dragon ball!"));
        }
    }
}

pub fn animate_bob(time: Res<Time>, mut bobbing: Query<(&Bob, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (bob, mut transform) in &mut bobbing {
        let t = bob_factor(elapsed, bob.speed);
        transform.translation = bob.origin.lerp(bob.origin + bob.delta, t);
    }
}
