pub mod input;
pub mod movement;

use bevy::prelude::*;

use crate::interaction::contact::Body;
use crate::interaction::scanner::Scanner;
use crate::inventory::Inventory;
use crate::registry::AppState;
use crate::registry::agent::AgentConfig;
use crate::sets::GameSet;

pub const MAX_DELTA_SECS: f32 = 1.0 / 20.0;

/// Player-controlled collecting agent.
#[derive(Component)]
pub struct Agent;

/// Capability: this entity can receive pickups into its inventory.
#[derive(Component, Debug, Default)]
#[require(Inventory)]
pub struct Collector;

#[derive(Component, Default, Debug)]
pub struct Velocity(pub Vec3);

#[derive(Component, Default)]
pub struct Grounded(pub bool);

#[derive(Component, Default, Debug, Clone, Copy)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Component, Default)]
pub struct Sprinting(pub bool);

pub struct AgentPlugin;

impl Plugin for AgentPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<input::AgentCommand>()
            .add_systems(OnEnter(AppState::InGame), spawn_agent)
            .add_systems(
                Update,
                (
                    (
                        apply_agent_tuning.run_if(resource_exists_and_changed::<AgentConfig>),
                        input::read_input,
                    )
                        .chain()
                        .in_set(GameSet::Input),
                    (movement::apply_movement_commands, movement::integrate_motion)
                        .chain()
                        .in_set(GameSet::Movement),
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/// Components that make up a collecting agent standing at `at`.
pub fn agent_bundle(config: &AgentConfig, at: Vec3) -> impl Bundle {
    (
        Agent,
        Collector,
        Scanner::new(
            config.interaction_distance,
            config.interaction_layers,
            config.eye_height,
        ),
        Body {
            radius: config.body_radius,
        },
        Velocity::default(),
        Grounded(false),
        LookAngles::default(),
        Sprinting(false),
        Transform::from_translation(at),
    )
}

/// Pushes reloaded reach and body tunables into agents that already exist.
pub fn apply_agent_tuning(
    config: Res<AgentConfig>,
    mut agents: Query<(&mut Scanner, &mut Body), With<Agent>>,
) {
    for (mut scanner, mut body) in &mut agents {
        scanner.distance = config.interaction_distance;
        scanner.layers = config.interaction_layers;
        scanner.eye_height = config.eye_height;
        body.radius = config.body_radius;
    }
}

fn spawn_agent(
    mut commands: Commands,
    config: Res<AgentConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let height = config.eye_height.max(config.body_radius * 2.0);
    commands
        .spawn((
            agent_bundle(&config, Vec3::ZERO),
            Visibility::default(),
            Name::new("Agent"),
        ))
        .with_child((
            Mesh3d(meshes.add(Capsule3d::new(config.body_radius, height - config.body_radius * 2.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.85, 0.3, 0.25))),
            // Agent origin sits at the feet.
            Transform::from_xyz(0.0, height / 2.0, 0.0),
        ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Interactable;
    use crate::interaction::scanner::{ScanState, scan_for_targets};
    use crate::math::Collider;
    use crate::test_helpers::fixtures;

    fn tuning_app() -> App {
        let mut app = fixtures::test_app();
        app.add_systems(
            Update,
            (
                apply_agent_tuning
                    .run_if(resource_exists_and_changed::<AgentConfig>)
                    .in_set(GameSet::Input),
                scan_for_targets.in_set(GameSet::Scan),
            ),
        );
        app
    }

    #[test]
    fn reloaded_reach_reaches_existing_scanner() {
        let mut app = tuning_app();
        let agent = fixtures::spawn_test_agent(&mut app, Vec3::ZERO);
        let target = app
            .world_mut()
            .spawn((
                Interactable::new("Far lever"),
                Collider::sphere(0.5),
                Transform::from_xyz(0.0, 0.0, -12.0),
            ))
            .id();

        app.update();
        assert_eq!(app.world().get::<Scanner>(agent).unwrap().state(), ScanState::Idle);

        app.world_mut().resource_mut::<AgentConfig>().interaction_distance = 15.0;
        app.update();

        let scanner = app.world().get::<Scanner>(agent).unwrap();
        assert_eq!(scanner.distance, 15.0);
        assert_eq!(scanner.state(), ScanState::Locked(target));
    }

    #[test]
    fn reloaded_body_radius_reaches_existing_agent() {
        let mut app = tuning_app();
        let agent = fixtures::spawn_test_agent(&mut app, Vec3::ZERO);
        app.update();

        app.world_mut().resource_mut::<AgentConfig>().body_radius = 0.9;
        app.update();

        assert_eq!(app.world().get::<Body>(agent).unwrap().radius, 0.9);
    }
}
