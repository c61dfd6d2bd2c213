use bevy::prelude::*;

use super::input::{AgentAction, AgentCommand};
use super::{Agent, Grounded, LookAngles, MAX_DELTA_SECS, Sprinting, Velocity};
use crate::registry::agent::AgentConfig;

const PITCH_LIMIT: f32 = 1.4;

/// Horizontal velocity for a move input relative to the agent's yaw (pure function for testing).
pub fn move_velocity(yaw: f32, input: Vec2, speed: f32) -> Vec3 {
    let rotation = Quat::from_rotation_y(yaw);
    let forward = rotation * Vec3::NEG_Z;
    let right = rotation * Vec3::X;
    (right * input.x + forward * input.y) * speed
}

pub fn apply_movement_commands(
    config: Res<AgentConfig>,
    mut agent_commands: MessageReader<AgentCommand>,
    mut agents: Query<
        (
            &mut Transform,
            &mut Velocity,
            &Grounded,
            &mut LookAngles,
            &mut Sprinting,
        ),
        With<Agent>,
    >,
) {
    for (_, mut vel, ..) in &mut agents {
        vel.0.x = 0.0;
        vel.0.z = 0.0;
    }

    for command in agent_commands.read() {
        let Ok((mut transform, mut vel, grounded, mut look, mut sprinting)) =
            agents.get_mut(command.agent)
        else {
            continue;
        };

        match command.action {
            AgentAction::Move(input) => {
                let speed = if sprinting.0 {
                    config.speed * config.sprint_multiplier
                } else {
                    config.speed
                };
                let planar = move_velocity(look.yaw, input, speed);
                vel.0.x = planar.x;
                vel.0.z = planar.z;
            }
            AgentAction::Look(delta) => {
                look.yaw -= delta.x * config.look_sensitivity;
                look.pitch =
                    (look.pitch - delta.y * config.look_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
                transform.rotation = Quat::from_rotation_y(look.yaw);
            }
            AgentAction::Jump => {
                if grounded.0 {
                    vel.0.y = config.jump_velocity;
                }
            }
            AgentAction::Sprint(_) => {
                sprinting.0 = !sprinting.0;
            }
            AgentAction::Interact | AgentAction::Drop(_) | AgentAction::ScrollInventory(_) => {}
        }
    }
}

/// Applies gravity and velocity, resting agents on the ground plane at y = 0.
pub fn integrate_motion(
    time: Res<Time>,
    config: Res<AgentConfig>,
    mut query: Query<(&mut Transform, &mut Velocity, &mut Grounded), With<Agent>>,
) {
    let dt = time.delta_secs().min(MAX_DELTA_SECS);
    for (mut transform, mut vel, mut grounded) in &mut query {
        vel.0.y -= config.gravity * dt;
        transform.translation += vel.0 * dt;

        if transform.translation.y <= 0.0 {
            transform.translation.y = 0.0;
            vel.0.y = vel.0.y.max(0.0);
            grounded.0 = true;
        } else {
            grounded.0 = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::GameSet;
    use crate::test_helpers::fixtures;

    #[test]
    fn forward_input_moves_along_negative_z_at_zero_yaw() {
        let v = move_velocity(0.0, Vec2::new(0.0, 1.0), 5.0);
        assert!((v - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5, "got {v}");
    }

    #[test]
    fn yaw_rotates_move_direction() {
        let v = move_velocity(std::f32::consts::FRAC_PI_2, Vec2::new(0.0, 1.0), 1.0);
        assert!((v - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5, "got {v}");
    }

    fn movement_app() -> App {
        let mut app = fixtures::test_app();
        app.add_systems(
            Update,
            (apply_movement_commands, integrate_motion)
                .chain()
                .in_set(GameSet::Movement),
        );
        app
    }

    #[test]
    fn gravity_pulls_airborne_agent_down() {
        let mut app = movement_app();
        let agent = fixtures::spawn_test_agent(&mut app, Vec3::new(0.0, 10.0, 0.0));

        // First update initialises Time (dt=0); sleep then second update gives real dt.
        app.update();
        std::thread::sleep(std::time::Duration::from_millis(50));
        app.update();

        let vel = app.world().get::<Velocity>(agent).unwrap();
        assert!(vel.0.y < 0.0, "gravity should pull velocity downward, got {}", vel.0.y);
        assert!(!app.world().get::<Grounded>(agent).unwrap().0);
    }

    #[test]
    fn agent_on_ground_is_grounded_and_can_jump() {
        let mut app = movement_app();
        let agent = fixtures::spawn_test_agent(&mut app, Vec3::ZERO);

        app.update();
        assert!(app.world().get::<Grounded>(agent).unwrap().0);

        fixtures::command(&mut app, agent, AgentAction::Jump);
        app.update();

        let vel = app.world().get::<Velocity>(agent).unwrap();
        let config = fixtures::test_agent_config();
        // dt is capped, so at most one gravity step was subtracted.
        assert!(vel.0.y > config.jump_velocity - config.gravity * MAX_DELTA_SECS - 1e-4);
    }

    #[test]
    fn sprint_toggles() {
        let mut app = movement_app();
        let agent = fixtures::spawn_test_agent(&mut app, Vec3::ZERO);

        fixtures::command(&mut app, agent, AgentAction::Sprint(Vec2::ONE));
        app.update();
        assert!(app.world().get::<Sprinting>(agent).unwrap().0);

        fixtures::command(&mut app, agent, AgentAction::Sprint(Vec2::ONE));
        app.update();
        assert!(!app.world().get::<Sprinting>(agent).unwrap().0);
    }

    #[test]
    fn look_turns_agent_and_clamps_pitch() {
        let mut app = movement_app();
        let agent = fixtures::spawn_test_agent(&mut app, Vec3::ZERO);

        fixtures::command(&mut app, agent, AgentAction::Look(Vec2::new(100.0, -1.0e6)));
        app.update();

        let look = *app.world().get::<LookAngles>(agent).unwrap();
        assert!(look.yaw < 0.0);
        assert_eq!(look.pitch, PITCH_LIMIT);
        let rotation = app.world().get::<Transform>(agent).unwrap().rotation;
        assert!(rotation.angle_between(Quat::from_rotation_y(look.yaw)) < 1e-4);
    }
}
