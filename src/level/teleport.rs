use bevy::prelude::*;

use super::LoadLevel;
use crate::agent::{Agent, Velocity};
use crate::interaction::contact::BeginOverlap;
use crate::session::SessionState;
use crate::ui::StatusText;

/// Box sensor that moves an agent to `destination` on contact.
#[derive(Component, Debug, Clone)]
pub struct Teleport {
    pub destination: Vec3,
    pub next_level: Option<String>,
    pub finishes_run: bool,
    pub sound: Option<Handle<AudioSource>>,
}

pub fn handle_teleports(
    mut commands: Commands,
    mut overlaps: MessageReader<BeginOverlap>,
    teleports: Query<&Teleport>,
    mut agents: Query<(&mut Transform, &mut Velocity), With<Agent>>,
    mut session: ResMut<SessionState>,
    mut requests: MessageWriter<LoadLevel>,
    mut status: MessageWriter<StatusText>,
) {
    for overlap in overlaps.read() {
        let Ok(teleport) = teleports.get(overlap.sensor) else {
            continue;
        };
        let Ok((mut transform, mut velocity)) = agents.get_mut(overlap.other) else {
            continue;
        };

        transform.translation = teleport.destination;
        velocity.0 = Vec3::ZERO;
        if let Some(sound) = &teleport.sound {
            commands.spawn((AudioPlayer::new(sound.clone()), PlaybackSettings::DESPAWN));
        }

        if teleport.finishes_run && !session.game_over {
            session.game_over = true;
            status.write(StatusText::info(format!(
                "Game over! Final score: {}",
                session.score()
            )));
        }
        if let Some(level) = &teleport.next_level {
            debug!("Teleport {} requests level {level}", overlap.sensor);
            requests.write(LoadLevel(level.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::contact::{Sensor, detect_contacts};
    use crate::math::Collider;
    use crate::sets::GameSet;
    use crate::test_helpers::fixtures;

    #[derive(Resource, Default)]
    struct Requested(Vec<LoadLevel>);

    fn record(mut reader: MessageReader<LoadLevel>, mut requested: ResMut<Requested>) {
        requested.0.extend(reader.read().cloned());
    }

    fn teleport_app() -> App {
        let mut app = fixtures::test_app();
        app.init_resource::<Requested>();
        app.add_systems(
            Update,
            (
                (detect_contacts, handle_teleports)
                    .chain()
                    .in_set(GameSet::Contact),
                record.in_set(GameSet::Session),
            ),
        );
        app
    }

    fn spawn_teleport(app: &mut App, teleport: Teleport) -> Entity {
        app.world_mut()
            .spawn((
                teleport,
                Sensor,
                Collider::cuboid(Vec3::splat(1.0)).with_layers(0),
                Transform::from_xyz(0.0, 0.0, -5.0),
            ))
            .id()
    }

    #[test]
    fn teleport_moves_agent_and_stops_it() {
        let mut app = teleport_app();
        let agent = fixtures::spawn_test_agent(&mut app, Vec3::new(0.0, 0.0, -5.0));
        app.world_mut().get_mut::<Velocity>(agent).unwrap().0 = Vec3::new(1.0, -3.0, 0.0);
        spawn_teleport(
            &mut app,
            Teleport {
                destination: Vec3::new(20.0, 0.0, 20.0),
                next_level: None,
                finishes_run: false,
                sound: None,
            },
        );

        app.update();

        assert_eq!(
            app.world().get::<Transform>(agent).unwrap().translation,
            Vec3::new(20.0, 0.0, 20.0)
        );
        assert_eq!(app.world().get::<Velocity>(agent).unwrap().0, Vec3::ZERO);
        assert!(app.world().resource::<Requested>().0.is_empty());
    }

    #[test]
    fn teleport_with_next_level_requests_load() {
        let mut app = teleport_app();
        fixtures::spawn_test_agent(&mut app, Vec3::new(0.0, 0.0, -5.0));
        spawn_teleport(
            &mut app,
            Teleport {
                destination: Vec3::ZERO,
                next_level: Some("level_02".into()),
                finishes_run: false,
                sound: None,
            },
        );

        app.update();

        assert_eq!(
            app.world().resource::<Requested>().0,
            [LoadLevel("level_02".into())]
        );
    }

    #[test]
    fn final_teleport_ends_the_run() {
        let mut app = teleport_app();
        fixtures::spawn_test_agent(&mut app, Vec3::new(0.0, 0.0, -5.0));
        spawn_teleport(
            &mut app,
            Teleport {
                destination: Vec3::ZERO,
                next_level: None,
                finishes_run: true,
                sound: None,
            },
        );

        app.update();

        assert!(app.world().resource::<SessionState>().game_over);
    }

    #[test]
    fn non_agent_bodies_are_not_teleported() {
        let mut app = teleport_app();
        spawn_teleport(
            &mut app,
            Teleport {
                destination: Vec3::new(20.0, 0.0, 20.0),
                next_level: None,
                finishes_run: false,
                sound: None,
            },
        );
        let crate_body = app
            .world_mut()
            .spawn((
                crate::interaction::contact::Body { radius: 0.5 },
                Transform::from_xyz(0.0, 0.0, -5.0),
            ))
            .id();

        app.update();

        assert_eq!(
            app.world().get::<Transform>(crate_body).unwrap().translation,
            Vec3::new(0.0, 0.0, -5.0)
        );
    }
}
