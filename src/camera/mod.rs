pub mod follow;

use bevy::prelude::*;

use crate::registry::AppState;
use crate::sets::GameSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            follow::camera_follow_agent
                .in_set(GameSet::Presentation)
                .run_if(in_state(AppState::InGame)),
        );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        follow::FollowArm::default(),
        Transform::from_xyz(0.0, 3.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
