use bevy::prelude::*;

use crate::agent::{Agent, LookAngles};

/// Boom holding the camera behind and above its target.
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowArm {
    pub length: f32,
    pub height: f32,
}

impl Default for FollowArm {
    fn default() -> Self {
        Self {
            length: 5.0,
            height: 1.8,
        }
    }
}

/// Camera transform for a target at `target` seen through `look` (pure function for testing).
pub fn arm_transform(target: Vec3, look: LookAngles, arm: &FollowArm) -> Transform {
    let rotation = Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);
    let pivot = target + Vec3::Y * arm.height;
    let eye = pivot + rotation * Vec3::Z * arm.length;
    Transform::from_translation(eye).looking_at(pivot, Vec3::Y)
}

#[allow(clippy::type_complexity)]
pub fn camera_follow_agent(
    agent_query: Query<(&Transform, &LookAngles), (With<Agent>, Without<Camera3d>)>,
    mut camera_query: Query<(&mut Transform, &FollowArm), (With<Camera3d>, Without<Agent>)>,
) {
    let Ok((agent_transform, look)) = agent_query.single() else {
        return;
    };
    let Ok((mut camera_transform, arm)) = camera_query.single_mut() else {
        return;
    };

    *camera_transform = arm_transform(agent_transform.translation, *look, arm);
}
