use bevy::prelude::*;

use super::target::{Interactable, InteractionPayload};
use crate::agent::LookAngles;
use crate::agent::input::{AgentAction, AgentCommand};
use crate::math::{Collider, interaction_ray, nearest_hit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Idle,
    Locked(Entity),
}

/// Proximity targeting for a collecting agent.
///
/// Only remembers the target's entity handle. A despawned target reads as absent
/// on the next scan or interact.
#[derive(Component, Debug, Clone)]
pub struct Scanner {
    pub distance: f32,
    pub layers: u32,
    pub eye_height: f32,
    state: ScanState,
}

impl Scanner {
    pub fn new(distance: f32, layers: u32, eye_height: f32) -> Self {
        Self {
            distance,
            layers,
            eye_height,
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn current_target(&self) -> Option<Entity> {
        match self.state {
            ScanState::Idle => None,
            ScanState::Locked(target) => Some(target),
        }
    }

    /// Applies this tick's scan result. `hit` is the nearest object along the ray,
    /// already filtered down to ones exposing an `Interactable`.
    ///
    /// Returns true when the state changed.
    pub fn observe(&mut self, hit: Option<Entity>) -> bool {
        let next = match hit {
            Some(target) => ScanState::Locked(target),
            None => ScanState::Idle,
        };
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    pub fn release(&mut self) {
        self.state = ScanState::Idle;
    }
}

/// Eye-level origin and facing of a scanner owned by an agent at `transform`.
pub fn scan_origin(transform: &Transform, scanner: &Scanner, look: Option<&LookAngles>) -> (Vec3, Dir3) {
    let pitch = look.map_or(0.0, |l| l.pitch);
    let origin = transform.translation + Vec3::Y * scanner.eye_height;
    let facing = transform.rotation * Quat::from_rotation_x(pitch) * Vec3::NEG_Z;
    (origin, Dir3::new(facing).unwrap_or(Dir3::NEG_Z))
}

/// Casts every scanner's ray and updates its lock.
pub fn scan_for_targets(
    mut scanners: Query<(Entity, &Transform, Option<&LookAngles>, &mut Scanner)>,
    colliders: Query<(Entity, &Transform, &Collider, Has<Interactable>)>,
) {
    for (owner, transform, look, mut scanner) in &mut scanners {
        let (origin, direction) = scan_origin(transform, &scanner, look);
        let ray = interaction_ray(origin, direction, scanner.distance);

        let hit = nearest_hit(
            &ray,
            scanner.layers,
            colliders
                .iter()
                .filter(|(entity, ..)| *entity != owner)
                .map(|(entity, tf, collider, _)| (entity, tf.translation, collider)),
        )
        .map(|(entity, _)| entity)
        .filter(|entity| colliders.get(*entity).is_ok_and(|(.., interactable)| interactable));

        if scanner.observe(hit) {
            match scanner.state() {
                ScanState::Locked(target) => debug!("Scanner on {owner} locked onto {target}"),
                ScanState::Idle => debug!("Scanner on {owner} idle"),
            }
        }
    }
}

/// Triggers the locked target of every agent that issued an interact command.
pub fn interact_with_target(
    mut commands: Commands,
    mut agent_commands: MessageReader<AgentCommand>,
    mut scanners: Query<&mut Scanner>,
    targets: Query<&Interactable>,
) {
    for command in agent_commands.read() {
        if command.action != AgentAction::Interact {
            continue;
        }
        let Ok(mut scanner) = scanners.get_mut(command.agent) else {
            continue;
        };
        let Some(target) = scanner.current_target() else {
            continue;
        };
        let Ok(interactable) = targets.get(target) else {
            // Target left the world since the last scan.
            scanner.release();
            continue;
        };

        debug!("{} interacts with {}", command.agent, interactable.display_name);
        interactable.broadcast(
            &mut commands,
            InteractionPayload {
                interactor: command.agent,
                target,
            },
        );
    }
}
