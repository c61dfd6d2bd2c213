use std::collections::HashMap;

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use super::Agent;

/// Discrete command delivered to a collecting agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentAction {
    Move(Vec2),
    Look(Vec2),
    Jump,
    Sprint(Vec2),
    Interact,
    Drop(Vec2),
    ScrollInventory(Vec2),
}

#[derive(Message, Debug, Clone, Copy)]
pub struct AgentCommand {
    pub agent: Entity,
    pub action: AgentAction,
}

/// Named input actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum InputAction {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Sprint,
    Interact,
    Drop,
    Scroll,
}

/// Key bindings per action, loaded from input.map.ron.
#[derive(Resource, Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct InputMap {
    pub actions: HashMap<InputAction, Vec<KeyCode>>,
}

impl InputMap {
    fn keys(&self, action: InputAction) -> &[KeyCode] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn pressed(&self, action: InputAction, keys: &ButtonInput<KeyCode>) -> bool {
        keys.any_pressed(self.keys(action).iter().copied())
    }

    pub fn just_pressed(&self, action: InputAction, keys: &ButtonInput<KeyCode>) -> bool {
        keys.any_just_pressed(self.keys(action).iter().copied())
    }
}

/// Translates this frame's raw input into agent actions (pure function for testing).
pub fn collect_actions(
    map: &InputMap,
    keys: &ButtonInput<KeyCode>,
    look: Vec2,
    scroll: f32,
) -> Vec<AgentAction> {
    let mut actions = Vec::new();

    let axis = |neg: InputAction, pos: InputAction| {
        map.pressed(pos, keys) as i8 as f32 - map.pressed(neg, keys) as i8 as f32
    };
    let movement = Vec2::new(
        axis(InputAction::Left, InputAction::Right),
        axis(InputAction::Back, InputAction::Forward),
    );
    if movement != Vec2::ZERO {
        actions.push(AgentAction::Move(movement.normalize()));
    }
    if look != Vec2::ZERO {
        actions.push(AgentAction::Look(look));
    }
    if map.just_pressed(InputAction::Jump, keys) {
        actions.push(AgentAction::Jump);
    }
    if map.just_pressed(InputAction::Sprint, keys) {
        actions.push(AgentAction::Sprint(Vec2::ONE));
    }
    if map.just_pressed(InputAction::Interact, keys) {
        actions.push(AgentAction::Interact);
    }
    if map.just_pressed(InputAction::Drop, keys) {
        actions.push(AgentAction::Drop(Vec2::ONE));
    }
    if map.just_pressed(InputAction::Scroll, keys) || scroll != 0.0 {
        actions.push(AgentAction::ScrollInventory(Vec2::new(0.0, scroll)));
    }

    actions
}

pub fn read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    input_map: Option<Res<InputMap>>,
    agents: Query<Entity, With<Agent>>,
    mut commands: MessageWriter<AgentCommand>,
) {
    let Some(input_map) = input_map else {
        return;
    };
    let Ok(agent) = agents.single() else {
        return;
    };

    for action in collect_actions(&input_map, &keys, mouse_motion.delta, mouse_scroll.delta.y) {
        commands.write(AgentCommand { agent, action });
    }
}
