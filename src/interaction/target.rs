use bevy::ecs::system::SystemId;
use bevy::prelude::*;

/// Handed to every listener of an interaction target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionPayload {
    /// Agent that triggered the interaction.
    pub interactor: Entity,
    /// Entity carrying the `Interactable` that was triggered.
    pub target: Entity,
}

/// One-shot system registered as an interaction listener.
pub type InteractionListener = SystemId<In<InteractionPayload>>;

/// Makes an entity discoverable by the scanner and triggerable by an agent.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub display_name: String,
    listeners: Vec<InteractionListener>,
}

impl Interactable {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            listeners: Vec::new(),
        }
    }

    pub fn with_listener(mut self, listener: InteractionListener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Queues every listener with `payload`, in subscription order.
    ///
    /// Listeners run when the caller's commands are applied, still within the
    /// current frame.
    pub fn broadcast(&self, commands: &mut Commands, payload: InteractionPayload) {
        for listener in &self.listeners {
            commands.run_system_with(*listener, payload);
        }
    }
}
