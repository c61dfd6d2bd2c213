use bevy::prelude::*;

/// Top-level system ordering sets for the game loop.
///
/// Configured as a chain: Input → Movement → Scan → Act → Contact → Session → Presentation.
/// Scan runs before Act so an interact command always sees this frame's target.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Movement,
    Scan,
    Act,
    Contact,
    Session,
    Presentation,
}
