use bevy::prelude::*;

use super::components::{DropOutcome, Inventory, InventoryError};
use crate::agent::Collector;
use crate::agent::input::{AgentAction, AgentCommand};
use crate::item::{ItemId, ItemRegistry, Pickup, PickupSpawner};
use crate::registry::agent::AgentConfig;
use crate::session::SessionState;
use crate::ui::StatusText;

/// Moves one unit of `pickup` into `inventory` and removes it from the world.
///
/// The add is committed before the despawn is queued. A despawn that finds the
/// entity already gone does not undo it.
pub fn add_pickup(
    commands: &mut Commands,
    inventory: &mut Inventory,
    entity: Entity,
    pickup: &mut Pickup,
) -> Result<u32, InventoryError> {
    pickup.collected = true;
    let total = inventory.add_item(pickup.kind, 1)?;
    commands.entity(entity).try_despawn();
    Ok(total)
}

/// World position `distance` units in front of an agent at `transform`.
pub fn drop_location(transform: &Transform, distance: f32) -> Vec3 {
    transform.translation + transform.forward() * distance
}

/// Spawns the pickups a drop asks for and settles the session coin tally.
pub fn spawn_dropped(
    commands: &mut Commands,
    spawner: &PickupSpawner,
    session: &mut SessionState,
    outcome: DropOutcome,
    location: Vec3,
) -> usize {
    let factory = spawner.factory();
    let is_coin = factory
        .registry
        .get(outcome.kind)
        .is_some_and(|def| def.class.coin_value().is_some());

    let mut spawned = 0;
    for _ in 0..outcome.spawn_count {
        if factory.spawn(commands, outcome.kind, location).is_none() {
            break;
        }
        spawned += 1;
        if is_coin {
            session.total_coins = session.total_coins.saturating_sub(1);
        }
    }
    spawned
}

fn selection_status(registry: &ItemRegistry, inventory: &Inventory) -> StatusText {
    let selected = inventory
        .current_slot()
        .filter(|slot| slot.amount > 0)
        .and_then(|slot| registry.get(slot.kind));
    match selected {
        Some(def) => StatusText::info(format!("Selected item: {} - {}", def.name, def.description)),
        None => StatusText::warning("Inventory slot empty"),
    }
}

/// Applies drop and scroll commands to collecting agents.
pub fn handle_inventory_commands(
    mut commands: Commands,
    config: Res<AgentConfig>,
    spawner: PickupSpawner,
    mut session: ResMut<SessionState>,
    mut agent_commands: MessageReader<AgentCommand>,
    mut collectors: Query<(&Transform, &mut Inventory), With<Collector>>,
    mut status: MessageWriter<StatusText>,
) {
    for command in agent_commands.read() {
        let Ok((transform, mut inventory)) = collectors.get_mut(command.agent) else {
            continue;
        };

        match command.action {
            AgentAction::Drop(_) => {
                let index = inventory.current_index();
                let outcome = match inventory.drop_item_at(index, 1) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        debug!("Nothing to drop for {}: {err}", command.agent);
                        status.write(StatusText::warning("Inventory slot empty"));
                        continue;
                    }
                };
                let location = drop_location(transform, config.drop_distance);
                let spawned =
                    spawn_dropped(&mut commands, &spawner, &mut session, outcome, location);
                for _ in 0..spawned {
                    status.write(StatusText::info("Item dropped"));
                }
            }
            AgentAction::ScrollInventory(_) => {
                inventory.scroll();
                status.write(selection_status(&spawner.registry, &inventory));
            }
            _ => {}
        }
    }
}

/// Drops `amount` units of `kind` from the inventory at `location` (one-shot entry point).
#[allow(dead_code)] // used in tests
pub fn drop_item(
    In((agent, kind, amount, location)): In<(Entity, ItemId, u32, Vec3)>,
    mut commands: Commands,
    spawner: PickupSpawner,
    mut session: ResMut<SessionState>,
    mut collectors: Query<&mut Inventory, With<Collector>>,
) -> Result<usize, InventoryError> {
    let Ok(mut inventory) = collectors.get_mut(agent) else {
        return Ok(0);
    };
    let outcome = inventory.drop_item(kind, amount)?;
    Ok(spawn_dropped(&mut commands, &spawner, &mut session, outcome, location))
}
