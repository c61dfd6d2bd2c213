use serde::Deserialize;

/// How a pickup of a given class reaches the collecting agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Offered to the agent's scanner, collected on an explicit interact.
    Interact,
    /// Collected on the first frame of physical contact.
    Contact,
}

/// Spawn class of an item: selects which pickup prefab the factory builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum PickupClass {
    #[default]
    Item,
    Coin {
        value: u32,
    },
    DragonBall,
    /// Vanishes on contact without reaching the inventory.
    Token,
}

impl PickupClass {
    pub fn collection(&self) -> Collection {
        match self {
            PickupClass::Item | PickupClass::Coin { .. } => Collection::Interact,
            PickupClass::DragonBall | PickupClass::Token => Collection::Contact,
        }
    }

    /// Whether collecting a pickup of this class inserts it into the inventory.
    pub fn is_stored(&self) -> bool {
        !matches!(self, PickupClass::Token)
    }

    pub fn coin_value(&self) -> Option<u32> {
        match self {
            PickupClass::Coin { value } => Some(*value),
            _ => None,
        }
    }
}

/// Catalog entry for an item kind. Read-only once the catalog is loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub class: PickupClass,
    #[serde(default)]
    pub sound: Option<String>,
}
