pub mod definition;
pub mod pickup;
pub mod plugin;
pub mod registry;

pub use definition::*;
pub use pickup::{Pickup, PickupFactory, PickupListeners, PickupSpawner};
pub use plugin::ItemPlugin;
pub use registry::*;
