// storefront/src/catalog.rs

//! The die-cast models the demo session shops for.

use diecast_cart::{MemoryCartStore, ProductSnapshot};
use uuid::Uuid;

pub const RED_LIGHTNING_SPEEDSTER: Uuid = Uuid::from_u128(0x0d1e_ca57_0000_0000_0000_0000_0000_0001);
pub const BLUE_FLAME_RACER: Uuid = Uuid::from_u128(0x0d1e_ca57_0000_0000_0000_0000_0000_0002);
pub const YELLOW_THUNDER_MUSCLE: Uuid = Uuid::from_u128(0x0d1e_ca57_0000_0000_0000_0000_0000_0003);
pub const GREEN_MONSTER_TRUCK: Uuid = Uuid::from_u128(0x0d1e_ca57_0000_0000_0000_0000_0000_0004);
pub const BLACK_LUXURY_SEDAN: Uuid = Uuid::from_u128(0x0d1e_ca57_0000_0000_0000_0000_0000_0005);

pub fn demo_catalogue() -> Vec<ProductSnapshot> {
  vec![
    ProductSnapshot::new(RED_LIGHTNING_SPEEDSTER, "Red Lightning Speedster", 17_900, 25).with_image("red-speedster.jpg"),
    ProductSnapshot::new(BLUE_FLAME_RACER, "Blue Flame Racer", 29_900, 18).with_image("blue-racer.jpg"),
    ProductSnapshot::new(YELLOW_THUNDER_MUSCLE, "Yellow Thunder Muscle", 49_900, 12).with_image("yellow-muscle.jpg"),
    ProductSnapshot::new(GREEN_MONSTER_TRUCK, "Green Monster Truck", 29_900, 8).with_image("green-monster.jpg"),
    ProductSnapshot::new(BLACK_LUXURY_SEDAN, "Black Luxury Sedan", 49_900, 15).with_image("black-luxury.jpg"),
  ]
}

pub fn seeded_memory_store() -> MemoryCartStore {
  MemoryCartStore::with_products(demo_catalogue())
}
