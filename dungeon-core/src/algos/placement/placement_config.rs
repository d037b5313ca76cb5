use super::{EnemyKind, TrapKind};
use crate::types::RoomStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    // Enemies in the first room of the main path. Every room entered
    // after it adds one more, up to `max_enemies`.
    pub min_enemies: usize,
    pub max_enemies: usize,
    // Most traps a single room can hold on the first level
    pub max_traps: usize,
    // Extra traps allowed per room on every new level
    pub trap_increase_per_level: usize,
    // Ordered from easiest to hardest, harder kinds unlock as the player
    // progresses along the main path.
    pub enemy_pool: Vec<EnemyKind>,
    pub boss: EnemyKind,
    pub trap_pool: Vec<TrapKind>,
    // Dropped when a challenge room is cleared
    pub power_up: &'static str,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        PlacementConfig::from_style(RoomStyle::default())
    }
}

impl PlacementConfig {
    pub fn from_style(style: RoomStyle) -> Self {
        PlacementConfig {
            min_enemies: 2,
            max_enemies: 7,
            max_traps: 3,
            trap_increase_per_level: 2,
            enemy_pool: style.enemy_pool().to_vec(),
            boss: style.boss(),
            trap_pool: style.trap_pool().to_vec(),
            power_up: style.power_up(),
        }
    }

    // Levels start at 1.
    pub fn max_traps_for_level(&self, level: u32) -> usize {
        self.max_traps + self.trap_increase_per_level * level.saturating_sub(1) as usize
    }
}
