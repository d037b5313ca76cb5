use crate::types::Direction;

pub(crate) const MIN_ROOM_SIZE: i32 = 5;
pub(crate) const MAX_ROOM_SIZE: i32 = 7;
pub(crate) const BOSS_ROOM_SIZE: i32 = 9;

// Cells of straight wall that must survive on each side of a door
pub(crate) const MIN_SPACE_AROUND_DOOR: i32 = 3;
pub(crate) const MIN_CORNER_SIZE: i32 = 2;
pub(crate) const MIN_SIZE_FOR_PILLARS: i32 = 6;
pub(crate) const DONUT_PATH_WIDTH: i32 = 2;

pub(crate) const ROOM_PLACEMENT_ATTEMPTS: u32 = 1000;

pub(crate) const MODEL_SCALE: f32 = 5.0;
pub(crate) const ROOM_SPACING: f32 = 100.0;

pub(crate) const MIN_PLAYER_DISTANCE: f32 = MODEL_SCALE;
pub(crate) const MIN_SPAWN_SEPARATION: f32 = 0.5;
pub(crate) const SPAWN_SNAP_DISTANCE: f32 = 5.0;
pub(crate) const FALLBACK_SNAP_DISTANCE: f32 = 25.0;
pub(crate) const SPAWN_POINT_ATTEMPTS: u32 = 1000;
pub(crate) const PLAYER_SNAP_START_DISTANCE: f32 = 0.5;
pub(crate) const PLAYER_SNAP_STEPS: u32 = 16;

pub(crate) const ENEMY_SPAWN_DELAY_TICKS: u32 = 6;
pub(crate) const PLAYER_SPAWN_DELAY_TICKS: u32 = 3;

pub(crate) const CHALLENGE_EXTRA_ENEMIES: usize = 3;

pub(crate) const TILE_SIZE: u32 = 48;
pub(crate) const MAP_SIZE_MARGIN: u32 = 96;
pub(crate) const PIECE_SIZE: u32 = 32;

pub(crate) const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

#[cfg(test)]
pub(crate) const TEST_RANDOM_SEED: u64 = 0x5eed_d00d;

// Seeds that build with the default path lengths and with (5, 5) paths
#[cfg(test)]
pub(crate) const TEST_DUNGEON_SEEDS: std::ops::Range<u64> = 0..40;
