use super::{PlacementConfig, WalkableSurface};
use crate::{
    constants::{
        CHALLENGE_EXTRA_ENEMIES, FALLBACK_SNAP_DISTANCE, MIN_PLAYER_DISTANCE,
        MIN_SPAWN_SEPARATION, SPAWN_POINT_ATTEMPTS, SPAWN_SNAP_DISTANCE,
    },
    types::{Bounds, RoomType, Vector2},
};

use std::fmt::{Display, Formatter};

use rand::Rng;
use serde::Serialize;
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnemyCategory {
    Standard,
    // Kinds that cannot fight alone, a room never holds only ghosts
    Ghost,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EnemyKind {
    pub name: &'static str,
    pub category: EnemyCategory,
}

impl EnemyKind {
    pub const fn new(name: &'static str, category: EnemyCategory) -> Self {
        EnemyKind { name, category }
    }

    pub fn is_ghost(&self) -> bool {
        self.category == EnemyCategory::Ghost
    }
}

impl Display for EnemyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub struct EnemyRequest<'a> {
    pub room_type: RoomType,
    // Main path rooms entered so far, this one included
    pub progress: usize,
    pub main_path_length: usize,
    pub bounds: Bounds,
    pub centre: Vector2,
    pub player_position: Vector2,
    pub surface: &'a WalkableSurface,
    pub config: &'a PlacementConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedEnemy {
    pub kind: EnemyKind,
    pub position: Vector2,
}

pub struct EnemySpawner;

impl EnemySpawner {
    pub fn plan(request: &EnemyRequest, rng: &mut impl Rng) -> Vec<PlacedEnemy> {
        let config = request.config;

        if request.room_type == RoomType::Boss {
            let position = request
                .surface
                .nearest_walkable(request.centre, FALLBACK_SNAP_DISTANCE)
                .unwrap_or(request.centre);

            return vec![PlacedEnemy {
                kind: config.boss,
                position,
            }];
        }

        if config.enemy_pool.is_empty() {
            event!(tracing::Level::WARN, "Empty enemy pool, the room stays empty");
            return Vec::new();
        }

        let count = Self::enemy_count(
            request.room_type,
            request.progress,
            request.main_path_length,
            config,
        );
        let max_idx = Self::unlocked_variety(
            request.room_type,
            request.progress,
            request.main_path_length,
            config.enemy_pool.len(),
        );

        let kinds = Self::choose_kinds(&config.enemy_pool, count, max_idx, rng);

        let mut positions: Vec<Vector2> = Vec::with_capacity(kinds.len());
        for _ in kinds.iter() {
            let position = Self::spawn_point(request, &positions, rng);
            positions.push(position);
        }

        event!(
            tracing::Level::DEBUG,
            "Planned {} enemies with variety up to {} for {} room {}/{}",
            kinds.len(),
            max_idx,
            request.room_type,
            request.progress,
            request.main_path_length
        );

        kinds
            .into_iter()
            .zip(positions)
            .map(|(kind, position)| PlacedEnemy { kind, position })
            .collect()
    }

    pub fn enemy_count(
        room_type: RoomType,
        progress: usize,
        main_path_length: usize,
        config: &PlacementConfig,
    ) -> usize {
        let count = config
            .max_enemies
            .min((config.min_enemies + progress).saturating_sub(1));

        if room_type == RoomType::Challenge {
            (count + CHALLENGE_EXTRA_ENEMIES).min(main_path_length)
        } else {
            count
        }
    }

    // Highest pool index allowed in this room.
    pub fn unlocked_variety(
        room_type: RoomType,
        progress: usize,
        main_path_length: usize,
        pool_len: usize,
    ) -> usize {
        let last = pool_len.saturating_sub(1);

        if room_type == RoomType::Challenge {
            return last;
        }

        let rooms_per_unlock = (main_path_length / pool_len.max(1)).max(1);
        last.min(progress.saturating_sub(1) / rooms_per_unlock)
    }

    fn choose_kinds(
        pool: &[EnemyKind],
        count: usize,
        max_idx: usize,
        rng: &mut impl Rng,
    ) -> Vec<EnemyKind> {
        if count == 0 {
            return Vec::new();
        }

        let unlocked = &pool[..=max_idx.min(pool.len() - 1)];
        let mut kinds = vec![unlocked[unlocked.len() - 1]];

        for slot in 1..count {
            let only_ghosts = kinds.iter().all(EnemyKind::is_ghost);

            if slot + 1 == count && only_ghosts {
                let fighters = unlocked
                    .iter()
                    .filter(|kind| !kind.is_ghost())
                    .collect::<Vec<_>>();

                if !fighters.is_empty() {
                    kinds.push(*fighters[rng.random_range(0..fighters.len())]);
                    continue;
                }

                event!(
                    tracing::Level::WARN,
                    "Only ghosts unlocked, the room will hold nothing else"
                );
            }

            kinds.push(unlocked[rng.random_range(0..unlocked.len())]);
        }

        kinds
    }

    fn spawn_point(request: &EnemyRequest, placed: &[Vector2], rng: &mut impl Rng) -> Vector2 {
        let bounds = request.bounds;

        for _ in 0..SPAWN_POINT_ATTEMPTS {
            let point = Vector2::new(
                rng.random_range(bounds.min.x..bounds.max.x),
                rng.random_range(bounds.min.y..bounds.max.y),
            );

            if point.distance(&request.player_position) < MIN_PLAYER_DISTANCE
                || placed
                    .iter()
                    .any(|other| point.distance(other) < MIN_SPAWN_SEPARATION)
                || !request.surface.is_over_floor(point)
            {
                continue;
            }

            if let Some(snapped) = request.surface.nearest_walkable(point, SPAWN_SNAP_DISTANCE) {
                return snapped;
            }
        }

        event!(
            tracing::Level::WARN,
            "No spawn point found after {} attempts, falling back to the room centre",
            SPAWN_POINT_ATTEMPTS
        );

        request
            .surface
            .nearest_walkable(request.centre, FALLBACK_SNAP_DISTANCE)
            .unwrap_or(request.centre)
    }
}
