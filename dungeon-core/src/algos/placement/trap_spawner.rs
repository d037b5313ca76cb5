use crate::{
    algos::{PieceType, RoomLayout, Rotation},
    types::{Cell, RoomType, Vector2},
};

use std::fmt::{Display, Formatter};

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TrapKind {
    pub name: &'static str,
}

impl TrapKind {
    pub const fn new(name: &'static str) -> Self {
        TrapKind { name }
    }
}

impl Display for TrapKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub struct TrapRequest<'a> {
    pub room_type: RoomType,
    pub progress: usize,
    pub main_path_length: usize,
    // Trap limit of the current level
    pub max_traps: usize,
    pub pool: &'a [TrapKind],
    pub layout: &'a RoomLayout,
    pub origin: Vector2,
}

/// A trap replacing the floor piece of `cell`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedTrap {
    pub kind: TrapKind,
    pub cell: Cell,
    pub position: Vector2,
    pub rotation: Rotation,
}

pub struct TrapSpawner;

impl TrapSpawner {
    pub fn plan(request: &TrapRequest, rng: &mut impl Rng) -> Vec<PlacedTrap> {
        if request.pool.is_empty() {
            event!(tracing::Level::WARN, "Empty trap pool, skipping traps");
            return Vec::new();
        }

        let max_here = Self::max_traps_here(
            request.room_type,
            request.progress,
            request.main_path_length,
            request.max_traps,
        );
        if max_here == 0 {
            return Vec::new();
        }

        let mut floor = request
            .layout
            .pieces()
            .filter(|piece| piece.piece_type == PieceType::Floor)
            .collect::<Vec<_>>();
        floor.shuffle(rng);

        let count = rng
            .random_range(0..=max_here)
            .min(request.max_traps)
            .min(floor.len());

        event!(
            tracing::Level::DEBUG,
            "Placing {} of up to {} traps on {} floor cells",
            count,
            max_here,
            floor.len()
        );

        floor
            .into_iter()
            .take(count)
            .map(|piece| PlacedTrap {
                kind: request.pool[rng.random_range(0..request.pool.len())],
                cell: piece.cell,
                position: piece.cell.to_world(request.origin),
                rotation: piece.rotation,
            })
            .collect()
    }

    // Trap allowance grows in steps along the main path, so the last
    // rooms before the boss reach the level limit.
    pub fn max_traps_here(
        room_type: RoomType,
        progress: usize,
        main_path_length: usize,
        max_traps: usize,
    ) -> usize {
        if room_type == RoomType::Challenge {
            return max_traps;
        }

        match main_path_length / (max_traps + 1) {
            0 => 0,
            per_increase => progress / per_increase,
        }
    }
}
