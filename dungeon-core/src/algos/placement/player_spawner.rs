use super::WalkableSurface;
use crate::{
    algos::RoomLayout,
    constants::{PLAYER_SNAP_START_DISTANCE, PLAYER_SNAP_STEPS},
    error::{GenerationError, GenerationResult},
    types::{Cell, RoomId, Vector2},
};

use serde::Serialize;
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSpawn {
    pub cell: Cell,
    pub position: Vector2,
}

pub struct PlayerSpawner;

impl PlayerSpawner {
    pub fn locate(
        room: RoomId,
        layout: &RoomLayout,
        surface: &WalkableSurface,
        origin: Vector2,
    ) -> GenerationResult<PlayerSpawn> {
        let Some(cell) = layout.spawn_cell() else {
            event!(tracing::Level::ERROR, "Room {} has no spawn cell", room);
            return Err(GenerationError::NoWalkableSurface(room));
        };

        let point = cell.to_world(origin);
        let mut radius = PLAYER_SNAP_START_DISTANCE;

        for _ in 0..PLAYER_SNAP_STEPS {
            if let Some(position) = surface.nearest_walkable(point, radius) {
                return Ok(PlayerSpawn { cell, position });
            }
            radius *= 2.0;
        }

        event!(
            tracing::Level::ERROR,
            "Spawn cell {} of room {} is not on the walkable surface",
            cell,
            room
        );

        Err(GenerationError::NoWalkableSurface(room))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algos::{GridSurfaceBaker, LayoutRequest, RngHandler, SurfaceBaker},
        constants::TEST_RANDOM_SEED,
        types::RoomType,
    };

    fn starting_layout() -> RoomLayout {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let request = LayoutRequest {
            width: Some(5),
            height: Some(5),
            ..Default::default()
        };

        RoomLayout::build(&[], RoomType::Starting, &request, &mut rng)
    }

    #[test]
    fn test_player_spawns_on_the_spawn_cell() {
        let layout = starting_layout();
        let origin = Vector2::new(0.0, 0.0);
        let surface = GridSurfaceBaker.bake(&layout, origin, &[]);

        let spawn = PlayerSpawner::locate(0, &layout, &surface, origin).unwrap();

        assert_eq!(Some(spawn.cell), layout.spawn_cell());
        assert_eq!(spawn.position, spawn.cell.to_world(origin));
    }

    #[test]
    fn test_player_snaps_off_blocked_cell() {
        let layout = starting_layout();
        let spawn_cell = layout.spawn_cell().unwrap();
        let surface = GridSurfaceBaker.bake(&layout, Vector2::ZERO, &[spawn_cell]);

        let spawn = PlayerSpawner::locate(0, &layout, &surface, Vector2::ZERO).unwrap();

        assert_ne!(spawn.position, spawn_cell.to_world(Vector2::ZERO));
        let cell = surface.cell_at(spawn.position).unwrap();
        assert!(surface.is_walkable(cell));
    }

    #[test]
    fn test_no_surface_is_fatal() {
        let layout = starting_layout();
        let everything = layout.pieces().map(|piece| piece.cell).collect::<Vec<_>>();
        let surface = GridSurfaceBaker.bake(&layout, Vector2::ZERO, &everything);

        assert_eq!(
            PlayerSpawner::locate(3, &layout, &surface, Vector2::ZERO),
            Err(GenerationError::NoWalkableSurface(3))
        );
    }
}
