mod dungeon_builder;
mod map_drawer;
mod minimap;
mod placement;
mod room_layout;

pub use dungeon_builder::DungeonBuilderConfig;
pub(crate) use dungeon_builder::DungeonBuilder;
pub(crate) use map_drawer::{DrawConfig, MinimapDrawer, MinimapDrawerFactory, RoomDrawer};
pub use minimap::{MapTile, Minimap, TileMaterial, TileShape};
pub use placement::{
    EnemyCategory, EnemyKind, EnemyRequest, EnemySpawner, GridSurfaceBaker, PlacedEnemy,
    PlacedTrap, PlacementConfig, PlayerSpawn, PlayerSpawner, RoomEvent, RoomState,
    SurfaceBaker, TrapKind, TrapRequest, TrapSpawner, WalkableSurface,
};
pub use room_layout::{
    CutCornerStyle, Grid, LayoutRequest, PieceMaterializer, PieceType, PillarStyle, RoomLayout,
    RoomPiece, RoomShape, Rotation,
};

use rand::{SeedableRng, rngs::StdRng};

pub(crate) struct RngHandler;

impl RngHandler {
    pub fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[cfg(not(test))]
    pub fn entropy_seed() -> u64 {
        use rand::Rng;

        rand::rng().random()
    }

    #[cfg(test)]
    pub fn entropy_seed() -> u64 {
        crate::constants::TEST_RANDOM_SEED
    }
}
