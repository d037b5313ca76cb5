mod enemy_spawner;
mod placement_config;
mod player_spawner;
mod room_state;
mod surface;
mod trap_spawner;

pub use enemy_spawner::{EnemyCategory, EnemyKind, EnemyRequest, EnemySpawner, PlacedEnemy};
pub use placement_config::PlacementConfig;
pub use player_spawner::{PlayerSpawn, PlayerSpawner};
pub use room_state::{RoomEvent, RoomState};
pub use surface::{GridSurfaceBaker, SurfaceBaker, WalkableSurface};
pub use trap_spawner::{PlacedTrap, TrapKind, TrapRequest, TrapSpawner};
