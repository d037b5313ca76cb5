mod algos;
mod constants;
mod error;
mod session;
mod types;

use algos::MinimapDrawer;
use tracing::{Level, span};

pub use algos::{
    CutCornerStyle, DungeonBuilderConfig, EnemyCategory, EnemyKind, EnemyRequest, EnemySpawner,
    Grid, GridSurfaceBaker, LayoutRequest, MapTile, Minimap, PieceMaterializer, PieceType,
    PillarStyle, PlacedEnemy, PlacedTrap, PlacementConfig, PlayerSpawn, PlayerSpawner, RoomEvent,
    RoomLayout, RoomPiece, RoomShape, RoomState, Rotation, SurfaceBaker, TileMaterial, TileShape,
    TrapKind, TrapRequest, TrapSpawner, WalkableSurface,
};
pub use error::{GenerationError, GenerationResult};
pub use session::{GenerationSession, PopulationContext, RoomPopulation, TaskHandle, TaskPoll};
pub use types::{
    Bounds, Cell, Direction, DirectionSet, Door, DoorDestination, DoorId, Dungeon, Room, RoomId,
    RoomStyle, RoomType, Vector2,
};

// Colours of the actors marked on a room drawing
const PLAYER_COLOR: &str = "#00e000";
const ENEMY_COLOR: &str = "#f80000";
const TRAP_COLOR: &str = "#ff8000";

/// Generates a single level. A seed of `None` picks a random one.
pub fn create_dungeon(config: &DungeonBuilderConfig, seed: Option<u64>) -> GenerationResult<Dungeon> {
    let span = span!(Level::DEBUG, "create_dungeon");
    let _guard = span.enter();

    let mut session = match seed {
        Some(seed) => GenerationSession::new(seed),
        None => GenerationSession::from_entropy(),
    };

    session.generate_level(config)
}

/// Draws the mini-map of `minimap`. Unvisited rooms are only drawn when
/// `reveal_all` is set.
pub fn draw_minimap(minimap: &Minimap, style: RoomStyle, reveal_all: bool) -> svg::Document {
    let span = span!(Level::DEBUG, "draw_minimap");
    let _guard = span.enter();

    let config = algos::DrawConfig {
        reveal_all,
        ..Default::default()
    };
    let drawer = algos::MinimapDrawerFactory::create_drawer(style);

    drawer.draw(minimap, &config)
}

/// Draws the layout of one room, with the actors of `population` on top.
pub fn draw_room(
    dungeon: &Dungeon,
    room_id: RoomId,
    population: Option<&RoomPopulation>,
) -> GenerationResult<svg::Document> {
    let span = span!(Level::DEBUG, "draw_room");
    let _guard = span.enter();

    let room = dungeon.room(room_id)?;
    let mut drawer = algos::RoomDrawer::new(dungeon, room, &algos::DrawConfig::default());

    dungeon.materialize_room(room_id, &mut drawer)?;

    if let Some(population) = population {
        for trap in population.traps.iter() {
            drawer.mark(room, trap.position, TRAP_COLOR);
        }
        for enemy in population.enemies.iter() {
            drawer.mark(room, enemy.position, ENEMY_COLOR);
        }
        if let Some(player) = population.player {
            drawer.mark(room, player.position, PLAYER_COLOR);
        }
    }

    Ok(drawer.finish())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::TEST_DUNGEON_SEEDS;

    #[test]
    fn test_create_dungeon_matches_a_fresh_session() {
        let config = DungeonBuilderConfig::default();

        for seed in TEST_DUNGEON_SEEDS.take(5) {
            let dungeon = create_dungeon(&config, Some(seed)).unwrap();
            let expected = GenerationSession::new(seed).generate_level(&config).unwrap();

            assert_eq!(dungeon, expected);
            assert_eq!(dungeon.seed(), seed);
        }

        assert!(matches!(
            create_dungeon(
                &DungeonBuilderConfig {
                    min_path_length: 0,
                    ..config
                },
                Some(TEST_DUNGEON_SEEDS.start),
            ),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_drawings_of_a_created_dungeon() {
        let dungeon =
            create_dungeon(&DungeonBuilderConfig::default(), Some(TEST_DUNGEON_SEEDS.start)).unwrap();
        let mut minimap = Minimap::new(&dungeon);
        minimap.enter_room(dungeon.starting_room().id);

        let hidden = draw_minimap(&minimap, RoomStyle::Arcade, false).to_string();
        let revealed = draw_minimap(&minimap, RoomStyle::Arcade, true).to_string();
        assert_eq!(hidden.matches("<rect").count(), 1, "Only the starting room is visited");
        assert_eq!(revealed.matches("<rect").count(), dungeon.rooms().len());

        let room = draw_room(&dungeon, dungeon.boss_room().id, None).unwrap().to_string();
        assert!(room.contains("data-model"));
        assert!(matches!(
            draw_room(&dungeon, dungeon.rooms().len(), None),
            Err(GenerationError::UnknownRoom(_))
        ));
    }
}
