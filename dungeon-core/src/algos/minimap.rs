use crate::types::{Cell, Direction, DirectionSet, Dungeon, Room, RoomId, RoomType};

use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::event;

/// Mini-map tile models, named after their openings as seen on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TileShape {
    U,
    R,
    D,
    L,
    UR,
    UD,
    UL,
    RD,
    RL,
    DL,
    URD,
    URL,
    UDL,
    RDL,
    URDL,
}

impl TileShape {
    pub const ALL: [TileShape; 15] = [
        TileShape::U,
        TileShape::R,
        TileShape::D,
        TileShape::L,
        TileShape::UR,
        TileShape::UD,
        TileShape::UL,
        TileShape::RD,
        TileShape::RL,
        TileShape::DL,
        TileShape::URD,
        TileShape::URL,
        TileShape::UDL,
        TileShape::RDL,
        TileShape::URDL,
    ];

    pub const fn openings(self) -> DirectionSet {
        use Direction::{Down, Left, Right, Up};

        match self {
            TileShape::U => DirectionSet::of(&[Up]),
            TileShape::R => DirectionSet::of(&[Right]),
            TileShape::D => DirectionSet::of(&[Down]),
            TileShape::L => DirectionSet::of(&[Left]),
            TileShape::UR => DirectionSet::of(&[Up, Right]),
            TileShape::UD => DirectionSet::of(&[Up, Down]),
            TileShape::UL => DirectionSet::of(&[Up, Left]),
            TileShape::RD => DirectionSet::of(&[Right, Down]),
            TileShape::RL => DirectionSet::of(&[Right, Left]),
            TileShape::DL => DirectionSet::of(&[Down, Left]),
            TileShape::URD => DirectionSet::of(&[Up, Right, Down]),
            TileShape::URL => DirectionSet::of(&[Up, Right, Left]),
            TileShape::UDL => DirectionSet::of(&[Up, Down, Left]),
            TileShape::RDL => DirectionSet::of(&[Right, Down, Left]),
            TileShape::URDL => DirectionSet::of(&[Up, Right, Down, Left]),
        }
    }

    // The dungeon grid grows upwards while the map is drawn top down, so
    // the vertical openings swap.
    pub fn for_room_doors(directions: DirectionSet) -> Option<TileShape> {
        let openings = directions.flipped_vertically();

        TileShape::ALL
            .into_iter()
            .find(|shape| shape.openings() == openings)
    }
}

impl Display for TileShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.openings())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TileMaterial {
    Path,
    Boss,
    Challenge,
    // Highlight of the room the player is in
    Current,
}

impl From<RoomType> for TileMaterial {
    fn from(room_type: RoomType) -> Self {
        match room_type {
            RoomType::Starting | RoomType::MainPath => TileMaterial::Path,
            RoomType::Boss => TileMaterial::Boss,
            RoomType::Challenge => TileMaterial::Challenge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapTile {
    pub room: RoomId,
    pub shape: TileShape,
    pub material: TileMaterial,
    pub position: Cell,
}

impl MapTile {
    pub fn project(room: &Room) -> Option<MapTile> {
        let Some(shape) = TileShape::for_room_doors(room.directions()) else {
            event!(
                tracing::Level::ERROR,
                "Room {} has no doors, it cannot be drawn on the map",
                room
            );
            return None;
        };

        Some(MapTile {
            room: room.id,
            shape,
            material: room.room_type.into(),
            position: Cell::new(room.position.x, -room.position.y),
        })
    }
}

/// Map of the level as discovered by the player. Tiles stay hidden until
/// their room is entered.
#[derive(Debug, Clone)]
pub struct Minimap {
    tiles: Vec<MapTile>,
    current: Option<RoomId>,
    visited: tinyset::SetUsize,
}

impl Minimap {
    pub fn new(dungeon: &Dungeon) -> Self {
        Self::from_rooms(dungeon.rooms())
    }

    pub(crate) fn from_rooms(rooms: &[Room]) -> Self {
        Minimap {
            tiles: rooms.iter().filter_map(|room| room.map_tile).collect(),
            current: None,
            visited: tinyset::SetUsize::new(),
        }
    }

    pub fn tiles(&self) -> &[MapTile] {
        &self.tiles
    }

    pub fn tile(&self, room: RoomId) -> Option<&MapTile> {
        self.tiles.iter().find(|tile| tile.room == room)
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.current
    }

    pub fn is_revealed(&self, room: RoomId) -> bool {
        self.visited.contains(room)
    }

    pub fn revealed_tiles(&self) -> impl Iterator<Item = &MapTile> {
        self.tiles
            .iter()
            .filter(|tile| self.visited.contains(tile.room))
    }

    // Material the tile is drawn with right now.
    pub fn material_of(&self, tile: &MapTile) -> TileMaterial {
        if self.current == Some(tile.room) {
            TileMaterial::Current
        } else {
            tile.material
        }
    }

    // Reveals and highlights `room`, returning the rooms whose tile changed.
    pub fn enter_room(&mut self, room: RoomId) -> Vec<RoomId> {
        if self.tile(room).is_none() {
            event!(tracing::Level::WARN, "Room {} is not on the map", room);
            return Vec::new();
        }

        if self.current == Some(room) {
            return Vec::new();
        }

        let mut changed = self.exit_room().into_iter().collect::<Vec<_>>();

        self.visited.insert(room);
        self.current = Some(room);
        changed.push(room);

        changed
    }

    // Restores the material of the highlighted tile.
    pub fn exit_room(&mut self) -> Option<RoomId> {
        self.current.take()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn room(id: RoomId, position: Cell, room_type: RoomType, directions: DirectionSet) -> Room {
        let mut next_door_id = 0;
        Room::new(id, position, room_type, directions, &mut next_door_id)
    }

    #[test]
    fn test_every_template_has_a_tile() {
        let shapes = (1..16_u8)
            .map(|bits| {
                crate::constants::DIRECTIONS
                    .into_iter()
                    .filter(|direction| bits & direction.bit() != 0)
                    .collect::<DirectionSet>()
            })
            .filter_map(TileShape::for_room_doors)
            .collect::<std::collections::HashSet<_>>();

        assert_eq!(shapes.len(), 15);
    }

    #[test]
    fn test_tile_projection() {
        let up_right = DirectionSet::single(Direction::Up).with(Direction::Right);
        let tile = MapTile::project(&room(3, Cell::new(2, 4), RoomType::Challenge, up_right)).unwrap();

        assert_eq!(tile.room, 3);
        assert_eq!(tile.shape, TileShape::RD, "Up doors open downwards on the map");
        assert_eq!(tile.material, TileMaterial::Challenge);
        assert_eq!(tile.position, Cell::new(2, -4));

        let down = DirectionSet::single(Direction::Down);
        let tile = MapTile::project(&room(0, Cell::ORIGIN, RoomType::Starting, down)).unwrap();
        assert_eq!(tile.shape, TileShape::U);
        assert_eq!(tile.material, TileMaterial::Path);

        let left = DirectionSet::single(Direction::Left);
        let tile = MapTile::project(&room(1, Cell::ORIGIN, RoomType::Boss, left)).unwrap();
        assert_eq!(tile.shape, TileShape::L);
        assert_eq!(tile.material, TileMaterial::Boss);
    }

    #[test]
    fn test_room_without_doors_has_no_tile() {
        let lonely = room(0, Cell::ORIGIN, RoomType::MainPath, DirectionSet::EMPTY);

        assert_eq!(MapTile::project(&lonely), None);
    }

    fn minimap() -> Minimap {
        let right = DirectionSet::single(Direction::Right);
        let left = DirectionSet::single(Direction::Left);

        let mut rooms = vec![
            room(0, Cell::ORIGIN, RoomType::Starting, right),
            room(1, Cell::new(1, 0), RoomType::Boss, left),
        ];
        for room in rooms.iter_mut() {
            room.map_tile = MapTile::project(room);
        }

        Minimap::from_rooms(&rooms)
    }

    #[test]
    fn test_entering_rooms_moves_the_highlight() {
        let mut map = minimap();

        assert_eq!(map.revealed_tiles().count(), 0);
        assert_eq!(map.enter_room(0), vec![0]);
        assert_eq!(map.material_of(&map.tiles()[0]), TileMaterial::Current);

        assert_eq!(map.enter_room(1), vec![0, 1]);
        assert_eq!(map.material_of(&map.tiles()[0]), TileMaterial::Path);
        assert_eq!(map.material_of(&map.tiles()[1]), TileMaterial::Current);
        assert_eq!(map.revealed_tiles().count(), 2);

        assert_eq!(map.enter_room(1), Vec::<RoomId>::new());
        assert_eq!(map.current_room(), Some(1));
        assert_eq!(map.exit_room(), Some(1));
        assert_eq!(map.current_room(), None);
        assert_eq!(map.material_of(&map.tiles()[1]), TileMaterial::Boss);
        assert!(map.is_revealed(1), "Exiting keeps the tile revealed");

        assert!(map.enter_room(9).is_empty());
    }
}
