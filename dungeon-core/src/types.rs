use crate::{
    algos::{MapTile, PieceMaterializer, RoomLayout},
    constants::{DIRECTIONS, MODEL_SCALE},
    error::{GenerationError, GenerationResult},
};

use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }

    // Computes the euclidean distance between two vectors
    pub fn distance(&self, other: &Vector2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    // Same as `Self::distance`, but return the distance multiplied by
    // 100 and truncated to its integer part.
    pub fn scalar_distance(&self, other: &Vector2) -> u32 {
        (self.distance(other) * 100.0).trunc() as u32
    }

    pub fn offset_by(&self, other: Vector2) -> Vector2 {
        Vector2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Display for Vector2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// An integer coordinate. Used both for room positions in the dungeon grid
/// and for cells inside a room layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub const fn offset_by(&self, dx: i32, dy: i32) -> Cell {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    // World-space position of a layout cell placed at `origin`.
    pub fn to_world(&self, origin: Vector2) -> Vector2 {
        origin.offset_by(Vector2::new(
            self.x as f32 * MODEL_SCALE,
            self.y as f32 * MODEL_SCALE,
        ))
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vector2,
    pub max: Vector2,
}

impl Bounds {
    pub const fn new(min: Vector2, max: Vector2) -> Self {
        Bounds { min, max }
    }

    pub fn centre(&self) -> Vector2 {
        Vector2::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }

    pub fn size(&self) -> Vector2 {
        Vector2::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    pub fn contains(&self, point: Vector2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn next_position(self, position: Cell) -> Cell {
        let (dx, dy) = self.offset();
        position.offset_by(dx, dy)
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }

    // Clockwise index, starting at Up
    pub(crate) const fn index(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    pub(crate) const fn bit(self) -> u8 {
        1 << self.index()
    }

    // Number of clockwise quarter turns needed to face `other`.
    pub(crate) const fn clockwise_turns_to(self, other: Direction) -> u8 {
        (other.index() + 4 - self.index()) % 4
    }

    pub const fn initial(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
        }
    }

    pub(crate) const fn flipped_vertically(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            other => other,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
        }
    }
}

/// A set of door directions, stored as a 4 bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub const fn single(direction: Direction) -> Self {
        DirectionSet(direction.bit())
    }

    pub const fn of(directions: &[Direction]) -> Self {
        let mut set = DirectionSet::EMPTY;
        let mut idx = 0;
        while idx < directions.len() {
            set = set.with(directions[idx]);
            idx += 1;
        }
        set
    }

    pub const fn with(self, direction: Direction) -> Self {
        DirectionSet(self.0 | direction.bit())
    }

    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        DIRECTIONS
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }

    pub fn flipped_vertically(self) -> Self {
        self.iter().map(Direction::flipped_vertically).collect()
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        iter.into_iter()
            .fold(DirectionSet::EMPTY, |set, direction| set.with(direction))
    }
}

impl Display for DirectionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for direction in self.iter() {
            write!(f, "{}", direction.initial())?;
        }
        Ok(())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("#{_0}")]
pub struct DoorId(pub u32);

pub type RoomId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Door {
    pub id: DoorId,
    pub direction: Direction,
    pub owner: RoomId,
    pub leads_to: Option<RoomId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoomType {
    Starting,
    MainPath,
    Challenge,
    Boss,
}

impl Display for RoomType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomType::Starting => write!(f, "starting"),
            RoomType::MainPath => write!(f, "main-path"),
            RoomType::Challenge => write!(f, "challenge"),
            RoomType::Boss => write!(f, "boss"),
        }
    }
}

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RoomStyle {
    #[default]
    Arcade,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub position: Cell,
    pub room_type: RoomType,
    pub on_main_path: bool,
    // World-space position of the layout cell (0, 0)
    pub origin: Vector2,
    pub layout: Option<RoomLayout>,
    pub map_tile: Option<MapTile>,
    doors: Vec<Door>,
}

impl Room {
    pub(crate) fn new(
        id: RoomId,
        position: Cell,
        room_type: RoomType,
        template: DirectionSet,
        next_door_id: &mut u32,
    ) -> Self {
        let doors = template
            .iter()
            .map(|direction| {
                *next_door_id += 1;

                Door {
                    id: DoorId(*next_door_id),
                    direction,
                    owner: id,
                    leads_to: None,
                }
            })
            .collect();

        Room {
            id,
            position,
            room_type,
            on_main_path: matches!(room_type, RoomType::Starting | RoomType::Boss),
            origin: Vector2::ZERO,
            layout: None,
            map_tile: None,
            doors,
        }
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door_in(&self, direction: Direction) -> Option<&Door> {
        self.doors.iter().find(|door| door.direction == direction)
    }

    pub(crate) fn door_in_mut(&mut self, direction: Direction) -> Option<&mut Door> {
        self.doors.iter_mut().find(|door| door.direction == direction)
    }

    pub fn directions(&self) -> DirectionSet {
        self.doors.iter().map(|door| door.direction).collect()
    }

    pub fn number_of_doors(&self) -> usize {
        self.doors.len()
    }

    pub fn is_dead_end(&self) -> bool {
        self.doors.len() == 1
    }

    // Extents of the materialised room in world space.
    pub fn bounds(&self) -> Option<Bounds> {
        let layout = self.layout.as_ref()?;
        let half_piece = MODEL_SCALE / 2.0;

        let min = self.origin.offset_by(Vector2::new(-half_piece, -half_piece));
        let max = Cell::new(layout.width() - 1, layout.height() - 1)
            .to_world(self.origin)
            .offset_by(Vector2::new(half_piece, half_piece));

        Some(Bounds::new(min, max))
    }

    // World position of the centre piece.
    pub fn centre(&self) -> Option<Vector2> {
        let layout = self.layout.as_ref()?;
        Some(Cell::new(layout.width() / 2, layout.height() / 2).to_world(self.origin))
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.id,
            self.room_type,
            self.position,
            self.directions()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoorDestination {
    pub room: RoomId,
    pub door: DoorId,
    // World position of the destination door piece, when the room has a layout
    pub position: Option<Vector2>,
}

/// All rooms of one level. Rooms are stored in build order and the
/// starting room always has id 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Dungeon {
    rooms: Vec<Room>,
    start: RoomId,
    boss: RoomId,
    main_path: Vec<RoomId>,
    seed: u64,
    epoch: u64,
}

impl Dungeon {
    pub(crate) fn new(
        rooms: Vec<Room>,
        start: RoomId,
        boss: RoomId,
        main_path: Vec<RoomId>,
        seed: u64,
        epoch: u64,
    ) -> Self {
        Dungeon {
            rooms,
            start,
            boss,
            main_path,
            seed,
            epoch,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, room_id: RoomId) -> GenerationResult<&Room> {
        self.rooms
            .get(room_id)
            .ok_or(GenerationError::UnknownRoom(room_id))
    }

    pub fn starting_room(&self) -> &Room {
        &self.rooms[self.start]
    }

    pub fn boss_room(&self) -> &Room {
        &self.rooms[self.boss]
    }

    /// The rooms from the starting room up to the last main path room, in
    /// order. The boss room follows the last of them.
    pub fn main_path(&self) -> &[RoomId] {
        &self.main_path
    }

    pub fn path_length(&self) -> usize {
        self.main_path.len()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn room_at(&self, position: Cell) -> Option<&Room> {
        self.rooms.iter().find(|room| room.position == position)
    }

    pub fn find_door(&self, door_id: DoorId) -> Option<&Door> {
        self.rooms
            .iter()
            .flat_map(|room| room.doors.iter())
            .find(|door| door.id == door_id)
    }

    // The door on the other side of `door`.
    pub fn connected_door(&self, door: &Door) -> Option<&Door> {
        self.rooms
            .get(door.leads_to?)?
            .door_in(door.direction.opposite())
    }

    pub fn connected_room_type(&self, door: &Door) -> Option<RoomType> {
        Some(self.rooms.get(door.leads_to?)?.room_type)
    }

    // Walks through a door, returning where the player comes out.
    pub fn traverse(&self, door_id: DoorId) -> GenerationResult<DoorDestination> {
        let door = self
            .find_door(door_id)
            .ok_or(GenerationError::UnknownDoor(door_id))?;

        let target = self
            .connected_door(door)
            .ok_or(GenerationError::DoorMismatch {
                room: door.owner,
                door: door.id,
            })?;

        let target_room = self.room(target.owner)?;
        let position = target_room.layout.as_ref().and_then(|layout| {
            layout
                .door_cell(target.id)
                .map(|cell| cell.to_world(target_room.origin))
        });

        Ok(DoorDestination {
            room: target.owner,
            door: target.id,
            position,
        })
    }

    // Hands every piece of the room layout to the host. Returns the number
    // of pieces materialised.
    pub fn materialize_room(
        &self,
        room_id: RoomId,
        materializer: &mut impl PieceMaterializer,
    ) -> GenerationResult<usize> {
        let room = self.room(room_id)?;

        let Some(layout) = room.layout.as_ref() else {
            return Ok(0);
        };

        let mut count = 0;
        for piece in layout.pieces() {
            materializer.materialize(room, piece, piece.cell.to_world(room.origin));
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_opposite_round_trip() {
        for direction in DIRECTIONS {
            assert_eq!(
                direction.opposite().opposite(),
                direction,
                "Opposite of opposite must be the same direction"
            );
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_next_position_follows_offsets() {
        let origin = Cell::new(3, -2);

        assert_eq!(Direction::Up.next_position(origin), Cell::new(3, -1));
        assert_eq!(Direction::Right.next_position(origin), Cell::new(4, -2));
        assert_eq!(Direction::Down.next_position(origin), Cell::new(3, -3));
        assert_eq!(Direction::Left.next_position(origin), Cell::new(2, -2));

        for direction in DIRECTIONS {
            let there = direction.next_position(origin);
            assert_eq!(direction.opposite().next_position(there), origin);
        }
    }

    #[test]
    fn test_direction_set() {
        let set: DirectionSet = [Direction::Left, Direction::Up, Direction::Left]
            .into_iter()
            .collect();

        assert_eq!(set.len(), 2);
        assert!(set.contains(Direction::Up));
        assert!(!set.contains(Direction::Down));
        assert_eq!(set.to_string(), "UL");
        assert_eq!(set.flipped_vertically().to_string(), "DL");
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn test_clockwise_turns() {
        assert_eq!(Direction::Left.clockwise_turns_to(Direction::Left), 0);
        assert_eq!(Direction::Left.clockwise_turns_to(Direction::Up), 1);
        assert_eq!(Direction::Left.clockwise_turns_to(Direction::Right), 2);
        assert_eq!(Direction::Left.clockwise_turns_to(Direction::Down), 3);
    }

    #[test]
    fn test_room_doors_get_unique_ids() {
        let mut counter = 0;
        let template = DirectionSet::single(Direction::Up).with(Direction::Down);

        let room_a = Room::new(0, Cell::ORIGIN, RoomType::Starting, template, &mut counter);
        let room_b = Room::new(1, Cell::new(0, 1), RoomType::MainPath, template, &mut counter);

        assert_eq!(counter, 4);
        assert!(room_a.on_main_path, "Starting rooms are on the main path");
        assert!(!room_b.on_main_path);

        let mut ids = room_a
            .doors()
            .iter()
            .chain(room_b.doors())
            .map(|door| door.id)
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 4, "Door ids must not repeat");
        assert_eq!(DoorId(3).to_string(), "#3");
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(Vector2::new(-2.5, -2.5), Vector2::new(27.5, 17.5));

        assert!(bounds.contains(Vector2::ZERO));
        assert!(!bounds.contains(Vector2::new(30.0, 0.0)));
        assert_eq!(bounds.centre(), Vector2::new(12.5, 7.5));
        assert_eq!(bounds.size(), Vector2::new(30.0, 20.0));
    }

    #[test]
    fn test_traverse_linked_doors() {
        let mut counter = 0;
        let mut start = Room::new(
            0,
            Cell::ORIGIN,
            RoomType::Starting,
            DirectionSet::single(Direction::Up),
            &mut counter,
        );
        let mut next = Room::new(
            1,
            Cell::new(0, 1),
            RoomType::MainPath,
            DirectionSet::single(Direction::Down).with(Direction::Right),
            &mut counter,
        );

        if let Some(door) = start.door_in_mut(Direction::Up) {
            door.leads_to = Some(1);
        }
        if let Some(door) = next.door_in_mut(Direction::Down) {
            door.leads_to = Some(0);
        }

        let up = start.door_in(Direction::Up).unwrap().id;
        let down = next.door_in(Direction::Down).unwrap().id;
        let right = next.door_in(Direction::Right).unwrap().id;
        let dungeon = Dungeon::new(vec![start, next], 0, 1, vec![0], 0, 0);

        let destination = dungeon.traverse(up).unwrap();
        assert_eq!(destination.room, 1);
        assert_eq!(destination.door, down);
        assert_eq!(destination.position, None, "Rooms without layout have no door cell");

        assert_eq!(dungeon.traverse(down).unwrap().room, 0);
        assert!(matches!(
            dungeon.traverse(right),
            Err(GenerationError::DoorMismatch { room: 1, .. })
        ));
        assert!(matches!(
            dungeon.traverse(DoorId(99)),
            Err(GenerationError::UnknownDoor(_))
        ));

        assert_eq!(dungeon.room_at(Cell::new(0, 1)).map(|room| room.id), Some(1));
        assert!(dungeon.room_at(Cell::new(5, 5)).is_none());
    }
}
