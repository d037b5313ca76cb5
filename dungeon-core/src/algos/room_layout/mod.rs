use crate::{
    constants::{MAX_ROOM_SIZE, MIN_ROOM_SIZE},
    types::{Cell, Direction, Door, DoorId, Room, RoomStyle, RoomType, Vector2},
};

use rand::{Rng, rngs::StdRng};
use serde::Serialize;
use tracing::event;

mod add_pillars;
mod boss;
mod collapse_corridors;
mod cut_corners;
mod grid;
mod piece;
mod place_doors;
mod room_style;
mod shape;

pub use grid::Grid;
pub use piece::{PieceType, RoomPiece, Rotation};

use shape::LayoutShapeFactory;

/// Host hook called once per layout piece by `Dungeon::materialize_room`.
pub trait PieceMaterializer {
    fn materialize(&mut self, room: &Room, piece: &RoomPiece, position: Vector2);
}

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoomShape {
    Rectangular,
    Square,
    TJunction,
    Donut,
    Boss,
}

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CutCornerStyle {
    None,
    Straight,
    Jagged,
}

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PillarStyle {
    None,
    Square,
    Rows,
}

/// Layout parameters. Anything left out is picked at random.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRequest {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub shape: Option<RoomShape>,
    pub cut_style: Option<CutCornerStyle>,
    pub corners_to_cut: Option<usize>,
    pub corner_size_x: Option<i32>,
    pub corner_size_y: Option<i32>,
    pub pillar_style: Option<PillarStyle>,
    pub style: RoomStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomLayout {
    grid: Grid<RoomPiece>,
    shape: RoomShape,
    // Quarter turns applied to the whole template, boss rooms only
    rotation: Rotation,
    spawn_cell: Option<Cell>,
}

impl RoomLayout {
    pub fn build(
        doors: &[Door],
        room_type: RoomType,
        request: &LayoutRequest,
        rng: &mut StdRng,
    ) -> RoomLayout {
        if room_type == RoomType::Boss {
            let door = doors.first().copied();
            return Self::finish(
                boss::build(door, request.style, rng),
                RoomShape::Boss,
                request.style,
                rng,
            );
        }

        let shape = request.shape.filter(|shape| *shape != RoomShape::Boss).unwrap_or_else(|| {
            match rng.random_range(0..3) {
                0 if rng.random_bool(0.5) => RoomShape::Square,
                0 => RoomShape::Rectangular,
                1 => RoomShape::TJunction,
                _ => RoomShape::Donut,
            }
        });

        let layout_shape = LayoutShapeFactory::shape_for(shape);
        let (width, height) = layout_shape.dimensions(request, rng);

        let mut builder = LayoutBuilder::new(width, height, request.style);
        builder.build_shell(rng);

        layout_shape.carve(&mut builder, request, rng);

        builder.place_doors(doors);
        builder.collapse_corridors();

        if layout_shape.allows_pillars() {
            let pillar_style = request.pillar_style.unwrap_or_else(|| {
                [PillarStyle::None, PillarStyle::Square, PillarStyle::Rows][rng.random_range(0..3)]
            });
            builder.add_pillars(pillar_style, rng);
        }

        Self::finish(builder, shape, request.style, rng)
    }

    fn finish(
        mut builder: LayoutBuilder,
        shape: RoomShape,
        style: RoomStyle,
        rng: &mut StdRng,
    ) -> RoomLayout {
        for piece in builder.grid.iter_mut() {
            piece.variant = style.palette(piece.piece_type).pick(rng);
        }

        let spawn_cell = Self::find_spawn_cell(&builder.grid);

        RoomLayout {
            grid: builder.grid,
            shape,
            rotation: builder.rotation,
            spawn_cell,
        }
    }

    // Searches from the centre towards each quadrant in raster order for
    // the first walkable cell.
    fn find_spawn_cell(grid: &Grid<RoomPiece>) -> Option<Cell> {
        let centre = Cell::new(grid.width() / 2, grid.height() / 2);

        [(1, 1), (1, -1), (-1, 1), (-1, -1)]
            .into_iter()
            .find_map(|(step_x, step_y)| {
                let mut y = centre.y;
                while (0..grid.height()).contains(&y) {
                    let mut x = centre.x;
                    while (0..grid.width()).contains(&x) {
                        let cell = Cell::new(x, y);
                        if grid.get(cell).is_some_and(RoomPiece::is_walkable) {
                            return Some(cell);
                        }
                        x += step_x;
                    }
                    y += step_y;
                }

                None
            })
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn shape(&self) -> RoomShape {
        self.shape
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn spawn_cell(&self) -> Option<Cell> {
        self.spawn_cell
    }

    pub fn get(&self, cell: Cell) -> Option<&RoomPiece> {
        self.grid.get(cell)
    }

    pub fn grid(&self) -> &Grid<RoomPiece> {
        &self.grid
    }

    pub fn pieces(&self) -> impl Iterator<Item = &RoomPiece> {
        self.grid.iter()
    }

    pub fn count(&self, piece_type: PieceType) -> usize {
        self.pieces()
            .filter(|piece| piece.piece_type == piece_type)
            .count()
    }

    pub fn door_pieces(&self) -> impl Iterator<Item = &RoomPiece> {
        self.pieces().filter(|piece| piece.is_door())
    }

    pub fn door_cell(&self, door: DoorId) -> Option<Cell> {
        self.door_pieces()
            .find(|piece| piece.door == Some(door))
            .map(|piece| piece.cell)
    }
}

/// Mutable state of a layout under construction. Each pipeline step lives
/// in its own module as an `impl LayoutBuilder` block.
pub(crate) struct LayoutBuilder {
    grid: Grid<RoomPiece>,
    style: RoomStyle,
    rotation: Rotation,
}

impl LayoutBuilder {
    fn new(width: i32, height: i32, style: RoomStyle) -> Self {
        LayoutBuilder {
            grid: Grid::new(width, height),
            style,
            rotation: Rotation::Deg0,
        }
    }

    fn width(&self) -> i32 {
        self.grid.width()
    }

    fn height(&self) -> i32 {
        self.grid.height()
    }

    fn put(&mut self, cell: Cell, piece_type: PieceType, rotation: Rotation) {
        self.grid
            .set(cell, RoomPiece::new(piece_type, rotation, cell, self.style));
    }

    fn piece_type_at(&self, cell: Cell) -> Option<PieceType> {
        self.grid.get(cell).map(|piece| piece.piece_type)
    }

    fn build_shell(&mut self, rng: &mut impl Rng) {
        let (width, height) = (self.width(), self.height());

        for cell in self.grid.coordinates() {
            let on_left = cell.x == 0;
            let on_right = cell.x == width - 1;
            let on_up = cell.y == 0;
            let on_down = cell.y == height - 1;

            let (piece_type, rotation) = match (on_up, on_down, on_left, on_right) {
                (true, _, true, _) => (PieceType::Corner, Self::corner_rotation(Direction::Up, Direction::Left)),
                (true, _, _, true) => (PieceType::Corner, Self::corner_rotation(Direction::Up, Direction::Right)),
                (_, true, true, _) => (PieceType::Corner, Self::corner_rotation(Direction::Down, Direction::Left)),
                (_, true, _, true) => (PieceType::Corner, Self::corner_rotation(Direction::Down, Direction::Right)),
                (true, ..) => (PieceType::Wall, Self::wall_rotation(Direction::Up)),
                (_, true, ..) => (PieceType::Wall, Self::wall_rotation(Direction::Down)),
                (_, _, true, _) => (PieceType::Wall, Self::wall_rotation(Direction::Left)),
                (_, _, _, true) => (PieceType::Wall, Self::wall_rotation(Direction::Right)),
                _ => (PieceType::Floor, Rotation::random(rng)),
            };

            self.put(cell, piece_type, rotation);
        }
    }

    // Walls face the edge they sit on.
    fn wall_rotation(edge: Direction) -> Rotation {
        match edge {
            Direction::Up => Rotation::Deg0,
            Direction::Left => Rotation::Deg90,
            Direction::Down => Rotation::Deg180,
            Direction::Right => Rotation::Deg270,
        }
    }

    fn corner_rotation(vertical: Direction, horizontal: Direction) -> Rotation {
        match (vertical, horizontal) {
            (Direction::Up, Direction::Left) => Rotation::Deg90,
            (Direction::Down, Direction::Left) => Rotation::Deg180,
            (Direction::Down, Direction::Right) => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    // Cells of a grid edge, ordered along the edge.
    fn edge_line(&self, edge: Direction) -> Vec<Cell> {
        let (width, height) = (self.width(), self.height());

        match edge {
            Direction::Up => (0..width).map(|x| Cell::new(x, 0)).collect(),
            Direction::Down => (0..width).map(|x| Cell::new(x, height - 1)).collect(),
            Direction::Left => (0..height).map(|y| Cell::new(0, y)).collect(),
            Direction::Right => (0..height).map(|y| Cell::new(width - 1, y)).collect(),
        }
    }

    // Step that moves from an edge towards the inside of the room.
    fn inward_step(edge: Direction) -> (i32, i32) {
        match edge {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (1, 0),
            Direction::Right => (-1, 0),
        }
    }
}

pub(crate) fn clamp_room_size(size: i32) -> i32 {
    size.clamp(MIN_ROOM_SIZE, MAX_ROOM_SIZE)
}

pub(crate) fn random_room_size(rng: &mut impl Rng) -> i32 {
    rng.random_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE)
}

pub(crate) fn log_layout(room: &Room) {
    if let Some(layout) = room.layout.as_ref() {
        event!(
            tracing::Level::TRACE,
            "Room {} laid out as {:?} {}x{} with {} pieces",
            room.id,
            layout.shape(),
            layout.width(),
            layout.height(),
            layout.grid().occupied()
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algos::RngHandler,
        constants::{DIRECTIONS, TEST_RANDOM_SEED},
        types::{DirectionSet, Room},
    };

    pub(super) fn doors_for(directions: DirectionSet) -> Vec<Door> {
        let mut counter = 0;
        Room::new(0, Cell::ORIGIN, RoomType::MainPath, directions, &mut counter)
            .doors()
            .to_vec()
    }

    pub(super) fn all_templates() -> Vec<DirectionSet> {
        (1..16u8)
            .map(|bits| {
                DIRECTIONS
                    .into_iter()
                    .filter(|direction| bits & direction.bit() != 0)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_plain_rectangle_counts() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let request = LayoutRequest {
            width: Some(5),
            height: Some(5),
            shape: Some(RoomShape::Rectangular),
            cut_style: Some(CutCornerStyle::None),
            pillar_style: Some(PillarStyle::None),
            ..Default::default()
        };

        let layout = RoomLayout::build(&[], RoomType::MainPath, &request, &mut rng);

        assert_eq!(layout.grid().occupied(), 25);
        assert_eq!(layout.count(PieceType::Corner), 4);
        assert_eq!(layout.count(PieceType::Wall), 12);
        assert_eq!(layout.count(PieceType::Floor), 9);
        assert_eq!(layout.spawn_cell(), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_sizes_are_clamped() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let request = LayoutRequest {
            width: Some(2),
            height: Some(40),
            shape: Some(RoomShape::Rectangular),
            ..Default::default()
        };

        let layout = RoomLayout::build(&[], RoomType::MainPath, &request, &mut rng);

        assert_eq!((layout.width(), layout.height()), (5, 7));
    }

    #[test]
    fn test_shell_rotations() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let request = LayoutRequest {
            width: Some(5),
            height: Some(5),
            shape: Some(RoomShape::Rectangular),
            cut_style: Some(CutCornerStyle::None),
            pillar_style: Some(PillarStyle::None),
            ..Default::default()
        };

        let layout = RoomLayout::build(&[], RoomType::MainPath, &request, &mut rng);
        let rotation_at = |x, y| layout.get(Cell::new(x, y)).map(|piece| piece.rotation);

        assert_eq!(rotation_at(0, 0), Some(Rotation::Deg90));
        assert_eq!(rotation_at(0, 4), Some(Rotation::Deg180));
        assert_eq!(rotation_at(4, 0), Some(Rotation::Deg0));
        assert_eq!(rotation_at(4, 4), Some(Rotation::Deg270));
        assert_eq!(rotation_at(2, 0), Some(Rotation::Deg0));
        assert_eq!(rotation_at(0, 2), Some(Rotation::Deg90));
        assert_eq!(rotation_at(2, 4), Some(Rotation::Deg180));
        assert_eq!(rotation_at(4, 2), Some(Rotation::Deg270));
    }

    #[test]
    fn test_layout_invariants_hold_for_every_template() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);

        for template in all_templates() {
            let doors = doors_for(template);

            for _ in 0..200 {
                let layout = RoomLayout::build(
                    &doors,
                    RoomType::MainPath,
                    &LayoutRequest::default(),
                    &mut rng,
                );

                assert_eq!(
                    layout.door_pieces().count(),
                    doors.len(),
                    "Door pieces must match the doors of {template} in a {:?}",
                    layout.shape()
                );

                for door in doors.iter() {
                    let Some(cell) = layout.door_cell(door.id) else {
                        panic!("Door {} missing in a {:?}", door.direction, layout.shape());
                    };

                    let (step_x, step_y) = LayoutBuilder::inward_step(door.direction);
                    assert!(
                        layout
                            .get(cell.offset_by(step_x, step_y))
                            .is_some_and(|piece| piece.is_walkable()),
                        "Door {} at {cell} of a {}x{} {:?} opens onto a blocked cell",
                        door.direction,
                        layout.width(),
                        layout.height(),
                        layout.shape()
                    );
                }

                for cell in layout.grid().coordinates() {
                    if layout.grid().is_boundary(cell) {
                        assert_ne!(
                            layout.get(cell).map(|piece| piece.piece_type),
                            Some(PieceType::Floor),
                            "Boundary cell {cell} of a {:?} is a floor",
                            layout.shape()
                        );
                    }
                }

                assert!(layout.spawn_cell().is_some());
            }
        }
    }

    #[test]
    fn test_doors_sit_on_their_edge() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let doors = doors_for(all_templates()[14]);

        for _ in 0..50 {
            let layout =
                RoomLayout::build(&doors, RoomType::Challenge, &LayoutRequest::default(), &mut rng);

            for door in doors.iter() {
                let cell = layout.door_cell(door.id).unwrap();
                let on_edge = match door.direction {
                    Direction::Up => cell.y == 0,
                    Direction::Down => cell.y == layout.height() - 1,
                    Direction::Left => cell.x == 0,
                    Direction::Right => cell.x == layout.width() - 1,
                };

                assert!(on_edge, "Door {} placed at {cell}", door.direction);
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let doors = doors_for(all_templates()[11]);

        let layout_a = RoomLayout::build(
            &doors,
            RoomType::MainPath,
            &LayoutRequest::default(),
            &mut RngHandler::seeded(42),
        );
        let layout_b = RoomLayout::build(
            &doors,
            RoomType::MainPath,
            &LayoutRequest::default(),
            &mut RngHandler::seeded(42),
        );

        assert_eq!(layout_a, layout_b);
    }
}
