use super::{Grid, LayoutBuilder, PieceType, RoomPiece, Rotation};
use crate::{
    constants::BOSS_ROOM_SIZE,
    types::{Cell, Direction, Door, RoomStyle},
};

use rand::Rng;
use tracing::event;

// The arena is authored with its only door on the left wall.
const TEMPLATE_DOOR: Direction = Direction::Left;
const TEMPLATE_DOOR_CELL: Cell = Cell::new(0, BOSS_ROOM_SIZE / 2);

const DAIS: [Cell; 6] = [
    Cell::new(6, 3),
    Cell::new(7, 3),
    Cell::new(6, 4),
    Cell::new(7, 4),
    Cell::new(6, 5),
    Cell::new(7, 5),
];

const PILLARS: [Cell; 4] = [
    Cell::new(3, 3),
    Cell::new(3, 5),
    Cell::new(6, 1),
    Cell::new(6, 7),
];

pub(super) fn build(door: Option<Door>, style: RoomStyle, rng: &mut impl Rng) -> LayoutBuilder {
    let mut builder = LayoutBuilder::new(BOSS_ROOM_SIZE, BOSS_ROOM_SIZE, style);
    builder.build_shell(rng);

    for cell in DAIS {
        builder.put(cell, PieceType::Block, Rotation::Deg0);
    }

    for cell in PILLARS {
        builder.put(cell, PieceType::Pillar, Rotation::random(rng));
    }

    builder.put(
        TEMPLATE_DOOR_CELL,
        PieceType::Door,
        LayoutBuilder::wall_rotation(TEMPLATE_DOOR),
    );

    let Some(door) = door else {
        event!(
            tracing::Level::ERROR,
            "Boss room built without a door, keeping the template orientation"
        );
        return builder;
    };

    if let Some(piece) = builder.grid.get_mut(TEMPLATE_DOOR_CELL) {
        piece.door = Some(door.id);
    }

    let turns = TEMPLATE_DOOR.clockwise_turns_to(door.direction);
    for _ in 0..turns {
        builder.grid = turned_clockwise(&builder.grid);
    }
    builder.rotation = Rotation::Deg0.turned_clockwise(turns);

    builder
}

fn turned_clockwise(grid: &Grid<RoomPiece>) -> Grid<RoomPiece> {
    let size = grid.width();
    let mut turned = Grid::new(grid.height(), size);

    for piece in grid.iter() {
        let cell = Cell::new(grid.height() - 1 - piece.cell.y, piece.cell.x);

        turned.set(
            cell,
            RoomPiece {
                cell,
                rotation: piece.rotation.turned_clockwise(1),
                ..*piece
            },
        );
    }

    debug_assert_eq!(turned.occupied(), grid.occupied(), "Turning lost pieces of a {size} wide room");

    turned
}
