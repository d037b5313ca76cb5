use super::LayoutShape;
use crate::{
    algos::room_layout::{LayoutBuilder, LayoutRequest, clamp_room_size, random_room_size},
    constants::MAX_ROOM_SIZE,
};

use rand::rngs::StdRng;

// The two corners left untouched stay square.
pub(super) struct TJunctionShape;

impl LayoutShape for TJunctionShape {
    // The arm is always odd so the stem between the notches is centred on
    // the door cell.
    fn dimensions(&self, request: &LayoutRequest, rng: &mut StdRng) -> (i32, i32) {
        let width = request.width.map(clamp_room_size).unwrap_or_else(|| random_room_size(rng));
        let height = request.height.map(clamp_room_size).unwrap_or_else(|| random_room_size(rng));
        let odd = |len: i32| (len | 1).min(MAX_ROOM_SIZE);

        if width >= height {
            (odd(width), height)
        } else {
            (width, odd(height))
        }
    }

    fn carve(&self, builder: &mut LayoutBuilder, request: &LayoutRequest, rng: &mut StdRng) {
        builder.cut_t_junction(request, rng);
    }
}

#[cfg(test)]
mod test {
    use crate::{
        algos::{
            RngHandler,
            room_layout::{LayoutBuilder, LayoutRequest, PieceType, RoomLayout, RoomShape, test::doors_for},
        },
        constants::{DIRECTIONS, MAX_ROOM_SIZE, TEST_RANDOM_SEED},
        types::{Cell, RoomType},
    };

    #[test]
    fn test_t_junction_removes_a_pair_of_corners() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let request = LayoutRequest {
            shape: Some(RoomShape::TJunction),
            ..Default::default()
        };

        for _ in 0..30 {
            let layout = RoomLayout::build(&[], RoomType::MainPath, &request, &mut rng);
            let (width, height) = (layout.width(), layout.height());

            let missing = [
                Cell::new(0, 0),
                Cell::new(width - 1, 0),
                Cell::new(0, height - 1),
                Cell::new(width - 1, height - 1),
            ]
            .into_iter()
            .filter(|cell| layout.get(*cell).is_none())
            .count();

            assert_eq!(missing, 2, "A T junction cuts exactly two grid corners");
            assert!(layout.count(PieceType::Floor) + layout.count(PieceType::EmptyFloor) > 0);
        }
    }

    #[test]
    fn test_t_junction_stem_keeps_its_doors_open() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let doors = doors_for(DIRECTIONS.into_iter().collect());

        for (width, height) in [(5, 5), (6, 5), (6, 6), (5, 6), (7, 7)] {
            let request = LayoutRequest {
                width: Some(width),
                height: Some(height),
                shape: Some(RoomShape::TJunction),
                ..Default::default()
            };

            for _ in 0..20 {
                let layout = RoomLayout::build(&doors, RoomType::MainPath, &request, &mut rng);

                let arm = layout.width().max(layout.height());
                assert_eq!(arm % 2, 1, "The arm of a {width}x{height} request must be odd");
                assert!(arm <= MAX_ROOM_SIZE);

                for door in doors.iter() {
                    let cell = layout.door_cell(door.id).unwrap();
                    let (step_x, step_y) = LayoutBuilder::inward_step(door.direction);

                    assert!(
                        layout
                            .get(cell.offset_by(step_x, step_y))
                            .is_some_and(|piece| piece.is_walkable()),
                        "Door {} at {cell} of a {}x{} T junction is walled in",
                        door.direction,
                        layout.width(),
                        layout.height()
                    );
                }
            }
        }
    }
}
