use super::LayoutShape;
use crate::{
    algos::room_layout::{LayoutBuilder, LayoutRequest, PieceType, Rotation},
    constants::DONUT_PATH_WIDTH,
    types::Cell,
};

use rand::rngs::StdRng;

pub(super) struct DonutShape;

impl LayoutShape for DonutShape {
    // Fills the middle of the room, leaving a ring to walk around it.
    fn carve(&self, builder: &mut LayoutBuilder, _request: &LayoutRequest, _rng: &mut StdRng) {
        let path_width = DONUT_PATH_WIDTH;

        for y in path_width..builder.height() - path_width {
            for x in path_width..builder.width() - path_width {
                builder.put(Cell::new(x, y), PieceType::Block, Rotation::Deg0);
            }
        }
    }

    fn allows_pillars(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod test {
    use crate::{
        algos::{
            RngHandler,
            room_layout::{LayoutRequest, PieceType, RoomLayout, RoomShape},
        },
        constants::TEST_RANDOM_SEED,
        types::RoomType,
    };

    #[test]
    fn test_donut_block() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let request = LayoutRequest {
            width: Some(7),
            height: Some(7),
            shape: Some(RoomShape::Donut),
            ..Default::default()
        };

        let layout = RoomLayout::build(&[], RoomType::Challenge, &request, &mut rng);

        assert_eq!(layout.count(PieceType::Block), 9);
        assert_eq!(layout.grid().occupied() - layout.count(PieceType::Block), 40);
        assert_eq!(layout.count(PieceType::Floor), 16, "The ring is two cells wide");
        assert_eq!(layout.count(PieceType::Pillar), 0);
    }
}
