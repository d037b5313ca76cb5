use super::{LayoutBuilder, LayoutRequest, RoomShape, clamp_room_size, random_room_size};

use rand::rngs::StdRng;

mod donut;
mod rectangular;
mod t_junction;

pub(super) trait LayoutShape {
    fn dimensions(&self, request: &LayoutRequest, rng: &mut StdRng) -> (i32, i32) {
        let width = request.width.map(clamp_room_size).unwrap_or_else(|| random_room_size(rng));
        let height = request.height.map(clamp_room_size).unwrap_or_else(|| random_room_size(rng));

        (width, height)
    }

    // Shape specific changes applied to the plain shell, before any door.
    fn carve(&self, builder: &mut LayoutBuilder, request: &LayoutRequest, rng: &mut StdRng);

    fn allows_pillars(&self) -> bool {
        true
    }
}

pub(super) struct LayoutShapeFactory;

impl LayoutShapeFactory {
    pub(super) fn shape_for(shape: RoomShape) -> Box<dyn LayoutShape> {
        match shape {
            RoomShape::Rectangular | RoomShape::Boss => Box::new(rectangular::RectangularShape { square: false }),
            RoomShape::Square => Box::new(rectangular::RectangularShape { square: true }),
            RoomShape::TJunction => Box::new(t_junction::TJunctionShape),
            RoomShape::Donut => Box::new(donut::DonutShape),
        }
    }
}
