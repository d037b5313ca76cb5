use super::LayoutShape;
use crate::algos::room_layout::{LayoutBuilder, LayoutRequest, clamp_room_size, random_room_size};

use rand::rngs::StdRng;

pub(super) struct RectangularShape {
    pub square: bool,
}

impl LayoutShape for RectangularShape {
    fn dimensions(&self, request: &LayoutRequest, rng: &mut StdRng) -> (i32, i32) {
        let width = request.width.map(clamp_room_size).unwrap_or_else(|| random_room_size(rng));

        if self.square {
            let size = request.width.or(request.height).map(clamp_room_size).unwrap_or(width);
            return (size, size);
        }

        let height = request.height.map(clamp_room_size).unwrap_or_else(|| random_room_size(rng));

        (width, height)
    }

    fn carve(&self, builder: &mut LayoutBuilder, request: &LayoutRequest, rng: &mut StdRng) {
        builder.cut_corners(request, rng);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{algos::RngHandler, constants::TEST_RANDOM_SEED};

    #[test]
    fn test_square_uses_one_side() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let shape = RectangularShape { square: true };

        let request = LayoutRequest {
            height: Some(6),
            ..Default::default()
        };
        assert_eq!(shape.dimensions(&request, &mut rng), (6, 6));

        for _ in 0..20 {
            let (width, height) = shape.dimensions(&LayoutRequest::default(), &mut rng);
            assert_eq!(width, height);
            assert!((5..=7).contains(&width));
        }
    }
}
