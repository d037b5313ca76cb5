use super::{LayoutBuilder, PieceType, PillarStyle, Rotation};
use crate::{constants::MIN_SIZE_FOR_PILLARS, types::Cell};

use rand::Rng;

impl LayoutBuilder {
    pub(super) fn add_pillars(&mut self, pillar_style: PillarStyle, rng: &mut impl Rng) {
        match pillar_style {
            PillarStyle::None => {}
            PillarStyle::Square => self.place_pillars_square(),
            PillarStyle::Rows => self.place_pillars_rows(rng),
        }
    }

    fn place_pillars_square(&mut self) {
        let (width, height) = (self.width(), self.height());

        if width < MIN_SIZE_FOR_PILLARS || height < MIN_SIZE_FOR_PILLARS {
            return;
        }

        let distance_x = (width - 2) / 3;
        let distance_y = (height - 2) / 3;

        let far_x = width - distance_x - 1;
        let far_y = height - distance_y - 1;

        self.try_place_pillar(Cell::new(distance_x, distance_y), Rotation::Deg180);
        self.try_place_pillar(Cell::new(far_x, distance_y), Rotation::Deg270);
        self.try_place_pillar(Cell::new(distance_x, far_y), Rotation::Deg90);
        self.try_place_pillar(Cell::new(far_x, far_y), Rotation::Deg0);
    }

    // Two lines of pillars a third of the way in along the long axis.
    fn place_pillars_rows(&mut self, rng: &mut impl Rng) {
        let (width, height) = (self.width(), self.height());

        if width >= height {
            let top_y = (height - 2) / 3;
            let bottom_y = height - top_y - 1;

            for x in (2..width - 2).step_by(2) {
                self.try_place_pillar(Cell::new(x, top_y), Rotation::Deg180);
                self.try_place_pillar(Cell::new(x, bottom_y), Rotation::Deg90);
            }
        } else {
            let space = rng.random_range(2..=3);
            let left_x = (width - 2) / 3;
            let right_x = width - left_x - 1;

            for y in (space..height - 2).step_by(space as usize) {
                self.try_place_pillar(Cell::new(left_x, y), Rotation::Deg180);
                self.try_place_pillar(Cell::new(right_x, y), Rotation::Deg270);
            }
        }
    }

    fn try_place_pillar(&mut self, cell: Cell, rotation: Rotation) {
        if self.piece_type_at(cell) != Some(PieceType::Floor) || self.crowds_pillar(cell) {
            return;
        }

        if let Some(piece) = self.grid.get_mut(cell) {
            piece.piece_type = PieceType::Pillar;
            piece.rotation = rotation;
        }
    }

    // Pillars must not block inner corners or door mouths.
    fn crowds_pillar(&self, cell: Cell) -> bool {
        (-1..=1).any(|dy| {
            (-1..=1).any(|dx| {
                self.piece_type_at(cell.offset_by(dx, dy))
                    .is_some_and(|piece_type| piece_type == PieceType::InnerCorner || piece_type.is_door())
            })
        })
    }
}
