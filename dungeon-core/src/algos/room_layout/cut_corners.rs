use super::{CutCornerStyle, LayoutBuilder, LayoutRequest, PieceType, Rotation};
use crate::{
    constants::{MIN_CORNER_SIZE, MIN_SPACE_AROUND_DOOR},
    types::{Cell, Direction},
};

use rand::{Rng, seq::SliceRandom};
use tracing::event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GridCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

const GRID_CORNERS: [GridCorner; 4] = [
    GridCorner::TopLeft,
    GridCorner::TopRight,
    GridCorner::BottomLeft,
    GridCorner::BottomRight,
];

impl GridCorner {
    fn vertical_edge(self) -> Direction {
        match self {
            GridCorner::TopLeft | GridCorner::TopRight => Direction::Up,
            GridCorner::BottomLeft | GridCorner::BottomRight => Direction::Down,
        }
    }

    fn horizontal_edge(self) -> Direction {
        match self {
            GridCorner::TopLeft | GridCorner::BottomLeft => Direction::Left,
            GridCorner::TopRight | GridCorner::BottomRight => Direction::Right,
        }
    }

    // Maps a cell of the top left frame onto this corner.
    fn to_grid(self, local: Cell, width: i32, height: i32) -> Cell {
        match self {
            GridCorner::TopLeft => local,
            GridCorner::TopRight => Cell::new(width - 1 - local.x, local.y),
            GridCorner::BottomLeft => Cell::new(local.x, height - 1 - local.y),
            GridCorner::BottomRight => Cell::new(width - 1 - local.x, height - 1 - local.y),
        }
    }
}

impl LayoutBuilder {
    pub(super) fn cut_corners(&mut self, request: &LayoutRequest, rng: &mut impl Rng) {
        let style = request.cut_style.unwrap_or_else(|| {
            [
                CutCornerStyle::None,
                CutCornerStyle::Straight,
                CutCornerStyle::Jagged,
            ][rng.random_range(0..3)]
        });

        if style == CutCornerStyle::None {
            return;
        }

        let max_x = (self.width() - MIN_SPACE_AROUND_DOOR) / 2;
        let max_y = (self.height() - MIN_SPACE_AROUND_DOOR) / 2;

        // Not enough room to keep a straight wall around the doors
        if max_x < MIN_CORNER_SIZE || max_y < MIN_CORNER_SIZE {
            return;
        }

        let size_x = Self::corner_size(request.corner_size_x, MIN_CORNER_SIZE, max_x, rng);
        let size_y = Self::corner_size(request.corner_size_y, MIN_CORNER_SIZE, max_y, rng);

        let count = request
            .corners_to_cut
            .map(|count| count.min(GRID_CORNERS.len()))
            .unwrap_or_else(|| rng.random_range(0..=GRID_CORNERS.len()));

        let mut corners = GRID_CORNERS;
        corners.shuffle(rng);

        for corner in corners.into_iter().take(count) {
            self.cut_corner(corner, size_x, size_y, style == CutCornerStyle::Jagged, rng);
        }
    }

    // Cuts a matching pair of corners deep enough to leave a single arm.
    pub(super) fn cut_t_junction(&mut self, request: &LayoutRequest, rng: &mut impl Rng) {
        let jagged = match request.cut_style {
            Some(CutCornerStyle::Jagged) => true,
            Some(CutCornerStyle::Straight) => false,
            _ => rng.random_bool(0.5),
        };

        let (width, height) = (self.width(), self.height());
        let (arm, side) = if width >= height { (width, height) } else { (height, width) };

        // An odd arm leaves a stem of one cell, later dug into a corridor, or
        // a stem wide enough for a framed door.
        let max_along = if arm % 2 == 1 {
            (arm - 1) / 2
        } else {
            (arm - MIN_SPACE_AROUND_DOOR) / 2
        };

        if max_along < MIN_CORNER_SIZE {
            event!(
                tracing::Level::WARN,
                "No stem fits a {}x{} T junction, keeping it rectangular",
                width,
                height
            );
            return;
        }

        let (requested_along, requested_depth) = if width >= height {
            (request.corner_size_x, request.corner_size_y)
        } else {
            (request.corner_size_y, request.corner_size_x)
        };

        let along = Self::corner_size(requested_along, MIN_CORNER_SIZE, max_along, rng);
        let depth = Self::corner_size(requested_depth, side / 2, side - MIN_SPACE_AROUND_DOOR, rng);

        let pair = match (width >= height, rng.random_bool(0.5)) {
            (true, true) => [GridCorner::TopLeft, GridCorner::TopRight],
            (true, false) => [GridCorner::BottomLeft, GridCorner::BottomRight],
            (false, true) => [GridCorner::TopLeft, GridCorner::BottomLeft],
            (false, false) => [GridCorner::TopRight, GridCorner::BottomRight],
        };

        for corner in pair {
            if width >= height {
                self.cut_corner(corner, along, depth, jagged, rng);
            } else {
                self.cut_corner(corner, depth, along, jagged, rng);
            }
        }
    }

    fn corner_size(requested: Option<i32>, min: i32, max: i32, rng: &mut impl Rng) -> i32 {
        let max = max.max(min);

        match requested {
            Some(size) => size.clamp(min, max),
            None => rng.random_range(min..=max),
        }
    }

    // Carves a `size_x` by `size_y` notch into a grid corner. The notch is
    // described in the top left frame and mirrored onto the other corners.
    pub(super) fn cut_corner(
        &mut self,
        corner: GridCorner,
        size_x: i32,
        size_y: i32,
        jagged: bool,
        rng: &mut impl Rng,
    ) {
        let (width, height) = (self.width(), self.height());

        if size_x < 1 || size_y < 1 || size_x >= width - 1 || size_y >= height - 1 {
            event!(
                tracing::Level::ERROR,
                "Refused a {}x{} corner cut in a {}x{} room",
                size_x,
                size_y,
                width,
                height
            );
            return;
        }

        let (vertical, horizontal) = (corner.vertical_edge(), corner.horizontal_edge());
        let corner_rotation = Self::corner_rotation(vertical, horizontal);
        let inner_rotation = Self::corner_rotation(vertical.opposite(), horizontal.opposite());
        let side_wall = Self::wall_rotation(horizontal);
        let end_wall = Self::wall_rotation(vertical);

        let (cx, cy) = (size_x, size_y);

        for ly in 0..=cy {
            for lx in 0..=cx {
                let cell = corner.to_grid(Cell::new(lx, ly), width, height);

                if (lx, ly) == (cx - 1, cy - 1) {
                    if jagged {
                        self.put(cell, PieceType::Corner, corner_rotation);
                    } else {
                        self.put(cell, PieceType::InnerCorner, inner_rotation);
                    }
                } else if (lx, ly) == (cx, 0) || (lx, ly) == (0, cy) {
                    self.put(cell, PieceType::Corner, corner_rotation);
                } else if (lx, ly) == (cx, cy - 1) || (lx, ly) == (cx - 1, cy) {
                    self.put(cell, PieceType::Floor, Rotation::random(rng));
                } else if lx == cx && ly < cy - 1 {
                    self.put(cell, PieceType::Wall, side_wall);
                } else if ly == cy && lx < cx - 1 {
                    self.put(cell, PieceType::Wall, end_wall);
                } else if lx < cx && ly < cy {
                    self.grid.take(cell);
                }
            }
        }
    }
}
