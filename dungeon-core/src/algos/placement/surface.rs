use crate::{
    algos::{PieceType, RoomLayout},
    constants::MODEL_SCALE,
    types::{Cell, Vector2},
};

use std::cmp::Reverse;

use priority_queue::PriorityQueue;

/// Cells of a materialised room that agents can stand on.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkableSurface {
    origin: Vector2,
    width: i32,
    height: i32,
    walkable: Vec<bool>,
    // Plain floor cells not claimed by a trap
    floor: Vec<bool>,
}

/// Bakes the walkable surface of a room once its pieces are in place.
pub trait SurfaceBaker {
    fn bake(&self, layout: &RoomLayout, origin: Vector2, excluded: &[Cell]) -> WalkableSurface;
}

pub struct GridSurfaceBaker;

impl SurfaceBaker for GridSurfaceBaker {
    fn bake(&self, layout: &RoomLayout, origin: Vector2, excluded: &[Cell]) -> WalkableSurface {
        let (width, height) = (layout.width(), layout.height());
        let size = (width * height).max(0) as usize;

        let mut surface = WalkableSurface {
            origin,
            width,
            height,
            walkable: vec![false; size],
            floor: vec![false; size],
        };

        for piece in layout.pieces() {
            if excluded.contains(&piece.cell) {
                continue;
            }

            if let Some(idx) = surface.index(piece.cell) {
                surface.walkable[idx] = piece.is_walkable();
                surface.floor[idx] = piece.piece_type == PieceType::Floor;
            }
        }

        surface
    }
}

impl WalkableSurface {
    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width || cell.y >= self.height {
            return None;
        }

        Some((cell.y * self.width + cell.x) as usize)
    }

    // The layout cell whose piece covers `point`.
    pub fn cell_at(&self, point: Vector2) -> Option<Cell> {
        let cell = Cell::new(
            ((point.x - self.origin.x) / MODEL_SCALE).round() as i32,
            ((point.y - self.origin.y) / MODEL_SCALE).round() as i32,
        );

        self.index(cell).map(|_| cell)
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|idx| self.walkable[idx])
    }

    pub fn is_over_floor(&self, point: Vector2) -> bool {
        self.cell_at(point)
            .and_then(|cell| self.index(cell))
            .is_some_and(|idx| self.floor[idx])
    }

    pub fn walkable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
            .filter(|cell| self.is_walkable(*cell))
    }

    pub fn is_empty(&self) -> bool {
        !self.walkable.iter().any(|walkable| *walkable)
    }

    // Snaps `point` to the surface. Points already on a walkable cell are
    // kept as they are, otherwise the closest walkable cell centre within
    // `max_distance` is returned.
    pub fn nearest_walkable(&self, point: Vector2, max_distance: f32) -> Option<Vector2> {
        if self.cell_at(point).is_some_and(|cell| self.is_walkable(cell)) {
            return Some(point);
        }

        let mut candidates = PriorityQueue::new();

        for cell in self.walkable_cells() {
            let position = cell.to_world(self.origin);

            if point.distance(&position) <= max_distance {
                candidates.push(cell, Reverse((point.scalar_distance(&position), cell.y, cell.x)));
            }
        }

        candidates
            .pop()
            .map(|(cell, _)| cell.to_world(self.origin))
    }
}
