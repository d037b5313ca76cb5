use super::{LayoutBuilder, PieceType, RoomPiece};
use crate::types::{Cell, Direction, Door};

use tracing::event;

impl LayoutBuilder {
    pub(super) fn place_doors(&mut self, doors: &[Door]) {
        for door in doors.iter() {
            let Some(cell) = self.door_cell_on(door.direction) else {
                event!(
                    tracing::Level::ERROR,
                    "No cell left on the {} edge for door {}",
                    door.direction,
                    door.id
                );
                continue;
            };

            let piece_type = self.door_type_at(cell, door.direction);

            self.grid.set(
                cell,
                RoomPiece {
                    door: Some(door.id),
                    ..RoomPiece::new(piece_type, Self::wall_rotation(door.direction), cell, self.style)
                },
            );
        }
    }

    // The middle of the edge when it opens onto walkable ground, otherwise
    // the middle of the longest run of edge cells that does.
    fn door_cell_on(&self, edge: Direction) -> Option<Cell> {
        let line = self.edge_line(edge);
        let midpoint = *line.get(line.len() / 2)?;

        if self.opens_inwards(midpoint, edge) {
            return Some(midpoint);
        }

        Self::middle_of_longest_run(&line, |cell| self.opens_inwards(cell, edge)).or_else(|| {
            event!(
                tracing::Level::WARN,
                "No cell on the {} edge opens onto the floor",
                edge
            );
            Self::middle_of_longest_run(&line, |cell| self.grid.get(cell).is_some())
        })
    }

    // A lone edge cell counts as open, it is dug into a corridor later.
    fn opens_inwards(&self, cell: Cell, edge: Direction) -> bool {
        let (step_x, step_y) = Self::inward_step(edge);
        let (before, after) = (cell.offset_by(-step_y, -step_x), cell.offset_by(step_y, step_x));

        let lone = [before, after]
            .into_iter()
            .all(|side| self.grid.contains(side) && self.grid.get(side).is_none());

        self.grid.get(cell).is_some()
            && (lone
                || self
                    .grid
                    .get(cell.offset_by(step_x, step_y))
                    .is_some_and(|piece| piece.is_walkable()))
    }

    fn middle_of_longest_run(line: &[Cell], mut accept: impl FnMut(Cell) -> bool) -> Option<Cell> {
        let mut best: Option<(usize, usize)> = None;
        let mut run_start = None;

        for (idx, cell) in line.iter().enumerate() {
            match (accept(*cell), run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start)) => {
                    Self::keep_longest(&mut best, start, idx - start);
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some(start) = run_start {
            Self::keep_longest(&mut best, start, line.len() - start);
        }

        best.map(|(start, len)| line[start + len / 2])
    }

    fn keep_longest(best: &mut Option<(usize, usize)>, start: usize, len: usize) {
        if best.is_none_or(|(_, best_len)| len > best_len) {
            *best = Some((start, len));
        }
    }

    // Door pieces next to a missing edge neighbour become corner doors,
    // named after the side where the wall remains, looking out.
    fn door_type_at(&self, cell: Cell, edge: Direction) -> PieceType {
        let (step_x, step_y) = if edge.is_horizontal() { (0, 1) } else { (1, 0) };

        let minus_missing = self.grid.get(cell.offset_by(-step_x, -step_y)).is_none();
        let plus_missing = self.grid.get(cell.offset_by(step_x, step_y)).is_none();

        let (minus_side, plus_side) = match edge {
            Direction::Up | Direction::Right => (PieceType::CornerDoorRight, PieceType::CornerDoorLeft),
            Direction::Down | Direction::Left => (PieceType::CornerDoorLeft, PieceType::CornerDoorRight),
        };

        if minus_missing {
            minus_side
        } else if plus_missing {
            plus_side
        } else {
            PieceType::Door
        }
    }
}
