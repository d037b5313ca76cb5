use super::{LayoutBuilder, PieceType};
use crate::{
    constants::DIRECTIONS,
    types::{Cell, Direction},
};

impl LayoutBuilder {
    // Edge pieces left without edge neighbours turn into the end of a one
    // cell wide corridor leading into the room.
    pub(super) fn collapse_corridors(&mut self) {
        for edge in DIRECTIONS {
            let line = self.edge_line(edge);
            let inward = Self::inward_step(edge);
            let side = (inward.1, inward.0);

            for window in line.windows(3) {
                let [before, cell, after] = [window[0], window[1], window[2]];

                let Some(piece_type) = self.piece_type_at(cell) else {
                    continue;
                };

                if piece_type.is_corridor()
                    || self.grid.get(before).is_some()
                    || self.grid.get(after).is_some()
                {
                    continue;
                }

                let end_type = match piece_type {
                    piece_type if piece_type.is_door() => PieceType::CorridorEndDoor,
                    PieceType::Wall | PieceType::Corner => PieceType::CorridorEnd,
                    _ => continue,
                };

                if let Some(piece) = self.grid.get_mut(cell) {
                    piece.piece_type = end_type;
                    piece.rotation = Self::wall_rotation(edge);
                }

                self.dig_corridor(cell.offset_by(inward.0, inward.1), inward, side, edge);
            }
        }
    }

    fn dig_corridor(
        &mut self,
        mut cell: Cell,
        inward: (i32, i32),
        side: (i32, i32),
        edge: Direction,
    ) {
        while let Some(piece_type) = self.piece_type_at(cell) {
            if matches!(piece_type, PieceType::Floor | PieceType::EmptyFloor) {
                break;
            }

            self.grid.take(cell.offset_by(side.0, side.1));
            self.grid.take(cell.offset_by(-side.0, -side.1));

            if let Some(piece) = self.grid.get_mut(cell) {
                piece.piece_type = PieceType::CorridorPiece;
                piece.rotation = Self::wall_rotation(edge);
            }

            cell = cell.offset_by(inward.0, inward.1);
        }

        // Keep the mouth of the corridor clear
        for _ in 0..2 {
            if let Some(piece) = self.grid.get_mut(cell) {
                if piece.piece_type == PieceType::Floor {
                    piece.piece_type = PieceType::EmptyFloor;
                }
            }
            cell = cell.offset_by(inward.0, inward.1);
        }
    }
}
