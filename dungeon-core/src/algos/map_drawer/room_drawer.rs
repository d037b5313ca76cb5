use svg::{
    Document,
    node::element::{Circle, Rectangle},
};

use super::DrawConfig;
use crate::{
    algos::{PieceMaterializer, PieceType, RoomPiece},
    constants::MODEL_SCALE,
    types::{DoorId, Dungeon, Room, RoomType, Vector2},
};

const NIGHT_BLUE: &str = "#101030";
const DEEP_BLUE: &str = "#0000e0";
const CYAN_BLUE: &str = "#00c8c8";
const LIGHT_GRAY: &str = "#c0c0c0";
const YELLOW: &str = "#f8f800";

/// Draws a room top down, one square per piece, by materialising it into
/// an SVG document.
pub(crate) struct RoomDrawer {
    width: u32,
    height: u32,
    piece_size: u32,
    margin: u32,
    // Type of the room behind each door, styles pick door materials by it
    door_targets: Vec<(DoorId, Option<RoomType>)>,
    pieces: Vec<Rectangle>,
    markers: Vec<Circle>,
}

impl RoomDrawer {
    pub(crate) fn new(dungeon: &Dungeon, room: &Room, config: &DrawConfig) -> Self {
        let (width, height) = room
            .layout
            .as_ref()
            .map_or((0, 0), |layout| (layout.width() as u32, layout.height() as u32));

        RoomDrawer {
            width,
            height,
            piece_size: config.piece_size,
            margin: config.margin,
            door_targets: room
                .doors()
                .iter()
                .map(|door| (door.id, dungeon.connected_room_type(door)))
                .collect(),
            pieces: Vec::with_capacity((width * height) as usize),
            markers: Vec::new(),
        }
    }

    fn color(piece_type: PieceType) -> &'static str {
        match piece_type {
            PieceType::Floor | PieceType::EmptyFloor | PieceType::CorridorPiece => NIGHT_BLUE,
            PieceType::Wall
            | PieceType::Corner
            | PieceType::InnerCorner
            | PieceType::CorridorEnd => LIGHT_GRAY,
            PieceType::Pillar => CYAN_BLUE,
            PieceType::Block => DEEP_BLUE,
            PieceType::Door
            | PieceType::CornerDoorLeft
            | PieceType::CornerDoorRight
            | PieceType::CorridorEndDoor => YELLOW,
        }
    }

    // Pixel position of the centre of a world point inside `room`.
    fn to_pixels(&self, room: &Room, position: Vector2) -> (f32, f32) {
        let size = self.piece_size as f32;
        let offset = (self.margin + self.piece_size) as f32 / 2.0;

        (
            (position.x - room.origin.x) / MODEL_SCALE * size + offset,
            (position.y - room.origin.y) / MODEL_SCALE * size + offset,
        )
    }

    // Marks a placed actor with a dot.
    pub(crate) fn mark(&mut self, room: &Room, position: Vector2, color: &str) {
        let (x, y) = self.to_pixels(room, position);

        self.markers.push(
            Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", self.piece_size / 4)
                .set("fill", color),
        );
    }

    pub(crate) fn finish(self) -> Document {
        let mut document = Document::new()
            .set("width", self.width * self.piece_size + self.margin)
            .set("height", self.height * self.piece_size + self.margin);

        for piece in self.pieces.into_iter() {
            document = document.add(piece);
        }

        for marker in self.markers.into_iter() {
            document = document.add(marker);
        }

        document
    }
}

impl PieceMaterializer for RoomDrawer {
    fn materialize(&mut self, room: &Room, piece: &RoomPiece, position: Vector2) {
        let (x, y) = self.to_pixels(room, position);
        let half = self.piece_size as f32 / 2.0;

        let material = match piece.door {
            Some(door) => piece.style.door_material(
                self.door_targets
                    .iter()
                    .find(|(id, _)| *id == door)
                    .and_then(|(_, target)| *target),
            ),
            None => piece.style.surface_material(room.room_type),
        };

        self.pieces.push(
            Rectangle::new()
                .set("x", x - half)
                .set("y", y - half)
                .set("width", self.piece_size)
                .set("height", self.piece_size)
                .set("fill", Self::color(piece.piece_type))
                .set("data-model", piece.model_name())
                .set("data-material", material)
                .set("data-rotation", piece.rotation.degrees()),
        );
    }
}
