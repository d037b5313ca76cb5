use crate::types::{Cell, DoorId, RoomStyle};

use std::fmt::{Display, Formatter};

use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceType {
    Floor,
    Wall,
    Pillar,
    Door,
    Corner,
    CornerDoorLeft,
    CornerDoorRight,
    InnerCorner,
    CorridorEnd,
    CorridorEndDoor,
    CorridorPiece,
    Block,
    EmptyFloor,
}

impl PieceType {
    pub fn is_door(self) -> bool {
        matches!(
            self,
            PieceType::Door
                | PieceType::CornerDoorLeft
                | PieceType::CornerDoorRight
                | PieceType::CorridorEndDoor
        )
    }

    pub fn is_walkable(self) -> bool {
        self.is_door()
            || matches!(
                self,
                PieceType::Floor | PieceType::EmptyFloor | PieceType::CorridorPiece
            )
    }

    pub fn is_corridor(self) -> bool {
        matches!(
            self,
            PieceType::CorridorEnd | PieceType::CorridorEndDoor | PieceType::CorridorPiece
        )
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Rotation of a piece around its vertical axis, counter clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    fn quarter_turns(self) -> usize {
        (self.degrees() / 90) as usize
    }

    // A clockwise grid turn takes 90° off the piece rotation.
    pub fn turned_clockwise(self, turns: u8) -> Self {
        Self::ALL[(self.quarter_turns() + 4 - (turns as usize % 4)) % 4]
    }

    pub(crate) fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomPiece {
    pub piece_type: PieceType,
    pub rotation: Rotation,
    pub cell: Cell,
    pub style: RoomStyle,
    // Index in the style palette for this piece type
    pub variant: usize,
    // The door this piece stands for, door pieces only
    pub door: Option<DoorId>,
}

impl RoomPiece {
    pub(crate) fn new(piece_type: PieceType, rotation: Rotation, cell: Cell, style: RoomStyle) -> Self {
        RoomPiece {
            piece_type,
            rotation,
            cell,
            style,
            variant: 0,
            door: None,
        }
    }

    pub fn is_door(&self) -> bool {
        self.piece_type.is_door()
    }

    pub fn is_walkable(&self) -> bool {
        self.piece_type.is_walkable()
    }

    // The palette entry the host should instantiate for this piece.
    pub fn model_name(&self) -> &'static str {
        self.style.piece_name(self.piece_type, self.variant)
    }
}
