use crate::types::{Cell, Direction, DoorId, RoomId};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no room template fits a {direction} door at {position} after {attempts} attempts")]
    PlacementExhausted {
        direction: Direction,
        position: Cell,
        attempts: u32,
    },

    #[error("no room template has a {0} door")]
    MissingTemplate(Direction),

    #[error("door {door} of room {room} is not paired with a reciprocal door")]
    DoorMismatch { room: RoomId, door: DoorId },

    #[error("no walkable surface found near the spawn point of room {0}")]
    NoWalkableSurface(RoomId),

    #[error("room {0} does not exist in this dungeon")]
    UnknownRoom(RoomId),

    #[error("door {0} does not exist in this dungeon")]
    UnknownDoor(DoorId),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
