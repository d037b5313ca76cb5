use super::PieceType;
use crate::{
    algos::placement::{EnemyCategory, EnemyKind, TrapKind},
    types::{RoomStyle, RoomType},
};

use rand::Rng;

/// The interchangeable models of one piece type. The first entry is the
/// clear model, without decorations or obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Palette {
    pub names: &'static [&'static str],
    // Chance, out of 100, of picking the clear model
    pub clear_weight: u32,
}

impl Palette {
    pub fn pick(&self, rng: &mut impl Rng) -> usize {
        if self.names.len() <= 1 || rng.random_range(0..100) < self.clear_weight {
            return 0;
        }

        rng.random_range(1..self.names.len())
    }
}

const ARCADE_CLEAR_WEIGHT: u32 = 70;

const fn arcade(names: &'static [&'static str]) -> Palette {
    Palette {
        names,
        clear_weight: ARCADE_CLEAR_WEIGHT,
    }
}

const ARCADE_FLOOR: Palette = arcade(&["floor", "floor-grate", "floor-cables", "floor-scorched"]);
const ARCADE_EMPTY_FLOOR: Palette = arcade(&["floor"]);
const ARCADE_WALL: Palette = arcade(&["wall", "wall-cabinet", "wall-poster", "wall-vent"]);
const ARCADE_CORNER: Palette = arcade(&["corner"]);
const ARCADE_INNER_CORNER: Palette = arcade(&["inner-corner"]);
const ARCADE_PILLAR: Palette = arcade(&["pillar", "pillar-claw-machine", "pillar-pinball"]);
const ARCADE_DOOR: Palette = arcade(&["door"]);
const ARCADE_CORNER_DOOR_LEFT: Palette = arcade(&["corner-door-left"]);
const ARCADE_CORNER_DOOR_RIGHT: Palette = arcade(&["corner-door-right"]);
const ARCADE_CORRIDOR_END: Palette = arcade(&["corridor-end"]);
const ARCADE_CORRIDOR_END_DOOR: Palette = arcade(&["corridor-end-door"]);
const ARCADE_CORRIDOR: Palette = arcade(&["corridor", "corridor-lights"]);

const ARCADE_ENEMIES: [EnemyKind; 6] = [
    EnemyKind::new("asteroid", EnemyCategory::Standard),
    EnemyKind::new("space-invader", EnemyCategory::Standard),
    EnemyKind::new("pac-man", EnemyCategory::Ghost),
    EnemyKind::new("pong-bat", EnemyCategory::Standard),
    EnemyKind::new("zoober", EnemyCategory::Standard),
    EnemyKind::new("gringo-hopps", EnemyCategory::Standard),
];

const ARCADE_BOSS: EnemyKind = EnemyKind::new("cowboy-boss", EnemyCategory::Boss);

const ARCADE_TRAPS: [TrapKind; 3] = [
    TrapKind::new("fist-punch"),
    TrapKind::new("spike-floor"),
    TrapKind::new("flame-vent"),
];

impl RoomStyle {
    // Pieces without a palette of their own are drawn as empty floor.
    pub(crate) fn palette(self, piece_type: PieceType) -> Palette {
        match self {
            RoomStyle::Arcade => match piece_type {
                PieceType::Floor => ARCADE_FLOOR,
                PieceType::Wall => ARCADE_WALL,
                PieceType::Corner => ARCADE_CORNER,
                PieceType::InnerCorner => ARCADE_INNER_CORNER,
                PieceType::Pillar => ARCADE_PILLAR,
                PieceType::Door => ARCADE_DOOR,
                PieceType::CornerDoorLeft => ARCADE_CORNER_DOOR_LEFT,
                PieceType::CornerDoorRight => ARCADE_CORNER_DOOR_RIGHT,
                PieceType::CorridorEnd => ARCADE_CORRIDOR_END,
                PieceType::CorridorEndDoor => ARCADE_CORRIDOR_END_DOOR,
                PieceType::CorridorPiece => ARCADE_CORRIDOR,
                PieceType::Block | PieceType::EmptyFloor => ARCADE_EMPTY_FLOOR,
            },
        }
    }

    pub(crate) fn piece_name(self, piece_type: PieceType, variant: usize) -> &'static str {
        let palette = self.palette(piece_type);

        palette
            .names
            .get(variant)
            .or(palette.names.first())
            .copied()
            .unwrap_or("floor")
    }

    // Material applied to the walls, floors and pillars of a room.
    pub fn surface_material(self, room_type: RoomType) -> &'static str {
        match self {
            RoomStyle::Arcade => match room_type {
                RoomType::Starting | RoomType::MainPath => "neon-standard",
                RoomType::Challenge => "neon-challenge",
                RoomType::Boss => "neon-boss",
            },
        }
    }

    // Doors and their signs are styled by the room they lead to.
    pub fn door_material(self, leads_to: Option<RoomType>) -> &'static str {
        match self {
            RoomStyle::Arcade => match leads_to {
                Some(RoomType::Starting | RoomType::MainPath) => "door-main-path",
                Some(RoomType::Challenge) => "door-challenge",
                Some(RoomType::Boss) => "door-boss",
                None => "door-next-level",
            },
        }
    }

    pub fn enemy_pool(self) -> &'static [EnemyKind] {
        match self {
            RoomStyle::Arcade => &ARCADE_ENEMIES,
        }
    }

    pub fn boss(self) -> EnemyKind {
        match self {
            RoomStyle::Arcade => ARCADE_BOSS,
        }
    }

    pub fn trap_pool(self) -> &'static [TrapKind] {
        match self {
            RoomStyle::Arcade => &ARCADE_TRAPS,
        }
    }

    pub fn power_up(self) -> &'static str {
        match self {
            RoomStyle::Arcade => "power-up-selector",
        }
    }
}
