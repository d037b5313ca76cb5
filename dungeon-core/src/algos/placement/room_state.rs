use crate::types::{Room, RoomId, RoomType};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoomEvent {
    EnemiesRemaining(usize),
    Cleared { power_up: Option<&'static str> },
    BossRoomEntered,
}

/// Combat progress of a populated room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomState {
    room: RoomId,
    room_type: RoomType,
    remaining: usize,
    power_up: Option<&'static str>,
}

impl RoomState {
    pub fn new(room: &Room, enemies: usize, power_up: &'static str) -> Self {
        RoomState {
            room: room.id,
            room_type: room.room_type,
            remaining: enemies,
            power_up: (room.room_type == RoomType::Challenge).then_some(power_up),
        }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn remaining_enemies(&self) -> usize {
        self.remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining == 0
    }

    // Doors stay locked while enemies are alive.
    pub fn doors_usable(&self) -> bool {
        self.is_cleared()
    }

    pub fn enter(&self) -> Option<RoomEvent> {
        (self.room_type == RoomType::Boss).then_some(RoomEvent::BossRoomEntered)
    }

    // The power-up drops only once, on the kill that clears the room.
    pub fn enemy_killed(&mut self) -> RoomEvent {
        if self.remaining == 0 {
            return RoomEvent::Cleared { power_up: None };
        }

        self.remaining -= 1;

        if self.remaining == 0 {
            RoomEvent::Cleared {
                power_up: self.power_up.take(),
            }
        } else {
            RoomEvent::EnemiesRemaining(self.remaining)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Cell, DirectionSet, Direction};

    fn room(room_type: RoomType) -> Room {
        let mut next_door_id = 0;
        Room::new(
            4,
            Cell::new(1, 2),
            room_type,
            DirectionSet::single(Direction::Left),
            &mut next_door_id,
        )
    }

    #[test]
    fn test_challenge_room_drops_power_up_once() {
        let mut state = RoomState::new(&room(RoomType::Challenge), 2, "power-up");

        assert!(!state.doors_usable());
        assert_eq!(state.enemy_killed(), RoomEvent::EnemiesRemaining(1));
        assert_eq!(
            state.enemy_killed(),
            RoomEvent::Cleared {
                power_up: Some("power-up")
            }
        );
        assert!(state.doors_usable());
        assert_eq!(state.enemy_killed(), RoomEvent::Cleared { power_up: None });
    }

    #[test]
    fn test_main_path_room_has_no_power_up() {
        let mut state = RoomState::new(&room(RoomType::MainPath), 1, "power-up");

        assert_eq!(state.enter(), None);
        assert_eq!(state.enemy_killed(), RoomEvent::Cleared { power_up: None });
    }

    #[test]
    fn test_entering_boss_room() {
        let state = RoomState::new(&room(RoomType::Boss), 1, "power-up");

        assert_eq!(state.enter(), Some(RoomEvent::BossRoomEntered));
        assert_eq!(state.room(), 4);
    }

    #[test]
    fn test_empty_room_is_open() {
        let state = RoomState::new(&room(RoomType::MainPath), 0, "power-up");

        assert!(state.is_cleared());
        assert!(state.doors_usable());
    }
}
