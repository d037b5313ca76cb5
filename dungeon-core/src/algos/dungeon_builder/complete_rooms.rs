use super::{DungeonBuilder, templates::ROOM_TEMPLATES};
use crate::{
    session::GenerationSession,
    types::{Cell, DirectionSet, RoomId, RoomType},
};

use std::collections::HashSet;

use tracing::event;

impl DungeonBuilder {
    // Depth first walk from `room_id` that hangs a challenge room behind
    // every dangling door. Branch depth restarts at every main path room.
    pub(super) fn complete_rooms(
        &mut self,
        room_id: RoomId,
        depth: usize,
        visited: &mut HashSet<Cell>,
        session: &mut GenerationSession,
    ) {
        let position = self.rooms[room_id].position;
        visited.insert(position);

        let doors = self.rooms[room_id].doors().to_vec();

        for door in doors {
            let target = door.direction.next_position(position);

            if visited.contains(&target) {
                continue;
            }

            let next = match door.leads_to {
                Some(next) => next,
                None => {
                    let back = door.direction.opposite();

                    let template = if depth + 1 >= self.config.max_branch_depth {
                        DirectionSet::single(back)
                    } else {
                        self.select_template(back, &ROOM_TEMPLATES, target, &mut session.rng)
                            .unwrap_or_else(|err| {
                                event!(
                                    tracing::Level::WARN,
                                    "Closing branch at {} with a dead end: {}",
                                    target,
                                    err
                                );
                                DirectionSet::single(back)
                            })
                    };

                    let next = self.place_room(
                        target,
                        RoomType::Challenge,
                        template,
                        &mut session.next_door_id,
                    );
                    self.connect(room_id, door.direction, next);

                    next
                }
            };

            let next_depth = if self.rooms[next].on_main_path {
                0
            } else {
                depth + 1
            };

            self.complete_rooms(next, next_depth, visited, session);
        }
    }
}
