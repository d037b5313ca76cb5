use super::{DungeonBuilder, templates};
use crate::{
    error::{GenerationError, GenerationResult},
    session::GenerationSession,
    types::{Direction, DirectionSet, RoomId, RoomType},
};

use rand::Rng;
use tracing::event;

impl DungeonBuilder {
    // Chains open rooms from the starting room until the path holds
    // `path_length` rooms, then closes it with the boss room. Returns the
    // boss room id.
    pub(super) fn build_main_path(
        &mut self,
        path_length: usize,
        session: &mut GenerationSession,
    ) -> GenerationResult<RoomId> {
        let open_templates = templates::open_templates();

        let mut current = self.main_path[0];
        let mut arrival = None;

        while self.main_path.len() < path_length {
            let exit = self.random_exit(current, arrival, &mut session.rng)?;
            let position = exit.next_position(self.rooms[current].position);

            let template =
                self.select_template(exit.opposite(), &open_templates, position, &mut session.rng)?;

            let next = self.place_room(
                position,
                RoomType::MainPath,
                template,
                &mut session.next_door_id,
            );
            self.rooms[next].on_main_path = true;
            self.connect(current, exit, next);
            self.main_path.push(next);

            event!(
                tracing::Level::TRACE,
                "Main path room {} placed {} of room {}",
                self.rooms[next],
                exit,
                current
            );

            arrival = Some(exit.opposite());
            current = next;
        }

        let exit = self.random_exit(current, arrival, &mut session.rng)?;
        let position = exit.next_position(self.rooms[current].position);

        let boss = self.place_room(
            position,
            RoomType::Boss,
            DirectionSet::single(exit.opposite()),
            &mut session.next_door_id,
        );
        self.connect(current, exit, boss);

        Ok(boss)
    }

    // A random door of the room other than the one we came through.
    fn random_exit(
        &self,
        room: RoomId,
        arrival: Option<Direction>,
        rng: &mut impl Rng,
    ) -> GenerationResult<Direction> {
        let exits = self.rooms[room]
            .directions()
            .iter()
            .filter(|direction| Some(*direction) != arrival)
            .collect::<Vec<_>>();

        if exits.is_empty() {
            return Err(GenerationError::MissingTemplate(
                arrival.map_or(Direction::Up, Direction::opposite),
            ));
        }

        Ok(exits[rng.random_range(0..exits.len())])
    }
}

#[cfg(test)]
mod test {
    use super::super::test::test_builds;
    use crate::{algos::DungeonBuilderConfig, types::RoomType};

    #[test]
    fn test_main_path_never_leaves_through_arrival() {
        for dungeon in test_builds(DungeonBuilderConfig::default()) {
            let path = dungeon.main_path();

            for triple in path.windows(3) {
                let middle = dungeon.room(triple[1]).unwrap();
                let arrival = middle
                    .doors()
                    .iter()
                    .find(|door| door.leads_to == Some(triple[0]))
                    .unwrap();
                let departure = middle
                    .doors()
                    .iter()
                    .find(|door| door.leads_to == Some(triple[2]))
                    .unwrap();

                assert_ne!(arrival.direction, departure.direction);
                assert_eq!(middle.room_type, RoomType::MainPath);
            }
        }
    }
}
