use crate::{
    constants::ROOM_PLACEMENT_ATTEMPTS,
    error::{GenerationError, GenerationResult},
    session::GenerationSession,
    types::{Cell, Direction, DirectionSet, Dungeon, Room, RoomId, RoomType},
};

use std::collections::{HashMap, HashSet};

use rand::{Rng, rngs::StdRng};
use tracing::event;

mod build_layouts;
mod builder_config;
mod complete_rooms;
mod main_path;
mod templates;

pub use builder_config::DungeonBuilderConfig;

/// Grows the room graph of one level on an integer grid.
pub(crate) struct DungeonBuilder {
    config: DungeonBuilderConfig,
    rooms: Vec<Room>,
    occupied: HashMap<Cell, RoomId>,
    // Targets of every door placed so far
    reserved: HashSet<Cell>,
    main_path: Vec<RoomId>,
}

impl DungeonBuilder {
    pub fn new(config: DungeonBuilderConfig) -> GenerationResult<Self> {
        config.validate()?;

        Ok(DungeonBuilder {
            config,
            rooms: Vec::new(),
            occupied: HashMap::new(),
            reserved: HashSet::new(),
            main_path: Vec::new(),
        })
    }

    pub fn build(mut self, session: &mut GenerationSession) -> GenerationResult<Dungeon> {
        let build_start = std::time::Instant::now();

        let path_length = session
            .rng
            .random_range(self.config.min_path_length..=self.config.max_path_length);

        let dead_ends = templates::dead_end_templates();
        let start_template = dead_ends[session.rng.random_range(0..dead_ends.len())];
        let start = self.place_room(
            Cell::ORIGIN,
            RoomType::Starting,
            start_template,
            &mut session.next_door_id,
        );
        self.main_path.push(start);

        let boss = self.build_main_path(path_length, session)?;

        let main_path_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Built main path of {} rooms in {:.2}ms",
            self.main_path.len(),
            main_path_time.duration_since(build_start).as_millis()
        );

        let mut visited = HashSet::new();
        self.complete_rooms(start, 0, &mut visited, session);

        self.verify_doors()?;

        let branches_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Completed {} challenge rooms in {:.2}ms",
            self.rooms
                .iter()
                .filter(|room| room.room_type == RoomType::Challenge)
                .count(),
            branches_time.duration_since(main_path_time).as_millis()
        );

        Self::build_layouts(&mut self.rooms, self.config.style, &mut session.rng);

        let layouts_time = std::time::Instant::now();
        event!(
            tracing::Level::DEBUG,
            "Laid out {} rooms in {:.2}ms",
            self.rooms.len(),
            layouts_time.duration_since(branches_time).as_millis()
        );

        Ok(Dungeon::new(
            self.rooms,
            start,
            boss,
            self.main_path,
            session.seed,
            session.epoch,
        ))
    }

    fn place_room(
        &mut self,
        position: Cell,
        room_type: RoomType,
        template: DirectionSet,
        next_door_id: &mut u32,
    ) -> RoomId {
        let room_id = self.rooms.len();
        let room = Room::new(room_id, position, room_type, template, next_door_id);

        self.occupied.insert(position, room_id);
        self.reserved
            .extend(template.iter().map(|direction| direction.next_position(position)));

        self.rooms.push(room);

        room_id
    }

    // Links the door of `from` facing `direction` with its counterpart.
    fn connect(&mut self, from: RoomId, direction: Direction, to: RoomId) {
        if let Some(door) = self.rooms[from].door_in_mut(direction) {
            door.leads_to = Some(to);
        }

        if let Some(door) = self.rooms[to].door_in_mut(direction.opposite()) {
            door.leads_to = Some(from);
        }
    }

    // Picks a template with a `back` door whose other doors all lead to free
    // cells when placed at `position`.
    fn select_template(
        &self,
        back: Direction,
        candidates: &[DirectionSet],
        position: Cell,
        rng: &mut StdRng,
    ) -> GenerationResult<DirectionSet> {
        let viable = candidates
            .iter()
            .copied()
            .filter(|template| template.contains(back))
            .collect::<Vec<_>>();

        if viable.is_empty() {
            return Err(GenerationError::MissingTemplate(back));
        }

        let source = back.next_position(position);

        for _ in 0..ROOM_PLACEMENT_ATTEMPTS {
            let template = viable[rng.random_range(0..viable.len())];

            if self.fits(template, position, source) {
                return Ok(template);
            }
        }

        event!(
            tracing::Level::ERROR,
            "No valid room for position {} after {} attempts",
            position,
            ROOM_PLACEMENT_ATTEMPTS
        );

        Err(GenerationError::PlacementExhausted {
            direction: back.opposite(),
            position: source,
            attempts: ROOM_PLACEMENT_ATTEMPTS,
        })
    }

    fn fits(&self, template: DirectionSet, position: Cell, source: Cell) -> bool {
        template.iter().all(|direction| {
            let target = direction.next_position(position);

            target == source
                || !(self.occupied.contains_key(&target) || self.reserved.contains(&target))
        })
    }

    // Every door must lead to the neighbour in its direction, and that
    // neighbour's opposite door must lead back.
    fn verify_doors(&self) -> GenerationResult<()> {
        for room in self.rooms.iter() {
            for door in room.doors() {
                let paired = door.leads_to.and_then(|other| self.rooms.get(other)).is_some_and(|other| {
                    other.position == door.direction.next_position(room.position)
                        && other
                            .door_in(door.direction.opposite())
                            .is_some_and(|back| back.leads_to == Some(room.id))
                });

                if !paired {
                    event!(
                        tracing::Level::ERROR,
                        "Door {} of room {} is not paired",
                        door.id,
                        room
                    );

                    return Err(GenerationError::DoorMismatch {
                        room: room.id,
                        door: door.id,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algos::{RngHandler, dungeon_builder::templates::open_templates},
        constants::{TEST_DUNGEON_SEEDS, TEST_RANDOM_SEED},
    };

    fn build_with(seed: u64, config: DungeonBuilderConfig) -> GenerationResult<Dungeon> {
        let mut session = GenerationSession::new(seed);
        DungeonBuilder::new(config)?.build(&mut session)
    }

    // Every test seed must build, a failure is a regression.
    pub(super) fn test_builds(config: DungeonBuilderConfig) -> Vec<Dungeon> {
        TEST_DUNGEON_SEEDS
            .map(|seed| match build_with(seed, config) {
                Ok(dungeon) => dungeon,
                Err(err) => panic!("Seed {seed} failed to build: {err}"),
            })
            .collect()
    }

    #[test]
    fn test_doors_are_reciprocal() {
        for dungeon in test_builds(DungeonBuilderConfig::default()) {
            for room in dungeon.rooms() {
                for door in room.doors() {
                    let other = dungeon
                        .connected_door(door)
                        .expect("Every door must lead somewhere");

                    assert_eq!(other.direction, door.direction.opposite());
                    assert_eq!(other.leads_to, Some(room.id));
                    assert_eq!(
                        dungeon.room(other.owner).unwrap().position,
                        door.direction.next_position(room.position)
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_duplicate_positions() {
        for dungeon in test_builds(DungeonBuilderConfig::default()) {
            let positions = dungeon
                .rooms()
                .iter()
                .map(|room| room.position)
                .collect::<HashSet<_>>();

            assert_eq!(positions.len(), dungeon.rooms().len());
        }
    }

    #[test]
    fn test_main_path_shape() {
        for dungeon in test_builds(DungeonBuilderConfig::default()) {
            let path = dungeon.main_path();

            assert!((6..=9).contains(&dungeon.path_length()));
            assert_eq!(dungeon.starting_room().id, path[0]);
            assert_eq!(dungeon.starting_room().room_type, RoomType::Starting);
            assert_eq!(dungeon.starting_room().position, Cell::ORIGIN);
            assert!(dungeon.starting_room().is_dead_end());

            for id in path[1..].iter() {
                let room = dungeon.room(*id).unwrap();
                assert_eq!(room.room_type, RoomType::MainPath);
                assert!(room.on_main_path);
                assert!(room.number_of_doors() >= 2);
            }

            for pair in path.windows(2) {
                let from = dungeon.room(pair[0]).unwrap();
                assert!(
                    from.doors().iter().any(|door| door.leads_to == Some(pair[1])),
                    "Main path rooms must be linked in order"
                );
            }

            let boss = dungeon.boss_room();
            let last = path[path.len() - 1];
            assert_eq!(boss.room_type, RoomType::Boss);
            assert!(boss.is_dead_end());
            assert!(boss.on_main_path);
            assert_eq!(boss.doors()[0].leads_to, Some(last));

            let main_path_rooms = dungeon
                .rooms()
                .iter()
                .filter(|room| room.on_main_path)
                .count();
            assert_eq!(main_path_rooms, path.len() + 1);
        }
    }

    #[test]
    fn test_branches_are_challenge_rooms() {
        for dungeon in test_builds(DungeonBuilderConfig::default()) {
            for room in dungeon.rooms().iter().filter(|room| !room.on_main_path) {
                assert_eq!(room.room_type, RoomType::Challenge);
            }
        }
    }

    #[test]
    fn test_zero_branch_depth_closes_every_branch() {
        let config = DungeonBuilderConfig {
            max_branch_depth: 0,
            ..Default::default()
        };

        for dungeon in test_builds(config) {
            for room in dungeon.rooms().iter().filter(|room| !room.on_main_path) {
                assert!(room.is_dead_end(), "Branch room {room} must be a dead end");
            }
        }
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let config = DungeonBuilderConfig::default();

        for seed in TEST_DUNGEON_SEEDS.take(5) {
            assert_eq!(
                build_with(seed, config).unwrap(),
                build_with(seed, config).unwrap()
            );
        }
    }

    #[test]
    fn test_short_path_with_shallow_branches() {
        let config = DungeonBuilderConfig {
            min_path_length: 5,
            max_path_length: 5,
            max_branch_depth: 1,
            ..Default::default()
        };

        for (dungeon, again) in test_builds(config).into_iter().zip(test_builds(config)) {
            assert_eq!(dungeon, again, "Same seed must give the same graph");
            assert_eq!(dungeon.path_length(), 5);
            assert_eq!(
                dungeon.rooms().iter().filter(|room| room.on_main_path).count(),
                6,
                "Five main path rooms and the boss"
            );

            for room in dungeon.rooms().iter().filter(|room| !room.on_main_path) {
                assert!(room.is_dead_end(), "Branch room {room} must be a dead end");

                let parent = dungeon.room(room.doors()[0].leads_to.unwrap()).unwrap();
                assert!(
                    parent.on_main_path && parent.room_type != RoomType::Boss,
                    "Branch room {room} must hang off the main path"
                );
            }
        }
    }

    #[test]
    fn test_boxed_in_room_exhausts_placement() {
        let mut rng = RngHandler::seeded(TEST_RANDOM_SEED);
        let mut builder = DungeonBuilder::new(DungeonBuilderConfig::default()).unwrap();
        let position = Cell::new(0, 1);

        builder.occupied.insert(Cell::ORIGIN, 0);
        builder.reserved.extend([Cell::new(1, 1), Cell::new(-1, 1), Cell::new(0, 2)]);

        assert_eq!(
            builder.select_template(Direction::Down, &open_templates(), position, &mut rng),
            Err(GenerationError::PlacementExhausted {
                direction: Direction::Up,
                position: Cell::ORIGIN,
                attempts: ROOM_PLACEMENT_ATTEMPTS,
            })
        );
        assert_eq!(
            builder.select_template(Direction::Down, &[DirectionSet::single(Direction::Down)], position, &mut rng),
            Ok(DirectionSet::single(Direction::Down)),
            "A dead end only leads back to its source"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = DungeonBuilderConfig {
            min_path_length: 5,
            max_path_length: 2,
            ..Default::default()
        };

        assert!(matches!(
            build_with(TEST_RANDOM_SEED, config),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_room_path_goes_straight_to_boss() {
        let config = DungeonBuilderConfig {
            min_path_length: 1,
            max_path_length: 1,
            max_branch_depth: 0,
            ..Default::default()
        };

        let dungeon = build_with(TEST_RANDOM_SEED, config).unwrap();

        assert_eq!(dungeon.path_length(), 1);
        assert_eq!(dungeon.rooms().len(), 2);
        assert_eq!(
            dungeon.starting_room().doors()[0].leads_to,
            Some(dungeon.boss_room().id)
        );
    }
}
