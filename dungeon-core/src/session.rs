use crate::{
    algos::{
        DungeonBuilder, DungeonBuilderConfig, EnemyRequest, EnemySpawner, GridSurfaceBaker,
        PlacedEnemy, PlacedTrap, PlacementConfig, PlayerSpawn, PlayerSpawner, RngHandler,
        RoomState, SurfaceBaker, TrapRequest, TrapSpawner, WalkableSurface,
    },
    constants::{ENEMY_SPAWN_DELAY_TICKS, PLAYER_SPAWN_DELAY_TICKS},
    error::{GenerationError, GenerationResult},
    types::{Dungeon, Room, RoomId, RoomType, Vector2},
};

use std::collections::HashMap;

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{Level, event, span};

/// Identifies a pending population task. Handles issued before the last
/// reset or level change poll as cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TaskHandle {
    id: u64,
    epoch: u64,
}

/// What the host knows about the world when polling a task.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PopulationContext {
    // None until the player has been instantiated
    pub player_position: Option<Vector2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPopulation {
    pub room: RoomId,
    pub player: Option<PlayerSpawn>,
    pub enemies: Vec<PlacedEnemy>,
    pub traps: Vec<PlacedTrap>,
    pub state: RoomState,
    #[serde(skip)]
    pub surface: WalkableSurface,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskPoll {
    Pending,
    Ready(RoomPopulation),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TaskKind {
    Player,
    Enemies,
}

#[derive(Debug, Clone, Copy)]
struct PopulationTask {
    room: RoomId,
    kind: TaskKind,
    ticks_left: u32,
}

/// Everything that outlives a single level: the random source, the door
/// id counter, progress counters and the population tasks in flight.
pub struct GenerationSession {
    pub(crate) rng: StdRng,
    pub(crate) seed: u64,
    pub(crate) next_door_id: u32,
    pub(crate) epoch: u64,
    level: u32,
    rooms_entered: usize,
    main_path_length: usize,
    max_traps: usize,
    placement: PlacementConfig,
    baker: Box<dyn SurfaceBaker>,
    next_task: u64,
    tasks: HashMap<TaskHandle, PopulationTask>,
    // Rooms of the current level that already received a task
    populated: tinyset::SetUsize,
}

impl GenerationSession {
    pub fn new(seed: u64) -> Self {
        Self::with_placement(seed, PlacementConfig::default())
    }

    pub fn with_placement(seed: u64, placement: PlacementConfig) -> Self {
        GenerationSession {
            rng: RngHandler::seeded(seed),
            seed,
            next_door_id: 0,
            epoch: 0,
            level: 1,
            rooms_entered: 0,
            main_path_length: 0,
            max_traps: placement.max_traps,
            placement,
            baker: Box::new(GridSurfaceBaker),
            next_task: 0,
            tasks: HashMap::new(),
            populated: tinyset::SetUsize::new(),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(RngHandler::entropy_seed())
    }

    pub fn with_surface_baker(mut self, baker: Box<dyn SurfaceBaker>) -> Self {
        self.baker = baker;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn rooms_entered(&self) -> usize {
        self.rooms_entered
    }

    pub fn main_path_length(&self) -> usize {
        self.main_path_length
    }

    pub fn max_traps(&self) -> usize {
        self.max_traps
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn generate_level(&mut self, config: &DungeonBuilderConfig) -> GenerationResult<Dungeon> {
        let span = span!(Level::DEBUG, "generate_level", level = self.level);
        let _guard = span.enter();

        self.start_level();

        let dungeon = DungeonBuilder::new(*config)?.build(self)?;
        self.main_path_length = dungeon.path_length();

        event!(
            Level::DEBUG,
            "Level {} has {} rooms, {} on the main path",
            self.level,
            dungeon.rooms().len(),
            self.main_path_length
        );

        Ok(dungeon)
    }

    // A new life: back to the first level with the starting trap limit.
    pub fn reset(&mut self) {
        self.level = 1;
        self.max_traps = self.placement.max_traps_for_level(self.level);
        self.start_level();
    }

    pub fn next_level(&mut self) {
        self.level += 1;
        self.max_traps = self.placement.max_traps_for_level(self.level);
        self.start_level();
    }

    // Drops every pending task and forgets the rooms already populated.
    fn start_level(&mut self) {
        if !self.tasks.is_empty() {
            event!(Level::DEBUG, "Cancelling {} pending tasks", self.tasks.len());
        }

        self.epoch += 1;
        self.tasks.clear();
        self.populated = tinyset::SetUsize::new();
        self.rooms_entered = 0;
    }

    /// Schedules the population of `room`. Returns `None` when the room was
    /// already populated on this level or the dungeon is from an older one.
    pub fn begin_population(
        &mut self,
        dungeon: &Dungeon,
        room: RoomId,
    ) -> GenerationResult<Option<TaskHandle>> {
        let room = dungeon.room(room)?;

        if dungeon.epoch() != self.epoch {
            event!(
                Level::WARN,
                "Room {} belongs to a previous level, not populating it",
                room
            );
            return Ok(None);
        }

        if !self.populated.insert(room.id) {
            return Ok(None);
        }

        let (kind, ticks_left) = match room.room_type {
            RoomType::Starting => (TaskKind::Player, PLAYER_SPAWN_DELAY_TICKS),
            _ => (TaskKind::Enemies, ENEMY_SPAWN_DELAY_TICKS),
        };

        let handle = TaskHandle {
            id: self.next_task,
            epoch: self.epoch,
        };
        self.next_task += 1;

        self.tasks.insert(
            handle,
            PopulationTask {
                room: room.id,
                kind,
                ticks_left,
            },
        );

        Ok(Some(handle))
    }

    /// Advances a task by one tick.
    pub fn poll(
        &mut self,
        handle: TaskHandle,
        dungeon: &Dungeon,
        ctx: &PopulationContext,
    ) -> GenerationResult<TaskPoll> {
        if handle.epoch != self.epoch || dungeon.epoch() != self.epoch {
            self.tasks.remove(&handle);
            return Ok(TaskPoll::Cancelled);
        }

        let Some(task) = self.tasks.get_mut(&handle) else {
            return Ok(TaskPoll::Cancelled);
        };

        if task.ticks_left > 0 {
            task.ticks_left -= 1;
            return Ok(TaskPoll::Pending);
        }

        let task = *task;
        let population = match task.kind {
            TaskKind::Player => {
                self.tasks.remove(&handle);
                self.populate_player(dungeon.room(task.room)?)?
            }
            TaskKind::Enemies => {
                let Some(player_position) = ctx.player_position else {
                    return Ok(TaskPoll::Pending);
                };

                self.tasks.remove(&handle);
                self.populate_enemies(dungeon.room(task.room)?, player_position)?
            }
        };

        Ok(TaskPoll::Ready(population))
    }

    fn populate_player(&mut self, room: &Room) -> GenerationResult<RoomPopulation> {
        let layout = room
            .layout
            .as_ref()
            .ok_or(GenerationError::NoWalkableSurface(room.id))?;

        let surface = self.baker.bake(layout, room.origin, &[]);
        let player = PlayerSpawner::locate(room.id, layout, &surface, room.origin)?;

        Ok(RoomPopulation {
            room: room.id,
            player: Some(player),
            enemies: Vec::new(),
            traps: Vec::new(),
            state: RoomState::new(room, 0, self.placement.power_up),
            surface,
        })
    }

    fn populate_enemies(
        &mut self,
        room: &Room,
        player_position: Vector2,
    ) -> GenerationResult<RoomPopulation> {
        let (Some(layout), Some(bounds), Some(centre)) =
            (room.layout.as_ref(), room.bounds(), room.centre())
        else {
            return Err(GenerationError::NoWalkableSurface(room.id));
        };

        if room.room_type != RoomType::Challenge {
            self.rooms_entered += 1;
        }

        let traps = if room.room_type == RoomType::Boss {
            Vec::new()
        } else {
            TrapSpawner::plan(
                &TrapRequest {
                    room_type: room.room_type,
                    progress: self.rooms_entered,
                    main_path_length: self.main_path_length,
                    max_traps: self.max_traps,
                    pool: &self.placement.trap_pool,
                    layout,
                    origin: room.origin,
                },
                &mut self.rng,
            )
        };

        let trap_cells = traps.iter().map(|trap| trap.cell).collect::<Vec<_>>();
        let surface = self.baker.bake(layout, room.origin, &trap_cells);

        if surface.is_empty() {
            event!(Level::ERROR, "Room {} has nothing to stand on", room);
            return Err(GenerationError::NoWalkableSurface(room.id));
        }

        let enemies = EnemySpawner::plan(
            &EnemyRequest {
                room_type: room.room_type,
                progress: self.rooms_entered,
                main_path_length: self.main_path_length,
                bounds,
                centre,
                player_position,
                surface: &surface,
                config: &self.placement,
            },
            &mut self.rng,
        );

        event!(
            Level::DEBUG,
            "Populated room {} with {} enemies and {} traps",
            room,
            enemies.len(),
            traps.len()
        );

        Ok(RoomPopulation {
            room: room.id,
            player: None,
            state: RoomState::new(room, enemies.len(), self.placement.power_up),
            enemies,
            traps,
            surface,
        })
    }
}
