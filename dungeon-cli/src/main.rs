use dungeon_core::{
    Dungeon, DungeonBuilderConfig, GenerationSession, Minimap, PopulationContext, RoomId,
    RoomPopulation, RoomStyle, TaskPoll, draw_minimap, draw_room,
};

use std::{fs::create_dir_all as create_generated_dir, path::Path};

use clap::Parser;
use serde::Serialize;
use svg::save as save_as_svg;
use tracing::{Level, event};

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Fewest rooms on the main path, boss room excluded
    #[arg(long, default_value_t = 6)]
    min_path: usize,

    /// Most rooms on the main path, boss room excluded
    #[arg(long, default_value_t = 9)]
    max_path: usize,

    /// How far challenge branches grow away from the main path
    #[arg(short, long, default_value_t = 2)]
    branch_depth: usize,

    /// Seed of the session, random when missing
    #[arg(long)]
    seed: Option<u64>,

    /// Level to generate, trap limits grow with it
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    #[clap(short, long, default_value_t, value_enum)]
    style: RoomStyle,

    /// Also draw the layout of this room
    #[arg(short, long)]
    room: Option<RoomId>,

    /// Place the player, enemies and traps in the drawn room
    #[arg(short, long)]
    populate: bool,

    /// Draw rooms the player has not visited on the mini-map
    #[arg(long)]
    reveal_all: bool,

    /// Print a JSON summary of the level
    #[arg(long)]
    summary: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct RoomSummary {
    id: RoomId,
    room_type: String,
    position: (i32, i32),
    doors: String,
    shape: Option<String>,
}

#[derive(Serialize)]
struct LevelSummary<'a> {
    seed: u64,
    level: u32,
    path_length: usize,
    main_path: &'a [RoomId],
    boss: RoomId,
    rooms: Vec<RoomSummary>,
    population: Option<&'a RoomPopulation>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = DungeonBuilderConfig {
        min_path_length: args.min_path,
        max_path_length: args.max_path,
        max_branch_depth: args.branch_depth,
        ..DungeonBuilderConfig::from_style(args.style)
    };

    let mut session = match args.seed {
        Some(seed) => GenerationSession::new(seed),
        None => GenerationSession::from_entropy(),
    };
    for _ in 1..args.level {
        session.next_level();
    }

    let dungeon = session.generate_level(&config)?;

    event!(
        Level::INFO,
        "Generated level {} from seed {} with {} rooms",
        session.level(),
        session.seed(),
        dungeon.rooms().len()
    );

    if let Ok(false) = Path::new("generated").try_exists() {
        create_generated_dir("generated")?;
        println!("Directory 'generated' created.");
    }

    let mut minimap = Minimap::new(&dungeon);
    minimap.enter_room(dungeon.starting_room().id);

    let map_filename = format!("generated/{}-level-{}-map.svg", session.seed(), session.level());
    println!("Saving mini-map as SVG to: {}", map_filename);
    save_as_svg(map_filename, &draw_minimap(&minimap, args.style, args.reveal_all))?;

    let mut population = None;

    if let Some(room) = args.room {
        if args.populate {
            population = populate(&mut session, &dungeon, room)?;
        }

        let room_filename = format!(
            "generated/{}-level-{}-room-{}.svg",
            session.seed(),
            session.level(),
            room
        );
        println!("Saving room {} as SVG to: {}", room, room_filename);
        save_as_svg(room_filename, &draw_room(&dungeon, room, population.as_ref())?)?;
    }

    if args.summary {
        let summary = LevelSummary {
            seed: dungeon.seed(),
            level: session.level(),
            path_length: dungeon.path_length(),
            main_path: dungeon.main_path(),
            boss: dungeon.boss_room().id,
            rooms: dungeon
                .rooms()
                .iter()
                .map(|room| RoomSummary {
                    id: room.id,
                    room_type: room.room_type.to_string(),
                    position: room.position.into(),
                    doors: room.directions().to_string(),
                    shape: room.layout.as_ref().map(|layout| format!("{:?}", layout.shape())),
                })
                .collect(),
            population: population.as_ref(),
        };

        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

// Runs the population tasks of the starting room and of `room` to completion.
// The player is assumed to walk into `room` through its first door.
fn populate(
    session: &mut GenerationSession,
    dungeon: &Dungeon,
    room: RoomId,
) -> anyhow::Result<Option<RoomPopulation>> {
    let start = dungeon.starting_room().id;

    let starting_population = run_task(session, dungeon, start, &PopulationContext::default())?;
    if room == start {
        return Ok(starting_population);
    }

    let target = dungeon.room(room)?;
    let entrance = target.doors().first().and_then(|door| {
        let layout = target.layout.as_ref()?;
        layout
            .door_cell(door.id)
            .map(|cell| cell.to_world(target.origin))
    });

    let Some(player_position) = entrance else {
        event!(Level::WARN, "Room {} has no entrance, leaving it empty", room);
        return Ok(None);
    };

    let ctx = PopulationContext {
        player_position: Some(player_position),
    };

    run_task(session, dungeon, room, &ctx)
}

fn run_task(
    session: &mut GenerationSession,
    dungeon: &Dungeon,
    room: RoomId,
    ctx: &PopulationContext,
) -> anyhow::Result<Option<RoomPopulation>> {
    let Some(handle) = session.begin_population(dungeon, room)? else {
        return Ok(None);
    };

    loop {
        match session.poll(handle, dungeon, ctx)? {
            TaskPoll::Pending => continue,
            TaskPoll::Ready(population) => return Ok(Some(population)),
            TaskPoll::Cancelled => return Ok(None),
        }
    }
}
