use super::DungeonBuilder;
use crate::{
    algos::{
        MapTile, RngHandler,
        room_layout::{LayoutRequest, RoomLayout, log_layout},
    },
    constants::ROOM_SPACING,
    types::{Room, RoomStyle, Vector2},
};

use rand::{Rng, rngs::StdRng};
use rayon::prelude::*;

impl DungeonBuilder {
    // Lays every room out in parallel. Each room gets its own seed drawn in
    // build order so the result does not depend on scheduling.
    pub(super) fn build_layouts(rooms: &mut [Room], style: RoomStyle, rng: &mut StdRng) {
        let seeds = rooms.iter().map(|_| rng.random()).collect::<Vec<u64>>();

        let request = LayoutRequest {
            style,
            ..Default::default()
        };

        rooms
            .par_iter_mut()
            .zip(seeds.par_iter())
            .for_each(|(room, seed)| {
                let mut room_rng = RngHandler::seeded(*seed);

                room.origin = Vector2::new(room.id as f32 * ROOM_SPACING, 0.0);
                room.layout = Some(RoomLayout::build(
                    room.doors(),
                    room.room_type,
                    &request,
                    &mut room_rng,
                ));
                room.map_tile = MapTile::project(room);

                log_layout(room);
            });
    }
}
