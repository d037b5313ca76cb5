use svg::{
    Document,
    node::element::{Path, Rectangle, path::Data},
};

use super::{DrawConfig, MinimapDrawer};
use crate::{
    algos::{MapTile, Minimap, TileMaterial},
    types::Direction,
};

const NEON_BLUE: &str = "#0080ff";
const NEON_PINK: &str = "#ff3cc8";
const LIME_GREEN: &str = "#00e000";
const RED: &str = "#f80000";

const LIGHT_WHITE: &str = "#f8f8f8";

const STROKE_WIDTH: u32 = 8;

pub(super) struct ArcadeMinimapDrawer;

impl MinimapDrawer for ArcadeMinimapDrawer {
    fn draw(&self, minimap: &Minimap, config: &DrawConfig) -> Document {
        let tiles = minimap
            .tiles()
            .iter()
            .filter(|tile| config.reveal_all || minimap.is_revealed(tile.room))
            .collect::<Vec<_>>();

        let Some((min_x, max_x, min_y, max_y)) = tiles.iter().fold(None, |extent, tile| {
            let (x, y) = (tile.position.x, tile.position.y);
            Some(match extent {
                None => (x, x, y, y),
                Some((min_x, max_x, min_y, max_y)) => {
                    (x.min(min_x), x.max(max_x), y.min(min_y), y.max(max_y))
                }
            })
        }) else {
            return Document::new()
                .set("width", config.margin)
                .set("height", config.margin);
        };

        let columns = (max_x - min_x + 1) as u32;
        let rows = (max_y - min_y + 1) as u32;

        let mut document = Document::new()
            .set("width", columns * config.tile_size + config.margin)
            .set("height", rows * config.tile_size + config.margin);

        for tile in tiles {
            // Higher map rows are drawn further up
            let left = (tile.position.x - min_x) as u32 * config.tile_size + config.margin / 2;
            let top = (max_y - tile.position.y) as u32 * config.tile_size + config.margin / 2;

            document = document.add(Self::draw_tile(
                left,
                top,
                Self::color(minimap.material_of(tile)),
                config,
            ));

            for opening in Self::draw_openings(tile, left, top, config) {
                document = document.add(opening);
            }
        }

        document
    }
}

impl ArcadeMinimapDrawer {
    fn color(material: TileMaterial) -> &'static str {
        match material {
            TileMaterial::Path => NEON_BLUE,
            TileMaterial::Challenge => NEON_PINK,
            TileMaterial::Boss => RED,
            TileMaterial::Current => LIME_GREEN,
        }
    }

    fn draw_tile(left: u32, top: u32, color: &str, config: &DrawConfig) -> Rectangle {
        Rectangle::new()
            .set("x", left + STROKE_WIDTH)
            .set("y", top + STROKE_WIDTH)
            .set("width", config.tile_size - 2 * STROKE_WIDTH)
            .set("height", config.tile_size - 2 * STROKE_WIDTH)
            .set("fill", color)
    }

    // A short line from the tile body to the tile edge for every opening,
    // so that openings of neighbouring tiles join up.
    fn draw_openings(tile: &MapTile, left: u32, top: u32, config: &DrawConfig) -> Vec<Path> {
        let size = config.tile_size;
        let (centre_x, centre_y) = (left + size / 2, top + size / 2);

        tile.shape
            .openings()
            .iter()
            .map(|direction| {
                let (from, to) = match direction {
                    Direction::Up => ((centre_x, top + STROKE_WIDTH), (centre_x, top)),
                    Direction::Down => {
                        ((centre_x, top + size - STROKE_WIDTH), (centre_x, top + size))
                    }
                    Direction::Left => ((left + STROKE_WIDTH, centre_y), (left, centre_y)),
                    Direction::Right => {
                        ((left + size - STROKE_WIDTH, centre_y), (left + size, centre_y))
                    }
                };

                let data = Data::new()
                    .move_to::<(u32, u32)>(from)
                    .line_to::<(u32, u32)>(to);

                Path::new()
                    .set("fill", "none")
                    .set("stroke", LIGHT_WHITE)
                    .set("stroke-width", STROKE_WIDTH)
                    .set("d", data)
            })
            .collect()
    }
}
