use super::Minimap;
use crate::{
    constants::{MAP_SIZE_MARGIN, PIECE_SIZE, TILE_SIZE},
    types::RoomStyle,
};

use svg::Document;

mod arcade;
mod room_drawer;

pub(crate) use room_drawer::RoomDrawer;

pub(crate) struct DrawConfig {
    // Side of a mini-map tile, in pixels
    pub(crate) tile_size: u32,
    // Side of a room piece, in pixels
    pub(crate) piece_size: u32,
    pub(crate) margin: u32,
    // Draw tiles the player has not visited yet
    pub(crate) reveal_all: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        DrawConfig {
            tile_size: TILE_SIZE,
            piece_size: PIECE_SIZE,
            margin: MAP_SIZE_MARGIN,
            reveal_all: false,
        }
    }
}

pub(crate) trait MinimapDrawer {
    fn draw(&self, minimap: &Minimap, config: &DrawConfig) -> Document;
}

pub(crate) struct MinimapDrawerFactory;

impl MinimapDrawerFactory {
    pub(crate) fn create_drawer(style: RoomStyle) -> impl MinimapDrawer {
        match style {
            RoomStyle::Arcade => arcade::ArcadeMinimapDrawer,
        }
    }
}
