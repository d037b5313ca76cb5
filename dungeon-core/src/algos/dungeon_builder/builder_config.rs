use crate::{
    error::{GenerationError, GenerationResult},
    types::RoomStyle,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonBuilderConfig {
    // Rooms on the main path, starting room included and boss room
    // excluded. The actual length is picked in [min, max].
    pub min_path_length: usize,
    pub max_path_length: usize,
    // How many rooms a challenge branch can grow away from the main path
    // before it is closed with a dead end.
    pub max_branch_depth: usize,
    pub style: RoomStyle,
}

impl Default for DungeonBuilderConfig {
    fn default() -> Self {
        DungeonBuilderConfig {
            min_path_length: 6,
            max_path_length: 9,
            max_branch_depth: 2,
            style: RoomStyle::default(),
        }
    }
}

impl DungeonBuilderConfig {
    pub fn from_style(style: RoomStyle) -> Self {
        match style {
            RoomStyle::Arcade => DungeonBuilderConfig {
                style,
                ..Default::default()
            },
        }
    }

    pub fn validate(&self) -> GenerationResult<()> {
        if self.min_path_length == 0 {
            return Err(GenerationError::InvalidConfig(
                "main path must hold at least one room".to_string(),
            ));
        }

        if self.min_path_length > self.max_path_length {
            return Err(GenerationError::InvalidConfig(format!(
                "minimum path length {} is greater than maximum {}",
                self.min_path_length, self.max_path_length
            )));
        }

        Ok(())
    }
}
