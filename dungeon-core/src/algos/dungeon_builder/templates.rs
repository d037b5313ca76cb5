use crate::types::{Direction, DirectionSet};

use Direction::{Down as D, Left as L, Right as R, Up as U};

/// Every door combination a room can have, dead ends first.
pub(crate) const ROOM_TEMPLATES: [DirectionSet; 15] = [
    DirectionSet::of(&[U]),
    DirectionSet::of(&[R]),
    DirectionSet::of(&[D]),
    DirectionSet::of(&[L]),
    DirectionSet::of(&[U, R]),
    DirectionSet::of(&[U, D]),
    DirectionSet::of(&[U, L]),
    DirectionSet::of(&[R, D]),
    DirectionSet::of(&[R, L]),
    DirectionSet::of(&[D, L]),
    DirectionSet::of(&[U, R, D]),
    DirectionSet::of(&[U, R, L]),
    DirectionSet::of(&[U, D, L]),
    DirectionSet::of(&[R, D, L]),
    DirectionSet::of(&[U, R, D, L]),
];

pub(crate) fn dead_end_templates() -> Vec<DirectionSet> {
    ROOM_TEMPLATES
        .into_iter()
        .filter(|template| template.len() == 1)
        .collect()
}

pub(crate) fn open_templates() -> Vec<DirectionSet> {
    ROOM_TEMPLATES
        .into_iter()
        .filter(|template| template.len() > 1)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_templates_are_distinct() {
        let mut bits = ROOM_TEMPLATES
            .iter()
            .map(|template| template.bits())
            .collect::<Vec<_>>();
        bits.sort();
        bits.dedup();

        assert_eq!(bits.len(), 15);
        assert_eq!(dead_end_templates().len(), 4);
        assert_eq!(open_templates().len(), 11);
        assert_eq!(ROOM_TEMPLATES[11].to_string(), "URL");
    }
}
