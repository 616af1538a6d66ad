//! Deterministic room layout generation.
//!
//! Authored rooms take precedence over the procedural templates. Every layout
//! is then sealed along the sides that have no neighbouring room.

use overworld_core::{Direction, RoomCoord, RoomLayout, Tile, ROOM_COLUMNS, ROOM_ROWS};
use thiserror::Error;
use tracing::warn;

type TileGrid = [[Tile; ROOM_COLUMNS]; ROOM_ROWS];

/// Errors raised while resolving a room layout.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The requested room lies outside the 9×9 world.
    #[error("room {room} lies outside the world")]
    OutOfBounds {
        /// Coordinate that was requested.
        room: RoomCoord,
    },
}

/// Errors raised while reading glyph art.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    /// The art does not contain exactly one line per room row.
    #[error("expected 15 rows of glyph art, found {found}")]
    RowCount {
        /// Number of rows present.
        found: usize,
    },
    /// A row does not contain exactly one glyph per room column.
    #[error("row {row} holds {found} glyphs instead of 16")]
    RowWidth {
        /// Offending row.
        row: usize,
        /// Number of glyphs present.
        found: usize,
    },
    /// A glyph does not name a tile.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Offending row.
        row: usize,
        /// Offending column.
        column: usize,
        /// Character that failed to parse.
        glyph: char,
    },
}

/// Procedural decorations applied to rooms without authored art.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomTemplate {
    /// Open room with no features.
    Empty,
    /// Two-by-three pond in the middle of the room.
    SmallPond,
    /// Four single wall blocks near the corners.
    ScatteredRocks,
    /// Six-by-four lake covering the centre.
    LargePond,
    /// Four short wall bars along the top and bottom thirds.
    WallBars,
}

impl RoomTemplate {
    /// Template chosen for the provided room, keyed by `(x + y) mod 5`.
    #[must_use]
    pub fn for_room(room: RoomCoord) -> Self {
        match (room.x() + room.y()).rem_euclid(5) {
            0 => Self::Empty,
            1 => Self::SmallPond,
            2 => Self::ScatteredRocks,
            3 => Self::LargePond,
            _ => Self::WallBars,
        }
    }

    fn decorate(self, tiles: &mut TileGrid) {
        match self {
            Self::Empty => {}
            Self::SmallPond => fill(tiles, 6..=8, 7..=8, Tile::Water),
            Self::ScatteredRocks => {
                for (row, column) in [(4, 4), (4, 11), (10, 4), (10, 11)] {
                    tiles[row][column] = Tile::Wall;
                }
            }
            Self::LargePond => fill(tiles, 5..=8, 5..=10, Tile::Water),
            Self::WallBars => {
                for row in [3, 11] {
                    fill(tiles, row..=row, 3..=5, Tile::Wall);
                    fill(tiles, row..=row, 10..=12, Tile::Wall);
                }
            }
        }
    }
}

fn fill(
    tiles: &mut TileGrid,
    rows: std::ops::RangeInclusive<usize>,
    columns: std::ops::RangeInclusive<usize>,
    tile: Tile,
) {
    for row in rows {
        for column in columns.clone() {
            tiles[row][column] = tile;
        }
    }
}

/// Cells, as `(row, column)`, that form the opening on the provided side.
#[must_use]
pub const fn doorway_cells(side: Direction) -> &'static [(usize, usize)] {
    match side {
        Direction::West => &[(7, 0)],
        Direction::East => &[(7, ROOM_COLUMNS - 1)],
        Direction::North => &[(0, 9), (0, 10)],
        Direction::South => &[(ROOM_ROWS - 1, 9), (ROOM_ROWS - 1, 10)],
    }
}

/// Resolves the sealed layout of the provided room.
pub fn layout_for(room: RoomCoord) -> Result<RoomLayout, LayoutError> {
    if !room.is_within_world() {
        return Err(LayoutError::OutOfBounds { room });
    }

    Ok(generate_layout(room))
}

/// Builds the layout of a room already known to lie inside the world.
pub(crate) fn generate_layout(room: RoomCoord) -> RoomLayout {
    let mut tiles = authored_tiles(room).unwrap_or_else(|| {
        let mut tiles = base_room();
        RoomTemplate::for_room(room).decorate(&mut tiles);
        tiles
    });
    seal_edges(room, &mut tiles);
    RoomLayout::from_tiles(tiles)
}

fn authored_tiles(room: RoomCoord) -> Option<TileGrid> {
    let (_, art) = AUTHORED_ROOMS.iter().find(|(coord, _)| *coord == room)?;

    match parse_tiles(art) {
        Ok(tiles) => Some(tiles),
        Err(error) => {
            warn!(room = %room, error = %error, "authored_room_rejected");
            None
        }
    }
}

/// Reads glyph art (`#` wall, `.` grass, `~` water) into a tile grid.
pub fn parse_glyph_art(art: &[&str]) -> Result<RoomLayout, GlyphError> {
    parse_tiles(art).map(RoomLayout::from_tiles)
}

fn parse_tiles(art: &[&str]) -> Result<TileGrid, GlyphError> {
    if art.len() != ROOM_ROWS {
        return Err(GlyphError::RowCount { found: art.len() });
    }

    let mut tiles = [[Tile::Grass; ROOM_COLUMNS]; ROOM_ROWS];
    for (row, line) in art.iter().enumerate() {
        let found = line.chars().count();
        if found != ROOM_COLUMNS {
            return Err(GlyphError::RowWidth { row, found });
        }
        for (column, glyph) in line.chars().enumerate() {
            tiles[row][column] =
                Tile::from_glyph(glyph).ok_or(GlyphError::UnknownGlyph { row, column, glyph })?;
        }
    }
    Ok(tiles)
}

fn base_room() -> TileGrid {
    let mut tiles = [[Tile::Grass; ROOM_COLUMNS]; ROOM_ROWS];
    for (row, cells) in tiles.iter_mut().enumerate() {
        for (column, tile) in cells.iter_mut().enumerate() {
            let border_row = row == 0 || row == ROOM_ROWS - 1;
            let border_column = column == 0 || column == ROOM_COLUMNS - 1;
            if border_row || border_column {
                *tile = Tile::Wall;
            }
        }
    }
    for side in Direction::ALL {
        for &(row, column) in doorway_cells(side) {
            tiles[row][column] = Tile::Grass;
        }
    }
    tiles
}

fn seal_edges(room: RoomCoord, tiles: &mut TileGrid) {
    for side in Direction::ALL {
        if room.has_neighbor(side) {
            continue;
        }
        for &(row, column) in doorway_cells(side) {
            tiles[row][column] = Tile::Wall;
        }
    }
}

const SOLID: &str = "################";
const ROOM: &str = "#..............#";
const CORRIDOR: &str = "................";
const GATED: &str = "#########..#####";

const AUTHORED_ROOMS: [(RoomCoord, [&str; ROOM_ROWS]); 6] = [
    (
        RoomCoord::new(8, 8),
        [
            SOLID,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            "...............#",
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            GATED,
        ],
    ),
    (
        RoomCoord::new(0, 0),
        [
            SOLID,
            ROOM,
            ROOM,
            "#...~~~........#",
            "#...~~~........#",
            "#...~~~........#",
            ROOM,
            CORRIDOR,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            GATED,
        ],
    ),
    (
        RoomCoord::new(1, 0),
        [
            SOLID,
            ROOM,
            ROOM,
            "#..########....#",
            ROOM,
            ROOM,
            ROOM,
            CORRIDOR,
            ROOM,
            ROOM,
            "#....~~~~~.....#",
            "#....~~~~~.....#",
            "#....~~~~~.....#",
            ROOM,
            GATED,
        ],
    ),
    (
        RoomCoord::new(0, 1),
        [
            GATED,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            "#..###...###...#",
            "#..###...###...#",
            "...###...###....",
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            SOLID,
        ],
    ),
    (
        RoomCoord::new(1, 1),
        [
            GATED,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            CORRIDOR,
            "#...~~~~~~~....#",
            "#...~~~~~~~....#",
            "#...~~~~~~~....#",
            ROOM,
            ROOM,
            ROOM,
            SOLID,
        ],
    ),
    (
        RoomCoord::new(2, 0),
        [
            SOLID,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            "...............#",
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            ROOM,
            SOLID,
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn is_open(layout: &RoomLayout, side: Direction) -> bool {
        doorway_cells(side)
            .iter()
            .all(|&(row, column)| layout.tile(column, row) == Some(Tile::Grass))
    }

    #[test]
    fn rooms_outside_the_world_have_no_layout() {
        for room in [
            RoomCoord::new(-1, 0),
            RoomCoord::new(0, -1),
            RoomCoord::new(9, 4),
            RoomCoord::new(4, 9),
        ] {
            assert_eq!(layout_for(room), Err(LayoutError::OutOfBounds { room }));
        }
    }

    #[test]
    fn every_authored_room_parses() {
        for (room, art) in AUTHORED_ROOMS {
            assert!(parse_glyph_art(&art).is_ok(), "authored art for {room} is malformed");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        for x in 0..=8 {
            for y in 0..=8 {
                let room = RoomCoord::new(x, y);
                assert_eq!(layout_for(room), layout_for(room));
            }
        }
    }

    #[test]
    fn templates_follow_coordinate_sum() {
        assert_eq!(RoomTemplate::for_room(RoomCoord::new(3, 2)), RoomTemplate::Empty);
        assert_eq!(RoomTemplate::for_room(RoomCoord::new(4, 2)), RoomTemplate::SmallPond);
        assert_eq!(RoomTemplate::for_room(RoomCoord::new(1, 6)), RoomTemplate::ScatteredRocks);
        assert_eq!(RoomTemplate::for_room(RoomCoord::new(2, 6)), RoomTemplate::LargePond);
        assert_eq!(RoomTemplate::for_room(RoomCoord::new(2, 7)), RoomTemplate::WallBars);
    }

    #[test]
    fn procedural_rooms_open_exactly_where_neighbours_exist() {
        for x in 0..=8 {
            for y in 0..=8 {
                let room = RoomCoord::new(x, y);
                if AUTHORED_ROOMS.iter().any(|(coord, _)| *coord == room) {
                    continue;
                }
                let layout = layout_for(room).expect("room inside the world");
                for side in Direction::ALL {
                    assert_eq!(
                        is_open(&layout, side),
                        room.has_neighbor(side),
                        "room {room} side {side:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn world_corners_are_sealed_on_outer_sides() {
        let origin = layout_for(RoomCoord::new(0, 0)).expect("origin exists");
        assert!(!is_open(&origin, Direction::West));
        assert!(!is_open(&origin, Direction::North));
        assert!(is_open(&origin, Direction::East));
        assert!(is_open(&origin, Direction::South));

        let boss = layout_for(RoomCoord::new(8, 8)).expect("boss room exists");
        assert!(is_open(&boss, Direction::West));
        assert!(!is_open(&boss, Direction::North));
        assert!(!is_open(&boss, Direction::East));
        assert!(!is_open(&boss, Direction::South));
    }

    #[test]
    fn large_pond_fills_the_centre() {
        let layout = layout_for(RoomCoord::new(1, 2)).expect("room exists");
        for row in 5..=8 {
            for column in 5..=10 {
                assert_eq!(layout.tile(column, row), Some(Tile::Water));
            }
        }
        assert_eq!(layout.tile(4, 5), Some(Tile::Grass));
    }

    #[test]
    fn malformed_art_is_reported() {
        let mut art = [ROOM; ROOM_ROWS];
        art[3] = "#......x.......#";
        assert_eq!(
            parse_glyph_art(&art),
            Err(GlyphError::UnknownGlyph {
                row: 3,
                column: 7,
                glyph: 'x'
            })
        );
        assert_eq!(
            parse_glyph_art(&art[..4]),
            Err(GlyphError::RowCount { found: 4 })
        );
        art[3] = "#.#";
        assert_eq!(
            parse_glyph_art(&art),
            Err(GlyphError::RowWidth { row: 3, found: 3 })
        );
    }
}
