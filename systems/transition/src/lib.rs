#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Boundary detection that requests room transitions.

use glam::Vec2;
use overworld_core::{
    Command, Direction, ObstacleView, PlayerSnapshot, RoomCoord, TransitionPhase,
    DOOR_INTERACTION_RADIUS, ROOM_HEIGHT, ROOM_WIDTH,
};

/// Order in which doorway bands are tested; the first match decides the tick.
pub const CROSSING_PRIORITY: [Direction; 4] = [
    Direction::West,
    Direction::East,
    Direction::North,
    Direction::South,
];

/// Depth of the strip along each edge that counts as leaving the room.
pub const EDGE_MARGIN: f32 = 4.0;

/// Distance from an edge within which a door guards that edge.
pub const DOOR_EDGE_MARGIN: f32 = 16.0;

const VERTICAL_BAND: (f32, f32) = (80.0, 160.0);
const HORIZONTAL_BAND: (f32, f32) = (80.0, 176.0);

fn within(value: f32, (low, high): (f32, f32)) -> bool {
    value > low && value < high
}

/// Reports whether `position` lies in the doorway band of the provided side.
#[must_use]
pub fn in_doorway_band(position: Vec2, side: Direction) -> bool {
    match side {
        Direction::West => position.x < EDGE_MARGIN && within(position.y, VERTICAL_BAND),
        Direction::East => {
            position.x > ROOM_WIDTH - EDGE_MARGIN && within(position.y, VERTICAL_BAND)
        }
        Direction::North => position.y < EDGE_MARGIN && within(position.x, HORIZONTAL_BAND),
        Direction::South => {
            position.y > ROOM_HEIGHT - EDGE_MARGIN && within(position.x, HORIZONTAL_BAND)
        }
    }
}

/// Reports whether a closed door near the player guards the provided side.
#[must_use]
pub fn door_blocks(doors: &ObstacleView, player: Vec2, side: Direction) -> bool {
    doors.doors().any(|(door, _)| {
        if player.distance(door.position) >= DOOR_INTERACTION_RADIUS {
            return false;
        }
        let at = door.position;
        match side {
            Direction::West => at.x <= DOOR_EDGE_MARGIN,
            Direction::East => at.x >= ROOM_WIDTH - DOOR_EDGE_MARGIN,
            Direction::North => at.y <= DOOR_EDGE_MARGIN,
            Direction::South => at.y >= ROOM_HEIGHT - DOOR_EDGE_MARGIN,
        }
    })
}

/// Pure system that watches the player for edge crossings.
#[derive(Debug, Default)]
pub struct Transition;

impl Transition {
    /// Creates a new transition detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits at most one transition request for the current tick.
    ///
    /// Only the first band the player stands in is considered. When that
    /// crossing leads outside the world or is guarded by a door, the player
    /// simply stays put.
    pub fn handle(
        &self,
        phase: TransitionPhase,
        room: RoomCoord,
        player: &PlayerSnapshot,
        doors: &ObstacleView,
        out: &mut Vec<Command>,
    ) {
        if phase != TransitionPhase::Steady {
            return;
        }

        let Some(side) = CROSSING_PRIORITY
            .into_iter()
            .find(|&side| in_doorway_band(player.position, side))
        else {
            return;
        };

        if room.has_neighbor(side) && !door_blocks(doors, player.position, side) {
            out.push(Command::EnterRoom { direction: side });
        }
    }
}
