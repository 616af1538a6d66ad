//! Static, coordinate-keyed descriptions of room contents.

use glam::Vec2;
use overworld_core::{
    DoorLock, EnemyVariant, ItemKind, ObstacleKind, RoomCoord, WorldProgress,
};

/// Room that hosts the boss encounter.
pub const BOSS_ROOM: RoomCoord = RoomCoord::new(8, 8);

/// Position where the boss appears inside [`BOSS_ROOM`].
pub const BOSS_SPAWN: Vec2 = Vec2::new(128.0, 120.0);

/// Enemy placement produced by the spawn tables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Variant of the enemy to create.
    pub variant: EnemyVariant,
    /// Initial position in room units.
    pub position: Vec2,
}

/// Item placement produced by the spawn tables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSpawn {
    /// Kind of the item to create.
    pub kind: ItemKind,
    /// Position in room units.
    pub position: Vec2,
}

/// Obstacle placement produced by the spawn tables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleSpawn {
    /// Kind of the obstacle to create.
    pub kind: ObstacleKind,
    /// Position in room units.
    pub position: Vec2,
}

/// Enemies spawned when entering the provided room.
#[must_use]
pub fn enemies_for(room: RoomCoord, progress: &WorldProgress) -> Vec<EnemySpawn> {
    let mut spawns = Vec::new();
    if !room.is_within_world() {
        return spawns;
    }

    let normal = |x: f32, y: f32| EnemySpawn {
        variant: EnemyVariant::Normal,
        position: Vec2::new(x, y),
    };

    let sum = room.x() + room.y();
    if sum > 0 && sum % 3 == 0 {
        spawns.push(normal(64.0, 64.0));
        spawns.push(normal(192.0, 64.0));
    }
    if sum > 0 && sum % 4 == 0 {
        spawns.push(normal(128.0, 160.0));
    }
    if room.x() % 2 == 1 && room.y() % 2 == 1 {
        spawns.push(normal(80.0, 80.0));
        spawns.push(normal(176.0, 176.0));
    }
    if room == BOSS_ROOM && !progress.boss_defeated {
        spawns.push(EnemySpawn {
            variant: EnemyVariant::Boss,
            position: BOSS_SPAWN,
        });
    }
    spawns
}

/// Items placed in the provided room on every entry.
#[must_use]
pub fn items_for(room: RoomCoord) -> Vec<ItemSpawn> {
    ITEM_TABLE
        .iter()
        .filter(|(coord, _, _)| *coord == room)
        .map(|&(_, kind, position)| ItemSpawn { kind, position })
        .collect()
}

/// Obstacles placed in the provided room on every entry.
#[must_use]
pub fn obstacles_for(room: RoomCoord) -> Vec<ObstacleSpawn> {
    OBSTACLE_TABLE
        .iter()
        .filter(|(coord, _, _)| *coord == room)
        .map(|&(_, kind, position)| ObstacleSpawn { kind, position })
        .collect()
}

const fn at(x: i32, y: i32) -> RoomCoord {
    RoomCoord::new(x, y)
}

const fn point(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

const ITEM_TABLE: [(RoomCoord, ItemKind, Vec2); 20] = [
    (at(0, 0), ItemKind::Potion, point(160.0, 140.0)),
    (at(1, 1), ItemKind::Key, point(128.0, 100.0)),
    (at(2, 2), ItemKind::Key, point(128.0, 100.0)),
    (at(2, 2), ItemKind::Rupee, point(80.0, 180.0)),
    (at(3, 3), ItemKind::Potion, point(128.0, 80.0)),
    (at(4, 4), ItemKind::Bomb, point(80.0, 140.0)),
    (at(4, 4), ItemKind::Rupee, point(180.0, 140.0)),
    (at(5, 5), ItemKind::Key, point(128.0, 60.0)),
    (at(6, 6), ItemKind::Key, point(128.0, 100.0)),
    (at(6, 6), ItemKind::Potion, point(200.0, 160.0)),
    (at(7, 7), ItemKind::BossKey, point(128.0, 100.0)),
    (at(0, 8), ItemKind::Rupee, point(64.0, 60.0)),
    (at(0, 8), ItemKind::Bomb, point(192.0, 60.0)),
    (at(8, 0), ItemKind::Rupee, point(128.0, 80.0)),
    (at(8, 0), ItemKind::Potion, point(64.0, 140.0)),
    (at(2, 5), ItemKind::Key, point(128.0, 120.0)),
    (at(5, 2), ItemKind::Bomb, point(128.0, 120.0)),
    (at(3, 6), ItemKind::Rupee, point(100.0, 100.0)),
    (at(3, 6), ItemKind::Rupee, point(156.0, 100.0)),
    (at(6, 3), ItemKind::Potion, point(128.0, 80.0)),
];

const OBSTACLE_TABLE: [(RoomCoord, ObstacleKind, Vec2); 4] = [
    (at(7, 8), ObstacleKind::Door(DoorLock::BossKey), point(240.0, 120.0)),
    (at(4, 4), ObstacleKind::Rock, point(112.0, 64.0)),
    (at(2, 2), ObstacleKind::Door(DoorLock::Key), point(240.0, 120.0)),
    (at(6, 6), ObstacleKind::Door(DoorLock::Key), point(240.0, 120.0)),
];
