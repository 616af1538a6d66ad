use glam::Vec2;
use overworld_core::{
    Aabb, Direction, EnemyId, EnemySnapshot, EnemyVariant, ItemId, ItemKind, ItemSnapshot,
    ObstacleId, ObstacleKind, ObstacleSnapshot, RoomCoord, RoomLayout, WorldProgress,
};

use crate::spawn_tables;

/// Enemy owned by the registry.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) variant: EnemyVariant,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) health: u32,
    pub(crate) facing: Direction,
    pub(crate) move_timer: u32,
}

impl Enemy {
    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            variant: self.variant,
            position: self.position,
            health: self.health,
            facing: self.facing,
            move_timer: self.move_timer,
        }
    }
}

/// Item owned by the registry.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Item {
    pub(crate) id: ItemId,
    pub(crate) kind: ItemKind,
    pub(crate) position: Vec2,
}

impl Item {
    pub(crate) fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
        }
    }
}

/// Obstacle owned by the registry.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Obstacle {
    pub(crate) id: ObstacleId,
    pub(crate) kind: ObstacleKind,
    pub(crate) position: Vec2,
}

impl Obstacle {
    pub(crate) fn snapshot(&self) -> ObstacleSnapshot {
        ObstacleSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
        }
    }

    pub(crate) fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.kind.body_size())
    }
}

/// Number of entities created by a room load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RoomCensus {
    pub(crate) enemies: usize,
    pub(crate) items: usize,
    pub(crate) obstacles: usize,
}

/// Owns every room-scoped entity together with the static wall geometry.
///
/// Identifiers are drawn from counters that only grow, so an id that was
/// destroyed never resolves again.
#[derive(Debug, Default)]
pub(crate) struct EntityRegistry {
    next_enemy: u32,
    next_item: u32,
    next_obstacle: u32,
    enemies: Vec<Enemy>,
    items: Vec<Item>,
    obstacles: Vec<Obstacle>,
    walls: Vec<Aabb>,
}

impl EntityRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the registry contents with the spawn tables of `room`.
    pub(crate) fn load_room(
        &mut self,
        room: RoomCoord,
        layout: &RoomLayout,
        progress: &WorldProgress,
    ) -> RoomCensus {
        self.unload_room();

        for spawn in spawn_tables::enemies_for(room, progress) {
            let id = EnemyId::new(self.next_enemy);
            self.next_enemy += 1;
            self.enemies.push(Enemy {
                id,
                variant: spawn.variant,
                position: spawn.position,
                velocity: Vec2::ZERO,
                health: spawn.variant.max_health(),
                facing: Direction::South,
                move_timer: 0,
            });
        }
        for spawn in spawn_tables::items_for(room) {
            let _ = self.spawn_item(spawn.kind, spawn.position);
        }
        for spawn in spawn_tables::obstacles_for(room) {
            let id = ObstacleId::new(self.next_obstacle);
            self.next_obstacle += 1;
            self.obstacles.push(Obstacle {
                id,
                kind: spawn.kind,
                position: spawn.position,
            });
        }
        self.walls = layout
            .solid_cells()
            .map(|(column, row)| RoomLayout::cell_bounds(column, row))
            .collect();

        RoomCensus {
            enemies: self.enemies.len(),
            items: self.items.len(),
            obstacles: self.obstacles.len(),
        }
    }

    /// Destroys every entity and releases the wall geometry.
    pub(crate) fn unload_room(&mut self) {
        self.enemies.clear();
        self.items.clear();
        self.obstacles.clear();
        self.walls.clear();
    }

    pub(crate) fn spawn_item(&mut self, kind: ItemKind, position: Vec2) -> ItemId {
        let id = ItemId::new(self.next_item);
        self.next_item += 1;
        self.items.push(Item { id, kind, position });
        id
    }

    pub(crate) fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub(crate) fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub(crate) fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub(crate) fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub(crate) fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub(crate) fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|obstacle| obstacle.id == id)
    }

    pub(crate) fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|obstacle| obstacle.id == id)?;
        Some(self.obstacles.remove(index))
    }

    /// Geometry that stops the player: walls, water and rocks.
    pub(crate) fn player_solids(&self) -> Vec<Aabb> {
        let rocks = self
            .obstacles
            .iter()
            .filter(|obstacle| obstacle.kind.blocks_player())
            .map(Obstacle::bounds);
        self.walls.iter().copied().chain(rocks).collect()
    }

    /// Geometry that stops enemies: walls, water and every live obstacle.
    pub(crate) fn enemy_solids(&self) -> Vec<Aabb> {
        let obstacles = self.obstacles.iter().map(Obstacle::bounds);
        self.walls.iter().copied().chain(obstacles).collect()
    }
}
