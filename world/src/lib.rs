#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Overworld.

pub mod layout;
pub mod spawn_tables;

mod inventory;
mod physics;
mod registry;
mod schedule;

use std::time::Duration;

use glam::Vec2;
use overworld_core::{
    Command, Direction, EnemyId, Event, Inventory, ItemId, ItemKind, ObstacleId, ObstacleKind,
    PlayerStatus, RoomCoord, RoomLayout, TransitionPhase, TransitionRefusal, WorldProgress,
    PLAYER_BODY, PLAYER_MAX_HEALTH, ROOM_HEIGHT, ROOM_WIDTH, WELCOME_BANNER,
};
use tracing::{debug, info};

pub use inventory::{LedgerError, POTION_HEALING};
pub use layout::LayoutError;

use inventory::{Ledger, Pickup};
use registry::{EntityRegistry, RoomCensus};
use schedule::{Schedule, Task};

/// Room the player occupies when a world is created.
pub const STARTING_ROOM: RoomCoord = RoomCoord::new(0, 0);

/// Position of the player when a world is created.
pub const PLAYER_START: Vec2 = Vec2::new(ROOM_WIDTH / 2.0, ROOM_HEIGHT / 2.0);

/// Player travel speed along each held axis, in room units per second.
pub const PLAYER_SPEED: f32 = 80.0;

/// Distance between the player and the sword hitbox.
pub const SWORD_REACH: f32 = 20.0;

/// Time the sword stays active after a swing.
pub const SWORD_ACTIVE: Duration = Duration::from_millis(200);

/// Time the player ignores damage after being hit.
pub const INVULNERABILITY: Duration = Duration::from_millis(1000);

/// Time the victory banner stays visible.
pub const VICTORY_BANNER: Duration = Duration::from_millis(3000);

/// Time after a room swap during which further transitions are refused.
pub const TRANSITION_GUARD: Duration = Duration::from_millis(100);

/// Distance from an edge at which the player re-enters the next room.
pub const ENTRY_INSET: f32 = 8.0;

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Vec2,
    velocity: Vec2,
    health: u8,
    facing: Direction,
    invulnerable: bool,
    invulnerability_window: u32,
    status: PlayerStatus,
}

impl Player {
    fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            health: PLAYER_MAX_HEALTH,
            facing: Direction::South,
            invulnerable: false,
            invulnerability_window: 0,
            status: PlayerStatus::Active,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Sword {
    active: bool,
    swing: u32,
    position: Vec2,
    facing: Direction,
}

/// Represents the authoritative Overworld state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    clock: Duration,
    tick_index: u64,
    room: RoomCoord,
    layout: RoomLayout,
    phase: TransitionPhase,
    registry: EntityRegistry,
    ledger: Ledger,
    progress: WorldProgress,
    player: Player,
    sword: Sword,
    victory_banner: bool,
    schedule: Schedule,
}

impl World {
    /// Creates a new world with the player standing in the starting room.
    #[must_use]
    pub fn new() -> Self {
        Self::populated(STARTING_ROOM, layout::generate_layout(STARTING_ROOM))
    }

    /// Creates a new world with the player standing in the provided room.
    pub fn starting_in(room: RoomCoord) -> Result<Self, LayoutError> {
        let layout = layout::layout_for(room)?;
        Ok(Self::populated(room, layout))
    }

    /// Replaces the starting inventory.
    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.ledger = Ledger::new(inventory);
        self
    }

    /// Replaces the starting position of the player.
    #[must_use]
    pub fn with_player_position(mut self, position: Vec2) -> Self {
        self.player.position = position;
        self
    }

    fn populated(room: RoomCoord, layout: RoomLayout) -> Self {
        let progress = WorldProgress::default();
        let mut registry = EntityRegistry::new();
        let census = registry.load_room(room, &layout, &progress);
        info!(
            room = %room,
            enemies = census.enemies,
            items = census.items,
            obstacles = census.obstacles,
            "world_created"
        );

        Self {
            banner: WELCOME_BANNER,
            clock: Duration::ZERO,
            tick_index: 0,
            room,
            layout,
            phase: TransitionPhase::Steady,
            registry,
            ledger: Ledger::default(),
            progress,
            player: Player::new(PLAYER_START),
            sword: Sword {
                active: false,
                swing: 0,
                position: PLAYER_START,
                facing: Direction::South,
            },
            victory_banner: false,
            schedule: Schedule::new(),
        }
    }

    fn run_due_tasks(&mut self, out_events: &mut Vec<Event>) {
        for task in self.schedule.drain_due(self.clock) {
            match task {
                Task::EndInvulnerability { window } => {
                    if self.player.invulnerable && self.player.invulnerability_window == window {
                        self.player.invulnerable = false;
                        out_events.push(Event::InvulnerabilityEnded);
                    } else {
                        debug!(window, "stale_invulnerability_task_ignored");
                    }
                }
                Task::SheatheSword { swing } => {
                    if self.sword.active && self.sword.swing == swing {
                        self.sword.active = false;
                        out_events.push(Event::SwordSheathed);
                    } else {
                        debug!(swing, "stale_sheathe_task_ignored");
                    }
                }
                Task::DismissVictoryBanner => {
                    if self.victory_banner {
                        self.victory_banner = false;
                        out_events.push(Event::VictoryBannerDismissed);
                    }
                }
                Task::ReleaseTransitionGuard => {
                    if self.phase == TransitionPhase::Transitioning {
                        self.phase = TransitionPhase::Steady;
                        out_events.push(Event::TransitionSettled { room: self.room });
                    }
                }
            }
        }
    }

    fn integrate(&mut self, dt: Duration) {
        let seconds = dt.as_secs_f32();

        if self.player.status == PlayerStatus::Active && self.player.velocity != Vec2::ZERO {
            let solids = self.registry.player_solids();
            let moved = physics::step_body(
                self.player.position,
                PLAYER_BODY,
                self.player.velocity * seconds,
                &solids,
            );
            self.player.position = physics::clamp_center_to_room(moved);
        }

        let solids = self.registry.enemy_solids();
        for enemy in self.registry.enemies_mut() {
            if enemy.velocity == Vec2::ZERO {
                continue;
            }
            let size = enemy.variant.body_size();
            let moved = physics::step_body(enemy.position, size, enemy.velocity * seconds, &solids);
            enemy.position = physics::clamp_to_room(moved, size);
        }
    }

    fn cancel_sword(&mut self, out_events: &mut Vec<Event>) {
        self.schedule
            .cancel_where(|task| matches!(task, Task::SheatheSword { .. }));
        if self.sword.active {
            self.sword.active = false;
            out_events.push(Event::SwordSheathed);
        }
    }

    fn strike_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if !self.sword.active {
            debug!(enemy = enemy.get(), "strike_ignored_sword_inactive");
            return;
        }
        let Some(target) = self.registry.enemy_mut(enemy) else {
            debug!(enemy = enemy.get(), "strike_ignored_missing_enemy");
            return;
        };

        target.health = target.health.saturating_sub(1);
        let remaining = target.health;
        out_events.push(Event::EnemyStruck { enemy, remaining });

        if remaining == 0 {
            if let Some(defeated) = self.registry.remove_enemy(enemy) {
                out_events.push(Event::EnemyDefeated {
                    enemy,
                    variant: defeated.variant,
                    position: defeated.position,
                });
            }
        }
    }

    fn damage_player(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if self.player.invulnerable || self.player.status == PlayerStatus::Defeated {
            return;
        }
        if self.registry.enemy(enemy).is_none() {
            debug!(enemy = enemy.get(), "damage_ignored_missing_enemy");
            return;
        }

        let player = &mut self.player;
        player.health = player.health.saturating_sub(1);
        player.invulnerable = true;
        player.invulnerability_window = player.invulnerability_window.wrapping_add(1);
        let window = player.invulnerability_window;
        let health = player.health;
        self.schedule.schedule(
            self.clock + INVULNERABILITY,
            Task::EndInvulnerability { window },
        );
        out_events.push(Event::PlayerDamaged { health });

        if health == 0 {
            self.player.status = PlayerStatus::Defeated;
            self.player.velocity = Vec2::ZERO;
            info!(room = %self.room, "player_defeated");
            out_events.push(Event::PlayerDefeated);
        }
    }

    fn collect_item(&mut self, item: ItemId, out_events: &mut Vec<Event>) {
        if self.player.status == PlayerStatus::Defeated {
            debug!(item = item.get(), "pickup_ignored_player_defeated");
            return;
        }
        let Some(collected) = self.registry.remove_item(item) else {
            debug!(item = item.get(), "pickup_ignored_missing_item");
            return;
        };

        out_events.push(Event::ItemCollected {
            item,
            kind: collected.kind,
        });
        match self.ledger.collect(collected.kind) {
            Pickup::Stocked => out_events.push(Event::InventoryChanged {
                inventory: self.ledger.inventory(),
            }),
            Pickup::Heal { amount } => {
                let health = self
                    .player
                    .health
                    .saturating_add(amount)
                    .min(PLAYER_MAX_HEALTH);
                self.player.health = health;
                out_events.push(Event::PlayerHealed { health });
            }
        }
    }

    fn open_door(&mut self, door: ObstacleId, out_events: &mut Vec<Event>) {
        let lock = match self.registry.obstacle(door).map(|obstacle| obstacle.kind) {
            Some(ObstacleKind::Door(lock)) => lock,
            Some(ObstacleKind::Rock) => {
                debug!(door = door.get(), "open_ignored_not_a_door");
                return;
            }
            None => {
                debug!(door = door.get(), "open_ignored_missing_door");
                return;
            }
        };

        match self.ledger.consume(lock) {
            Ok(()) => match self.registry.remove_obstacle(door) {
                Some(opened) => {
                    info!(
                        room = %self.room,
                        door = door.get(),
                        ?lock,
                        position = ?opened.position,
                        "door_opened"
                    );
                    out_events.push(Event::DoorOpened { door, lock });
                    out_events.push(Event::InventoryChanged {
                        inventory: self.ledger.inventory(),
                    });
                }
                None => debug!(door = door.get(), "open_ignored_missing_door"),
            },
            Err(error) => {
                debug!(door = door.get(), error = %error, "door_stayed_locked");
                out_events.push(Event::DoorStayedLocked { door, lock });
            }
        }
    }

    fn conclude_boss_fight(&mut self, position: Vec2, out_events: &mut Vec<Event>) {
        if self.progress.boss_defeated {
            debug!("boss_fight_already_concluded");
            return;
        }

        self.progress.boss_defeated = true;
        info!(room = %self.room, "boss_defeated");
        out_events.push(Event::BossDefeated { position });

        let kind = ItemKind::BossKey;
        let item = self.registry.spawn_item(kind, position);
        out_events.push(Event::ItemSpawned {
            item,
            kind,
            position,
        });

        self.victory_banner = true;
        self.schedule
            .schedule(self.clock + VICTORY_BANNER, Task::DismissVictoryBanner);
        out_events.push(Event::VictoryBannerShown);
    }

    fn enter_room(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.phase == TransitionPhase::Transitioning {
            out_events.push(Event::TransitionRefused {
                direction,
                reason: TransitionRefusal::Reentrant,
            });
            return;
        }
        let from = self.room;
        let to = from.neighbor(direction);
        let layout = match layout::layout_for(to) {
            Ok(layout) => layout,
            Err(error) => {
                debug!(error = %error, "transition_refused");
                out_events.push(Event::TransitionRefused {
                    direction,
                    reason: TransitionRefusal::OutOfBounds,
                });
                return;
            }
        };

        self.phase = TransitionPhase::Transitioning;
        self.cancel_sword(out_events);

        self.room = to;
        self.player.position = entry_position(self.player.position, direction);
        self.player.velocity = Vec2::ZERO;

        self.registry.unload_room();
        out_events.push(Event::RoomUnloaded { room: from });
        self.layout = layout;
        let census = self.registry.load_room(to, &self.layout, &self.progress);

        self.schedule
            .schedule(self.clock + TRANSITION_GUARD, Task::ReleaseTransitionGuard);

        info!(
            from = %from,
            to = %to,
            enemies = census.enemies,
            items = census.items,
            obstacles = census.obstacles,
            "room_entered"
        );
        out_events.push(Event::TransitionStarted {
            from,
            to,
            direction,
        });
        out_events.push(room_loaded(to, census));
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn room_loaded(room: RoomCoord, census: RoomCensus) -> Event {
    Event::RoomLoaded {
        room,
        enemies: census.enemies,
        items: census.items,
        obstacles: census.obstacles,
    }
}

/// Position on the far side of the next room after leaving through `direction`.
/// Places the player just inside the edge they arrive through.
fn entry_position(position: Vec2, direction: Direction) -> Vec2 {
    match direction.opposite() {
        Direction::West => Vec2::new(ENTRY_INSET, position.y),
        Direction::East => Vec2::new(ROOM_WIDTH - ENTRY_INSET, position.y),
        Direction::North => Vec2::new(position.x, ENTRY_INSET),
        Direction::South => Vec2::new(position.x, ROOM_HEIGHT - ENTRY_INSET),
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            world.run_due_tasks(out_events);
            if world.phase == TransitionPhase::Steady {
                world.integrate(dt);
            }
        }
        Command::SteerPlayer {
            horizontal,
            vertical,
        } => {
            if world.player.status == PlayerStatus::Defeated {
                return;
            }
            let heading = horizontal.map_or(Vec2::ZERO, Direction::unit)
                + vertical.map_or(Vec2::ZERO, Direction::unit);
            world.player.velocity = heading * PLAYER_SPEED;
            if let Some(facing) = vertical.or(horizontal) {
                world.player.facing = facing;
            }
        }
        Command::SwingSword => {
            if world.player.status == PlayerStatus::Defeated || world.sword.active {
                return;
            }
            let facing = world.player.facing;
            let sword = &mut world.sword;
            sword.active = true;
            sword.swing = sword.swing.wrapping_add(1);
            sword.facing = facing;
            sword.position = world.player.position + facing.unit() * SWORD_REACH;
            let swing = sword.swing;
            world
                .schedule
                .schedule(world.clock + SWORD_ACTIVE, Task::SheatheSword { swing });
            out_events.push(Event::SwordSwung { facing });
        }
        Command::SteerEnemy {
            enemy,
            direction,
            move_timer,
        } => match world.registry.enemy_mut(enemy) {
            Some(target) => {
                target.facing = direction;
                target.move_timer = move_timer;
                target.velocity = direction.unit() * target.variant.speed();
            }
            None => debug!(enemy = enemy.get(), "steer_ignored_missing_enemy"),
        },
        Command::StrikeEnemy { enemy } => world.strike_enemy(enemy, out_events),
        Command::DamagePlayer { enemy } => world.damage_player(enemy, out_events),
        Command::ConcludeBossFight { position } => world.conclude_boss_fight(position, out_events),
        Command::SpawnItem { kind, position } => {
            let item = world.registry.spawn_item(kind, position);
            out_events.push(Event::ItemSpawned {
                item,
                kind,
                position,
            });
        }
        Command::CollectItem { item } => world.collect_item(item, out_events),
        Command::OpenDoor { door } => world.open_door(door, out_events),
        Command::EnterRoom { direction } => world.enter_room(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use overworld_core::{
        EnemyView, Inventory, ItemView, ObstacleView, PlayerSnapshot, RoomCoord, RoomLayout,
        SwordSnapshot, TransitionPhase, WorldProgress,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Room the player currently occupies.
    #[must_use]
    pub fn current_room(world: &World) -> RoomCoord {
        world.room
    }

    /// Sealed layout of the current room.
    #[must_use]
    pub fn layout(world: &World) -> &RoomLayout {
        &world.layout
    }

    /// Current phase of the transition state machine.
    #[must_use]
    pub fn transition_phase(world: &World) -> TransitionPhase {
        world.phase
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player.position,
            velocity: player.velocity,
            health: player.health,
            facing: player.facing,
            invulnerable: player.invulnerable,
            status: player.status,
        }
    }

    /// Captures the sword hitbox.
    #[must_use]
    pub fn sword(world: &World) -> SwordSnapshot {
        SwordSnapshot {
            active: world.sword.active,
            position: world.sword.position,
            facing: world.sword.facing,
        }
    }

    /// Captures a read-only view of the enemies in the current room.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .registry
                .enemies()
                .iter()
                .map(|enemy| enemy.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the items in the current room.
    #[must_use]
    pub fn item_view(world: &World) -> ItemView {
        ItemView::from_snapshots(
            world
                .registry
                .items()
                .iter()
                .map(|item| item.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the obstacles in the current room.
    #[must_use]
    pub fn obstacle_view(world: &World) -> ObstacleView {
        ObstacleView::from_snapshots(
            world
                .registry
                .obstacles()
                .iter()
                .map(|obstacle| obstacle.snapshot())
                .collect(),
        )
    }

    /// World-global inventory counters.
    #[must_use]
    pub fn inventory(world: &World) -> Inventory {
        world.ledger.inventory()
    }

    /// World-wide progress flags.
    #[must_use]
    pub fn progress(world: &World) -> WorldProgress {
        world.progress
    }

    /// Reports whether the victory banner is visible.
    #[must_use]
    pub fn victory_banner_visible(world: &World) -> bool {
        world.victory_banner
    }

    /// Simulated time elapsed since the world was created.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
