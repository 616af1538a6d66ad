#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Overworld engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the Overworld.";

/// Number of tile columns composing a single room.
pub const ROOM_COLUMNS: usize = 16;

/// Number of tile rows composing a single room.
pub const ROOM_ROWS: usize = 15;

/// Side length of a square tile expressed in room units.
pub const TILE_LENGTH: f32 = 16.0;

/// Width of a room expressed in room units.
pub const ROOM_WIDTH: f32 = ROOM_COLUMNS as f32 * TILE_LENGTH;

/// Height of a room expressed in room units.
pub const ROOM_HEIGHT: f32 = ROOM_ROWS as f32 * TILE_LENGTH;

/// Smallest valid room coordinate along either axis.
pub const WORLD_MIN: i32 = 0;

/// Largest valid room coordinate along either axis.
pub const WORLD_MAX: i32 = 8;

/// Maximum number of hearts the player can hold.
pub const PLAYER_MAX_HEALTH: u8 = 6;

/// Distance below which the player can interact with a door.
pub const DOOR_INTERACTION_RADIUS: f32 = 24.0;

/// Collision footprint of the player.
pub const PLAYER_BODY: Vec2 = Vec2::new(16.0, 16.0);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the game clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the player's velocity with the held steering directions.
    SteerPlayer {
        /// Horizontal heading, if any horizontal direction is held.
        horizontal: Option<Direction>,
        /// Vertical heading, if any vertical direction is held.
        vertical: Option<Direction>,
    },
    /// Requests that the player swing the sword in the facing direction.
    SwingSword,
    /// Records an AI decision for a single enemy.
    SteerEnemy {
        /// Enemy receiving the decision.
        enemy: EnemyId,
        /// Heading the enemy travels in until its next decision.
        direction: Direction,
        /// Ticks remaining until the enemy decides again.
        move_timer: u32,
    },
    /// Applies a single sword hit to an enemy.
    StrikeEnemy {
        /// Enemy struck by the sword.
        enemy: EnemyId,
    },
    /// Applies contact damage from an enemy to the player.
    DamagePlayer {
        /// Enemy that touched the player.
        enemy: EnemyId,
    },
    /// Records the boss defeat and drops the boss key.
    ConcludeBossFight {
        /// Last position of the boss, where the boss key appears.
        position: Vec2,
    },
    /// Places a new item into the current room.
    SpawnItem {
        /// Kind of item to create.
        kind: ItemKind,
        /// Position of the item in room units.
        position: Vec2,
    },
    /// Picks up an item touched by the player.
    CollectItem {
        /// Item being collected.
        item: ItemId,
    },
    /// Spends a key to remove a door obstacle.
    OpenDoor {
        /// Door being opened.
        door: ObstacleId,
    },
    /// Requests a transition into the neighbouring room.
    EnterRoom {
        /// Side of the current room the player leaves through.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the game clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the entities of a room were released.
    RoomUnloaded {
        /// Room whose contents were destroyed.
        room: RoomCoord,
    },
    /// Announces that a room was populated from its layout and spawn tables.
    ///
    /// Collaborators must rebind collision and overlap tracking against the
    /// fresh entity sets when they observe this event.
    RoomLoaded {
        /// Room that became active.
        room: RoomCoord,
        /// Number of enemies spawned for the room.
        enemies: usize,
        /// Number of items spawned for the room.
        items: usize,
        /// Number of obstacles spawned for the room.
        obstacles: usize,
    },
    /// Confirms that a transition between two rooms started.
    TransitionStarted {
        /// Room the player left.
        from: RoomCoord,
        /// Room the player entered.
        to: RoomCoord,
        /// Side of the previous room the player left through.
        direction: Direction,
    },
    /// Announces that the transition guard elapsed and play resumed.
    TransitionSettled {
        /// Room that is now steady.
        room: RoomCoord,
    },
    /// Reports that a transition request was rejected.
    TransitionRefused {
        /// Side of the room the request targeted.
        direction: Direction,
        /// Specific reason the transition was refused.
        reason: TransitionRefusal,
    },
    /// Confirms that the sword became active.
    SwordSwung {
        /// Direction the sword points in.
        facing: Direction,
    },
    /// Confirms that the sword's active window closed.
    SwordSheathed,
    /// Confirms that an enemy lost one point of health to the sword.
    EnemyStruck {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Health left after the hit.
        remaining: u32,
    },
    /// Confirms that an enemy ran out of health and was removed.
    EnemyDefeated {
        /// Enemy that was removed.
        enemy: EnemyId,
        /// Variant of the defeated enemy.
        variant: EnemyVariant,
        /// Last position of the enemy.
        position: Vec2,
    },
    /// Confirms that the player lost one point of health.
    PlayerDamaged {
        /// Health left after the hit.
        health: u8,
    },
    /// Announces that the player's health reached zero.
    PlayerDefeated,
    /// Announces that the player's invulnerability window closed.
    InvulnerabilityEnded,
    /// Confirms that an item was placed into the current room.
    ItemSpawned {
        /// Identifier allocated to the item.
        item: ItemId,
        /// Kind of item that appeared.
        kind: ItemKind,
        /// Position of the item in room units.
        position: Vec2,
    },
    /// Confirms that the player picked up an item.
    ItemCollected {
        /// Item that was removed from the room.
        item: ItemId,
        /// Kind of the collected item.
        kind: ItemKind,
    },
    /// Confirms that the player regained health.
    PlayerHealed {
        /// Health after healing.
        health: u8,
    },
    /// Reports the inventory after any change.
    InventoryChanged {
        /// Inventory contents after the change.
        inventory: Inventory,
    },
    /// Confirms that a door was opened and removed.
    DoorOpened {
        /// Door that was removed.
        door: ObstacleId,
        /// Lock that was consumed.
        lock: DoorLock,
    },
    /// Reports that a door could not be opened for lack of a matching key.
    DoorStayedLocked {
        /// Door that remains in place.
        door: ObstacleId,
        /// Lock the player could not satisfy.
        lock: DoorLock,
    },
    /// Announces the world-wide boss defeat.
    BossDefeated {
        /// Position where the boss fell.
        position: Vec2,
    },
    /// Announces that the victory banner became visible.
    VictoryBannerShown,
    /// Announces that the victory banner was dismissed.
    VictoryBannerDismissed,
}

impl Event {
    /// Audio cue that accompanies the event, if any.
    #[must_use]
    pub const fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::SwordSwung { .. } => Some(SoundCue::Sword),
            Self::EnemyStruck { .. } => Some(SoundCue::Hit),
            Self::ItemCollected { .. } => Some(SoundCue::Item),
            Self::PlayerDamaged { .. } => Some(SoundCue::Damage),
            Self::DoorOpened { .. } => Some(SoundCue::Door),
            Self::BossDefeated { .. } => Some(SoundCue::Victory),
            _ => None,
        }
    }
}

/// Fire-and-forget audio cues emitted by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The sword was swung.
    Sword,
    /// An enemy was struck.
    Hit,
    /// An item was collected.
    Item,
    /// The player took damage.
    Damage,
    /// A door was opened.
    Door,
    /// The boss was defeated.
    Victory,
}

impl SoundCue {
    /// Stable name used by audio collaborators to look up the cue.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sword => "sword",
            Self::Hit => "hit",
            Self::Item => "item",
            Self::Damage => "damage",
            Self::Door => "door",
            Self::Victory => "victory",
        }
    }
}

/// Cardinal directions shared by facing, AI headings and room edges.
///
/// The discriminants follow the facing encoding `0..=3` used by the AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing x; the left edge of a room.
    West,
    /// Toward increasing x; the right edge of a room.
    East,
    /// Toward decreasing y; the top edge of a room.
    North,
    /// Toward increasing y; the bottom edge of a room.
    South,
}

impl Direction {
    /// Every direction in facing-index order.
    pub const ALL: [Direction; 4] = [Self::West, Self::East, Self::North, Self::South];

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::West => Self::East,
            Self::East => Self::West,
            Self::North => Self::South,
            Self::South => Self::North,
        }
    }

    /// Unit vector in room space, where y grows downward.
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        match self {
            Self::West => Vec2::new(-1.0, 0.0),
            Self::East => Vec2::new(1.0, 0.0),
            Self::North => Vec2::new(0.0, -1.0),
            Self::South => Vec2::new(0.0, 1.0),
        }
    }

    /// Offset applied to a room coordinate when crossing this edge.
    #[must_use]
    pub const fn room_offset(self) -> (i32, i32) {
        match self {
            Self::West => (-1, 0),
            Self::East => (1, 0),
            Self::North => (0, -1),
            Self::South => (0, 1),
        }
    }

    /// Reports whether the direction runs along the x axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::West | Self::East)
    }
}

/// Location of a room within the world grid.
///
/// Coordinates outside `[WORLD_MIN, WORLD_MAX]` are representable so that
/// neighbours can be computed, but such rooms never exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomCoord {
    x: i32,
    y: i32,
}

impl RoomCoord {
    /// Creates a new room coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the room within the world grid.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the room within the world grid.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Reports whether the coordinate names an existing room.
    #[must_use]
    pub const fn is_within_world(&self) -> bool {
        self.x >= WORLD_MIN && self.x <= WORLD_MAX && self.y >= WORLD_MIN && self.y <= WORLD_MAX
    }

    /// Coordinate of the adjacent room across the provided edge.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.room_offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Reports whether a room exists across the provided edge.
    #[must_use]
    pub const fn has_neighbor(self, direction: Direction) -> bool {
        self.neighbor(direction).is_within_world()
    }
}

impl fmt::Display for RoomCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Gameplay classification of a single layout cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Walkable ground.
    Grass,
    /// Impassable rock wall.
    Wall,
    /// Impassable water.
    Water,
}

impl Tile {
    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Water)
    }

    /// Character used when tiles are written as glyph art.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Grass => '.',
            Self::Wall => '#',
            Self::Water => '~',
        }
    }

    /// Parses a glyph written by [`Tile::glyph`].
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Grass),
            '#' => Some(Self::Wall),
            '~' => Some(Self::Water),
            _ => None,
        }
    }
}

/// Fixed-size tile grid describing one room.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoomLayout {
    tiles: [[Tile; ROOM_COLUMNS]; ROOM_ROWS],
}

impl RoomLayout {
    /// Freezes a fully generated tile grid into a layout.
    #[must_use]
    pub const fn from_tiles(tiles: [[Tile; ROOM_COLUMNS]; ROOM_ROWS]) -> Self {
        Self { tiles }
    }

    /// Tile stored at the provided column and row, if inside the room.
    #[must_use]
    pub fn tile(&self, column: usize, row: usize) -> Option<Tile> {
        self.tiles.get(row).and_then(|cells| cells.get(column)).copied()
    }

    /// Rows of the layout from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[[Tile; ROOM_COLUMNS]; ROOM_ROWS] {
        &self.tiles
    }

    /// Iterator over the `(column, row)` indices of every solid cell.
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, tile)| tile.is_solid())
                .map(move |(column, _)| (column, row))
        })
    }

    /// Collision bounds of the cell at the provided column and row.
    #[must_use]
    pub fn cell_bounds(column: usize, row: usize) -> Aabb {
        let min = Vec2::new(column as f32 * TILE_LENGTH, row as f32 * TILE_LENGTH);
        Aabb::new(min, min + Vec2::splat(TILE_LENGTH))
    }
}

/// Axis-aligned bounding box used for collision and overlap tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    /// Creates a box from its minimum and maximum corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a box of the provided size centred on a position.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Upper-left corner of the box.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Lower-right corner of the box.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Reports whether two boxes share interior area. Touching edges do not count.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Unique identifier assigned to an enemy. Identifiers are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an item. Identifiers are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an obstacle. Identifiers are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(u32);

impl ObstacleId {
    /// Creates a new obstacle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Behavioural variants of enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyVariant {
    /// Wandering enemy that picks random headings.
    Normal,
    /// Singleton boss that chases the player.
    Boss,
}

impl EnemyVariant {
    /// Health the enemy spawns with.
    #[must_use]
    pub const fn max_health(self) -> u32 {
        match self {
            Self::Normal => 2,
            Self::Boss => 10,
        }
    }

    /// Travel speed in room units per second.
    #[must_use]
    pub const fn speed(self) -> f32 {
        match self {
            Self::Normal => 40.0,
            Self::Boss => 60.0,
        }
    }

    /// Number of ticks between AI decisions.
    #[must_use]
    pub const fn decision_interval(self) -> u32 {
        match self {
            Self::Normal => 60,
            Self::Boss => 30,
        }
    }

    /// Collision footprint of the enemy.
    #[must_use]
    pub const fn body_size(self) -> Vec2 {
        match self {
            Self::Normal => Vec2::new(16.0, 16.0),
            Self::Boss => Vec2::new(32.0, 32.0),
        }
    }
}

/// Kinds of collectible items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Opens a regular door.
    Key,
    /// Currency.
    Rupee,
    /// Explosive stock.
    Bomb,
    /// Restores health.
    Potion,
    /// Opens the boss door.
    BossKey,
}

impl ItemKind {
    /// Collision footprint of the item.
    #[must_use]
    pub const fn body_size(self) -> Vec2 {
        match self {
            Self::Key | Self::BossKey => Vec2::new(16.0, 8.0),
            Self::Rupee | Self::Potion => Vec2::new(16.0, 12.0),
            Self::Bomb => Vec2::new(16.0, 16.0),
        }
    }
}

/// Key requirement of a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DoorLock {
    /// Opened with a regular key.
    Key,
    /// Opened with the boss key.
    BossKey,
}

/// Kinds of static room obstacles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Permanently impassable boulder.
    Rock,
    /// Door that gates a room exit until unlocked.
    Door(DoorLock),
}

impl ObstacleKind {
    /// Collision footprint of the obstacle.
    #[must_use]
    pub const fn body_size(self) -> Vec2 {
        match self {
            Self::Rock => Vec2::new(16.0, 16.0),
            Self::Door(_) => Vec2::new(32.0, 16.0),
        }
    }

    /// Reports whether the obstacle stops the player's movement.
    #[must_use]
    pub const fn blocks_player(self) -> bool {
        matches!(self, Self::Rock)
    }
}

/// World-global counters carried across rooms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    /// Regular keys held.
    pub keys: u32,
    /// Rupees held.
    pub rupees: u32,
    /// Bombs held.
    pub bombs: u32,
    /// Boss keys held.
    pub boss_keys: u32,
}

impl Inventory {
    /// Number of keys available for the provided lock.
    #[must_use]
    pub const fn count_for(&self, lock: DoorLock) -> u32 {
        match lock {
            DoorLock::Key => self.keys,
            DoorLock::BossKey => self.boss_keys,
        }
    }

    /// Removes one key matching the lock, returning `false` when none is held.
    pub fn take_key(&mut self, lock: DoorLock) -> bool {
        let counter = match lock {
            DoorLock::Key => &mut self.keys,
            DoorLock::BossKey => &mut self.boss_keys,
        };
        match counter.checked_sub(1) {
            Some(remaining) => {
                *counter = remaining;
                true
            }
            None => false,
        }
    }
}

/// World-wide progress flags that outlive every room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldProgress {
    /// Set once when the boss falls; never reset.
    pub boss_defeated: bool,
}

/// Per-frame input snapshot gathered by adapters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputState {
    /// Whether the left direction is held.
    pub left: bool,
    /// Whether the right direction is held.
    pub right: bool,
    /// Whether the up direction is held.
    pub up: bool,
    /// Whether the down direction is held.
    pub down: bool,
    /// Whether the attack action was pressed on this frame.
    pub attack: bool,
    /// Whether the confirm/use action was pressed on this frame.
    pub confirm: bool,
}

impl InputState {
    /// Horizontal steering; left wins when both sides are held.
    #[must_use]
    pub const fn horizontal(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::West)
        } else if self.right {
            Some(Direction::East)
        } else {
            None
        }
    }

    /// Vertical steering; up wins when both sides are held.
    #[must_use]
    pub const fn vertical(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::North)
        } else if self.down {
            Some(Direction::South)
        } else {
            None
        }
    }
}

/// Overlap reported by the collision collaborator for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlap {
    /// The sword hitbox overlaps an enemy.
    SwordEnemy {
        /// Enemy touched by the sword.
        enemy: EnemyId,
    },
    /// The player overlaps an enemy.
    PlayerEnemy {
        /// Enemy touching the player.
        enemy: EnemyId,
    },
    /// The player overlaps an item.
    PlayerItem {
        /// Item touched by the player.
        item: ItemId,
    },
}

/// Whether the player can still act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// The player moves and fights normally.
    Active,
    /// Health reached zero; movement is halted.
    Defeated,
}

/// Phase of the room transition state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// Play proceeds and boundary detection runs.
    Steady,
    /// A room swap happened and the re-entrancy guard is armed.
    Transitioning,
}

/// Reasons a transition request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionRefusal {
    /// Another transition is still inside its guard window.
    Reentrant,
    /// The target room lies outside the world.
    OutOfBounds,
}

/// Prompt shown while the player stands near a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DoorPrompt {
    /// A regular key is available.
    UseKey,
    /// No regular key is held.
    NeedKey,
    /// A boss key is available.
    UseBossKey,
    /// No boss key is held.
    NeedBossKey,
}

impl DoorPrompt {
    /// Prompt matching a lock and whether a key for it is held.
    #[must_use]
    pub const fn for_lock(lock: DoorLock, key_available: bool) -> Self {
        match (lock, key_available) {
            (DoorLock::Key, true) => Self::UseKey,
            (DoorLock::Key, false) => Self::NeedKey,
            (DoorLock::BossKey, true) => Self::UseBossKey,
            (DoorLock::BossKey, false) => Self::NeedBossKey,
        }
    }

    /// Text displayed to the player.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::UseKey => "Press E to use key",
            Self::NeedKey => "Need a key!",
            Self::UseBossKey => "Press E to use boss key",
            Self::NeedBossKey => "Need boss key!",
        }
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Centre of the player in room units.
    pub position: Vec2,
    /// Current velocity in room units per second.
    pub velocity: Vec2,
    /// Remaining health.
    pub health: u8,
    /// Direction the player faces.
    pub facing: Direction,
    /// Whether incoming damage is currently ignored.
    pub invulnerable: bool,
    /// Whether the player can still act.
    pub status: PlayerStatus,
}

impl PlayerSnapshot {
    /// Collision bounds of the player.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, PLAYER_BODY)
    }
}

/// Immutable representation of the sword hitbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwordSnapshot {
    /// Whether the sword is inside its active window.
    pub active: bool,
    /// Centre of the hitbox in room units.
    pub position: Vec2,
    /// Direction the blade points in.
    pub facing: Direction,
}

impl SwordSnapshot {
    /// Collision bounds of the blade, elongated along its facing.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let size = if self.facing.is_horizontal() {
            Vec2::new(16.0, 8.0)
        } else {
            Vec2::new(8.0, 16.0)
        };
        Aabb::from_center(self.position, size)
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Behavioural variant of the enemy.
    pub variant: EnemyVariant,
    /// Centre of the enemy in room units.
    pub position: Vec2,
    /// Remaining health.
    pub health: u32,
    /// Current heading.
    pub facing: Direction,
    /// Ticks until the next AI decision.
    pub move_timer: u32,
}

impl EnemySnapshot {
    /// Collision bounds of the enemy.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.variant.body_size())
    }
}

/// Read-only snapshot describing all enemies in the active room.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single item used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSnapshot {
    /// Unique identifier assigned to the item.
    pub id: ItemId,
    /// Kind of the item.
    pub kind: ItemKind,
    /// Centre of the item in room units.
    pub position: Vec2,
}

impl ItemSnapshot {
    /// Collision bounds of the item.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.kind.body_size())
    }
}

/// Read-only snapshot describing all items in the active room.
#[derive(Clone, Debug, Default)]
pub struct ItemView {
    snapshots: Vec<ItemSnapshot>,
}

impl ItemView {
    /// Creates a new item view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ItemSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured item snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemSnapshot> {
        self.snapshots.iter()
    }

    /// Number of items captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ItemSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single obstacle used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleSnapshot {
    /// Unique identifier assigned to the obstacle.
    pub id: ObstacleId,
    /// Kind of the obstacle.
    pub kind: ObstacleKind,
    /// Centre of the obstacle in room units.
    pub position: Vec2,
}

impl ObstacleSnapshot {
    /// Collision bounds of the obstacle.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.kind.body_size())
    }
}

/// Read-only snapshot describing all obstacles in the active room.
#[derive(Clone, Debug, Default)]
pub struct ObstacleView {
    snapshots: Vec<ObstacleSnapshot>,
}

impl ObstacleView {
    /// Creates a new obstacle view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ObstacleSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured obstacle snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ObstacleSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the doors still standing, paired with their locks.
    pub fn doors(&self) -> impl Iterator<Item = (&ObstacleSnapshot, DoorLock)> {
        self.snapshots.iter().filter_map(|snapshot| match snapshot.kind {
            ObstacleKind::Door(lock) => Some((snapshot, lock)),
            ObstacleKind::Rock => None,
        })
    }

    /// Number of obstacles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no obstacles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
