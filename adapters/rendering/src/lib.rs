#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Overworld adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use overworld_core::{
    Direction, DoorPrompt, EnemyVariant, Inventory, ItemKind, ObstacleKind, RoomCoord,
    RoomLayout, SoundCue, Tile, PLAYER_MAX_HEALTH,
};
use thiserror::Error;
use tracing::warn;

/// Text displayed while the victory banner is visible.
pub const VICTORY_MESSAGE: &str = "YOU WIN!\n\nBoss Defeated!\n\nCollect the Boss Key!";

/// Sprite sheet frames used for grass, picked per cell to break up repetition.
pub const GRASS_FRAMES: [u32; 6] = [67, 68, 69, 76, 77, 78];

/// Sprite sheet frame used for walls.
pub const WALL_FRAME: u32 = 27;

/// Sprite sheet frame used for water.
pub const WATER_FRAME: u32 = 13;

/// Sprite sheet frame drawn for the tile at the provided cell.
///
/// Grass frames vary with the cell position so that repeated presentations of
/// the same room always look identical.
#[must_use]
pub fn tile_frame(tile: Tile, column: usize, row: usize) -> u32 {
    match tile {
        Tile::Grass => {
            let mix = column.wrapping_mul(7).wrapping_add(row.wrapping_mul(13));
            GRASS_FRAMES[mix % GRASS_FRAMES.len()]
        }
        Tile::Wall => WALL_FRAME,
        Tile::Water => WATER_FRAME,
    }
}

/// Visual category of a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// The player character.
    Player {
        /// Direction the player faces.
        facing: Direction,
        /// Whether the player should flicker.
        invulnerable: bool,
    },
    /// The sword hitbox while it is swung.
    Sword {
        /// Direction the blade points in.
        facing: Direction,
    },
    /// An enemy of the provided variant.
    Enemy(EnemyVariant),
    /// A collectible item.
    Item(ItemKind),
    /// A rock or door.
    Obstacle(ObstacleKind),
}

/// Single sprite positioned in room units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// What the sprite depicts.
    pub kind: SpriteKind,
    /// Centre of the sprite.
    pub position: Vec2,
    /// Width and height of the sprite.
    pub size: Vec2,
}

impl Sprite {
    /// Creates a new sprite descriptor.
    #[must_use]
    pub const fn new(kind: SpriteKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            position,
            size,
        }
    }
}

/// Heads-up display snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hud {
    /// Remaining player health.
    pub health: u8,
    /// Maximum player health.
    pub max_health: u8,
    /// Inventory counters.
    pub inventory: Inventory,
}

impl Hud {
    /// Creates a HUD snapshot for the provided health and inventory.
    #[must_use]
    pub const fn new(health: u8, inventory: Inventory) -> Self {
        Self {
            health,
            max_health: PLAYER_MAX_HEALTH,
            inventory,
        }
    }

    /// Inventory line as shown in the corner of the screen.
    #[must_use]
    pub fn inventory_line(&self) -> String {
        let inventory = &self.inventory;
        let mut line = format!(
            "Keys: {}  Rupees: {}  Bombs: {}",
            inventory.keys, inventory.rupees, inventory.bombs
        );
        if inventory.boss_keys > 0 {
            line.push_str(&format!("  Boss Keys: {}", inventory.boss_keys));
        }
        line
    }

    /// Health line rendered as filled and empty hearts.
    #[must_use]
    pub fn health_line(&self) -> String {
        let filled = usize::from(self.health.min(self.max_health));
        let empty = usize::from(self.max_health) - filled;
        format!("{}{}", "♥".repeat(filled), "♡".repeat(empty))
    }
}

/// Everything an adapter needs to present one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderCommands {
    /// Room currently shown.
    pub room: RoomCoord,
    /// Tile layout, present only when the room changed since the previous frame.
    pub layout: Option<RoomLayout>,
    /// Sprites in draw order.
    pub sprites: Vec<Sprite>,
    /// Sound cues triggered during the frame.
    pub cues: Vec<SoundCue>,
    /// HUD snapshot.
    pub hud: Hud,
    /// Whether the HUD differs from the previous frame.
    pub hud_changed: bool,
    /// Door prompt to display, if any.
    pub prompt: Option<DoorPrompt>,
    /// Whether the victory banner is visible.
    pub victory_banner: bool,
}

impl RenderCommands {
    /// Banner text to overlay, if the banner is visible.
    #[must_use]
    pub fn banner_text(&self) -> Option<&'static str> {
        self.victory_banner.then_some(VICTORY_MESSAGE)
    }
}

/// Display collaborator capable of presenting frames.
pub trait Presenter {
    /// Presents the provided frame.
    fn present(&mut self, frame: &RenderCommands) -> AnyResult<()>;
}

/// Audio collaborator capable of playing cues.
pub trait AudioSink {
    /// Plays the provided cue.
    fn play(&mut self, cue: SoundCue) -> AnyResult<()>;
}

/// Errors that can occur while presenting frames.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderingError {
    /// Sprites arrived for a room whose tiles were never presented.
    #[error("no layout has been presented for room {room}")]
    MissingLayout {
        /// Room the frame belongs to.
        room: RoomCoord,
    },
}

/// Hands a frame to its collaborators, logging and counting their failures.
///
/// Failures never interrupt dispatch: every cue is attempted and the frame is
/// presented even when audio fails.
pub fn dispatch<P, A>(frame: &RenderCommands, presenter: &mut P, audio: &mut A) -> usize
where
    P: Presenter + ?Sized,
    A: AudioSink + ?Sized,
{
    let mut failures = 0;
    for &cue in &frame.cues {
        if let Err(error) = audio.play(cue) {
            failures += 1;
            warn!(cue = cue.name(), error = ?error, "audio_cue_failed");
        }
    }
    if let Err(error) = presenter.present(frame) {
        failures += 1;
        warn!(room = %frame.room, error = ?error, "presentation_failed");
    }
    failures
}
