#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Combat resolution: sword strikes, contact damage, boss defeat and loot drops.

use overworld_core::{
    Command, EnemyVariant, Event, ItemKind, Overlap, PlayerSnapshot, PlayerStatus, SwordSnapshot,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Probability that a defeated normal enemy drops an item.
pub const DROP_CHANCE: f64 = 0.3;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_SEED: u64 = 0x5eed_10a7_c0b4_7000;

/// Pure system that turns overlaps and defeat events into combat commands.
#[derive(Debug, Clone)]
pub struct Combat {
    rng: ChaCha8Rng,
}

impl Combat {
    /// Creates a new resolver whose loot rolls are driven by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Converts this tick's overlaps into strikes and contact damage.
    ///
    /// Strikes require an active sword. At most one contact hit is emitted per
    /// tick, and none while the player is invulnerable or defeated.
    pub fn handle_overlaps(
        &self,
        overlaps: &[Overlap],
        player: &PlayerSnapshot,
        sword: &SwordSnapshot,
        out: &mut Vec<Command>,
    ) {
        let mut contact_pending =
            !player.invulnerable && player.status == PlayerStatus::Active;

        for overlap in overlaps {
            match *overlap {
                Overlap::SwordEnemy { enemy } if sword.active => {
                    out.push(Command::StrikeEnemy { enemy });
                }
                Overlap::PlayerEnemy { enemy } if contact_pending => {
                    out.push(Command::DamagePlayer { enemy });
                    contact_pending = false;
                }
                _ => {}
            }
        }
    }

    /// Reacts to enemy defeats with the boss conclusion or a loot roll.
    pub fn handle_events(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            let Event::EnemyDefeated {
                enemy,
                variant,
                position,
            } = *event
            else {
                continue;
            };

            match variant {
                EnemyVariant::Boss => out.push(Command::ConcludeBossFight { position }),
                EnemyVariant::Normal => {
                    if let Some(kind) = self.roll_loot() {
                        debug!(enemy = enemy.get(), ?kind, "loot_dropped");
                        out.push(Command::SpawnItem { kind, position });
                    }
                }
            }
        }
    }

    fn roll_loot(&mut self) -> Option<ItemKind> {
        if !self.rng.gen_bool(DROP_CHANCE) {
            return None;
        }
        if self.rng.gen_bool(0.5) {
            Some(ItemKind::Rupee)
        } else {
            Some(ItemKind::Potion)
        }
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
