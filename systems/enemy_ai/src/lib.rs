#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy decision making: wandering for normal enemies and pursuit for the boss.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use glam::Vec2;
use overworld_core::{
    Command, Direction, EnemySnapshot, EnemyVariant, EnemyView, PlayerSnapshot, TransitionPhase,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_SEED: u64 = 0x0e1d_a7a5_11f0_2d3b;

/// Pure system that counts down enemy decision timers and picks headings.
#[derive(Debug, Clone)]
pub struct EnemyAi {
    rng: ChaCha8Rng,
}

impl EnemyAi {
    /// Creates a new AI whose random choices are driven by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits one steering decision per enemy for the current tick.
    ///
    /// Nothing is emitted while a room transition is in progress.
    pub fn handle(
        &mut self,
        phase: TransitionPhase,
        enemies: &EnemyView,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        if phase == TransitionPhase::Transitioning {
            return;
        }

        for enemy in enemies.iter() {
            out.push(self.decide(enemy, player));
        }
    }

    fn decide(&mut self, enemy: &EnemySnapshot, player: &PlayerSnapshot) -> Command {
        let remaining = enemy.move_timer.saturating_sub(1);
        if remaining > 0 {
            return Command::SteerEnemy {
                enemy: enemy.id,
                direction: enemy.facing,
                move_timer: remaining,
            };
        }

        let direction = match enemy.variant {
            EnemyVariant::Normal => Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())],
            EnemyVariant::Boss => direction_toward(enemy.position, player.position),
        };
        Command::SteerEnemy {
            enemy: enemy.id,
            direction,
            move_timer: enemy.variant.decision_interval(),
        }
    }
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Cardinal direction nearest to the angle from `from` toward `to`.
///
/// Room space grows downward, so a target below `from` resolves to south.
#[must_use]
pub fn direction_toward(from: Vec2, to: Vec2) -> Direction {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    let sector = ((angle + FRAC_PI_4).rem_euclid(TAU) / FRAC_PI_2).floor() as usize;
    match sector % 4 {
        0 => Direction::East,
        1 => Direction::South,
        2 => Direction::West,
        _ => Direction::North,
    }
}
