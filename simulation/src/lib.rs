#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver that pumps commands and events between the world and systems.

pub mod overlap;

use std::time::Duration;

use overworld_core::{
    Command, DoorPrompt, Event, InputState, Inventory, Overlap, RoomCoord, TransitionPhase,
};
use overworld_rendering::{Hud, RenderCommands, Sprite, SpriteKind};
use overworld_system_combat::Combat;
use overworld_system_enemy_ai::EnemyAi;
use overworld_system_interaction::Interaction;
use overworld_system_transition::Transition;
use overworld_world::{self as world, query, World};
use tracing::{debug, info};

/// Default duration of one simulated frame.
pub const DEFAULT_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Tunables for a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Simulated time advanced by every call to [`Simulation::tick`].
    pub frame: Duration,
    /// Seed driving enemy wandering.
    pub ai_seed: u64,
    /// Seed driving loot drops.
    pub loot_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame: DEFAULT_FRAME,
            ai_seed: overworld_system_enemy_ai::DEFAULT_SEED,
            loot_seed: overworld_system_combat::DEFAULT_SEED,
        }
    }
}

/// Owns the world and every system, advancing them one frame at a time.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    enemy_ai: EnemyAi,
    combat: Combat,
    interaction: Interaction,
    transition: Transition,
    frame: Duration,
    presented_room: Option<RoomCoord>,
    last_hud: Option<Hud>,
}

impl Simulation {
    /// Creates a simulation starting in the default room.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_world(World::new(), config)
    }

    /// Creates a simulation around an existing world.
    #[must_use]
    pub fn with_world(world: World, config: SimulationConfig) -> Self {
        info!(
            room = %query::current_room(&world),
            frame_micros = config.frame.as_micros() as u64,
            ai_seed = config.ai_seed,
            loot_seed = config.loot_seed,
            "simulation_started"
        );
        Self {
            world,
            enemy_ai: EnemyAi::new(config.ai_seed),
            combat: Combat::new(config.loot_seed),
            interaction: Interaction::new(),
            transition: Transition::new(),
            frame: config.frame,
            presented_room: None,
            last_hud: None,
        }
    }

    /// Advances the simulation by one frame.
    ///
    /// `overlaps` describes the collisions observed since the previous frame.
    /// Gameplay systems only run while no room transition is in progress.
    pub fn tick(&mut self, input: &InputState, overlaps: &[Overlap]) -> RenderCommands {
        let mut log = Vec::new();
        self.pump(vec![Command::Tick { dt: self.frame }], &mut log);

        let prompt = if query::transition_phase(&self.world) == TransitionPhase::Steady {
            self.run_systems(input, overlaps, &mut log)
        } else {
            None
        };

        self.render(prompt, &log)
    }

    /// Room the player currently occupies.
    #[must_use]
    pub fn current_room(&self) -> RoomCoord {
        query::current_room(&self.world)
    }

    /// Inventory counters at the end of the last frame.
    #[must_use]
    pub fn inventory_snapshot(&self) -> Inventory {
        query::inventory(&self.world)
    }

    /// Player health at the end of the last frame.
    #[must_use]
    pub fn health_snapshot(&self) -> u8 {
        query::player(&self.world).health
    }

    /// Read-only access to the world, used by overlap collaborators.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    fn run_systems(
        &mut self,
        input: &InputState,
        overlaps: &[Overlap],
        log: &mut Vec<Event>,
    ) -> Option<DoorPrompt> {
        let mut commands = vec![Command::SteerPlayer {
            horizontal: input.horizontal(),
            vertical: input.vertical(),
        }];
        if input.attack {
            commands.push(Command::SwingSword);
        }
        self.pump(commands, log);

        let mut commands = Vec::new();
        self.enemy_ai.handle(
            query::transition_phase(&self.world),
            &query::enemy_view(&self.world),
            &query::player(&self.world),
            &mut commands,
        );
        self.pump(commands, log);

        let mut commands = Vec::new();
        self.combat.handle_overlaps(
            overlaps,
            &query::player(&self.world),
            &query::sword(&self.world),
            &mut commands,
        );
        self.pump(commands, log);

        let mut commands = Vec::new();
        let prompt = self.interaction.handle(
            input,
            overlaps,
            &query::player(&self.world),
            query::inventory(&self.world),
            &query::obstacle_view(&self.world),
            &mut commands,
        );
        self.pump(commands, log);

        let mut commands = Vec::new();
        self.transition.handle(
            query::transition_phase(&self.world),
            query::current_room(&self.world),
            &query::player(&self.world),
            &query::obstacle_view(&self.world),
            &mut commands,
        );
        self.pump(commands, log);

        // A crossing this frame leaves the previous room's door behind.
        if query::transition_phase(&self.world) == TransitionPhase::Transitioning {
            return None;
        }
        prompt
    }

    fn pump(&mut self, mut pending: Vec<Command>, log: &mut Vec<Event>) {
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.combat.handle_events(&events, &mut pending);
            log.extend(events);
        }
    }

    fn render(&mut self, prompt: Option<DoorPrompt>, log: &[Event]) -> RenderCommands {
        let room = query::current_room(&self.world);
        let layout = if self.presented_room == Some(room) {
            None
        } else {
            debug!(room = %room, tick = query::tick_index(&self.world), "layout_presented");
            self.presented_room = Some(room);
            Some(query::layout(&self.world).clone())
        };

        let player = query::player(&self.world);
        let hud = Hud::new(player.health, query::inventory(&self.world));
        let hud_changed = self.last_hud != Some(hud);
        self.last_hud = Some(hud);

        RenderCommands {
            room,
            layout,
            sprites: self.sprites(),
            cues: log.iter().filter_map(Event::sound_cue).collect(),
            hud,
            hud_changed,
            prompt,
            victory_banner: query::victory_banner_visible(&self.world),
        }
    }

    fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::new();
        sprites.extend(query::obstacle_view(&self.world).iter().map(|obstacle| {
            Sprite::new(
                SpriteKind::Obstacle(obstacle.kind),
                obstacle.position,
                obstacle.kind.body_size(),
            )
        }));
        sprites.extend(query::item_view(&self.world).iter().map(|item| {
            Sprite::new(SpriteKind::Item(item.kind), item.position, item.kind.body_size())
        }));
        sprites.extend(query::enemy_view(&self.world).iter().map(|enemy| {
            Sprite::new(
                SpriteKind::Enemy(enemy.variant),
                enemy.position,
                enemy.variant.body_size(),
            )
        }));

        let player = query::player(&self.world);
        let body = player.bounds();
        sprites.push(Sprite::new(
            SpriteKind::Player {
                facing: player.facing,
                invulnerable: player.invulnerable,
            },
            player.position,
            body.max() - body.min(),
        ));

        let sword = query::sword(&self.world);
        if sword.active {
            let blade = sword.bounds();
            sprites.push(Sprite::new(
                SpriteKind::Sword {
                    facing: sword.facing,
                },
                sword.position,
                blade.max() - blade.min(),
            ));
        }
        sprites
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
