use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use overworld_core::{Inventory, RoomCoord};
use overworld_simulation::{SimulationConfig, DEFAULT_FRAME};
use overworld_world::{World, STARTING_ROOM};
use serde::Deserialize;

/// Settings read from the optional TOML configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    simulation: SimulationSection,
    world: WorldSection,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SimulationSection {
    frame_millis: Option<u64>,
    ai_seed: Option<u64>,
    loot_seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WorldSection {
    start_room: RoomCoord,
    inventory: Inventory,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            start_room: STARTING_ROOM,
            inventory: Inventory::default(),
        }
    }
}

impl RunConfig {
    /// Reads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse configuration toml contents")?;
        if config.simulation.frame_millis == Some(0) {
            bail!("frame_millis must be positive");
        }
        if !config.world.start_room.is_within_world() {
            bail!(
                "start_room {} lies outside the world",
                config.world.start_room
            );
        }
        Ok(config)
    }

    /// Simulation tunables, with `seed` overriding both configured seeds.
    pub(crate) fn simulation(&self, seed: Option<u64>) -> SimulationConfig {
        let defaults = SimulationConfig::default();
        let section = &self.simulation;
        SimulationConfig {
            frame: section
                .frame_millis
                .map_or(DEFAULT_FRAME, Duration::from_millis),
            ai_seed: seed.or(section.ai_seed).unwrap_or(defaults.ai_seed),
            loot_seed: seed
                .map(|seed| seed.rotate_left(32))
                .or(section.loot_seed)
                .unwrap_or(defaults.loot_seed),
        }
    }

    /// Builds the world described by the `[world]` table.
    pub(crate) fn world(&self) -> Result<World> {
        let room = self.world.start_room;
        let world = World::starting_in(room)
            .with_context(|| format!("failed to create world in room {room}"))?;
        Ok(world.with_inventory(self.world.inventory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overworld_world::query;

    #[test]
    fn empty_file_uses_defaults() {
        let config = RunConfig::parse("").expect("empty config is valid");

        assert_eq!(config, RunConfig::default());
        assert_eq!(config.simulation(None), SimulationConfig::default());
    }

    #[test]
    fn tables_override_defaults() {
        let config = RunConfig::parse(
            r#"
            [simulation]
            frame_millis = 20
            ai_seed = 3
            loot_seed = 4

            [world]
            start_room = { x = 2, y = 2 }
            inventory = { keys = 1, rupees = 5 }
            "#,
        )
        .expect("valid config");

        let simulation = config.simulation(None);
        assert_eq!(simulation.frame, Duration::from_millis(20));
        assert_eq!(simulation.ai_seed, 3);
        assert_eq!(simulation.loot_seed, 4);

        let world = config.world().expect("room exists");
        assert_eq!(query::current_room(&world), RoomCoord::new(2, 2));
        assert_eq!(query::inventory(&world).keys, 1);
        assert_eq!(query::inventory(&world).rupees, 5);
    }

    #[test]
    fn command_line_seed_wins() {
        let config = RunConfig::parse("[simulation]\nai_seed = 3\nloot_seed = 4\n")
            .expect("valid config");

        let simulation = config.simulation(Some(9));
        assert_eq!(simulation.ai_seed, 9);
        assert_ne!(simulation.loot_seed, 4);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(RunConfig::parse("[simulation]\nframe_millis = 0\n").is_err());
        assert!(RunConfig::parse("[world]\nstart_room = { x = 9, y = 0 }\n").is_err());
        assert!(RunConfig::parse("[world]\nlives = 3\n").is_err());
    }
}
