use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use overworld_core::InputState;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Held {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct Step {
    frames: u32,
    #[serde(default)]
    held: Vec<Held>,
    #[serde(default)]
    attack: bool,
    #[serde(default)]
    confirm: bool,
}

impl Step {
    fn input(&self, first_frame: bool) -> InputState {
        let mut input = InputState {
            attack: first_frame && self.attack,
            confirm: first_frame && self.confirm,
            ..InputState::default()
        };
        for held in &self.held {
            match held {
                Held::Left => input.left = true,
                Held::Right => input.right = true,
                Held::Up => input.up = true,
                Held::Down => input.down = true,
            }
        }
        input
    }
}

/// Scripted input replayed frame by frame.
///
/// Every `[[step]]` holds its directions for `frames` frames. Attack and
/// confirm are presses, so they fire on the first frame of the step only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct InputScript {
    step: Vec<Step>,
}

impl InputScript {
    /// Reads the script at `path`, or an empty script when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read input script at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid input script at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let script: Self =
            toml::from_str(contents).context("failed to parse input script toml contents")?;
        if let Some(index) = script.step.iter().position(|step| step.frames == 0) {
            bail!("step {index} must last at least one frame");
        }
        Ok(script)
    }

    /// Number of frames covered by the script.
    pub(crate) fn total_frames(&self) -> u64 {
        self.step.iter().map(|step| u64::from(step.frames)).sum()
    }

    /// Input for every scripted frame, followed by idle input forever.
    pub(crate) fn inputs(&self) -> impl Iterator<Item = InputState> + '_ {
        self.step
            .iter()
            .flat_map(|step| (0..step.frames).map(move |frame| step.input(frame == 0)))
            .chain(std::iter::repeat(InputState::default()))
    }
}
