use std::io::Write;

use anyhow::{Context, Result};
use overworld_core::{DoorPrompt, RoomCoord, RoomLayout, SoundCue, Tile};
use overworld_rendering::{
    tile_frame, AudioSink, Presenter, RenderCommands, RenderingError, GRASS_FRAMES,
};
use tracing::info;

/// Presenter that writes room art and HUD changes as plain text.
#[derive(Debug)]
pub(crate) struct TerminalPresenter<W> {
    out: W,
    room: Option<RoomCoord>,
    prompt: Option<DoorPrompt>,
    banner: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            room: None,
            prompt: None,
            banner: false,
        }
    }

    /// Writes the closing HUD line for the last presented frame.
    pub(crate) fn summarize(&mut self, frame: &RenderCommands) -> Result<()> {
        writeln!(
            self.out,
            "room {}  {}  {}",
            frame.room,
            frame.hud.health_line(),
            frame.hud.inventory_line()
        )
        .context("failed to write summary")
    }

    fn write_layout(&mut self, room: RoomCoord, layout: &RoomLayout) -> Result<()> {
        writeln!(self.out, "== room {room} ==")?;
        for (row, cells) in layout.rows().iter().enumerate() {
            let line: String = cells
                .iter()
                .enumerate()
                .map(|(column, &tile)| cell_glyph(tile, column, row))
                .collect();
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &RenderCommands) -> Result<()> {
        match &frame.layout {
            Some(layout) => {
                self.write_layout(frame.room, layout)
                    .context("failed to write room layout")?;
                self.room = Some(frame.room);
            }
            None if self.room != Some(frame.room) => {
                return Err(RenderingError::MissingLayout { room: frame.room }.into());
            }
            None => {}
        }

        if frame.hud_changed {
            writeln!(
                self.out,
                "{}  {}",
                frame.hud.health_line(),
                frame.hud.inventory_line()
            )?;
        }
        if frame.prompt != self.prompt {
            if let Some(prompt) = frame.prompt {
                writeln!(self.out, "> {}", prompt.text())?;
            }
            self.prompt = frame.prompt;
        }
        if frame.victory_banner != self.banner {
            if let Some(text) = frame.banner_text() {
                writeln!(self.out, "{text}")?;
            }
            self.banner = frame.victory_banner;
        }
        Ok(())
    }
}

/// Grass alternates between three glyphs following its sprite frame.
fn cell_glyph(tile: Tile, column: usize, row: usize) -> char {
    match tile {
        Tile::Grass => {
            let frame = tile_frame(tile, column, row);
            match GRASS_FRAMES.iter().position(|&grass| grass == frame) {
                Some(index) if index % 3 == 1 => ',',
                Some(index) if index % 3 == 2 => '\'',
                _ => tile.glyph(),
            }
        }
        Tile::Wall | Tile::Water => tile.glyph(),
    }
}

/// Audio sink that records cues in the log instead of playing them.
#[derive(Debug, Default)]
pub(crate) struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        info!(cue = cue.name(), "sound_cue");
        Ok(())
    }
}
