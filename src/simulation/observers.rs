//! Observer implementations for simulation runs.

use std::{fs::File, path::Path};

use indicatif::{ProgressBar, ProgressStyle};

use super::GameRecord;
use crate::{Error, Result, ports::Observer};

/// Progress bar observer - Shows simulation progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} L:{}", self.wins, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_simulation_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, record: &GameRecord) -> Result<()> {
        if record.won() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(record.game as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_simulation_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Writes one CSV row per finished game.
pub struct CsvObserver {
    writer: csv::Writer<File>,
}

impl CsvObserver {
    /// Create the file at `path`, truncating any existing one.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: csv::Writer::from_writer(file),
        })
    }
}

impl Observer for CsvObserver {
    fn on_game_end(&mut self, record: &GameRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn on_simulation_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
