use std::path::{Path, PathBuf};

use rand::prelude::*;
use tracing::{info, warn};

use crate::error::MazeError;
use crate::puzzle::{Provenance, PuzzleState};
use crate::saving::{FileKind, MazeFile, MazeWriter};
use crate::scramble::Scramble;
use crate::selection::{Outcome, Selection};

/// One game in progress and its clock.
pub struct Session {
    puzzle: PuzzleState,
    selection: Selection,
    rng: StdRng,
    running: bool,
    saved: bool,
    // the played file this game was last read from or written to
    save_file: Option<PathBuf>,
}

pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, seconds / 60 % 60, seconds % 60)
}

impl Session {
    /// Starts blank. A seed makes every deal reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { puzzle: PuzzleState::new(), selection: Selection::default(), rng, running: false, saved: false, save_file: None }
    }

    pub fn puzzle(&self) -> &PuzzleState {
        &self.puzzle
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Original files are dealt with a fresh scramble. On error the session is untouched.
    pub fn load(&mut self, file: MazeFile) -> Result<Provenance, MazeError> {
        match file.kind() {
            FileKind::Original => {
                let scramble = Scramble::new(&mut self.rng);
                self.puzzle.load_original(file, scramble)?;
            },
            FileKind::Played => self.puzzle.load_played(file)?,
        }
        self.selection.clear();
        self.saved = false;
        self.save_file = None;
        self.running = !self.puzzle.is_won();
        self.puzzle.log_summary();
        Ok(self.puzzle.provenance())
    }

    pub fn load_path(&mut self, path: &Path) -> Result<Provenance, MazeError> {
        let file = MazeFile::open(path).inspect_err(|e| warn!(path = %path.display(), "load failed: {e}"))?;
        let provenance = self.load(file)?;
        if provenance == Provenance::Played {
            self.save_file = Some(path.to_owned());
        }
        Ok(provenance)
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Provenance, MazeError> {
        self.load(MazeFile::from_bytes(bytes)?)
    }

    pub fn save_bytes(&self) -> Option<Vec<u8>> {
        (!self.is_blank()).then(|| MazeWriter::from_puzzle(&self.puzzle).to_bytes())
    }

    /// `Ok(false)` when there is nothing to save. A failed save leaves the session unsaved.
    pub fn save_path(&mut self, path: &Path) -> Result<bool, MazeError> {
        if self.is_blank() { return Ok(false) }
        match MazeWriter::from_puzzle(&self.puzzle).write_to_path(path) {
            Ok(()) => {
                self.saved = true;
                self.save_file = Some(path.to_owned());
                info!(path = %path.display(), "saved");
                Ok(true)
            },
            Err(e) => {
                self.saved = false;
                warn!(path = %path.display(), "save failed: {e}");
                Err(e)
            },
        }
    }

    pub fn reset(&mut self) -> bool {
        if self.is_blank() { return false }
        self.puzzle.reset();
        self.selection.clear();
        self.saved = false;
        self.running = !self.puzzle.is_won();
        true
    }

    pub fn make_blank(&mut self) {
        self.puzzle.make_blank();
        self.selection.clear();
        self.running = false;
        self.saved = false;
        self.save_file = None;
    }

    /// Saving to `path` would replace a file this game did not come from.
    pub fn would_overwrite(&self, path: &Path) -> bool {
        path.exists() && self.save_file.as_deref() != Some(path)
    }

    pub fn click(&mut self, slot: usize) -> Outcome {
        let outcome = self.selection.click(&mut self.puzzle, slot);
        if let Outcome::Moved { .. } = outcome {
            self.changed();
        }
        outcome
    }

    pub fn rotate(&mut self, slot: usize) -> Outcome {
        let outcome = self.selection.rotate(&mut self.puzzle, slot);
        if let Outcome::Rotated(_) = outcome {
            self.changed();
        }
        outcome
    }

    pub fn deselect(&mut self) -> Option<usize> {
        self.selection.clear()
    }

    fn changed(&mut self) {
        self.saved = false;
        if self.running && self.puzzle.is_won() {
            self.running = false;
            info!(time = %self.formatted_time(), "maze solved");
        }
    }

    pub fn tick(&mut self) {
        if self.running {
            self.puzzle.tick();
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = !self.is_blank() && !self.puzzle.is_won();
    }

    pub fn needs_save_prompt(&self) -> bool {
        !self.is_blank() && !self.saved && self.puzzle.is_changed()
    }

    pub fn is_blank(&self) -> bool {
        self.puzzle.provenance() == Provenance::Blank
    }

    pub fn is_won(&self) -> bool {
        self.puzzle.is_won()
    }

    pub fn is_changed(&self) -> bool {
        !self.is_blank() && self.puzzle.is_changed()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.puzzle.elapsed_seconds()
    }

    pub fn formatted_time(&self) -> String {
        format_elapsed(self.elapsed_seconds())
    }
}
