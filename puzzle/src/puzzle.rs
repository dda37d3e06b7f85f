use itertools::Itertools;
use tracing::{debug, info};

use crate::error::MazeError;
use crate::saving::{FileKind, MazeFile};
use crate::scramble::Scramble;
use crate::slot::{Area, Piece, TileSlot, PIECE_COUNT, SLOT_COUNT, STORAGE_SLOTS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    Blank,
    Original,
    Played,
}

// What the board was built from, kept for reset and change detection.
#[derive(Clone, Debug)]
enum Reference {
    Blank,
    Original { file: MazeFile, scramble: Scramble },
    Played { file: MazeFile },
}

#[derive(Clone, Debug)]
pub struct PuzzleState {
    slots: [TileSlot; SLOT_COUNT],
    elapsed: u64,
    reference: Reference,
}

fn check_original(file: &MazeFile) -> Result<(), MazeError> {
    if file.kind() != FileKind::Original {
        return Err(MazeError::InvalidFormat("expected an original maze file"));
    }
    if file.is_truncated() {
        return Err(MazeError::InvalidFormat("file ends inside a tile record"));
    }
    if file.record_count() < PIECE_COUNT {
        return Err(MazeError::InvalidFormat("too few tiles"));
    }
    Ok(())
}

fn check_played(file: &MazeFile) -> Result<(), MazeError> {
    if file.kind() != FileKind::Played {
        return Err(MazeError::InvalidFormat("expected a played maze file"));
    }
    if file.is_truncated() {
        return Err(MazeError::InvalidFormat("file ends inside a tile record"));
    }
    if file.record_count() == 0 {
        return Err(MazeError::InvalidFormat("no tiles"));
    }
    if file.record_count() > PIECE_COUNT {
        return Err(MazeError::InvalidFormat("too many tiles"));
    }
    let placements: Vec<_> = (0..file.record_count()).filter_map(|r| file.placement(r)).collect();
    if placements.iter().any(|&p| !(0..SLOT_COUNT as i32).contains(&p)) {
        return Err(MazeError::InvalidFormat("tile placed outside the board"));
    }
    if !placements.iter().all_unique() {
        return Err(MazeError::InvalidFormat("two tiles share a slot"));
    }
    if (0..file.record_count()).any(|r| !matches!(file.rotation(r), Some(0..=3))) {
        return Err(MazeError::InvalidFormat("rotation out of range"));
    }
    Ok(())
}

impl PuzzleState {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| TileSlot::default()),
            elapsed: 0,
            reference: Reference::Blank,
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self.reference {
            Reference::Blank => Provenance::Blank,
            Reference::Original { .. } => Provenance::Original,
            Reference::Played { .. } => Provenance::Played,
        }
    }

    pub fn slot(&self, index: usize) -> &TileSlot {
        &self.slots[index]
    }

    pub fn slots(&self) -> &[TileSlot; SLOT_COUNT] {
        &self.slots
    }

    pub fn storage(&self) -> &[TileSlot] {
        &self.slots[Area::Storage.slots()]
    }

    pub fn field(&self) -> &[TileSlot] {
        &self.slots[Area::Field.slots()]
    }

    pub fn pieces(&self) -> impl Iterator<Item=(usize, &Piece)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| Some((i, s.piece()?)))
    }

    /// On error nothing changes.
    pub fn load_original(&mut self, file: MazeFile, scramble: Scramble) -> Result<(), MazeError> {
        check_original(&file)?;
        self.reference = Reference::Original { file, scramble };
        self.reset();
        info!("loaded original maze");
        Ok(())
    }

    // record r is home r
    pub fn load_played(&mut self, file: MazeFile) -> Result<(), MazeError> {
        check_played(&file)?;
        self.reference = Reference::Played { file };
        self.reset();
        info!(elapsed = self.elapsed, "loaded played maze");
        Ok(())
    }

    pub fn make_blank(&mut self) {
        self.clear();
        self.reference = Reference::Blank;
        self.elapsed = 0;
    }

    fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    /// Rebuilds the board from the last scramble or the last loaded save, including the clock.
    pub fn reset(&mut self) {
        self.clear();
        match &self.reference {
            Reference::Blank => {},
            Reference::Original { file, scramble } => {
                for storage in 0..STORAGE_SLOTS {
                    let home = scramble.placement(storage);
                    let mut piece = Piece::new(home, file.geometry(home as usize));
                    piece.rotate(scramble.rotation(storage));
                    self.slots[storage].put(piece);
                }
                self.elapsed = 0;
            },
            Reference::Played { file } => {
                for record in 0..file.record_count() {
                    let (Some(slot), Some(rotation)) = (file.placement(record), file.rotation(record)) else { continue };
                    let mut piece = Piece::new(record as u8, file.geometry(record));
                    piece.rotate(rotation as u8);
                    self.slots[slot as usize].put(piece);
                }
                self.elapsed = file.elapsed_seconds();
            },
        }
        debug_assert!(self.homes_are_unique());
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    pub fn rotate(&mut self, slot: usize, quarter_turns: u8) {
        if let Some(piece) = self.slots[slot].piece_mut() {
            piece.rotate(quarter_turns);
        }
    }

    pub fn is_won(&self) -> bool {
        self.field().iter().enumerate().all(|(i, slot)| {
            slot.piece().is_some_and(|p| p.home() as usize == i && p.orientation() == 0)
        })
    }

    pub fn is_changed(&self) -> bool {
        match &self.reference {
            Reference::Blank => false,
            Reference::Original { scramble, .. } => (0..STORAGE_SLOTS).any(|i| {
                self.slots[i].piece().is_none_or(|p| p.home() != scramble.placement(i) || p.orientation() != scramble.rotation(i))
            }),
            Reference::Played { file } => (0..file.record_count()).any(|r| {
                let (Some(slot), Some(rotation)) = (file.placement(r), file.rotation(r)) else { return true };
                self.slots[slot as usize].piece().is_none_or(|p| p.home() as usize != r || p.orientation() as i32 != rotation)
            }),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    pub fn set_elapsed_seconds(&mut self, seconds: u64) {
        self.elapsed = seconds;
    }

    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn homes_are_unique(&self) -> bool {
        self.pieces().map(|(_, p)| p.home()).all_unique()
    }

    pub fn homes_are_complete(&self) -> bool {
        self.pieces().map(|(_, p)| p.home()).sorted().eq(0..PIECE_COUNT as u8)
    }

    pub fn locate_home(&self, home: u8) -> Option<usize> {
        self.pieces().find(|(_, p)| p.home() == home).map(|(slot, _)| slot)
    }

    pub(crate) fn log_summary(&self) {
        let placed = self.field().iter().filter(|s| s.occupied()).count();
        debug!(provenance = ?self.provenance(), placed, elapsed = self.elapsed, "board");
    }
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::new()
    }
}
