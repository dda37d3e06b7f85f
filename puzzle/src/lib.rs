#![forbid(unsafe_code)]

pub mod convert;
mod error;
mod geometry;
mod puzzle;
pub mod saving;
mod scramble;
mod selection;
mod session;
mod slot;

pub use error::MazeError;
pub use geometry::{PieceGeometry, Segment};
pub use puzzle::{Provenance, PuzzleState};
pub use saving::{FileKind, MazeFile, MazeWriter};
pub use scramble::Scramble;
pub use selection::{Outcome, Selection};
pub use session::{format_elapsed, Session};
pub use slot::{Area, Piece, TileSlot, PIECE_COUNT, SLOT_COUNT, STORAGE_SLOTS};
