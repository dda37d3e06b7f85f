//! The `.mze` maze file format.
//!
//! Layout, big-endian:
//!
//! ```text
//! tag         4 bytes   CA FE DE ED played, CA FE BE EF original
//! tile count  i32
//! seconds     i64       elapsed time (played), reserved zero (original)
//! records     location i32, rotation i32, line count i32, 4 * line count f32
//! ```
//!
//! Original files carry a tile index and rotation in each record that readers skip.

mod reader;
mod writer;

pub use reader::MazeFile;
pub use writer::{encode_original, MazeWriter};

pub const PLAYED_TAG: [u8; 4] = [0xca, 0xfe, 0xde, 0xed];
pub const ORIGINAL_TAG: [u8; 4] = [0xca, 0xfe, 0xbe, 0xef];

pub const SAVED_TILE_COUNT: i32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Played,
    Original,
}

impl FileKind {
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        match tag {
            PLAYED_TAG => Some(Self::Played),
            ORIGINAL_TAG => Some(Self::Original),
            _ => None,
        }
    }

    pub fn tag(self) -> [u8; 4] {
        match self {
            Self::Played => PLAYED_TAG,
            Self::Original => ORIGINAL_TAG,
        }
    }
}
