use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use super::{FileKind, SAVED_TILE_COUNT};
use crate::convert;
use crate::error::MazeError;
use crate::geometry::PieceGeometry;
use crate::puzzle::PuzzleState;

#[derive(Clone, Debug, Default)]
pub struct MazeWriter {
    records: Vec<u8>,
    record_count: usize,
    seconds: i64,
}

fn push_record(out: &mut Vec<u8>, location: i32, rotation: i32, geometry: &PieceGeometry) {
    out.extend(convert::i32_to_bytes(location));
    out.extend(convert::i32_to_bytes(rotation));
    out.extend(convert::i32_to_bytes(geometry.line_count() as i32));
    for c in geometry.coordinates() {
        out.extend(convert::f32_to_bytes(c));
    }
}

impl MazeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// One record per occupied slot, by ascending home, so record order carries each piece's home.
    pub fn from_puzzle(puzzle: &PuzzleState) -> Self {
        let mut writer = Self::new();
        for (slot, piece) in puzzle.pieces().sorted_by_key(|(_, p)| p.home()) {
            writer.add_record(piece.geometry(), piece.orientation(), slot);
        }
        writer.set_elapsed_seconds(puzzle.elapsed_seconds());
        writer
    }

    /// Stores the geometry turned back to orientation zero; readers reapply `orientation`.
    pub fn add_record(&mut self, geometry: &PieceGeometry, orientation: u8, location: usize) {
        let canonical = geometry.rotated((4 - orientation % 4) % 4);
        push_record(&mut self.records, location as i32, orientation as i32, &canonical);
        self.record_count += 1;
    }

    pub fn set_elapsed_seconds(&mut self, seconds: u64) {
        self.seconds = seconds.try_into().unwrap_or(i64::MAX);
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + self.records.len());
        out.extend(FileKind::Played.tag());
        out.extend(convert::i32_to_bytes(SAVED_TILE_COUNT));
        out.extend(convert::i64_to_bytes(self.seconds));
        out.extend_from_slice(&self.records);
        out
    }

    pub fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(&FileKind::Played.tag())?;
        writer.write_all(&convert::i32_to_bytes(SAVED_TILE_COUNT))?;
        writer.write_all(&convert::i64_to_bytes(self.seconds))?;
        writer.write_all(&self.records)?;
        writer.flush()
    }

    pub fn write_to_path(&self, path: &Path) -> Result<(), MazeError> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write(&mut file)?;
        debug!(path = %path.display(), records = self.record_count, "wrote maze file");
        Ok(())
    }
}

/// Encodes an unplayed maze: one record per home with the tile index, rotation zero and the
/// geometry as given.
pub fn encode_original(pieces: &[PieceGeometry]) -> Vec<u8> {
    let mut out = FileKind::Original.tag().to_vec();
    out.extend(convert::i32_to_bytes(pieces.len() as i32));
    out.extend(convert::i64_to_bytes(0));
    for (index, geometry) in pieces.iter().enumerate() {
        push_record(&mut out, index as i32, 0, geometry);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::saving::MazeFile;

    fn bar() -> PieceGeometry {
        PieceGeometry::new(vec![Segment::new(60.0, 50.0, 100.0, 50.0)])
    }

    #[test]
    fn header_layout() {
        let mut writer = MazeWriter::new();
        writer.set_elapsed_seconds(3600);
        writer.add_record(&bar(), 0, 17);
        let bytes = writer.to_bytes();

        assert_eq!(&bytes[0..4], &[0xca, 0xfe, 0xde, 0xed]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 16]);
        assert_eq!(&bytes[8..16], &[0, 0, 0, 0, 0, 0, 0x0e, 0x10]);
        assert_eq!(&bytes[16..20], &[0, 0, 0, 17]);
        assert_eq!(&bytes[20..24], &[0, 0, 0, 0]);
        assert_eq!(&bytes[24..28], &[0, 0, 0, 1]);
        assert_eq!(bytes.len(), 16 + 12 + 16);
    }

    #[test]
    fn stores_canonical_geometry() {
        let turned = bar().rotated(1);
        let mut writer = MazeWriter::new();
        writer.add_record(&turned, 1, 3);
        let file = MazeFile::from_bytes(&writer.to_bytes()).unwrap();

        assert_eq!(file.rotation(0), Some(1));
        assert!(file.geometry(0).approx_eq(&bar(), 1e-4));
    }

    #[test]
    fn stream_matches_buffer() {
        let mut writer = MazeWriter::new();
        writer.add_record(&bar(), 2, 30);
        writer.add_record(&bar(), 3, 1);
        let mut out = Vec::new();
        writer.write(&mut out).unwrap();
        assert_eq!(out, writer.to_bytes());
    }

    #[test]
    fn write_to_path_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.mze");
        let mut writer = MazeWriter::new();
        writer.set_elapsed_seconds(42);
        writer.add_record(&bar(), 0, 0);
        writer.write_to_path(&path).unwrap();

        let file = MazeFile::open(&path).unwrap();
        assert_eq!(file.kind(), FileKind::Played);
        assert_eq!(file.elapsed_seconds(), 42);
        assert_eq!(std::fs::read(&path).unwrap(), writer.to_bytes());
    }

    #[test]
    fn unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("saved.mze");
        assert!(matches!(MazeWriter::new().write_to_path(&path), Err(MazeError::Io(_))));
    }

    #[test]
    fn original_encoding() {
        let bytes = encode_original(&[bar(), PieceGeometry::default()]);
        let file = MazeFile::from_bytes(&bytes).unwrap();
        assert_eq!(file.kind(), FileKind::Original);
        assert_eq!(file.record_count(), 2);
        assert_eq!(file.geometry(0), bar());
        assert_eq!(file.line_count(1), 0);
    }
}
