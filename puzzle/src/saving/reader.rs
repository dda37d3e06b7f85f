use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::{debug, warn};

use super::FileKind;
use crate::convert;
use crate::error::MazeError;
use crate::geometry::PieceGeometry;

#[derive(Clone, Debug, PartialEq)]
struct Record {
    placement: i32,
    rotation: i32,
    line_count: usize,
    coordinates: Vec<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MazeFile {
    kind: FileKind,
    declared_count: i32,
    seconds: i64,
    records: Vec<Record>,
    truncated: bool,
}

// Scalar reads that answer a sentinel at the end of the stream instead of failing.
struct ByteSource<R> {
    inner: R,
    exhausted: bool,
}

impl<R: Read> ByteSource<R> {
    fn take<const N: usize>(&mut self) -> io::Result<Option<[u8; N]>> {
        if self.exhausted { return Ok(None) }
        let mut buf = [0; N];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => Ok(Some(buf)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                self.exhausted = true;
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    fn read_i32(&mut self) -> io::Result<i32> {
        Ok(self.take()?.map_or(-1, convert::i32_from_bytes))
    }

    fn read_i64(&mut self) -> io::Result<i64> {
        Ok(self.take()?.map_or(-1, convert::i64_from_bytes))
    }
}

impl MazeFile {
    pub fn read(reader: impl Read) -> Result<Self, MazeError> {
        let mut input = ByteSource { inner: reader, exhausted: false };

        let kind = input.take::<4>()?
            .and_then(FileKind::from_tag)
            .ok_or(MazeError::InvalidFormat("unrecognized file tag"))?;
        let declared_count = input.read_i32()?;
        let seconds = input.read_i64()?;
        let mut truncated = input.exhausted;

        let mut records = Vec::new();
        for _ in 0..declared_count.max(0) {
            // running out between records only means fewer tiles than declared
            let Some(first) = input.take::<4>()? else { break };
            let placement = convert::i32_from_bytes(first);
            let rotation = input.read_i32()?;
            let line_count = input.read_i32()?.max(0) as usize;

            let mut coordinates = Vec::new();
            for _ in 0..4 * line_count {
                let Some(bytes) = input.take()? else { break };
                coordinates.push(convert::f32_from_bytes(bytes));
            }

            records.push(Record { placement, rotation, line_count, coordinates });
            if input.exhausted {
                truncated = true;
                break;
            }
        }

        if truncated {
            warn!(?kind, records = records.len(), "maze file ends inside a record");
        } else {
            debug!(?kind, records = records.len(), declared_count, "read maze file");
        }

        Ok(Self { kind, declared_count, seconds, records, truncated })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MazeError> {
        Self::read(bytes)
    }

    pub fn open(path: &Path) -> Result<Self, MazeError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => MazeError::SourceNotFound(path.to_owned()),
            _ => e.into(),
        })?;
        Self::read(BufReader::new(file))
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn declared_count(&self) -> i32 {
        self.declared_count
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the stream ended inside the header or a record. Fields past that point hold sentinels.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn line_count(&self, record: usize) -> usize {
        self.records[record].line_count
    }

    pub fn coordinates(&self, record: usize) -> &[f32] {
        &self.records[record].coordinates
    }

    pub fn geometry(&self, record: usize) -> PieceGeometry {
        PieceGeometry::from_coordinates(self.coordinates(record))
    }

    pub fn placement(&self, record: usize) -> Option<i32> {
        match self.kind {
            FileKind::Played => Some(self.records[record].placement),
            FileKind::Original => None,
        }
    }

    pub fn rotation(&self, record: usize) -> Option<i32> {
        match self.kind {
            FileKind::Played => Some(self.records[record].rotation),
            FileKind::Original => None,
        }
    }

    /// Zero for original files and for a negative stored value.
    pub fn elapsed_seconds(&self) -> u64 {
        match self.kind {
            FileKind::Played => self.seconds.try_into().unwrap_or(0),
            FileKind::Original => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saving::{ORIGINAL_TAG, PLAYED_TAG};

    fn record(out: &mut Vec<u8>, placement: i32, rotation: i32, coords: &[f32]) {
        out.extend(convert::i32_to_bytes(placement));
        out.extend(convert::i32_to_bytes(rotation));
        out.extend(convert::i32_to_bytes(coords.len() as i32 / 4));
        for &c in coords {
            out.extend(convert::f32_to_bytes(c));
        }
    }

    fn header(tag: [u8; 4], count: i32, seconds: i64) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend(convert::i32_to_bytes(count));
        out.extend(convert::i64_to_bytes(seconds));
        out
    }

    #[test]
    fn played_records() {
        let mut bytes = header(PLAYED_TAG, 2, 95);
        record(&mut bytes, 20, 3, &[0.0, 0.0, 100.0, 0.0]);
        record(&mut bytes, 4, 0, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let file = MazeFile::from_bytes(&bytes).unwrap();

        assert_eq!(file.kind(), FileKind::Played);
        assert_eq!(file.elapsed_seconds(), 95);
        assert_eq!(file.record_count(), 2);
        assert_eq!(file.placement(0), Some(20));
        assert_eq!(file.rotation(0), Some(3));
        assert_eq!(file.placement(1), Some(4));
        assert_eq!(file.line_count(1), 2);
        assert_eq!(file.coordinates(1)[7], 8.0);
        assert!(!file.is_truncated());
    }

    #[test]
    fn original_ignores_placement_and_time() {
        let mut bytes = header(ORIGINAL_TAG, 1, 12345);
        record(&mut bytes, 9, 2, &[10.0, 20.0, 30.0, 40.0]);
        let file = MazeFile::from_bytes(&bytes).unwrap();

        assert_eq!(file.kind(), FileKind::Original);
        assert_eq!(file.elapsed_seconds(), 0);
        assert_eq!(file.placement(0), None);
        assert_eq!(file.rotation(0), None);
        assert_eq!(file.coordinates(0), &[10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn unknown_tag_rejected() {
        let mut bytes = header([0xca, 0xfe, 0xba, 0xbe], 0, 0);
        record(&mut bytes, 0, 0, &[]);
        assert!(matches!(MazeFile::from_bytes(&bytes), Err(MazeError::InvalidFormat(_))));
        assert!(matches!(MazeFile::from_bytes(&[0xca, 0xfe]), Err(MazeError::InvalidFormat(_))));
        assert!(matches!(MazeFile::from_bytes(&[]), Err(MazeError::InvalidFormat(_))));
    }

    #[test]
    fn fewer_records_than_declared() {
        let mut bytes = header(PLAYED_TAG, 16, 0);
        record(&mut bytes, 16, 1, &[0.0, 0.0, 1.0, 1.0]);
        let file = MazeFile::from_bytes(&bytes).unwrap();
        assert_eq!(file.declared_count(), 16);
        assert_eq!(file.record_count(), 1);
        assert!(!file.is_truncated());
    }

    #[test]
    fn cut_inside_record() {
        let mut bytes = header(PLAYED_TAG, 1, 0);
        record(&mut bytes, 16, 1, &[0.0, 0.0, 1.0, 1.0]);
        bytes.truncate(bytes.len() - 6);
        let file = MazeFile::from_bytes(&bytes).unwrap();
        assert!(file.is_truncated());
        assert_eq!(file.line_count(0), 1);
        assert_eq!(file.coordinates(0).len(), 2);
    }

    #[test]
    fn negative_counts_read_as_zero() {
        let mut bytes = header(PLAYED_TAG, -4, 0);
        record(&mut bytes, 16, 0, &[0.0, 0.0, 1.0, 1.0]);
        let file = MazeFile::from_bytes(&bytes).unwrap();
        assert_eq!(file.declared_count(), -4);
        assert_eq!(file.record_count(), 0);

        let mut bytes = header(FileKind::Played.tag(), 1, 0);
        bytes.extend(convert::i32_to_bytes(16));
        bytes.extend(convert::i32_to_bytes(0));
        bytes.extend(convert::i32_to_bytes(-5));
        bytes.extend(convert::f32_to_bytes(12.0));
        let file = MazeFile::from_bytes(&bytes).unwrap();
        assert_eq!(file.record_count(), 1);
        assert_eq!(file.line_count(0), 0);
        assert!(file.coordinates(0).is_empty());
        assert!(!file.is_truncated());
    }

    #[test]
    fn cut_inside_header() {
        let mut bytes = PLAYED_TAG.to_vec();
        bytes.extend(convert::i32_to_bytes(16));
        let file = MazeFile::from_bytes(&bytes).unwrap();
        assert!(file.is_truncated());
        assert_eq!(file.elapsed_seconds(), 0);
        assert_eq!(file.record_count(), 0);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.mze");
        assert!(matches!(MazeFile::open(&path), Err(MazeError::SourceNotFound(p)) if p == path));
    }
}
