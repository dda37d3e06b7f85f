use std::ops::Range;

use crate::geometry::PieceGeometry;

pub const PIECE_COUNT: usize = 16;
pub const STORAGE_SLOTS: usize = 16;
pub const SLOT_COUNT: usize = STORAGE_SLOTS + PIECE_COUNT;

/// Slots `0..16` are storage, `16..32` are the 4x4 field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    Storage,
    Field,
}

impl Area {
    pub fn of(slot: usize) -> (Self, usize) {
        if slot < STORAGE_SLOTS {
            (Self::Storage, slot)
        } else {
            (Self::Field, slot - STORAGE_SLOTS)
        }
    }

    pub fn slot(self, index: usize) -> usize {
        match self {
            Self::Storage => index,
            Self::Field => STORAGE_SLOTS + index,
        }
    }

    pub fn slots(self) -> Range<usize> {
        self.slot(0)..self.slot(PIECE_COUNT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    home: u8,
    orientation: u8,
    geometry: PieceGeometry,
}

impl Piece {
    pub fn new(home: u8, geometry: PieceGeometry) -> Self {
        Self { home, orientation: 0, geometry }
    }

    pub fn home(&self) -> u8 {
        self.home
    }

    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    pub fn geometry(&self) -> &PieceGeometry {
        &self.geometry
    }

    pub fn rotate(&mut self, quarter_turns: u8) {
        self.geometry.rotate(quarter_turns);
        self.orientation = (self.orientation + quarter_turns % 4) % 4;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileSlot {
    piece: Option<Piece>,
}

impl TileSlot {
    pub fn occupied(&self) -> bool {
        self.piece.is_some()
    }

    pub fn home_id(&self) -> i32 {
        self.piece.as_ref().map_or(-1, |p| p.home as i32)
    }

    pub fn orientation(&self) -> u8 {
        self.piece.as_ref().map_or(0, |p| p.orientation)
    }

    pub fn geometry(&self) -> Option<&PieceGeometry> {
        self.piece.as_ref().map(|p| &p.geometry)
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub(crate) fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    pub(crate) fn put(&mut self, piece: Piece) {
        self.piece = Some(piece);
    }

    pub(crate) fn clear(&mut self) {
        self.piece = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;

    #[test]
    fn empty_slot_attributes() {
        let slot = TileSlot::default();
        assert!(!slot.occupied());
        assert_eq!(slot.home_id(), -1);
        assert!(slot.geometry().is_none());
    }

    #[test]
    fn occupancy_follows_piece() {
        let mut slot = TileSlot::default();
        slot.put(Piece::new(7, PieceGeometry::new(vec![Segment::new(0.0, 0.0, 1.0, 1.0)])));
        assert!(slot.occupied());
        assert_eq!(slot.home_id(), 7);
        assert!(slot.geometry().is_some());
        slot.clear();
        assert_eq!(slot, TileSlot::default());
    }

    #[test]
    fn orientation_wraps() {
        let mut piece = Piece::new(0, PieceGeometry::default());
        piece.rotate(3);
        piece.rotate(2);
        assert_eq!(piece.orientation(), 1);
    }

    #[test]
    fn areas() {
        assert_eq!(Area::of(3), (Area::Storage, 3));
        assert_eq!(Area::of(19), (Area::Field, 3));
        assert_eq!(Area::Field.slot(15), 31);
    }
}
