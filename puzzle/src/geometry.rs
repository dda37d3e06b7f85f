/// Pieces are drawn on a 100x100 tile and turn about its middle.
pub const CENTER: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment(pub [f32; 4]);

impl Segment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self([x1, y1, x2, y2])
    }

    fn quarter_turned(self) -> Self {
        let [x1, y1, x2, y2] = self.0;
        let (x1, y1) = quarter_turn(x1, y1);
        let (x2, y2) = quarter_turn(x2, y2);
        Self([x1, y1, x2, y2])
    }
}

// (x, y) -> (-y, x) about the tile center, always the same handedness
fn quarter_turn(x: f32, y: f32) -> (f32, f32) {
    let (x, y) = (x - CENTER, y - CENTER);
    (-y + CENTER, x + CENTER)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceGeometry {
    segments: Vec<Segment>,
}

impl PieceGeometry {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Groups a flat `x1 y1 x2 y2 ...` list into segments. A trailing partial group is dropped.
    pub fn from_coordinates(coordinates: &[f32]) -> Self {
        let segments = coordinates
            .chunks_exact(4)
            .map(|c| Segment([c[0], c[1], c[2], c[3]]))
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn line_count(&self) -> usize {
        self.segments.len()
    }

    pub fn coordinates(&self) -> impl Iterator<Item=f32> + '_ {
        self.segments.iter().flat_map(|s| s.0)
    }

    pub fn rotate(&mut self, quarter_turns: u8) {
        for _ in 0..quarter_turns % 4 {
            for segment in &mut self.segments {
                *segment = segment.quarter_turned();
            }
        }
    }

    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let mut rotated = self.clone();
        rotated.rotate(quarter_turns);
        rotated
    }

    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.line_count() == other.line_count()
            && self.coordinates().zip(other.coordinates()).all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PieceGeometry {
        PieceGeometry::new(vec![
            Segment::new(0.0, 0.0, 100.0, 0.0),
            Segment::new(25.0, 50.0, 25.0, 100.0),
            Segment::new(12.5, 33.3, 87.1, 64.9),
        ])
    }

    #[test]
    fn quarter_turn_direction() {
        let mut g = PieceGeometry::new(vec![Segment::new(60.0, 50.0, 100.0, 0.0)]);
        g.rotate(1);
        assert_eq!(g.segments(), &[Segment::new(50.0, 60.0, 100.0, 100.0)]);
    }

    #[test]
    fn four_turns_restore() {
        let mut g = sample();
        for _ in 0..4 {
            g.rotate(1);
        }
        assert!(g.approx_eq(&sample(), 1e-4));
    }

    #[test]
    fn unrotate_then_rotate() {
        for o in 0..4 {
            let g = sample().rotated((4 - o) % 4).rotated(o);
            assert!(g.approx_eq(&sample(), 1e-4), "orientation {o}");
        }
    }

    #[test]
    fn partial_coordinates_dropped() {
        let g = PieceGeometry::from_coordinates(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(g.line_count(), 1);
        assert_eq!(g.coordinates().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
