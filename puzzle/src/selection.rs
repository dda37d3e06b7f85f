use crate::puzzle::PuzzleState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Selected(usize),
    Deselected(usize),
    Moved { from: usize, to: usize },
    /// Both slots hold pieces. The selection stays.
    Illegal { selected: usize, clicked: usize },
    Rotated(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<usize>,
}

impl Selection {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn click(&mut self, puzzle: &mut PuzzleState, slot: usize) -> Outcome {
        let occupied = puzzle.slot(slot).occupied();
        match self.selected {
            None if occupied => {
                self.selected = Some(slot);
                Outcome::Selected(slot)
            },
            None => Outcome::Ignored,
            Some(first) if first == slot => {
                self.selected = None;
                Outcome::Deselected(slot)
            },
            Some(first) if occupied => Outcome::Illegal { selected: first, clicked: slot },
            Some(first) => {
                puzzle.swap(first, slot);
                self.selected = None;
                Outcome::Moved { from: first, to: slot }
            },
        }
    }

    pub fn rotate(&mut self, puzzle: &mut PuzzleState, slot: usize) -> Outcome {
        if !puzzle.slot(slot).occupied() { return Outcome::Ignored }
        puzzle.rotate(slot, 1);
        Outcome::Rotated(slot)
    }

    pub fn clear(&mut self) -> Option<usize> {
        self.selected.take()
    }
}
