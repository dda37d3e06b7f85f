use itertools::Itertools;
use rand::prelude::*;

use crate::slot::PIECE_COUNT;

// once this many pieces start unrotated, the rest are drawn from 1..=3
const ZERO_LIMIT: usize = 4;

/// The random starting layout of a fresh game: which home sits in each storage slot and how far it is turned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scramble {
    placement: [u8; PIECE_COUNT],
    rotations: [u8; PIECE_COUNT],
}

impl Scramble {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self { placement: shuffled_homes(rng), rotations: starting_rotations(rng) }
    }

    pub fn identity() -> Self {
        Self { placement: std::array::from_fn(|i| i as u8), rotations: [0; PIECE_COUNT] }
    }

    pub fn from_parts(placement: [u8; PIECE_COUNT], rotations: [u8; PIECE_COUNT]) -> Self {
        debug_assert!(placement.iter().copied().sorted().eq(0..PIECE_COUNT as u8));
        Self { placement, rotations: rotations.map(|r| r % 4) }
    }

    pub fn placement(&self, index: usize) -> u8 {
        self.placement[index]
    }

    pub fn rotation(&self, index: usize) -> u8 {
        self.rotations[index]
    }

    pub fn placements(&self) -> &[u8; PIECE_COUNT] {
        &self.placement
    }

    pub fn rotations(&self) -> &[u8; PIECE_COUNT] {
        &self.rotations
    }
}

fn shuffled_homes(rng: &mut impl Rng) -> [u8; PIECE_COUNT] {
    let mut homes = Scramble::identity().placement;
    homes.shuffle(rng);
    homes
}

// Rejection sampling. Well over nine draws in ten are accepted, so the loop ends after about one pass.
fn starting_rotations(rng: &mut impl Rng) -> [u8; PIECE_COUNT] {
    loop {
        let mut rotations = [0; PIECE_COUNT];
        let mut zeros = 0;
        for rotation in &mut rotations {
            *rotation = if zeros == ZERO_LIMIT { rng.random_range(1..4) } else { rng.random_range(0..4) };
            if *rotation == 0 {
                zeros += 1;
            }
        }
        if covers_every_rotation(&rotations) {
            break rotations;
        }
    }
}

pub(crate) fn covers_every_rotation(rotations: &[u8]) -> bool {
    let counts = rotations.iter().copied().counts();
    (0..4).all(|r| counts.contains_key(&r))
}
