use amaze_puzzle::saving::encode_original;
use amaze_puzzle::{PieceGeometry, Segment};
use rand::prelude::*;

// Carves a perfect maze over an 8x8 grid of 50px cells, two cells per tile side,
// and writes the 16 tiles as an original maze file.
const CELLS: usize = 8;
const CELL: f32 = 50.0;

fn carve(rng: &mut impl Rng) -> (Vec<Vec<bool>>, Vec<Vec<bool>>) {
    // right[y][x]: wall east of (x, y); down[y][x]: wall south of (x, y)
    let mut right = vec![vec![true; CELLS]; CELLS];
    let mut down = vec![vec![true; CELLS]; CELLS];
    let mut seen = vec![vec![false; CELLS]; CELLS];
    let mut stack = vec![(0, 0)];
    seen[0][0] = true;

    while let Some(&(x, y)) = stack.last() {
        let mut next = Vec::new();
        if x > 0 && !seen[y][x-1] { next.push((x-1, y)) }
        if x+1 < CELLS && !seen[y][x+1] { next.push((x+1, y)) }
        if y > 0 && !seen[y-1][x] { next.push((x, y-1)) }
        if y+1 < CELLS && !seen[y+1][x] { next.push((x, y+1)) }
        let Some(&(nx, ny)) = next.choose(rng) else {
            stack.pop();
            continue;
        };
        match (nx as isize - x as isize, ny as isize - y as isize) {
            (1, 0) => right[y][x] = false,
            (-1, 0) => right[ny][nx] = false,
            (0, 1) => down[y][x] = false,
            _ => down[ny][nx] = false,
        }
        seen[ny][nx] = true;
        stack.push((nx, ny));
    }
    (right, down)
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "default.mze".into());
    let (right, down) = carve(&mut rand::rng());

    let mut tiles = vec![Vec::new(); 16];
    for y in 0..CELLS {
        for x in 0..CELLS {
            let tile = &mut tiles[(y / 2) * 4 + x / 2];
            let (lx, ly) = ((x % 2) as f32 * CELL, (y % 2) as f32 * CELL);
            if right[y][x] && x+1 < CELLS {
                tile.push(Segment::new(lx + CELL, ly, lx + CELL, ly + CELL));
            }
            if down[y][x] && y+1 < CELLS {
                tile.push(Segment::new(lx, ly + CELL, lx + CELL, ly + CELL));
            }
        }
    }
    let pieces: Vec<_> = tiles.into_iter().map(PieceGeometry::new).collect();

    std::fs::write(&path, encode_original(&pieces)).expect("failed writing maze file");
    println!("wrote {path}");
}
