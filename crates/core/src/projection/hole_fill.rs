use std::collections::VecDeque;

use ndarray::Array2;

/// One pending cell in the fill frontier.
#[derive(Clone, Copy, Debug)]
struct FillCell {
    row: usize,
    col: usize,
    distance: u8,
}

/// Bounded multi-pass propagation of elevation into occlusion holes.
///
/// Invalid interior cells adjacent to valid ones seed a FIFO frontier
/// at distance 1. A cell resolves at distance `c+1` by averaging the
/// neighbors already resolved at distance `<= c`; neighbors not yet
/// usable are re-enqueued at `c+1`, so a cell may be queued several
/// times at increasing distances before it finally resolves. Cells
/// farther than `max_distance` hops from the valid region are left
/// unresolved, which keeps filling local to face-sized occlusions and
/// guarantees termination.
///
/// During the fill the mask transiently holds resolve distances;
/// `fill` collapses it back to {0, 1} and replaces remaining `-inf`
/// cells with the background elevation.
pub struct HoleFiller {
    max_distance: u8,
}

impl HoleFiller {
    pub fn new(max_distance: u8) -> Self {
        Self { max_distance }
    }

    pub fn fill(&self, raster: &mut Array2<f64>, mask: &mut Array2<u8>, background: f64) {
        debug_assert_eq!(raster.dim(), mask.dim());
        let (height, width) = raster.dim();

        let mut queue: VecDeque<FillCell> = VecDeque::new();
        for i in 1..height.saturating_sub(1) {
            for j in 1..width.saturating_sub(1) {
                if mask[[i, j]] == 0
                    && (mask[[i, j - 1]] != 0
                        || mask[[i, j + 1]] != 0
                        || mask[[i - 1, j]] != 0
                        || mask[[i + 1, j]] != 0)
                {
                    queue.push_back(FillCell {
                        row: i,
                        col: j,
                        distance: 1,
                    });
                }
            }
        }

        while let Some(cell) = queue.pop_front() {
            let (i, j, c) = (cell.row, cell.col, cell.distance);
            if mask[[i, j]] != 0
                || i == 0
                || i >= height - 1
                || j == 0
                || j >= width - 1
                || c >= self.max_distance
            {
                continue;
            }
            mask[[i, j]] = c + 1;

            let mut total = 0.0;
            let mut contributors = 0u32;
            for (ni, nj) in [(i, j - 1), (i, j + 1), (i - 1, j), (i + 1, j)] {
                let neighbor = mask[[ni, nj]];
                if neighbor != 0 && neighbor <= c {
                    contributors += 1;
                    total += raster[[ni, nj]];
                } else {
                    queue.push_back(FillCell {
                        row: ni,
                        col: nj,
                        distance: c + 1,
                    });
                }
            }
            if contributors > 0 {
                raster[[i, j]] = total / contributors as f64;
            }
        }

        for (r, m) in raster.iter_mut().zip(mask.iter_mut()) {
            if *r == f64::NEG_INFINITY {
                *r = background;
            }
            if *m != 0 {
                *m = 1;
            }
        }
    }
}
