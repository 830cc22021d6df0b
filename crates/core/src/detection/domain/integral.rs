use ndarray::Array2;

/// Summed-area tables over a filled elevation raster and its mask.
///
/// All four tables are `(H+1)x(W+1)` with row 0 and column 0 zero, so
/// any axis-aligned rectangle sum is four lookups. `sum`, `sq_sum` and
/// `tilted` cover the raster; `mask_sum` covers the validity mask and
/// backs the coverage gate. The tilted table uses the 45-degree
/// definition
/// `T[Y][X] = sum of raster[y][x] with y < Y and |x - X + 1| <= Y - y - 1`.
pub struct IntegralTables {
    sum: Array2<f64>,
    sq_sum: Array2<f64>,
    tilted: Array2<f64>,
    mask_sum: Array2<u32>,
}

impl IntegralTables {
    pub fn build(raster: &Array2<f64>, mask: &Array2<u8>) -> Self {
        debug_assert_eq!(raster.dim(), mask.dim());
        let (h, w) = raster.dim();

        let mut sum = Array2::<f64>::zeros((h + 1, w + 1));
        let mut sq_sum = Array2::<f64>::zeros((h + 1, w + 1));
        let mut mask_sum = Array2::<u32>::zeros((h + 1, w + 1));
        for i in 1..=h {
            for j in 1..=w {
                let v = raster[[i - 1, j - 1]];
                sum[[i, j]] = v + sum[[i - 1, j]] + sum[[i, j - 1]] - sum[[i - 1, j - 1]];
                sq_sum[[i, j]] =
                    v * v + sq_sum[[i - 1, j]] + sq_sum[[i, j - 1]] - sq_sum[[i - 1, j - 1]];
                mask_sum[[i, j]] = mask[[i - 1, j - 1]] as u32 + mask_sum[[i - 1, j]]
                    + mask_sum[[i, j - 1]]
                    - mask_sum[[i - 1, j - 1]];
            }
        }

        Self {
            sum,
            sq_sum,
            tilted: build_tilted(raster),
            mask_sum,
        }
    }

    /// Raster width the tables were built over.
    pub fn width(&self) -> usize {
        self.sum.dim().1 - 1
    }

    /// Raster height the tables were built over.
    pub fn height(&self) -> usize {
        self.sum.dim().0 - 1
    }

    /// Sum of the raster over `rows x cols` cells starting at `(row, col)`.
    pub fn region_sum(&self, row: usize, col: usize, rows: usize, cols: usize) -> f64 {
        corner_sum(&self.sum, row, col, rows, cols)
    }

    /// Sum of squared raster values over the same region.
    pub fn region_sq_sum(&self, row: usize, col: usize, rows: usize, cols: usize) -> f64 {
        corner_sum(&self.sq_sum, row, col, rows, cols)
    }

    /// Number of valid cells inside the `size x size` window at `(row, col)`.
    pub fn coverage(&self, row: usize, col: usize, size: usize) -> u32 {
        self.mask_sum[[row + size, col + size]] + self.mask_sum[[row, col]]
            - self.mask_sum[[row, col + size]]
            - self.mask_sum[[row + size, col]]
    }

    pub fn sum(&self) -> &Array2<f64> {
        &self.sum
    }

    pub fn sq_sum(&self) -> &Array2<f64> {
        &self.sq_sum
    }

    pub fn tilted(&self) -> &Array2<f64> {
        &self.tilted
    }

    pub fn mask_sum(&self) -> &Array2<u32> {
        &self.mask_sum
    }
}

fn corner_sum(table: &Array2<f64>, row: usize, col: usize, rows: usize, cols: usize) -> f64 {
    table[[row + rows, col + cols]] + table[[row, col]]
        - table[[row, col + cols]]
        - table[[row + rows, col]]
}

/// 45-degree summed-area table via the rotated recurrence
/// `T[Y][X] = T[Y-1][X-1] + T[Y-1][X+1] - T[Y-2][X] + I[Y-1][X-1] + I[Y-2][X-1]`.
///
/// The recurrence references virtual columns outside `[0, W]` whose
/// closed-form values are nonzero near the triangle edges, so it runs
/// over a grid extended by H columns on each side; entries beyond that
/// extension are exactly zero and the final table is the center slice.
fn build_tilted(raster: &Array2<f64>) -> Array2<f64> {
    let (h, w) = raster.dim();
    let offset = h as isize;
    let ext_w = w + 2 * h + 1;
    let mut ext = Array2::<f64>::zeros((h + 1, ext_w));

    let pixel = |x: isize, y: isize| -> f64 {
        if x >= 0 && (x as usize) < w && y >= 0 && (y as usize) < h {
            raster[[y as usize, x as usize]]
        } else {
            0.0
        }
    };
    let entry = |ext: &Array2<f64>, y: usize, xe: isize| -> f64 {
        if xe >= 0 && (xe as usize) < ext_w {
            ext[[y, xe as usize]]
        } else {
            0.0
        }
    };

    for y in 1..=h {
        for xe in 0..ext_w as isize {
            let x = xe - offset;
            let two_up = if y >= 2 { entry(&ext, y - 2, xe) } else { 0.0 };
            ext[[y, xe as usize]] = entry(&ext, y - 1, xe - 1) + entry(&ext, y - 1, xe + 1)
                - two_up
                + pixel(x - 1, y as isize - 1)
                + pixel(x - 1, y as isize - 2);
        }
    }

    let mut tilted = Array2::<f64>::zeros((h + 1, w + 1));
    for y in 0..=h {
        for x in 0..=w {
            tilted[[y, x]] = ext[[y, x + h]];
        }
    }
    tilted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn brute_sum(raster: &Array2<f64>, rows: usize, cols: usize) -> f64 {
        let mut total = 0.0;
        for i in 0..rows {
            for j in 0..cols {
                total += raster[[i, j]];
            }
        }
        total
    }

    fn brute_tilted(raster: &Array2<f64>, x: usize, y: usize) -> f64 {
        let (h, w) = raster.dim();
        let mut total = 0.0;
        for py in 0..h.min(y) {
            for px in 0..w {
                let dx = px as isize - x as isize + 1;
                if dx.abs() <= y as isize - py as isize - 1 {
                    total += raster[[py, px]];
                }
            }
        }
        total
    }

    fn deterministic_raster(h: usize, w: usize) -> Array2<f64> {
        // pseudo-random but reproducible values
        Array2::from_shape_fn((h, w), |(i, j)| {
            (((i * 31 + j * 17 + 7) % 23) as f64) - 11.0
        })
    }

    #[test]
    fn test_zero_row_and_column() {
        let raster = deterministic_raster(4, 5);
        let mask = Array2::<u8>::ones((4, 5));
        let t = IntegralTables::build(&raster, &mask);
        for j in 0..=5 {
            assert_eq!(t.sum()[[0, j]], 0.0);
            assert_eq!(t.tilted()[[0, j]], 0.0);
            assert_eq!(t.mask_sum()[[0, j]], 0);
        }
        for i in 0..=4 {
            assert_eq!(t.sum()[[i, 0]], 0.0);
            assert_eq!(t.mask_sum()[[i, 0]], 0);
        }
    }

    #[test]
    fn test_standard_sum_matches_brute_force() {
        let raster = deterministic_raster(6, 7);
        let mask = Array2::<u8>::ones((6, 7));
        let t = IntegralTables::build(&raster, &mask);
        for i in 0..=6 {
            for j in 0..=7 {
                assert_relative_eq!(
                    t.sum()[[i, j]],
                    brute_sum(&raster, i, j),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_squared_sum_matches_brute_force() {
        let raster = deterministic_raster(5, 5);
        let mask = Array2::<u8>::ones((5, 5));
        let t = IntegralTables::build(&raster, &mask);
        let squared = raster.mapv(|v| v * v);
        for i in 0..=5 {
            for j in 0..=5 {
                assert_relative_eq!(
                    t.sq_sum()[[i, j]],
                    brute_sum(&squared, i, j),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_tilted_sum_matches_closed_form() {
        let raster = deterministic_raster(6, 5);
        let mask = Array2::<u8>::ones((6, 5));
        let t = IntegralTables::build(&raster, &mask);
        for y in 0..=6 {
            for x in 0..=5 {
                assert_relative_eq!(
                    t.tilted()[[y, x]],
                    brute_tilted(&raster, x, y),
                    epsilon = 1e-9,
                );
            }
        }
    }

    #[test]
    fn test_region_sum_interior_window() {
        let raster = deterministic_raster(8, 8);
        let mask = Array2::<u8>::ones((8, 8));
        let t = IntegralTables::build(&raster, &mask);
        let mut expected = 0.0;
        for i in 2..6 {
            for j in 3..6 {
                expected += raster[[i, j]];
            }
        }
        assert_relative_eq!(t.region_sum(2, 3, 4, 3), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_coverage_counts_valid_cells() {
        let raster = Array2::<f64>::zeros((6, 6));
        let mut mask = Array2::<u8>::zeros((6, 6));
        mask[[2, 2]] = 1;
        mask[[2, 3]] = 1;
        mask[[3, 2]] = 1;
        let t = IntegralTables::build(&raster, &mask);
        assert_eq!(t.coverage(2, 2, 2), 3);
        assert_eq!(t.coverage(0, 0, 2), 0);
        assert_eq!(t.coverage(0, 0, 6), 3);
    }

    #[test]
    fn test_dimensions() {
        let raster = Array2::<f64>::zeros((4, 9));
        let mask = Array2::<u8>::zeros((4, 9));
        let t = IntegralTables::build(&raster, &mask);
        assert_eq!(t.height(), 4);
        assert_eq!(t.width(), 9);
        assert_eq!(t.sum().dim(), (5, 10));
        assert_eq!(t.tilted().dim(), (5, 10));
    }
}
