//! Integral-image offsets for the 3×3 block layout of an MB-LBP feature.
//!
//! A feature with base block `(x, y, w, h)` covers a `3w × 3h` area split into
//! nine equal blocks. The block corners form a 4×4 grid of points
//! `(x + c·w, y + r·h)` for `r, c ∈ 0..4`, stored row-major, so interior
//! points are shared by up to four adjacent blocks:
//!
//! ```text
//!  0 ── 1 ── 2 ── 3
//!  │ NW │ N  │ NE │
//!  4 ── 5 ── 6 ── 7
//!  │ W  │ C  │ E  │
//!  8 ── 9 ── 10 ─ 11
//!  │ SW │ S  │ SE │
//!  12 ─ 13 ─ 14 ─ 15
//! ```

/// Block coordinates `(row, col)` of the eight neighbours, in code bit order
/// from most significant (bit 7) to least significant (bit 0).
///
/// The ring starts at the top-left block and walks clockwise:
/// NW, N, NE, E, SE, S, SW, W.
pub const NEIGHBOUR_BLOCKS: [(usize, usize); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 1),
    (2, 0),
    (1, 0),
];

/// Block coordinates of the center block.
pub const CENTER_BLOCK: (usize, usize) = (1, 1);

/// Linear offsets of the 16 grid points into a row-major integral buffer.
pub fn make_offsets(
    stride: usize,
    x: usize,
    y: usize,
    block_w: usize,
    block_h: usize,
) -> [usize; 16] {
    let mut p = [0usize; 16];
    for row in 0..4 {
        let py = y + row * block_h;
        for col in 0..4 {
            let px = x + col * block_w;
            p[row * 4 + col] = px + stride * py;
        }
    }
    p
}

/// The 4×4 point grid of one feature, baked against a fixed integral stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    points: [usize; 16],
}

impl BlockGrid {
    #[inline]
    pub fn new(stride: usize, x: usize, y: usize, block_w: usize, block_h: usize) -> Self {
        Self {
            points: make_offsets(stride, x, y, block_w, block_h),
        }
    }

    #[inline]
    pub fn points(&self) -> &[usize; 16] {
        &self.points
    }

    /// Sum of block `(row, col)` via `A - B - C + D` on its four corners.
    ///
    /// Wrapping arithmetic matches the wrapping accumulation of
    /// [`IntegralImage`](crate::IntegralImage).
    #[inline]
    pub fn block_sum(&self, data: &[i32], row: usize, col: usize) -> i32 {
        let i = row * 4 + col;
        let p = &self.points;
        data[p[i]]
            .wrapping_sub(data[p[i + 1]])
            .wrapping_sub(data[p[i + 4]])
            .wrapping_add(data[p[i + 5]])
    }

    /// All nine block sums, row-major (`[NW, N, NE, W, C, E, SW, S, SE]`).
    pub fn block_sums(&self, data: &[i32]) -> [i32; 9] {
        let mut sums = [0i32; 9];
        for row in 0..3 {
            for col in 0..3 {
                sums[row * 3 + col] = self.block_sum(data, row, col);
            }
        }
        sums
    }

    /// 8-bit MB-LBP code: bit set when the neighbour block sum is `>=` the
    /// center block sum, NW in the most significant bit.
    #[inline]
    pub fn code(&self, data: &[i32]) -> u8 {
        let (cr, cc) = CENTER_BLOCK;
        let center = self.block_sum(data, cr, cc);

        let mut code = 0u8;
        for &(row, col) in NEIGHBOUR_BLOCKS.iter() {
            code <<= 1;
            if self.block_sum(data, row, col) >= center {
                code |= 1;
            }
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_row_major_grid() {
        // stride 25 (24px window), base block (2, 1) of 3x2
        let p = make_offsets(25, 2, 1, 3, 2);
        assert_eq!(p[0], 2 + 25);
        assert_eq!(p[3], 11 + 25);
        assert_eq!(p[5], 5 + 25 * 3);
        assert_eq!(p[10], 8 + 25 * 5);
        assert_eq!(p[12], 2 + 25 * 7);
        assert_eq!(p[15], 11 + 25 * 7);
    }

    #[test]
    fn adjacent_blocks_share_grid_points() {
        let p = make_offsets(10, 0, 0, 2, 3);
        // right edge of NW is the left edge of N
        assert_eq!(p[1], 2);
        assert_eq!(p[5], 2 + 10 * 3);
        // bottom-right of NW is the top-left of C
        assert_eq!(p[5], make_offsets(10, 2, 3, 2, 3)[0]);
    }

    #[test]
    fn block_sums_cover_the_footprint() {
        // 6x4 image, blocks of 2x1 anchored at (0, 1)
        let img: Vec<u8> = (0..24).collect();
        let ii = crate::IntegralImage::from_u8(&img, 6, 4).unwrap();
        let grid = BlockGrid::new(ii.w, 0, 1, 2, 1);
        let sums = grid.block_sums(&ii.data);

        for row in 0..3 {
            for col in 0..3 {
                let y = 1 + row;
                let x = col * 2;
                let direct = img[y * 6 + x] as i32 + img[y * 6 + x + 1] as i32;
                assert_eq!(sums[row * 3 + col], direct);
            }
        }
        assert_eq!(sums.iter().sum::<i32>(), ii.rect_sum(0, 1, 6, 3));
    }

    #[test]
    fn neighbour_ring_excludes_center_and_covers_border() {
        let mut seen = [false; 9];
        for &(r, c) in NEIGHBOUR_BLOCKS.iter() {
            assert_ne!((r, c), CENTER_BLOCK);
            seen[r * 3 + c] = true;
        }
        assert_eq!(seen.iter().filter(|&&s| s).count(), 8);
    }
}
