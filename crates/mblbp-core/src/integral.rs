//! Zero-padded summed-area tables.
use crate::MblbpError;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Integral image in row-major layout, one row and one column larger than the
/// source image.
///
/// `at(x, y)` is the sum of all source pixels `(sx, sy)` with `sx < x` and
/// `sy < y`; the first row and column are zero.
///
/// Cells accumulate with wrapping `i32` arithmetic, so a table built from a
/// very large bright image may hold wrapped values. Rectangle sums taken with
/// `A - B - C + D` (also wrapping) stay exact modulo 2³², which makes them
/// exact whenever the rectangle's true sum fits in `i32`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegralImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<i32>,
}

impl IntegralImage {
    /// Integrate an 8-bit grayscale image of `w × h` pixels.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(img)))]
    pub fn from_u8(img: &[u8], w: usize, h: usize) -> Result<Self, MblbpError> {
        let buffer_err = || MblbpError::ImageBuffer {
            len: img.len(),
            width: w,
            height: h,
        };
        if w.checked_mul(h) != Some(img.len()) {
            return Err(buffer_err());
        }

        let iw = w.checked_add(1).ok_or_else(buffer_err)?;
        let ih = h.checked_add(1).ok_or_else(buffer_err)?;
        let cells = iw.checked_mul(ih).ok_or_else(buffer_err)?;
        let mut data = vec![0i32; cells];

        for y in 0..h {
            let src = &img[y * w..(y + 1) * w];
            let mut row_sum = 0i32;
            for (x, &v) in src.iter().enumerate() {
                row_sum = row_sum.wrapping_add(v as i32);
                data[(y + 1) * iw + x + 1] = data[y * iw + x + 1].wrapping_add(row_sum);
            }
        }

        Ok(Self {
            w: iw,
            h: ih,
            data,
        })
    }

    #[inline]
    /// Table value at an integer coordinate.
    pub fn at(&self, x: usize, y: usize) -> i32 {
        self.data[y * self.w + x]
    }

    /// Sum of source pixels in `[x, x + w) × [y, y + h)`.
    #[inline]
    pub fn rect_sum(&self, x: usize, y: usize, w: usize, h: usize) -> i32 {
        self.at(x, y)
            .wrapping_sub(self.at(x + w, y))
            .wrapping_sub(self.at(x, y + h))
            .wrapping_add(self.at(x + w, y + h))
    }

    /// Size of the source image this table was built from.
    #[inline]
    pub fn source_size(&self) -> (usize, usize) {
        (self.w.saturating_sub(1), self.h.saturating_sub(1))
    }
}
