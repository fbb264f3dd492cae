//! Deterministic enumeration of MB-LBP features inside a detection window.
use crate::offsets::BlockGrid;
use crate::{MblbpParams, Rect};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One MB-LBP test: a base block and its precomputed offset grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    rect: Rect,
    grid: BlockGrid,
}

impl Feature {
    /// Build a feature for base block `(x, y, block_w, block_h)` against an
    /// integral buffer with row stride `stride`.
    pub fn new(stride: usize, x: u32, y: u32, block_w: u32, block_h: u32) -> Self {
        Self {
            rect: Rect::new(x, y, block_w, block_h),
            grid: BlockGrid::new(
                stride,
                x as usize,
                y as usize,
                block_w as usize,
                block_h as usize,
            ),
        }
    }

    /// Base block in window coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Evaluate the 8-bit code on integral data with the stride this feature
    /// was built for.
    #[inline]
    pub fn calc(&self, integral: &[i32]) -> u8 {
        self.grid.code(integral)
    }
}

/// Every feature that fits inside a window, in enumeration order.
///
/// The order is x, then y, then block width, then block height, all
/// ascending. Selection masks index into this sequence.
#[derive(Clone, Debug, Default)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
}

impl FeatureCatalog {
    /// Enumerate all features whose 3×3 footprint fits in the window.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(params), fields(w = params.win_width, h = params.win_height))
    )]
    pub fn build(params: &MblbpParams) -> Self {
        let win_w = params.win_width;
        let win_h = params.win_height;
        let stride = params.stride();

        let mut features = Vec::new();
        for x in 0..win_w {
            for y in 0..win_h {
                for w in 1..=win_w / 3 {
                    for h in 1..=win_h / 3 {
                        if x + 3 * w <= win_w && y + 3 * h <= win_h {
                            features.push(Feature::new(stride, x, y, w, h));
                        }
                    }
                }
            }
        }

        Self { features }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Feature> + '_ {
        self.features.iter()
    }

    pub fn as_slice(&self) -> &[Feature] {
        &self.features
    }

    /// Base rectangles of all features in catalog order.
    pub fn rects(&self) -> Vec<Rect> {
        self.features.iter().map(Feature::rect).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(w: u32, h: u32) -> FeatureCatalog {
        FeatureCatalog::build(&MblbpParams::new(w, h))
    }

    #[test]
    fn default_window_has_known_size() {
        // 92 admissible (x, w) pairs times 92 admissible (y, h) pairs
        assert_eq!(catalog(24, 24).len(), 8464);
    }

    #[test]
    fn rectangular_window_size_matches_enumeration() {
        // width 9: (x, w) pairs 7 + 4 + 1 = 12, height 6: (y, h) pairs 4 + 1 = 5
        assert_eq!(catalog(9, 6).len(), 60);
    }

    #[test]
    fn narrow_windows_are_empty() {
        assert!(catalog(2, 24).is_empty());
        assert!(catalog(24, 2).is_empty());
        assert_eq!(catalog(3, 3).len(), 1);
    }

    #[test]
    fn enumeration_order_is_x_y_w_h() {
        let rects = catalog(24, 24).rects();
        assert_eq!(rects[0], Rect::new(0, 0, 1, 1));
        assert_eq!(rects[1], Rect::new(0, 0, 1, 2));
        assert_eq!(rects[7], Rect::new(0, 0, 1, 8));
        assert_eq!(rects[8], Rect::new(0, 0, 2, 1));
        assert_eq!(rects[64], Rect::new(0, 1, 1, 1));
        assert_eq!(*rects.last().unwrap(), Rect::new(21, 21, 1, 1));

        for pair in rects.windows(2) {
            let a = (pair[0].x, pair[0].y, pair[0].width, pair[0].height);
            let b = (pair[1].x, pair[1].y, pair[1].width, pair[1].height);
            assert!(a < b, "catalog not strictly ordered: {a:?} then {b:?}");
        }
    }

    #[test]
    fn every_feature_fits_the_window() {
        let (win_w, win_h) = (24u32, 18u32);
        for r in catalog(win_w, win_h).rects() {
            assert!(r.width >= 1 && r.width <= win_w / 3);
            assert!(r.height >= 1 && r.height <= win_h / 3);
            assert!(r.x + 3 * r.width <= win_w);
            assert!(r.y + 3 * r.height <= win_h);
        }
    }

    #[test]
    fn rebuilding_is_deterministic() {
        assert_eq!(catalog(16, 20).rects(), catalog(16, 20).rects());
    }

    #[test]
    fn offsets_use_window_stride() {
        let cat = catalog(24, 24);
        let f = cat.get(8).unwrap();
        assert_eq!(f.rect(), Rect::new(0, 0, 2, 1));
        assert_eq!(f.grid().points()[15], 6 + 25 * 3);
    }
}
