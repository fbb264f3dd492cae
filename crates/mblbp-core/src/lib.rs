//! Core primitives for building a multi-block LBP (MB-LBP) feature catalog and
//! evaluating it on integral images.
//!
//! # Overview
//!
//! This crate exposes the building blocks used by boosted-classifier trainers:
//!
//! - [`offsets`] – the 4×4 grid of integral-image offsets shared by the nine
//!   blocks of one MB-LBP feature.
//! - [`catalog`] – deterministic enumeration of every feature that fits in a
//!   detection window.
//! - [`integral`] – zero-padded summed-area tables on 8‑bit grayscale input.
//! - [`representation`] – the engine tying it together: preprocess, evaluate,
//!   introspect and serialize a selected subset of the catalog.
//!
//! Catalog indices are the contract with the trainer: a selection mask
//! produced during training refers to features by their position in the
//! catalog, so the enumeration order never changes for a given window.
//!
//! # Features
//!
//! - `rayon` – evaluates requested features in parallel. Results are returned
//!   in request order and are identical to the sequential path.
//! - `serde` – derives `Serialize`/`Deserialize` for [`Rect`] and
//!   [`FeatureRecord`].
//! - `tracing` – instruments catalog construction, preprocessing and
//!   evaluation with `tracing` spans.

pub mod catalog;
pub mod integral;
pub mod offsets;
pub mod representation;

pub use crate::catalog::{Feature, FeatureCatalog};
pub use crate::integral::IntegralImage;
pub use crate::offsets::BlockGrid;
pub use crate::representation::{FeatureRecord, MblbpRepresentation};

/// Detection window configuration.
///
/// The window size fixes both the catalog contents and the stride of the
/// integral images the engine accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MblbpParams {
    /// Window width in pixels.
    pub win_width: u32,
    /// Window height in pixels.
    pub win_height: u32,
}

impl Default for MblbpParams {
    fn default() -> Self {
        Self {
            win_width: 24,
            win_height: 24,
        }
    }
}

impl MblbpParams {
    #[inline]
    pub fn new(win_width: u32, win_height: u32) -> Self {
        Self {
            win_width,
            win_height,
        }
    }

    /// Row stride of integral images for this window (`win_width + 1`).
    #[inline]
    pub fn stride(&self) -> usize {
        self.win_width as usize + 1
    }

    pub(crate) fn validate(&self) -> Result<(), MblbpError> {
        if self.win_width == 0 || self.win_height == 0 {
            return Err(MblbpError::Configuration {
                win_width: self.win_width,
                win_height: self.win_height,
            });
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `[x, y, width, height]`, the layout used for persisted records.
    #[inline]
    pub fn to_array(self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

/// Errors reported by the catalog and the representation engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MblbpError {
    #[error("window must be at least 1x1 pixels, got {win_width}x{win_height}")]
    Configuration { win_width: u32, win_height: u32 },

    #[error("feature index {index} out of range for catalog of {len} features")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("integral image is {width}x{height}, expected {expected_width}x{expected_height}")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("pixel buffer holds {len} values, expected {width}x{height}")]
    ImageBuffer {
        len: usize,
        width: usize,
        height: usize,
    },
}
