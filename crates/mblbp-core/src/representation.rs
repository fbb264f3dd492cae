//! The MB-LBP representation: catalog ownership, preprocessing, evaluation
//! and serialization of a trained selection.
use crate::catalog::{Feature, FeatureCatalog};
use crate::integral::IntegralImage;
use crate::{MblbpError, MblbpParams, Rect};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

/// Persisted form of one selected feature: its base rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureRecord {
    /// `[x, y, width, height]` of the base block.
    pub rect: [u32; 4],
}

impl From<Rect> for FeatureRecord {
    fn from(r: Rect) -> Self {
        Self { rect: r.to_array() }
    }
}

/// Feature catalog for a fixed window plus the operations a trainer needs.
///
/// Immutable after construction; `preprocess` and `evaluate` are pure and can
/// be called concurrently.
#[derive(Clone, Debug)]
pub struct MblbpRepresentation {
    params: MblbpParams,
    catalog: FeatureCatalog,
}

impl MblbpRepresentation {
    /// Build the catalog for `params`.
    ///
    /// Fails with [`MblbpError::Configuration`] on a zero-sized window.
    /// Windows narrower than three pixels are accepted and produce an empty
    /// catalog.
    pub fn new(params: MblbpParams) -> Result<Self, MblbpError> {
        params.validate()?;
        let catalog = FeatureCatalog::build(&params);
        #[cfg(feature = "tracing")]
        debug!(features = catalog.len(), "built MB-LBP catalog");
        Ok(Self { params, catalog })
    }

    #[inline]
    pub fn params(&self) -> &MblbpParams {
        &self.params
    }

    #[inline]
    pub fn win_width(&self) -> u32 {
        self.params.win_width
    }

    #[inline]
    pub fn win_height(&self) -> u32 {
        self.params.win_height
    }

    #[inline]
    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Number of features in the catalog.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.catalog.len()
    }

    /// Integral image size `(win_width + 1, win_height + 1)` expected by
    /// [`evaluate`](Self::evaluate).
    #[inline]
    pub fn window_size(&self) -> (usize, usize) {
        (
            self.params.win_width as usize + 1,
            self.params.win_height as usize + 1,
        )
    }

    /// Feature at `index`, or [`MblbpError::IndexOutOfRange`].
    pub fn feature(&self, index: usize) -> Result<&Feature, MblbpError> {
        self.catalog.get(index).ok_or(MblbpError::IndexOutOfRange {
            index,
            len: self.catalog.len(),
        })
    }

    /// Summed-area table of an 8-bit grayscale image.
    #[inline]
    pub fn preprocess(&self, img: &[u8], w: usize, h: usize) -> Result<IntegralImage, MblbpError> {
        IntegralImage::from_u8(img, w, h)
    }

    /// MB-LBP codes for `indices`; `out[i]` belongs to `indices[i]`.
    ///
    /// All indices are checked before any feature is evaluated, so the call
    /// either returns a full result or fails.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, integral, indices), fields(n = indices.len()))
    )]
    pub fn evaluate(
        &self,
        integral: &IntegralImage,
        indices: &[usize],
    ) -> Result<Vec<u8>, MblbpError> {
        self.check_shape(integral)?;
        let features = indices
            .iter()
            .map(|&i| self.feature(i))
            .collect::<Result<Vec<_>, _>>()?;

        let data = integral.data.as_slice();

        #[cfg(feature = "rayon")]
        let codes = features.par_iter().map(|f| f.calc(data)).collect();

        #[cfg(not(feature = "rayon"))]
        let codes = features.iter().map(|f| f.calc(data)).collect();

        Ok(codes)
    }

    /// Codes for every catalog feature, in catalog order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, integral), fields(n = self.catalog.len()))
    )]
    pub fn evaluate_all(&self, integral: &IntegralImage) -> Result<Vec<u8>, MblbpError> {
        self.check_shape(integral)?;
        let data = integral.data.as_slice();

        #[cfg(feature = "rayon")]
        let codes = self
            .catalog
            .as_slice()
            .par_iter()
            .map(|f| f.calc(data))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let codes = self.catalog.iter().map(|f| f.calc(data)).collect();

        Ok(codes)
    }

    /// Like [`evaluate`](Self::evaluate), widened to `f32` for trainers that
    /// consume a float sample row.
    pub fn evaluate_row(
        &self,
        integral: &IntegralImage,
        indices: &[usize],
    ) -> Result<Vec<f32>, MblbpError> {
        let codes = self.evaluate(integral, indices)?;
        Ok(codes.into_iter().map(f32::from).collect())
    }

    /// Records for every feature whose mask entry is non-negative, in catalog
    /// order.
    ///
    /// `mask[i]` refers to catalog index `i`; a mask longer than the catalog
    /// is rejected since its tail has no feature to refer to.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, mask), fields(mask_len = mask.len()))
    )]
    pub fn serialize_selected(&self, mask: &[i32]) -> Result<Vec<FeatureRecord>, MblbpError> {
        let len = self.catalog.len();
        if mask.len() > len {
            return Err(MblbpError::IndexOutOfRange { index: len, len });
        }

        let records = mask
            .iter()
            .zip(self.catalog.iter())
            .filter(|(m, _)| **m >= 0)
            .map(|(_, f)| FeatureRecord::from(f.rect()))
            .collect();
        Ok(records)
    }

    fn check_shape(&self, integral: &IntegralImage) -> Result<(), MblbpError> {
        let (ew, eh) = self.window_size();
        if integral.w != ew || integral.h != eh || integral.data.len() != ew * eh {
            return Err(MblbpError::ShapeMismatch {
                expected_width: ew,
                expected_height: eh,
                width: integral.w,
                height: integral.h,
            });
        }
        Ok(())
    }
}
