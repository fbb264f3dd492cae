//! `image::GrayImage` helpers for the MB-LBP representation.
//!
//! These wrappers expose the slice-based `mblbp-core` API in terms of
//! `image::GrayImage`, which is convenient for most downstream consumers.

use image::imageops::{resize, FilterType};
use image::GrayImage;
use mblbp_core::{IntegralImage, MblbpError, MblbpParams, MblbpRepresentation};
use std::borrow::Cow;

/// Summed-area table of a `GrayImage`.
#[inline]
pub fn integral_image(img: &GrayImage) -> IntegralImage {
    IntegralImage::from_u8(img.as_raw(), img.width() as usize, img.height() as usize)
        .expect("GrayImage holds width * height samples")
}

/// Resample `img` to the detection window unless it already matches.
pub fn fit_to_window<'a>(img: &'a GrayImage, params: &MblbpParams) -> Cow<'a, GrayImage> {
    if img.width() == params.win_width && img.height() == params.win_height {
        Cow::Borrowed(img)
    } else {
        Cow::Owned(resize(
            img,
            params.win_width,
            params.win_height,
            FilterType::Triangle,
        ))
    }
}

/// Integrate a window-sized `GrayImage` and evaluate `indices` on it.
pub fn evaluate_image(
    repr: &MblbpRepresentation,
    img: &GrayImage,
    indices: &[usize],
) -> Result<Vec<u8>, MblbpError> {
    let ii = integral_image(img);
    repr.evaluate(&ii, indices)
}
