//! Ergonomic wrappers over `mblbp-core` that accept `image::GrayImage` inputs.
//!
//! This crate is organized into a few focused modules:
//! - [`image`] – integral images and feature codes straight from `GrayImage`.
//! - [`app`] – JSON-configured evaluation runs used by the examples.
//! - [`logger`] – a simple `log` implementation used by examples.

pub mod app;
pub mod image;
pub mod logger;

// Re-export the core types so most consumers only need this crate.
pub use mblbp_core::{
    Feature, FeatureCatalog, FeatureRecord, IntegralImage, MblbpError, MblbpParams,
    MblbpRepresentation, Rect,
};

pub use crate::image::{evaluate_image, fit_to_window, integral_image};
