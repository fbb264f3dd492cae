//! Shared application-level helpers for examples and tooling.
//!
//! These functions wire up I/O (load image, fit it to the detection window,
//! JSON output) around the `mblbp` evaluation APIs so examples and external
//! trainers share the same behavior.

use crate::image::{evaluate_image, fit_to_window};
use anyhow::{Context, Result};
use image::ImageReader;
use log::{debug, info};
use mblbp_core::{FeatureRecord, MblbpParams, MblbpRepresentation};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Write, path::Path, path::PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EvaluationConfig {
    pub image: PathBuf,
    pub win_width: Option<u32>,
    pub win_height: Option<u32>,
    /// Catalog indices to evaluate; all features when absent.
    pub indices: Option<Vec<usize>>,
    /// Selection mask to serialize alongside the codes.
    pub selection: Option<Vec<i32>>,
    pub output_json: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodeOut {
    pub index: usize,
    pub code: u8,
}

/// Persisted catalog subset: one record per selected feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectionDump {
    pub features: Vec<FeatureRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationDump {
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub win_width: u32,
    pub win_height: u32,
    pub num_features: usize,
    pub codes: Vec<CodeOut>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub features: Option<Vec<FeatureRecord>>,
}

/// Evaluate the configured image and write the JSON dump.
///
/// The image is resampled to the window when its size differs. Output goes to
/// `output_json`, or next to the image as `<name>.mblbp.json`.
pub fn run_evaluation(cfg: EvaluationConfig) -> Result<EvaluationDump> {
    let mut params = MblbpParams::default();
    apply_params_overrides(&mut params, &cfg);

    let repr = MblbpRepresentation::new(params).context("building feature catalog")?;
    info!(
        "catalog for {}x{} window: {} features",
        params.win_width,
        params.win_height,
        repr.num_features()
    );

    let img = ImageReader::open(&cfg.image)
        .with_context(|| format!("opening image {}", cfg.image.display()))?
        .decode()
        .with_context(|| format!("decoding image {}", cfg.image.display()))?
        .to_luma8();
    let window = fit_to_window(&img, &params);
    if window.dimensions() != img.dimensions() {
        debug!(
            "resampled {}x{} image to {}x{}",
            img.width(),
            img.height(),
            params.win_width,
            params.win_height
        );
    }

    let indices: Vec<usize> = match cfg.indices {
        Some(v) => v,
        None => (0..repr.num_features()).collect(),
    };
    let codes = evaluate_image(&repr, &window, &indices).context("evaluating features")?;
    debug!("evaluated {} features", codes.len());

    let features = match &cfg.selection {
        Some(mask) => {
            let records = repr
                .serialize_selected(mask)
                .context("serializing selected features")?;
            info!("{} of {} features selected", records.len(), mask.len());
            Some(records)
        }
        None => None,
    };

    let dump = EvaluationDump {
        image: cfg.image.to_string_lossy().into_owned(),
        width: img.width(),
        height: img.height(),
        win_width: params.win_width,
        win_height: params.win_height,
        num_features: repr.num_features(),
        codes: indices
            .iter()
            .zip(codes.iter())
            .map(|(&index, &code)| CodeOut { index, code })
            .collect(),
        features,
    };

    let json_out = cfg
        .output_json
        .unwrap_or_else(|| cfg.image.with_extension("mblbp.json"));
    write_json(&json_out, &dump)?;
    info!("saved JSON dump to {}", json_out.display());

    Ok(dump)
}

/// Write the features selected by `mask` as `{"features": [{"rect": [...]}]}`.
pub fn write_selection(path: &Path, repr: &MblbpRepresentation, mask: &[i32]) -> Result<()> {
    let features = repr
        .serialize_selected(mask)
        .context("serializing selected features")?;
    write_json(path, &SelectionDump { features })
}

fn apply_params_overrides(params: &mut MblbpParams, cfg: &EvaluationConfig) {
    if let Some(w) = cfg.win_width {
        params.win_width = w;
    }
    if let Some(h) = cfg.win_height {
        params.win_height = h;
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let mut json_file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(&mut json_file, value)?;
    json_file.write_all(b"\n")?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<EvaluationConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let cfg: EvaluationConfig = serde_json::from_reader(file)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
