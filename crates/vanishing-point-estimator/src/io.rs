//! JSON configuration and report helpers for vanishing-point runs.

use crate::{EstimateError, PairStats, VanishingPointParams, VanishingPointResult};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use vanishing_point_core::{
    ImageBounds, LineSegment, SegmentDetectionParams, WorkingFrame, DEFAULT_MAX_WORKING_SIDE,
};

#[derive(thiserror::Error, Debug)]
pub enum VpIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum VpConfigError {
    #[error("no frame size: set `image_path` or both `width` and `height`")]
    MissingFrameSize,
    #[error("no segments: set `segments` or `segments_path`")]
    MissingSegments,
    #[error("invalid max_working_side {max_side}: expected a finite value >= 1")]
    InvalidMaxSide { max_side: f64 },
    #[error(transparent)]
    Io(#[from] VpIoError),
}

fn default_max_working_side() -> Option<f64> {
    Some(DEFAULT_MAX_WORKING_SIDE)
}

/// Configuration of one vanishing-point run.
///
/// Segments are given in source-image pixels, either inline or as a JSON
/// file holding an array of `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpDetectConfig {
    #[serde(default)]
    pub image_path: Option<String>,
    /// Source image width; read from the image header when absent.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub segments: Option<Vec<LineSegment>>,
    #[serde(default)]
    pub segments_path: Option<String>,
    /// Cap on the working image's longer side; `null` disables downscaling.
    #[serde(default = "default_max_working_side")]
    pub max_working_side: Option<f64>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub estimator: VanishingPointParams,
    #[serde(default)]
    pub segment_detection: SegmentDetectionParams,
}

impl Default for VpDetectConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            width: None,
            height: None,
            segments: None,
            segments_path: None,
            max_working_side: default_max_working_side(),
            output_path: None,
            estimator: VanishingPointParams::default(),
            segment_detection: SegmentDetectionParams::default(),
        }
    }
}

impl VpDetectConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, VpIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), VpIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("vp_detect_report.json"))
    }

    /// Source frame size from explicit `width`/`height`, if both are set.
    pub fn explicit_bounds(&self) -> Option<ImageBounds> {
        Some(ImageBounds::new(self.width?, self.height?))
    }

    /// Working frame for a source image of the given size.
    pub fn working_frame(&self, source: ImageBounds) -> Result<WorkingFrame, VpConfigError> {
        match self.max_working_side {
            Some(max_side) => WorkingFrame::fit(source, max_side)
                .ok_or(VpConfigError::InvalidMaxSide { max_side }),
            None => Ok(WorkingFrame::identity(source)),
        }
    }

    /// Inline segments win over `segments_path`. Relative paths are resolved
    /// against `base_dir` (usually the config file's directory).
    pub fn load_segments(&self, base_dir: &Path) -> Result<Vec<LineSegment>, VpConfigError> {
        if let Some(segments) = &self.segments {
            return Ok(segments.clone());
        }
        let Some(path) = &self.segments_path else {
            return Err(VpConfigError::MissingSegments);
        };
        load_segments_json(base_dir.join(path)).map_err(VpConfigError::from)
    }
}

/// Read a JSON array of `[x1, y1, x2, y2]` segments.
pub fn load_segments_json(path: impl AsRef<Path>) -> Result<Vec<LineSegment>, VpIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Vanishing point expressed in both frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportedVanishingPoint {
    pub working: Point2<f64>,
    pub source: Point2<f64>,
    pub weight: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpDetectReport {
    #[serde(default)]
    pub image_path: Option<String>,
    pub config_path: String,
    pub frame: WorkingFrame,
    pub segment_detection: SegmentDetectionParams,
    pub estimator: VanishingPointParams,
    pub num_segments: usize,
    #[serde(default)]
    pub stats: Option<PairStats>,
    #[serde(default)]
    pub num_clusters: usize,
    #[serde(default)]
    pub vanishing_point: Option<ReportedVanishingPoint>,
    /// Extended lines in working-frame coordinates.
    #[serde(default)]
    pub extended_lines: Vec<LineSegment>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl VpDetectReport {
    /// Build a base report from the input config and frame.
    pub fn new(
        cfg: &VpDetectConfig,
        config_path: &Path,
        frame: WorkingFrame,
        num_segments: usize,
    ) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            config_path: config_path.to_string_lossy().into_owned(),
            frame,
            segment_detection: cfg.segment_detection.clone(),
            estimator: cfg.estimator.clone(),
            num_segments,
            stats: None,
            num_clusters: 0,
            vanishing_point: None,
            extended_lines: Vec::new(),
            message: None,
            error: None,
        }
    }

    /// Populate report fields from a finished estimator pass.
    pub fn set_result(&mut self, res: &VanishingPointResult) {
        self.stats = Some(res.stats);
        self.num_clusters = res.clusters.len();
        self.extended_lines = res.extended_lines.clone();
        self.vanishing_point = res.vanishing_point.map(|vp| ReportedVanishingPoint {
            working: vp.position,
            source: self.frame.to_source(vp.position),
            weight: vp.weight,
        });
        self.message = res
            .vanishing_point
            .is_none()
            .then(|| "no vanishing point found".to_string());
        self.error = None;
    }

    /// Record an estimation error.
    pub fn set_error(&mut self, err: &EstimateError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, VpIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), VpIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
