use crate::{core, estimator};
use ::image::imageops::{self, FilterType};
use ::image::ImageReader;
use log::debug;
use nalgebra::Point2;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error("invalid max side {max_side}: expected a finite value >= 1")]
    InvalidMaxSide { max_side: f64 },

    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Estimate(#[from] estimator::EstimateError),
}

/// Estimator output together with the frame it was computed in.
#[derive(Clone, Debug)]
pub struct FramedEstimate {
    pub result: estimator::VanishingPointResult,
    pub frame: core::WorkingFrame,
}

impl FramedEstimate {
    /// Vanishing point mapped back to source-image pixels.
    pub fn source_vanishing_point(&self) -> Option<Point2<f64>> {
        self.result
            .vanishing_point
            .map(|vp| self.frame.to_source(vp.position))
    }
}

/// Convert an `image::GrayImage` into the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Source frame size read from the image header, without decoding pixels.
pub fn source_bounds_from_image(path: impl AsRef<Path>) -> Result<core::ImageBounds, DetectError> {
    let (w, h) = ::image::image_dimensions(path)?;
    Ok(core::ImageBounds::from_size(w, h))
}

/// Downscale a grayscale image to its working frame.
///
/// `max_side = None` keeps the source resolution.
pub fn to_working_image(
    img: &::image::GrayImage,
    max_side: Option<f64>,
) -> Result<(::image::GrayImage, core::WorkingFrame), DetectError> {
    let source = core::ImageBounds::from_size(img.width(), img.height());
    let frame = match max_side {
        Some(m) => core::WorkingFrame::fit(source, m)
            .ok_or(DetectError::InvalidMaxSide { max_side: m })?,
        None => core::WorkingFrame::identity(source),
    };
    if frame.scale >= 1.0 {
        return Ok((img.clone(), frame));
    }
    let w = frame.working.width as u32;
    let h = frame.working.height as u32;
    debug!(
        "downscaling {}x{} -> {}x{} (scale {:.4})",
        img.width(),
        img.height(),
        w,
        h,
        frame.scale
    );
    Ok((imageops::resize(img, w, h, FilterType::Triangle), frame))
}

/// Decode an image file to grayscale and downscale it to the working frame.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
pub fn load_working_image(
    path: impl AsRef<Path>,
    max_side: Option<f64>,
) -> Result<(::image::GrayImage, core::WorkingFrame), DetectError> {
    let img = ImageReader::open(path)?.decode()?.to_luma8();
    to_working_image(&img, max_side)
}

/// Run segment detection and voting on an image that is already the
/// working image.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, detector, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_vanishing_point<D: core::SegmentDetector>(
    img: &::image::GrayImage,
    detector: &D,
    params: estimator::VanishingPointParams,
) -> Result<estimator::VanishingPointResult, DetectError> {
    let view = gray_view(img);
    let segments = detector.detect(&view);
    debug!("segment detector returned {} segments", segments.len());
    let est = estimator::VanishingPointEstimator::new(params);
    Ok(est.estimate(&segments, view.bounds())?)
}

/// End-to-end: decode, downscale, detect segments and vote.
pub fn detect_vanishing_point_in_file<D: core::SegmentDetector>(
    path: impl AsRef<Path>,
    detector: &D,
    params: estimator::VanishingPointParams,
    max_side: Option<f64>,
) -> Result<FramedEstimate, DetectError> {
    let (img, frame) = load_working_image(path, max_side)?;
    let result = detect_vanishing_point(&img, detector, params)?;
    Ok(FramedEstimate { result, frame })
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    if expected == 0 {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    }
    if pixels.len() != expected {
        return Err(DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidGrayDimensions { width, height })
}

/// Same as [`detect_vanishing_point_in_file`] for a raw source-resolution
/// grayscale buffer.
pub fn detect_vanishing_point_from_gray_u8<D: core::SegmentDetector>(
    width: u32,
    height: u32,
    pixels: &[u8],
    detector: &D,
    params: estimator::VanishingPointParams,
    max_side: Option<f64>,
) -> Result<FramedEstimate, DetectError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    let (working, frame) = to_working_image(&img, max_side)?;
    let result = detect_vanishing_point(&working, detector, params)?;
    Ok(FramedEstimate { result, frame })
}
