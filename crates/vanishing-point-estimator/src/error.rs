/// Errors returned before the pairwise voting loop starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("at least 2 line segments are required (got {got})")]
    TooFewSegments { got: usize },
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidBounds { width: f64, height: f64 },
    #[error("segment {index} has non-finite coordinates")]
    NonFiniteSegment { index: usize },
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
