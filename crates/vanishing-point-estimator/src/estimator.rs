use log::{debug, info};
use std::time::Instant;
use vanishing_point_core::{
    extend_to_bounds, fold_angle, intersect_lines, is_near_horizontal, pair_score, ImageBounds,
    LineSegment, WorkingFrame,
};

use crate::{
    ClusterAccumulator, EstimateError, PairStats, VanishingPoint, VanishingPointParams,
    VanishingPointResult,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Pairwise-intersection voting estimator for a single dominant vanishing
/// point.
#[derive(Clone, Debug, Default)]
pub struct VanishingPointEstimator {
    params: VanishingPointParams,
}

impl VanishingPointEstimator {
    pub fn new(params: VanishingPointParams) -> Self {
        Self { params }
    }

    /// Run the full pass on segments given in working-image coordinates.
    ///
    /// Fails fast on fewer than two segments, non-finite coordinates or a
    /// degenerate image rectangle. An input that validates but never votes
    /// yields `Ok` with `vanishing_point == None`.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, segments),
            fields(num_segments = segments.len(), width = bounds.width, height = bounds.height)
        )
    )]
    pub fn estimate(
        &self,
        segments: &[LineSegment],
        bounds: ImageBounds,
    ) -> Result<VanishingPointResult, EstimateError> {
        validate_input(&self.params, segments, bounds)?;
        let t0 = Instant::now();

        let extended_lines = self.extend_lines(segments, bounds);
        let (acc, stats) = self.accumulate(segments, bounds);

        let vanishing_point = acc.best().map(VanishingPoint::from);
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "pairs={} near_horizontal={} parallel={} out_of_window={} accepted={} clusters={} elapsed_ms={:.3}",
            stats.pairs_considered,
            stats.skipped_near_horizontal,
            stats.skipped_parallel,
            stats.skipped_out_of_window,
            stats.accepted,
            acc.len(),
            elapsed_ms
        );
        match &vanishing_point {
            Some(vp) => info!(
                "vanishing point at ({:.2}, {:.2}) weight={}",
                vp.position.x, vp.position.y, vp.weight
            ),
            None => info!("no vanishing point found"),
        }

        Ok(VanishingPointResult {
            vanishing_point,
            extended_lines,
            clusters: acc.into_clusters(),
            stats,
            bounds,
        })
    }

    /// Run on segments given in source-image coordinates.
    ///
    /// Segments are scaled into the working frame first, so the cluster
    /// radius and the plausibility window apply in working pixels. The
    /// result stays in working coordinates; use [`WorkingFrame::to_source`]
    /// to map it back.
    pub fn estimate_in_frame(
        &self,
        source_segments: &[LineSegment],
        frame: &WorkingFrame,
    ) -> Result<VanishingPointResult, EstimateError> {
        let working: Vec<LineSegment> = source_segments
            .iter()
            .map(|s| frame.segment_to_working(s))
            .collect();
        self.estimate(&working, frame.working)
    }

    /// Extend every segment to the border of `bounds`, keeping input order.
    pub fn extend_lines(&self, segments: &[LineSegment], bounds: ImageBounds) -> Vec<LineSegment> {
        segments
            .iter()
            .map(|s| extend_to_bounds(s, bounds, self.params.vertical_eps))
            .collect()
    }

    /// Vote every unordered pair `i < j` into a fresh accumulator.
    ///
    /// Does not validate its input; [`estimate`](Self::estimate) does.
    pub fn accumulate(
        &self,
        segments: &[LineSegment],
        bounds: ImageBounds,
    ) -> (ClusterAccumulator, PairStats) {
        let min_angle = self.params.min_fold_angle();
        let folds: Vec<f64> = segments.iter().map(fold_angle).collect();

        let mut acc = ClusterAccumulator::new(self.params.cluster_radius_px);
        let mut stats = PairStats::default();

        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                stats.pairs_considered += 1;

                let (a1, a2) = (folds[i], folds[j]);
                if is_near_horizontal(a1, min_angle) || is_near_horizontal(a2, min_angle) {
                    stats.skipped_near_horizontal += 1;
                    continue;
                }

                let Some(p) = intersect_lines(&segments[i], &segments[j], self.params.parallel_eps)
                else {
                    stats.skipped_parallel += 1;
                    continue;
                };

                if !bounds.contains_with_margin(&p, self.params.plausibility_margin) {
                    stats.skipped_out_of_window += 1;
                    continue;
                }

                acc.add(p, pair_score(a1, a2));
                stats.accepted += 1;
            }
        }

        (acc, stats)
    }
}

fn validate_input(
    params: &VanishingPointParams,
    segments: &[LineSegment],
    bounds: ImageBounds,
) -> Result<(), EstimateError> {
    params.validate()?;
    if !bounds.is_valid() {
        return Err(EstimateError::InvalidBounds {
            width: bounds.width,
            height: bounds.height,
        });
    }
    if segments.len() < 2 {
        return Err(EstimateError::TooFewSegments {
            got: segments.len(),
        });
    }
    if let Some(index) = segments.iter().position(|s| !s.is_finite()) {
        return Err(EstimateError::NonFiniteSegment { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn estimator() -> VanishingPointEstimator {
        VanishingPointEstimator::new(VanishingPointParams::default())
    }

    #[test]
    fn pair_counts_add_up() {
        let segs = vec![
            LineSegment::new(0.0, 0.0, 100.0, 100.0),
            LineSegment::new(0.0, 100.0, 100.0, 0.0),
            LineSegment::new(0.0, 50.0, 100.0, 52.0), // near-horizontal
            LineSegment::new(40.0, 0.0, 140.0, 100.0), // parallel to the first
        ];
        let (acc, stats) = estimator().accumulate(&segs, ImageBounds::new(200.0, 200.0));
        assert_eq!(stats.pairs_considered, 6);
        assert_eq!(stats.skipped_near_horizontal, 3);
        assert_eq!(stats.skipped_parallel, 1);
        assert_eq!(stats.accepted, 2);
        assert_eq!(
            stats.skipped_near_horizontal
                + stats.skipped_parallel
                + stats.skipped_out_of_window
                + stats.accepted,
            stats.pairs_considered
        );
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn far_intersections_are_discarded() {
        // Nearly parallel steep lines meet far below the frame.
        let segs = vec![
            LineSegment::new(100.0, 0.0, 101.0, 100.0),
            LineSegment::new(110.0, 0.0, 110.0, 100.0),
        ];
        let (acc, stats) = estimator().accumulate(&segs, ImageBounds::new(200.0, 200.0));
        assert_eq!(stats.skipped_out_of_window, 1);
        assert!(acc.is_empty());
    }

    #[test]
    fn wider_margin_admits_far_intersections() {
        let segs = vec![
            LineSegment::new(100.0, 0.0, 101.0, 100.0),
            LineSegment::new(110.0, 0.0, 110.0, 100.0),
        ];
        let params = VanishingPointParams {
            plausibility_margin: 10.0,
            ..Default::default()
        };
        let (acc, stats) =
            VanishingPointEstimator::new(params).accumulate(&segs, ImageBounds::new(200.0, 200.0));
        assert_eq!(stats.accepted, 1);
        assert_eq!(acc.clusters()[0].representative, Point2::new(110.0, 1000.0));
    }

    #[test]
    fn rejects_invalid_input_before_voting() {
        let est = estimator();
        let one = [LineSegment::new(0.0, 0.0, 1.0, 1.0)];
        assert_eq!(
            est.estimate(&one, ImageBounds::new(10.0, 10.0)).unwrap_err(),
            EstimateError::TooFewSegments { got: 1 }
        );
        assert_eq!(
            est.estimate(&[], ImageBounds::new(10.0, 10.0)).unwrap_err(),
            EstimateError::TooFewSegments { got: 0 }
        );

        let two = [
            LineSegment::new(0.0, 0.0, 1.0, 1.0),
            LineSegment::new(0.0, 1.0, 1.0, 0.0),
        ];
        assert!(matches!(
            est.estimate(&two, ImageBounds::new(0.0, 10.0)),
            Err(EstimateError::InvalidBounds { .. })
        ));

        let bad = [
            LineSegment::new(0.0, 0.0, 1.0, 1.0),
            LineSegment::new(0.0, f64::NAN, 1.0, 0.0),
        ];
        assert_eq!(
            est.estimate(&bad, ImageBounds::new(10.0, 10.0)).unwrap_err(),
            EstimateError::NonFiniteSegment { index: 1 }
        );
    }

    #[test]
    fn rejects_negative_cluster_radius() {
        let est = VanishingPointEstimator::new(VanishingPointParams {
            cluster_radius_px: -3.0,
            ..Default::default()
        });
        let segs = [
            LineSegment::new(0.0, 0.0, 100.0, 100.0),
            LineSegment::new(0.0, 100.0, 100.0, 0.0),
        ];
        assert_eq!(
            est.estimate(&segs, ImageBounds::new(200.0, 200.0)).unwrap_err(),
            EstimateError::InvalidParameter {
                name: "cluster_radius_px",
                value: -3.0
            }
        );
    }
}
