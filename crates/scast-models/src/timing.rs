//! Slideshow timing plan.
//!
//! The plan is the single source of truth for per-image display durations.
//! The compositor, audio mixer and subtitle generator all consume it; none
//! of them recompute timing on their own.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One image's display window within the slideshow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimingSegment {
    /// Ordered position of the image
    pub image_index: usize,
    /// Display start, seconds from video start
    pub start: f64,
    /// Display end, seconds from video start
    pub end: f64,
}

impl TimingSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The computed display schedule for a slideshow.
///
/// Segments are contiguous and non-overlapping, start at 0 and sum to
/// `total_duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimingPlan {
    pub per_image_duration: f64,
    pub total_duration: f64,
    pub auto_duration_used: bool,
    pub segments: Vec<TimingSegment>,
}

impl TimingPlan {
    /// Compute the plan for `image_count` images.
    ///
    /// Auto-duration activates only when the flag is set and a strictly
    /// positive narration duration exists; the per-image duration is then
    /// `narration / image_count`. Otherwise `fixed_per_image` is
    /// authoritative.
    pub fn compute(
        image_count: usize,
        fixed_per_image: f64,
        auto_duration: bool,
        narration_duration: Option<f64>,
    ) -> Self {
        let narration = narration_duration.filter(|d| *d > 0.0);
        let (per_image, auto_used) = match narration {
            Some(d) if auto_duration => (d / image_count as f64, true),
            _ => (fixed_per_image, false),
        };

        let total = image_count as f64 * per_image;
        let segments = (0..image_count)
            .map(|i| TimingSegment {
                image_index: i,
                start: i as f64 * per_image,
                // Pin the last end to the exact total so float accumulation
                // cannot push it past the video end.
                end: if i + 1 == image_count {
                    total
                } else {
                    (i + 1) as f64 * per_image
                },
            })
            .collect();

        Self {
            per_image_duration: per_image,
            total_duration: total,
            auto_duration_used: auto_used,
            segments,
        }
    }

    pub fn image_count(&self) -> usize {
        self.segments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_segment_count_and_sum() {
        for n in 1..=7 {
            let plan = TimingPlan::compute(n, 3.0, false, None);
            assert_eq!(plan.segments.len(), n);
            let sum: f64 = plan.segments.iter().map(|s| s.duration()).sum();
            assert!((sum - plan.total_duration).abs() < EPS);
        }
    }

    #[test]
    fn test_segments_contiguous_from_zero() {
        let plan = TimingPlan::compute(5, 2.5, false, None);
        assert!((plan.segments[0].start).abs() < EPS);
        for pair in plan.segments.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < EPS);
        }
        assert!((plan.segments.last().unwrap().end - plan.total_duration).abs() < EPS);
    }

    #[test]
    fn test_auto_duration_divides_narration() {
        let plan = TimingPlan::compute(2, 3.0, true, Some(10.0));
        assert!(plan.auto_duration_used);
        assert!((plan.per_image_duration - 5.0).abs() < EPS);
        assert!((plan.total_duration - 10.0).abs() < EPS);
    }

    #[test]
    fn test_fixed_duration_when_auto_disabled() {
        let plan = TimingPlan::compute(2, 3.0, false, Some(10.0));
        assert!(!plan.auto_duration_used);
        assert!((plan.per_image_duration - 3.0).abs() < EPS);
    }

    #[test]
    fn test_fixed_duration_when_narration_missing_or_invalid() {
        let plan = TimingPlan::compute(4, 3.0, true, None);
        assert!(!plan.auto_duration_used);
        assert!((plan.per_image_duration - 3.0).abs() < EPS);

        let plan = TimingPlan::compute(4, 3.0, true, Some(0.0));
        assert!(!plan.auto_duration_used);

        let plan = TimingPlan::compute(4, 3.0, true, Some(-1.0));
        assert!(!plan.auto_duration_used);
    }

    #[test]
    fn test_three_images_fixed_three_seconds() {
        let plan = TimingPlan::compute(3, 3.0, true, None);
        assert!((plan.total_duration - 9.0).abs() < EPS);
    }
}
