//! Drift traits construction.
//!
//! # Algorithm
//!
//! 1. **Zoom**: sample in hundredths with base `min_zoom` and distance
//!    `max_zoom`, so the reachable range is `[min_zoom, min_zoom + max_zoom)`.
//! 2. **Insets**: legal pan room for the fitted image at that zoom.
//! 3. **Pan bound**: per axis, the larger-magnitude inset, negated.
//! 4. **Pan**: sample each axis from zero towards its bound.
//! 5. **Speed**: sample in hundredths like zoom; duration is the largest
//!    single-axis displacement divided by the speed.
//! 6. **Repeat**: repeating drifts autoreverse forever, others run once.

use driftview_common::config::AnimationDefaults;
use driftview_common::error::{DriftError, DriftResult};
use driftview_model::fit::ContentFitMode;
use driftview_model::geometry::{Size2D, Vector2D};
use driftview_model::traits::DriftTraits;

use crate::geometry::drift_insets;
use crate::sampler::RandomRangeSampler;

/// Fixed-point factor used to keep fractional bounds on the integer sampler.
const FIXED_POINT: f64 = 100.0;

/// Caller-supplied sampling bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftRanges {
    pub min_zoom: f64,
    /// Passed to the sampler as a distance, not as an upper bound.
    pub max_zoom: f64,
    /// Points per second.
    pub min_speed: f64,
    /// Points per second, passed as a distance like `max_zoom`.
    pub max_speed: f64,
}

impl Default for DriftRanges {
    fn default() -> Self {
        Self::from(&AnimationDefaults::default())
    }
}

impl From<&AnimationDefaults> for DriftRanges {
    fn from(defaults: &AnimationDefaults) -> Self {
        Self {
            min_zoom: defaults.min_zoom,
            max_zoom: defaults.max_zoom,
            min_speed: defaults.min_speed,
            max_speed: defaults.max_speed,
        }
    }
}

impl DriftRanges {
    /// Reject bounds that cannot produce a finite, non-negative animation.
    pub fn validate(&self) -> DriftResult<()> {
        AnimationDefaults {
            repeats: false,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
        }
        .validate()
    }
}

/// Per-call switches plus the sampling bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriftOptions {
    pub repeats: bool,
    pub zoom_out: bool,
    pub ranges: DriftRanges,
}

impl DriftOptions {
    pub fn new(repeats: bool, zoom_out: bool) -> Self {
        Self {
            repeats,
            zoom_out,
            ranges: DriftRanges::default(),
        }
    }

    pub fn with_ranges(mut self, ranges: DriftRanges) -> Self {
        self.ranges = ranges;
        self
    }
}

/// What the element currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftInput {
    /// Natural size of the displayed image, if any.
    pub image: Option<Size2D>,
    pub viewport: Size2D,
    pub mode: ContentFitMode,
}

fn to_fixed(value: f64) -> i64 {
    // Truncates toward zero.
    (value * FIXED_POINT) as i64
}

/// Build one randomized drift plan.
pub fn build_traits(
    sampler: &mut RandomRangeSampler,
    input: &DriftInput,
    options: &DriftOptions,
) -> DriftResult<DriftTraits> {
    let ranges = &options.ranges;
    ranges.validate()?;
    if input.viewport.is_empty() {
        return Err(DriftError::invalid_parameter(format!(
            "viewport must have a positive size, got {}x{}",
            input.viewport.width, input.viewport.height
        )));
    }
    if let Some(image) = input.image.filter(|image| image.is_empty()) {
        return Err(DriftError::invalid_parameter(format!(
            "image must have a positive size, got {}x{}",
            image.width, image.height
        )));
    }

    let zoom_percent = sampler.sample(to_fixed(ranges.min_zoom), to_fixed(ranges.max_zoom))?;
    let zoom = zoom_percent as f64 / FIXED_POINT;

    let insets = drift_insets(input.image, input.viewport, input.mode, zoom);
    let max_x = insets.horizontal_bound() as i64;
    let max_y = insets.vertical_bound() as i64;

    let x = sampler.sample(0, max_x)?;
    let y = sampler.sample(0, max_y)?;
    let pan = Vector2D::new(x as f64, y as f64);

    let speed_percent = sampler.sample(to_fixed(ranges.min_speed), to_fixed(ranges.max_speed))?;
    if speed_percent <= 0 {
        return Err(DriftError::invalid_parameter(format!(
            "speed bounds {}..{} sample to zero points per second",
            ranges.min_speed, ranges.max_speed
        )));
    }
    let speed = speed_percent as f64 / FIXED_POINT;
    let duration = pan.max_displacement() / speed;

    let traits = DriftTraits {
        pan,
        zoom,
        duration,
        autoreverses: options.repeats,
        repeat_count: if options.repeats { f64::INFINITY } else { 1.0 },
        zoom_out: options.zoom_out,
    };

    tracing::debug!(
        ?insets,
        pan_x = traits.pan.x,
        pan_y = traits.pan.y,
        zoom = traits.zoom,
        speed,
        duration = traits.duration,
        "built drift traits"
    );
    Ok(traits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landscape_input() -> DriftInput {
        DriftInput {
            image: Some(Size2D::new(400.0, 200.0)),
            viewport: Size2D::new(100.0, 100.0),
            mode: ContentFitMode::ScaleAspectFill,
        }
    }

    #[test]
    fn test_scripted_build_is_exact() {
        // zoom draw 20 -> 1.20; fill 400x200 into 100x100 -> 200x100,
        // zoomed -> 240x120, insets (10, 10, 70, 70) -> bounds x=-70, y=-10.
        // pan draws 35, 4 -> (-35, -4); speed draw 100 -> 4.00 pts/s.
        let mut sampler = RandomRangeSampler::scripted([20, 35, 4, 100]);
        let traits = build_traits(
            &mut sampler,
            &landscape_input(),
            &DriftOptions::new(false, true),
        )
        .unwrap();

        assert_eq!(traits.zoom, 1.2);
        assert_eq!(traits.pan, Vector2D::new(-35.0, -4.0));
        assert!((traits.duration - 35.0 / 4.0).abs() < 1e-9);
        assert!(!traits.autoreverses);
        assert_eq!(traits.repeat_count, 1.0);
        assert!(traits.zoom_out);
    }

    #[test]
    fn test_repeating_traits_autoreverse_forever() {
        let mut sampler = RandomRangeSampler::seeded(9);
        let traits = build_traits(
            &mut sampler,
            &landscape_input(),
            &DriftOptions::new(true, false),
        )
        .unwrap();
        assert!(traits.autoreverses);
        assert!(traits.repeats_forever());
        assert!(!traits.zoom_out);
    }

    #[test]
    fn test_zoom_range_is_min_plus_max() {
        let ranges = DriftRanges {
            min_zoom: 0.5,
            max_zoom: 1.5,
            min_speed: 1.0,
            max_speed: 4.0,
        };
        let options = DriftOptions::new(false, false).with_ranges(ranges);
        let mut sampler = RandomRangeSampler::seeded(77);
        let mut above_max = false;
        for _ in 0..400 {
            let traits = build_traits(&mut sampler, &landscape_input(), &options).unwrap();
            assert!(traits.zoom >= 0.5 && traits.zoom < 2.0, "{}", traits.zoom);
            above_max |= traits.zoom > 1.5;
        }
        assert!(above_max, "the sampled range should reach past max_zoom");
    }

    #[test]
    fn test_image_smaller_than_viewport_pans_inwards() {
        // Unscaled 60x60 in 100x100 at zoom 1.0 -> insets -20 on every edge,
        // bounds become +20, so pans are non-negative.
        let input = DriftInput {
            image: Some(Size2D::new(60.0, 60.0)),
            viewport: Size2D::new(100.0, 100.0),
            mode: ContentFitMode::Center,
        };
        let ranges = DriftRanges {
            min_zoom: 1.0,
            max_zoom: 0.0,
            ..DriftRanges::default()
        };
        let mut sampler = RandomRangeSampler::seeded(5);
        for _ in 0..50 {
            let traits = build_traits(
                &mut sampler,
                &input,
                &DriftOptions::new(false, false).with_ranges(ranges),
            )
            .unwrap();
            assert_eq!(traits.zoom, 1.0);
            assert!((0.0..20.0).contains(&traits.pan.x));
            assert!((0.0..20.0).contains(&traits.pan.y));
        }
    }

    #[test]
    fn test_no_overflow_means_no_pan() {
        let input = DriftInput {
            image: Some(Size2D::new(50.0, 80.0)),
            viewport: Size2D::new(100.0, 100.0),
            mode: ContentFitMode::ScaleToFill,
        };
        let ranges = DriftRanges {
            min_zoom: 1.0,
            max_zoom: 0.0,
            ..DriftRanges::default()
        };
        let mut sampler = RandomRangeSampler::seeded(5);
        let traits = build_traits(
            &mut sampler,
            &input,
            &DriftOptions::new(false, false).with_ranges(ranges),
        )
        .unwrap();
        assert_eq!(traits.pan, Vector2D::ZERO);
        assert_eq!(traits.duration, 0.0);
    }

    #[test]
    fn test_zero_speed_fails_fast() {
        let ranges = DriftRanges {
            min_speed: 0.0,
            ..DriftRanges::default()
        };
        let mut sampler = RandomRangeSampler::seeded(1);
        let err = build_traits(
            &mut sampler,
            &landscape_input(),
            &DriftOptions::new(false, false).with_ranges(ranges),
        )
        .unwrap_err();
        assert!(matches!(err, DriftError::InvalidParameter { .. }));
    }

    #[test]
    fn test_speed_below_fixed_point_resolution_fails_fast() {
        let ranges = DriftRanges {
            min_speed: 0.001,
            max_speed: 0.002,
            ..DriftRanges::default()
        };
        let mut sampler = RandomRangeSampler::seeded(1);
        let err = build_traits(
            &mut sampler,
            &landscape_input(),
            &DriftOptions::new(false, false).with_ranges(ranges),
        )
        .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_non_finite_zoom_is_rejected() {
        let ranges = DriftRanges {
            max_zoom: f64::NAN,
            ..DriftRanges::default()
        };
        let mut sampler = RandomRangeSampler::seeded(1);
        assert!(build_traits(
            &mut sampler,
            &landscape_input(),
            &DriftOptions::new(false, false).with_ranges(ranges),
        )
        .is_err());
    }

    #[test]
    fn test_huge_zoom_bound_fails_without_overflow() {
        let ranges = DriftRanges {
            min_zoom: 1e17,
            max_zoom: 1.0,
            ..DriftRanges::default()
        };
        let mut sampler = RandomRangeSampler::scripted([5]);
        let err = build_traits(
            &mut sampler,
            &landscape_input(),
            &DriftOptions::new(false, false).with_ranges(ranges),
        )
        .unwrap_err();
        assert!(matches!(err, DriftError::InvalidParameter { .. }));
    }

    #[test]
    fn test_zero_sized_image_is_rejected() {
        for image in [Size2D::new(0.0, 100.0), Size2D::ZERO] {
            let input = DriftInput {
                image: Some(image),
                ..landscape_input()
            };
            let mut sampler = RandomRangeSampler::seeded(3);
            let err = build_traits(&mut sampler, &input, &DriftOptions::default()).unwrap_err();
            assert!(matches!(err, DriftError::InvalidParameter { .. }), "{err}");
        }
    }

    #[test]
    fn test_zero_sized_viewport_is_rejected() {
        let input = DriftInput {
            viewport: Size2D::new(100.0, 0.0),
            ..landscape_input()
        };
        let mut sampler = RandomRangeSampler::seeded(3);
        let err = build_traits(&mut sampler, &input, &DriftOptions::default()).unwrap_err();
        assert!(matches!(err, DriftError::InvalidParameter { .. }));
    }

    #[test]
    fn test_missing_image_still_builds() {
        let input = DriftInput {
            image: None,
            viewport: Size2D::new(100.0, 100.0),
            mode: ContentFitMode::ScaleAspectFill,
        };
        let mut sampler = RandomRangeSampler::seeded(4);
        let traits =
            build_traits(&mut sampler, &input, &DriftOptions::new(false, false)).unwrap();
        assert!(traits.duration.is_finite());
    }
}
