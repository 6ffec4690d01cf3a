//! Content-fit geometry.
//!
//! Works out how large an image actually appears inside its viewport and
//! how far it may pan at a given zoom before an edge comes into view.

use driftview_model::fit::{ContentFitMode, ScaleRule};
use driftview_model::geometry::{Insets, Size2D};

/// Scale applied to the natural image size by `mode`.
///
/// Returns zero when there is no image.
pub fn displayed_scale(image: Option<Size2D>, viewport: Size2D, mode: ContentFitMode) -> Size2D {
    let Some(image) = image else {
        return Size2D::ZERO;
    };

    let sx = viewport.width / image.width;
    let sy = viewport.height / image.height;
    match mode.scale_rule() {
        ScaleRule::Stretch => Size2D::new(sx, sy),
        ScaleRule::Fit => Size2D::uniform(sx.min(sy)),
        ScaleRule::Fill => Size2D::uniform(sx.max(sy)),
        ScaleRule::Unscaled => Size2D::uniform(1.0),
    }
}

/// Size of the image as drawn inside the viewport.
pub fn displayed_size(image: Option<Size2D>, viewport: Size2D, mode: ContentFitMode) -> Size2D {
    match image {
        Some(natural) => natural.scaled_by(displayed_scale(image, viewport, mode)),
        None => Size2D::ZERO,
    }
}

/// Pan room left on each edge for an image displayed at `displayed` size.
///
/// Overflow on each axis goes to the free edge(s) of that axis according to
/// the mode's anchor. Negative values are kept: they mean the image is
/// smaller than the viewport in that direction.
pub fn max_pan_insets(viewport: Size2D, displayed: Size2D, mode: ContentFitMode) -> Insets {
    let rule = mode.anchor_rule();
    let (top, bottom) = rule.vertical.distribute(displayed.height - viewport.height);
    let (left, right) = rule.horizontal.distribute(displayed.width - viewport.width);
    Insets::new(top, bottom, left, right)
}

/// Pan insets for an image zoomed uniformly by `zoom` on top of its fit.
pub fn drift_insets(
    image: Option<Size2D>,
    viewport: Size2D,
    mode: ContentFitMode,
    zoom: f64,
) -> Insets {
    let zoomed = displayed_size(image, viewport, mode).scaled(zoom);
    max_pan_insets(viewport, zoomed, mode)
}
