//! Capabilities the surrounding application provides.
//!
//! The engine decides what to animate; a [`DriftHost`] owns the element,
//! loads images, and actually runs the animations.

use driftview_model::fit::ContentFitMode;
use driftview_model::geometry::Size2D;
use driftview_model::plan::{AnimationPlan, Channel};
use driftview_model::traits::DriftTraits;

/// Caller callback for a drift cycle, given the traits the cycle ran with.
pub type Completion = Box<dyn FnOnce(DriftTraits) + Send>;

/// Invoked by the host once when a submitted group of plans finishes.
pub type OnFinished = Box<dyn FnOnce() + Send>;

/// An image the host could load.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage<I> {
    /// Natural pixel dimensions.
    pub natural_size: Size2D,
    /// Host handle passed back through `set_displayed_image`.
    pub handle: I,
}

impl<I> ResolvedImage<I> {
    pub fn new(natural_size: Size2D, handle: I) -> Self {
        Self {
            natural_size,
            handle,
        }
    }
}

/// Rendering and resource capabilities for one animated element.
///
/// Completions may be delivered on any thread, synchronously from inside
/// `submit_animations` or later.
pub trait DriftHost: Send + Sync + 'static {
    /// Opaque image handle.
    type Image: Clone + Send;

    /// Look up an image by identifier; `None` when it cannot be loaded.
    fn resolve_image(&self, identifier: &str) -> Option<ResolvedImage<Self::Image>>;

    /// Current bounds of the element.
    fn viewport_size(&self) -> Size2D;

    /// Current content-fit mode of the element.
    fn fit_mode(&self) -> ContentFitMode;

    /// Replace the element's displayed content.
    fn set_displayed_image(&self, image: Self::Image);

    /// Run `plans` together as one transaction. Each plan is tagged with
    /// its channel key so [`DriftHost::remove_animation`] can target it.
    fn submit_animations(&self, plans: Vec<AnimationPlan>, on_finished: Option<OnFinished>);

    /// Remove the in-flight animation tagged with `channel`'s key, if any.
    fn remove_animation(&self, channel: Channel);
}
