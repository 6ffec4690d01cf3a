//! Per-element drift sequencing.
//!
//! A [`DriftView`] drives one animated element. Every activation (a direct
//! `begin` or each step of a `perform` chain) mints a fresh
//! [`SequenceToken`]. A chain step only schedules the next image if the
//! token it was started with is still current, so any newer `begin`,
//! `perform`, or `stop` silently ends older chains.
//!
//! No lock is held while calling into the host, so completions may arrive
//! synchronously, later on the same thread, or from another thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use driftview_common::config::DriftConfig;
use driftview_common::error::DriftResult;
use driftview_model::geometry::Size2D;
use driftview_model::plan::Channel;
use driftview_model::traits::DriftTraits;
use parking_lot::Mutex;

use crate::builder::{build_traits, DriftInput, DriftOptions, DriftRanges};
use crate::host::{Completion, DriftHost, OnFinished, ResolvedImage};
use crate::plan::plans_for;
use crate::sampler::RandomRangeSampler;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier of one activation. Compared by equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceToken(u64);

impl SequenceToken {
    fn mint() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Default)]
struct SequenceState {
    token: Option<SequenceToken>,
    /// Natural size of the displayed image.
    image_size: Option<Size2D>,
}

struct ViewInner<H: DriftHost> {
    host: H,
    state: Mutex<SequenceState>,
    sampler: Mutex<RandomRangeSampler>,
    ranges: DriftRanges,
}

/// Controller for one animated element.
///
/// Cheap to clone; clones share the same element state.
pub struct DriftView<H: DriftHost> {
    inner: Arc<ViewInner<H>>,
}

impl<H: DriftHost> Clone for DriftView<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: DriftHost> std::fmt::Debug for DriftView<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("DriftView")
            .field("token", &state.token)
            .field("image_size", &state.image_size)
            .field("ranges", &self.inner.ranges)
            .finish_non_exhaustive()
    }
}

impl<H: DriftHost> DriftView<H> {
    /// View with default ranges and an entropy-seeded sampler.
    pub fn new(host: H) -> Self {
        Self::with_sampler(host, RandomRangeSampler::from_entropy(), DriftRanges::default())
    }

    /// View whose ranges come from configuration.
    pub fn with_config(host: H, config: &DriftConfig) -> Self {
        Self::with_sampler(
            host,
            RandomRangeSampler::from_entropy(),
            DriftRanges::from(&config.animation),
        )
    }

    /// View with an explicit sampler, e.g. a seeded one for reproducible runs.
    pub fn with_sampler(host: H, sampler: RandomRangeSampler, ranges: DriftRanges) -> Self {
        Self {
            inner: Arc::new(ViewInner {
                host,
                state: Mutex::new(SequenceState::default()),
                sampler: Mutex::new(sampler),
                ranges,
            }),
        }
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    pub fn ranges(&self) -> DriftRanges {
        self.inner.ranges
    }

    /// Token of the current activation, `None` when idle.
    pub fn current_token(&self) -> Option<SequenceToken> {
        self.inner.state.lock().token
    }

    pub fn is_animating(&self) -> bool {
        self.current_token().is_some()
    }

    /// Natural size of the image currently displayed.
    pub fn image_size(&self) -> Option<Size2D> {
        self.inner.state.lock().image_size
    }

    /// Display `image` without starting an animation.
    pub fn set_image(&self, image: ResolvedImage<H::Image>) {
        self.inner.state.lock().image_size = Some(image.natural_size);
        self.inner.host.set_displayed_image(image.handle);
    }

    /// Drift through `identifiers` one image at a time, starting at
    /// `start_index` (out of range starts over at zero).
    ///
    /// Each image runs a single non-repeating cycle. An empty list or an
    /// image that cannot be resolved leaves the element untouched.
    pub fn perform<S: AsRef<str>>(&self, identifiers: &[S], start_index: usize) {
        let identifiers: Arc<[String]> = identifiers
            .iter()
            .map(|id| id.as_ref().to_string())
            .collect();
        self.perform_step(identifiers, start_index, None);
    }

    /// Start one drift cycle on the current image and return its duration.
    ///
    /// `zoom_out: None` picks a direction at random. Any running chain is
    /// superseded. On invalid ranges nothing starts and the error is returned.
    pub fn begin(
        &self,
        repeats: bool,
        zoom_out: Option<bool>,
        completion: Option<Completion>,
    ) -> DriftResult<f64> {
        let traits = self.build(repeats, zoom_out).map_err(|e| {
            tracing::error!(error = %e, "cannot start drift animation");
            e
        })?;
        self.claim_token(None);
        self.submit(traits, completion);
        Ok(traits.duration)
    }

    /// End the current activation and remove both drift channels from the
    /// element. Safe to call when idle.
    pub fn stop(&self) {
        let previous = self.inner.state.lock().token.take();
        for channel in Channel::ALL {
            self.inner.host.remove_animation(channel);
        }
        tracing::debug!(?previous, "drift animations removed");
    }

    fn perform_step(
        &self,
        identifiers: Arc<[String]>,
        start_index: usize,
        expected: Option<SequenceToken>,
    ) {
        if identifiers.is_empty() {
            return;
        }
        let index = if start_index < identifiers.len() {
            start_index
        } else {
            0
        };

        let identifier = &identifiers[index];
        let Some(image) = self.inner.host.resolve_image(identifier) else {
            tracing::warn!(%identifier, index, "drift image not found, sequence stops");
            if let Some(token) = expected {
                self.release_token(token);
            }
            return;
        };

        self.set_image(image);
        let traits = match self.build(false, None) {
            Ok(traits) => traits,
            Err(e) => {
                tracing::error!(error = %e, %identifier, "cannot build drift for image");
                if let Some(token) = expected {
                    self.release_token(token);
                }
                return;
            }
        };

        let Some(token) = self.claim_token(expected) else {
            tracing::debug!(%identifier, "sequence superseded before step started");
            return;
        };

        tracing::info!(
            %identifier,
            index,
            duration = traits.duration,
            zoom = traits.zoom,
            "drift step started"
        );

        let weak: Weak<ViewInner<H>> = Arc::downgrade(&self.inner);
        let next_index = index + 1;
        let advance: Completion = Box::new(move |_traits| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let view = DriftView { inner };
            if view.current_token() == Some(token) {
                view.perform_step(identifiers, next_index, Some(token));
            } else {
                tracing::debug!(?token, "stale drift chain ended");
            }
        });
        self.submit(traits, Some(advance));
    }

    /// Mint a new current token. With `expected` set, only replaces that
    /// exact token and returns `None` if it is no longer current.
    fn claim_token(&self, expected: Option<SequenceToken>) -> Option<SequenceToken> {
        let mut state = self.inner.state.lock();
        if expected.is_some() && state.token != expected {
            return None;
        }
        let token = SequenceToken::mint();
        state.token = Some(token);
        Some(token)
    }

    /// Go idle if `token` is still the current activation.
    fn release_token(&self, token: SequenceToken) {
        let mut state = self.inner.state.lock();
        if state.token == Some(token) {
            state.token = None;
        }
    }

    fn build(&self, repeats: bool, zoom_out: Option<bool>) -> DriftResult<DriftTraits> {
        let input = DriftInput {
            image: self.image_size(),
            viewport: self.inner.host.viewport_size(),
            mode: self.inner.host.fit_mode(),
        };

        let mut sampler = self.inner.sampler.lock();
        let zoom_out = zoom_out.unwrap_or_else(|| sampler.coin_flip());
        let options = DriftOptions::new(repeats, zoom_out).with_ranges(self.inner.ranges);
        build_traits(&mut sampler, &input, &options)
    }

    fn submit(&self, traits: DriftTraits, completion: Option<Completion>) {
        let on_finished = completion.map(|completion| -> OnFinished {
            Box::new(move || completion(traits))
        });
        self.inner
            .host
            .submit_animations(plans_for(&traits), on_finished);
    }
}
