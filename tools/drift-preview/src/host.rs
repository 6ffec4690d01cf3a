//! Simulated renderer that plays drift plans on a tokio timer.

use std::collections::HashMap;
use std::time::Duration;

use driftview_core::{
    AnimationPlan, Channel, ContentFitMode, DriftHost, OnFinished, ResolvedImage, Size2D,
};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

/// What the simulated renderer did, reported back to the driver loop.
#[derive(Debug)]
pub enum HostEvent {
    Submitted {
        image: Option<String>,
        plans: Vec<AnimationPlan>,
    },
    Finished,
    Removed(Channel),
}

pub struct PreviewHost {
    images: HashMap<String, Size2D>,
    viewport: Size2D,
    mode: ContentFitMode,
    /// Real seconds per simulated second.
    time_scale: f64,
    runtime: Handle,
    events: UnboundedSender<HostEvent>,
    displayed: Mutex<Option<String>>,
    /// Pending completion timers, tagged by channel key.
    in_flight: Mutex<HashMap<&'static str, AbortHandle>>,
}

impl PreviewHost {
    pub fn new(
        images: impl IntoIterator<Item = (String, Size2D)>,
        viewport: Size2D,
        mode: ContentFitMode,
        time_scale: f64,
        events: UnboundedSender<HostEvent>,
    ) -> Self {
        Self {
            images: images.into_iter().collect(),
            viewport,
            mode,
            time_scale: time_scale.max(0.0),
            runtime: Handle::current(),
            events,
            displayed: Mutex::new(None),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    fn emit(&self, event: HostEvent) {
        // The driver may already have stopped listening.
        self.events.send(event).ok();
    }
}

impl DriftHost for PreviewHost {
    type Image = String;

    fn resolve_image(&self, identifier: &str) -> Option<ResolvedImage<String>> {
        self.images
            .get(identifier)
            .map(|size| ResolvedImage::new(*size, identifier.to_string()))
    }

    fn viewport_size(&self) -> Size2D {
        self.viewport
    }

    fn fit_mode(&self) -> ContentFitMode {
        self.mode
    }

    fn set_displayed_image(&self, image: String) {
        tracing::debug!(%image, "displaying image");
        *self.displayed.lock() = Some(image);
    }

    fn submit_animations(&self, plans: Vec<AnimationPlan>, on_finished: Option<OnFinished>) {
        let forever = plans.iter().any(|plan| plan.repeat_count.is_infinite());
        let duration = plans.iter().map(|plan| plan.duration).fold(0.0, f64::max);
        let keys: Vec<&'static str> = plans.iter().map(AnimationPlan::key).collect();

        self.emit(HostEvent::Submitted {
            image: self.displayed.lock().clone(),
            plans,
        });

        // Endlessly repeating animations never report completion.
        if forever {
            return;
        }

        let delay =
            Duration::try_from_secs_f64(duration * self.time_scale).unwrap_or(Duration::ZERO);
        let events = self.events.clone();
        // Held across the spawn so a group submitted from this timer's own
        // completion registers after this one.
        let mut in_flight = self.in_flight.lock();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(done) = on_finished {
                done();
            }
            events.send(HostEvent::Finished).ok();
        });

        // One timer drives the whole group; every key in it can cancel it.
        for key in keys {
            in_flight.insert(key, task.abort_handle());
        }
    }

    fn remove_animation(&self, channel: Channel) {
        if let Some(timer) = self.in_flight.lock().remove(channel.key()) {
            timer.abort();
        }
        self.emit(HostEvent::Removed(channel));
    }
}
