//! Per-channel animation descriptions submitted to a renderer.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2D;

/// One independent transform effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Additive translation.
    Position,
    /// Uniform scale.
    Zoom,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Position, Channel::Zoom];

    /// Fixed identifier under which the renderer tags this channel, so a
    /// later removal targets exactly the drift animations.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Position => "driftview.position",
            Channel::Zoom => "driftview.zoom",
        }
    }
}

/// Endpoint of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnimationValue {
    Offset(Vector2D),
    Scale(f64),
}

/// A single from/to interpolation on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationPlan {
    pub channel: Channel,
    pub from: AnimationValue,
    pub to: AnimationValue,
    /// Seconds.
    pub duration: f64,
    pub autoreverses: bool,
    pub repeat_count: f64,
    /// Values add to the element's resting transform.
    pub additive: bool,
    /// Whether the renderer drops the final frame once the run ends.
    pub removed_on_completion: bool,
}

impl AnimationPlan {
    pub fn key(&self) -> &'static str {
        self.channel.key()
    }
}
