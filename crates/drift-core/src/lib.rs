//! driftview core: the drift engine
//!
//! Decides what slow pan-and-zoom ("Ken Burns") animation an image should
//! run inside a fixed viewport, and chains those animations across a list
//! of images:
//! - **Sampler:** bounded signed integer draws from an injectable source
//! - **Geometry:** displayed scale/size per fit mode and legal pan insets
//! - **Builder:** one randomized [`DriftTraits`] per cycle
//! - **Plans:** per-channel from/to descriptions for the renderer
//! - **Sequencer:** per-element chaining with token-based cancellation
//!
//! Rendering is the host's job, reached through [`DriftHost`]. Everything
//! except the sequencer is pure computation.

pub mod builder;
pub mod geometry;
pub mod host;
pub mod plan;
pub mod sampler;
pub mod sequencer;

pub use builder::{build_traits, DriftInput, DriftOptions, DriftRanges};
pub use driftview_model::{
    AnimationPlan, AnimationValue, Channel, ContentFitMode, DriftTraits, Insets, Size2D, Vector2D,
};
pub use host::{Completion, DriftHost, OnFinished, ResolvedImage};
pub use sampler::{RandomRangeSampler, RandomSource, ScriptedSource};
pub use sequencer::{DriftView, SequenceToken};
