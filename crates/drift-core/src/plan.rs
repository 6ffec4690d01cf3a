//! Turn drift traits into per-channel animation plans.

use driftview_model::geometry::Vector2D;
use driftview_model::plan::{AnimationPlan, AnimationValue, Channel};
use driftview_model::traits::DriftTraits;

fn directed(
    traits: &DriftTraits,
    identity: AnimationValue,
    target: AnimationValue,
) -> (AnimationValue, AnimationValue) {
    if traits.zoom_out {
        (target, identity)
    } else {
        (identity, target)
    }
}

/// Additive pan between the resting position and `traits.pan`.
pub fn position_plan(traits: &DriftTraits) -> AnimationPlan {
    let (from, to) = directed(
        traits,
        AnimationValue::Offset(Vector2D::ZERO),
        AnimationValue::Offset(traits.pan),
    );
    AnimationPlan {
        channel: Channel::Position,
        from,
        to,
        duration: traits.duration,
        autoreverses: traits.autoreverses,
        repeat_count: traits.repeat_count,
        additive: true,
        removed_on_completion: false,
    }
}

/// Scale between `1.0` and `traits.zoom`.
pub fn zoom_plan(traits: &DriftTraits) -> AnimationPlan {
    let (from, to) = directed(
        traits,
        AnimationValue::Scale(1.0),
        AnimationValue::Scale(traits.zoom),
    );
    AnimationPlan {
        channel: Channel::Zoom,
        from,
        to,
        duration: traits.duration,
        autoreverses: traits.autoreverses,
        repeat_count: traits.repeat_count,
        additive: false,
        removed_on_completion: false,
    }
}

/// Plans to submit together; the zoom channel is skipped when it would be
/// a no-op.
pub fn plans_for(traits: &DriftTraits) -> Vec<AnimationPlan> {
    let mut plans = vec![position_plan(traits)];
    if traits.has_zoom() {
        plans.push(zoom_plan(traits));
    }
    plans
}
