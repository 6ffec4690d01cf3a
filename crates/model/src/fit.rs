//! Content-fit modes and their scale and anchor rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an image's natural size maps onto its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentFitMode {
    /// Stretch each axis independently to the viewport.
    ScaleToFill,
    /// Uniform scale so the whole image fits (letterbox).
    ScaleAspectFit,
    /// Uniform scale so the image covers the viewport (crop).
    #[default]
    ScaleAspectFill,
    /// Unscaled, redrawn on bounds change; overflow split like `Center`.
    Redraw,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// How natural size becomes displayed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleRule {
    /// Independent per-axis scale.
    Stretch,
    /// `min(sx, sy)` on both axes.
    Fit,
    /// `max(sx, sy)` on both axes.
    Fill,
    /// Scale of one.
    Unscaled,
}

/// Which edge of one axis the image is pinned to.
///
/// Overflow goes to the inset on the opposite, free edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisAnchor {
    /// Overflow is split evenly between both edges.
    Centered,
    /// Pinned to the top (vertical) or left (horizontal) edge.
    Start,
    /// Pinned to the bottom (vertical) or right (horizontal) edge.
    End,
}

/// Per-axis anchoring of a fit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorRule {
    pub vertical: AxisAnchor,
    pub horizontal: AxisAnchor,
}

impl AxisAnchor {
    /// Distribute `overflow` between the `(start, end)` insets of one axis.
    pub fn distribute(self, overflow: f64) -> (f64, f64) {
        match self {
            AxisAnchor::Centered => (overflow / 2.0, overflow / 2.0),
            AxisAnchor::Start => (0.0, overflow),
            AxisAnchor::End => (overflow, 0.0),
        }
    }
}

impl ContentFitMode {
    pub const ALL: [ContentFitMode; 13] = [
        ContentFitMode::ScaleToFill,
        ContentFitMode::ScaleAspectFit,
        ContentFitMode::ScaleAspectFill,
        ContentFitMode::Redraw,
        ContentFitMode::Center,
        ContentFitMode::Top,
        ContentFitMode::Bottom,
        ContentFitMode::Left,
        ContentFitMode::Right,
        ContentFitMode::TopLeft,
        ContentFitMode::TopRight,
        ContentFitMode::BottomLeft,
        ContentFitMode::BottomRight,
    ];

    pub fn scale_rule(self) -> ScaleRule {
        match self {
            ContentFitMode::ScaleToFill => ScaleRule::Stretch,
            ContentFitMode::ScaleAspectFit => ScaleRule::Fit,
            ContentFitMode::ScaleAspectFill => ScaleRule::Fill,
            _ => ScaleRule::Unscaled,
        }
    }

    /// Anchor table: one row per mode, one column per axis.
    pub fn anchor_rule(self) -> AnchorRule {
        use AxisAnchor::{Centered, End, Start};

        let (vertical, horizontal) = match self {
            ContentFitMode::ScaleToFill
            | ContentFitMode::ScaleAspectFit
            | ContentFitMode::ScaleAspectFill
            | ContentFitMode::Redraw
            | ContentFitMode::Center => (Centered, Centered),
            ContentFitMode::Top => (Start, Centered),
            ContentFitMode::Bottom => (End, Centered),
            ContentFitMode::Left => (Centered, Start),
            ContentFitMode::Right => (Centered, End),
            ContentFitMode::TopLeft => (Start, Start),
            ContentFitMode::TopRight => (Start, End),
            ContentFitMode::BottomLeft => (End, Start),
            ContentFitMode::BottomRight => (End, End),
        };
        AnchorRule {
            vertical,
            horizontal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentFitMode::ScaleToFill => "scale-to-fill",
            ContentFitMode::ScaleAspectFit => "scale-aspect-fit",
            ContentFitMode::ScaleAspectFill => "scale-aspect-fill",
            ContentFitMode::Redraw => "redraw",
            ContentFitMode::Center => "center",
            ContentFitMode::Top => "top",
            ContentFitMode::Bottom => "bottom",
            ContentFitMode::Left => "left",
            ContentFitMode::Right => "right",
            ContentFitMode::TopLeft => "top-left",
            ContentFitMode::TopRight => "top-right",
            ContentFitMode::BottomLeft => "bottom-left",
            ContentFitMode::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ContentFitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown fit mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content fit mode '{0}'")]
pub struct ParseFitModeError(pub String);

impl FromStr for ContentFitMode {
    type Err = ParseFitModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ContentFitMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .or(match normalized.as_str() {
                "stretch" | "fill" => Some(ContentFitMode::ScaleToFill),
                "fit" | "aspect-fit" => Some(ContentFitMode::ScaleAspectFit),
                "crop" | "aspect-fill" => Some(ContentFitMode::ScaleAspectFill),
                _ => None,
            })
            .ok_or_else(|| ParseFitModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rules() {
        assert_eq!(ContentFitMode::ScaleToFill.scale_rule(), ScaleRule::Stretch);
        assert_eq!(ContentFitMode::ScaleAspectFit.scale_rule(), ScaleRule::Fit);
        assert_eq!(ContentFitMode::ScaleAspectFill.scale_rule(), ScaleRule::Fill);
        for mode in [
            ContentFitMode::Redraw,
            ContentFitMode::Center,
            ContentFitMode::TopLeft,
            ContentFitMode::BottomRight,
        ] {
            assert_eq!(mode.scale_rule(), ScaleRule::Unscaled);
        }
    }

    #[test]
    fn test_corner_anchors_combine_axes() {
        let rule = ContentFitMode::BottomLeft.anchor_rule();
        assert_eq!(rule.vertical, AxisAnchor::End);
        assert_eq!(rule.horizontal, AxisAnchor::Start);

        let rule = ContentFitMode::TopRight.anchor_rule();
        assert_eq!(rule.vertical, AxisAnchor::Start);
        assert_eq!(rule.horizontal, AxisAnchor::End);
    }

    #[test]
    fn test_edge_anchors_center_other_axis() {
        assert_eq!(
            ContentFitMode::Left.anchor_rule().vertical,
            AxisAnchor::Centered
        );
        assert_eq!(
            ContentFitMode::Top.anchor_rule().horizontal,
            AxisAnchor::Centered
        );
    }

    #[test]
    fn test_distribute() {
        assert_eq!(AxisAnchor::Centered.distribute(40.0), (20.0, 20.0));
        assert_eq!(AxisAnchor::Start.distribute(40.0), (0.0, 40.0));
        assert_eq!(AxisAnchor::End.distribute(-40.0), (-40.0, 0.0));
    }

    #[test]
    fn test_parse_names_and_aliases() {
        for mode in ContentFitMode::ALL {
            assert_eq!(mode.as_str().parse::<ContentFitMode>().unwrap(), mode);
        }
        assert_eq!(
            "Top_Left".parse::<ContentFitMode>().unwrap(),
            ContentFitMode::TopLeft
        );
        assert_eq!(
            "fit".parse::<ContentFitMode>().unwrap(),
            ContentFitMode::ScaleAspectFit
        );
        assert!("sideways".parse::<ContentFitMode>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ContentFitMode::BottomRight).unwrap();
        assert_eq!(json, "\"bottom-right\"");
        let mode: ContentFitMode = serde_json::from_str("\"scale-aspect-fit\"").unwrap();
        assert_eq!(mode, ContentFitMode::ScaleAspectFit);
    }
}
