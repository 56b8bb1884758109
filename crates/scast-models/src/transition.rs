//! Slideshow transition identifiers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cross-fade window between adjacent images, in seconds.
pub const TRANSITION_WINDOW_SECS: f64 = 0.5;

/// Available transitions between slideshow images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Hard cut between images
    None,
    /// Cross-fade
    #[default]
    Fade,
    /// Slide in from the right
    SlideLeft,
    /// Slide in from the left
    SlideRight,
    /// Zoom into the next image
    Zoom,
    /// Pixel dissolve
    Dissolve,
}

impl TransitionKind {
    /// All available transitions.
    pub const ALL: &'static [TransitionKind] = &[
        TransitionKind::None,
        TransitionKind::Fade,
        TransitionKind::SlideLeft,
        TransitionKind::SlideRight,
        TransitionKind::Zoom,
        TransitionKind::Dissolve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::None => "none",
            TransitionKind::Fade => "fade",
            TransitionKind::SlideLeft => "slide_left",
            TransitionKind::SlideRight => "slide_right",
            TransitionKind::Zoom => "zoom",
            TransitionKind::Dissolve => "dissolve",
        }
    }

    /// Whether this transition renders as a hard cut (concat path).
    pub fn is_cut(&self) -> bool {
        matches!(self, TransitionKind::None)
    }

    /// The `xfade` transition name, or `None` for the cut path.
    pub fn xfade_name(&self) -> Option<&'static str> {
        match self {
            TransitionKind::None => None,
            TransitionKind::Fade => Some("fade"),
            TransitionKind::SlideLeft => Some("slideleft"),
            TransitionKind::SlideRight => Some("slideright"),
            TransitionKind::Zoom => Some("zoomin"),
            TransitionKind::Dissolve => Some("dissolve"),
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransitionKind {
    type Err = TransitionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TransitionKind::None),
            "fade" => Ok(TransitionKind::Fade),
            "slide_left" => Ok(TransitionKind::SlideLeft),
            "slide_right" => Ok(TransitionKind::SlideRight),
            "zoom" => Ok(TransitionKind::Zoom),
            "dissolve" => Ok(TransitionKind::Dissolve),
            _ => Err(TransitionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown transition: {0}")]
pub struct TransitionParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_has_no_xfade_name() {
        assert!(TransitionKind::None.is_cut());
        assert!(TransitionKind::None.xfade_name().is_none());
    }

    #[test]
    fn test_xfade_names() {
        for kind in TransitionKind::ALL {
            if !kind.is_cut() {
                assert!(kind.xfade_name().is_some());
            }
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for kind in TransitionKind::ALL {
            assert_eq!(kind.as_str().parse::<TransitionKind>().unwrap(), *kind);
        }
    }
}
