//! Background music catalog and selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Fade-out window applied to background music, ending at video end.
pub const MUSIC_FADE_SECS: f64 = 2.0;

/// Default music volume relative to narration.
pub const DEFAULT_MUSIC_VOLUME: f64 = 0.3;

/// Frequency of the placeholder tone synthesized for missing tracks.
pub const PLACEHOLDER_TONE_HZ: u32 = 440;

/// Music catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MusicCategory {
    Upbeat,
    Calm,
    Cinematic,
    Corporate,
    Energetic,
    Ambient,
}

impl MusicCategory {
    pub const ALL: &'static [MusicCategory] = &[
        MusicCategory::Upbeat,
        MusicCategory::Calm,
        MusicCategory::Cinematic,
        MusicCategory::Corporate,
        MusicCategory::Energetic,
        MusicCategory::Ambient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicCategory::Upbeat => "upbeat",
            MusicCategory::Calm => "calm",
            MusicCategory::Cinematic => "cinematic",
            MusicCategory::Corporate => "corporate",
            MusicCategory::Energetic => "energetic",
            MusicCategory::Ambient => "ambient",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MusicCategory::Upbeat => "Positive, feel-good tracks",
            MusicCategory::Calm => "Slow, relaxing backgrounds",
            MusicCategory::Cinematic => "Orchestral, trailer-style moods",
            MusicCategory::Corporate => "Neutral presentation backgrounds",
            MusicCategory::Energetic => "Driving, high-tempo tracks",
            MusicCategory::Ambient => "Textural, atmospheric pads",
        }
    }
}

impl fmt::Display for MusicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MusicCategory {
    type Err = MusicCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MusicCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.to_lowercase())
            .ok_or_else(|| MusicCategoryParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown music category: {0}")]
pub struct MusicCategoryParseError(String);

/// A track in the static music catalog.
///
/// `file_name` is the expected file inside the music storage area. When the
/// file is absent a placeholder tone of `duration_secs` is synthesized under
/// the same name so the identifier stays resolvable.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct MusicTrack {
    pub id: &'static str,
    pub category: MusicCategory,
    pub title: &'static str,
    pub duration_secs: f64,
    pub file_name: &'static str,
}

/// The static track catalog.
pub static TRACKS: &[MusicTrack] = &[
    MusicTrack {
        id: "upbeat_sunrise",
        category: MusicCategory::Upbeat,
        title: "Sunrise Drive",
        duration_secs: 120.0,
        file_name: "upbeat_sunrise.mp3",
    },
    MusicTrack {
        id: "upbeat_good_day",
        category: MusicCategory::Upbeat,
        title: "Good Day",
        duration_secs: 95.0,
        file_name: "upbeat_good_day.mp3",
    },
    MusicTrack {
        id: "calm_waves",
        category: MusicCategory::Calm,
        title: "Quiet Waves",
        duration_secs: 140.0,
        file_name: "calm_waves.mp3",
    },
    MusicTrack {
        id: "calm_evening",
        category: MusicCategory::Calm,
        title: "Evening Light",
        duration_secs: 110.0,
        file_name: "calm_evening.mp3",
    },
    MusicTrack {
        id: "cinematic_rise",
        category: MusicCategory::Cinematic,
        title: "The Rise",
        duration_secs: 150.0,
        file_name: "cinematic_rise.mp3",
    },
    MusicTrack {
        id: "cinematic_horizon",
        category: MusicCategory::Cinematic,
        title: "Horizon",
        duration_secs: 130.0,
        file_name: "cinematic_horizon.mp3",
    },
    MusicTrack {
        id: "corporate_forward",
        category: MusicCategory::Corporate,
        title: "Forward Motion",
        duration_secs: 100.0,
        file_name: "corporate_forward.mp3",
    },
    MusicTrack {
        id: "corporate_launch",
        category: MusicCategory::Corporate,
        title: "Launch Plan",
        duration_secs: 105.0,
        file_name: "corporate_launch.mp3",
    },
    MusicTrack {
        id: "energetic_pulse",
        category: MusicCategory::Energetic,
        title: "Pulse",
        duration_secs: 90.0,
        file_name: "energetic_pulse.mp3",
    },
    MusicTrack {
        id: "energetic_sprint",
        category: MusicCategory::Energetic,
        title: "Sprint",
        duration_secs: 85.0,
        file_name: "energetic_sprint.mp3",
    },
    MusicTrack {
        id: "ambient_drift",
        category: MusicCategory::Ambient,
        title: "Drift",
        duration_secs: 160.0,
        file_name: "ambient_drift.mp3",
    },
    MusicTrack {
        id: "ambient_still",
        category: MusicCategory::Ambient,
        title: "Still Air",
        duration_secs: 145.0,
        file_name: "ambient_still.mp3",
    },
];

/// Look up a track by its identifier.
pub fn track_by_id(id: &str) -> Option<&'static MusicTrack> {
    TRACKS.iter().find(|t| t.id == id)
}

/// Tracks belonging to a category.
pub fn tracks_in_category(category: MusicCategory) -> impl Iterator<Item = &'static MusicTrack> {
    TRACKS.iter().filter(move |t| t.category == category)
}

/// A caller's background-music choice for a render.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct MusicSelection {
    /// Catalog track identifier
    #[validate(length(min = 1))]
    pub track_id: String,

    /// Music volume relative to narration, 0.0-1.0
    #[serde(default = "default_volume")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub volume: f64,
}

fn default_volume() -> f64 {
    DEFAULT_MUSIC_VOLUME
}

impl MusicSelection {
    pub fn new(track_id: impl Into<String>) -> Self {
        Self {
            track_id: track_id.into(),
            volume: DEFAULT_MUSIC_VOLUME,
        }
    }
}
