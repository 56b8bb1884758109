//! Image filter identifiers and presentation catalog.
//!
//! The identifier enum is kept free of display metadata; the catalog table
//! maps each identifier to its user-facing name and description.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available image filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// No filter applied
    #[default]
    None,
    /// Faded colors with a brightness lift
    Vintage,
    /// Boosted red and green channels
    Warm,
    /// Boosted blue channel
    Cool,
    /// Grayscale conversion
    BlackAndWhite,
    /// Fixed linear sepia matrix
    Sepia,
    /// High saturation and contrast
    Vibrant,
    /// Strong contrast with muted colors
    Dramatic,
    /// Slight blur with a brightness lift
    Soft,
    /// Oversaturated with hard contrast
    Neon,
    /// Blue/magenta channel shift with punchy contrast
    Cyberpunk,
    /// Hazy blur with washed-out colors
    Dreamy,
}

impl FilterKind {
    /// All available filters.
    pub const ALL: &'static [FilterKind] = &[
        FilterKind::None,
        FilterKind::Vintage,
        FilterKind::Warm,
        FilterKind::Cool,
        FilterKind::BlackAndWhite,
        FilterKind::Sepia,
        FilterKind::Vibrant,
        FilterKind::Dramatic,
        FilterKind::Soft,
        FilterKind::Neon,
        FilterKind::Cyberpunk,
        FilterKind::Dreamy,
    ];

    /// Returns the filter name as used in request parameters and filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Vintage => "vintage",
            FilterKind::Warm => "warm",
            FilterKind::Cool => "cool",
            FilterKind::BlackAndWhite => "black_and_white",
            FilterKind::Sepia => "sepia",
            FilterKind::Vibrant => "vibrant",
            FilterKind::Dramatic => "dramatic",
            FilterKind::Soft => "soft",
            FilterKind::Neon => "neon",
            FilterKind::Cyberpunk => "cyberpunk",
            FilterKind::Dreamy => "dreamy",
        }
    }

    /// Presentation metadata for this filter.
    pub fn info(&self) -> &'static FilterInfo {
        &CATALOG[*self as usize]
    }

    /// Full presentation catalog, in `ALL` order.
    pub fn catalog() -> &'static [FilterInfo] {
        CATALOG
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(FilterKind::None),
            "vintage" => Ok(FilterKind::Vintage),
            "warm" => Ok(FilterKind::Warm),
            "cool" => Ok(FilterKind::Cool),
            "black_and_white" => Ok(FilterKind::BlackAndWhite),
            "sepia" => Ok(FilterKind::Sepia),
            "vibrant" => Ok(FilterKind::Vibrant),
            "dramatic" => Ok(FilterKind::Dramatic),
            "soft" => Ok(FilterKind::Soft),
            "neon" => Ok(FilterKind::Neon),
            "cyberpunk" => Ok(FilterKind::Cyberpunk),
            "dreamy" => Ok(FilterKind::Dreamy),
            _ => Err(FilterParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown filter: {0}")]
pub struct FilterParseError(String);

/// Presentation metadata for a filter identifier.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FilterInfo {
    pub id: FilterKind,
    pub name: &'static str,
    pub description: &'static str,
}

// Indexed by FilterKind discriminant; keep in ALL order.
static CATALOG: &[FilterInfo] = &[
    FilterInfo {
        id: FilterKind::None,
        name: "Original",
        description: "No filter applied",
    },
    FilterInfo {
        id: FilterKind::Vintage,
        name: "Vintage",
        description: "Faded colors with a warm brightness lift",
    },
    FilterInfo {
        id: FilterKind::Warm,
        name: "Warm",
        description: "Golden tones, boosted reds",
    },
    FilterInfo {
        id: FilterKind::Cool,
        name: "Cool",
        description: "Blue-shifted, crisp tones",
    },
    FilterInfo {
        id: FilterKind::BlackAndWhite,
        name: "Black & White",
        description: "Classic monochrome",
    },
    FilterInfo {
        id: FilterKind::Sepia,
        name: "Sepia",
        description: "Old photograph brown tint",
    },
    FilterInfo {
        id: FilterKind::Vibrant,
        name: "Vibrant",
        description: "Saturated colors with extra contrast",
    },
    FilterInfo {
        id: FilterKind::Dramatic,
        name: "Dramatic",
        description: "Deep contrast, muted palette",
    },
    FilterInfo {
        id: FilterKind::Soft,
        name: "Soft",
        description: "Gentle blur with lifted brightness",
    },
    FilterInfo {
        id: FilterKind::Neon,
        name: "Neon",
        description: "Electric saturation and hard contrast",
    },
    FilterInfo {
        id: FilterKind::Cyberpunk,
        name: "Cyberpunk",
        description: "Blue and magenta shifted night tones",
    },
    FilterInfo {
        id: FilterKind::Dreamy,
        name: "Dreamy",
        description: "Hazy glow with washed-out colors",
    },
];
