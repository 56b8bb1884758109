//! Narration voice identifiers and the static voice catalog.
//!
//! Voice identifiers resolve to speech-engine parameters (language, variant,
//! speaking rate). Unknown identifiers fall back to the default voice rather
//! than failing, so a stale client can never break narration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base speaking rate in words per minute.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 170;

/// Estimated speaking rate used when audio probing fails, in words per second.
/// Only ever used for timing, never for playback guarantees.
pub const ESTIMATED_WORDS_PER_SECOND: f64 = 2.5;

/// Available narration voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VoiceId {
    #[default]
    FemaleUs,
    MaleUs,
    FemaleUk,
    MaleUk,
    FemaleAustralian,
    MaleAustralian,
    FemaleIndian,
    MaleIndian,
    Child,
    Narrator,
}

impl VoiceId {
    /// All available voices, in catalog order.
    pub const ALL: &'static [VoiceId] = &[
        VoiceId::FemaleUs,
        VoiceId::MaleUs,
        VoiceId::FemaleUk,
        VoiceId::MaleUk,
        VoiceId::FemaleAustralian,
        VoiceId::MaleAustralian,
        VoiceId::FemaleIndian,
        VoiceId::MaleIndian,
        VoiceId::Child,
        VoiceId::Narrator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceId::FemaleUs => "female_us",
            VoiceId::MaleUs => "male_us",
            VoiceId::FemaleUk => "female_uk",
            VoiceId::MaleUk => "male_uk",
            VoiceId::FemaleAustralian => "female_australian",
            VoiceId::MaleAustralian => "male_australian",
            VoiceId::FemaleIndian => "female_indian",
            VoiceId::MaleIndian => "male_indian",
            VoiceId::Child => "child",
            VoiceId::Narrator => "narrator",
        }
    }

    /// Resolve an identifier string, falling back to the default voice for
    /// anything unknown.
    pub fn resolve(s: &str) -> VoiceId {
        VoiceId::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s.to_lowercase())
            .unwrap_or_default()
    }

    /// Speech-engine parameters for this voice.
    pub fn params(&self) -> VoiceParams {
        match self {
            VoiceId::FemaleUs => VoiceParams::new("en-us", "+f3", DEFAULT_WORDS_PER_MINUTE, 55),
            VoiceId::MaleUs => VoiceParams::new("en-us", "+m3", DEFAULT_WORDS_PER_MINUTE, 45),
            VoiceId::FemaleUk => VoiceParams::new("en-gb", "+f3", DEFAULT_WORDS_PER_MINUTE, 55),
            VoiceId::MaleUk => VoiceParams::new("en-gb", "+m3", DEFAULT_WORDS_PER_MINUTE, 45),
            VoiceId::FemaleAustralian => {
                VoiceParams::new("en-gb-scotland", "+f4", DEFAULT_WORDS_PER_MINUTE, 55)
            }
            VoiceId::MaleAustralian => {
                VoiceParams::new("en-gb-scotland", "+m4", DEFAULT_WORDS_PER_MINUTE, 45)
            }
            VoiceId::FemaleIndian => VoiceParams::new("en-in", "+f3", DEFAULT_WORDS_PER_MINUTE, 55),
            VoiceId::MaleIndian => VoiceParams::new("en-in", "+m3", DEFAULT_WORDS_PER_MINUTE, 45),
            VoiceId::Child => VoiceParams::new("en-us", "+f5", 150, 70),
            VoiceId::Narrator => VoiceParams::new("en-us", "+m2", 155, 40),
        }
    }

    /// Presentation metadata for this voice.
    pub fn info(&self) -> VoiceInfo {
        let (name, language, gender) = match self {
            VoiceId::FemaleUs => ("Female US", "en-US", "female"),
            VoiceId::MaleUs => ("Male US", "en-US", "male"),
            VoiceId::FemaleUk => ("Female UK", "en-GB", "female"),
            VoiceId::MaleUk => ("Male UK", "en-GB", "male"),
            VoiceId::FemaleAustralian => ("Female Australian", "en-AU", "female"),
            VoiceId::MaleAustralian => ("Male Australian", "en-AU", "male"),
            VoiceId::FemaleIndian => ("Female Indian", "en-IN", "female"),
            VoiceId::MaleIndian => ("Male Indian", "en-IN", "male"),
            VoiceId::Child => ("Child Voice", "en-US", "female"),
            VoiceId::Narrator => ("Narrator", "en-US", "male"),
        };
        VoiceInfo {
            id: *self,
            name,
            language,
            gender,
        }
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Speech-engine parameters resolved from a voice identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VoiceParams {
    /// Engine language/region code (e.g. "en-us")
    pub language: String,
    /// Engine voice variant suffix (e.g. "+f3")
    pub variant: String,
    /// Speaking rate in words per minute
    pub words_per_minute: u32,
    /// Engine pitch, 0-99
    pub pitch: u32,
}

impl VoiceParams {
    fn new(language: &str, variant: &str, words_per_minute: u32, pitch: u32) -> Self {
        Self {
            language: language.to_string(),
            variant: variant.to_string(),
            words_per_minute,
            pitch,
        }
    }

    /// Apply caller-supplied rate/pitch hints.
    ///
    /// `rate` is a percentage adjustment ("+10%", "-20%", or a bare number);
    /// `pitch` is a Hz-style offset ("+20Hz", "-10Hz", or a bare number)
    /// mapped onto the engine's 0-99 pitch scale.
    pub fn with_hints(mut self, rate: Option<&str>, pitch: Option<&str>) -> Self {
        if let Some(pct) = rate.and_then(parse_rate_hint) {
            let adjusted = self.words_per_minute as i64 * (100 + pct as i64) / 100;
            self.words_per_minute = adjusted.clamp(80, 450) as u32;
        }
        if let Some(hz) = pitch.and_then(parse_pitch_hint) {
            let adjusted = self.pitch as i64 + (hz as i64) / 2;
            self.pitch = adjusted.clamp(0, 99) as u32;
        }
        self
    }
}

/// Presentation metadata for a voice identifier.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct VoiceInfo {
    pub id: VoiceId,
    pub name: &'static str,
    pub language: &'static str,
    pub gender: &'static str,
}

/// Parse a rate hint like "+10%", "-20%" or "15" into a percentage.
pub fn parse_rate_hint(s: &str) -> Option<i32> {
    s.trim().trim_end_matches('%').parse::<i32>().ok()
}

/// Parse a pitch hint like "+20Hz", "-10Hz" or "5" into a Hz offset.
pub fn parse_pitch_hint(s: &str) -> Option<i32> {
    s.trim()
        .trim_end_matches("Hz")
        .trim_end_matches("hz")
        .parse::<i32>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_voice() {
        assert_eq!(VoiceId::resolve("male_uk"), VoiceId::MaleUk);
        assert_eq!(VoiceId::resolve("NARRATOR"), VoiceId::Narrator);
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_default() {
        assert_eq!(VoiceId::resolve("en-US-AriaNeural"), VoiceId::FemaleUs);
        assert_eq!(VoiceId::resolve(""), VoiceId::FemaleUs);
    }

    #[test]
    fn test_rate_hint_parsing() {
        assert_eq!(parse_rate_hint("+10%"), Some(10));
        assert_eq!(parse_rate_hint("-20%"), Some(-20));
        assert_eq!(parse_rate_hint("15"), Some(15));
        assert_eq!(parse_rate_hint("fast"), None);
    }

    #[test]
    fn test_pitch_hint_parsing() {
        assert_eq!(parse_pitch_hint("+20Hz"), Some(20));
        assert_eq!(parse_pitch_hint("-10Hz"), Some(-10));
        assert_eq!(parse_pitch_hint("5"), Some(5));
    }

    #[test]
    fn test_hints_adjust_params() {
        let base = VoiceId::FemaleUs.params();
        let adjusted = base.clone().with_hints(Some("+10%"), Some("+20Hz"));
        assert!(adjusted.words_per_minute > base.words_per_minute);
        assert!(adjusted.pitch > base.pitch);
    }

    #[test]
    fn test_hints_clamp_extremes() {
        let params = VoiceId::FemaleUs.params().with_hints(Some("+900%"), Some("+900Hz"));
        assert!(params.words_per_minute <= 450);
        assert!(params.pitch <= 99);
    }

    #[test]
    fn test_catalog_complete() {
        for voice in VoiceId::ALL {
            let info = voice.info();
            assert_eq!(info.id, *voice);
            assert!(!info.name.is_empty());
        }
    }
}
