//! Subtitle segmentation and SRT serialization.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of words per caption.
pub const DEFAULT_WORDS_PER_SUBTITLE: usize = 5;

/// A single timed caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubtitleSegment {
    /// 1-based, contiguous block index
    pub index: usize,
    /// Start time, seconds
    pub start: f64,
    /// End time, seconds
    pub end: f64,
    /// Caption text
    pub text: String,
}

impl SubtitleSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// An ordered list of non-overlapping captions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SubtitleTrack {
    pub segments: Vec<SubtitleSegment>,
}

impl SubtitleTrack {
    /// Partition narration text into fixed-size word chunks with duration
    /// proportional to each chunk's word count.
    ///
    /// Returns an empty track for empty text or a non-positive duration.
    pub fn generate(text: &str, total_duration: f64, words_per_segment: usize) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() || total_duration <= 0.0 || words_per_segment == 0 {
            return Self::default();
        }

        let words_per_second = words.len() as f64 / total_duration;
        let mut segments = Vec::new();
        let mut start = 0.0;

        for (i, chunk) in words.chunks(words_per_segment).enumerate() {
            let duration = chunk.len() as f64 / words_per_second;
            let is_last = (i + 1) * words_per_segment >= words.len();
            // Pin the final end to the narration duration so truncation drift
            // cannot push a caption past the audio.
            let end = if is_last { total_duration } else { start + duration };
            segments.push(SubtitleSegment {
                index: i + 1,
                start,
                end,
                text: chunk.join(" "),
            });
            start = end;
        }

        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Serialize to SRT: numbered blocks with
    /// `HH:MM:SS,mmm --> HH:MM:SS,mmm` timecode lines.
    pub fn to_srt(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                segment.index,
                format_timecode(segment.start),
                format_timecode(segment.end),
                segment.text
            ));
        }
        out
    }

    /// Parse an SRT document produced by [`SubtitleTrack::to_srt`].
    pub fn parse_srt(input: &str) -> Result<Self, SrtParseError> {
        let mut segments = Vec::new();

        for block in input.split("\n\n").filter(|b| !b.trim().is_empty()) {
            let mut lines = block.lines();
            let index_line = lines.next().ok_or(SrtParseError::TruncatedBlock)?;
            let index: usize = index_line
                .trim()
                .parse()
                .map_err(|_| SrtParseError::BadIndex(index_line.to_string()))?;

            let timing_line = lines.next().ok_or(SrtParseError::TruncatedBlock)?;
            let (start_str, end_str) = timing_line
                .split_once(" --> ")
                .ok_or_else(|| SrtParseError::BadTimecode(timing_line.to_string()))?;
            let start = parse_timecode(start_str.trim())?;
            let end = parse_timecode(end_str.trim())?;

            let text = lines.collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return Err(SrtParseError::TruncatedBlock);
            }

            segments.push(SubtitleSegment {
                index,
                start,
                end,
                text,
            });
        }

        Ok(Self { segments })
    }
}

/// Format seconds as `HH:MM:SS,mmm` with the fractional second truncated
/// to milliseconds (not rounded).
pub fn format_timecode(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse an `HH:MM:SS,mmm` timecode into seconds.
pub fn parse_timecode(s: &str) -> Result<f64, SrtParseError> {
    let bad = || SrtParseError::BadTimecode(s.to_string());

    let (clock, millis) = s.split_once(',').ok_or_else(bad)?;
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(bad());
    }

    let hours: u64 = parts[0].parse().map_err(|_| bad())?;
    let minutes: u64 = parts[1].parse().map_err(|_| bad())?;
    let secs: u64 = parts[2].parse().map_err(|_| bad())?;
    let millis: u64 = millis.parse().map_err(|_| bad())?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + secs as f64 + millis as f64 / 1000.0)
}

#[derive(Debug, Error)]
pub enum SrtParseError {
    #[error("Truncated subtitle block")]
    TruncatedBlock,

    #[error("Invalid block index: {0}")]
    BadIndex(String),

    #[error("Invalid timecode: {0}")]
    BadTimecode(String),
}
