//! Subtitle burn-in.

use std::path::Path;
use tracing::info;

use scast_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Fixed visual style for burned-in captions.
#[derive(Debug, Clone)]
pub struct SubtitleStyle {
    pub font_size: u32,
    pub outline: u32,
    pub margin_v: u32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: 24,
            outline: 2,
            margin_v: 30,
        }
    }
}

impl SubtitleStyle {
    fn force_style(&self) -> String {
        format!(
            "FontSize={},Outline={},MarginV={}",
            self.font_size, self.outline, self.margin_v
        )
    }
}

/// Escape a path for use inside the `subtitles` filter argument.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// Build the `subtitles` video filter string.
pub fn subtitles_filter(srt_path: &Path, style: &SubtitleStyle) -> String {
    format!(
        "subtitles='{}':force_style='{}'",
        escape_filter_path(srt_path),
        style.force_style()
    )
}

/// Build the burn-in command: video re-encoded with captions, audio copied.
pub fn build_burn_command(
    video: &Path,
    srt_path: &Path,
    style: &SubtitleStyle,
    encoding: &EncodingConfig,
    output: &Path,
) -> FfmpegCommand {
    FfmpegCommand::new(output)
        .input(video)
        .video_filter(subtitles_filter(srt_path, style))
        .video_codec(&encoding.codec)
        .preset(&encoding.preset)
        .audio_codec("copy")
}

/// Re-encode a video with captions rendered into the frames.
///
/// Optional step; the caller treats failure as non-fatal and keeps the
/// pre-burn video.
pub async fn burn_subtitles(
    video: &Path,
    srt_path: &Path,
    style: &SubtitleStyle,
    encoding: &EncodingConfig,
    output: &Path,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    info!(
        subtitles = %srt_path.display(),
        "Burning subtitles into {}",
        output.display()
    );

    let cmd = build_burn_command(video, srt_path, style, encoding, output);
    runner.run(&cmd).await
}
