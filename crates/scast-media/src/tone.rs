//! Placeholder tone synthesis for missing music tracks.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the lavfi sine-tone command.
pub fn build_tone_command(frequency: u32, duration_secs: f64, output: &Path) -> FfmpegCommand {
    FfmpegCommand::new(output).input_with_args(
        ["-f", "lavfi"],
        format!("sine=frequency={}:duration={:.1}", frequency, duration_secs),
    )
}

/// Synthesize a sine tone of the given duration.
///
/// Used to stand in for missing catalog tracks so their identifiers stay
/// resolvable.
pub async fn synthesize_tone(
    frequency: u32,
    duration_secs: f64,
    output: &Path,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    info!(
        frequency,
        duration = format!("{:.1}s", duration_secs),
        "Synthesizing placeholder tone: {}",
        output.display()
    );

    let cmd = build_tone_command(frequency, duration_secs, output);
    runner.run(&cmd).await
}
