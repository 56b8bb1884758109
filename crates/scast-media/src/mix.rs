//! Narration and music mixing into a silent video.
//!
//! The video's visual duration is always authoritative: narration is padded
//! with silence or trimmed to match, and music fades out ending exactly at
//! the video end.

use std::path::Path;
use tracing::info;

use scast_models::{EncodingConfig, MUSIC_FADE_SECS};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the audio filter graph for a mix.
///
/// Input 1 is narration, input 2 (when present) is music. `music` carries the
/// music volume multiplier. The result is always labelled `[aud]`.
pub fn build_audio_filter(
    narration_duration: f64,
    total_duration: f64,
    music: Option<f64>,
) -> String {
    let narration_chain = if narration_duration < total_duration {
        format!("[1:a]apad=whole_dur={:.3}", total_duration)
    } else {
        format!("[1:a]atrim=0:{:.3}", total_duration)
    };

    match music {
        None => format!("{}[aud]", narration_chain),
        Some(volume) => {
            let fade_start = (total_duration - MUSIC_FADE_SECS).max(0.0);
            format!(
                "{}[nar];\
                 [2:a]volume={:.2},atrim=0:{:.3},apad=whole_dur={:.3},afade=t=out:st={:.3}:d={:.1}[mus];\
                 [nar][mus]amix=inputs=2:duration=first:dropout_transition=0[aud]",
                narration_chain,
                volume,
                total_duration,
                total_duration,
                fade_start,
                MUSIC_FADE_SECS
            )
        }
    }
}

/// Build the mux command: video stream copied, mixed audio encoded.
pub fn build_mix_command(
    video: &Path,
    narration: &Path,
    music: Option<(&Path, f64)>,
    narration_duration: f64,
    total_duration: f64,
    encoding: &EncodingConfig,
    output: &Path,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(output).input(video).input(narration);
    if let Some((music_path, _)) = music {
        cmd = cmd.input(music_path);
    }

    cmd.filter_complex(build_audio_filter(
        narration_duration,
        total_duration,
        music.map(|(_, volume)| volume),
    ))
    .map("0:v")
    .map("[aud]")
    .video_codec("copy")
    .output_args(encoding.to_audio_args())
    .duration(total_duration)
}

/// Merge narration (and optional music) into a silent video.
///
/// The caller decides the fallback policy on failure; this function only
/// reports it.
pub async fn merge_audio(
    video: &Path,
    narration: &Path,
    music: Option<(&Path, f64)>,
    narration_duration: f64,
    total_duration: f64,
    encoding: &EncodingConfig,
    output: &Path,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    info!(
        narration = format!("{:.2}s", narration_duration),
        total = format!("{:.2}s", total_duration),
        has_music = music.is_some(),
        "Merging audio into {}",
        output.display()
    );

    let cmd = build_mix_command(
        video,
        narration,
        music,
        narration_duration,
        total_duration,
        encoding,
        output,
    );
    runner.run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_narration_is_padded() {
        let filter = build_audio_filter(5.0, 9.0, None);
        assert!(filter.contains("apad=whole_dur=9.000"));
        assert!(!filter.contains("atrim"));
        assert!(filter.ends_with("[aud]"));
    }

    #[test]
    fn test_long_narration_is_trimmed() {
        let filter = build_audio_filter(12.0, 9.0, None);
        assert!(filter.contains("atrim=0:9.000"));
        assert!(!filter.contains("apad"));
    }

    #[test]
    fn test_equal_duration_takes_trim_path() {
        let filter = build_audio_filter(9.0, 9.0, None);
        assert!(filter.contains("atrim=0:9.000"));
    }

    #[test]
    fn test_music_fades_out_at_video_end() {
        let filter = build_audio_filter(5.0, 10.0, Some(0.3));
        assert!(filter.contains("volume=0.30"));
        assert!(filter.contains("afade=t=out:st=8.000:d=2.0"));
        assert!(filter.contains("amix=inputs=2:duration=first"));
        assert!(filter.ends_with("[aud]"));
    }

    #[test]
    fn test_music_fade_clamped_for_short_videos() {
        let filter = build_audio_filter(1.0, 1.5, Some(0.5));
        assert!(filter.contains("afade=t=out:st=0.000"));
    }

    #[test]
    fn test_mix_command_copies_video_and_bounds_duration() {
        let encoding = EncodingConfig::default();
        let cmd = build_mix_command(
            Path::new("silent.mp4"),
            Path::new("narration.wav"),
            None,
            5.0,
            9.0,
            &encoding,
            Path::new("out.mp4"),
        );
        let args = cmd.build_args();

        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 2);
        let cv = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[cv + 1], "copy");
        assert!(args.contains(&"aac".to_string()));
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "9.000");
    }

    #[test]
    fn test_mix_command_adds_music_input() {
        let encoding = EncodingConfig::default();
        let cmd = build_mix_command(
            Path::new("silent.mp4"),
            Path::new("narration.wav"),
            Some((Path::new("music.mp3"), 0.4)),
            5.0,
            9.0,
            &encoding,
            Path::new("out.mp4"),
        );
        let args = cmd.build_args();
        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 3);
        assert!(args.iter().any(|a| a.contains("volume=0.40")));
    }
}
