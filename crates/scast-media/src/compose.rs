//! Silent slideshow composition.
//!
//! Two rendering paths: a concat-demuxer hard-cut path and an `xfade`
//! cross-fade path. The cross-fade path stretches each image's hold time so
//! the rendered total still equals the timing plan's total duration.

use std::path::{Path, PathBuf};
use tracing::info;

use scast_models::transition::TRANSITION_WINDOW_SECS;
use scast_models::{EncodingConfig, TimingPlan, TransitionKind};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Build the concat-demuxer list: one `file`/`duration` pair per frame, with
/// the final frame repeated so the demuxer holds it to the end.
pub fn build_concat_list(frames: &[PathBuf], per_image: f64) -> String {
    let mut list = String::new();
    for frame in frames {
        list.push_str(&format!("file '{}'\n", frame.display()));
        list.push_str(&format!("duration {:.3}\n", per_image));
    }
    if let Some(last) = frames.last() {
        list.push_str(&format!("file '{}'\n", last.display()));
    }
    list
}

/// Per-input hold time for the cross-fade path.
///
/// With `n` inputs and `n-1` overlapping fades of `window` seconds, the
/// rendered duration is `n*hold - (n-1)*window`. Stretching each hold by
/// `window*(n-1)/n` makes that come out to exactly `n*per_image`.
pub fn crossfade_hold(per_image: f64, count: usize, window: f64) -> f64 {
    if count < 2 {
        return per_image;
    }
    per_image + window * (count as f64 - 1.0) / count as f64
}

/// Build the `xfade` filter chain for `count` timed inputs.
pub fn build_xfade_filter(
    count: usize,
    hold: f64,
    window: f64,
    transition: &str,
    encoding: &EncodingConfig,
) -> String {
    let mut chain = String::new();
    let mut prev = "[0:v]".to_string();

    for i in 1..count {
        let offset = i as f64 * (hold - window);
        let label = format!("[x{}]", i);
        chain.push_str(&format!(
            "{}[{}:v]xfade=transition={}:duration={:.3}:offset={:.3}{};",
            prev, i, transition, window, offset, label
        ));
        prev = label;
    }

    chain.push_str(&format!(
        "{}fps={},format={}[v]",
        prev, encoding.frame_rate, encoding.pixel_format
    ));
    chain
}

/// Build the hard-cut composition command over a written concat list.
pub fn build_cut_command(
    list_path: &Path,
    encoding: &EncodingConfig,
    output: &Path,
) -> FfmpegCommand {
    FfmpegCommand::new(output)
        .input_with_args(["-f", "concat", "-safe", "0"], list_path)
        .video_filter(format!(
            "fps={},format={}",
            encoding.frame_rate, encoding.pixel_format
        ))
        .video_codec(&encoding.codec)
        .preset(&encoding.preset)
        .no_audio()
}

/// Build the cross-fade composition command.
pub fn build_crossfade_command(
    frames: &[PathBuf],
    hold: f64,
    filter: &str,
    encoding: &EncodingConfig,
    output: &Path,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(output);
    let hold_arg = format!("{:.3}", hold);
    for frame in frames {
        cmd = cmd.input_with_args(["-loop", "1", "-t", hold_arg.as_str()], frame);
    }
    cmd.filter_complex(filter)
        .map("[v]")
        .video_codec(&encoding.codec)
        .preset(&encoding.preset)
        .no_audio()
}

/// Render the ordered, timed frames into a silent video.
///
/// Single-image inputs and `TransitionKind::None` take the cut path; a
/// compositor failure is fatal to the run.
pub async fn compose_slideshow(
    frames: &[PathBuf],
    plan: &TimingPlan,
    transition: TransitionKind,
    encoding: &EncodingConfig,
    work_dir: &Path,
    output: &Path,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    if frames.is_empty() {
        return Err(MediaError::internal("No frames to compose"));
    }

    info!(
        frames = frames.len(),
        total = format!("{:.2}s", plan.total_duration),
        transition = %transition,
        "Compositing slideshow: {}",
        output.display()
    );

    match transition.xfade_name() {
        Some(name) if frames.len() >= 2 => {
            let hold = crossfade_hold(
                plan.per_image_duration,
                frames.len(),
                TRANSITION_WINDOW_SECS,
            );
            let filter =
                build_xfade_filter(frames.len(), hold, TRANSITION_WINDOW_SECS, name, encoding);
            let cmd = build_crossfade_command(frames, hold, &filter, encoding, output);
            runner.run(&cmd).await
        }
        _ => {
            let list_path = work_dir.join("frames.concat");
            tokio::fs::write(&list_path, build_concat_list(frames, plan.per_image_duration))
                .await?;
            let cmd = build_cut_command(&list_path, encoding, output);
            runner.run(&cmd).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn frames(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("frame_{:03}.jpg", i))).collect()
    }

    #[test]
    fn test_concat_list_repeats_last_frame() {
        let list = build_concat_list(&frames(2), 3.0);
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(
            lines,
            vec![
                "file 'frame_000.jpg'",
                "duration 3.000",
                "file 'frame_001.jpg'",
                "duration 3.000",
                "file 'frame_001.jpg'",
            ]
        );
    }

    #[test]
    fn test_crossfade_hold_preserves_total() {
        for n in 2..=8 {
            let per_image = 3.0;
            let hold = crossfade_hold(per_image, n, 0.5);
            let rendered = n as f64 * hold - (n as f64 - 1.0) * 0.5;
            assert!((rendered - n as f64 * per_image).abs() < EPS, "n={}", n);
        }
    }

    #[test]
    fn test_crossfade_hold_single_image() {
        assert!((crossfade_hold(3.0, 1, 0.5) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_xfade_filter_chain() {
        let encoding = EncodingConfig::default();
        let hold = crossfade_hold(3.0, 3, 0.5);
        let filter = build_xfade_filter(3, hold, 0.5, "fade", &encoding);

        assert_eq!(filter.matches("xfade").count(), 2);
        assert!(filter.contains("transition=fade"));
        assert!(filter.contains("duration=0.500"));
        assert!(filter.ends_with("fps=24,format=yuv420p[v]"));
        // First fade starts one stretched hold minus the window into the video.
        assert!(filter.contains(&format!("offset={:.3}", hold - 0.5)));
    }

    #[test]
    fn test_cut_command_args() {
        let encoding = EncodingConfig::default();
        let cmd = build_cut_command(Path::new("frames.concat"), &encoding, Path::new("out.mp4"));
        let args = cmd.build_args();

        assert!(args.contains(&"concat".to_string()));
        assert!(args.contains(&"-safe".to_string()));
        assert!(args.contains(&"fps=24,format=yuv420p".to_string()));
        assert!(args.contains(&"-an".to_string()));
        assert!(args.contains(&"libx264".to_string()));
    }

    #[test]
    fn test_crossfade_command_one_input_per_frame() {
        let encoding = EncodingConfig::default();
        let f = frames(4);
        let hold = crossfade_hold(2.0, 4, 0.5);
        let filter = build_xfade_filter(4, hold, 0.5, "dissolve", &encoding);
        let cmd = build_crossfade_command(&f, hold, &filter, &encoding, Path::new("out.mp4"));
        let args = cmd.build_args();

        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 4);
        assert_eq!(args.iter().filter(|a| *a == "-loop").count(), 4);
        assert!(args.contains(&"[v]".to_string()));
    }
}
