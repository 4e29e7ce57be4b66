//! Caption windowing ahead of keyword extraction.
//!
//! Individual captions are too short for the extraction service to score
//! well, so consecutive captions are concatenated until each window spans at
//! least a threshold duration.

use crate::captions::Caption;
use crate::timecode::EpochSeconds;

/// Default minimum window duration in seconds
pub const DEFAULT_WINDOW_SECONDS: EpochSeconds = 20;

/// A run of consecutive captions merged into one analysis unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionWindow {
    pub start_time: EpochSeconds,
    pub end_time: EpochSeconds,
    pub text: String,
}

/// Merge captions into windows spanning at least `threshold` seconds.
///
/// Captions are taken in transcript order; a window closes at the first
/// caption whose end puts the elapsed span at or past the threshold. A
/// trailing run that never reaches the threshold is still emitted, ending at
/// the last caption's end time.
pub fn merge_into_windows(captions: &[Caption], threshold: EpochSeconds) -> Vec<CaptionWindow> {
    let mut windows = Vec::new();
    let mut window_start: EpochSeconds = 0;
    let mut text = String::new();
    let mut open = false;

    for caption in captions {
        if !open {
            window_start = caption.start_time;
            open = true;
        }

        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(caption.text.trim());

        if caption.end_time.saturating_sub(window_start) >= threshold {
            windows.push(CaptionWindow {
                start_time: window_start,
                end_time: caption.end_time,
                text: std::mem::take(&mut text),
            });
            open = false;
        }
    }

    if open {
        // captions is non-empty whenever a window is open
        let end_time = captions.last().map(|caption| caption.end_time).unwrap_or(0);
        windows.push(CaptionWindow {
            start_time: window_start,
            end_time,
            text,
        });
    }

    windows
}
