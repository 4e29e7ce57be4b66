//! YouTube url validation, video-id extraction and embed-url building.

use regex::Regex;
use url::Url;

use crate::{Result, VidmarkError};

// Accepts watch/v/embed paths on youtube.com and m.youtube.com plus the
// youtu.be short form; capture group 1 is the video id.
const VIDEO_URL_PATTERN: &str = r"(?:https?://)?(?:youtu\.be/|(?:www\.|m\.)?youtube\.com/(?:watch|v|embed)(?:\.php)?(?:\?.*v=|/))([a-zA-Z0-9_-]+)";

/// Extract the video id from a YouTube url.
///
/// The `v=` query parameter wins when present (anything after a `&` is not
/// part of the id); short-form and embed urls fall back to the path
/// component. Non-YouTube urls are rejected.
pub fn extract_video_id(url: &str) -> Result<String> {
    let pattern = Regex::new(VIDEO_URL_PATTERN).unwrap();
    let captures = pattern
        .captures(url)
        .ok_or_else(|| VidmarkError::InvalidVideoUrl(url.to_string()))?;

    if let Ok(parsed) = Url::parse(url) {
        if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "v") {
            if !id.is_empty() {
                return Ok(id.into_owned());
            }
        }
    }

    Ok(captures[1].to_string())
}

/// Build the embeddable player url for a video id
pub fn embed_url(video_id: &str, origin: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}?enablejsapi=1&origin={}",
        video_id, origin
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=ncbb5B85sd0").unwrap(),
            "ncbb5B85sd0"
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=ncbb5B85sd0&t=42s").unwrap(),
            "ncbb5B85sd0"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=ncbb5B85sd0").unwrap(),
            "ncbb5B85sd0"
        );
    }

    #[test]
    fn test_short_and_embed_urls() {
        assert_eq!(
            extract_video_id("https://youtu.be/ncbb5B85sd0").unwrap(),
            "ncbb5B85sd0"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/ncbb5B85sd0").unwrap(),
            "ncbb5B85sd0"
        );
        assert_eq!(
            extract_video_id("m.youtube.com/watch?v=ncbb5B85sd0").unwrap(),
            "ncbb5B85sd0"
        );
    }

    #[test]
    fn test_invalid_urls_rejected() {
        assert!(matches!(
            extract_video_id("https://example.com/watch?v=abc"),
            Err(VidmarkError::InvalidVideoUrl(_))
        ));
        assert!(matches!(
            extract_video_id("not a url"),
            Err(VidmarkError::InvalidVideoUrl(_))
        ));
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            embed_url("ncbb5B85sd0", "https://annotator.example"),
            "https://www.youtube.com/embed/ncbb5B85sd0?enablejsapi=1&origin=https://annotator.example"
        );
    }
}
