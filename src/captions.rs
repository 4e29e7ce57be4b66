//! Caption model and SBV transcript parsing.
//!
//! An SBV transcript is a sequence of caption blocks separated by blank
//! lines; each block is a `start,end` timestamp line followed by the caption
//! text, which may itself contain commas.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::timecode::{self, EpochSeconds};

/// One subtitle unit, immutable once parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    /// Offset of the caption start from the video start
    pub start_time: EpochSeconds,
    /// Offset of the caption end from the video start
    pub end_time: EpochSeconds,
    /// Caption text, commas preserved
    pub text: String,
}

/// Ordered sequence of captions for one video, in transcript order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionDocument {
    /// Source video url, treated as an opaque identifier
    pub url: String,
    pub captions: Vec<Caption>,
}

impl CaptionDocument {
    /// Create an empty document for the given source url
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            captions: Vec::new(),
        }
    }

    /// Number of captions in the document
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Check if the document holds no captions
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// End time of the last-ending caption
    pub fn total_duration(&self) -> EpochSeconds {
        self.captions
            .iter()
            .map(|caption| caption.end_time)
            .max()
            .unwrap_or(0)
    }
}

/// Parse a raw SBV transcript into a [`CaptionDocument`].
///
/// Line breaks are folded into the field delimiter, so a blank line becomes
/// a double delimiter marking the block boundary. Blocks with fewer than
/// three fields (a trailing fragment, or a timestamp line with no text) are
/// dropped, as are blocks whose timestamps fail to parse; one corrupt block
/// never invalidates the rest of the transcript. Empty input yields an
/// empty document.
pub fn parse_captions(raw: &str, url: impl Into<String>) -> CaptionDocument {
    let mut document = CaptionDocument::new(url);

    let normalized = raw.replace("\r\n", ",").replace(['\r', '\n'], ",");

    for chunk in normalized.split(",,") {
        let fields: Vec<&str> = chunk.split(',').collect();
        if fields.len() < 3 {
            if !chunk.trim().is_empty() {
                warn!("Skipping incomplete caption block: {:?}", chunk);
            }
            continue;
        }

        let start_time = timecode::parse_timestamp(fields[0]);
        let end_time = timecode::parse_timestamp(fields[1]);
        let (start_time, end_time) = match (start_time, end_time) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                warn!(
                    "Skipping caption block with malformed timestamps: {:?},{:?}",
                    fields[0], fields[1]
                );
                continue;
            }
        };

        document.captions.push(Caption {
            start_time,
            end_time,
            text: rebuild_text(&fields[2..]),
        });
    }

    document
}

/// Rejoin the text fields the delimiter split apart. A caption containing
/// `"Hello, world"` arrives as two fields and must leave as one string with
/// the comma restored.
fn rebuild_text(fields: &[&str]) -> String {
    let mut text = String::from(fields[0]);
    for field in &fields[1..] {
        text.push_str(", ");
        text.push_str(field.trim_start());
    }
    text
}
