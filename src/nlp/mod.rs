//! Integration with the external keyword-extraction service.
//!
//! Captions are merged into time windows before analysis; the service
//! answers with an entity-to-mentions map that may carry a `METADATA`
//! pseudo-entry of transport statistics.

pub mod client;
pub mod preprocess;

pub use client::NlpClient;
pub use preprocess::{merge_into_windows, CaptionWindow, DEFAULT_WINDOW_SECONDS};

use crate::entities::EntityIndex;

/// Key the service reserves for response statistics; never a real entity
pub const METADATA_KEY: &str = "METADATA";

/// Statistics the service attaches under [`METADATA_KEY`]: caption count,
/// analysis time, and entity count, in that order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NlpMetadata {
    values: Vec<u64>,
}

impl NlpMetadata {
    pub fn caption_count(&self) -> Option<u64> {
        self.values.first().copied()
    }

    pub fn analysis_nanos(&self) -> Option<u64> {
        self.values.get(1).copied()
    }

    pub fn entity_count(&self) -> Option<u64> {
        self.values.get(2).copied()
    }
}

/// Split the `METADATA` pseudo-entry off an index so it never reaches the
/// comparators or the display layer
pub fn split_metadata(index: &mut EntityIndex) -> Option<NlpMetadata> {
    index.remove(METADATA_KEY).map(|entity| NlpMetadata {
        values: entity.mentions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_metadata() {
        let raw = r#"{"atp":[0,20],"METADATA":[4,1500,2],"cell":[0]}"#;
        let mut index: EntityIndex = serde_json::from_str(raw).unwrap();

        let metadata = split_metadata(&mut index).unwrap();
        assert_eq!(metadata.caption_count(), Some(4));
        assert_eq!(metadata.analysis_nanos(), Some(1500));
        assert_eq!(metadata.entity_count(), Some(2));

        let keys: Vec<&str> = index.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["atp", "cell"]);

        // second call finds nothing
        assert!(split_metadata(&mut index).is_none());
    }
}
