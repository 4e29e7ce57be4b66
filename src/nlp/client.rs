//! HTTP client for the keyword-extraction service.

use std::time::Duration;

use tracing::{debug, info};

use super::split_metadata;
use crate::captions::CaptionDocument;
use crate::config::NlpConfig;
use crate::entities::EntityIndex;
use crate::{Result, VidmarkError};

/// Client for the external service that scores caption text and answers
/// with an entity-to-mentions map
pub struct NlpClient {
    client: reqwest::Client,
    endpoint: String,
}

impl NlpClient {
    pub fn new(config: &NlpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// POST the caption document and return the entity index, with the
    /// `METADATA` pseudo-entry stripped and logged
    pub async fn extract_entities(&self, document: &CaptionDocument) -> Result<EntityIndex> {
        debug!(
            "Sending {} captions to keyword service at {}",
            document.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(document)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(VidmarkError::KeywordService(format!(
                "{}: {}",
                status, text
            )));
        }

        let mut index: EntityIndex = response.json().await?;

        if let Some(metadata) = split_metadata(&mut index) {
            info!(
                "Keyword service scored {:?} captions into {:?} entities",
                metadata.caption_count(),
                metadata.entity_count()
            );
        }

        Ok(index)
    }
}
