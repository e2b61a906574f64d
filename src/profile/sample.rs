//! The always-available substitute profile.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::core::GardenError;

use super::normalize::Normalizer;
use super::raw::RawProfile;
use super::Profile;

const BUNDLED_SAMPLE: &str = include_str!("../../data/sample-profile.json");

/// Where the sample profile comes from.
#[derive(Debug, Clone, Default)]
pub enum SampleSource {
    /// The document compiled into the crate.
    #[default]
    Bundled,
    /// A JSON file, read on every request.
    File(PathBuf),
    /// JSON text supplied by the caller.
    Inline(String),
    /// No sample; every fallback fails.
    Disabled,
}

/// Supplies the sample profile used when the upstream path fails.
#[derive(Debug, Clone, Default)]
pub struct SampleProvider {
    source: SampleSource,
    normalizer: Normalizer,
}

impl SampleProvider {
    pub fn new(source: SampleSource) -> Self {
        Self {
            source,
            normalizer: Normalizer::default(),
        }
    }

    /// Use `normalizer` (and so its site root) for the sample's relative links.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The normalized sample, or `None` when it is missing or corrupt.
    pub async fn get_sample(&self) -> Option<Profile> {
        match self.load().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "sample profile unavailable");
                None
            }
        }
    }

    /// Like [`get_sample`](Self::get_sample), but reports why the sample is unavailable.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::SampleUnavailable` when the source is disabled, unreadable or not
    /// a JSON object.
    pub async fn load(&self) -> Result<Profile, GardenError> {
        let text = match &self.source {
            SampleSource::Bundled => BUNDLED_SAMPLE.to_string(),
            SampleSource::Inline(text) => text.clone(),
            SampleSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                GardenError::SampleUnavailable(format!("{}: {e}", path.display()))
            })?,
            SampleSource::Disabled => {
                return Err(GardenError::SampleUnavailable("sample disabled".into()));
            }
        };

        let raw = RawProfile::from_json(&text)
            .map_err(|e| GardenError::SampleUnavailable(format!("sample parse: {e}")))?;
        let profile = self.normalizer.normalize(&raw);
        debug!(
            username = %profile.username,
            items = profile.total_items(),
            "loaded sample profile"
        );
        Ok(profile)
    }
}
