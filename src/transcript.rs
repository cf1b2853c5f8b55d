use crate::errors::CaptionError;
use crate::resolver::{self, LanguagePreferences, Resolution};
use crate::source::CaptionSource;
use crate::video_id::VideoId;

/// Resolves user input (URL or bare id) to a transcript using the
/// configured language order.
pub struct TranscriptService<S> {
    source: S,
    preferences: LanguagePreferences,
}

impl<S: CaptionSource> TranscriptService<S> {
    pub fn new(source: S, preferences: LanguagePreferences) -> Self {
        TranscriptService {
            source,
            preferences,
        }
    }

    pub async fn fetch(&self, input: &str) -> Result<(VideoId, Resolution), CaptionError> {
        let video_id = VideoId::parse(input)?;
        let resolution = self.fetch_video(&video_id).await?;
        Ok((video_id, resolution))
    }

    pub async fn fetch_video(&self, video_id: &VideoId) -> Result<Resolution, CaptionError> {
        log::info!(
            "Resolving captions for {} (languages: {})",
            video_id,
            self.preferences.tags().join(", ")
        );
        Ok(resolver::resolve(&self.source, video_id, &self.preferences).await?)
    }
}
