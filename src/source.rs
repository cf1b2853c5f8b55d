use async_trait::async_trait;
use html_escape::decode_html_entities;
use ytranscript::{TranscriptConfig, TranscriptResponse, YoutubeTranscript, YoutubeTranscriptError};

use crate::captions::{CaptionEntry, Transcript};
use crate::errors::RetrievalError;
use crate::video_id::VideoId;

/// Something that can produce a caption track for a video.
///
/// `language: None` asks for whatever track the source considers its
/// default. Implementations must fail within bounded time; the resolver
/// waits on each call without a timeout of its own.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    async fn fetch(
        &self,
        video_id: &VideoId,
        language: Option<&str>,
    ) -> Result<Transcript, RetrievalError>;
}

/// Caption source backed by YouTube's timed-text endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct YoutubeSource;

#[async_trait]
impl CaptionSource for YoutubeSource {
    async fn fetch(
        &self,
        video_id: &VideoId,
        language: Option<&str>,
    ) -> Result<Transcript, RetrievalError> {
        let config = language.map(|lang| TranscriptConfig {
            lang: Some(lang.to_string()),
        });

        let responses = YoutubeTranscript::fetch_transcript(video_id.as_str(), config)
            .await
            .map_err(|e| retrieval_error(e, language))?;

        Transcript::new(responses.into_iter().map(caption_entry).collect())
            .ok_or(RetrievalError::EmptyTranscript)
    }
}

fn caption_entry(response: TranscriptResponse) -> CaptionEntry {
    CaptionEntry {
        text: decode_caption_text(&response.text),
        start: f64::from(response.offset),
        duration: f64::from(response.duration),
    }
}

fn decode_caption_text(raw: &str) -> String {
    // The timed-text feed double-escapes apostrophes.
    decode_html_entities(raw).replace("&#39;", "'")
}

fn retrieval_error(err: YoutubeTranscriptError, language: Option<&str>) -> RetrievalError {
    match err {
        YoutubeTranscriptError::TranscriptNotAvailableLanguage(_, available, _) => {
            RetrievalError::LanguageUnavailable {
                language: language.unwrap_or_default().to_string(),
                available,
            }
        }
        other => RetrievalError::Source(other.to_string()),
    }
}
