//! First-success fallback across an ordered list of caption languages.

use crate::captions::Transcript;
use crate::errors::{ResolveError, RetrievalError};
use crate::source::CaptionSource;
use crate::video_id::VideoId;

/// Ordered language tags to try before falling back to any available track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguagePreferences(Vec<String>);

impl LanguagePreferences {
    /// Blank tags are dropped, as are tags with characters that cannot be
    /// sent in a request header; order is preserved.
    pub fn new<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        LanguagePreferences(
            tags.into_iter()
                .map(|tag| tag.as_ref().trim().to_string())
                .filter(|tag| !tag.is_empty())
                .filter(|tag| {
                    let valid = tag.chars().all(|c| c.is_ascii_graphic());
                    if !valid {
                        log::warn!("Ignoring invalid language tag {:?}", tag);
                    }
                    valid
                })
                .collect(),
        )
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }

    /// Every explicit tag in order, then the unconstrained stage.
    fn stages(&self) -> impl Iterator<Item = Option<&str>> {
        self.0
            .iter()
            .map(|tag| Some(tag.as_str()))
            .chain(std::iter::once(None))
    }
}

/// A successful resolution and the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub transcript: Transcript,
    /// `None` when the unconstrained stage matched.
    pub language: Option<String>,
}

/// Tries each preference once, in order, then one unconstrained attempt.
/// Returns the first success; if every stage fails only the last failure is
/// reported.
pub async fn resolve<S>(
    source: &S,
    video_id: &VideoId,
    preferences: &LanguagePreferences,
) -> Result<Resolution, ResolveError>
where
    S: CaptionSource + ?Sized,
{
    let mut last_failure: Option<RetrievalError> = None;

    for language in preferences.stages() {
        match source.fetch(video_id, language).await {
            Ok(transcript) => {
                log::info!(
                    "Found captions for {} ({}, {} entries)",
                    video_id,
                    language.unwrap_or("any language"),
                    transcript.entries().len()
                );
                return Ok(Resolution {
                    transcript,
                    language: language.map(str::to_string),
                });
            }
            Err(e) => {
                log::debug!(
                    "No captions for {} ({}): {}",
                    video_id,
                    language.unwrap_or("any language"),
                    e
                );
                last_failure = Some(e);
            }
        }
    }

    // stages() always yields the unconstrained attempt, so a failure was recorded.
    let reason = last_failure.unwrap_or(RetrievalError::EmptyTranscript);
    log::warn!("No captions available for {}: {}", video_id, reason);
    Err(ResolveError::NoCaptionsAvailable {
        video_id: video_id.clone(),
        reason,
    })
}
