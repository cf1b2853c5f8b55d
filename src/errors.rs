use std::path::PathBuf;

use thiserror::Error;

use crate::video_id::VideoId;

/// Failure of a single retrieval attempt against a caption source.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RetrievalError {
    #[error("no '{language}' captions (available: {})", .available.join(", "))]
    LanguageUnavailable {
        language: String,
        available: Vec<String>,
    },

    #[error("caption track contains no entries")]
    EmptyTranscript,

    #[error("{0}")]
    Source(String),
}

/// Terminal outcome of the fallback resolver once every stage has failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    #[error("no captions available for {video_id}: {reason}")]
    NoCaptionsAvailable {
        video_id: VideoId,
        reason: RetrievalError,
    },
}

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("No video ID provided")]
    MissingIdentifier,

    #[error(transparent)]
    NoCaptionsAvailable(#[from] ResolveError),

    #[error("{0}")]
    Unexpected(String),
}

impl CaptionError {
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid caption file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StoreError> for CaptionError {
    fn from(err: StoreError) -> Self {
        CaptionError::Unexpected(err.to_string())
    }
}
