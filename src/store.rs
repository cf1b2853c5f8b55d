use std::path::{Path, PathBuf};

use crate::captions::Transcript;
use crate::errors::StoreError;
use crate::video_id::VideoId;

/// Directory of `captions_<id>.json` files.
#[derive(Debug, Clone)]
pub struct CaptionStore {
    dir: PathBuf,
}

impl CaptionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CaptionStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, video_id: &VideoId) -> PathBuf {
        let safe: String = video_id
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("captions_{safe}.json"))
    }

    /// Writes the transcript verbatim as pretty-printed UTF-8 JSON, creating
    /// the directory if needed.
    pub async fn save(&self, video_id: &VideoId, transcript: &Transcript) -> Result<PathBuf, StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(video_id);
        let json = serde_json::to_vec_pretty(transcript).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        log::debug!("Wrote {} caption entries to {}", transcript.entries().len(), path.display());
        Ok(path)
    }

    pub async fn load(&self, video_id: &VideoId) -> Result<Transcript, StoreError> {
        let path = self.path_for(video_id);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json { path, source })
    }
}
