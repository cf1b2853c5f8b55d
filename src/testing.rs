//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::captions::{CaptionEntry, Transcript};
use crate::errors::RetrievalError;
use crate::source::CaptionSource;
use crate::video_id::VideoId;

pub fn entry(text: &str, start: f64, duration: f64) -> CaptionEntry {
    CaptionEntry {
        text: text.to_string(),
        start,
        duration,
    }
}

pub fn transcript(entries: Vec<CaptionEntry>) -> Transcript {
    Transcript::new(entries).expect("test transcript must not be empty")
}

pub fn unavailable(language: &str) -> RetrievalError {
    RetrievalError::LanguageUnavailable {
        language: language.to_string(),
        available: vec!["en".to_string()],
    }
}

/// Caption source answering from a fixed script and recording every call.
/// Stages without a scripted answer fail as unavailable.
#[derive(Default)]
pub struct ScriptedSource {
    script: HashMap<Option<String>, Result<Transcript, RetrievalError>>,
    calls: Mutex<Vec<Option<String>>>,
    panics: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, language: Option<&str>, answer: Result<Transcript, RetrievalError>) -> Self {
        self.script.insert(language.map(str::to_string), answer);
        self
    }

    pub fn panicking() -> Self {
        ScriptedSource {
            panics: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaptionSource for ScriptedSource {
    async fn fetch(
        &self,
        _video_id: &VideoId,
        language: Option<&str>,
    ) -> Result<Transcript, RetrievalError> {
        if self.panics {
            panic!("caption source blew up");
        }
        let key = language.map(str::to_string);
        self.calls.lock().unwrap().push(key.clone());
        self.script
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(unavailable(language.unwrap_or("any"))))
    }
}
