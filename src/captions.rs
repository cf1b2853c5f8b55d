use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One timed text segment. Offsets are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Caption entries in playback order. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Transcript(Vec<CaptionEntry>);

impl Transcript {
    /// Returns `None` for an empty entry list.
    pub fn new(entries: Vec<CaptionEntry>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Transcript(entries))
        }
    }

    pub fn entries(&self) -> &[CaptionEntry] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Transcript {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<CaptionEntry>::deserialize(deserializer)?;
        Transcript::new(entries).ok_or_else(|| de::Error::custom("transcript has no caption entries"))
    }
}
