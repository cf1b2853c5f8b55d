use std::fmt;

use url::Url;

use crate::errors::CaptionError;

/// Opaque key accepted by the caption source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Accepts a YouTube URL or a bare identifier. Anything that is not a
    /// recognised YouTube URL is passed through trimmed.
    pub fn parse(input: &str) -> Result<Self, CaptionError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CaptionError::MissingIdentifier);
        }

        let id = parse_url(input)
            .and_then(|url| youtube_video_id(&url))
            .unwrap_or_else(|| input.to_string());
        Ok(VideoId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_url(input: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(input) {
        return Some(url);
    }
    // "youtube.com/watch?v=..." pasted without a scheme
    let lower = input.to_ascii_lowercase();
    let scheme_less = ["youtube.com/", "www.youtube.com/", "m.youtube.com/", "youtu.be/"];
    if scheme_less.iter().any(|prefix| lower.starts_with(prefix)) {
        return Url::parse(&format!("https://{input}")).ok();
    }
    None
}

fn is_youtube_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "youtube.com" || host == "youtu.be" || host.ends_with(".youtube.com")
}

fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if !is_youtube_host(host) {
        return None;
    }

    let mut segments = url.path_segments()?;
    let first = segments.next().unwrap_or("");

    if host.eq_ignore_ascii_case("youtu.be") {
        return non_empty(first);
    }

    match first {
        "watch" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| non_empty(&value)),
        "embed" | "shorts" | "live" => segments.next().and_then(non_empty),
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
