use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::errors::CaptionError;
use crate::formatter::format_transcript;
use crate::source::CaptionSource;
use crate::store::CaptionStore;
use crate::transcript::TranscriptService;
use crate::video_id::VideoId;

pub const PROMPT: &str = "Enter YouTube URL or video ID (or 'q' to quit): ";

/// Resolves one video and writes its captions to the store, reporting
/// progress and failures on `out`.
pub async fn process_video<S, W>(
    service: &TranscriptService<S>,
    store: &CaptionStore,
    input: &str,
    out: &mut W,
) -> Result<PathBuf, CaptionError>
where
    S: CaptionSource,
    W: Write,
{
    let result = save_captions(service, store, input, out).await;
    if let Err(e) = &result {
        log::error!("Failed to process {:?}: {}", input.trim(), e);
        print_line(out, &format!("Error: {}", e));
    }
    result
}

async fn save_captions<S, W>(
    service: &TranscriptService<S>,
    store: &CaptionStore,
    input: &str,
    out: &mut W,
) -> Result<PathBuf, CaptionError>
where
    S: CaptionSource,
    W: Write,
{
    let video_id = VideoId::parse(input)?;
    print_line(out, &format!("Processing video ID: {}", video_id));

    let resolution = service.fetch_video(&video_id).await?;
    match &resolution.language {
        Some(language) => print_line(out, &format!("Found captions for language '{}'", language)),
        None => print_line(out, "Found captions in another language"),
    }

    let path = store.save(&video_id, &resolution.transcript).await?;
    print_line(out, &format!("Captions saved to: {}", path.display()));
    Ok(path)
}

/// Reads one URL or id per line until `q` or end of input. A failing video
/// is reported and the loop moves on.
pub async fn run_interactive<S, R, W>(
    service: &TranscriptService<S>,
    store: &CaptionStore,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    S: CaptionSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "YouTube Caption Processor")?;
    writeln!(out, "------------------------")?;

    let mut lines = input.lines();
    loop {
        write!(out, "\n{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let _ = process_video(service, store, line, out).await;
    }

    Ok(())
}

/// Prints a previously saved transcript.
pub async fn show_saved<W: Write>(
    store: &CaptionStore,
    input: &str,
    out: &mut W,
) -> Result<(), CaptionError> {
    let video_id = VideoId::parse(input)?;
    let transcript = store.load(&video_id).await?;
    for line in format_transcript(&transcript) {
        print_line(out, &line);
    }
    Ok(())
}

fn print_line<W: Write>(out: &mut W, line: &str) {
    if let Err(e) = writeln!(out, "{}", line) {
        log::warn!("Failed to write to console: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RetrievalError;
    use crate::resolver::LanguagePreferences;
    use crate::testing::{entry, transcript, ScriptedSource};

    fn service(source: ScriptedSource) -> TranscriptService<ScriptedSource> {
        TranscriptService::new(source, LanguagePreferences::new(["hi", "hi-IN"]))
    }

    #[tokio::test]
    async fn test_process_video_saves_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaptionStore::new(dir.path());
        let source = ScriptedSource::new().on(Some("hi-IN"), Ok(transcript(vec![entry("a", 0.0, 1.0)])));
        let mut out = Vec::new();

        let path = process_video(&service(source), &store, "https://youtu.be/HQoJMIgNdjo", &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Processing video ID: HQoJMIgNdjo"));
        assert!(printed.contains("Found captions for language 'hi-IN'"));
        assert!(printed.contains(&format!("Captions saved to: {}", path.display())));
        assert_eq!(
            store.load(&VideoId::parse("HQoJMIgNdjo").unwrap()).await.unwrap(),
            transcript(vec![entry("a", 0.0, 1.0)])
        );
    }

    #[tokio::test]
    async fn test_process_video_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaptionStore::new(dir.path());
        let source = ScriptedSource::new().on(
            None,
            Err(RetrievalError::Source("Transcript is disabled on this video".to_string())),
        );
        let mut out = Vec::new();

        let err = process_video(&service(source), &store, "abc", &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, CaptionError::NoCaptionsAvailable(_)));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Error: no captions available for abc: Transcript is disabled on this video"));
        assert!(!store.path_for(&VideoId::parse("abc").unwrap()).exists());
    }

    #[tokio::test]
    async fn test_interactive_loop_continues_after_failure_and_stops_on_q() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaptionStore::new(dir.path());
        let source = ScriptedSource::new().on(None, Ok(transcript(vec![entry("hello", 0.0, 1.0)])));
        let service = service(source);
        let input: &[u8] = b"\n   \nfirst\nsecond\nQ\nnever\n";
        let mut out = Vec::new();

        run_interactive(&service, &store, input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("YouTube Caption Processor"));
        assert!(printed.contains("Processing video ID: first"));
        assert!(printed.contains("Processing video ID: second"));
        assert!(!printed.contains("never"));
        assert!(store.path_for(&VideoId::parse("first").unwrap()).exists());
        assert!(store.path_for(&VideoId::parse("second").unwrap()).exists());
    }

    #[tokio::test]
    async fn test_interactive_loop_ends_at_eof() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaptionStore::new(dir.path());
        let input: &[u8] = b"missing";
        let mut out = Vec::new();

        run_interactive(&service(ScriptedSource::new()), &store, input, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Error: no captions available for missing"));
        assert_eq!(printed.matches(PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn test_show_saved_prints_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = CaptionStore::new(dir.path());
        let video_id = VideoId::parse("abc").unwrap();
        store
            .save(&video_id, &transcript(vec![entry("a", 0.0, 1.0), entry("b", 75.0, 1.0)]))
            .await
            .unwrap();
        let mut out = Vec::new();

        show_saved(&store, "abc", &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "[00:00] a\n[01:15] b\n");
    }
}
