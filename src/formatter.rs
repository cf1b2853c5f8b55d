use crate::captions::Transcript;

/// Renders `seconds` as `MM:SS`, or `H:MM:SS` from one hour on.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// One `[timestamp] text` line per caption entry.
pub fn format_transcript(transcript: &Transcript) -> Vec<String> {
    transcript
        .entries()
        .iter()
        .map(|entry| format!("[{}] {}", format_timestamp(entry.start), entry.text.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{entry, transcript};

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(125.5), "02:05");
        assert_eq!(format_timestamp(3725.9), "1:02:05");
    }

    #[test]
    fn test_format_timestamp_clamps_bad_values() {
        assert_eq!(format_timestamp(-3.0), "00:00");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
    }

    #[test]
    fn test_format_transcript() {
        let lines = format_transcript(&transcript(vec![
            entry("नमस्ते", 0.0, 1.0),
            entry(" second line\n", 61.2, 2.0),
        ]));

        assert_eq!(lines, vec!["[00:00] नमस्ते", "[01:01] second line"]);
    }
}
