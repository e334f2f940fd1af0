// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Utility functions for the overlay library

/// Pluralize a count for summaries, e.g. `3 frames`, `1 bone`.
#[must_use]
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        return format!("{count} {word}");
    }
    let plural = if word.ends_with('s') || word.ends_with("ch") || word.ends_with("sh") {
        format!("{word}es")
    } else if word.ends_with('y') && !word.ends_with("ey") && !word.ends_with("ay") {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{word}s")
    };
    format!("{count} {plural}")
}

/// Format a timeline position as `m:ss.mmm`.
#[must_use]
pub fn format_timestamp(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "frame"), "1 frame");
        assert_eq!(pluralize(0, "bone"), "0 bones");
        assert_eq!(pluralize(2, "match"), "2 matches");
        assert_eq!(pluralize(3, "body"), "3 bodies");
        assert_eq!(pluralize(4, "key"), "4 keys");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "0:00.000");
        assert_eq!(format_timestamp(1_500), "0:01.500");
        assert_eq!(format_timestamp(83_042), "1:23.042");
    }
}
