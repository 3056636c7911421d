//! YouTube URL helpers: id extraction and the embeddable playback target.

use regex::Regex;
use std::sync::OnceLock;

/// Query string appended to every embed target.
pub const EMBED_PARAMS: &str = "autoplay=1&loop=1&rel=0&modestbranding=1&playsinline=1";

/// Tried in order; the first capture of the first match wins.
const ID_PATTERNS: [&str; 2] = [
    r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)",
    r"youtube\.com/playlist\?list=([^&\n?#]+)",
];

fn id_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ID_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

/// Extract a video (or playlist) identifier from a YouTube URL.
///
/// Purely syntactic: `None` for anything that matches neither pattern.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    id_patterns()
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn is_youtube_playlist(url: &str) -> bool {
    url.contains("playlist?list=")
}

/// The URL handed to the playback surface.
///
/// Any extracted id, playlist ids included, becomes `embed/<id>`.
/// Unrecognised URLs pass through verbatim.
pub fn embed_url(url: &str) -> String {
    match extract_youtube_id(url) {
        Some(id) => format!("https://www.youtube.com/embed/{id}?{EMBED_PARAMS}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_short_and_embed_forms() {
        for url in [
            "https://www.youtube.com/watch?v=XYZ",
            "https://youtube.com/watch?v=XYZ&t=30s",
            "https://youtu.be/XYZ",
            "https://youtu.be/XYZ?si=share",
            "https://www.youtube.com/embed/XYZ#start",
            "youtube.com/watch?v=XYZ\nsecond line",
        ] {
            assert_eq!(extract_youtube_id(url).as_deref(), Some("XYZ"), "{url}");
        }
    }

    #[test]
    fn test_playlist_form() {
        let url = "https://www.youtube.com/playlist?list=PL123abc&index=2";
        assert_eq!(extract_youtube_id(url).as_deref(), Some("PL123abc"));
        assert!(is_youtube_playlist(url));
        assert!(!is_youtube_playlist("https://youtu.be/abc"));
    }

    #[test]
    fn test_video_pattern_wins_over_playlist_pattern() {
        let url = "https://www.youtube.com/watch?v=vid42&list=PL9";
        assert_eq!(extract_youtube_id(url).as_deref(), Some("vid42"));
    }

    #[test]
    fn test_unrecognised_input() {
        assert_eq!(extract_youtube_id("not a url"), None);
        assert_eq!(extract_youtube_id(""), None);
        assert_eq!(extract_youtube_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_youtube_id("https://www.youtube.com/watch?v="), None);
    }

    #[test]
    fn test_embed_url_targets() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=1ZYbU82GVz4"),
            "https://www.youtube.com/embed/1ZYbU82GVz4?autoplay=1&loop=1&rel=0&modestbranding=1&playsinline=1"
        );
        assert_eq!(
            embed_url("https://www.youtube.com/playlist?list=PLx"),
            "https://www.youtube.com/embed/PLx?autoplay=1&loop=1&rel=0&modestbranding=1&playsinline=1"
        );
        assert_eq!(embed_url("https://example.com/a.mp3"), "https://example.com/a.mp3");
    }

    #[test]
    fn test_playlist_embeds_by_list_id() {
        assert_eq!(
            embed_url("https://www.youtube.com/playlist?list=PLrain&index=3"),
            format!("https://www.youtube.com/embed/PLrain?{EMBED_PARAMS}")
        );
        assert!(!embed_url("https://www.youtube.com/playlist?list=PLrain").contains("videoseries"));
    }
}
