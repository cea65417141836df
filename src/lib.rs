pub mod config;
pub mod server;
pub mod summarize;
pub mod title;
pub mod youtube;

/// A single captioned fragment
#[derive(Debug, Clone)]
pub struct Fragment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Complete caption transcript for a video
#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub language: String,
    pub fragments: Vec<Fragment>,
}

impl Transcript {
    /// Join fragment texts with a single space, preserving temporal order
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Extract the 11-character video ID from a YouTube URL.
///
/// Matches either a `v=` query parameter or a path segment immediately
/// followed by 11 identifier characters. The ID is not checked against
/// YouTube; a non-existent video fails later at transcript lookup.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    regex::Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})")
        .unwrap()
        .captures(input)
        .map(|caps| caps[1].to_string())
}
