use log::{debug, warn};
use serde::Deserialize;

/// Placeholder returned whenever the title lookup fails
pub const UNKNOWN_TITLE: &str = "Unknown Title";

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
}

/// Resolves video titles via YouTube's public oEmbed endpoint (no auth needed)
pub struct TitleResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl TitleResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: OEMBED_ENDPOINT.to_string(),
        }
    }

    /// Look up the video title. Failures degrade to "Unknown Title";
    /// title resolution is never fatal to the request.
    pub async fn resolve(&self, video_id: &str) -> String {
        match self.fetch(video_id).await {
            Ok(title) => title,
            Err(e) => {
                warn!("Title lookup failed for {video_id}: {e}");
                UNKNOWN_TITLE.to_string()
            }
        }
    }

    async fn fetch(&self, video_id: &str) -> Result<String, reqwest::Error> {
        let url = format!(
            "{}?url=https://www.youtube.com/watch?v={video_id}&format=json",
            self.endpoint
        );
        debug!("Fetching oEmbed metadata: {url}");

        let resp: OEmbedResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oembed_response() {
        let json = r#"{"title": "Never Gonna Give You Up", "author_name": "Rick Astley", "type": "video"}"#;
        let resp: OEmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.title, "Never Gonna Give You Up");
    }

    #[test]
    fn test_parse_oembed_response_missing_title() {
        let json = r#"{"author_name": "someone"}"#;
        assert!(serde_json::from_str::<OEmbedResponse>(json).is_err());
    }

    #[tokio::test]
    async fn test_resolve_degrades_to_placeholder() {
        // Port 1 on loopback refuses immediately; the lookup must not error out
        let resolver = TitleResolver {
            client: reqwest::Client::new(),
            endpoint: "http://127.0.0.1:1/oembed".to_string(),
        };
        assert_eq!(resolver.resolve("dQw4w9WgXcQ").await, UNKNOWN_TITLE);
    }
}
