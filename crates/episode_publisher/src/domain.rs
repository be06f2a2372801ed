use serde::{Deserialize, Serialize};

/// Title and description for an episode. Generated by independent model
/// calls, so nothing ties their content to the script's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeMetadata {
    pub title: String,
    pub description: String,
}

/// The single POST body sent to the podcast-hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub title: String,
    pub description: String,
    /// Shortened signed URL of the uploaded audio. Empty when the
    /// shortener returned no link.
    pub audio_url: String,
    pub private: bool,
}

/// What the podcast host answered with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub status: u16,
    pub body: String,
}

/// A fully published episode.
#[derive(Debug, Clone)]
pub struct PublishedEpisode {
    /// Name of the audio blob in the container.
    pub blob_name: String,
    /// The audio URL the host was given (shortened, possibly empty).
    pub audio_url: String,
    pub receipt: PublishReceipt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_request_serializes_expected_fields() {
        let request = PublishRequest {
            title: "Ep1".into(),
            description: "Desc1".into(),
            audio_url: "https://sho.rt/abc".into(),
            private: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["title"], "Ep1");
        assert_eq!(json["description"], "Desc1");
        assert_eq!(json["audio_url"], "https://sho.rt/abc");
        assert_eq!(json["private"], false);
        assert_eq!(json.as_object().unwrap().len(), 4);
    }
}
