use async_trait::async_trait;
use podmark_model::{EpisodeId, PodcastId, PodcastIndexChapter, PodloveChapter};
use serde::Deserialize;
use url::Url;

use crate::error::Result;

/// Alternate chapter payloads for one episode, as returned by the show-info
/// service. Either, both, or neither may be present.
#[derive(Debug, Clone, Default)]
pub struct ExternalChapters {
    pub podcast_index: Option<Vec<PodcastIndexChapter>>,
    pub podlove: Option<Vec<PodloveChapter>>,
}

/// Capability for looking up externally sourced chapter payloads. Unlike the
/// per-source parsers, a failure here fails the whole external branch and the
/// resolver falls back to the embedded result.
#[async_trait]
pub trait ShowInfoProvider: Send + Sync {
    async fn load_chapters(
        &self,
        podcast_id: &PodcastId,
        episode_id: &EpisodeId,
    ) -> Result<ExternalChapters>;
}

/// Show-info provider backed by the show-notes cache service.
///
/// Fetches `{base}/show_notes/full/{podcast_id}`, locates the episode by id,
/// and returns its inline chapter payloads. When the episode carries only a
/// `chapters_url`, that URL is fetched in turn (podcast-index
/// `chapters.json` shape).
#[derive(Debug, Clone)]
pub struct HttpShowInfoProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpShowInfoProvider {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn fetch_chapters_url(&self, chapters_url: &str) -> Result<Vec<PodcastIndexChapter>> {
        let url = Url::parse(chapters_url)?;
        let document: PodcastIndexDocument = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(document.chapters)
    }
}

#[async_trait]
impl ShowInfoProvider for HttpShowInfoProvider {
    async fn load_chapters(
        &self,
        podcast_id: &PodcastId,
        episode_id: &EpisodeId,
    ) -> Result<ExternalChapters> {
        let url = self
            .base_url
            .join(&format!("show_notes/full/{}", podcast_id.as_str()))?;

        let document: ShowNotesDocument = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(episode) = document
            .podcast
            .episodes
            .into_iter()
            .find(|episode| episode.uuid == episode_id.as_str())
        else {
            tracing::debug!(podcast = %podcast_id, episode = %episode_id, "episode not present in show notes");
            return Ok(ExternalChapters::default());
        };

        let (mut external, chapters_url) = extract_episode_chapters(episode);
        if external.podcast_index.is_none() {
            if let Some(chapters_url) = chapters_url {
                external.podcast_index = Some(self.fetch_chapters_url(&chapters_url).await?);
            }
        }
        Ok(external)
    }
}

/// Body of a podcast-index `chapters.json` endpoint.
#[derive(Debug, Deserialize)]
struct PodcastIndexDocument {
    #[serde(default)]
    chapters: Vec<PodcastIndexChapter>,
}

#[derive(Debug, Deserialize)]
struct ShowNotesDocument {
    podcast: ShowNotesPodcast,
}

#[derive(Debug, Deserialize)]
struct ShowNotesPodcast {
    #[serde(default)]
    episodes: Vec<ShowNotesEpisode>,
}

#[derive(Debug, Deserialize)]
struct ShowNotesEpisode {
    uuid: String,
    #[serde(default)]
    chapters: Option<Vec<PodcastIndexChapter>>,
    #[serde(default)]
    podlove_chapters: Option<Vec<PodloveChapter>>,
    #[serde(default)]
    chapters_url: Option<String>,
}

/// Splits an episode's show-notes entry into its payloads and the optional
/// follow-up chapters URL. Pure, so the document walk is testable without a
/// server.
fn extract_episode_chapters(episode: ShowNotesEpisode) -> (ExternalChapters, Option<String>) {
    (
        ExternalChapters {
            podcast_index: episode.chapters,
            podlove: episode.podlove_chapters,
        },
        episode.chapters_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_notes_document_yields_per_episode_payloads() {
        let json = r#"{
            "podcast": {
                "episodes": [
                    {
                        "uuid": "ep-1",
                        "chapters": [{"startTime": 0, "title": "Intro"}],
                        "podlove_chapters": [{"start": "00:00:00", "title": "Intro"}]
                    },
                    {
                        "uuid": "ep-2",
                        "chapters_url": "https://example.com/chapters.json"
                    }
                ]
            }
        }"#;

        let document: ShowNotesDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.podcast.episodes.len(), 2);

        let mut episodes = document.podcast.episodes.into_iter();

        let (external, chapters_url) = extract_episode_chapters(episodes.next().unwrap());
        assert!(chapters_url.is_none());
        assert_eq!(external.podcast_index.unwrap().len(), 1);
        assert_eq!(external.podlove.unwrap().len(), 1);

        let (external, chapters_url) = extract_episode_chapters(episodes.next().unwrap());
        assert!(external.podcast_index.is_none());
        assert!(external.podlove.is_none());
        assert_eq!(
            chapters_url.as_deref(),
            Some("https://example.com/chapters.json")
        );
    }

    #[test]
    fn chapters_json_document_parses() {
        let json = r#"{"chapters": [{"startTime": 10.5, "endTime": 20, "toc": false}]}"#;
        let document: PodcastIndexDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.chapters.len(), 1);
        assert_eq!(document.chapters[0].start_time, 10.5);
    }
}
