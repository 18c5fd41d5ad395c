use std::path::Path;

use async_trait::async_trait;
use podmark_model::{
    ChapterRecord, ModelResult, PodcastIndexChapter, PodloveChapter, parse_podlove_timestamp,
};
use url::Url;

use crate::error::Result;

/// Capability for turning chapter sources into normalized chapter records.
///
/// The file-based methods cover chapters embedded in or alongside the media
/// itself (ID3 chapter frames, MP4 chapter tracks and the like); their codec
/// internals live behind this trait. The payload methods convert
/// already-structured provider payloads and come with default
/// implementations.
///
/// Every method may fail; callers treat a failure as an empty result for
/// that source.
#[async_trait]
pub trait ChapterSource: Send + Sync {
    /// Parse chapters from a downloaded media file.
    async fn parse_local_file(
        &self,
        path: &Path,
        episode_duration: f64,
    ) -> Result<Vec<ChapterRecord>>;

    /// Parse chapters from a remote media URL.
    async fn parse_remote_file(
        &self,
        url: &Url,
        episode_duration: f64,
    ) -> Result<Vec<ChapterRecord>>;

    /// Convert a podcast-index style payload into chapter records.
    fn parse_podcast_index(
        &self,
        payload: &[PodcastIndexChapter],
        episode_duration: f64,
    ) -> Result<Vec<ChapterRecord>> {
        Ok(podcast_index_chapters(payload, episode_duration))
    }

    /// Convert a podlove style payload into chapter records.
    fn parse_podlove(
        &self,
        payload: &[PodloveChapter],
        episode_duration: f64,
    ) -> Result<Vec<ChapterRecord>> {
        Ok(podlove_chapters(payload, episode_duration)?)
    }
}

/// Builds records from a podcast-index payload. Records are sorted by start
/// time; a chapter's duration comes from its explicit end time when present,
/// otherwise from the next chapter's start, otherwise from the episode
/// duration. `toc == false` marks the chapter hidden.
pub fn podcast_index_chapters(
    payload: &[PodcastIndexChapter],
    episode_duration: f64,
) -> Vec<ChapterRecord> {
    let mut sorted: Vec<&PodcastIndexChapter> = payload.iter().collect();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut records = Vec::with_capacity(sorted.len());
    for (position, chapter) in sorted.iter().enumerate() {
        let start = chapter.start_time.max(0.0);
        let next_start = sorted.get(position + 1).map(|c| c.start_time.max(0.0));
        let end = chapter
            .end_time
            .filter(|end| *end > start)
            .or(next_start)
            .unwrap_or(episode_duration);

        let mut record = ChapterRecord::new(
            chapter.title.clone().unwrap_or_default(),
            start,
            (end - start).max(0.0),
        );
        record.is_hidden = chapter.toc == Some(false);
        record.image = chapter.img.as_deref().and_then(|raw| Url::parse(raw).ok());
        records.push(record);
    }

    records
}

/// Builds records from a podlove payload. A single malformed timestamp fails
/// the whole payload so a partially-garbled chapter table never reaches the
/// store.
pub fn podlove_chapters(
    payload: &[PodloveChapter],
    episode_duration: f64,
) -> ModelResult<Vec<ChapterRecord>> {
    let mut sorted = payload
        .iter()
        .map(|chapter| Ok((parse_podlove_timestamp(&chapter.start)?.max(0.0), chapter)))
        .collect::<ModelResult<Vec<(f64, &PodloveChapter)>>>()?;
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut records = Vec::with_capacity(sorted.len());
    for (position, (start, chapter)) in sorted.iter().enumerate() {
        let end = sorted
            .get(position + 1)
            .map(|(next_start, _)| *next_start)
            .unwrap_or(episode_duration);

        let mut record = ChapterRecord::new(
            chapter.title.clone().unwrap_or_default(),
            *start,
            (end - start).max(0.0),
        );
        record.image = chapter
            .image
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok());
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_chapter(start: f64) -> PodcastIndexChapter {
        PodcastIndexChapter {
            start_time: start,
            end_time: None,
            title: None,
            img: None,
            url: None,
            toc: None,
        }
    }

    #[test]
    fn podcast_index_durations_come_from_neighbors_and_episode_end() {
        let payload = vec![
            PodcastIndexChapter {
                title: Some("Intro".to_string()),
                ..index_chapter(0.0)
            },
            PodcastIndexChapter {
                title: Some("Main".to_string()),
                end_time: Some(500.0),
                ..index_chapter(60.0)
            },
            PodcastIndexChapter {
                title: Some("Outro".to_string()),
                ..index_chapter(1700.0)
            },
        ];

        let records = podcast_index_chapters(&payload, 1800.0);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].duration, 60.0);
        // Explicit end time beats the next chapter's start.
        assert_eq!(records[1].duration, 440.0);
        assert_eq!(records[2].duration, 100.0);
    }

    #[test]
    fn podcast_index_sorts_and_clamps() {
        let payload = vec![index_chapter(120.0), index_chapter(-3.0)];
        let records = podcast_index_chapters(&payload, 100.0);
        assert_eq!(records[0].start, 0.0);
        assert_eq!(records[0].duration, 120.0);
        // Episode duration shorter than the last start floors at zero.
        assert_eq!(records[1].start, 120.0);
        assert_eq!(records[1].duration, 0.0);
    }

    #[test]
    fn podcast_index_toc_false_hides_chapter() {
        let payload = vec![
            PodcastIndexChapter {
                toc: Some(false),
                ..index_chapter(0.0)
            },
            PodcastIndexChapter {
                toc: Some(true),
                ..index_chapter(30.0)
            },
        ];
        let records = podcast_index_chapters(&payload, 60.0);
        assert!(records[0].is_hidden);
        assert!(!records[1].is_hidden);
    }

    #[test]
    fn podlove_parses_timestamps_and_infers_durations() {
        let payload = vec![
            PodloveChapter {
                start: "00:00:00".to_string(),
                title: Some("Intro".to_string()),
                href: None,
                image: None,
            },
            PodloveChapter {
                start: "00:02:30.500".to_string(),
                title: Some("Topic".to_string()),
                href: None,
                image: None,
            },
        ];

        let records = podlove_chapters(&payload, 600.0).unwrap();
        assert_eq!(records[0].start, 0.0);
        assert_eq!(records[0].duration, 150.5);
        assert_eq!(records[1].start, 150.5);
        assert_eq!(records[1].duration, 449.5);
    }

    #[test]
    fn podlove_rejects_payload_with_bad_timestamp() {
        let payload = vec![
            PodloveChapter {
                start: "00:00:00".to_string(),
                title: None,
                href: None,
                image: None,
            },
            PodloveChapter {
                start: "not a time".to_string(),
                title: None,
                href: None,
                image: None,
            },
        ];
        assert!(podlove_chapters(&payload, 600.0).is_err());
    }
}
