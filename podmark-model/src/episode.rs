use std::collections::BTreeSet;
use std::path::PathBuf;

use url::Url;

use crate::ids::{EpisodeId, PodcastId};

/// Descriptor for a playable episode as handed over by the playback
/// collaborator. Carries just enough to locate chapter sources: an optional
/// downloaded file, an optional remote media URL, and the user's recorded
/// chapter deselections as a comma-delimited index list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeRef {
    pub id: EpisodeId,
    pub podcast_id: PodcastId,
    pub downloaded_path: Option<PathBuf>,
    pub stream_url: Option<Url>,
    pub deselected_chapters: Option<String>,
}

impl EpisodeRef {
    pub fn new(id: impl Into<EpisodeId>, podcast_id: impl Into<PodcastId>) -> Self {
        EpisodeRef {
            id: id.into(),
            podcast_id: podcast_id.into(),
            downloaded_path: None,
            stream_url: None,
            deselected_chapters: None,
        }
    }

    /// Parses the stored deselection list. Entries that are not valid
    /// integers are skipped rather than treated as an error.
    pub fn deselected_chapter_indices(&self) -> BTreeSet<usize> {
        self.deselected_chapters
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .filter_map(|part| part.trim().parse::<usize>().ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deselected_indices_parse_leniently() {
        let mut episode = EpisodeRef::new("ep-1", "pod-1");
        assert!(episode.deselected_chapter_indices().is_empty());

        episode.deselected_chapters = Some("1,3".to_string());
        let indices: Vec<usize> = episode.deselected_chapter_indices().into_iter().collect();
        assert_eq!(indices, vec![1, 3]);

        episode.deselected_chapters = Some(" 2 ,junk,,4".to_string());
        let indices: Vec<usize> = episode.deselected_chapter_indices().into_iter().collect();
        assert_eq!(indices, vec![2, 4]);
    }
}
