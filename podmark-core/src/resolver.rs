use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use podmark_model::{ChapterRecord, CurrentChapter, EpisodeId, EpisodeRef};
use tokio::sync::broadcast;

use crate::config::ChapterConfig;
use crate::events::{ChapterEvent, ChapterEvents};
use crate::playback::PlaybackCursor;
use crate::provider::{ExternalChapters, ShowInfoProvider};
use crate::source::ChapterSource;
use crate::store::ChapterStore;

/// Resolves the chapter list for a requested episode from competing sources
/// and tracks the current chapter during playback.
///
/// Source priority: embedded chapters (local file, else remote media URL)
/// win outright; otherwise a podcast-index payload, otherwise a podlove
/// payload, otherwise no chapters. A failed external-provider lookup falls
/// back to the embedded result; a failed per-source parse counts as an empty
/// result for that source.
///
/// Concurrent loads are not deduplicated. Each load records its episode id
/// as the latest request up front, and a completing load re-checks that id
/// immediately before mutating the store, so whichever episode was requested
/// last wins regardless of completion order.
pub struct ChapterResolver {
    source: Arc<dyn ChapterSource>,
    show_info: Arc<dyn ShowInfoProvider>,
    cursor: Arc<dyn PlaybackCursor>,
    config: ChapterConfig,
    events: ChapterEvents,
    chapters_skipped: AtomicUsize,
    inner: RwLock<ResolverState>,
}

#[derive(Default)]
struct ResolverState {
    store: ChapterStore,
    last_episode_id: Option<EpisodeId>,
}

impl ChapterResolver {
    pub fn new(
        source: Arc<dyn ChapterSource>,
        show_info: Arc<dyn ShowInfoProvider>,
        cursor: Arc<dyn PlaybackCursor>,
        config: ChapterConfig,
    ) -> Self {
        Self {
            source,
            show_info,
            cursor,
            config,
            events: ChapterEvents::default(),
            chapters_skipped: AtomicUsize::new(0),
            inner: RwLock::new(ResolverState::default()),
        }
    }

    /// Subscribes to the "chapters updated" signal emitted on every
    /// committed replace or clear.
    pub fn subscribe(&self) -> broadcast::Receiver<ChapterEvent> {
        self.events.subscribe()
    }

    /// Resolves chapters for `episode` and commits them unless a newer load
    /// request superseded this one in the meantime. Never fails: every
    /// source error degrades to "fewer or no chapters".
    pub async fn load_chapters(&self, episode: &EpisodeRef, duration: f64) {
        self.inner.write().last_episode_id = Some(episode.id.clone());

        let chapters = if self.config.external_chapters_enabled {
            self.resolve_all_sources(episode, duration).await
        } else {
            self.embedded_chapters(episode, duration).await
        };

        self.commit(episode, chapters);
    }

    /// Fan-out to the embedded and external lookups, then prioritize.
    async fn resolve_all_sources(
        &self,
        episode: &EpisodeRef,
        duration: f64,
    ) -> Vec<ChapterRecord> {
        let embedded = self.embedded_chapters(episode, duration);
        let external = self
            .show_info
            .load_chapters(&episode.podcast_id, &episode.id);
        let (embedded, external) = tokio::join!(embedded, external);

        // Embedded chapters win even when external payloads exist: for some
        // shows they account for dynamically inserted ads.
        if !embedded.is_empty() {
            return embedded;
        }

        match external {
            Ok(payloads) => self.external_chapters(payloads, duration),
            Err(error) => {
                tracing::warn!(
                    episode = %episode.id,
                    error = %error,
                    "external chapter lookup failed, keeping embedded result"
                );
                embedded
            }
        }
    }

    /// Local file if downloaded, else remote media URL, else no chapters.
    async fn embedded_chapters(&self, episode: &EpisodeRef, duration: f64) -> Vec<ChapterRecord> {
        if let Some(path) = &episode.downloaded_path {
            match self.source.parse_local_file(path, duration).await {
                Ok(chapters) => chapters,
                Err(error) => {
                    tracing::warn!(episode = %episode.id, error = %error, "local chapter parse failed");
                    Vec::new()
                }
            }
        } else if let Some(url) = &episode.stream_url {
            match self.source.parse_remote_file(url, duration).await {
                Ok(chapters) => chapters,
                Err(error) => {
                    tracing::warn!(episode = %episode.id, error = %error, "remote chapter parse failed");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        }
    }

    /// Podcast-index payloads take precedence over podlove payloads. A
    /// payload that fails to parse leaves the external branch empty.
    fn external_chapters(&self, payloads: ExternalChapters, duration: f64) -> Vec<ChapterRecord> {
        if let Some(podcast_index) = payloads.podcast_index {
            match self.source.parse_podcast_index(&podcast_index, duration) {
                Ok(chapters) => chapters,
                Err(error) => {
                    tracing::warn!(error = %error, "podcast-index payload parse failed");
                    Vec::new()
                }
            }
        } else if let Some(podlove) = payloads.podlove {
            match self.source.parse_podlove(&podlove, duration) {
                Ok(chapters) => chapters,
                Err(error) => {
                    tracing::warn!(error = %error, "podlove payload parse failed");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        }
    }

    /// Staleness check and store mutation under one write guard, so a result
    /// can never land between a newer request's token write and its commit.
    fn commit(&self, episode: &EpisodeRef, chapters: Vec<ChapterRecord>) {
        {
            let mut inner = self.inner.write();
            if inner.last_episode_id.as_ref() != Some(&episode.id) {
                tracing::debug!(episode = %episode.id, "discarding superseded chapter result");
                return;
            }

            inner.store.replace_chapters(chapters);
            let deselected = episode.deselected_chapter_indices();
            if !deselected.is_empty() {
                inner.store.apply_deselection(&deselected);
            }
            inner.store.update_current_chapter(self.cursor.current_time());
        }

        self.events.publish(ChapterEvent::ChaptersUpdated);
    }

    /// Recomputes the current chapter for a new playback position. Returns
    /// whether the selection changed.
    pub fn update_current_chapter(&self, time: f64) -> bool {
        self.inner.write().store.update_current_chapter(time)
    }

    /// Resets the store and forgets the latest requested episode, so any
    /// still-in-flight result is discarded on completion.
    pub fn clear(&self) {
        {
            let mut inner = self.inner.write();
            inner.store.clear();
            inner.last_episode_id = None;
        }
        self.events.publish(ChapterEvent::ChaptersUpdated);
    }

    /// Whether the most recent load request targeted `episode_id`.
    pub fn have_tried_to_parse_chapters_for(&self, episode_id: &EpisodeId) -> bool {
        self.inner.read().last_episode_id.as_ref() == Some(episode_id)
    }

    pub fn current_chapter(&self) -> CurrentChapter {
        self.inner.read().store.current_chapter().clone()
    }

    pub fn chapter_for_time(&self, time: f64) -> Option<ChapterRecord> {
        self.inner.read().store.chapter_for_time(time).cloned()
    }

    pub fn visible_chapter_count(&self) -> usize {
        self.inner.read().store.visible_chapter_count()
    }

    pub fn playable_chapter_count(&self) -> usize {
        self.inner.read().store.playable_chapter_count()
    }

    pub fn chapter_at(&self, index: usize) -> Option<ChapterRecord> {
        self.inner.read().store.chapter_at(index).cloned()
    }

    pub fn playable_chapter_at(&self, index: usize) -> Option<ChapterRecord> {
        self.inner.read().store.playable_chapter_at(index).cloned()
    }

    pub fn last_visible_chapter(&self) -> Option<ChapterRecord> {
        self.inner.read().store.last_visible_chapter().cloned()
    }

    pub fn previous_visible_playable_chapter(&self) -> Option<ChapterRecord> {
        self.inner
            .read()
            .store
            .previous_visible_playable_chapter()
            .cloned()
    }

    pub fn next_visible_playable_chapter(&self) -> Option<ChapterRecord> {
        self.inner
            .read()
            .store
            .next_visible_playable_chapter()
            .cloned()
    }

    pub fn index_of_playable(&self, selection: &CurrentChapter) -> Option<usize> {
        self.inner.read().store.index_of_playable(selection)
    }

    /// Bookkeeping for the playback collaborator's auto-skip of deselected
    /// chapters.
    pub fn mark_chapter_skipped(&self) {
        self.chapters_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn chapters_skipped(&self) -> usize {
        self.chapters_skipped.load(Ordering::Relaxed)
    }
}
