use std::collections::BTreeSet;

use podmark_model::{ChapterRecord, CurrentChapter};

/// Owns the authoritative chapter list for the currently loaded episode and
/// answers positional and navigational queries.
///
/// The visible and playable subsets are recomputed synchronously by every
/// state transition (`replace_chapters`, `apply_deselection`, `clear`), never
/// lazily, so queries can never observe a torn intermediate state. Queries
/// themselves take `&self` and perform no I/O.
#[derive(Debug, Default)]
pub struct ChapterStore {
    chapters: Vec<ChapterRecord>,
    /// Indices into `chapters` for records with `is_hidden == false`.
    visible: Vec<usize>,
    /// Indices into `chapters` for records that are visible and selected.
    playable: Vec<usize>,
    current: CurrentChapter,
    last_time: f64,
}

impl ChapterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the chapter list wholesale, assigning each record its
    /// position in the unfiltered list, and recomputes the derived subsets
    /// and the current selection for the last known playback time. An empty
    /// list is valid and means "no chapters".
    pub fn replace_chapters(&mut self, mut chapters: Vec<ChapterRecord>) {
        for (position, chapter) in chapters.iter_mut().enumerate() {
            chapter.index = position;
        }
        self.chapters = chapters;
        self.recompute_subsets();
        self.update_current_chapter(self.last_time);
    }

    /// Marks the chapters at the given unfiltered indices as deselected.
    /// Out-of-range indices are ignored.
    pub fn apply_deselection(&mut self, indices: &BTreeSet<usize>) {
        for &index in indices {
            if let Some(chapter) = self.chapters.get_mut(index) {
                chapter.should_play = false;
            }
        }
        self.recompute_subsets();
    }

    fn recompute_subsets(&mut self) {
        self.visible = self
            .chapters
            .iter()
            .filter(|c| c.is_visible())
            .map(|c| c.index)
            .collect();
        self.playable = self
            .chapters
            .iter()
            .filter(|c| c.is_playable())
            .map(|c| c.index)
            .collect();
    }

    /// First chapter in ascending order whose window `[start, start +
    /// duration)` contains `time`. Not filtered by visibility; with
    /// overlapping windows the earliest record wins.
    pub fn chapter_for_time(&self, time: f64) -> Option<&ChapterRecord> {
        self.chapters.iter().find(|c| c.contains(time))
    }

    /// Recomputes the current selection for `time`. Returns whether the
    /// selection changed; idempotent when it did not.
    pub fn update_current_chapter(&mut self, time: f64) -> bool {
        self.last_time = time;
        let next = CurrentChapter::from(self.chapter_for_time(time).cloned());
        let changed = next != self.current;
        if changed {
            self.current = next;
        }
        changed
    }

    pub fn current_chapter(&self) -> &CurrentChapter {
        &self.current
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn visible_chapter_count(&self) -> usize {
        self.visible.len()
    }

    pub fn playable_chapter_count(&self) -> usize {
        self.playable.len()
    }

    /// Indexes into the visible subset.
    pub fn chapter_at(&self, index: usize) -> Option<&ChapterRecord> {
        self.visible.get(index).map(|&i| &self.chapters[i])
    }

    /// Indexes into the playable subset.
    pub fn playable_chapter_at(&self, index: usize) -> Option<&ChapterRecord> {
        self.playable.get(index).map(|&i| &self.chapters[i])
    }

    pub fn last_visible_chapter(&self) -> Option<&ChapterRecord> {
        self.visible.last().map(|&i| &self.chapters[i])
    }

    /// Nearest playable chapter before the current visible selection, or
    /// `None` when the selection is empty, hidden, no longer in the list, or
    /// nothing playable precedes it.
    pub fn previous_visible_playable_chapter(&self) -> Option<&ChapterRecord> {
        let current = self.current.visible_chapter()?;
        let position = self.visible.iter().position(|&i| i == current.index)?;
        self.visible[..position]
            .iter()
            .rev()
            .map(|&i| &self.chapters[i])
            .find(|c| c.is_playable())
    }

    /// Nearest playable chapter after the current visible selection.
    pub fn next_visible_playable_chapter(&self) -> Option<&ChapterRecord> {
        let current = self.current.visible_chapter()?;
        let position = self.visible.iter().position(|&i| i == current.index)?;
        self.visible[position + 1..]
            .iter()
            .map(|&i| &self.chapters[i])
            .find(|c| c.is_playable())
    }

    /// Position of a visible selection within the playable subset, used for
    /// progress display. `None` when the selection is hidden, deselected, or
    /// absent.
    pub fn index_of_playable(&self, selection: &CurrentChapter) -> Option<usize> {
        let chapter = selection.visible_chapter()?;
        self.playable.iter().position(|&i| i == chapter.index)
    }

    /// Resets to an empty list and empty selection.
    pub fn clear(&mut self) {
        self.chapters.clear();
        self.recompute_subsets();
        self.current = CurrentChapter::none();
        self.last_time = 0.0;
    }
}
