use url::Url;

/// One named, timed segment of an episode.
///
/// `index` is the record's position in the unfiltered chapter list and is
/// assigned by the store when a resolved list is committed, so two records
/// with identical titles and windows still compare distinct.
///
/// Start and duration are seconds from the top of the episode. Both are
/// expected to be non-negative; overlapping windows are tolerated and
/// resolved by first match in ascending order at query time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChapterRecord {
    pub index: usize,
    pub title: String,
    pub start: f64,
    pub duration: f64,
    /// Hidden chapters are excluded from display and navigation.
    pub is_hidden: bool,
    /// Cleared when the user deselects the chapter for playback.
    pub should_play: bool,
    pub image: Option<Url>,
}

impl ChapterRecord {
    pub fn new(title: impl Into<String>, start: f64, duration: f64) -> Self {
        ChapterRecord {
            index: 0,
            title: title.into(),
            start,
            duration,
            is_hidden: false,
            should_play: true,
            image: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.is_hidden
    }

    pub fn is_playable(&self) -> bool {
        !self.is_hidden && self.should_play
    }

    /// Whether `time` falls within this chapter's half-open window
    /// `[start, start + duration)`.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.start + self.duration
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// The chapter whose window contains the last-queried playback time,
/// if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentChapter {
    chapter: Option<ChapterRecord>,
}

impl CurrentChapter {
    pub fn none() -> Self {
        CurrentChapter { chapter: None }
    }

    pub fn chapter(&self) -> Option<&ChapterRecord> {
        self.chapter.as_ref()
    }

    /// The selected chapter, but only when it is not hidden. Navigation and
    /// progress display operate on the visible subset and go through this
    /// accessor.
    pub fn visible_chapter(&self) -> Option<&ChapterRecord> {
        self.chapter.as_ref().filter(|c| c.is_visible())
    }

    pub fn is_empty(&self) -> bool {
        self.chapter.is_none()
    }
}

impl From<Option<ChapterRecord>> for CurrentChapter {
    fn from(chapter: Option<ChapterRecord>) -> Self {
        CurrentChapter { chapter }
    }
}

impl From<ChapterRecord> for CurrentChapter {
    fn from(chapter: ChapterRecord) -> Self {
        CurrentChapter {
            chapter: Some(chapter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playable_requires_visible_and_selected() {
        let mut chapter = ChapterRecord::new("Intro", 0.0, 30.0);
        assert!(chapter.is_playable());

        chapter.should_play = false;
        assert!(!chapter.is_playable());
        assert!(chapter.is_visible());

        chapter.should_play = true;
        chapter.is_hidden = true;
        assert!(!chapter.is_playable());
        assert!(!chapter.is_visible());
    }

    #[test]
    fn contains_is_half_open() {
        let chapter = ChapterRecord::new("Intro", 10.0, 5.0);
        assert!(!chapter.contains(9.999));
        assert!(chapter.contains(10.0));
        assert!(chapter.contains(14.999));
        assert!(!chapter.contains(15.0));
    }

    #[test]
    fn hidden_selection_has_no_visible_chapter() {
        let mut chapter = ChapterRecord::new("Ad", 0.0, 30.0);
        chapter.is_hidden = true;
        let current = CurrentChapter::from(chapter);
        assert!(current.chapter().is_some());
        assert!(current.visible_chapter().is_none());
    }
}
