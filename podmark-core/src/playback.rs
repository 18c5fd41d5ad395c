/// Boundary to the playback collaborator. The resolver asks for the current
/// position once per commit to seed the current-chapter selection; ongoing
/// position updates arrive through [`crate::ChapterResolver::update_current_chapter`].
pub trait PlaybackCursor: Send + Sync {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
}
