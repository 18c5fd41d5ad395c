//! Core data model definitions shared across Podmark crates.
#![allow(missing_docs)]

pub mod chapter;
pub mod episode;
pub mod error;
pub mod ids;
pub mod payloads;

// Intentionally curated re-exports for downstream consumers.
pub use chapter::{ChapterRecord, CurrentChapter};
pub use episode::EpisodeRef;
pub use error::{ModelError, Result as ModelResult};
pub use ids::{EpisodeId, PodcastId};
pub use payloads::{PodcastIndexChapter, PodloveChapter, parse_podlove_timestamp};
