use serde::{Deserialize, Serialize};

/// Engine configuration supplied by the embedding application.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterConfig {
    /// Opt-in toggle for externally sourced chapters. When disabled the
    /// resolver only consults the embedded (local or remote file) source.
    pub external_chapters_enabled: bool,
}

impl ChapterConfig {
    pub fn with_external_chapters() -> Self {
        ChapterConfig {
            external_chapters_enabled: true,
        }
    }
}
