/// Strongly typed ID for episodes.
///
/// Feed identifiers are opaque strings supplied by the directory layer, so
/// this wraps a `String` rather than imposing a UUID shape on upstream data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeId(pub String);

impl EpisodeId {
    pub fn new(id: impl Into<String>) -> Self {
        EpisodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EpisodeId {
    fn from(id: &str) -> Self {
        EpisodeId(id.to_string())
    }
}

impl From<String> for EpisodeId {
    fn from(id: String) -> Self {
        EpisodeId(id)
    }
}

impl AsRef<str> for EpisodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for podcasts (the show an episode belongs to).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PodcastId(pub String);

impl PodcastId {
    pub fn new(id: impl Into<String>) -> Self {
        PodcastId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PodcastId {
    fn from(id: &str) -> Self {
        PodcastId(id.to_string())
    }
}

impl From<String> for PodcastId {
    fn from(id: String) -> Self {
        PodcastId(id)
    }
}

impl AsRef<str> for PodcastId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PodcastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
