//! External chapter-metadata payloads.
//!
//! Two provider formats are supported as fallbacks when an episode carries no
//! embedded chapters: podcast-index style chapter objects (seconds-based
//! start/end times, camelCase wire names) and podlove style chapters
//! (`hh:mm:ss.mmm` timestamp strings).

use crate::error::{ModelError, Result};

/// One chapter object from a podcast-index style payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PodcastIndexChapter {
    pub start_time: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub end_time: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub img: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
    /// `Some(false)` marks a chapter that should not appear in the table of
    /// contents; such chapters are treated as hidden.
    #[cfg_attr(feature = "serde", serde(default))]
    pub toc: Option<bool>,
}

/// One chapter object from a podlove style payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PodloveChapter {
    /// Timestamp string, e.g. `"00:02:30.500"`.
    pub start: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub href: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
}

/// Parses a podlove timestamp (`ss`, `mm:ss` or `hh:mm:ss`, each with an
/// optional fractional part) into seconds.
pub fn parse_podlove_timestamp(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let (clock, fraction) = match trimmed.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (trimmed, None),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(ModelError::InvalidTimestamp(raw.to_string()));
    }

    let mut seconds = 0.0;
    for part in &parts {
        let value: u64 = part
            .parse()
            .map_err(|_| ModelError::InvalidTimestamp(raw.to_string()))?;
        seconds = seconds * 60.0 + value as f64;
    }

    if let Some(fraction) = fraction {
        let parsed: f64 = format!("0.{fraction}")
            .parse()
            .map_err(|_| ModelError::InvalidTimestamp(raw.to_string()))?;
        seconds += parsed;
    }

    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_timestamps() {
        assert_eq!(parse_podlove_timestamp("90").unwrap(), 90.0);
        assert_eq!(parse_podlove_timestamp("02:30").unwrap(), 150.0);
        assert_eq!(parse_podlove_timestamp("01:02:03").unwrap(), 3723.0);
        assert_eq!(parse_podlove_timestamp("00:00:01.500").unwrap(), 1.5);
        assert_eq!(parse_podlove_timestamp(" 00:10 ").unwrap(), 600.0);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(parse_podlove_timestamp("").is_err());
        assert!(parse_podlove_timestamp("abc").is_err());
        assert!(parse_podlove_timestamp("1:2:3:4").is_err());
        assert!(parse_podlove_timestamp("10:").is_err());
        assert!(parse_podlove_timestamp("-5").is_err());
    }
}
