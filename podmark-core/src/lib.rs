//! # Podmark Core
//!
//! Chapter acquisition and playback chapter tracking for the Podmark
//! ecosystem.
//!
//! ## Overview
//!
//! Given a playable episode, this crate resolves its table of chapters from
//! competing sources and keeps track of which chapter is current as playback
//! advances:
//!
//! - **Embedded chapters**: parsed from the downloaded file or the remote
//!   media URL through the [`source::ChapterSource`] capability
//! - **External chapters**: podcast-index or podlove style payloads obtained
//!   through the [`provider::ShowInfoProvider`] capability
//! - **Prioritization**: embedded chapters win outright (they may reflect
//!   dynamically inserted ads); otherwise podcast-index payloads take
//!   precedence over podlove payloads
//! - **Race safety**: results for an episode that is no longer the most
//!   recently requested one are discarded at commit time
//!
//! ## Architecture
//!
//! - [`store`]: owns the authoritative chapter list and answers positional
//!   and navigational queries
//! - [`resolver`]: orchestrates the multi-source fetch-and-prioritize
//!   protocol and commits into the store
//! - [`events`]: fire-and-forget "chapters updated" broadcast; consumers
//!   re-query the store
//! - [`playback`]: the playback-position collaborator boundary

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Engine configuration
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// Chapter change notifications
pub mod events;

/// Playback position collaborator boundary
pub mod playback;

/// External show-info chapter provider
pub mod provider;

/// Multi-source chapter resolution
pub mod resolver;

/// Chapter source parsing capability
pub mod source;

/// Authoritative chapter list and positional queries
pub mod store;

pub use config::ChapterConfig;
pub use error::{ChapterError, Result};
pub use events::{ChapterEvent, ChapterEvents};
pub use playback::PlaybackCursor;
pub use provider::{ExternalChapters, HttpShowInfoProvider, ShowInfoProvider};
pub use resolver::ChapterResolver;
pub use source::ChapterSource;
pub use store::ChapterStore;
