//! DedupQueue : playlist cyclique sans doublons
//!
//! The queue is the only mutable playlist state. Tracks keep their insertion
//! order, a track URL is never stored twice, and a cursor marks the track
//! being played. Once the last track has played, playback wraps to the first.

use crate::error::QueueError;
use indexmap::IndexSet;
use pmoresolver::ResolvedTrack;
use serde::Serialize;

/// Ordered, duplicate-free set of resolved tracks with a playback cursor
///
/// Invariants:
/// - no two tracks are equal
/// - `cursor < len()` whenever the queue is not empty, and `0` otherwise
#[derive(Debug, Clone, Default)]
pub struct DedupQueue {
    tracks: IndexSet<ResolvedTrack>,
    cursor: usize,
}

/// Read-only view of the queue, for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistSnapshot {
    pub tracks: Vec<ResolvedTrack>,
    pub cursor: usize,
}

impl PlaylistSnapshot {
    /// Track under the cursor, if any
    pub fn current(&self) -> Option<&ResolvedTrack> {
        self.tracks.get(self.cursor)
    }

    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl DedupQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track unless it is already queued
    ///
    /// Returns `false`, leaving the queue untouched, for a duplicate. The
    /// cursor never moves on insert: the first track lands under cursor `0`.
    pub fn insert(&mut self, track: ResolvedTrack) -> bool {
        let inserted = self.tracks.insert(track);
        if inserted {
            tracing::trace!("Queued track #{}", self.tracks.len());
        }
        inserted
    }

    /// Move to the next track, wrapping after the last one
    ///
    /// Fails with [`QueueError::EmptyQueue`] when nothing is queued; callers
    /// must check [`is_empty`](Self::is_empty) before offering playback.
    pub fn advance(&mut self) -> Result<&ResolvedTrack, QueueError> {
        if self.tracks.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        self.cursor = (self.cursor + 1) % self.tracks.len();
        self.tracks
            .get_index(self.cursor)
            .ok_or(QueueError::EmptyQueue)
    }

    /// Track under the cursor, or `None` while idle
    pub fn current(&self) -> Option<&ResolvedTrack> {
        self.tracks.get_index(self.cursor)
    }

    pub fn contains(&self, track: &ResolvedTrack) -> bool {
        self.tracks.contains(track)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Tracks in playback order
    pub fn tracks(&self) -> impl Iterator<Item = &ResolvedTrack> {
        self.tracks.iter()
    }

    pub fn snapshot(&self) -> PlaylistSnapshot {
        PlaylistSnapshot {
            tracks: self.tracks.iter().cloned().collect(),
            cursor: self.cursor,
        }
    }
}
