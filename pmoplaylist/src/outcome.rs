//! Per-item results of a submission
//!
//! Each parsed identifier goes `Pending -> Resolved -> Added | Duplicate`, or
//! `Pending -> Failed`. A submission whose input cannot be parsed yields a
//! single `InvalidInput` outcome instead.

use pmoresolver::{ResolvedTrack, SourceIdentifier};
use serde::Serialize;
use std::fmt;

/// Notice shown when a track joins the playlist
pub const NOTICE_ADDED: &str = "Link has been linked to playlist.";

/// Notice shown when a track is already queued
pub const NOTICE_DUPLICATE: &str = "Link is already in the playlist.";

/// Notice shown when a link cannot be resolved
pub const NOTICE_FAILED: &str = "Link invalid or try again.";

/// Classification of an outcome, for quick matching in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OutcomeKind {
    Added,
    Duplicate,
    Failed,
    InvalidInput,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::Added => "added",
            OutcomeKind::Duplicate => "duplicate",
            OutcomeKind::Failed => "failed",
            OutcomeKind::InvalidInput => "invalid_input",
        };
        f.write_str(s)
    }
}

/// Result of one submitted item (or of the whole batch for `InvalidInput`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The track joined the playlist
    ///
    /// `starts_playback` is set when this insert took the queue out of idle.
    Added {
        identifier: SourceIdentifier,
        track: ResolvedTrack,
        starts_playback: bool,
    },

    /// The track resolved fine but was already queued
    Duplicate {
        identifier: SourceIdentifier,
        track: ResolvedTrack,
    },

    /// The identifier could not be resolved
    Failed {
        identifier: SourceIdentifier,
        reason: String,
    },

    /// The input could not be parsed; nothing was processed
    InvalidInput { reason: String },
}

impl SubmissionOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            SubmissionOutcome::Added { .. } => OutcomeKind::Added,
            SubmissionOutcome::Duplicate { .. } => OutcomeKind::Duplicate,
            SubmissionOutcome::Failed { .. } => OutcomeKind::Failed,
            SubmissionOutcome::InvalidInput { .. } => OutcomeKind::InvalidInput,
        }
    }

    pub fn identifier(&self) -> Option<&SourceIdentifier> {
        match self {
            SubmissionOutcome::Added { identifier, .. }
            | SubmissionOutcome::Duplicate { identifier, .. }
            | SubmissionOutcome::Failed { identifier, .. } => Some(identifier),
            SubmissionOutcome::InvalidInput { .. } => None,
        }
    }

    pub fn track(&self) -> Option<&ResolvedTrack> {
        match self {
            SubmissionOutcome::Added { track, .. } | SubmissionOutcome::Duplicate { track, .. } => {
                Some(track)
            }
            _ => None,
        }
    }

    /// True when playback should start because of this outcome
    pub fn starts_playback(&self) -> bool {
        matches!(
            self,
            SubmissionOutcome::Added {
                starts_playback: true,
                ..
            }
        )
    }

    /// Failures and invalid input are errors; duplicates are not
    pub fn is_error(&self) -> bool {
        matches!(
            self.kind(),
            OutcomeKind::Failed | OutcomeKind::InvalidInput
        )
    }

    /// One-line user notice for this outcome
    pub fn notice(&self) -> String {
        match self {
            SubmissionOutcome::Added { .. } => NOTICE_ADDED.to_string(),
            SubmissionOutcome::Duplicate { .. } => NOTICE_DUPLICATE.to_string(),
            SubmissionOutcome::Failed { identifier, .. } => {
                format!("{} ({})", NOTICE_FAILED, identifier)
            }
            SubmissionOutcome::InvalidInput { reason } => {
                format!("Nothing to add: {}", reason)
            }
        }
    }
}
