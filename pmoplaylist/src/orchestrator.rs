//! PlaylistOrchestrator : du texte saisi à la file de lecture
//!
//! A submission is parsed into identifiers, each identifier is resolved to a
//! stream URL, and every resolved URL is offered to the [`DedupQueue`]. The
//! caller gets back one [`SubmissionOutcome`] per identifier, in input order.
//!
//! # Example
//!
//! ```no_run
//! use pmoplaylist::PlaylistOrchestrator;
//! use pmoresolver::HttpResolver;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut playlist = PlaylistOrchestrator::new(Arc::new(HttpResolver::new()?));
//!
//! for outcome in playlist.submit(r#"[{"url":"https://youtu.be/a"},{"url":"https://youtu.be/b"}]"#).await {
//!     println!("{}", outcome.notice());
//! }
//!
//! // When the current track ends
//! if !playlist.queue().is_empty() {
//!     let next = playlist.advance()?;
//!     println!("Next: {}", next);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::QueueError;
use crate::outcome::SubmissionOutcome;
use crate::queue::{DedupQueue, PlaylistSnapshot};
use crate::source;
use futures::stream::{self, StreamExt};
use pmoresolver::{ResolutionError, ResolvedTrack, Resolver, SourceIdentifier};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default number of lookups in flight in concurrent mode
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// How the identifiers of one batch are resolved
///
/// Outcomes come back in input order in both modes, and queue inserts always
/// happen in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// One lookup at a time
    #[default]
    Sequential,
    /// Up to `max_in_flight` lookups at once
    Concurrent { max_in_flight: usize },
}

impl ResolveMode {
    pub fn concurrent() -> Self {
        ResolveMode::Concurrent {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// Owner of a playlist session
///
/// The orchestrator holds the only [`DedupQueue`] of the session; the UI
/// reads it through [`queue`](Self::queue) or [`snapshot`](Self::snapshot)
/// and moves playback forward with [`advance`](Self::advance).
pub struct PlaylistOrchestrator {
    resolver: Arc<dyn Resolver>,
    queue: DedupQueue,
    mode: ResolveMode,
}

impl PlaylistOrchestrator {
    /// Create an orchestrator with an empty queue, resolving sequentially
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            queue: DedupQueue::new(),
            mode: ResolveMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ResolveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ResolveMode) {
        self.mode = mode;
    }

    /// Submit raw user input
    ///
    /// Unparseable input yields a single `InvalidInput` outcome and leaves
    /// the queue alone. Otherwise there is one outcome per parsed
    /// identifier, in the same order; a failed item never stops the others.
    /// Nothing is retried.
    pub async fn submit(&mut self, raw: &str) -> Vec<SubmissionOutcome> {
        let identifiers = match source::parse(raw) {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                return vec![SubmissionOutcome::InvalidInput {
                    reason: e.to_string(),
                }];
            }
        };

        debug!(
            "Submission of {} identifier(s), mode {:?}",
            identifiers.len(),
            self.mode
        );

        let outcomes = match self.mode {
            ResolveMode::Sequential => self.submit_sequential(identifiers).await,
            ResolveMode::Concurrent { max_in_flight } => {
                self.submit_concurrent(identifiers, max_in_flight).await
            }
        };

        let added = outcomes
            .iter()
            .filter(|o| matches!(o, SubmissionOutcome::Added { .. }))
            .count();
        let failed = outcomes.iter().filter(|o| o.is_error()).count();
        info!(
            "Submission done: {} added, {} duplicate, {} failed, {} queued",
            added,
            outcomes.len() - added - failed,
            failed,
            self.queue.len()
        );

        outcomes
    }

    async fn submit_sequential(
        &mut self,
        identifiers: Vec<SourceIdentifier>,
    ) -> Vec<SubmissionOutcome> {
        let mut outcomes = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let result = self.resolver.resolve(&identifier).await;
            outcomes.push(self.settle(identifier, result));
        }
        outcomes
    }

    async fn submit_concurrent(
        &mut self,
        identifiers: Vec<SourceIdentifier>,
        max_in_flight: usize,
    ) -> Vec<SubmissionOutcome> {
        let resolver: &dyn Resolver = self.resolver.as_ref();

        // buffered() yields results in input order whatever the completion order
        let results: Vec<_> = stream::iter(identifiers.iter())
            .map(move |identifier| resolver.resolve(identifier))
            .buffered(max_in_flight.max(1))
            .collect()
            .await;

        identifiers
            .into_iter()
            .zip(results)
            .map(|(identifier, result)| self.settle(identifier, result))
            .collect()
    }

    /// Turn one resolution result into its terminal outcome
    fn settle(
        &mut self,
        identifier: SourceIdentifier,
        result: Result<ResolvedTrack, ResolutionError>,
    ) -> SubmissionOutcome {
        match result {
            Ok(track) => {
                let was_idle = self.queue.is_empty();
                if self.queue.insert(track.clone()) {
                    if was_idle {
                        info!("Playback starts with {}", track);
                    }
                    SubmissionOutcome::Added {
                        identifier,
                        track,
                        starts_playback: was_idle,
                    }
                } else {
                    debug!("{} already queued as {}", identifier, track);
                    SubmissionOutcome::Duplicate { identifier, track }
                }
            }
            Err(e) => {
                warn!("{} could not be added: {}", identifier, e.cause);
                SubmissionOutcome::Failed {
                    identifier,
                    reason: e.cause.to_string(),
                }
            }
        }
    }

    /// Move to the next track when the current one ends, wrapping around
    pub fn advance(&mut self) -> Result<ResolvedTrack, QueueError> {
        let next = self.queue.advance()?.clone();
        debug!("Advanced to track {} ({})", self.queue.cursor(), next);
        Ok(next)
    }

    pub fn current(&self) -> Option<&ResolvedTrack> {
        self.queue.current()
    }

    /// Read-only access to the queue
    pub fn queue(&self) -> &DedupQueue {
        &self.queue
    }

    pub fn snapshot(&self) -> PlaylistSnapshot {
        self.queue.snapshot()
    }
}
