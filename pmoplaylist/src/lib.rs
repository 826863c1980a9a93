//! # pmoplaylist - File de lecture cyclique alimentée par des liens
//!
//! Cette crate transforme des liens saisis par l'utilisateur en une file de
//! lecture jouée en boucle :
//! - Parsing de l'entrée (URL seule ou lot JSON `[{"url": ...}]`)
//! - Résolution de chaque lien via `pmoresolver`
//! - File sans doublons avec curseur cyclique
//! - Un résultat par lien, dans l'ordre de saisie
//!
//! # Architecture
//!
//! - **source** : parser pur, sans I/O
//! - **DedupQueue** : seul état mutable, dédoublonnage à l'insertion
//! - **PlaylistOrchestrator** : possède la file et le resolver injecté
//! - **SubmissionOutcome** : résultat rendu à l'interface
//!
//! # Exemple d'utilisation
//!
//! ```no_run
//! use pmoplaylist::{PlaylistOrchestrator, ResolveMode};
//! use pmoresolver::HttpResolver;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = HttpResolver::builder().base_url("http://localhost:3000").build()?;
//! let mut playlist = PlaylistOrchestrator::new(Arc::new(resolver))
//!     .with_mode(ResolveMode::concurrent());
//!
//! let outcomes = playlist.submit("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await;
//! for outcome in &outcomes {
//!     println!("{}: {}", outcome.kind(), outcome.notice());
//! }
//!
//! if let Some(track) = playlist.current() {
//!     println!("Playing: {}", track);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod orchestrator;
mod outcome;
mod queue;
pub mod source;

#[cfg(feature = "pmoconfig")]
mod config_ext;

// Réexports publics
pub use error::{ParseError, QueueError};
pub use orchestrator::{PlaylistOrchestrator, ResolveMode, DEFAULT_MAX_IN_FLIGHT};
pub use outcome::{
    OutcomeKind, SubmissionOutcome, NOTICE_ADDED, NOTICE_DUPLICATE, NOTICE_FAILED,
};
pub use queue::{DedupQueue, PlaylistSnapshot};

#[cfg(feature = "pmoconfig")]
pub use config_ext::PlaylistConfigExt;
