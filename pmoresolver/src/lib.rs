//! Resolver client library for PMOPlaylist
//!
//! This crate turns a media source identifier (the URL of a video or song
//! page) into the URL of a directly playable audio stream, by asking an
//! external resolution endpoint.
//!
//! # Features
//!
//! - **One lookup per identifier**: no batching and no caching; duplicates are
//!   filtered later, at the playlist level
//! - **Uniform failures**: unreachable sources, malformed URLs and sources
//!   without an audio-only stream all surface as a [`ResolutionError`]
//!   carrying the original identifier
//! - **Pluggable**: the [`Resolver`] trait lets callers inject any lookup
//!   strategy (tests use in-memory resolvers)
//! - **Configuration Extension**: endpoint, timeout and User-Agent read from
//!   pmoconfig
//!
//! # Example
//!
//! ```no_run
//! use pmoresolver::{HttpResolver, Resolver, SourceIdentifier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = HttpResolver::new()?;
//!     let id = SourceIdentifier::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
//!
//!     match resolver.resolve(&id).await {
//!         Ok(track) => println!("Stream: {}", track),
//!         Err(e) => eprintln!("{} could not be added: {}", e.identifier(), e),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

// Re-exports
pub use client::{HttpResolver, Resolver, ResolverBuilder};
pub use error::{Error, ResolutionError, Result};
pub use models::{ResolveResponse, ResolvedTrack, SourceIdentifier};

#[cfg(feature = "pmoconfig")]
pub use config_ext::ResolverConfigExt;
