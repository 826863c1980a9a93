//! Extension pour intégrer pmoplaylist dans pmoconfig
//!
//! Ce module fournit le trait `PlaylistConfigExt` qui ajoute à
//! `pmoconfig::Config` le choix du mode de résolution des lots.
//!
//! ```yaml
//! playlist:
//!   resolve_mode: concurrent   # ou sequential
//!   max_in_flight: 4
//! ```

use crate::orchestrator::{PlaylistOrchestrator, ResolveMode, DEFAULT_MAX_IN_FLIGHT};
use anyhow::{anyhow, Result};
use pmoconfig::Config;
use pmoresolver::{HttpResolver, Resolver};
use serde_yaml::Value;
use std::sync::Arc;

const MODE_SEQUENTIAL: &str = "sequential";
const MODE_CONCURRENT: &str = "concurrent";

/// Trait d'extension pour gérer la configuration des playlists
pub trait PlaylistConfigExt {
    /// Mode de résolution des lots (default: séquentiel)
    fn get_playlist_resolve_mode(&self) -> Result<ResolveMode>;

    fn set_playlist_resolve_mode(&self, mode: ResolveMode) -> Result<()>;

    /// Nombre maximal de résolutions simultanées en mode concurrent
    fn get_playlist_max_in_flight(&self) -> Result<usize>;

    fn set_playlist_max_in_flight(&self, max: usize) -> Result<()>;
}

impl PlaylistConfigExt for Config {
    fn get_playlist_resolve_mode(&self) -> Result<ResolveMode> {
        match self.get_value(&["playlist", "resolve_mode"]) {
            Ok(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                MODE_SEQUENTIAL => Ok(ResolveMode::Sequential),
                MODE_CONCURRENT => Ok(ResolveMode::Concurrent {
                    max_in_flight: self.get_playlist_max_in_flight()?,
                }),
                other => Err(anyhow!("Unknown playlist.resolve_mode: {}", other)),
            },
            _ => {
                self.set_playlist_resolve_mode(ResolveMode::Sequential)?;
                Ok(ResolveMode::Sequential)
            }
        }
    }

    fn set_playlist_resolve_mode(&self, mode: ResolveMode) -> Result<()> {
        let name = match mode {
            ResolveMode::Sequential => MODE_SEQUENTIAL,
            ResolveMode::Concurrent { max_in_flight } => {
                self.set_playlist_max_in_flight(max_in_flight)?;
                MODE_CONCURRENT
            }
        };
        self.set_value(
            &["playlist", "resolve_mode"],
            Value::String(name.to_string()),
        )
    }

    fn get_playlist_max_in_flight(&self) -> Result<usize> {
        match self.get_value(&["playlist", "max_in_flight"]) {
            Ok(Value::Number(n)) => match n.as_u64() {
                Some(max) if max > 0 => Ok(max as usize),
                _ => Ok(DEFAULT_MAX_IN_FLIGHT),
            },
            _ => {
                self.set_playlist_max_in_flight(DEFAULT_MAX_IN_FLIGHT)?;
                Ok(DEFAULT_MAX_IN_FLIGHT)
            }
        }
    }

    fn set_playlist_max_in_flight(&self, max: usize) -> Result<()> {
        self.set_value(
            &["playlist", "max_in_flight"],
            Value::Number(serde_yaml::Number::from(max)),
        )
    }
}

impl PlaylistOrchestrator {
    /// Build an orchestrator from configuration, with an explicit resolver
    pub fn from_config_with(config: &Config, resolver: Arc<dyn Resolver>) -> Result<Self> {
        let mode = config.get_playlist_resolve_mode()?;
        Ok(PlaylistOrchestrator::new(resolver).with_mode(mode))
    }

    /// Build an orchestrator resolving through the configured HTTP endpoint
    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = HttpResolver::from_config(config)?;
        Self::from_config_with(config, Arc::new(resolver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_default_mode_is_sequential() {
        let (_dir, config) = temp_config();
        assert_eq!(
            config.get_playlist_resolve_mode().unwrap(),
            ResolveMode::Sequential
        );
    }

    #[test]
    fn test_concurrent_mode_round_trip() {
        let (_dir, config) = temp_config();
        config
            .set_playlist_resolve_mode(ResolveMode::Concurrent { max_in_flight: 8 })
            .unwrap();
        assert_eq!(
            config.get_playlist_resolve_mode().unwrap(),
            ResolveMode::Concurrent { max_in_flight: 8 }
        );
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let (_dir, config) = temp_config();
        config
            .set_value(&["playlist", "resolve_mode"], Value::String("turbo".into()))
            .unwrap();
        assert!(config.get_playlist_resolve_mode().is_err());
    }

    #[test]
    fn test_from_config() {
        let (_dir, config) = temp_config();
        config
            .set_playlist_resolve_mode(ResolveMode::concurrent())
            .unwrap();
        let playlist = PlaylistOrchestrator::from_config(&config).unwrap();
        assert_eq!(playlist.mode(), ResolveMode::concurrent());
        assert!(playlist.queue().is_empty());
    }
}
