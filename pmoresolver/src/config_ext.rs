//! Extension pour intégrer le resolver dans pmoconfig
//!
//! Ce module fournit le trait `ResolverConfigExt` qui ajoute à
//! `pmoconfig::Config` les réglages de l'endpoint de résolution.
//!
//! # Exemple
//!
//! ```no_run
//! use pmoconfig::get_config;
//! use pmoresolver::{HttpResolver, ResolverConfigExt};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = get_config();
//! config.set_resolver_base_url("http://192.168.1.20:3000")?;
//!
//! let resolver = HttpResolver::from_config(&config)?;
//! println!("Resolving through {}", resolver.base_url());
//! # Ok(())
//! # }
//! ```

use crate::client::{
    HttpResolver, ResolverBuilder, DEFAULT_BASE_URL, DEFAULT_ENDPOINT,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::Value;
use std::time::Duration;

/// Trait d'extension pour la configuration du resolver
///
/// # Auto-persist des valeurs par défaut
///
/// Les getters persistent automatiquement les valeurs par défaut dans la
/// configuration si elles n'existent pas encore.
pub trait ResolverConfigExt {
    /// URL de base de l'endpoint de résolution
    fn get_resolver_base_url(&self) -> Result<String>;

    fn set_resolver_base_url(&self, url: &str) -> Result<()>;

    /// Chemin de la route de résolution (default: `/api/playlist`)
    fn get_resolver_endpoint(&self) -> Result<String>;

    fn set_resolver_endpoint(&self, endpoint: &str) -> Result<()>;

    /// Timeout d'une requête de résolution, en secondes
    fn get_resolver_timeout_secs(&self) -> Result<u64>;

    fn set_resolver_timeout_secs(&self, secs: u64) -> Result<()>;

    fn get_resolver_user_agent(&self) -> Result<String>;
}

impl ResolverConfigExt for Config {
    fn get_resolver_base_url(&self) -> Result<String> {
        match self.get_value(&["resolver", "base_url"]) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Ok(s),
            _ => {
                self.set_resolver_base_url(DEFAULT_BASE_URL)?;
                Ok(DEFAULT_BASE_URL.to_string())
            }
        }
    }

    fn set_resolver_base_url(&self, url: &str) -> Result<()> {
        self.set_value(&["resolver", "base_url"], Value::String(url.to_string()))
    }

    fn get_resolver_endpoint(&self) -> Result<String> {
        match self.get_value(&["resolver", "endpoint"]) {
            Ok(Value::String(s)) if !s.trim().is_empty() => Ok(s),
            _ => {
                self.set_resolver_endpoint(DEFAULT_ENDPOINT)?;
                Ok(DEFAULT_ENDPOINT.to_string())
            }
        }
    }

    fn set_resolver_endpoint(&self, endpoint: &str) -> Result<()> {
        self.set_value(
            &["resolver", "endpoint"],
            Value::String(endpoint.to_string()),
        )
    }

    fn get_resolver_timeout_secs(&self) -> Result<u64> {
        match self.get_value(&["resolver", "timeout_secs"]) {
            Ok(Value::Number(n)) => match n.as_u64() {
                Some(secs) if secs > 0 => Ok(secs),
                _ => {
                    // Zero is not a usable timeout
                    self.set_resolver_timeout_secs(DEFAULT_REQUEST_TIMEOUT_SECS)?;
                    Ok(DEFAULT_REQUEST_TIMEOUT_SECS)
                }
            },
            _ => {
                self.set_resolver_timeout_secs(DEFAULT_REQUEST_TIMEOUT_SECS)?;
                Ok(DEFAULT_REQUEST_TIMEOUT_SECS)
            }
        }
    }

    fn set_resolver_timeout_secs(&self, secs: u64) -> Result<()> {
        self.set_value(
            &["resolver", "timeout_secs"],
            Value::Number(serde_yaml::Number::from(secs)),
        )
    }

    fn get_resolver_user_agent(&self) -> Result<String> {
        match self.get_value(&["resolver", "user_agent"]) {
            Ok(Value::String(s)) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl ResolverBuilder {
    /// Builder pré-rempli depuis la section `resolver` de la configuration
    ///
    /// Les réglages peuvent encore être surchargés avant `build()`, sans
    /// toucher au fichier de configuration.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Ok(ResolverBuilder::new()
            .base_url(config.get_resolver_base_url()?)
            .endpoint(config.get_resolver_endpoint()?)
            .timeout(Duration::from_secs(config.get_resolver_timeout_secs()?))
            .user_agent(config.get_resolver_user_agent()?))
    }
}

impl HttpResolver {
    /// Build a resolver from the `resolver` section of the configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        ResolverBuilder::from_config(config)?.build()
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
    fn test_defaults() {
        let (_dir, config) = temp_config();
        assert_eq!(config.get_resolver_base_url().unwrap(), DEFAULT_BASE_URL);
        assert_eq!(config.get_resolver_endpoint().unwrap(), DEFAULT_ENDPOINT);
        assert_eq!(
            config.get_resolver_timeout_secs().unwrap(),
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let (_dir, config) = temp_config();
        config.set_resolver_timeout_secs(0).unwrap();
        assert_eq!(
            config.get_resolver_timeout_secs().unwrap(),
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }

    #[test]
    fn test_from_config() {
        let (_dir, config) = temp_config();
        config.set_resolver_base_url("http://10.0.0.2:4000").unwrap();
        config.set_resolver_timeout_secs(5).unwrap();

        let resolver = HttpResolver::from_config(&config).unwrap();
        assert_eq!(resolver.base_url(), "http://10.0.0.2:4000");
        assert_eq!(resolver.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_builder_override_is_not_persisted() {
        let (_dir, config) = temp_config();
        config.set_resolver_endpoint("/resolve").unwrap();

        let resolver = ResolverBuilder::from_config(&config)
            .unwrap()
            .base_url("http://127.0.0.1:8080")
            .build()
            .unwrap();

        assert_eq!(resolver.base_url(), "http://127.0.0.1:8080");
        assert_eq!(resolver.endpoint(), "/resolve");
        assert_eq!(config.get_resolver_base_url().unwrap(), DEFAULT_BASE_URL);
    }
}
