//! Server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::session::SessionMode;

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default lifetime of a signed session token.
pub const DEFAULT_SESSION_EXPIRY_HOURS: u64 = 24;

/// Longest accepted signed session lifetime (ten years).
pub const MAX_SESSION_EXPIRY_HOURS: u64 = 87_600;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: IpAddr,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit logs as JSON lines instead of text.
    pub log_json: bool,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// How session identifiers are issued and checked.
    pub session_mode: SessionMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            log_json: false,
            cors_allowed_origins: "*".to_string(),
            session_mode: SessionMode::Plain,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `HOST`: Bind address (default: 127.0.0.1)
    /// - `PORT`: Server port (default: 8080)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "text" or "json" (default: "text")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `SESSION_MODE`: "plain" or "signed" (default: "plain")
    /// - `SESSION_SECRET`: HMAC secret, required when `SESSION_MODE=signed`
    /// - `SESSION_EXPIRY_HOURS`: Signed token lifetime (default: 24)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(s) => parse_var("HOST", &s)?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(s) => parse_var("PORT", &s)?,
            None => defaults.port,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_json = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "LOG_FORMAT".to_string(),
                    reason: format!("expected \"text\" or \"json\", got {:?}", other),
                });
            }
        };

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let session_mode = match lookup("SESSION_MODE").as_deref() {
            None | Some("plain") => SessionMode::Plain,
            Some("signed") => {
                let secret = lookup("SESSION_SECRET")
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| ConfigError::MissingEnvVar("SESSION_SECRET".to_string()))?;
                let expiry_hours = match lookup("SESSION_EXPIRY_HOURS") {
                    Some(s) => parse_var("SESSION_EXPIRY_HOURS", &s)?,
                    None => DEFAULT_SESSION_EXPIRY_HOURS,
                };
                if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&expiry_hours) {
                    return Err(ConfigError::InvalidValue {
                        name: "SESSION_EXPIRY_HOURS".to_string(),
                        reason: format!(
                            "expected 1..={} hours, got {}",
                            MAX_SESSION_EXPIRY_HOURS, expiry_hours
                        ),
                    });
                }
                SessionMode::Signed {
                    secret,
                    expiry_hours,
                }
            }
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "SESSION_MODE".to_string(),
                    reason: format!("expected \"plain\" or \"signed\", got {:?}", other),
                });
            }
        };

        Ok(Self {
            host,
            port,
            log_level,
            log_json,
            cors_allowed_origins,
            session_mode,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(!config.log_json);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert!(matches!(config.session_mode, SessionMode::Plain));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr(), "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert!(config.log_json);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cors_allowed_origins, "http://localhost:5173");
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "PORT"));
    }

    #[test]
    fn test_signed_mode_requires_secret() {
        let err = load(&[("SESSION_MODE", "signed")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "SESSION_SECRET"));
    }

    #[test]
    fn test_signed_mode() {
        let config = load(&[
            ("SESSION_MODE", "signed"),
            ("SESSION_SECRET", "s3cret"),
            ("SESSION_EXPIRY_HOURS", "2"),
        ])
        .unwrap();

        match config.session_mode {
            SessionMode::Signed {
                secret,
                expiry_hours,
            } => {
                assert_eq!(secret, "s3cret");
                assert_eq!(expiry_hours, 2);
            }
            SessionMode::Plain => panic!("expected signed mode"),
        }
    }

    #[test]
    fn test_session_expiry_out_of_range() {
        for hours in ["0", "87601", "1000000000000", "18446744073709551615"] {
            let err = load(&[
                ("SESSION_MODE", "signed"),
                ("SESSION_SECRET", "s3cret"),
                ("SESSION_EXPIRY_HOURS", hours),
            ])
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "SESSION_EXPIRY_HOURS"),
                "hours {}",
                hours
            );
        }
    }

    #[test]
    fn test_session_expiry_upper_bound_accepted() {
        let config = load(&[
            ("SESSION_MODE", "signed"),
            ("SESSION_SECRET", "s3cret"),
            ("SESSION_EXPIRY_HOURS", "87600"),
        ])
        .unwrap();
        assert!(matches!(
            config.session_mode,
            SessionMode::Signed { expiry_hours: MAX_SESSION_EXPIRY_HOURS, .. }
        ));
    }

    #[test]
    fn test_unknown_log_format() {
        let err = load(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "LOG_FORMAT"));
    }

    #[test]
    fn test_unknown_session_mode() {
        let err = load(&[("SESSION_MODE", "cookie")]).unwrap_err();
        assert!(err.to_string().contains("SESSION_MODE"));
    }
}
