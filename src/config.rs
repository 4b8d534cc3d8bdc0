use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_minutes: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub session: SessionConfig,
    pub cors_origins: Vec<HeaderValue>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").context("SESSION_SECRET is not set")?,
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };
        // cookie::Key::derive_from panics below this length
        anyhow::ensure!(
            session.secret.len() >= 32,
            "SESSION_SECRET must be at least 32 bytes"
        );

        let cors_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
        )?;

        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid APP_PORT {v:?}"))?,
            Err(_) => 5555,
        };

        let config = Self {
            database_url,
            max_connections,
            session,
            cors_origins,
            host,
            port,
        };
        config.bind_addr()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid APP_HOST {:?}", self.host))
    }
}

fn parse_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {o:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("http://a.test, http://b.test ,,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://a.test");
        assert_eq!(origins[1], "http://b.test");
    }

    fn config_at(host: &str, port: u16) -> AppConfig {
        AppConfig {
            database_url: String::new(),
            max_connections: 1,
            session: SessionConfig {
                secret: String::new(),
                ttl_minutes: 1,
                cookie_secure: false,
            },
            cors_origins: vec![],
            host: host.into(),
            port,
        }
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let addr = config_at("127.0.0.1", 8080).bind_addr().unwrap();
        assert_eq!(addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config_at("0.0.0.0", 5555).bind_addr().unwrap().port(), 5555);
    }

    #[test]
    fn bind_addr_rejects_unparsable_host() {
        assert!(config_at("not a host", 80).bind_addr().is_err());
    }

    #[test]
    fn parse_origins_rejects_control_characters() {
        assert!(parse_origins("http://bad\n.test").is_err());
    }
}
