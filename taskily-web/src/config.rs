/// Configuration management for the web server
///
/// Loads configuration from environment variables into a typed struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `HTTP_HOST`: host to bind to (default: 0.0.0.0)
/// - `HTTP_PORT`: port to bind to (default: 7000)
/// - `SMTP_HOST`: SMTP relay host (default: localhost)
/// - `SMTP_PORT`: SMTP relay port (default: 1025)
/// - `SMTP_USER` / `SMTP_PASS`: relay credentials (optional)
/// - `MAIL_REMITENTE`: From address for outgoing mail
/// - `BASE_URL`: public base URL used in reset links (default: http://localhost:7000)

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub http: HttpConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Outgoing mail configuration
    pub smtp: SmtpConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Outgoing mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP relay port
    pub port: u16,

    /// Relay username (empty = no authentication, e.g. a local dev relay)
    pub usuario: String,

    /// Relay password
    pub password: String,

    /// From address, e.g. "Taskily <no-reply@taskily.local>"
    pub remitente: String,

    /// Public base URL used to build reset links
    pub base_url: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric variable
    /// cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let http_host = env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "7000".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let smtp_host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse::<u16>()?;
        let smtp_usuario = env::var("SMTP_USER").unwrap_or_default();
        let smtp_password = env::var("SMTP_PASS").unwrap_or_default();
        let remitente = env::var("MAIL_REMITENTE")
            .unwrap_or_else(|_| "Taskily <no-reply@taskily.local>".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:7000".to_string());

        Ok(Self {
            http: HttpConfig {
                host: http_host,
                port: http_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            smtp: SmtpConfig {
                host: smtp_host,
                port: smtp_port,
                usuario: smtp_usuario,
                password: smtp_password,
                remitente,
                base_url,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }
}
