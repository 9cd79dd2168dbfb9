use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};

use serde::Deserialize;

use crate::Error;

const ENV_PREFIX: &str = "SENDGRID_DEV";

pub const DEFAULT_API_SERVER: &str = ":3030";
pub const DEFAULT_API_KEY: &str = "SG.xxxxx";
pub const DEFAULT_SMTP_SERVER: &str = "127.0.0.1:1025";
const DEFAULT_SMTP_PORT: u16 = 25;

/// Process-wide settings, resolved once at startup and read-only afterwards.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// HTTP listen address, Go style (`:3030` binds every interface)
    pub api_server: String,

    /// Accepted for parity with real clients; never checked
    pub api_key: String,

    /// `host:port` of the SMTP sink
    pub smtp_server: String,

    #[serde(default)]
    pub smtp_username: String,

    #[serde(default)]
    pub smtp_password: String,

    /// Build and validate messages without sending them
    #[serde(rename = "test", default)]
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_server: DEFAULT_API_SERVER.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            smtp_server: DEFAULT_SMTP_SERVER.to_string(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            dry_run: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.smtp_password.is_empty() { "" } else { "********" };

        f.debug_struct("Config")
            .field("api_server", &self.api_server)
            .field("api_key", &self.api_key)
            .field("smtp_server", &self.smtp_server)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &password)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Config {
    /// Loads defaults, then the optional TOML file at `path`, then any
    /// environment variables prefixed with `SENDGRID_DEV_`.
    pub fn load(path: Option<&str>) -> Result<Self, Error> {
        Self::load_with(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`Config::load`], reading variables from `env`
    pub fn load_with(path: Option<&str>, env: config::Environment) -> Result<Self, Error> {
        let mut builder = config::Config::builder()
            .set_default("api_server", DEFAULT_API_SERVER)?
            .set_default("api_key", DEFAULT_API_KEY)?
            .set_default("smtp_server", DEFAULT_SMTP_SERVER)?
            .set_default("test", false)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder.add_source(env.ignore_empty(true)).build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address the HTTP server listens on
    pub fn bind_addr(&self) -> Result<SocketAddr, Error> {
        let addr = if self.api_server.starts_with(':') {
            format!("0.0.0.0{}", self.api_server)
        } else {
            self.api_server.clone()
        };

        addr.to_socket_addrs()
            .map_err(|e| Error::Config(format!("api_server {}: {}", self.api_server, e)))?
            .next()
            .ok_or_else(|| Error::Config(format!("api_server {} did not resolve", self.api_server)))
    }

    /// SMTP server with the port stripped off
    pub fn smtp_host(&self) -> &str {
        match self.smtp_server.rsplit_once(':') {
            Some((host, _)) => host,
            None => &self.smtp_server,
        }
    }

    pub fn smtp_port(&self) -> Result<u16, Error> {
        match self.smtp_server.rsplit_once(':') {
            Some((_, port)) => port
                .parse()
                .map_err(|_| Error::Config(format!("invalid SMTP port in {}", self.smtp_server))),
            None => Ok(DEFAULT_SMTP_PORT),
        }
    }

    /// Authenticated SMTP is used whenever a username is configured
    pub fn has_credentials(&self) -> bool {
        !self.smtp_username.is_empty()
    }
}
