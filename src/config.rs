use crate::error::{ParseEnvVarSnafu, StudentResult};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use sqlx::mysql::MySqlConnectOptions;
use std::{num::ParseIntError, str::FromStr, sync::Arc};

const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_SERVER_IP: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    server_ip: String,
    server_port: u16,
}

impl RuntimeConfiguration {
    pub fn new() -> StudentResult<Self> {
        Self::from_lookup(|name| var(name).ok())
    }

    /// Builds the configuration from any variable source. Unset connection values are left
    /// empty so that the startup database check reports them, but numbers must parse.
    pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> StudentResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::from_lookup(&lookup)?),
            server_ip: lookup("SERVER_IP").unwrap_or_else(|| DEFAULT_SERVER_IP.to_string()),
            server_port: parse_or(&lookup, "PORT", DEFAULT_SERVER_PORT)?,
        })
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server_ip, self.server_port)
    }
}

#[derive(Debug)]
pub struct DbConfig {
    host: String,
    port: u16,
    user: String,
    password: SecretString,
    database: String,
    max_connections: u32,
}

impl DbConfig {
    fn from_lookup(lookup: &impl Fn(&'static str) -> Option<String>) -> StudentResult<Self> {
        let get_env_var = |name| lookup(name).unwrap_or_default();

        Ok(Self {
            host: get_env_var("HOST"),
            port: parse_or(lookup, "DB_PORT", DEFAULT_DB_PORT)?,
            user: get_env_var("USER"),
            password: SecretString::from(get_env_var("PASSWORD")),
            database: get_env_var("DATABASE"),
            max_connections: parse_or(lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.database)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    name: &'static str,
    default: T,
) -> StudentResult<T>
where
    T: FromStr<Err = ParseIntError>,
{
    match lookup(name) {
        Some(original) => original
            .trim()
            .parse()
            .context(ParseEnvVarSnafu { name, original }),
        None => Ok(default),
    }
}
