use std::{env, fmt::Display, str::FromStr};

use log::{info, warn};

/// Runtime configuration, sourced from the process environment.
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    /// When set, post routes reject requests without a valid bearer token.
    /// Off by default to match deployments that run the API open.
    pub require_auth: bool,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "4000"),
            database_path: try_load("DATABASE_PATH", "./murmur.sqlite3"),
            jwt_secret: load_required("JWT_SECRET"),
            require_auth: try_load("REQUIRE_AUTH", "false"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| ())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn load_required(key: &str) -> String {
    var(key)
        .map_err(|_| {
            warn!("Required environment variable {key} not found");
        })
        .expect("Environment misconfigured!")
}
