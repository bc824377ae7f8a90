use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;

use crate::error::{env_var_error, Error};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_GOOGLE_MAPS_API_BASE: &str = "maps.googleapis.com";

const KEYS: [&str; 3] = [
    "CABFARE_BIND_ADDR",
    "GOOGLE_MAPS_API_BASE",
    "GOOGLE_MAPS_API_KEY",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Directions lookups are disabled when no API key is configured.
    pub google_maps: Option<GoogleMapsConfig>,
}

#[derive(Clone, PartialEq)]
pub struct GoogleMapsConfig {
    pub api_base: String,
    pub api_key: String,
}

impl std::fmt::Debug for GoogleMapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Reads configuration from the process environment, after loading any
    /// `.env` file in the working directory.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let mut vars = HashMap::new();
        for key in KEYS {
            if let Some(value) = read_var(key)? {
                vars.insert(key, value);
            }
        }

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("CABFARE_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(env_var_error)?;

        let google_maps = lookup("GOOGLE_MAPS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| GoogleMapsConfig {
                api_base: lookup("GOOGLE_MAPS_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GOOGLE_MAPS_API_BASE.into()),
                api_key,
            });

        Ok(Self {
            bind_addr,
            google_maps,
        })
    }
}

// Unset is fine; set but not unicode is an error.
fn read_var(key: &str) -> Result<Option<String>, Error> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[test]
fn defaults_without_environment() {
    let config = Config::from_lookup(|_| None).unwrap();

    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
    assert_eq!(config.google_maps, None);
}

#[test]
fn reads_google_maps_settings() {
    let config = Config::from_lookup(|key| match key {
        "CABFARE_BIND_ADDR" => Some("0.0.0.0:8080".into()),
        "GOOGLE_MAPS_API_KEY" => Some("secret".into()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.bind_addr.port(), 8080);

    let google_maps = config.google_maps.unwrap();
    assert_eq!(google_maps.api_base, DEFAULT_GOOGLE_MAPS_API_BASE);
    assert_eq!(google_maps.api_key, "secret");
    assert!(!format!("{:?}", google_maps).contains("secret"));
}

#[test]
fn blank_api_key_disables_directions() {
    let config = Config::from_lookup(|key| match key {
        "GOOGLE_MAPS_API_KEY" => Some("  ".into()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.google_maps, None);
}

#[test]
fn bad_bind_address_is_an_env_error() {
    let err = Config::from_lookup(|key| match key {
        "CABFARE_BIND_ADDR" => Some("not-an-address".into()),
        _ => None,
    })
    .unwrap_err();

    assert_eq!(err.code, 1);
}

#[test]
fn unset_variables_read_as_none() {
    assert_eq!(read_var("CABFARE_TEST_SURELY_UNSET_VARIABLE").unwrap(), None);
}
