use std::str::FromStr;
use std::time::Duration;

use log::warn;
use serde::de::IntoDeserializer;
use serde::Deserialize;

use crate::{Error, Result};

const DEFAULT_DESCRIPTION: &str = "openSenseMap box";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub adapter: AdapterConfig,
    pub api: ApiConfig,
    pub mqtt: MqttConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdapterConfig {
    pub box_ids: Vec<String>,
    pub description: String,
    pub profile: Profile,
    pub poll_interval: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        AdapterConfig {
            box_ids: vec![],
            description: DEFAULT_DESCRIPTION.to_string(),
            profile: Profile::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub url: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MqttConfig {
    pub address: String,
    pub username: String,
    pub password: String,
}

/// How sensor readings are exposed to the gateway.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Numeric properties with normalized units, semantic types and device
    /// capabilities.
    #[default]
    Annotated,
    /// String properties carrying the raw measurement and unit.
    Plain,
}

impl FromStr for Profile {
    type Err = serde::de::value::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::deserialize(s.into_deserializer())
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let box_ids = match var("BOX_IDS") {
            Some(box_ids) => serde_json::from_str::<Vec<String>>(&box_ids)
                .map_err(|err| Error::Config("BOX_IDS", err.to_string()))?,
            None => vec![],
        };

        if box_ids.is_empty() {
            warn!("BOX_IDS is not set or empty, no boxes will be polled");
        }

        let profile = match var("PROFILE") {
            Some(profile) => Profile::from_str(&profile)
                .map_err(|err| Error::Config("PROFILE", err.to_string()))?,
            None => Profile::default(),
        };

        let adapter = AdapterConfig {
            box_ids,
            description: var("DESCRIPTION").unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            profile,
            poll_interval: seconds(&var, "POLL_INTERVAL", DEFAULT_POLL_INTERVAL)?,
        };

        let api = ApiConfig {
            url: var("OPENSENSEMAP_URL")
                .unwrap_or_else(|| opensensemap::DEFAULT_API_URL.to_string()),
            request_timeout: seconds(&var, "REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT)?,
        };

        let mqtt = MqttConfig {
            address: required(&var, "MQTT_ADDRESS")?,
            username: required(&var, "MQTT_USER")?,
            password: required(&var, "MQTT_PASS")?,
        };

        Ok(Config { adapter, api, mqtt })
    }
}

fn required<F>(var: &F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    var(name).ok_or_else(|| Error::Config(name, "variable is not set".to_string()))
}

fn seconds<F>(var: &F, name: &'static str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match var(name) {
        Some(value) => value,
        None => return Ok(default),
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(Error::Config(name, "must be greater than zero".to_string())),
        Ok(seconds) => Ok(Duration::from_secs(seconds)),
        Err(err) => Err(Error::Config(name, err.to_string())),
    }
}
