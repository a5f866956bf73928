use std::time::Duration;

use duration_str::deserialize_duration;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("sismika.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub sessions: Option<Sessions>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Sessions {
    #[serde(deserialize_with = "deserialize_duration")]
    pub ttl: Duration,
    pub first_login_permission: String,
}

impl Default for Sessions {
    fn default() -> Self {
        Config::default().sessions.expect("Sessions configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.db.is_some());
        assert!(cfg.sessions.is_some());
    }

    #[test]
    fn default_sessions_config() {
        let cfg = Sessions::default();
        assert!(cfg.ttl > Duration::ZERO);
        assert!(!cfg.first_login_permission.is_empty());
    }

    #[test]
    fn parse_full_config_example_from_file() {
        let cfg_string = fs::read_to_string("src/config/sismika.full-example.toml").unwrap();
        let _: Config = toml::from_str(&cfg_string).unwrap();
    }
}
