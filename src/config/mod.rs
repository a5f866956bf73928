use std::{
    env, fs,
    io::ErrorKind,
    path::Path,
    time::Duration,
};

use anyhow::{anyhow, Result};
use sismika_entities::user::Permission;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "sismika.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub sessions: Sessions,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct Sessions {
    pub ttl: Duration,
    /// Permission granted when a subject signs in for the first time.
    pub first_login_permission: Permission,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config { db, sessions } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Sessions {
            ttl,
            first_login_permission,
        } = sessions.unwrap_or_default();

        let first_login_permission = first_login_permission
            .parse()
            .map_err(|_| anyhow!("Unknown permission '{first_login_permission}'"))?;

        let sessions = Sessions {
            ttl,
            first_login_permission,
        };

        Ok(Self { db, sessions })
    }
}
