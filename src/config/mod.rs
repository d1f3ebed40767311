use crate::error::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Optional JSON seed file loaded into the stores at startup.
    pub seed_path: Option<PathBuf>,
    /// Upper bound on any single store operation.
    pub store_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            seed_path: env::var("SEED_PATH").ok().map(PathBuf::from),
            store_timeout: Duration::from_secs(
                env::var("STORE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            ),
        })
    }
}
