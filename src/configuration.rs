use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub path: String,
    pub max_connections: u32,
    pub busy_timeout_ms: u32
}

impl Settings{
    // configuration/base.yaml, overridden by APP_* variables (APP_APPLICATION__PORT=8080)
    pub fn get() -> Result<Self, ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
