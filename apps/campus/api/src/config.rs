use core_config::{AppInfo, FromEnv, app_info, env_parse_or, server::ServerConfig};
use std::time::Duration;

pub use core_config::Environment;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Upper bound for draining requests and cleanup after SIGTERM
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let shutdown_timeout = Duration::from_secs(env_parse_or("SHUTDOWN_TIMEOUT_SECS", 30)?);

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            shutdown_timeout,
        })
    }
}
