use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use blockres_api::{DEFAULT_BIND_IP, DEFAULT_PORT};
use blockres_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig};
use clap::Parser;

use crate::error::{AppError, AppResult};

/// Flags accepted by the `blockres` binary; each one can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "blockres",
    about = "Serve localized device and extension catalogs over HTTP"
)]
pub struct ServerArgs {
    /// Directory holding `locales.json`, the catalog folders, and static assets.
    #[arg(long, env = "BLOCKRES_USER_DATA")]
    pub user_data: PathBuf,
    /// TCP port for the HTTP listener.
    #[arg(long, env = "BLOCKRES_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Interface the listener binds.
    #[arg(long, env = "BLOCKRES_BIND", default_value_t = DEFAULT_BIND_IP)]
    pub bind: IpAddr,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "BLOCKRES_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
    /// `json` or `pretty`; inferred from the build profile when absent.
    #[arg(long, env = "BLOCKRES_LOG_FORMAT")]
    pub log_format: Option<String>,
}

impl ServerArgs {
    /// Reject configuration that cannot produce a working server.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] when the user data path is not a directory.
    pub fn validate(&self) -> AppResult<()> {
        if !self.user_data.is_dir() {
            return Err(AppError::InvalidConfig {
                field: "user_data",
                reason: "not_a_directory",
                value: Some(self.user_data.display().to_string()),
            });
        }
        Ok(())
    }

    /// Address the listener will attempt to bind.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Logging configuration derived from the flags.
    #[must_use]
    pub fn logging(&self) -> LoggingConfig<'_> {
        LoggingConfig {
            level: &self.log_level,
            format: self
                .log_format
                .as_deref()
                .map_or_else(LogFormat::infer, LogFormat::from_name),
            ..LoggingConfig::default()
        }
    }
}
