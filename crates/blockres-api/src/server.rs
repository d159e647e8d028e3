//! # Design
//!
//! - Construction loads translations and builds the whole catalog index before any socket exists.
//! - `listen` reports readiness or the bind failure through its return value; nothing is retried.
//! - The running server owns its listener task; dropping the handle stops it gracefully.

use std::future::{Future, pending, ready};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use blockres_catalog::{CatalogAssembler, CatalogIndex, default_assemblers};
use blockres_i18n::{LocaleCode, TRANSLATIONS_FILE, TranslationTable};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::{ServerError, ServerResult};
use crate::http::router::build_router;
use crate::state::ResourceState;

/// Port used when `listen` is not given one.
pub const DEFAULT_PORT: u16 = 20120;
/// Interface the listener binds unless overridden.
pub const DEFAULT_BIND_IP: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Resource server with its catalog index built and ready to listen.
pub struct ResourceServer {
    user_data_path: PathBuf,
    bind_ip: IpAddr,
    index: Arc<CatalogIndex>,
}

impl ResourceServer {
    /// Load translations from `user_data_path` and build the index with the built-in assemblers.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Translations`] when `locales.json` is missing or malformed and
    /// [`ServerError::Index`] when any catalog cell cannot be assembled.
    pub fn new(user_data_path: impl Into<PathBuf>) -> ServerResult<Self> {
        Self::with_assemblers(user_data_path, &default_assemblers())
    }

    /// Construct the server with a caller-supplied set of assemblers.
    ///
    /// # Errors
    ///
    /// Same as [`ResourceServer::new`].
    pub fn with_assemblers(
        user_data_path: impl Into<PathBuf>,
        assemblers: &[Box<dyn CatalogAssembler>],
    ) -> ServerResult<Self> {
        let user_data_path = user_data_path.into();
        let table = TranslationTable::load(&user_data_path.join(TRANSLATIONS_FILE))
            .map_err(|source| ServerError::Translations { source })?;
        let index = CatalogIndex::build(
            &user_data_path,
            assemblers,
            &LocaleCode::ALL,
            &Arc::new(table),
        )
        .map_err(|source| ServerError::Index { source })?;
        info!(
            user_data = %user_data_path.display(),
            documents = index.len(),
            "catalog index ready"
        );
        Ok(Self {
            user_data_path,
            bind_ip: DEFAULT_BIND_IP,
            index: Arc::new(index),
        })
    }

    /// Bind the listener to `bind_ip` instead of every interface.
    #[must_use]
    pub fn with_bind_ip(mut self, bind_ip: IpAddr) -> Self {
        self.bind_ip = bind_ip;
        self
    }

    /// Precomputed catalog documents.
    #[must_use]
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Directory that catalogs and static assets are read from.
    #[must_use]
    pub fn user_data_path(&self) -> &Path {
        &self.user_data_path
    }

    /// Router serving catalog documents and static assets, without a listener.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::new(ResourceState::new(
            Arc::clone(&self.index),
            &self.user_data_path,
        )))
    }

    /// Bind `port` (or [`DEFAULT_PORT`]) and start serving in a background task.
    ///
    /// `Ok` is the ready notification; no retry is attempted on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the listener cannot be bound.
    pub async fn listen(&self, port: Option<u16>) -> ServerResult<RunningServer> {
        let addr = SocketAddr::new(self.bind_ip, port.unwrap_or(DEFAULT_PORT));
        let bound = match TcpListener::bind(addr).await {
            Ok(listener) => listener.local_addr().map(|local_addr| (listener, local_addr)),
            Err(err) => Err(err),
        };
        let (listener, local_addr) = bound.map_err(|source| {
            error!(addr = %addr, error = %source, "failed to bind resource listener");
            ServerError::Bind { addr, source }
        })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router();
        let task = tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });
        info!(addr = %local_addr, "resource server listening");

        Ok(RunningServer {
            local_addr,
            shutdown: shutdown_tx,
            task,
        })
    }
}

/// Handle to a listening server.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Address the listener is bound to (useful when port `0` was requested).
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `signal` resolves, then drain in-flight requests and stop.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] or [`ServerError::Task`] if serving fails.
    pub async fn serve_until<F>(self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        let Self {
            local_addr,
            shutdown,
            mut task,
        } = self;
        tokio::select! {
            joined = &mut task => return flatten_join(joined),
            () = signal => {}
        }
        info!(addr = %local_addr, "resource server shutting down");
        let _ = shutdown.send(());
        flatten_join(task.await)
    }

    /// Serve until the server stops on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] or [`ServerError::Task`] if serving fails.
    pub async fn wait(self) -> ServerResult<()> {
        self.serve_until(pending()).await
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] or [`ServerError::Task`] if serving had failed.
    pub async fn shutdown(self) -> ServerResult<()> {
        self.serve_until(ready(())).await
    }
}

fn flatten_join(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> ServerResult<()> {
    joined
        .map_err(|source| ServerError::Task { source })?
        .map_err(|source| ServerError::Serve { source })
}

/// Lifecycle notification derived from a `listen` outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// The listener is installed and serving.
    Ready {
        /// Bound address.
        addr: SocketAddr,
    },
    /// The listen attempt failed.
    Error {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl ServerEvent {
    /// Summarise a `listen` result as a single notification.
    #[must_use]
    pub fn from_listen(outcome: &ServerResult<RunningServer>) -> Self {
        match outcome {
            Ok(running) => Self::Ready {
                addr: running.local_addr(),
            },
            Err(ServerError::Bind { addr, source }) => Self::Error {
                message: format!(
                    "Error while trying to listen port {}: {source}",
                    addr.port()
                ),
            },
            Err(other) => Self::Error {
                message: other.to_string(),
            },
        }
    }
}
