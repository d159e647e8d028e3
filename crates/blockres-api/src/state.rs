//! Request-time state shared by every handler.

use std::path::Path;
use std::sync::Arc;

use blockres_catalog::CatalogIndex;
use tower_http::services::ServeDir;

/// Read-only dependencies handed to handlers through axum state.
#[derive(Clone)]
pub(crate) struct ResourceState {
    pub(crate) index: Arc<CatalogIndex>,
    pub(crate) assets: ServeDir,
}

impl ResourceState {
    pub(crate) fn new(index: Arc<CatalogIndex>, user_data_path: &Path) -> Self {
        Self {
            index,
            assets: ServeDir::new(user_data_path),
        }
    }
}
