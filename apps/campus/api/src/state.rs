//! Application state shared by the app-level handlers.

use domain_learning_components::MapperRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Registry used by the component service, checked by `/ready`
    pub registry: Arc<MapperRegistry>,
}
