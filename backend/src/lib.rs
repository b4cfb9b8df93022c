pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;

pub use config::{Config, ConfigError, StoreBackend};
pub use error::{ApiError, ErrorResponse, Result as ApiResult};
pub use routes::{build_router, AppState};
