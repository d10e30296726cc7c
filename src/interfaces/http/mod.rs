pub mod app;
pub mod error;
pub mod routes;
pub mod state;

pub use app::{API_PREFIX, create_app};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
