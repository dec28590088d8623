pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod prompts;
pub mod state;
pub mod users;

pub use app::{build_router, ApiDoc};
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
