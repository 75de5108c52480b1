//! HTTP adapters - REST API implementations.
//!
//! - `decision` - criteria, detail and score suggestion plus ranking
//! - `session` - saved decision sessions

pub mod decision;
pub mod session;

mod error;
mod router;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, app_router, HttpOptions};
pub use state::AppState;
