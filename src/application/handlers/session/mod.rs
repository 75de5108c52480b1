//! Session handlers.
//!
//! A session stores the topic, products, criteria, scores and product
//! details for one decision so the user can come back to it.

mod create_session;
mod delete_session;
mod get_session;
mod save_session;
mod snapshot;

pub use create_session::{CreateSessionHandler, CreateSessionResult};
pub use delete_session::DeleteSessionHandler;
pub use get_session::{GetSessionHandler, RankSessionHandler};
pub use save_session::{SaveSessionCommand, SaveSessionHandler};
pub use snapshot::{
    DecisionSession, SessionError, CRITERIA_KEY, PRODUCTS_KEY, PRODUCT_DETAILS_KEY, SCORES_KEY,
    TOPIC_KEY,
};
