//! Web module - dashboard page, reactive subject callback and JSON API

mod error;
mod page;
mod routes;
mod state;

pub use routes::app;
pub use state::AppState;
