pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::{AppState, Session};
