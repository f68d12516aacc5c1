pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;

pub use error::{AppError, AppResult};
