pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod resources;
pub mod sanitize;
pub mod types;

pub use app::{app, AppState};
