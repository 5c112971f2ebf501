pub mod config;
pub mod db;
pub mod error;
pub mod import_export;
pub mod models;
pub mod password;
pub mod slug;
pub mod utils;
pub mod web;

// Re-export error types for convenience
pub use error::{Result, StashError};
