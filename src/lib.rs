pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod db;
pub mod error;
pub mod loader;
pub mod models;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use models::*;
pub use store::RecordStore;
