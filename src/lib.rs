pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ServiceConfig;
pub use core::inserter::ImageInserter;
pub use server::{build_router, AppState};
pub use utils::error::{HookError, Result};
