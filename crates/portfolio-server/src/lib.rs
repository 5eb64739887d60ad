//! Portfolio site server
//!
//! Hosts the offline asset cache and the blog and project APIs.

pub mod config;
pub mod error;
pub mod projects;
pub mod server;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::{PortfolioError, Result};
pub use projects::ProjectCatalog;
pub use server::{create_router, start_server, ServerState, SharedState, SiteCache};
pub use storage::SiteStorage;
