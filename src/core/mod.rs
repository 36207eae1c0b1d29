pub mod config;
pub mod error;
pub mod generate;
pub mod local_files;
pub mod offer;
pub mod page;
pub mod sitemap;
pub mod slugify;
pub mod variant;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
