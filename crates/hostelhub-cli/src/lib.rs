//! # HostelHub CLI
//!
//! Administrative commands and database seeding for HostelHub.
//!
//! This library crate provides the functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use hostelhub_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10); // 10 owners with defaults
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
pub mod super_admin;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;
