//! Pennywise - expense and savings tracker
//!
//! This library provides the core functionality for the Pennywise
//! application: recording expenses and monthly earnings, and aggregating them
//! into monthly totals, category breakdowns and savings.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, earnings, money, months)
//! - `storage`: The `RecordStore` trait and its JSON file implementation
//! - `services`: Month queries, aggregation, caching and mutations
//! - `audit`: Audit logging system
//! - `display`, `reports`, `export`: Terminal and CSV output
//! - `cli`: Command handlers for the `pennywise` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pennywise::config::{paths::PennywisePaths, settings::Settings};
//! use pennywise::services::{QueryService, SummaryCache};
//! use pennywise::storage::Storage;
//!
//! let paths = PennywisePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let cache = SummaryCache::new(settings.cache_enabled);
//! let query = QueryService::new(&storage, &cache, settings.calendar_zone);
//! let summary = query.monthly_summary(month)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PennywiseError, PennywiseResult};
