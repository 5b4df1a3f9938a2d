//! shorty - a small file-backed URL shortener
//!
//! Short codes map to long URLs in an in-memory table that is snapshotted
//! to a single JSON file after every change.
//!
//! # Architecture
//! - `utils`: short code generation and validation
//! - `storage`: the link table and its snapshot file
//! - `api`: HTTP services
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
