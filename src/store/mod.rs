//! # Response store
//!
//! Captures API responses under string keys so later steps can compare them
//! against what the UI shows.
//!
//! - Reads prefer memory, then `<store-dir>/<sanitized-key>.json`
//! - The most recent `save` for a key wins in memory; the disk copy may lag
//!   behind when a later save skipped persistence
//! - Disk problems are logged and degrade to memory-only operation
//!
//! Each [`ResponseStore`] is an explicit instance owned by a scenario context;
//! nothing is shared between processes except the disk mirror.

pub mod path;
pub mod response_store;


pub use path::{lookup, split_response_path};
pub use response_store::{sanitize_key, ResponseStore, StoredResponse};
