//! # API client
//!
//! Thin reqwest wrapper used by scenarios to call the backend whose data the
//! UI is later checked against.

pub mod client;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
pub use types::{ApiResponse, HttpMethod};
