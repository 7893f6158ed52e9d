//! HTTP networking module
//!
//! Provides the HTTP client used to talk to the search engine.

mod client;

pub use client::HttpClient;
