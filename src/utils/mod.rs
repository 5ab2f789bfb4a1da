//! Utility modules supporting the pipeline.
//!
//! - [`HttpClient`]: shared HTTP client configured from [`HttpConfig`](crate::config::HttpConfig)

mod http;

pub use http::HttpClient;
