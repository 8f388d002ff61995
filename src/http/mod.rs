//! HTTP transport module
//!
//! Provides the HTTP client the REST store speaks through.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Integration with the auth module
//!
//! Retry policy is a transport concern and lives entirely here; the
//! pagination engine never retries on its own.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
