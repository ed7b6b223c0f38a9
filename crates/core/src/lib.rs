//! Core types and shared functionality for glimpse.
//!
//! This crate provides:
//! - Configuration structures with layered loading
//! - The keyword safety filter
//! - The per-client rate limiter

pub mod config;
pub mod filter;
pub mod limit;

pub use config::AppConfig;
pub use filter::{SafeMode, SafetyFilter};
pub use limit::RateLimiter;
