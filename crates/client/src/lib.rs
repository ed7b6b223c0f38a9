//! Upstream client for glimpse.
//!
//! This crate talks to the Wikimedia Commons Action API and reshapes its
//! loosely-typed responses into the uniform result records the server
//! returns to callers.

pub mod commons;

pub use commons::{
    CommonsClient, CommonsConfig, CommonsError, NormalizedResult, PER_PAGE_DEFAULT, PER_PAGE_MAX, PER_PAGE_MIN,
    SearchQuery,
};
