//! Market server integration.
//!
//! This module provides the [`MarketApi`] seam the dashboard talks through
//! and its HTTP implementation.

mod client;
mod types;

pub use client::{HttpMarketClient, HttpMarketClientBuilder, MarketApi};
pub use types::PlaceBetResponse;

#[cfg(test)]
pub use client::MockMarketApi;
