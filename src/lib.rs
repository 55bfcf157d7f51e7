//! # Racebook - robot race betting terminal
//!
//! A terminal client for a parimutuel betting market on a live robot race.
//! Users stake play money on whether the robot finishes (YES) or fails (NO)
//! while the client polls the market server and charts the pools.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle and the main event loop
//! - **API**: HTTP client for the market server
//! - **Dashboard**: Display surfaces, volume history and the bet form
//! - **Sync**: Periodic market polling
//! - **Betting**: Bet submission and balance reconciliation
//! - **State**: Actions and the reducer-style store
//! - **Events**: Terminal input and key bindings
//! - **UI**: ratatui widgets over the dashboard surfaces
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod betting;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod state;
pub mod sync;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
