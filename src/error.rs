//! Error types for the Racebook application.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for Racebook.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Bet amount is missing, unparseable or not positive.
    #[error("{0}")]
    Validation(String),

    /// Bet amount exceeds the displayed balance.
    #[error("Insufficient balance. Maximum: ${}", .maximum.normalize())]
    InsufficientFunds { maximum: Decimal },

    /// Transport failures and non-success HTTP statuses.
    #[error("Network error: {0}")]
    Network(String),

    /// The bet endpoint refused the bet, optionally with a reason.
    #[error("Bet rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    ServerRejection(Option<String>),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new insufficient funds error.
    pub fn insufficient_funds(maximum: Decimal) -> Self {
        Self::InsufficientFunds { maximum }
    }

    /// Create a new network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new server rejection.
    pub fn rejected(reason: Option<String>) -> Self {
        Self::ServerRejection(reason)
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Check if this error was raised before any request left the client.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InsufficientFunds { .. })
    }

    /// The message shown to the user when a bet could not be placed.
    ///
    /// Server-provided reasons are passed through verbatim. Anything else
    /// collapses to a generic message; the details go to the log.
    pub fn bet_failure_reason(&self) -> &str {
        match self {
            Self::ServerRejection(Some(reason)) => reason,
            _ => "Unknown error",
        }
    }
}
