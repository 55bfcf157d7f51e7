//! Wire types that never leave the API layer.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::state::{BetReceipt, MarketSnapshot};

/// Body returned by `POST /api/place-bet`, for both outcomes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceBetResponse {
    pub success: bool,
    pub new_balance: Option<Decimal>,
    pub market_data: Option<MarketSnapshot>,
    pub error: Option<String>,
}

impl PlaceBetResponse {
    /// Accepted bets become a receipt; everything else is a rejection
    /// carrying the server's message, if any.
    pub fn into_receipt(self) -> Result<BetReceipt> {
        if !self.success {
            return Err(Error::rejected(self.error));
        }

        match (self.new_balance, self.market_data) {
            (Some(new_balance), Some(market)) => Ok(BetReceipt {
                new_balance,
                market,
            }),
            _ => Err(Error::rejected(Some(
                "Malformed response from server".to_string(),
            ))),
        }
    }
}
