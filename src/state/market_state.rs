//! Market and race state as reported by the server.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time odds, volume and participant figures for the binary outcome.
///
/// Odds are percentages. They are expected to sum to 100, but that is the
/// server's responsibility and is not checked here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub success_odds: f64,
    pub fail_odds: f64,
    pub total_volume: Decimal,
    pub participants: u64,
    pub success_volume: Decimal,
    pub fail_volume: Decimal,
}

/// Progress of the robot race the market is tied to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RaceStatus {
    /// Free-form status text (e.g. "RUNNING", "OFFLINE").
    pub status: String,
    /// Seconds since the race started.
    #[serde(rename = "time")]
    pub elapsed_seconds: u64,
    pub score: f64,
}

/// One read of `/api/market-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketUpdate {
    #[serde(flatten)]
    pub race: RaceStatus,
    pub market: MarketSnapshot,
    /// Server-side time of the read, if provided.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl MarketUpdate {
    /// Build an update without a server timestamp.
    pub fn new(race: RaceStatus, market: MarketSnapshot) -> Self {
        Self {
            race,
            market,
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_update_from_server_json() {
        let json = r#"{
            "status": "RUNNING",
            "time": 42,
            "score": 87,
            "market": {
                "success_odds": 62.5,
                "fail_odds": 37.5,
                "success_volume": 250,
                "fail_volume": 150.5,
                "total_volume": 400.5,
                "participants": 7
            },
            "timestamp": "2026-03-01T14:05:09.123456"
        }"#;

        let update: MarketUpdate = serde_json::from_str(json).unwrap();

        assert_eq!(
            update.race,
            RaceStatus {
                status: "RUNNING".to_string(),
                elapsed_seconds: 42,
                score: 87.0,
            }
        );
        assert_eq!(update.market.success_volume, dec!(250));
        assert_eq!(update.market.fail_volume, dec!(150.5));
        assert_eq!(update.market.participants, 7);
        assert!(update.timestamp.is_some());
    }

    #[test]
    fn test_market_update_without_timestamp() {
        let json = r#"{
            "status": "OFFLINE", "time": 0, "score": 0,
            "market": {
                "success_odds": 50, "fail_odds": 50,
                "success_volume": 0, "fail_volume": 0,
                "total_volume": 0, "participants": 0
            }
        }"#;

        let update: MarketUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.timestamp, None);
        assert_eq!(update.market.success_odds, 50.0);
    }
}
