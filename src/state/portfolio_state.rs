//! Balance, bets and positions.

use chrono::{DateTime, Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MarketSnapshot;

/// Side of the binary market a bet backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BetPosition {
    /// The robot completes the race.
    Success,
    /// The robot does not.
    Fail,
}

impl BetPosition {
    /// Short outcome label used next to odds.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::Success => "YES",
            Self::Fail => "NO",
        }
    }
}

impl std::fmt::Display for BetPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Body of `POST /api/place-bet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRequest {
    pub position: BetPosition,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// What the server hands back for an accepted bet.
#[derive(Debug, Clone, PartialEq)]
pub struct BetReceipt {
    /// Balance after the bet. Provisional until reconciled.
    pub new_balance: Decimal,
    /// Market figures including this bet.
    pub market: MarketSnapshot,
}

/// A bet the user holds, as listed by `/api/user-positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBet {
    #[serde(default)]
    pub id: String,
    pub position: BetPosition,
    pub amount: Decimal,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: String,
}

/// Response of `GET /api/user-positions`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPositions {
    pub balance: Decimal,
    #[serde(default)]
    pub positions: Vec<PlacedBet>,
}

/// Portfolio state.
#[derive(Debug, Default, Clone)]
pub struct PortfolioState {
    /// Bets held by the user, in server order (oldest first).
    pub positions: Vec<PlacedBet>,
    /// Last time the authoritative balance was read.
    pub last_reconciled: Option<DateTime<Local>>,
}

impl PortfolioState {
    /// Replace positions with a fresh server read.
    pub fn apply(&mut self, positions: Vec<PlacedBet>) {
        self.positions = positions;
        self.last_reconciled = Some(Local::now());
    }

    /// Positions newest first, for display.
    pub fn newest_first(&self) -> impl Iterator<Item = &PlacedBet> {
        self.positions.iter().rev()
    }

    /// Total amount staked on one side.
    pub fn staked_on(&self, position: BetPosition) -> Decimal {
        self.positions
            .iter()
            .filter(|p| p.position == position)
            .map(|p| p.amount)
            .sum()
    }
}
