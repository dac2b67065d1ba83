//! Wire types for the alert server's JSON API.
//!
//! These types match the serialization format the server produces and
//! consumes. They are decoded straight off the wire and handed to the
//! `data` module for processing; nothing here is display-ready.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

fn default_usd_amount() -> f64 {
    100.0
}

/// Full server state from `GET /api/state`.
///
/// Replaced wholesale on every fetch. Absent fields fall back to the
/// server's own defaults so a sparse snapshot still decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Simulated USD amount used for buy/sell price quotes.
    #[serde(default = "default_usd_amount")]
    pub usd_amount: f64,

    /// Configured buy trigger prices, sorted ascending by the server.
    #[serde(default)]
    pub buy_alerts: Vec<f64>,

    /// Configured sell trigger prices, sorted ascending by the server.
    #[serde(default)]
    pub sell_alerts: Vec<f64>,

    /// Recent price samples, capped to the newest 100 by the server.
    #[serde(default)]
    pub latest_prices: Vec<PricePoint>,

    /// Cooldown applied after a trigger fires, in minutes. The server
    /// starts at zero, so an absent field means fired triggers stay off.
    #[serde(default)]
    pub alert_reset_minutes: i64,

    /// When each buy trigger last fired, keyed by 8-decimal price.
    #[serde(default)]
    pub last_triggered_buy: BTreeMap<String, String>,

    /// When each sell trigger last fired, keyed by 8-decimal price.
    #[serde(default)]
    pub last_triggered_sell: BTreeMap<String, String>,
}

/// One price sample from the feed poller.
///
/// The aliases accept rows written by older feed versions that used the
/// short key names.
// TODO: drop the `time`/`buy`/`sell` aliases once the server has migrated
// its stored history to the long key names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(alias = "time")]
    pub timestamp: String,

    #[serde(default, alias = "buy")]
    pub buy_price: Option<f64>,

    #[serde(default, alias = "sell")]
    pub sell_price: Option<f64>,
}

/// Buy or sell direction for simple price triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Wire name, also the path segment of the side-specific endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Capitalized display label.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a token alert watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Price,
    MarketCap,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::Price => "Price",
            AlertKind::MarketCap => "Market Cap",
        }
    }

    pub fn toggle(&self) -> AlertKind {
        match self {
            AlertKind::Price => AlertKind::MarketCap,
            AlertKind::MarketCap => AlertKind::Price,
        }
    }
}

/// Trigger direction for token alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Above,
    Below,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Above => "Above",
            Condition::Below => "Below",
        }
    }

    pub fn toggle(&self) -> Condition {
        match self {
            Condition::Above => Condition::Below,
            Condition::Below => Condition::Above,
        }
    }
}

/// A configured token alert, as returned by `GET /api/alerts`.
///
/// Server-owned: the id is assigned at creation and the list is replaced
/// wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAlert {
    pub id: String,
    pub contract: String,
    pub ticker: String,
    pub pair: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub condition: Condition,
    pub value: f64,
    pub channel_id: String,
    #[serde(default)]
    pub guild_id: String,
}

/// Payload for `POST /api/alerts`; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    pub contract: String,
    pub ticker: String,
    pub pair: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub condition: Condition,
    pub value: f64,
    pub channel_id: String,
    pub guild_id: String,
}

/// Result of a contract-address lookup.
///
/// Ephemeral: discarded once an alert is created or the form closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub ticker: String,
    #[serde(default)]
    pub pairs: Vec<String>,
}

/// Structured error body the server attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_state_snapshot() {
        let json = r#"{
            "usd_amount": 250.0,
            "buy_alerts": [0.00012, 0.00015],
            "sell_alerts": [0.0002],
            "latest_prices": [
                {"timestamp": "2024-05-17T12:00:00", "buy_price": 0.000121, "sell_price": 0.000119}
            ],
            "alert_reset_minutes": 45,
            "last_triggered_buy": {"0.00012000": "2024-05-17T11:58:00"},
            "last_triggered_sell": {},
            "alerts": []
        }"#;

        let snapshot: StateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.usd_amount, 250.0);
        assert_eq!(snapshot.buy_alerts, vec![0.00012, 0.00015]);
        assert_eq!(snapshot.sell_alerts, vec![0.0002]);
        assert_eq!(snapshot.alert_reset_minutes, 45);
        assert_eq!(snapshot.latest_prices.len(), 1);
        assert_eq!(
            snapshot.last_triggered_buy.get("0.00012000").map(String::as_str),
            Some("2024-05-17T11:58:00")
        );
        assert!(snapshot.last_triggered_sell.is_empty());
    }

    #[test]
    fn test_sparse_snapshot_uses_defaults() {
        let snapshot: StateSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.usd_amount, 100.0);
        assert_eq!(snapshot.alert_reset_minutes, 0);
        assert!(snapshot.buy_alerts.is_empty());
        assert!(snapshot.latest_prices.is_empty());
    }

    #[test]
    fn test_price_point_legacy_aliases() {
        let json = r#"{"time": "2024-05-17T12:00:00", "buy": 1.5, "sell": 1.4}"#;
        let point: PricePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.timestamp, "2024-05-17T12:00:00");
        assert_eq!(point.buy_price, Some(1.5));
        assert_eq!(point.sell_price, Some(1.4));
    }

    #[test]
    fn test_price_point_missing_sides() {
        let json = r#"{"timestamp": "2024-05-17T12:00:00"}"#;
        let point: PricePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.buy_price, None);
        assert_eq!(point.sell_price, None);
    }

    #[test]
    fn test_token_alert_kind_uses_type_key() {
        let json = r#"{
            "id": "a1",
            "contract": "So11111111111111111111111111111111111111112",
            "ticker": "SOL",
            "pair": "SOL/USDC",
            "type": "marketcap",
            "condition": "below",
            "value": 1000000.0,
            "channel_id": "123",
            "guild_id": "456"
        }"#;

        let alert: TokenAlert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.kind, AlertKind::MarketCap);
        assert_eq!(alert.condition, Condition::Below);

        let out = serde_json::to_value(&alert).unwrap();
        assert_eq!(out["type"], "marketcap");
        assert_eq!(out["condition"], "below");
    }

    #[test]
    fn test_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"sell\"");
        assert_eq!(Side::Buy.other(), Side::Sell);
    }
}
