//! Snapshot processing for display.
//!
//! Transforms the raw `/api/state` snapshot into display-ready data:
//! trigger prices joined with their last-fire instants through the
//! server's 8-decimal price keys, the reset interval clamped to a usable
//! range, and the price history handed to the charting layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::history::PriceHistory;
use super::status::{parse_timestamp, price_key, status_at, AlertStatus};
use crate::api::wire::{Side, StateSnapshot};

/// One configured trigger price on one side.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    /// Target price in USDC.
    pub price: f64,
    /// This trigger's key in the server's last-fired map.
    pub key: String,
    /// When this trigger last fired, if ever. Unparseable server
    /// timestamps degrade to `None`.
    pub last_triggered: Option<DateTime<Utc>>,
}

impl Trigger {
    /// Status at `now` under the given reset interval.
    pub fn status_at(&self, reset_minutes: u32, now: DateTime<Utc>) -> AlertStatus {
        status_at(self.last_triggered, reset_minutes, now)
    }
}

/// Trigger counts per status, for the header line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub active: usize,
    pub cooldown: usize,
    pub inactive: usize,
}

/// Server state processed for display. Replaced wholesale on every fetch.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub usd_amount: f64,
    pub buy_triggers: Vec<Trigger>,
    pub sell_triggers: Vec<Trigger>,
    pub reset_minutes: u32,
    pub history: PriceHistory,
}

impl Dashboard {
    /// Build display state from a raw snapshot.
    pub fn from_snapshot(snapshot: StateSnapshot) -> Self {
        let buy_triggers = join_triggers(&snapshot.buy_alerts, &snapshot.last_triggered_buy);
        let sell_triggers = join_triggers(&snapshot.sell_alerts, &snapshot.last_triggered_sell);
        let reset_minutes =
            u32::try_from(snapshot.alert_reset_minutes.max(0)).unwrap_or(u32::MAX);

        Self {
            usd_amount: snapshot.usd_amount,
            buy_triggers,
            sell_triggers,
            reset_minutes,
            history: PriceHistory::from_points(snapshot.latest_prices),
        }
    }

    /// Triggers for one side, in the server's (ascending) order.
    pub fn triggers(&self, side: Side) -> &[Trigger] {
        match side {
            Side::Buy => &self.buy_triggers,
            Side::Sell => &self.sell_triggers,
        }
    }

    /// Count triggers per status across both sides at `now`.
    pub fn status_counts(&self, now: DateTime<Utc>) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for trigger in self.buy_triggers.iter().chain(&self.sell_triggers) {
            match trigger.status_at(self.reset_minutes, now) {
                AlertStatus::Active => counts.active += 1,
                AlertStatus::Cooldown(_) => counts.cooldown += 1,
                AlertStatus::Inactive => counts.inactive += 1,
            }
        }
        counts
    }
}

fn join_triggers(prices: &[f64], last_fired: &BTreeMap<String, String>) -> Vec<Trigger> {
    prices
        .iter()
        .map(|&price| {
            let key = price_key(price);
            let last_triggered = last_fired.get(&key).and_then(|raw| parse_timestamp(raw));
            Trigger {
                price,
                key,
                last_triggered,
            }
        })
        .collect()
}
