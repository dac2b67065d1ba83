//! Price history backing the chart.

use chrono::Local;

use super::status::parse_timestamp;
use crate::api::wire::PricePoint;

/// Server-side cap on history length, one entry per poll cycle.
const MAX_POINTS: usize = 100;

/// Ordered price samples, oldest first.
///
/// Holds whatever the last snapshot carried; cleared explicitly after a
/// USD amount change so the chart rebuilds from the next poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Build from snapshot points, keeping only the newest [`MAX_POINTS`].
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        if points.len() > MAX_POINTS {
            points.drain(..points.len() - MAX_POINTS);
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Buy price of the newest sample, if it carried one.
    pub fn latest_buy(&self) -> Option<f64> {
        self.points.last().and_then(|p| p.buy_price)
    }

    /// Sell price of the newest sample, if it carried one.
    pub fn latest_sell(&self) -> Option<f64> {
        self.points.last().and_then(|p| p.sell_price)
    }

    /// Buy series as (index, price) pairs, skipping samples without one.
    pub fn buy_series(&self) -> Vec<(f64, f64)> {
        self.series(|p| p.buy_price)
    }

    /// Sell series as (index, price) pairs, skipping samples without one.
    pub fn sell_series(&self) -> Vec<(f64, f64)> {
        self.series(|p| p.sell_price)
    }

    fn series(&self, value: impl Fn(&PricePoint) -> Option<f64>) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| value(p).map(|v| (i as f64, v)))
            .collect()
    }

    /// Min and max across both series, padded so a flat line still has a
    /// visible band around it.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in &self.points {
            for value in [point.buy_price, point.sell_price].into_iter().flatten() {
                min = min.min(value);
                max = max.max(value);
            }
        }
        if !min.is_finite() {
            return None;
        }
        if (max - min).abs() < f64::EPSILON {
            let pad = (min.abs() * 0.01).max(1e-8);
            Some((min - pad, max + pad))
        } else {
            Some((min, max))
        }
    }

    /// Short clock labels for the x-axis, from the oldest and newest
    /// samples. Unparseable timestamps are shown raw.
    pub fn time_labels(&self) -> Option<(String, String)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((short_time(&first.timestamp), short_time(&last.timestamp)))
    }
}

fn short_time(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ts: &str, buy: Option<f64>, sell: Option<f64>) -> PricePoint {
        PricePoint {
            timestamp: ts.to_string(),
            buy_price: buy,
            sell_price: sell,
        }
    }

    #[test]
    fn test_caps_to_newest_points() {
        let points: Vec<PricePoint> = (0..150)
            .map(|i| point(&format!("t{}", i), Some(i as f64), None))
            .collect();

        let history = PriceHistory::from_points(points);
        assert_eq!(history.len(), 100);
        // oldest 50 dropped
        assert_eq!(history.buy_series().first(), Some(&(0.0, 50.0)));
        assert_eq!(history.latest_buy(), Some(149.0));
    }

    #[test]
    fn test_series_skip_missing_values() {
        let history = PriceHistory::from_points(vec![
            point("a", Some(1.0), None),
            point("b", None, Some(2.0)),
            point("c", Some(3.0), Some(4.0)),
        ]);

        assert_eq!(history.buy_series(), vec![(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(history.sell_series(), vec![(1.0, 2.0), (2.0, 4.0)]);
    }

    #[test]
    fn test_latest_prices_come_from_newest_sample_only() {
        let history = PriceHistory::from_points(vec![
            point("a", Some(1.0), Some(1.0)),
            point("b", None, Some(2.0)),
        ]);

        assert_eq!(history.latest_buy(), None);
        assert_eq!(history.latest_sell(), Some(2.0));
    }

    #[test]
    fn test_bounds_span_both_series() {
        let history = PriceHistory::from_points(vec![
            point("a", Some(1.0), Some(5.0)),
            point("b", Some(0.5), Some(4.0)),
        ]);

        assert_eq!(history.price_bounds(), Some((0.5, 5.0)));
    }

    #[test]
    fn test_flat_line_bounds_get_padding() {
        let history = PriceHistory::from_points(vec![
            point("a", Some(2.0), None),
            point("b", Some(2.0), None),
        ]);

        let (min, max) = history.price_bounds().unwrap();
        assert!(min < 2.0);
        assert!(max > 2.0);
    }

    #[test]
    fn test_empty_history() {
        let mut history = PriceHistory::from_points(vec![point("a", Some(1.0), None)]);
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.price_bounds(), None);
        assert_eq!(history.time_labels(), None);
        assert_eq!(history.latest_buy(), None);
    }
}
