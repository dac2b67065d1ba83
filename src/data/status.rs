//! Trigger cooldown status computation.
//!
//! The server records when each trigger price last fired; whether that
//! trigger is armed again is derived locally from the timestamp, the
//! configured reset interval, and the current instant. Nothing else feeds
//! the computation, so it lives here as pure functions and is tested with
//! fixed clocks.

use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone, Utc};

/// Arming state of a single trigger price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    /// Armed; fires on the next matching price.
    Active,
    /// Fired once and can never re-arm (zero reset interval).
    Inactive,
    /// Fired recently; re-arms when the remaining time elapses.
    Cooldown(Duration),
}

impl AlertStatus {
    /// Display label, with the remaining cooldown rendered as `MM:SS`.
    pub fn label(&self) -> String {
        match self {
            AlertStatus::Active => "Active".to_string(),
            AlertStatus::Inactive => "Inactive".to_string(),
            AlertStatus::Cooldown(remaining) => {
                format!("Cooldown — ready in {}", format_countdown(*remaining))
            }
        }
    }
}

/// Compute the status of a trigger at `now`.
///
/// `last` is when the trigger last fired, if ever. Elapsed time is in
/// whole milliseconds; clock skew can make it negative, which counts as
/// "not yet elapsed". A zero reset interval means a fired trigger never
/// re-arms: it is Active only up to the trigger instant itself.
pub fn status_at(
    last: Option<DateTime<Utc>>,
    reset_minutes: u32,
    now: DateTime<Utc>,
) -> AlertStatus {
    let Some(last) = last else {
        return AlertStatus::Active;
    };

    let elapsed_ms = (now - last).num_milliseconds();

    if reset_minutes == 0 {
        return if elapsed_ms > 0 {
            AlertStatus::Inactive
        } else {
            AlertStatus::Active
        };
    }

    let reset_ms = i64::from(reset_minutes) * 60_000;
    if elapsed_ms >= reset_ms {
        return AlertStatus::Active;
    }

    AlertStatus::Cooldown(Duration::milliseconds(reset_ms - elapsed_ms))
}

/// Format a remaining duration as `MM:SS`, both fields zero-padded, with
/// floor semantics on partial seconds.
pub fn format_countdown(remaining: Duration) -> String {
    let total_secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Parse a server timestamp into UTC.
///
/// The feed writes two shapes: RFC 3339 with an offset, and naive local
/// time from older poller versions. Anything else is treated as never
/// triggered by callers.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(local.with_timezone(&Utc))
}

/// Key used by the server for the last-trigger maps: the trigger price
/// rendered to exactly 8 decimal places.
pub fn price_key(price: f64) -> String {
    format!("{:.8}", price)
}
