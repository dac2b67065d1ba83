//! Application state and navigation logic.

use std::time::Instant;

use crate::api::wire::{Side, TokenAlert};
use crate::api::{Action, ApiEvent, ApiHandle, Command};
use crate::data::Dashboard;
use crate::form::AlertForm;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// The alert creation form and help are shown as overlays rather than as
/// separate views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Prices, chart and trigger status counts.
    Overview,
    /// Buy/sell trigger prices with cooldown status.
    Triggers,
    /// Token alerts list.
    Tokens,
    /// USD amount and reset minutes.
    Settings,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Triggers,
            View::Triggers => View::Tokens,
            View::Tokens => View::Settings,
            View::Settings => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Settings,
            View::Triggers => View::Overview,
            View::Tokens => View::Triggers,
            View::Settings => View::Tokens,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Triggers => "Triggers",
            View::Tokens => "Tokens",
            View::Settings => "Settings",
        }
    }
}

/// Where an inline numeric edit goes when submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// New trigger price for one side.
    TriggerPrice(Side),
    /// Simulated USD amount.
    UsdAmount,
    /// Cooldown minutes.
    ResetMinutes,
}

/// A single-line numeric edit in progress.
///
/// Stays open on validation or server failure so the text can be fixed;
/// closed by the matching success event or Esc.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineInput {
    pub target: InputTarget,
    pub buffer: String,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Server data
    api: ApiHandle,
    pub dashboard: Option<Dashboard>,
    pub alerts: Vec<TokenAlert>,
    pub load_error: Option<String>,
    pub last_updated: Option<Instant>,

    // Navigation state
    pub trigger_side: Side,
    pub selected_trigger: usize,
    pub selected_alert: usize,
    pub selected_setting: usize,

    // Editing state
    pub input: Option<InlineInput>,
    pub form: Option<AlertForm>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App talking to the given worker handle.
    pub fn new(api: ApiHandle, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            api,
            dashboard: None,
            alerts: Vec::new(),
            load_error: None,
            last_updated: None,
            trigger_side: Side::Buy,
            selected_trigger: 0,
            selected_alert: 0,
            selected_setting: 0,
            input: None,
            form: None,
            theme,
            status_message: None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Queue a state reload.
    pub fn request_state(&self) {
        self.api.send(Command::FetchState);
    }

    /// Queue an alert list reload.
    pub fn request_alerts(&self) {
        self.api.send(Command::FetchAlerts);
    }

    /// Reload everything the dashboard shows.
    pub fn refresh(&self) {
        self.request_state();
        self.request_alerts();
    }

    /// Drain worker completions and fold them into the state.
    ///
    /// Called once per frame; never blocks.
    pub fn drain_api(&mut self) {
        for event in self.api.poll() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::State(snapshot) => {
                self.dashboard = Some(Dashboard::from_snapshot(snapshot));
                self.load_error = None;
                self.last_updated = Some(Instant::now());
                self.clamp_selections();
            }
            ApiEvent::Alerts(alerts) => {
                self.alerts = alerts;
                self.clamp_selections();
            }
            ApiEvent::TokenInfo(info) => {
                // Ignored if the form was closed while the lookup ran
                if let Some(form) = &mut self.form {
                    form.apply_token_info(info);
                }
            }
            ApiEvent::AlertCreated => {
                self.form = None;
                self.set_status_message("Alert added".to_string());
                self.request_alerts();
            }
            ApiEvent::AlertDeleted => {
                self.set_status_message("Alert removed".to_string());
                self.request_alerts();
            }
            ApiEvent::UsdUpdated(value) => {
                // The server recomputes quotes from the next poll; the old
                // history is priced against the old amount, so drop it
                // rather than refetch.
                if let Some(dashboard) = &mut self.dashboard {
                    dashboard.usd_amount = value;
                    dashboard.history.clear();
                }
                self.close_input_for(InputTarget::UsdAmount);
                self.set_status_message("USD amount updated".to_string());
            }
            ApiEvent::ResetMinutesUpdated(_) => {
                self.close_input_for(InputTarget::ResetMinutes);
                self.set_status_message("Reset minutes updated".to_string());
                self.request_state();
            }
            ApiEvent::TriggerAdded(side) => {
                self.close_input_for(InputTarget::TriggerPrice(side));
                self.set_status_message(format!("{} alert added", side.label()));
                self.request_state();
            }
            ApiEvent::TriggerRemoved(side) => {
                self.set_status_message(format!("{} alert removed", side.label()));
                self.request_state();
            }
            ApiEvent::TriggerReset(side) => {
                self.set_status_message(format!("Reset {} alert", side.label()));
                self.request_state();
            }
            ApiEvent::Failed { action, message } => {
                if matches!(action, Action::LoadState | Action::LoadAlerts) {
                    self.load_error = Some(message.clone());
                }
                if action == Action::LookupToken {
                    if let Some(form) = &mut self.form {
                        form.lookup_pending = false;
                    }
                }
                self.set_status_message(message);
            }
        }
    }

    /// Open an inline edit, seeded with the current value where one exists.
    pub fn open_input(&mut self, target: InputTarget) {
        let buffer = match (target, &self.dashboard) {
            (InputTarget::UsdAmount, Some(d)) => format!("{}", d.usd_amount),
            (InputTarget::ResetMinutes, Some(d)) => d.reset_minutes.to_string(),
            _ => String::new(),
        };
        self.input = Some(InlineInput { target, buffer });
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    fn close_input_for(&mut self, target: InputTarget) {
        if self.input.as_ref().is_some_and(|input| input.target == target) {
            self.input = None;
        }
    }

    /// Validate the open inline edit and queue the matching request.
    pub fn submit_input(&mut self) {
        let Some(input) = self.input.clone() else {
            return;
        };
        match input.target {
            InputTarget::TriggerPrice(side) => self.submit_trigger_price(side, &input.buffer),
            InputTarget::UsdAmount => self.submit_usd_amount(&input.buffer),
            InputTarget::ResetMinutes => self.submit_reset_minutes(&input.buffer),
        }
    }

    fn submit_trigger_price(&mut self, side: Side, raw: &str) {
        match raw.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => {
                self.api.send(Command::AddTrigger { side, price });
            }
            _ => self.set_status_message("Invalid price value".to_string()),
        }
    }

    fn submit_usd_amount(&mut self, raw: &str) {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => {
                self.api.send(Command::SetUsdAmount { value });
            }
            _ => self.set_status_message("Invalid USD amount".to_string()),
        }
    }

    fn submit_reset_minutes(&mut self, raw: &str) {
        match raw.parse::<i64>() {
            Ok(minutes) if minutes >= 0 => {
                self.api.send(Command::SetResetMinutes { minutes });
            }
            _ => self.set_status_message("Invalid reset minutes".to_string()),
        }
    }

    /// Open the alert creation form.
    pub fn open_form(&mut self) {
        self.form = Some(AlertForm::new());
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Queue a ticker/pair lookup for the form's contract address.
    pub fn lookup_token(&mut self) {
        let contract = match &self.form {
            Some(form) if !form.contract.is_empty() => form.contract.clone(),
            Some(_) => {
                self.set_status_message("Enter a contract address".to_string());
                return;
            }
            None => return,
        };
        if let Some(form) = &mut self.form {
            form.lookup_pending = true;
        }
        self.api.send(Command::LookupToken { contract });
    }

    /// Validate the form and queue alert creation.
    pub fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        match form.validate() {
            Ok(alert) => self.api.send(Command::CreateAlert { alert }),
            Err(message) => self.set_status_message(message.to_string()),
        }
    }

    /// Queue deletion of the selected token alert.
    pub fn delete_selected_alert(&mut self) {
        if let Some(alert) = self.alerts.get(self.selected_alert) {
            self.api.send(Command::DeleteAlert {
                id: alert.id.clone(),
            });
        }
    }

    /// Queue removal of the selected trigger price.
    pub fn remove_selected_trigger(&mut self) {
        if let Some(price) = self.selected_trigger_price() {
            self.api.send(Command::RemoveTrigger {
                side: self.trigger_side,
                price,
            });
        }
    }

    /// Queue a cooldown reset for the selected trigger price.
    pub fn reset_selected_trigger(&mut self) {
        if let Some(price) = self.selected_trigger_price() {
            self.api.send(Command::ResetTrigger {
                side: self.trigger_side,
                price,
            });
        }
    }

    fn selected_trigger_price(&self) -> Option<f64> {
        let dashboard = self.dashboard.as_ref()?;
        dashboard
            .triggers(self.trigger_side)
            .get(self.selected_trigger)
            .map(|t| t.price)
    }

    /// Switch between the buy and sell trigger tables.
    pub fn toggle_side(&mut self) {
        self.trigger_side = self.trigger_side.other();
        self.clamp_selections();
    }

    /// Switch to the next view (cycles Overview → Triggers → Tokens → Settings).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Triggers => {
                let max = self.trigger_count().saturating_sub(1);
                self.selected_trigger = (self.selected_trigger + n).min(max);
            }
            View::Tokens => {
                let max = self.alerts.len().saturating_sub(1);
                self.selected_alert = (self.selected_alert + n).min(max);
            }
            View::Settings => {
                self.selected_setting = (self.selected_setting + n).min(1);
            }
            View::Overview => {}
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Triggers => self.selected_trigger = self.selected_trigger.saturating_sub(n),
            View::Tokens => self.selected_alert = self.selected_alert.saturating_sub(n),
            View::Settings => self.selected_setting = self.selected_setting.saturating_sub(n),
            View::Overview => {}
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Triggers => self.selected_trigger = 0,
            View::Tokens => self.selected_alert = 0,
            View::Settings => self.selected_setting = 0,
            View::Overview => {}
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Triggers => {
                self.selected_trigger = self.trigger_count().saturating_sub(1);
            }
            View::Tokens => {
                self.selected_alert = self.alerts.len().saturating_sub(1);
            }
            View::Settings => self.selected_setting = 1,
            View::Overview => {}
        }
    }

    /// Triggers shown on the currently selected side.
    pub fn trigger_count(&self) -> usize {
        self.dashboard
            .as_ref()
            .map(|d| d.triggers(self.trigger_side).len())
            .unwrap_or(0)
    }

    fn clamp_selections(&mut self) {
        self.selected_trigger = self
            .selected_trigger
            .min(self.trigger_count().saturating_sub(1));
        self.selected_alert = self.selected_alert.min(self.alerts.len().saturating_sub(1));
    }

    /// Navigate back: close overlays first, then return to Overview.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.form.is_some() {
            self.form = None;
            return;
        }
        if self.input.is_some() {
            self.input = None;
            return;
        }
        if self.current_view != View::Overview {
            self.current_view = View::Overview;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wire::{AlertKind, Condition, StateSnapshot, TokenInfo};
    use crate::ui::Theme;
    use tokio::sync::mpsc;

    fn test_app() -> (App, mpsc::UnboundedReceiver<Command>, mpsc::Sender<ApiEvent>) {
        let (api, commands, events) = ApiHandle::detached();
        (App::new(api, Theme::dark()), commands, events)
    }

    fn snapshot_with_triggers(buy: Vec<f64>, sell: Vec<f64>) -> StateSnapshot {
        StateSnapshot {
            usd_amount: 100.0,
            buy_alerts: buy,
            sell_alerts: sell,
            latest_prices: vec![],
            alert_reset_minutes: 30,
            last_triggered_buy: Default::default(),
            last_triggered_sell: Default::default(),
        }
    }

    fn token_alert(id: &str) -> TokenAlert {
        TokenAlert {
            id: id.to_string(),
            contract: "So1".to_string(),
            ticker: "SOL".to_string(),
            pair: "SOL/USDC".to_string(),
            kind: AlertKind::Price,
            condition: Condition::Above,
            value: 150.0,
            channel_id: "123".to_string(),
            guild_id: String::new(),
        }
    }

    #[test]
    fn test_state_event_replaces_dashboard_and_clears_error() {
        let (mut app, _commands, events) = test_app();
        app.load_error = Some("Failed to load state".to_string());

        events
            .try_send(ApiEvent::State(snapshot_with_triggers(vec![0.1], vec![])))
            .unwrap();
        app.drain_api();

        assert!(app.load_error.is_none());
        assert!(app.last_updated.is_some());
        let dashboard = app.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.buy_triggers.len(), 1);
    }

    #[test]
    fn test_load_failure_keeps_prior_state() {
        let (mut app, _commands, events) = test_app();
        events
            .try_send(ApiEvent::State(snapshot_with_triggers(vec![0.1], vec![])))
            .unwrap();
        app.drain_api();

        events
            .try_send(ApiEvent::Failed {
                action: Action::LoadState,
                message: "Failed to load state".to_string(),
            })
            .unwrap();
        app.drain_api();

        // Data survives, the failure shows up as error + toast
        assert!(app.dashboard.is_some());
        assert_eq!(app.load_error.as_deref(), Some("Failed to load state"));
        assert_eq!(app.get_status_message(), Some("Failed to load state"));
    }

    #[test]
    fn test_usd_update_clears_history_without_refetch() {
        let (mut app, mut commands, events) = test_app();
        let mut snapshot = snapshot_with_triggers(vec![], vec![]);
        snapshot.latest_prices = vec![crate::api::wire::PricePoint {
            timestamp: "2024-05-17T12:00:00".to_string(),
            buy_price: Some(1.0),
            sell_price: None,
        }];
        events.try_send(ApiEvent::State(snapshot)).unwrap();
        app.drain_api();
        assert!(!app.dashboard.as_ref().unwrap().history.is_empty());

        events.try_send(ApiEvent::UsdUpdated(250.0)).unwrap();
        app.drain_api();

        let dashboard = app.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.usd_amount, 250.0);
        assert!(dashboard.history.is_empty());
        assert_eq!(app.get_status_message(), Some("USD amount updated"));
        // No reload queued; the next poll refills the chart
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn test_alert_created_closes_form_and_reloads_alerts() {
        let (mut app, mut commands, events) = test_app();
        app.open_form();

        events.try_send(ApiEvent::AlertCreated).unwrap();
        app.drain_api();

        assert!(app.form.is_none());
        assert_eq!(app.get_status_message(), Some("Alert added"));
        assert_eq!(commands.try_recv(), Ok(Command::FetchAlerts));
    }

    #[test]
    fn test_delete_failure_leaves_alerts_untouched() {
        let (mut app, mut commands, events) = test_app();
        events
            .try_send(ApiEvent::Alerts(vec![token_alert("a1")]))
            .unwrap();
        app.drain_api();

        events
            .try_send(ApiEvent::Failed {
                action: Action::DeleteAlert,
                message: "Alert not found".to_string(),
            })
            .unwrap();
        app.drain_api();

        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.get_status_message(), Some("Alert not found"));
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn test_submit_form_requires_every_field() {
        let (mut app, mut commands, _events) = test_app();
        app.open_form();
        if let Some(form) = &mut app.form {
            form.contract = "So1".to_string();
            form.apply_token_info(TokenInfo {
                ticker: "SOL".to_string(),
                pairs: vec!["SOL/USDC".to_string()],
            });
            form.value = "150".to_string();
            // channel id left empty
        }

        app.submit_form();

        assert!(commands.try_recv().is_err());
        assert_eq!(app.get_status_message(), Some("Fill all fields"));
        assert!(app.form.is_some());
    }

    #[test]
    fn test_invalid_trigger_price_sends_nothing() {
        let (mut app, mut commands, _events) = test_app();
        app.input = Some(InlineInput {
            target: InputTarget::TriggerPrice(Side::Buy),
            buffer: "-1".to_string(),
        });

        app.submit_input();

        assert!(commands.try_recv().is_err());
        assert_eq!(app.get_status_message(), Some("Invalid price value"));
        assert!(app.input.is_some());
    }

    #[test]
    fn test_trigger_added_closes_matching_input_and_reloads() {
        let (mut app, mut commands, events) = test_app();
        app.input = Some(InlineInput {
            target: InputTarget::TriggerPrice(Side::Sell),
            buffer: "0.5".to_string(),
        });

        events.try_send(ApiEvent::TriggerAdded(Side::Sell)).unwrap();
        app.drain_api();

        assert!(app.input.is_none());
        assert_eq!(app.get_status_message(), Some("Sell alert added"));
        assert_eq!(commands.try_recv(), Ok(Command::FetchState));
    }

    #[test]
    fn test_trigger_added_keeps_unrelated_input_open() {
        let (mut app, _commands, events) = test_app();
        app.input = Some(InlineInput {
            target: InputTarget::UsdAmount,
            buffer: "100".to_string(),
        });

        events.try_send(ApiEvent::TriggerAdded(Side::Buy)).unwrap();
        app.drain_api();

        assert!(app.input.is_some());
    }

    #[test]
    fn test_lookup_requires_contract_address() {
        let (mut app, mut commands, _events) = test_app();
        app.open_form();

        app.lookup_token();

        assert!(commands.try_recv().is_err());
        assert_eq!(app.get_status_message(), Some("Enter a contract address"));
    }

    #[test]
    fn test_lookup_failure_clears_pending_flag() {
        let (mut app, _commands, events) = test_app();
        app.open_form();
        if let Some(form) = &mut app.form {
            form.contract = "bad".to_string();
        }
        app.lookup_token();
        assert!(app.form.as_ref().unwrap().lookup_pending);

        events
            .try_send(ApiEvent::Failed {
                action: Action::LookupToken,
                message: "Token not found".to_string(),
            })
            .unwrap();
        app.drain_api();

        assert!(!app.form.as_ref().unwrap().lookup_pending);
        assert_eq!(app.get_status_message(), Some("Token not found"));
    }

    #[test]
    fn test_delete_selected_alert_sends_its_id() {
        let (mut app, mut commands, events) = test_app();
        events
            .try_send(ApiEvent::Alerts(vec![token_alert("a1"), token_alert("a2")]))
            .unwrap();
        app.drain_api();
        app.current_view = View::Tokens;
        app.select_next();

        app.delete_selected_alert();

        assert_eq!(
            commands.try_recv(),
            Ok(Command::DeleteAlert {
                id: "a2".to_string()
            })
        );
    }

    #[test]
    fn test_selection_clamps_when_list_shrinks() {
        let (mut app, _commands, events) = test_app();
        events
            .try_send(ApiEvent::State(snapshot_with_triggers(
                vec![0.1, 0.2, 0.3],
                vec![],
            )))
            .unwrap();
        app.drain_api();
        app.current_view = View::Triggers;
        app.select_last();
        assert_eq!(app.selected_trigger, 2);

        events
            .try_send(ApiEvent::State(snapshot_with_triggers(vec![0.1], vec![])))
            .unwrap();
        app.drain_api();

        assert_eq!(app.selected_trigger, 0);
    }

    #[test]
    fn test_view_cycle_round_trips() {
        let (mut app, _commands, _events) = test_app();
        assert_eq!(app.current_view, View::Overview);
        for _ in 0..4 {
            app.next_view();
        }
        assert_eq!(app.current_view, View::Overview);
        app.prev_view();
        assert_eq!(app.current_view, View::Settings);
    }

    #[test]
    fn test_go_back_closes_overlays_before_changing_view() {
        let (mut app, _commands, _events) = test_app();
        app.current_view = View::Tokens;
        app.open_form();
        app.show_help = true;

        app.go_back();
        assert!(!app.show_help);
        assert!(app.form.is_some());

        app.go_back();
        assert!(app.form.is_none());
        assert_eq!(app.current_view, View::Tokens);

        app.go_back();
        assert_eq!(app.current_view, View::Overview);
    }
}
