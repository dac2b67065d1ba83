//! Background task that runs API calls off the render loop.
//!
//! The render loop stays synchronous: it pushes [`Command`]s onto an
//! unbounded channel and drains [`ApiEvent`] completions without blocking
//! on every frame. The worker processes commands one at a time, so a
//! mutation's follow-up reload always observes its effect.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::client::ApiClient;
use super::error::ApiError;
use super::wire::{NewAlert, Side, StateSnapshot, TokenAlert, TokenInfo};

/// A request from the TUI to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchState,
    FetchAlerts,
    LookupToken { contract: String },
    CreateAlert { alert: NewAlert },
    DeleteAlert { id: String },
    SetUsdAmount { value: f64 },
    SetResetMinutes { minutes: i64 },
    AddTrigger { side: Side, price: f64 },
    RemoveTrigger { side: Side, price: f64 },
    ResetTrigger { side: Side, price: f64 },
}

/// What a command was doing, for fallback failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadState,
    LoadAlerts,
    LookupToken,
    CreateAlert,
    DeleteAlert,
    UpdateUsd,
    UpdateResetMinutes,
    AddTrigger,
    RemoveTrigger,
    ResetTrigger,
}

impl Action {
    /// Notification shown when the server reports no detail of its own.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::LoadState => "Failed to load state",
            Action::LoadAlerts => "Failed to load alerts",
            Action::LookupToken => "Token not found",
            Action::CreateAlert => "Failed to add alert",
            Action::DeleteAlert => "Failed to remove alert",
            Action::UpdateUsd => "Failed to update USD amount",
            Action::UpdateResetMinutes => "Failed to update reset minutes",
            Action::AddTrigger => "Failed to add alert",
            Action::RemoveTrigger => "Failed to remove alert",
            Action::ResetTrigger => "Failed to reset alert",
        }
    }
}

/// A completed command, pushed back to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    State(StateSnapshot),
    Alerts(Vec<TokenAlert>),
    TokenInfo(TokenInfo),
    AlertCreated,
    AlertDeleted,
    UsdUpdated(f64),
    ResetMinutesUpdated(i64),
    TriggerAdded(Side),
    TriggerRemoved(Side),
    TriggerReset(Side),
    Failed { action: Action, message: String },
}

/// TUI-side handle: commands in, completions out.
#[derive(Debug)]
pub struct ApiHandle {
    commands: mpsc::UnboundedSender<Command>,
    events: mpsc::Receiver<ApiEvent>,
}

impl ApiHandle {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// Returns the handle and the worker's task handle; aborting the task
    /// cancels any in-flight request.
    pub fn spawn(client: ApiClient) -> (Self, JoinHandle<()>) {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
        let (event_tx, event_rx) = mpsc::channel(64);

        let task = tokio::spawn(async move {
            while let Some(command) = cmd_rx.recv().await {
                let event = run_command(&client, command).await;
                if event_tx.send(event).await.is_err() {
                    // Receiver dropped
                    break;
                }
            }
        });

        (
            Self {
                commands: cmd_tx,
                events: event_rx,
            },
            task,
        )
    }

    /// Create a handle with both channel ends exposed.
    ///
    /// Useful for tests and embedding: the caller reads commands from the
    /// returned receiver and pushes events through the returned sender.
    pub fn detached() -> (
        Self,
        mpsc::UnboundedReceiver<Command>,
        mpsc::Sender<ApiEvent>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(64);
        let handle = Self {
            commands: cmd_tx,
            events: event_rx,
        };
        (handle, cmd_rx, event_tx)
    }

    /// Queue a command for the worker.
    ///
    /// Send failures are ignored; they only happen during shutdown when
    /// the worker is already gone.
    pub fn send(&self, command: Command) {
        let _ = self.commands.send(command);
    }

    /// Drain completed events without blocking.
    pub fn poll(&mut self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

async fn run_command(client: &ApiClient, command: Command) -> ApiEvent {
    match command {
        Command::FetchState => match client.state().await {
            Ok(snapshot) => ApiEvent::State(snapshot),
            Err(e) => failed(Action::LoadState, e),
        },
        Command::FetchAlerts => match client.alerts().await {
            Ok(alerts) => ApiEvent::Alerts(alerts),
            Err(e) => failed(Action::LoadAlerts, e),
        },
        Command::LookupToken { contract } => match client.token_info(&contract).await {
            Ok(info) => ApiEvent::TokenInfo(info),
            Err(e) => failed(Action::LookupToken, e),
        },
        Command::CreateAlert { alert } => match client.create_alert(&alert).await {
            Ok(()) => ApiEvent::AlertCreated,
            Err(e) => failed(Action::CreateAlert, e),
        },
        Command::DeleteAlert { id } => match client.delete_alert(&id).await {
            Ok(()) => ApiEvent::AlertDeleted,
            Err(e) => failed(Action::DeleteAlert, e),
        },
        Command::SetUsdAmount { value } => match client.set_usd_amount(value).await {
            Ok(()) => ApiEvent::UsdUpdated(value),
            Err(e) => failed(Action::UpdateUsd, e),
        },
        Command::SetResetMinutes { minutes } => match client.set_reset_minutes(minutes).await {
            Ok(()) => ApiEvent::ResetMinutesUpdated(minutes),
            Err(e) => failed(Action::UpdateResetMinutes, e),
        },
        Command::AddTrigger { side, price } => match client.add_trigger(side, price).await {
            Ok(()) => ApiEvent::TriggerAdded(side),
            Err(e) => failed(Action::AddTrigger, e),
        },
        Command::RemoveTrigger { side, price } => match client.remove_trigger(side, price).await {
            Ok(()) => ApiEvent::TriggerRemoved(side),
            Err(e) => failed(Action::RemoveTrigger, e),
        },
        Command::ResetTrigger { side, price } => match client.reset_trigger(side, price).await {
            Ok(()) => ApiEvent::TriggerReset(side),
            Err(e) => failed(Action::ResetTrigger, e),
        },
    }
}

/// Fold an error into the per-action notification: server detail when
/// present, the action's generic message otherwise.
fn failed(action: Action, error: ApiError) -> ApiEvent {
    let message = error
        .detail()
        .map(str::to_string)
        .unwrap_or_else(|| action.failure_message().to_string());
    ApiEvent::Failed { action, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_detached_handle_queues_commands() {
        let (handle, mut commands, _events) = ApiHandle::detached();

        handle.send(Command::FetchState);
        handle.send(Command::DeleteAlert { id: "a1".to_string() });

        assert_eq!(commands.recv().await, Some(Command::FetchState));
        assert_eq!(
            commands.recv().await,
            Some(Command::DeleteAlert { id: "a1".to_string() })
        );
    }

    #[tokio::test]
    async fn test_poll_drains_without_blocking() {
        let (mut handle, _commands, events) = ApiHandle::detached();

        assert!(handle.poll().is_empty());

        events.send(ApiEvent::AlertCreated).await.unwrap();
        events.send(ApiEvent::AlertDeleted).await.unwrap();

        let drained = handle.poll();
        assert_eq!(drained, vec![ApiEvent::AlertCreated, ApiEvent::AlertDeleted]);
        assert!(handle.poll().is_empty());
    }

    #[test]
    fn test_failure_prefers_server_detail() {
        let error = ApiError::Status {
            status: 404,
            detail: Some("Alert not found".to_string()),
        };
        let event = failed(Action::DeleteAlert, error);
        assert_eq!(
            event,
            ApiEvent::Failed {
                action: Action::DeleteAlert,
                message: "Alert not found".to_string(),
            }
        );
    }

    #[test]
    fn test_failure_falls_back_to_generic_message() {
        let error = ApiError::Status { status: 500, detail: None };
        let event = failed(Action::LoadState, error);
        assert_eq!(
            event,
            ApiEvent::Failed {
                action: Action::LoadState,
                message: "Failed to load state".to_string(),
            }
        );
    }
}
