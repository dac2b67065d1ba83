use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, InputTarget, View};
use crate::form::FormField;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If the alert form is open, it captures everything
    if app.form.is_some() {
        handle_form_input(app, key);
        return;
    }

    // If an inline edit is open, it captures everything
    if app.input.is_some() {
        handle_inline_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Triggers),
        KeyCode::Char('3') => app.set_view(View::Tokens),
        KeyCode::Char('4') => app.set_view(View::Settings),

        // Navigation (up/down for items; left/right switch sides on
        // Triggers, tabs elsewhere)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => {
            if app.current_view == View::Triggers {
                app.toggle_side();
            } else {
                app.prev_view();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.current_view == View::Triggers {
                app.toggle_side();
            } else {
                app.next_view();
            }
        }
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Add: trigger price input on Triggers, alert form on Tokens
        KeyCode::Char('a') => match app.current_view {
            View::Triggers => app.open_input(InputTarget::TriggerPrice(app.trigger_side)),
            View::Tokens => app.open_form(),
            _ => {}
        },

        // Delete the selected trigger or alert
        KeyCode::Char('d') => match app.current_view {
            View::Triggers => app.remove_selected_trigger(),
            View::Tokens => app.delete_selected_alert(),
            _ => {}
        },

        // Clear the selected trigger's cooldown
        KeyCode::Char('c') => {
            if app.current_view == View::Triggers {
                app.reset_selected_trigger();
            }
        }

        // Edit the selected setting
        KeyCode::Enter | KeyCode::Char('e') => {
            if app.current_view == View::Settings {
                let target = if app.selected_setting == 0 {
                    InputTarget::UsdAmount
                } else {
                    InputTarget::ResetMinutes
                };
                app.open_input(target);
            }
        }

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Reload
        KeyCode::Char('r') => app.refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key input while an inline numeric edit is open
fn handle_inline_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Submit (the edit closes on the success event)
        KeyCode::Enter => app.submit_input(),

        // Cancel
        KeyCode::Esc => app.cancel_input(),

        // Backspace
        KeyCode::Backspace => {
            if let Some(input) = &mut app.input {
                input.buffer.pop();
            }
        }

        // Numeric characters only
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            if let Some(input) = &mut app.input {
                input.buffer.push(c);
            }
        }

        _ => {}
    }
}

/// Handle key input while the alert form is open
fn handle_form_input(app: &mut App, key: KeyEvent) {
    // Esc and Enter act on the whole App, not just the form
    match key.code {
        // Close without creating
        KeyCode::Esc => {
            app.close_form();
            return;
        }

        // Enter: look up the contract, submit from the last field,
        // otherwise advance
        KeyCode::Enter => {
            match app.form.as_ref().map(|f| f.focus) {
                Some(FormField::Contract) => app.lookup_token(),
                Some(FormField::ChannelId) => app.submit_form(),
                Some(_) => {
                    if let Some(form) = &mut app.form {
                        form.focus = form.focus.next();
                    }
                }
                None => {}
            }
            return;
        }

        _ => {}
    }

    let Some(form) = &mut app.form else {
        return;
    };

    match key.code {
        // Field navigation
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),

        // Left/right cycle the choice fields
        KeyCode::Left => match form.focus {
            FormField::Pair => form.prev_pair(),
            FormField::Kind => form.kind = form.kind.toggle(),
            FormField::Condition => form.condition = form.condition.toggle(),
            _ => {}
        },
        KeyCode::Right => match form.focus {
            FormField::Pair => form.next_pair(),
            FormField::Kind => form.kind = form.kind.toggle(),
            FormField::Condition => form.condition = form.condition.toggle(),
            _ => {}
        },

        // Backspace in text fields
        KeyCode::Backspace => match form.focus {
            FormField::Contract => {
                form.contract.pop();
            }
            FormField::Value => {
                form.value.pop();
            }
            FormField::ChannelId => {
                form.channel_id.pop();
            }
            _ => {}
        },

        // Type characters into text fields
        KeyCode::Char(c) => match form.focus {
            FormField::Contract => form.contract.push(c),
            FormField::Value => {
                if c.is_ascii_digit() || c == '.' {
                    form.value.push(c);
                }
            }
            FormField::ChannelId => form.channel_id.push(c),
            _ => {}
        },

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    // Overlays and edits are keyboard-driven
    if app.show_help || app.form.is_some() || app.input.is_some() {
        if mouse.kind == MouseEventKind::Down(MouseButton::Right) {
            app.go_back();
        }
        return;
    }

    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            // Calculate which row was clicked (accounting for header/tabs)
            let clicked_row = mouse.row;

            // Check if clicking in content area (after header, tabs, table header)
            if clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;

                match app.current_view {
                    View::Triggers => {
                        if item_row < app.trigger_count() {
                            app.selected_trigger = item_row;
                        }
                    }
                    View::Tokens => {
                        if item_row < app.alerts.len() {
                            app.selected_alert = item_row;
                        }
                    }
                    View::Settings => {
                        if item_row < 2 {
                            app.selected_setting = item_row;
                        }
                    }
                    View::Overview => {}
                }
            }

            // Check for tab clicks (row 1, after header)
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Overview (0-12), Triggers (13-25),
                // Tokens (26-36), Settings (37-48)
                if col < 13 {
                    app.set_view(View::Overview);
                } else if col < 26 {
                    app.set_view(View::Triggers);
                } else if col < 37 {
                    app.set_view(View::Tokens);
                } else if col < 49 {
                    app.set_view(View::Settings);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}
