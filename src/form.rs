//! Alert creation form state.
//!
//! The form is an overlay: it owns its own focus and input buffers and
//! only produces a [`NewAlert`] once every field validates. Ticker and
//! pair choices arrive asynchronously from a contract lookup.

use crate::api::wire::{AlertKind, Condition, NewAlert, TokenInfo};

/// Fields of the alert form, in visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Contract,
    Pair,
    Kind,
    Condition,
    Value,
    ChannelId,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Contract => FormField::Pair,
            FormField::Pair => FormField::Kind,
            FormField::Kind => FormField::Condition,
            FormField::Condition => FormField::Value,
            FormField::Value => FormField::ChannelId,
            FormField::ChannelId => FormField::Contract,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Contract => FormField::ChannelId,
            FormField::Pair => FormField::Contract,
            FormField::Kind => FormField::Pair,
            FormField::Condition => FormField::Kind,
            FormField::Value => FormField::Condition,
            FormField::ChannelId => FormField::Value,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Contract => "Contract",
            FormField::Pair => "Pair",
            FormField::Kind => "Type",
            FormField::Condition => "Condition",
            FormField::Value => "Value",
            FormField::ChannelId => "Channel ID",
        }
    }
}

/// In-progress token alert.
///
/// `ticker` and `pairs` stay empty until a lookup succeeds; validation
/// refuses to build a payload before then.
#[derive(Debug, Clone)]
pub struct AlertForm {
    pub contract: String,
    pub ticker: Option<String>,
    pub pairs: Vec<String>,
    pub selected_pair: usize,
    pub kind: AlertKind,
    pub condition: Condition,
    pub value: String,
    pub channel_id: String,
    pub focus: FormField,
    /// A lookup request is in flight for the current contract.
    pub lookup_pending: bool,
}

impl AlertForm {
    pub fn new() -> Self {
        Self {
            contract: String::new(),
            ticker: None,
            pairs: Vec::new(),
            selected_pair: 0,
            kind: AlertKind::Price,
            condition: Condition::Above,
            value: String::new(),
            channel_id: String::new(),
            focus: FormField::Contract,
            lookup_pending: false,
        }
    }

    /// Fill in the looked-up ticker and pair choices.
    pub fn apply_token_info(&mut self, info: TokenInfo) {
        self.ticker = Some(info.ticker);
        self.pairs = info.pairs;
        self.selected_pair = 0;
        self.lookup_pending = false;
    }

    pub fn next_pair(&mut self) {
        if !self.pairs.is_empty() {
            self.selected_pair = (self.selected_pair + 1) % self.pairs.len();
        }
    }

    pub fn prev_pair(&mut self) {
        if !self.pairs.is_empty() {
            self.selected_pair = (self.selected_pair + self.pairs.len() - 1) % self.pairs.len();
        }
    }

    /// Currently selected pair, if the lookup returned any.
    pub fn selected_pair_name(&self) -> Option<&str> {
        self.pairs.get(self.selected_pair).map(String::as_str)
    }

    /// Build the creation payload, or explain what is missing.
    ///
    /// Every field must be present before any request goes out.
    pub fn validate(&self) -> Result<NewAlert, &'static str> {
        if self.contract.is_empty() || self.value.is_empty() || self.channel_id.is_empty() {
            return Err("Fill all fields");
        }
        let Some(ticker) = self.ticker.clone() else {
            return Err("Fill all fields");
        };
        let Some(pair) = self.pairs.get(self.selected_pair).cloned() else {
            return Err("Fill all fields");
        };
        let value: f64 = self.value.parse().map_err(|_| "Invalid value")?;

        Ok(NewAlert {
            contract: self.contract.clone(),
            ticker,
            pair,
            kind: self.kind,
            condition: self.condition,
            value,
            channel_id: self.channel_id.clone(),
            guild_id: String::new(),
        })
    }
}

impl Default for AlertForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AlertForm {
        let mut form = AlertForm::new();
        form.contract = "So11111111111111111111111111111111111111112".to_string();
        form.apply_token_info(TokenInfo {
            ticker: "SOL".to_string(),
            pairs: vec!["SOL/USDC".to_string(), "SOL/USDT".to_string()],
        });
        form.value = "150.5".to_string();
        form.channel_id = "123456".to_string();
        form
    }

    #[test]
    fn test_validate_builds_payload() {
        let alert = filled_form().validate().unwrap();
        assert_eq!(alert.ticker, "SOL");
        assert_eq!(alert.pair, "SOL/USDC");
        assert_eq!(alert.kind, AlertKind::Price);
        assert_eq!(alert.condition, Condition::Above);
        assert_eq!(alert.value, 150.5);
        assert_eq!(alert.guild_id, "");
    }

    #[test]
    fn test_validate_requires_every_field() {
        let mut form = filled_form();
        form.channel_id.clear();
        assert_eq!(form.validate(), Err("Fill all fields"));

        let mut form = filled_form();
        form.ticker = None;
        assert_eq!(form.validate(), Err("Fill all fields"));

        let mut form = filled_form();
        form.pairs.clear();
        assert_eq!(form.validate(), Err("Fill all fields"));

        let mut form = filled_form();
        form.value.clear();
        assert_eq!(form.validate(), Err("Fill all fields"));
    }

    #[test]
    fn test_validate_rejects_unparseable_value() {
        let mut form = filled_form();
        form.value = "1.2.3".to_string();
        assert_eq!(form.validate(), Err("Invalid value"));
    }

    #[test]
    fn test_pair_cycling_wraps() {
        let mut form = filled_form();
        assert_eq!(form.selected_pair_name(), Some("SOL/USDC"));
        form.next_pair();
        assert_eq!(form.selected_pair_name(), Some("SOL/USDT"));
        form.next_pair();
        assert_eq!(form.selected_pair_name(), Some("SOL/USDC"));
        form.prev_pair();
        assert_eq!(form.selected_pair_name(), Some("SOL/USDT"));
    }

    #[test]
    fn test_pair_cycling_on_empty_list_is_a_no_op() {
        let mut form = AlertForm::new();
        form.next_pair();
        form.prev_pair();
        assert_eq!(form.selected_pair, 0);
        assert_eq!(form.selected_pair_name(), None);
    }

    #[test]
    fn test_field_order_round_trips() {
        let mut field = FormField::Contract;
        for _ in 0..6 {
            field = field.next();
        }
        assert_eq!(field, FormField::Contract);
        assert_eq!(FormField::Contract.prev(), FormField::ChannelId);
    }
}
