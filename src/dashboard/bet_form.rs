//! Bet amount inputs and the submission controls.

use crate::state::BetPosition;

/// The two amount inputs (one per position) and whether the bet controls
/// are enabled.
#[derive(Debug, Clone, Default)]
pub struct BetForm {
    success_amount: String,
    fail_amount: String,
    in_flight: bool,
}

impl BetForm {
    const MAX_INPUT_LEN: usize = 16;

    /// Raw text of an amount input.
    pub fn input(&self, position: BetPosition) -> &str {
        match position {
            BetPosition::Success => &self.success_amount,
            BetPosition::Fail => &self.fail_amount,
        }
    }

    fn input_mut(&mut self, position: BetPosition) -> &mut String {
        match position {
            BetPosition::Success => &mut self.success_amount,
            BetPosition::Fail => &mut self.fail_amount,
        }
    }

    /// Type a character into an input. Only characters that can appear in a
    /// number are accepted.
    pub fn push_char(&mut self, position: BetPosition, c: char) {
        let input = self.input_mut(position);
        if input.len() < Self::MAX_INPUT_LEN && (c.is_ascii_digit() || c == '.' || c == '-') {
            input.push(c);
        }
    }

    /// Delete the last character of an input.
    pub fn pop_char(&mut self, position: BetPosition) {
        self.input_mut(position).pop();
    }

    /// Replace the text of an input.
    pub fn set_input(&mut self, position: BetPosition, value: impl Into<String>) {
        *self.input_mut(position) = value.into();
    }

    /// Empty an input.
    pub fn clear(&mut self, position: BetPosition) {
        self.input_mut(position).clear();
    }

    /// Whether a new bet may be submitted.
    pub fn controls_enabled(&self) -> bool {
        !self.in_flight
    }

    pub(crate) fn disable_controls(&mut self) {
        self.in_flight = true;
    }

    pub(crate) fn enable_controls(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_are_independent() {
        let mut form = BetForm::default();
        for c in "12.5".chars() {
            form.push_char(BetPosition::Success, c);
        }
        form.push_char(BetPosition::Fail, '7');

        assert_eq!(form.input(BetPosition::Success), "12.5");
        assert_eq!(form.input(BetPosition::Fail), "7");

        form.pop_char(BetPosition::Success);
        form.clear(BetPosition::Fail);
        assert_eq!(form.input(BetPosition::Success), "12.");
        assert_eq!(form.input(BetPosition::Fail), "");
    }

    #[test]
    fn test_non_numeric_characters_are_ignored() {
        let mut form = BetForm::default();
        for c in "1a0$0".chars() {
            form.push_char(BetPosition::Fail, c);
        }
        assert_eq!(form.input(BetPosition::Fail), "100");
    }

    #[test]
    fn test_controls_toggle() {
        let mut form = BetForm::default();
        assert!(form.controls_enabled());
        form.disable_controls();
        assert!(!form.controls_enabled());
        form.enable_controls();
        assert!(form.controls_enabled());
    }
}
