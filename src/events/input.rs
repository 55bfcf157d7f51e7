//! Key bindings parsed from configuration strings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeyBindings;
use crate::error::{Error, Result};

/// A single key binding such as `q`, `Enter` or `Ctrl+r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    code: KeyCode,
    ctrl: bool,
    alt: bool,
}

impl KeyBinding {
    /// Parse a binding string. Modifiers are joined with `+`.
    pub fn parse(binding: &str) -> Result<Self> {
        let mut ctrl = false;
        let mut alt = false;
        let mut key = None;

        for part in binding.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" => ctrl = true,
                "alt" => alt = true,
                "" => {}
                _ => key = Some(part),
            }
        }

        let key = key.ok_or_else(|| Error::config(format!("empty key binding '{}'", binding)))?;
        let code = match key.to_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            s if s.len() > 1 && s.starts_with('f') => s[1..]
                .parse::<u8>()
                .map(KeyCode::F)
                .map_err(|_| Error::config(format!("unknown key '{}'", key)))?,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(Error::config(format!("unknown key '{}'", key))),
                }
            }
        };

        Ok(Self { code, ctrl, alt })
    }

    /// Check a key event against this binding. Letters match either case.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.modifiers.contains(KeyModifiers::CONTROL) != self.ctrl
            || event.modifiers.contains(KeyModifiers::ALT) != self.alt
        {
            return false;
        }

        match (self.code, event.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) => {
                expected.eq_ignore_ascii_case(&actual)
            }
            (expected, actual) => expected == actual,
        }
    }
}

/// All bindings, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub refresh: KeyBinding,
    pub bet_success: KeyBinding,
    pub bet_fail: KeyBinding,
    pub submit: KeyBinding,
    pub back: KeyBinding,
}

impl Bindings {
    pub fn from_config(config: &KeyBindings) -> Result<Self> {
        Ok(Self {
            quit: KeyBinding::parse(&config.quit)?,
            help: KeyBinding::parse(&config.help)?,
            refresh: KeyBinding::parse(&config.refresh)?,
            bet_success: KeyBinding::parse(&config.bet_success)?,
            bet_fail: KeyBinding::parse(&config.bet_fail)?,
            submit: KeyBinding::parse(&config.submit)?,
            back: KeyBinding::parse(&config.back)?,
        })
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            quit: KeyBinding::char('q'),
            help: KeyBinding::char('?'),
            refresh: KeyBinding::char('r'),
            bet_success: KeyBinding::char('s'),
            bet_fail: KeyBinding::char('f'),
            submit: KeyBinding::code(KeyCode::Enter),
            back: KeyBinding::code(KeyCode::Esc),
        }
    }
}

impl KeyBinding {
    const fn char(c: char) -> Self {
        Self::code(KeyCode::Char(c))
    }

    const fn code(code: KeyCode) -> Self {
        Self {
            code,
            ctrl: false,
            alt: false,
        }
    }
}
