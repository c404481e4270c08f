//! Keyboard bindings configuration.
//!
//! The `[keybindings]` config table maps action names to one key or a list
//! of keys, e.g. `load_more = ["m", "Ctrl+n"]`. Listed actions lose their
//! default keys; everything else keeps the defaults.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Keys given for one action in the `[keybindings]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    /// A single key, `next_page = "n"`.
    One(String),
    /// Several keys, `next_page = ["n", "Right"]`.
    Many(Vec<String>),
}

impl KeySpec {
    fn keys(&self) -> &[String] {
        match self {
            Self::One(key) => std::slice::from_ref(key),
            Self::Many(keys) => keys,
        }
    }
}

/// Errors applying `[keybindings]` overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyBindingError {
    /// Action name not recognised.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// Key description not recognised.
    #[error("invalid key '{key}' for action '{action}'")]
    InvalidKey {
        /// Action being bound.
        action: String,
        /// Offending key text.
        key: String,
    },

    /// Empty key list.
    #[error("no keys given for action '{0}'")]
    NoKeys(String),
}

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings with option to override via configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Apply `[keybindings]` overrides on top of these bindings.
    ///
    /// # Errors
    ///
    /// Unknown action names, unparseable keys and empty key lists.
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, KeySpec>,
    ) -> Result<Self, KeyBindingError> {
        for (name, spec) in overrides {
            let action = KeyAction::from_config_name(name)
                .ok_or_else(|| KeyBindingError::UnknownAction(name.clone()))?;
            if spec.keys().is_empty() {
                return Err(KeyBindingError::NoKeys(name.clone()));
            }
            let events = spec
                .keys()
                .iter()
                .map(|key| {
                    parse_key(key).ok_or_else(|| KeyBindingError::InvalidKey {
                        action: name.clone(),
                        key: key.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.bindings.retain(|_, bound| *bound != action);
            for event in events {
                self.bindings.insert(event, action);
                // Terminals disagree on SHIFT for punctuation like '?'.
                if let KeyCode::Char(c) = event.code {
                    if event.modifiers == KeyModifiers::NONE && !c.is_alphanumeric() {
                        self.bindings
                            .insert(KeyEvent::new(event.code, KeyModifiers::SHIFT), action);
                    }
                }
            }
        }
        Ok(self)
    }
}

/// Parse a key description such as `"n"`, `"G"`, `"Ctrl+d"`, `"PageDown"`,
/// `"Shift+Tab"` or `"F5"`.
///
/// Uppercase letters imply SHIFT, matching what the terminal reports.
pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let spec = spec.trim();
    if spec == "+" {
        return Some(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
    }
    let (mods, key) = match spec.rsplit_once('+') {
        Some((mods, "")) => (mods.strip_suffix('+')?, "+"),
        Some((mods, key)) => (mods, key),
        None => ("", spec),
    };

    let mut modifiers = KeyModifiers::NONE;
    for modifier in mods.split('+').filter(|m| !m.is_empty()) {
        modifiers |= match modifier.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "page_up" => KeyCode::PageUp,
        "pagedown" | "page_down" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        lower => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if (1..=12).contains(&n) => KeyCode::F(n),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if c.is_ascii_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                }
                if modifiers.contains(KeyModifiers::SHIFT) {
                    KeyCode::Char(c.to_ascii_uppercase())
                } else {
                    KeyCode::Char(c)
                }
            }
        },
    };

    Some(KeyEvent::new(code, modifiers))
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        // Selection
        bindings.insert(
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            KeyAction::SelectNext,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            KeyAction::SelectPrev,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::SelectNext,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::SelectPrev,
        );

        // Pages
        bindings.insert(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE),
            KeyAction::NextPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
            KeyAction::PrevPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            KeyAction::NextPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            KeyAction::PrevPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            KeyAction::NextPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            KeyAction::PrevPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE),
            KeyAction::FirstPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            KeyAction::FirstPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            KeyAction::LastPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            KeyAction::LastPage,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE),
            KeyAction::LoadMore,
        );

        // Category tabs
        bindings.insert(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            KeyAction::NextCategory,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            KeyAction::PrevCategory,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char(']'), KeyModifiers::NONE),
            KeyAction::NextCategory,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('['), KeyModifiers::NONE),
            KeyAction::PrevCategory,
        );
        for (digit, index) in ['1', '2', '3', '4', '5'].into_iter().zip(0..) {
            bindings.insert(
                KeyEvent::new(KeyCode::Char(digit), KeyModifiers::NONE),
                KeyAction::SelectCategory(index),
            );
        }

        // Detail & comments
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::OpenDetail,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::CloseDetail,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            KeyAction::CloseDetail,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE),
            KeyAction::StartComment,
        );

        // Search
        bindings.insert(
            KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE),
            KeyAction::StartSearch,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
            KeyAction::ClearSearch,
        );

        // Application
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE),
            KeyAction::Help,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT),
            KeyAction::Help,
        );

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn overrides(toml_text: &str) -> BTreeMap<String, KeySpec> {
        toml::from_str(toml_text).unwrap()
    }

    #[test]
    fn parse_key_handles_names_and_modifiers() {
        assert_eq!(parse_key("n"), Some(key(KeyCode::Char('n'), KeyModifiers::NONE)));
        assert_eq!(parse_key("G"), Some(key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert_eq!(parse_key("Shift+g"), Some(key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert_eq!(parse_key("Ctrl+d"), Some(key(KeyCode::Char('d'), KeyModifiers::CONTROL)));
        assert_eq!(parse_key("PageDown"), Some(key(KeyCode::PageDown, KeyModifiers::NONE)));
        assert_eq!(parse_key("Shift+Tab"), Some(key(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert_eq!(parse_key("F5"), Some(key(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(parse_key("+"), Some(key(KeyCode::Char('+'), KeyModifiers::NONE)));
        assert_eq!(parse_key("Ctrl++"), Some(key(KeyCode::Char('+'), KeyModifiers::CONTROL)));
        assert_eq!(parse_key("space"), Some(key(KeyCode::Char(' '), KeyModifiers::NONE)));
    }

    #[test]
    fn parse_key_rejects_garbage() {
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("nope"), None);
        assert_eq!(parse_key("Hyper+n"), None);
        assert_eq!(parse_key("F13"), None);
    }

    #[test]
    fn overrides_replace_only_listed_actions() {
        let bindings = KeyBindings::default()
            .with_overrides(&overrides("load_more = [\"space\", \"Ctrl+n\"]\nquit = \"Q\"\n"))
            .unwrap();

        assert_eq!(
            bindings.get(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(KeyAction::LoadMore)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(KeyAction::LoadMore)
        );
        assert_eq!(bindings.get(key(KeyCode::Char('m'), KeyModifiers::NONE)), None);
        assert_eq!(bindings.get(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
        assert_eq!(
            bindings.get(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(KeyAction::Quit)
        );
        // Untouched action keeps its defaults.
        assert_eq!(
            bindings.get(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(KeyAction::NextPage)
        );
    }

    #[test]
    fn overriding_a_key_takes_it_from_its_old_action() {
        let bindings = KeyBindings::default()
            .with_overrides(&overrides("next_category = \"n\"\n"))
            .unwrap();
        assert_eq!(
            bindings.get(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(KeyAction::NextCategory)
        );
        assert_eq!(bindings.get(key(KeyCode::Tab, KeyModifiers::NONE)), None);
    }

    #[test]
    fn punctuation_binds_with_and_without_shift() {
        let bindings = KeyBindings::default()
            .with_overrides(&overrides("help = \"!\"\n"))
            .unwrap();
        assert_eq!(
            bindings.get(key(KeyCode::Char('!'), KeyModifiers::NONE)),
            Some(KeyAction::Help)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('!'), KeyModifiers::SHIFT)),
            Some(KeyAction::Help)
        );
    }

    #[test]
    fn invalid_overrides_are_reported() {
        let unknown = KeyBindings::default().with_overrides(&overrides("teleport = \"t\"\n"));
        assert_eq!(unknown, Err(KeyBindingError::UnknownAction("teleport".into())));

        let bad_key = KeyBindings::default().with_overrides(&overrides("quit = \"Ctrl+\"\n"));
        assert!(matches!(bad_key, Err(KeyBindingError::InvalidKey { .. })));

        let empty = KeyBindings::default().with_overrides(&overrides("quit = []\n"));
        assert_eq!(empty, Err(KeyBindingError::NoKeys("quit".into())));
    }

    #[test]
    fn default_bindings_map_n_and_p_to_pages() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(KeyAction::NextPage)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE)),
            Some(KeyAction::PrevPage)
        );
    }

    #[test]
    fn default_bindings_map_digits_to_category_tabs() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE)),
            Some(KeyAction::SelectCategory(0))
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE)),
            Some(KeyAction::SelectCategory(4))
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn default_bindings_map_m_to_load_more() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE)),
            Some(KeyAction::LoadMore)
        );
    }

    #[test]
    fn unbound_key_returns_none() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)),
            None
        );
    }
}
