//! Keyboard input.
//!
//! Only the handful of keys the simulation and its prompt care about get
//! their own variant; everything else collapses into [`Key::Other`].

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Ctrl+C.
    CtrlC,
    /// Any key without a dedicated meaning.
    Other,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Enter => f.write_str("enter"),
            Self::Esc => f.write_str("esc"),
            Self::Backspace => f.write_str("backspace"),
            Self::CtrlC => f.write_str("ctrl+c"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// Convert a crossterm key code and its modifiers into a [`Key`].
pub fn from_crossterm_key(code: KeyCode, modifiers: KeyModifiers) -> Key {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Char(c) if ctrl && c.eq_ignore_ascii_case(&'c') => Key::CtrlC,
        // Ctrl+M is a carriage return on most terminals
        KeyCode::Char(c) if ctrl && c.eq_ignore_ascii_case(&'m') => Key::Enter,
        KeyCode::Char(_) if ctrl => Key::Other,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}

/// Parses a key script such as `"m<enter>r"` into keys.
///
/// Characters map to [`Key::Char`]; `<enter>`, `<esc>` and `<backspace>`
/// name the corresponding special keys.
///
/// # Errors
///
/// Returns the offending token when a `<...>` name is not recognized or is
/// left unterminated.
pub fn parse_key_script(script: &str) -> Result<Vec<Key>, String> {
    let mut keys = Vec::new();
    let mut rest = script;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            let end = rest.find('>').ok_or_else(|| rest.to_string())?;
            let key = match &rest[1..end] {
                "enter" => Key::Enter,
                "esc" => Key::Esc,
                "backspace" => Key::Backspace,
                _ => return Err(rest[..=end].to_string()),
            };
            keys.push(key);
            rest = &rest[end + 1..];
        } else {
            keys.push(Key::Char(c));
            rest = &rest[c.len_utf8()..];
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_characters() {
        assert_eq!(from_crossterm_key(KeyCode::Char('m'), KeyModifiers::NONE), Key::Char('m'));
        assert_eq!(
            from_crossterm_key(KeyCode::Char('R'), KeyModifiers::SHIFT),
            Key::Char('R')
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            from_crossterm_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Key::CtrlC
        );
        assert_eq!(
            from_crossterm_key(KeyCode::Char('m'), KeyModifiers::CONTROL),
            Key::Enter
        );
        assert_eq!(
            from_crossterm_key(KeyCode::Char('x'), KeyModifiers::CONTROL),
            Key::Other
        );
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(from_crossterm_key(KeyCode::Enter, KeyModifiers::NONE), Key::Enter);
        assert_eq!(from_crossterm_key(KeyCode::Esc, KeyModifiers::NONE), Key::Esc);
        assert_eq!(
            from_crossterm_key(KeyCode::Backspace, KeyModifiers::NONE),
            Key::Backspace
        );
        assert_eq!(from_crossterm_key(KeyCode::F(5), KeyModifiers::NONE), Key::Other);
    }

    #[test]
    fn test_parse_key_script() {
        let keys = parse_key_script("m<enter>r").unwrap();
        assert_eq!(keys, vec![Key::Char('m'), Key::Enter, Key::Char('r')]);
        assert!(parse_key_script("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_key_script_errors() {
        assert_eq!(parse_key_script("<tab>").unwrap_err(), "<tab>");
        assert_eq!(parse_key_script("m<enter").unwrap_err(), "<enter");
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::Char('k').to_string(), "k");
        assert_eq!(Key::CtrlC.to_string(), "ctrl+c");
    }
}
