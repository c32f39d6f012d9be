//! User commands and their key bindings.

use oscillator::Parameter;

use crate::key::Key;

/// A command understood by the simulation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Prompt for a new value of a parameter.
    Edit(Parameter),
    /// Clear motion and history, keep parameters.
    SoftReset,
    /// Clear motion and history, restore default parameters.
    FullReset,
    /// Stop the loop.
    Quit,
}

impl Command {
    /// Maps a key press to a command.
    ///
    /// | Key | Command |
    /// |-----|---------|
    /// | `m` | edit mass |
    /// | `s`, `k` | edit spring constant |
    /// | `d`, `b` | edit damping constant |
    /// | Enter | soft reset |
    /// | `r` | full reset |
    /// | `q`, Esc, Ctrl+C | quit |
    ///
    /// Letters are case-insensitive. Other keys map to `None`.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(c) => match c.to_ascii_lowercase() {
                'm' => Some(Self::Edit(Parameter::Mass)),
                's' | 'k' => Some(Self::Edit(Parameter::SpringConstant)),
                'd' | 'b' => Some(Self::Edit(Parameter::DampingConstant)),
                'r' => Some(Self::FullReset),
                'q' => Some(Self::Quit),
                _ => None,
            },
            Key::Enter => Some(Self::SoftReset),
            Key::Esc | Key::CtrlC => Some(Self::Quit),
            Key::Backspace | Key::Other => None,
        }
    }
}
