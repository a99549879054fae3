//! Key input delivered by the host.

use crate::store::Observable;

/// A key press, named the way the host's keyboard events name keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
}

impl KeyInput {
    pub fn named(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// `Escape`, or the legacy `Esc` spelling.
    #[must_use]
    pub fn is_cancel(&self) -> bool {
        matches!(self.key.as_str(), "Escape" | "Esc")
    }
}

/// Stream of key presses the host feeds into the board.
pub type KeyEvents = Observable<KeyInput>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_escape_spellings_cancel() {
        assert!(KeyInput::named("Escape").is_cancel());
        assert!(KeyInput::named("Esc").is_cancel());
        assert!(!KeyInput::named("Enter").is_cancel());
    }
}
