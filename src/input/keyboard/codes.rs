//! Host-neutral identifiers for physical keys.

use ::strum::EnumIter;

/// A physical key as reported by the host's input collaborator.
///
/// Only the keys the virtual keyboard reacts to get a dedicated variant; the
/// rest are still representable so the controller can observe (and ignore)
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum KeyCode {
    Backspace,
    Space,
    CapsLock,
    Enter,
    Tab,
    Escape,
    Left,
    Right,
    Up,
    Down,
    /// A key producing a single printable character.
    Char(char),
    /// Anything without a mapping (function keys, media keys, modifiers).
    Other,
}

impl KeyCode {
    /// Parses a key name in the style used by browsers and most toolkits
    /// (`"Backspace"`, `"CapsLock"`, `" "`, `"ArrowLeft"`, `"a"`).
    ///
    /// Names without a mapping become [`KeyCode::Other`].
    ///
    /// ```
    /// use ::softkeys::input::keyboard::KeyCode;
    ///
    /// assert_eq!(KeyCode::from_key_name("CapsLock"), KeyCode::CapsLock);
    /// assert_eq!(KeyCode::from_key_name(" "), KeyCode::Space);
    /// assert_eq!(KeyCode::from_key_name("q"), KeyCode::Char('q'));
    /// assert_eq!(KeyCode::from_key_name("F5"), KeyCode::Other);
    /// ```
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Backspace" => Self::Backspace,
            " " | "Space" | "Spacebar" => Self::Space,
            "CapsLock" => Self::CapsLock,
            "Enter" | "Return" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// The character for [`KeyCode::Char`] keys in `[a-zA-Z0-9]`, the only
    /// physical keys which type into the buffer.
    pub fn alphanumeric(&self) -> Option<char> {
        match *self {
            Self::Char(c) if c.is_ascii_alphanumeric() => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::strum::IntoEnumIterator;

    #[test]
    fn test_named_keys() {
        assert_eq!(KeyCode::from_key_name("Backspace"), KeyCode::Backspace);
        assert_eq!(KeyCode::from_key_name("Spacebar"), KeyCode::Space);
        assert_eq!(KeyCode::from_key_name("Enter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_key_name("ArrowDown"), KeyCode::Down);
        assert_eq!(KeyCode::from_key_name("Shift"), KeyCode::Other);
        assert_eq!(KeyCode::from_key_name(""), KeyCode::Other);
        assert_eq!(KeyCode::from_key_name("\u{8}"), KeyCode::Other);
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(KeyCode::from_key_name("Z"), KeyCode::Char('Z'));
        assert_eq!(KeyCode::from_key_name("7"), KeyCode::Char('7'));
        assert_eq!(KeyCode::from_key_name("é"), KeyCode::Char('é'));
    }

    #[test]
    fn test_alphanumeric() {
        assert_eq!(KeyCode::Char('a').alphanumeric(), Some('a'));
        assert_eq!(KeyCode::Char('Q').alphanumeric(), Some('Q'));
        assert_eq!(KeyCode::Char('0').alphanumeric(), Some('0'));
        assert_eq!(KeyCode::Char('-').alphanumeric(), None);
        assert_eq!(KeyCode::Char('é').alphanumeric(), None);

        // No named key types a character.
        for code in KeyCode::iter() {
            assert_eq!(code.alphanumeric(), None);
        }
    }
}
