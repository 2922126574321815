//! Strongly-typed input events consumed by the keyboard controller, and the
//! requests it hands back to the host.

use super::KeyCode;

/// Everything that can change keyboard state. All input reaches the
/// controller through [`Keyboard::process_evt`] as one of these.
///
/// [`Keyboard::process_evt`]: crate::input::keyboard::Keyboard::process_evt
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer-down (mouse click or touch) at viewport coordinates.
    Pointer { x: f32, y: f32 },
    /// A physical key went down.
    PhysicalKey { code: KeyCode },
    /// The speech recognizer delivered a transcript.
    SpeechResult { text: String },
    /// The speech recognizer gave up.
    SpeechError { reason: String },
}

impl InputEvent {
    /// Convenience for hosts which report keys by name.
    pub fn key_named(name: &str) -> Self {
        Self::PhysicalKey {
            code: KeyCode::from_key_name(name),
        }
    }

    /// Returns `true` for the events produced by the assistive speech
    /// services rather than by the user directly.
    pub const fn is_speech(&self) -> bool {
        matches!(self, Self::SpeechResult { .. } | Self::SpeechError { .. })
    }
}

/// Work the controller cannot do itself and asks the host screen to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Start a speech recognition request. The transcript comes back later as
    /// [`InputEvent::SpeechResult`].
    StartListening,
    /// Read the given text aloud.
    ReadAloud(String),
    /// Advance to the next theme.
    CycleTheme,
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_key_named() {
        assert_eq!(
            InputEvent::key_named("Backspace"),
            InputEvent::PhysicalKey {
                code: KeyCode::Backspace
            }
        );
        assert_eq!(
            InputEvent::key_named("x"),
            InputEvent::PhysicalKey {
                code: KeyCode::Char('x')
            }
        );
    }

    #[test]
    fn test_is_speech() {
        assert!(InputEvent::SpeechResult {
            text: "hi".to_owned()
        }
        .is_speech());
        assert!(InputEvent::SpeechError {
            reason: "network".to_owned()
        }
        .is_speech());
        assert!(!InputEvent::Pointer { x: 1.0, y: 2.0 }.is_speech());
    }
}
