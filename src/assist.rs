//! Seams for the assistive speech services.
//!
//! The keyboard never talks to a platform speech engine directly. A
//! [`Screen`] holds one [`SpeechRecognizer`] and one [`SpeechSynthesizer`]
//! and calls them when the controller asks for it.
//!
//! [`Screen`]: crate::screen::Screen

use ::tracing::trace;

use crate::{
    errors::{ErrorKind, Result},
    screen::EventSender,
};

/// Locale requested from the recognizer unless configured otherwise.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Voice parameters passed with every read-aloud request.
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceConfig {
    pub language: String,
    pub pitch: f32,
    pub rate: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: "en".to_owned(),
            pitch: 1.0,
            rate: 1.0,
        }
    }
}

/// A speech-to-text service.
///
/// `start_listening` only issues the request. The outcome arrives later
/// through `reply`, on the screen's event queue, as exactly one
/// [`InputEvent::SpeechResult`] or [`InputEvent::SpeechError`]. A request
/// can't be cancelled once issued.
///
/// Return [`ErrorKind::Unsupported`] if the platform has no recognizer; the
/// screen turns that into a user-facing notice.
///
/// [`InputEvent::SpeechResult`]: crate::input::keyboard::InputEvent::SpeechResult
/// [`InputEvent::SpeechError`]: crate::input::keyboard::InputEvent::SpeechError
pub trait SpeechRecognizer {
    fn start_listening(&mut self, locale: &str, reply: EventSender) -> Result<()>;
}

/// A text-to-speech service. Nothing is read back from it.
pub trait SpeechSynthesizer {
    fn speak(&mut self, text: &str, voice: &VoiceConfig) -> Result<()>;
}

/// Recognizer for platforms without speech recognition.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn start_listening(&mut self, _locale: &str, _reply: EventSender) -> Result<()> {
        Err(ErrorKind::Unsupported {
            capability: "Speech recognition",
        }
        .into())
    }
}

/// Synthesizer which discards everything it is asked to say.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSynthesizer;

impl SpeechSynthesizer for SilentSynthesizer {
    fn speak(&mut self, text: &str, voice: &VoiceConfig) -> Result<()> {
        trace!(chars = text.chars().count(), language = %voice.language, "Discarding speech");
        Ok(())
    }
}
