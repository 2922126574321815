//! Top-level screen object which ties the keyboard to its collaborators.

use ::std::{fmt, time::Duration};
use ::tap::prelude::*;
use ::tracing::{debug, error, warn};

use crate::{
    assist::{SpeechRecognizer, SpeechSynthesizer, VoiceConfig},
    errors::Context,
    input::keyboard::{InputEvent, Keyboard, Request},
    screen::{CursorBlink, EventQueue, EventSender, Scene},
    theme::ThemeSelector,
};

/// One open keyboard screen: the keyboard controller, its theme, the cursor
/// blink timer, the input queue and the assistive speech services.
///
/// A [`Screen`] is the single owner of all keyboard state. Input is either
/// applied immediately through [`handle`], or posted through an
/// [`EventSender`] and applied on the next [`pump`]. Either way events are
/// applied one at a time, in order.
///
/// # Example
///
/// ```
/// use ::softkeys::{input::keyboard::InputEvent, screen::Builder, Variant};
///
/// let mut screen = Builder::new()
///     .with_variant(Variant::Desktop)
///     .build()
///     .expect("Failed to open keyboard screen");
///
/// // A speech service replies some time later, possibly from another thread.
/// let reply = screen.sender();
/// reply.transcript("Hello World");
///
/// // Typically invoked once per frame:
/// screen.pump();
/// let scene = screen.scene();
/// assert_eq!(scene.text, "Hello World");
/// ```
///
/// [`handle`]: Self::handle
/// [`pump`]: Self::pump
pub struct Screen {
    keyboard: Keyboard,
    themes: ThemeSelector,
    blink: CursorBlink,
    queue: EventQueue,
    recognizer: Box<dyn SpeechRecognizer>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    locale: String,
    voice: VoiceConfig,
    /// A pending user-facing message, shown until dismissed.
    notice: Option<String>,
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("keyboard", &self.keyboard)
            .field("themes", &self.themes)
            .field("blink", &self.blink)
            .field("queue", &self.queue)
            .field("recognizer", &"<dyn SpeechRecognizer>")
            .field("synthesizer", &"<dyn SpeechSynthesizer>")
            .field("locale", &self.locale)
            .field("voice", &self.voice)
            .field("notice", &self.notice)
            .finish()
    }
}

impl Screen {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        keyboard: Keyboard,
        themes: ThemeSelector,
        blink: CursorBlink,
        recognizer: Box<dyn SpeechRecognizer>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        locale: String,
        voice: VoiceConfig,
    ) -> Self {
        debug!(variant = %keyboard.variant(), theme = %themes.current(), "Opening keyboard screen");
        Self {
            keyboard,
            themes,
            blink,
            queue: EventQueue::new(),
            recognizer,
            synthesizer,
            locale,
            voice,
            notice: None,
        }
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Direct access to the controller, e.g. for a layout selector widget.
    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    pub fn themes(&self) -> &ThemeSelector {
        &self.themes
    }

    pub fn themes_mut(&mut self) -> &mut ThemeSelector {
        &mut self.themes
    }

    pub fn cursor(&self) -> &CursorBlink {
        &self.blink
    }

    /// The pending user-facing message, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Clears the pending user-facing message.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// A handle for posting events onto this screen's queue.
    pub fn sender(&self) -> EventSender {
        self.queue.sender()
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.keyboard.set_viewport_width(width);
    }

    /// Applies one event now and carries out any request it produced.
    pub fn handle(&mut self, evt: InputEvent) {
        if evt.is_speech() {
            debug!(notice = ?self.notice, "Applying speech service reply");
        }
        if let Some(request) = self.keyboard.process_evt(evt) {
            self.service(request);
        }
    }

    /// Applies every queued event in order. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(evt) = self.queue.try_next() {
            self.handle(evt);
            applied += 1;
        }
        applied
    }

    /// Advances the cursor blink timer. Returns `true` if the frame needs
    /// redrawing.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.blink.advance(elapsed)
    }

    /// Composes the current frame.
    pub fn scene(&self) -> Scene {
        Scene::compose(
            &self.keyboard,
            self.themes.current(),
            self.blink.is_visible(),
            self.notice.as_deref(),
        )
    }

    /// Carries out a request from the keyboard. A missing platform service
    /// becomes a notice for the user; other failures go to the log only. The
    /// buffer is never touched here.
    fn service(&mut self, request: Request) {
        let result = match request {
            Request::StartListening => self
                .recognizer
                .start_listening(&self.locale, self.queue.sender())
                .context("Failed to start dictation")
                .tap_ok(|_| debug!(locale = %self.locale, "Listening for speech")),
            Request::ReadAloud(text) => self
                .synthesizer
                .speak(&text, &self.voice)
                .context("Failed to read text aloud"),
            Request::CycleTheme => {
                self.themes.cycle();
                Ok(())
            }
        };

        if let Err(e) = result {
            if e.is_unsupported() {
                warn!(error = %e, "Assistive service unavailable");
                self.notice = Some(e.kind().to_string());
            } else {
                error!(error = %e);
            }
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        debug!(chars = self.keyboard.buffer().len(), "Closing keyboard screen");
    }
}
