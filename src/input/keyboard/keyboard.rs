//! Keyboard state and text input tracking.

use ::tracing::{debug, error, trace};

use super::{InputEvent, KeyCode, Request};
use crate::{
    layout::{hit_test, key_rectangles, ControlPanel, KeyLabel, KeyMetrics, KeyRect, Layout, LayoutSet},
    AssistMode, Variant,
};

/// The mutable part of the keyboard: shift toggle, highlight and typed text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// Persistent caps toggle. Flipped by the Caps key, never released
    /// automatically.
    pub shift_active: bool,
    /// The most recently actuated key, kept for highlighting until the next
    /// actuation replaces or clears it.
    pub active_key: Option<KeyLabel>,
    /// Typed text in insertion order.
    pub buffer: Vec<char>,
}

/// The central object which owns the layout selection and input state, and
/// turns pointer and physical key input into buffer edits.
///
/// # Case
///
/// Case is decided at the moment of each press: a character key appends its
/// label in upper case while shift is active and in lower case otherwise.
/// Characters already in the buffer never change when shift is toggled. The
/// same rule applies whether the key was clicked, tapped, or typed on a
/// physical keyboard.
///
/// # Pointer Input
///
/// Pointer coordinates are hit tested against [`key_rectangles`], the same
/// rectangles a renderer draws. A point outside every key is ignored and
/// leaves all state untouched.
///
/// # Assistive Keys
///
/// The Speak and Theme keys need collaborators the keyboard doesn't own.
/// Pressing them updates the highlight and returns a [`Request`] for the host
/// to carry out. Recognized speech comes back as an [`InputEvent`] and is
/// inserted verbatim.
///
/// # Example
///
/// ```
/// use ::softkeys::{input::keyboard::{Keyboard, KeyCode, InputEvent}, Variant};
///
/// let mut keyboard = Keyboard::for_variant(Variant::Desktop);
///
/// keyboard.press_character('H');
/// keyboard.toggle_caps_lock();
/// keyboard.process_evt(InputEvent::PhysicalKey { code: KeyCode::Char('i') });
/// assert_eq!(keyboard.current_text(), "hI");
///
/// keyboard.press_delete();
/// assert_eq!(keyboard.current_text(), "h");
/// ```
///
/// [`key_rectangles`]: crate::layout::key_rectangles
#[derive(Clone, Debug)]
pub struct Keyboard {
    variant: Variant,
    layouts: LayoutSet,
    panel: ControlPanel,
    metrics: KeyMetrics,
    viewport_width: f32,
    state: InputState,
}

/// Viewport width assumed until the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 700.0;

impl Keyboard {
    /// Constructs a keyboard with an empty buffer and shift off.
    pub fn new(
        variant: Variant,
        layouts: LayoutSet,
        metrics: KeyMetrics,
        viewport_width: f32,
    ) -> Self {
        Self {
            variant,
            layouts,
            panel: ControlPanel::for_variant(variant),
            metrics,
            viewport_width,
            state: InputState::default(),
        }
    }

    /// Constructs a keyboard with the variant's default layouts and the
    /// default metrics.
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(
            variant,
            variant.default_layouts(),
            KeyMetrics::default(),
            DEFAULT_VIEWPORT_WIDTH,
        )
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn layouts(&self) -> &LayoutSet {
        &self.layouts
    }

    /// The active layout.
    pub fn layout(&self) -> &Layout {
        self.layouts.active()
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Updates the viewport width, e.g. after a window or terminal resize.
    /// Key rectangles are re-derived on the next hit test or frame.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn is_shift_active(&self) -> bool {
        self.state.shift_active
    }

    pub fn active_key(&self) -> Option<KeyLabel> {
        self.state.active_key
    }

    pub fn buffer(&self) -> &[char] {
        &self.state.buffer
    }

    /// The rectangles of every key in the active layout and control panel.
    pub fn key_rectangles(&self) -> Vec<KeyRect> {
        key_rectangles(
            self.layouts.active(),
            &self.panel,
            &self.metrics,
            self.viewport_width,
        )
    }

    /// Makes the layout at `index` active. Unknown indices are ignored.
    pub fn select_layout(&mut self, index: usize) {
        self.layouts.select(index);
    }

    /// Flips the caps toggle.
    pub fn toggle_caps_lock(&mut self) {
        self.state.shift_active = !self.state.shift_active;
        self.state.active_key = Some(KeyLabel::Caps);
        debug!(shift_active = self.state.shift_active, "Toggled caps lock");
    }

    /// Appends a character key, upper-cased while shift is active and
    /// lower-cased otherwise.
    ///
    /// Characters which aren't labels of the active layout are ignored.
    pub fn press_character(&mut self, raw: char) {
        if !self.layouts.active().contains(raw) {
            trace!(?raw, layout = %self.layouts.active().name(), "Ignoring character outside layout");
            return;
        }

        let ch = if self.state.shift_active {
            raw.to_ascii_uppercase()
        } else {
            raw.to_ascii_lowercase()
        };
        self.state.buffer.push(ch);
        self.state.active_key = Some(KeyLabel::Char(ch));
    }

    pub fn press_space(&mut self) {
        self.state.buffer.push(' ');
        self.state.active_key = Some(KeyLabel::Space);
    }

    /// Removes the last character, if any. Deleting from an empty buffer only
    /// updates the highlight.
    pub fn press_delete(&mut self) {
        self.state.buffer.pop();
        self.state.active_key = Some(KeyLabel::Delete);
    }

    pub fn press_enter(&mut self) {
        self.state.buffer.push('\n');
        self.state.active_key = Some(KeyLabel::Enter);
    }

    /// Highlights the Speak key and returns the assistive request for the
    /// variant: dictation on the desktop, read-aloud on mobile.
    pub fn press_speak(&mut self) -> Request {
        self.state.active_key = Some(KeyLabel::Speak);
        match self.variant.assist_mode() {
            AssistMode::Dictate => Request::StartListening,
            AssistMode::ReadAloud => Request::ReadAloud(self.current_text()),
        }
    }

    pub fn press_theme(&mut self) -> Request {
        self.state.active_key = Some(KeyLabel::Theme);
        Request::CycleTheme
    }

    /// Applies a resolved key. Pointer and physical key input both end up
    /// here, so the same key always edits the buffer the same way.
    pub fn press_key(&mut self, label: KeyLabel) -> Option<Request> {
        match label {
            KeyLabel::Char(c) => self.press_character(c),
            KeyLabel::Space => self.press_space(),
            KeyLabel::Delete => self.press_delete(),
            KeyLabel::Caps => self.toggle_caps_lock(),
            KeyLabel::Enter => self.press_enter(),
            KeyLabel::Speak => return Some(self.press_speak()),
            KeyLabel::Theme => return Some(self.press_theme()),
        }
        None
    }

    /// Hit tests a pointer-down and presses the key under it. Points outside
    /// every key change nothing.
    pub fn resolve_pointer(&mut self, x: f32, y: f32) -> Option<Request> {
        match hit_test(&self.key_rectangles(), x, y) {
            Some(label) => {
                trace!(x, y, %label, "Pointer hit key");
                self.press_key(label)
            }
            None => {
                trace!(x, y, "Pointer outside keyboard");
                None
            }
        }
    }

    /// Maps a physical key to a press. Backspace, space, caps lock and the
    /// `[a-zA-Z0-9]` keys of the active layout are mapped; any other key
    /// clears the highlight and leaves the buffer alone.
    pub fn resolve_physical_key(&mut self, code: KeyCode) -> Option<Request> {
        let label = match code {
            KeyCode::Backspace => KeyLabel::Delete,
            KeyCode::Space => KeyLabel::Space,
            KeyCode::CapsLock => KeyLabel::Caps,
            _ => match code
                .alphanumeric()
                .filter(|&c| self.layouts.active().contains(c))
            {
                Some(c) => KeyLabel::Char(c),
                None => {
                    trace!(?code, "Unmapped physical key");
                    self.state.active_key = None;
                    return None;
                }
            },
        };
        self.press_key(label)
    }

    /// The buffer as a single string.
    pub fn current_text(&self) -> String {
        self.state.buffer.iter().collect()
    }

    /// Appends a recognized utterance exactly as received (no case rule) and
    /// clears the highlight.
    pub fn consume_recognized_speech(&mut self, text: &str) {
        debug!(chars = text.chars().count(), "Appending recognized speech");
        self.state.buffer.extend(text.chars());
        self.state.active_key = None;
    }

    /// Processes one input event and updates internal state.
    ///
    /// Returns a [`Request`] when the event pressed a key that needs a
    /// collaborator. A [`InputEvent::SpeechError`] is logged and otherwise
    /// ignored; the buffer is never touched by a failed recognition.
    pub fn process_evt(&mut self, evt: InputEvent) -> Option<Request> {
        match evt {
            InputEvent::Pointer { x, y } => self.resolve_pointer(x, y),
            InputEvent::PhysicalKey { code } => self.resolve_physical_key(code),
            InputEvent::SpeechResult { text } => {
                self.consume_recognized_speech(&text);
                None
            }
            InputEvent::SpeechError { reason } => {
                error!(%reason, "Speech recognition error");
                None
            }
        }
    }

    /// Reset all input state. The layout selection and viewport are kept.
    pub fn reset(&mut self) {
        self.state = InputState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{qwerty_digits_last, Rect};

    use ::pretty_assertions::assert_eq;
    use ::strum::IntoEnumIterator;

    fn centre_of(keyboard: &Keyboard, label: KeyLabel) -> (f32, f32) {
        let Rect {
            x,
            y,
            width,
            height,
        } = keyboard
            .key_rectangles()
            .into_iter()
            .find(|k| k.label == label)
            .expect("key should be on the keyboard")
            .rect;
        (x + width / 2.0, y + height / 2.0)
    }

    fn click(keyboard: &mut Keyboard, label: KeyLabel) -> Option<Request> {
        let (x, y) = centre_of(keyboard, label);
        keyboard.process_evt(InputEvent::Pointer { x, y })
    }

    fn type_keys(keyboard: &mut Keyboard, names: &[&str]) {
        for name in names {
            keyboard.process_evt(InputEvent::key_named(name));
        }
    }

    /// A fresh keyboard is empty, shift is off and nothing is highlighted.
    #[test]
    fn test_initial_state() {
        for variant in Variant::iter() {
            let kbd = Keyboard::for_variant(variant);
            assert_eq!(kbd.state(), &InputState::default());
            assert_eq!(kbd.current_text(), "");
        }
    }

    /// With shift off, every character is appended in lower case.
    #[test]
    fn test_lower_case_by_default() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);

        for c in "QUICKBROWNFOX".chars() {
            kbd.press_character(c);
        }

        assert_eq!(kbd.current_text(), "quickbrownfox");
        assert_eq!(kbd.active_key(), Some(KeyLabel::Char('x')));
    }

    /// Toggling shift only changes characters pressed afterwards.
    #[test]
    fn test_shift_applies_at_press_time() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);

        kbd.press_character('a');
        kbd.toggle_caps_lock();
        assert_eq!(kbd.active_key(), Some(KeyLabel::Caps));
        kbd.press_character('b');
        kbd.toggle_caps_lock();
        kbd.press_character('C');

        assert_eq!(kbd.current_text(), "aBc");
        assert!(!kbd.is_shift_active());
    }

    /// Characters that aren't on the active layout are dropped silently.
    #[test]
    fn test_press_character_outside_layout() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.press_character('a');

        let before = kbd.state().clone();
        kbd.press_character('-');
        kbd.press_character('ß');
        assert_eq!(kbd.state(), &before);
    }

    #[test]
    fn test_delete_on_empty_buffer() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);

        kbd.press_delete();
        kbd.press_delete();

        assert!(kbd.buffer().is_empty());
        assert_eq!(kbd.active_key(), Some(KeyLabel::Delete));
    }

    /// Delete removes the last entry whatever it is: character, space or
    /// newline.
    #[test]
    fn test_delete_removes_most_recent_entry() {
        let mut kbd = Keyboard::for_variant(Variant::Mobile);

        kbd.press_character('a');
        kbd.press_space();
        kbd.press_enter();
        assert_eq!(kbd.current_text(), "a \n");

        kbd.press_delete();
        assert_eq!(kbd.current_text(), "a ");
        kbd.press_delete();
        assert_eq!(kbd.current_text(), "a");
        kbd.press_delete();
        assert_eq!(kbd.current_text(), "");
    }

    #[test]
    fn test_enter_appends_newline() {
        let mut kbd = Keyboard::for_variant(Variant::Mobile);

        kbd.press_character('o');
        kbd.press_character('k');
        kbd.press_enter();

        assert_eq!(kbd.current_text(), "ok\n");
        assert_eq!(kbd.active_key(), Some(KeyLabel::Enter));
    }

    /// Clicking keys edits the buffer with the same case rule as typing.
    #[test]
    fn test_pointer_input() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);

        click(&mut kbd, KeyLabel::Char('H'));
        click(&mut kbd, KeyLabel::Caps);
        click(&mut kbd, KeyLabel::Char('I'));
        click(&mut kbd, KeyLabel::Space);
        click(&mut kbd, KeyLabel::Char('7'));
        click(&mut kbd, KeyLabel::Delete);

        assert_eq!(kbd.current_text(), "hI ");
        assert!(kbd.is_shift_active());
        assert_eq!(kbd.active_key(), Some(KeyLabel::Delete));
    }

    /// A click that misses every key changes nothing at all.
    #[test]
    fn test_pointer_miss_is_a_no_op() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.toggle_caps_lock();
        kbd.press_character('x');
        let before = kbd.state().clone();

        for (x, y) in [(1.0, 1.0), (699.0, 60.0 + 15.0), (350.0, 500.0), (-5.0, -5.0)] {
            assert_eq!(kbd.process_evt(InputEvent::Pointer { x, y }), None);
        }

        assert_eq!(kbd.state(), &before);
    }

    /// Pointer and physical paths that resolve to the same key produce the
    /// same buffer.
    #[test]
    fn test_pointer_and_physical_key_equivalence() {
        let mut by_pointer = Keyboard::for_variant(Variant::Desktop);
        let mut by_key = Keyboard::for_variant(Variant::Desktop);

        let presses = [
            (KeyLabel::Char('W'), "w"),
            (KeyLabel::Caps, "CapsLock"),
            (KeyLabel::Char('O'), "o"),
            (KeyLabel::Space, " "),
            (KeyLabel::Char('4'), "4"),
            (KeyLabel::Caps, "CapsLock"),
            (KeyLabel::Char('K'), "K"),
            (KeyLabel::Delete, "Backspace"),
            (KeyLabel::Char('Z'), "z"),
        ];
        for (label, name) in presses {
            click(&mut by_pointer, label);
            type_keys(&mut by_key, &[name]);
            assert_eq!(by_pointer.state(), by_key.state());
        }

        assert_eq!(by_key.current_text(), "wO 4z");
    }

    /// Physical keys without a mapping clear the highlight only.
    #[test]
    fn test_unmapped_physical_key() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        type_keys(&mut kbd, &["a", "CapsLock"]);

        for name in ["Shift", "Enter", "ArrowLeft", "-", "é", "F1"] {
            type_keys(&mut kbd, &["b"]);
            assert!(kbd.active_key().is_some());

            type_keys(&mut kbd, &[name]);
            assert_eq!(kbd.active_key(), None);
        }

        assert_eq!(kbd.current_text(), "aBBBBBB");
        assert!(kbd.is_shift_active());
    }

    /// An alphanumeric key with no counterpart on the active layout counts
    /// as unmapped.
    #[test]
    fn test_physical_key_missing_from_layout() {
        let layouts = LayoutSet::new(vec![Layout::new("Tiny", &["PYF"]).unwrap()]).unwrap();
        let mut kbd = Keyboard::new(
            Variant::Desktop,
            layouts,
            KeyMetrics::default(),
            DEFAULT_VIEWPORT_WIDTH,
        );

        type_keys(&mut kbd, &["p"]);
        assert_eq!(kbd.active_key(), Some(KeyLabel::Char('p')));

        type_keys(&mut kbd, &["7"]);
        assert_eq!(kbd.active_key(), None);
        assert_eq!(kbd.current_text(), "p");
    }

    /// Speech is inserted verbatim, with no case transform, and clears the
    /// highlight.
    #[test]
    fn test_recognized_speech_is_verbatim() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.toggle_caps_lock();
        kbd.press_character('x');

        kbd.process_evt(InputEvent::SpeechResult {
            text: " Hello, wörld!".to_owned(),
        });

        assert_eq!(kbd.current_text(), "X Hello, wörld!");
        assert_eq!(kbd.active_key(), None);
        assert!(kbd.is_shift_active());
    }

    #[test]
    fn test_speech_error_leaves_state_unchanged() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.press_character('q');
        let before = kbd.state().clone();

        let request = kbd.process_evt(InputEvent::SpeechError {
            reason: "network".to_owned(),
        });

        assert_eq!(request, None);
        assert_eq!(kbd.state(), &before);
    }

    #[test]
    fn test_speak_key_requests_dictation_on_desktop() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.press_character('a');

        assert_eq!(click(&mut kbd, KeyLabel::Speak), Some(Request::StartListening));
        assert_eq!(kbd.active_key(), Some(KeyLabel::Speak));
        assert_eq!(kbd.current_text(), "a");
    }

    #[test]
    fn test_speak_and_theme_keys_on_assistive_mobile() {
        let mut kbd = Keyboard::for_variant(Variant::MobileAssistive);
        type_keys(&mut kbd, &["h", "i"]);

        assert_eq!(
            click(&mut kbd, KeyLabel::Speak),
            Some(Request::ReadAloud("hi".to_owned()))
        );
        assert_eq!(click(&mut kbd, KeyLabel::Theme), Some(Request::CycleTheme));
        assert_eq!(kbd.active_key(), Some(KeyLabel::Theme));
        assert_eq!(kbd.current_text(), "hi");
    }

    /// Switching layouts moves the keys under the pointer.
    #[test]
    fn test_select_layout_changes_hit_targets() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        let (x, y) = centre_of(&kbd, KeyLabel::Char('Q'));

        kbd.select_layout(1);
        assert_eq!(kbd.layout().name(), "AZERTY");
        kbd.process_evt(InputEvent::Pointer { x, y });

        assert_eq!(kbd.current_text(), "a");

        // Unknown index: stays on AZERTY.
        kbd.select_layout(9);
        assert_eq!(kbd.layouts().active_index(), 1);
    }

    #[test]
    fn test_mobile_layout_and_resize() {
        let mut kbd = Keyboard::for_variant(Variant::Mobile);
        assert_eq!(kbd.layout(), &qwerty_digits_last());

        let before = centre_of(&kbd, KeyLabel::Char('Q'));
        kbd.set_viewport_width(kbd.viewport_width() + 100.0);
        let after = centre_of(&kbd, KeyLabel::Char('Q'));
        assert_eq!(after.0 - before.0, 50.0);
        assert_eq!(after.1, before.1);
    }

    #[test]
    fn test_reset() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.select_layout(1);
        type_keys(&mut kbd, &["CapsLock", "a", "b"]);

        kbd.reset();

        assert_eq!(kbd.state(), &InputState::default());
        assert_eq!(kbd.layouts().active_index(), 1);
    }
}
