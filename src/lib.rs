//! # softkeys
//!
//! An on-screen virtual keyboard: layout tables, a caps-aware text buffer,
//! pointer hit testing and physical key mapping, plus hooks for themes and
//! assistive speech services.
//!
//! The crate draws nothing. A host feeds [`InputEvent`]s into a
//! [`Screen`](screen::Screen) (or directly into a
//! [`Keyboard`](input::keyboard::Keyboard)) and paints the
//! [`Scene`](screen::Scene) it gets back each frame.
//!
//! ```
//! use ::softkeys::{input::keyboard::InputEvent, screen::Builder, Variant};
//!
//! let mut screen = Builder::new()
//!     .with_variant(Variant::Desktop)
//!     .build()
//!     .expect("default configuration is valid");
//!
//! for key in ["Q", "u", "i", " ", "b", "y", "e"] {
//!     screen.handle(InputEvent::key_named(key));
//! }
//! assert_eq!(screen.keyboard().current_text(), "qui bye");
//! ```
//!
//! [`InputEvent`]: input::keyboard::InputEvent

pub mod assist;
pub mod errors;
pub mod input;
pub mod layout;
pub mod screen;
pub mod theme;

use ::strum::{Display, EnumIter};

use crate::{
    layout::{qwerty, qwerty_digits_last, LayoutSet},
    theme::ThemeFamily,
};

/// Which flavour of on-screen keyboard to present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Variant {
    /// Canvas-style keyboard with a layout selector, Caps/Space/Delete and a
    /// dictation key.
    #[default]
    Desktop,
    /// Touch keyboard with Caps/Space/Delete/Enter and no assistive keys.
    Mobile,
    /// Touch keyboard with Enter plus read-aloud and theme keys.
    MobileAssistive,
}

/// What the Speak key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistMode {
    /// Start speech recognition and append the transcript.
    Dictate,
    /// Read the buffer aloud.
    ReadAloud,
}

impl Variant {
    pub const fn assist_mode(self) -> AssistMode {
        match self {
            Self::Desktop => AssistMode::Dictate,
            Self::Mobile | Self::MobileAssistive => AssistMode::ReadAloud,
        }
    }

    /// The theme group offered on this variant.
    pub const fn theme_family(self) -> ThemeFamily {
        match self {
            Self::Desktop => ThemeFamily::Desktop,
            Self::Mobile | Self::MobileAssistive => ThemeFamily::Mobile,
        }
    }

    /// Desktop offers QWERTY and AZERTY; the plain mobile keyboard puts its
    /// digits last; the assistive mobile keyboard uses QWERTY.
    pub fn default_layouts(self) -> LayoutSet {
        match self {
            Self::Desktop => LayoutSet::default(),
            Self::Mobile => LayoutSet::from_preset(qwerty_digits_last()),
            Self::MobileAssistive => LayoutSet::from_preset(qwerty()),
        }
    }
}
