//! Builder object which constructs [`Screen`]s
//!
//! [`Screen`]: crate::screen::Screen

use ::std::fmt;
use ::tracing::debug;

use crate::{
    assist::{
        SilentSynthesizer, SpeechRecognizer, SpeechSynthesizer, UnsupportedRecognizer,
        VoiceConfig, DEFAULT_LOCALE,
    },
    errors::{Context, Result},
    input::keyboard::{Keyboard, DEFAULT_VIEWPORT_WIDTH},
    layout::{KeyMetrics, Layout, LayoutSet},
    screen::{CursorBlink, Screen},
    theme::{ThemeId, ThemeSelector},
    Variant,
};

/// A builder pattern object which simplifies the process of creating a
/// [`Screen`].
///
/// ```
/// use ::softkeys::{screen::Builder, theme::ThemeId, Variant};
///
/// let screen = Builder::new()
///     .with_variant(Variant::MobileAssistive)
///     .with_theme(ThemeId::Blue)
///     .with_viewport_width(390.0)
///     .build()
///     .expect("Keyboard creation failed");
///
/// assert_eq!(screen.themes().current(), ThemeId::Blue);
/// ```
///
/// [`Screen`]: crate::screen::Screen
pub struct Builder {
    variant: Variant,
    layouts: Option<Vec<Layout>>,
    viewport_width: f32,
    metrics: KeyMetrics,
    theme: Option<ThemeId>,
    appearance_hint: Option<String>,
    locale: String,
    voice: VoiceConfig,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    synthesizer: Option<Box<dyn SpeechSynthesizer>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("variant", &self.variant)
            .field("layouts", &self.layouts)
            .field("viewport_width", &self.viewport_width)
            .field("metrics", &self.metrics)
            .field("theme", &self.theme)
            .field("appearance_hint", &self.appearance_hint)
            .field("locale", &self.locale)
            .field("voice", &self.voice)
            .field("recognizer", &self.recognizer.is_some())
            .field("synthesizer", &self.synthesizer.is_some())
            .finish()
    }
}

impl Builder {
    /// Construct a new builder. Default values will be used for all properties
    /// until explicitly set.
    pub fn new() -> Self {
        Self {
            variant: Variant::default(),
            layouts: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            metrics: KeyMetrics::default(),
            theme: None,
            appearance_hint: None,
            locale: DEFAULT_LOCALE.to_owned(),
            voice: VoiceConfig::default(),
            recognizer: None,
            synthesizer: None,
        }
    }

    /// Defaults to [`Variant::Desktop`] if not set.
    pub fn with_variant(self, variant: Variant) -> Self {
        Self { variant, ..self }
    }

    /// Replace the variant's built-in layouts. The first one starts active.
    pub fn with_layouts(self, layouts: impl IntoIterator<Item = Layout>) -> Self {
        Self {
            layouts: Some(layouts.into_iter().collect()),
            ..self
        }
    }

    /// Width of the area the keyboard is centred in.
    ///
    /// Defaults to 700 if not set.
    pub fn with_viewport_width(self, viewport_width: f32) -> Self {
        Self {
            viewport_width,
            ..self
        }
    }

    pub fn with_metrics(self, metrics: KeyMetrics) -> Self {
        Self { metrics, ..self }
    }

    /// Sets the starting theme. A theme the variant doesn't offer is ignored
    /// and the family default is used instead.
    pub fn with_theme(self, theme: ThemeId) -> Self {
        Self {
            theme: Some(theme),
            ..self
        }
    }

    /// A platform appearance hint such as `"dark"`, used to pick the starting
    /// theme when none is set explicitly.
    pub fn with_appearance_hint(self, hint: impl AsRef<str>) -> Self {
        Self {
            appearance_hint: Some(hint.as_ref().to_owned()),
            ..self
        }
    }

    /// Locale passed to the speech recognizer.
    ///
    /// Defaults to `en-US` if not set.
    pub fn with_locale(self, locale: impl AsRef<str>) -> Self {
        Self {
            locale: locale.as_ref().to_owned(),
            ..self
        }
    }

    pub fn with_voice(self, voice: VoiceConfig) -> Self {
        Self { voice, ..self }
    }

    /// Defaults to a recognizer which reports itself unsupported.
    pub fn with_recognizer(self, recognizer: impl SpeechRecognizer + 'static) -> Self {
        Self {
            recognizer: Some(Box::new(recognizer)),
            ..self
        }
    }

    /// Defaults to a synthesizer which stays silent.
    pub fn with_synthesizer(self, synthesizer: impl SpeechSynthesizer + 'static) -> Self {
        Self {
            synthesizer: Some(Box::new(synthesizer)),
            ..self
        }
    }

    /// Build a new [`Screen`] with the properties of the builder.
    ///
    /// Fails if custom layouts were given but none of them are usable.
    ///
    /// [`Screen`]: crate::screen::Screen
    pub fn build(self) -> Result<Screen> {
        let layouts = match self.layouts {
            Some(layouts) => LayoutSet::new(layouts)
                .context(format!("Failed to build {} keyboard", self.variant))?,
            None => self.variant.default_layouts(),
        };

        let keyboard = Keyboard::new(self.variant, layouts, self.metrics, self.viewport_width);

        let mut themes = ThemeSelector::from_system_hint(
            self.variant.theme_family(),
            self.appearance_hint.as_deref(),
        );
        if let Some(theme) = self.theme {
            themes.select(theme);
        }

        debug!(locale = %self.locale, "Building keyboard screen");
        Ok(Screen::new(
            keyboard,
            themes,
            CursorBlink::default(),
            self.recognizer
                .unwrap_or_else(|| Box::new(UnsupportedRecognizer)),
            self.synthesizer
                .unwrap_or_else(|| Box::new(SilentSynthesizer)),
            self.locale,
            self.voice,
        ))
    }
}
