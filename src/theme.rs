//! Colour themes and the selector which cycles through them.
//!
//! The active [`Palette`] is handed explicitly to whatever composes a frame;
//! nothing reads theme colours from shared state.

use ::lazy_static::lazy_static;
use ::maplit::hashmap;
use ::std::{
    collections::HashMap,
    fmt::{self, Display},
};
use ::strum::{Display as StrumDisplay, EnumIter, EnumString};
use ::tracing::{debug, warn};

/// An opaque 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Identifies one of the built-in themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum ThemeId {
    #[strum(to_string = "Light")]
    Light,
    #[strum(to_string = "Dark")]
    Dark,
    #[strum(
        to_string = "High Contrast",
        serialize = "high-contrast",
        serialize = "highcontrast",
        serialize = "high_contrast"
    )]
    HighContrast,
    #[strum(to_string = "Black")]
    Black,
    #[strum(to_string = "Blue")]
    Blue,
    #[strum(to_string = "White")]
    White,
}

/// The colours a frame is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    /// Key surface.
    pub key: Rgb,
    /// Key surface while highlighted.
    pub key_active: Rgb,
}

impl Palette {
    /// A palette without a separate highlight colour.
    const fn flat(background: Rgb, text: Rgb, key: Rgb) -> Self {
        Self {
            background,
            text,
            key,
            key_active: key,
        }
    }
}

lazy_static! {
    static ref PALETTES: HashMap<ThemeId, Palette> = hashmap! {
        ThemeId::Light => Palette {
            background: Rgb::new(0xf4, 0xf4, 0xf4),
            text: Rgb::new(0x00, 0x00, 0x00),
            key: Rgb::new(0xff, 0xff, 0xff),
            key_active: Rgb::new(0xff, 0xff, 0xaa),
        },
        ThemeId::Dark => Palette {
            background: Rgb::new(0x1e, 0x1e, 0x1e),
            text: Rgb::new(0xee, 0xee, 0xee),
            key: Rgb::new(0x33, 0x33, 0x33),
            key_active: Rgb::new(0x55, 0x55, 0x55),
        },
        ThemeId::HighContrast => Palette {
            background: Rgb::new(0x00, 0x00, 0x00),
            text: Rgb::new(0xff, 0xff, 0xff),
            key: Rgb::new(0x00, 0x00, 0x00),
            key_active: Rgb::new(0x00, 0xff, 0x00),
        },
        ThemeId::Black => Palette::flat(
            Rgb::new(0x33, 0x33, 0x33),
            Rgb::new(0xff, 0xff, 0xff),
            Rgb::new(0x55, 0x55, 0x55),
        ),
        ThemeId::Blue => Palette::flat(
            Rgb::new(0x00, 0x44, 0xcc),
            Rgb::new(0xff, 0xff, 0xff),
            Rgb::new(0x00, 0x77, 0xff),
        ),
        ThemeId::White => Palette::flat(
            Rgb::new(0xff, 0xff, 0xff),
            Rgb::new(0x00, 0x00, 0x00),
            Rgb::new(0xdd, 0xdd, 0xdd),
        ),
    };
}

impl ThemeId {
    /// The colours of this theme.
    pub fn palette(self) -> Palette {
        PALETTES[&self]
    }
}

/// A fixed group of themes a selector rotates through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeFamily {
    /// Light, Dark, High Contrast.
    Desktop,
    /// Black, Blue, White.
    Mobile,
}

impl ThemeFamily {
    /// Member themes in rotation order.
    pub const fn members(self) -> &'static [ThemeId] {
        match self {
            Self::Desktop => &[ThemeId::Light, ThemeId::Dark, ThemeId::HighContrast],
            Self::Mobile => &[ThemeId::Black, ThemeId::Blue, ThemeId::White],
        }
    }

    /// The theme used when nothing else was asked for.
    pub const fn default_theme(self) -> ThemeId {
        match self {
            Self::Desktop => ThemeId::Light,
            Self::Mobile => ThemeId::White,
        }
    }

    pub fn contains(self, id: ThemeId) -> bool {
        self.members().contains(&id)
    }
}

/// Holds the active theme of a screen and changes it on user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeSelector {
    family: ThemeFamily,
    current: ThemeId,
}

impl ThemeSelector {
    /// Starts on the family's default theme.
    pub fn new(family: ThemeFamily) -> Self {
        Self {
            family,
            current: family.default_theme(),
        }
    }

    /// Starts on the theme named by a platform appearance hint if it names a
    /// member of the family, otherwise on the family default.
    ///
    /// ```
    /// use ::softkeys::theme::{ThemeFamily, ThemeId, ThemeSelector};
    ///
    /// let selector = ThemeSelector::from_system_hint(ThemeFamily::Mobile, Some("blue"));
    /// assert_eq!(selector.current(), ThemeId::Blue);
    ///
    /// // "dark" is not a mobile theme.
    /// let selector = ThemeSelector::from_system_hint(ThemeFamily::Mobile, Some("dark"));
    /// assert_eq!(selector.current(), ThemeId::White);
    /// ```
    pub fn from_system_hint(family: ThemeFamily, hint: Option<&str>) -> Self {
        let current = hint
            .and_then(|hint| hint.trim().parse::<ThemeId>().ok())
            .filter(|id| family.contains(*id))
            .unwrap_or_else(|| family.default_theme());

        Self { family, current }
    }

    pub fn family(&self) -> ThemeFamily {
        self.family
    }

    pub fn current(&self) -> ThemeId {
        self.current
    }

    /// The colours of the current theme.
    pub fn palette(&self) -> Palette {
        self.current.palette()
    }

    /// Switches to `id`. Themes from another family are ignored.
    pub fn select(&mut self, id: ThemeId) {
        if self.family.contains(id) {
            debug!(theme = %id, "Selecting theme");
            self.current = id;
        } else {
            warn!(theme = %id, family = ?self.family, "Ignoring theme from another family");
        }
    }

    /// Advances to the next theme of the family, wrapping around after the
    /// last one. Returns the new theme.
    pub fn cycle(&mut self) -> ThemeId {
        let members = self.family.members();
        let next = members
            .iter()
            .position(|&id| id == self.current)
            .map_or(0, |i| (i + 1) % members.len());

        self.current = members[next];
        debug!(theme = %self.current, "Cycled theme");
        self.current
    }
}
