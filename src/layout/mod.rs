//! Keyboard layout tables and the semantic keys they are made of.

mod geometry;
mod presets;

pub use geometry::*;
pub use presets::*;

use crate::errors::{Context, ErrorKind, Result};

use ::std::fmt::{self, Display};
use ::tracing::{debug, warn};

/// A semantic key: either a character key from a layout row, or one of the
/// fixed control keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyLabel {
    /// A character key. Layout tables hold the uppercase canonical form; the
    /// active-key indicator holds the character as it was typed.
    Char(char),
    Space,
    Delete,
    Caps,
    Enter,
    /// The assistive action key. Depending on the variant this either starts
    /// dictation or reads the buffer aloud.
    Speak,
    Theme,
}

impl Display for KeyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Space => f.write_str("Space"),
            Self::Delete => f.write_str("Delete"),
            Self::Caps => f.write_str("Caps"),
            Self::Enter => f.write_str("Enter"),
            Self::Speak => f.write_str("Speak"),
            Self::Theme => f.write_str("Theme"),
        }
    }
}

/// One keyboard arrangement: an ordered sequence of rows, each an ordered
/// sequence of single-character labels in uppercase canonical form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    name: String,
    rows: Vec<Vec<char>>,
}

impl Layout {
    /// Builds a layout from one string per row, each character being one key.
    ///
    /// Lowercase letters are stored in their uppercase canonical form. Fails
    /// if there are no rows, a row is empty, or a label is whitespace or a
    /// control character.
    ///
    /// ```
    /// use ::softkeys::layout::Layout;
    ///
    /// let dvorak = Layout::new("Dvorak", &["1234567890", "PYFGCRL", "AOEUIDHTNS", "QJKXBMWVZ"])
    ///     .expect("valid layout");
    /// assert!(dvorak.contains('y'));
    /// assert!(Layout::new("Broken", &["ABC", ""]).is_err());
    /// ```
    pub fn new(name: impl Into<String>, rows: &[&str]) -> Result<Self> {
        let name = name.into();

        if rows.is_empty() {
            return Err::<Self, _>(ErrorKind::InvalidLayout("layout has no rows".to_owned()))
                .context(format!("Failed to build layout '{name}'"));
        }

        let rows = rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                if row.is_empty() {
                    return Err(ErrorKind::InvalidLayout(format!("row {r} is empty")));
                }
                row.chars()
                    .map(|c| {
                        if c.is_control() || c.is_whitespace() {
                            Err(ErrorKind::InvalidLayout(format!(
                                "row {r} contains unprintable label {c:?}"
                            )))
                        } else {
                            Ok(c.to_ascii_uppercase())
                        }
                    })
                    .collect()
            })
            .collect::<::std::result::Result<Vec<Vec<char>>, _>>()
            .context(format!("Failed to build layout '{name}'"))?;

        Ok(Self { name, rows })
    }

    /// The human readable name, as offered by a layout selector.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rows of canonical labels, top to bottom.
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Returns `true` if `ch` is one of the layout's labels, ignoring case.
    pub fn contains(&self, ch: char) -> bool {
        let canonical = ch.to_ascii_uppercase();
        self.rows.iter().flatten().any(|&label| label == canonical)
    }
}

/// The closed set of layouts a screen offers, exactly one of which is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutSet {
    layouts: Vec<Layout>,
    active: usize,
}

impl LayoutSet {
    /// Creates a set with the first layout active. Fails if `layouts` is
    /// empty.
    pub fn new(layouts: Vec<Layout>) -> Result<Self> {
        if layouts.is_empty() {
            return Err(ErrorKind::InvalidLayout("no layouts configured".to_owned()).into());
        }

        Ok(Self { layouts, active: 0 })
    }

    /// A set holding a single layout.
    pub fn from_preset(layout: Layout) -> Self {
        Self {
            layouts: vec![layout],
            active: 0,
        }
    }

    /// The currently active layout.
    pub fn active(&self) -> &Layout {
        &self.layouts[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Always `false`; a set holds at least one layout.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Layout names in index order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.layouts.iter().map(Layout::name)
    }

    /// Makes the layout at `index` active. An index outside the set is
    /// ignored.
    pub fn select(&mut self, index: usize) {
        match self.layouts.get(index) {
            Some(layout) => {
                debug!(layout = %layout.name(), index, "Selecting layout");
                self.active = index;
            }
            None => warn!(index, len = self.layouts.len(), "Ignoring unknown layout index"),
        }
    }
}

impl Default for LayoutSet {
    /// The desktop pair: QWERTY (active) and AZERTY.
    fn default() -> Self {
        Self {
            layouts: vec![qwerty(), azerty()],
            active: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_layout_canonicalises_to_uppercase() {
        let layout = Layout::new("Lower", &["abc", "12"]).unwrap();
        assert_eq!(layout.rows(), &[vec!['A', 'B', 'C'], vec!['1', '2']]);
        assert!(layout.contains('a'));
        assert!(layout.contains('B'));
        assert!(!layout.contains('z'));
    }

    #[test]
    fn test_layout_rejects_empty_rows() {
        let err = Layout::new("Gap", &["ABC", ""]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidLayout("row 1 is empty".to_owned()));
        assert_eq!(err.context_message(), Some("Failed to build layout 'Gap'"));

        assert!(Layout::new("Nothing", &[]).is_err());
    }

    #[test]
    fn test_layout_rejects_whitespace_labels() {
        assert!(Layout::new("Spacey", &["A B"]).is_err());
        assert!(Layout::new("Tabby", &["A\tB"]).is_err());
    }

    #[test]
    fn test_layout_set_selection() {
        let mut set = LayoutSet::default();
        assert_eq!(set.active().name(), "QWERTY");

        set.select(1);
        assert_eq!(set.active_index(), 1);
        assert_eq!(set.active().name(), "AZERTY");

        // Out-of-range selection leaves the active layout alone.
        set.select(7);
        assert_eq!(set.active_index(), 1);

        assert_eq!(set.names().collect::<Vec<_>>(), vec!["QWERTY", "AZERTY"]);
    }

    #[test]
    fn test_layout_set_must_not_be_empty() {
        assert!(LayoutSet::new(Vec::new()).is_err());
    }

    #[test]
    fn test_key_label_display() {
        assert_eq!(KeyLabel::Char('q').to_string(), "q");
        assert_eq!(KeyLabel::Space.to_string(), "Space");
        assert_eq!(KeyLabel::Delete.to_string(), "Delete");
        assert_eq!(KeyLabel::Theme.to_string(), "Theme");
    }
}
