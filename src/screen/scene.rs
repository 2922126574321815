//! Frame description handed to a renderer.

use crate::{
    input::keyboard::Keyboard,
    layout::{KeyLabel, Rect},
    theme::{Palette, Rgb, ThemeId},
};

/// One key as it should be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyFace {
    pub label: KeyLabel,
    pub rect: Rect,
    /// Text on the key, in the case the next press would type.
    pub caption: String,
    pub highlighted: bool,
    pub fill: Rgb,
    pub ink: Rgb,
}

/// Everything a renderer needs for one frame. Composed fresh from keyboard
/// state and an explicit palette; the renderer keeps nothing between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub theme: ThemeId,
    pub palette: Palette,
    pub keys: Vec<KeyFace>,
    /// The typed text, without cursor.
    pub text: String,
    pub cursor_visible: bool,
    /// A message for the user, e.g. an unavailable speech service.
    pub notice: Option<String>,
    /// Names of the selectable layouts and the index of the active one.
    pub layouts: Vec<String>,
    pub active_layout: usize,
}

impl Scene {
    pub(crate) fn compose(
        keyboard: &Keyboard,
        theme: ThemeId,
        cursor_visible: bool,
        notice: Option<&str>,
    ) -> Self {
        let palette = theme.palette();
        let shift = keyboard.is_shift_active();
        let active = keyboard.active_key();

        let keys = keyboard
            .key_rectangles()
            .into_iter()
            .map(|key| {
                let (caption, highlighted) = match key.label {
                    KeyLabel::Char(c) => {
                        let shown = if shift {
                            c.to_ascii_uppercase()
                        } else {
                            c.to_ascii_lowercase()
                        };
                        (shown.to_string(), active == Some(KeyLabel::Char(shown)))
                    }
                    KeyLabel::Caps => (key.label.to_string(), shift || active == Some(KeyLabel::Caps)),
                    label => (label.to_string(), active == Some(label)),
                };

                KeyFace {
                    label: key.label,
                    rect: key.rect,
                    caption,
                    highlighted,
                    fill: if highlighted {
                        palette.key_active
                    } else {
                        palette.key
                    },
                    ink: palette.text,
                }
            })
            .collect();

        Self {
            theme,
            palette,
            keys,
            text: keyboard.current_text(),
            cursor_visible,
            notice: notice.map(str::to_owned),
            layouts: keyboard.layouts().names().map(str::to_owned).collect(),
            active_layout: keyboard.layouts().active_index(),
        }
    }

    /// The text as displayed, with a `|` cursor appended while visible.
    pub fn display_text(&self) -> String {
        if self.cursor_visible {
            format!("{}|", self.text)
        } else {
            self.text.clone()
        }
    }

    /// The face drawn for `label`, if it is on screen.
    pub fn key(&self, label: KeyLabel) -> Option<&KeyFace> {
        self.keys.iter().find(|face| face.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variant;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_captions_follow_shift() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);

        let scene = Scene::compose(&kbd, ThemeId::Light, true, None);
        assert_eq!(scene.key(KeyLabel::Char('Q')).unwrap().caption, "q");
        assert_eq!(scene.key(KeyLabel::Char('1')).unwrap().caption, "1");
        assert_eq!(scene.key(KeyLabel::Space).unwrap().caption, "Space");

        kbd.toggle_caps_lock();
        let scene = Scene::compose(&kbd, ThemeId::Light, true, None);
        assert_eq!(scene.key(KeyLabel::Char('Q')).unwrap().caption, "Q");
    }

    #[test]
    fn test_highlight_uses_active_palette_colour() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.press_character('g');

        let scene = Scene::compose(&kbd, ThemeId::Dark, false, None);
        let g = scene.key(KeyLabel::Char('G')).unwrap();
        assert!(g.highlighted);
        assert_eq!(g.fill, ThemeId::Dark.palette().key_active);
        assert_eq!(g.ink, ThemeId::Dark.palette().text);

        let h = scene.key(KeyLabel::Char('H')).unwrap();
        assert!(!h.highlighted);
        assert_eq!(h.fill, ThemeId::Dark.palette().key);

        assert_eq!(scene.keys.iter().filter(|k| k.highlighted).count(), 1);
    }

    /// Caps stays lit for as long as shift is on.
    #[test]
    fn test_caps_lit_while_shift_active() {
        let mut kbd = Keyboard::for_variant(Variant::Desktop);
        kbd.toggle_caps_lock();
        kbd.press_character('a');

        let scene = Scene::compose(&kbd, ThemeId::Light, false, None);
        assert!(scene.key(KeyLabel::Caps).unwrap().highlighted);
        assert!(scene.key(KeyLabel::Char('A')).unwrap().highlighted);
    }

    #[test]
    fn test_text_and_cursor() {
        let mut kbd = Keyboard::for_variant(Variant::Mobile);
        kbd.press_character('h');
        kbd.press_character('i');

        let scene = Scene::compose(&kbd, ThemeId::White, true, Some("hello"));
        assert_eq!(scene.display_text(), "hi|");
        assert_eq!(scene.notice.as_deref(), Some("hello"));
        assert_eq!(scene.layouts, vec!["QWERTY (digits last)".to_owned()]);

        let scene = Scene::compose(&kbd, ThemeId::White, false, None);
        assert_eq!(scene.display_text(), "hi");
    }

    /// Every key a renderer draws is a key the hit test can find.
    #[test]
    fn test_scene_matches_hit_targets() {
        let kbd = Keyboard::for_variant(Variant::MobileAssistive);
        let scene = Scene::compose(&kbd, ThemeId::Blue, false, None);

        assert_eq!(
            scene.keys.iter().map(|k| (k.label, k.rect)).collect::<Vec<_>>(),
            kbd.key_rectangles()
                .into_iter()
                .map(|k| (k.label, k.rect))
                .collect::<Vec<_>>()
        );
    }
}
