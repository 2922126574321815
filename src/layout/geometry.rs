//! Key rectangles shared by the renderer and the pointer hit test.
//!
//! Both consumers call [`key_rectangles`]; there is no second table of
//! coordinates anywhere in the crate.

use super::{KeyLabel, Layout};
use crate::Variant;

/// An axis-aligned rectangle in viewport units (pixels for a canvas, cells
/// for a terminal).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns `true` if the point lies strictly inside the rectangle. Points
    /// on a border belong to no key.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.right() && y > self.y && y < self.bottom()
    }
}

/// Key sizes and margins.
///
/// Defaults match a 700 unit wide canvas keyboard with 40 x 30 keys.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyMetrics {
    pub key_width: f32,
    pub key_height: f32,
    /// Gap between neighbouring keys and between rows.
    pub spacing: f32,
    /// Distance from the top of the viewport to the first letter row.
    pub top_margin: f32,
    pub space_width: f32,
    /// Width of control row keys other than Space.
    pub control_width: f32,
    /// Width of each key in the assist row.
    pub assist_width: f32,
}

impl Default for KeyMetrics {
    fn default() -> Self {
        Self {
            key_width: 40.0,
            key_height: 30.0,
            spacing: 6.0,
            top_margin: 60.0,
            space_width: 300.0,
            control_width: 80.0,
            assist_width: 80.0,
        }
    }
}

impl KeyMetrics {
    fn pitch_x(&self) -> f32 {
        self.key_width + self.spacing
    }

    fn pitch_y(&self) -> f32 {
        self.key_height + self.spacing
    }

    fn control_key_width(&self, label: KeyLabel) -> f32 {
        match label {
            KeyLabel::Space => self.space_width,
            _ => self.control_width,
        }
    }
}

/// The fixed keys drawn below the letter rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlPanel {
    /// Keys of the row directly below the last letter row, left to right.
    pub controls: Vec<KeyLabel>,
    /// Keys of the optional row below the control row.
    pub assist: Vec<KeyLabel>,
}

impl ControlPanel {
    /// The control keys each variant offers.
    pub fn for_variant(variant: Variant) -> Self {
        use KeyLabel::*;

        match variant {
            Variant::Desktop => Self {
                controls: vec![Caps, Space, Delete],
                assist: vec![Speak],
            },
            Variant::Mobile => Self {
                controls: vec![Caps, Space, Delete, Enter],
                assist: Vec::new(),
            },
            Variant::MobileAssistive => Self {
                controls: vec![Caps, Space, Delete, Enter],
                assist: vec![Speak, Theme],
            },
        }
    }
}

/// A key and the rectangle it occupies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyRect {
    /// For character keys, the canonical (uppercase) label.
    pub label: KeyLabel,
    pub rect: Rect,
}

/// Lays out every key of `layout` and `panel` for a viewport `viewport_width`
/// units wide.
///
/// Each letter row is centred on its own. The control row sits one row pitch
/// below the last letter row and the assist row one pitch below that, each
/// centred as a group. Rectangles are returned in row-major order.
///
/// ```
/// use ::softkeys::{layout::{self, key_rectangles, ControlPanel, KeyLabel, KeyMetrics}, Variant};
///
/// let rects = key_rectangles(
///     &layout::qwerty(),
///     &ControlPanel::for_variant(Variant::Desktop),
///     &KeyMetrics::default(),
///     700.0,
/// );
/// // The digit row is 10 keys of 46 units: (700 - 460) / 2 = 120.
/// assert_eq!(rects[0].label, KeyLabel::Char('1'));
/// assert_eq!(rects[0].rect.x, 120.0);
/// assert_eq!(rects[0].rect.y, 60.0);
/// ```
pub fn key_rectangles(
    layout: &Layout,
    panel: &ControlPanel,
    metrics: &KeyMetrics,
    viewport_width: f32,
) -> Vec<KeyRect> {
    let key_count: usize = layout.rows().iter().map(Vec::len).sum();
    let mut rects = Vec::with_capacity(key_count + panel.controls.len() + panel.assist.len());

    for (r, row) in layout.rows().iter().enumerate() {
        let offset_x = (viewport_width - row.len() as f32 * metrics.pitch_x()) / 2.0;
        let y = metrics.top_margin + r as f32 * metrics.pitch_y();
        rects.extend(row.iter().enumerate().map(|(i, &c)| KeyRect {
            label: KeyLabel::Char(c),
            rect: Rect::new(
                offset_x + i as f32 * metrics.pitch_x(),
                y,
                metrics.key_width,
                metrics.key_height,
            ),
        }));
    }

    let control_y = metrics.top_margin + layout.rows().len() as f32 * metrics.pitch_y();
    push_centred_row(
        &mut rects,
        &panel.controls,
        control_y,
        viewport_width,
        metrics,
        |label| metrics.control_key_width(label),
    );
    push_centred_row(
        &mut rects,
        &panel.assist,
        control_y + metrics.pitch_y(),
        viewport_width,
        metrics,
        |_| metrics.assist_width,
    );

    rects
}

fn push_centred_row(
    rects: &mut Vec<KeyRect>,
    labels: &[KeyLabel],
    y: f32,
    viewport_width: f32,
    metrics: &KeyMetrics,
    width_of: impl Fn(KeyLabel) -> f32,
) {
    if labels.is_empty() {
        return;
    }

    let total = labels.iter().map(|&l| width_of(l)).sum::<f32>()
        + (labels.len() - 1) as f32 * metrics.spacing;
    let mut x = (viewport_width - total) / 2.0;
    for &label in labels {
        let width = width_of(label);
        rects.push(KeyRect {
            label,
            rect: Rect::new(x, y, width, metrics.key_height),
        });
        x += width + metrics.spacing;
    }
}

/// Finds the key under `(x, y)`. Scans in row-major order and returns the
/// first match.
pub fn hit_test(rects: &[KeyRect], x: f32, y: f32) -> Option<KeyLabel> {
    rects
        .iter()
        .find(|key| key.rect.contains(x, y))
        .map(|key| key.label)
}
