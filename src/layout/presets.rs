//! Built-in Latin layouts.

use super::Layout;

fn preset(name: &str, rows: &[&str]) -> Layout {
    Layout {
        name: name.to_owned(),
        rows: rows.iter().map(|row| row.chars().collect()).collect(),
    }
}

/// Digits on top, then the three QWERTY letter rows.
pub fn qwerty() -> Layout {
    preset("QWERTY", &["1234567890", "QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"])
}

/// Digits on top, then the three AZERTY letter rows.
pub fn azerty() -> Layout {
    preset("AZERTY", &["1234567890", "AZERTYUIOP", "QSDFGHJKLM", "WXCVBN"])
}

/// QWERTY with the digit row below the letters, as laid out on the compact
/// mobile keyboard.
pub fn qwerty_digits_last() -> Layout {
    preset(
        "QWERTY (digits last)",
        &["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM", "1234567890"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    /// Presets bypass validation, so check they would have passed it.
    #[test]
    fn test_presets_are_valid_layouts() {
        for layout in [qwerty(), azerty(), qwerty_digits_last()] {
            let rows: Vec<String> = layout.rows().iter().map(|r| r.iter().collect()).collect();
            let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
            assert_eq!(Layout::new(layout.name(), &rows).unwrap(), layout);
        }
    }

    #[test]
    fn test_presets_cover_the_alphabet_and_digits() {
        for layout in [qwerty(), azerty(), qwerty_digits_last()] {
            for c in ('A'..='Z').chain('0'..='9') {
                assert!(layout.contains(c), "{} is missing {c}", layout.name());
            }
        }
    }
}
