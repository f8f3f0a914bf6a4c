use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static FONT_MEASURER: Lazy<Mutex<FontMeasurer>> = Lazy::new(|| Mutex::new(FontMeasurer::new()));

/// Width of `text` using the installed font for `font_family`, or `None` when
/// no matching face can be loaded.
pub(super) fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = FONT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct FontMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<Advances>>,
}

impl FontMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = font_family.trim().to_ascii_lowercase();
        if !self.faces.contains_key(&key) {
            let advances = self.load(font_family);
            if advances.is_none() {
                tracing::debug!(family = font_family, "no font face found, using glyph table");
            }
            self.faces.insert(key.clone(), advances);
        }
        let advances = self.faces.get(&key)?.as_ref()?;
        Some(advances.width(text, font_size))
    }

    fn load(&mut self, font_family: &str) -> Option<Advances> {
        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names.iter().copied().map(family_for).collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let id = self.db.query(&Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;
        self.db
            .with_face_data(id, |data, index| Advances::parse(data, index))
            .flatten()
    }
}

fn family_for(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

/// Horizontal advances pulled out of a face, so the font bytes need not be kept.
struct Advances {
    units_per_em: f32,
    ascii: [u16; 128],
    other: HashMap<char, u16>,
}

impl Advances {
    fn parse(data: &[u8], index: u32) -> Option<Self> {
        let face = Face::parse(data, index).ok()?;
        let advance = |ch: char| {
            face.glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .unwrap_or(0)
        };
        let mut ascii = [0u16; 128];
        for (byte, slot) in ascii.iter_mut().enumerate() {
            *slot = advance(char::from(byte as u8));
        }
        // Latin-1 supplement and general punctuation cover most labels beyond ASCII.
        let other = ('\u{a0}'..='\u{ff}')
            .chain('\u{2010}'..='\u{2027}')
            .filter_map(|ch| {
                let value = advance(ch);
                (value > 0).then_some((ch, value))
            })
            .collect();
        Some(Self {
            units_per_em: f32::from(face.units_per_em().max(1)),
            ascii,
            other,
        })
    }

    fn width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em;
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                let units = if ch.is_ascii() {
                    self.ascii[ch as usize]
                } else {
                    self.other.get(&ch).copied().unwrap_or(0)
                };
                if units == 0 {
                    super::glyph_width_factor(ch) * font_size
                } else {
                    f32::from(units) * scale
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_families_map_to_fontdb_generics() {
        assert_eq!(family_for("Serif"), Family::Serif);
        assert_eq!(family_for("system-ui"), Family::SansSerif);
        assert_eq!(family_for("Fira Code"), Family::Name("Fira Code"));
    }

    #[test]
    fn empty_text_is_zero_width() {
        assert_eq!(measure_text_width("", 14.0, "sans-serif"), Some(0.0));
    }

    #[test]
    fn measured_width_is_never_negative() {
        if let Some(width) = measure_text_width("Hello", 14.0, "sans-serif") {
            assert!(width > 0.0);
        }
    }
}
