use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Country → Color32
// ---------------------------------------------------------------------------

/// One colour per country, fixed for the lifetime of a loaded file so that
/// filtering does not reshuffle the legend.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(countries: &BTreeSet<String>) -> Self {
        let palette = generate_palette(countries.len());
        let mapping = countries.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Grey for anything the map has not seen.
    pub fn color_for(&self, country: &str) -> Color32 {
        self.mapping.get(country).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        let unique: BTreeSet<[u8; 4]> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_country_is_grey() {
        let countries: BTreeSet<String> = ["France", "Spain"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&countries);
        assert_ne!(map.color_for("France"), map.color_for("Spain"));
        assert_eq!(map.color_for("Atlantis"), Color32::GRAY);
    }
}
