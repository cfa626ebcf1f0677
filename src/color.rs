use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
// Color mapping: city → Color32
// ---------------------------------------------------------------------------

/// Maps city names to distinct colours, shared by every chart that
/// groups by city.
#[derive(Debug, Clone)]
pub struct CityColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CityColors {
    /// Build a colour map from the sorted unique city list.
    pub fn new(cities: &[String]) -> Self {
        let palette = generate_palette(cities.len());
        let mapping: BTreeMap<String, Color32> = cities
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CityColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a city.
    pub fn color_for(&self, city: &str) -> Color32 {
        self.mapping
            .get(city)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging colormap for correlation coefficients
// ---------------------------------------------------------------------------

/// Map a correlation coefficient in [-1, 1] to a cool/warm colour:
/// blue for -1, white for 0, red for +1.
pub fn diverging_color(r: f64) -> Color32 {
    let t = r.clamp(-1.0, 1.0) as f32;

    let cool = LinSrgb::new(0.05, 0.08, 0.52);
    let white = LinSrgb::new(0.92, 0.92, 0.92);
    let warm = LinSrgb::new(0.48, 0.0, 0.02);

    let rgb: Srgb = Srgb::from_linear(if t < 0.0 {
        white.mix(cool, -t)
    } else {
        white.mix(warm, t)
    });

    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Readable annotation colour over a [`diverging_color`] cell.
pub fn annotation_color(r: f64) -> Color32 {
    if r.abs() > 0.55 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn city_colors_are_distinct_and_stable() {
        let cities = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let colors = CityColors::new(&cities);
        assert_ne!(colors.color_for("A"), colors.color_for("B"));
        assert_eq!(colors.color_for("A"), colors.color_for("A"));
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }

    #[test]
    fn diverging_endpoints() {
        let neg = diverging_color(-1.0);
        let pos = diverging_color(1.0);
        assert!(neg.b() > neg.r());
        assert!(pos.r() > pos.b());
        assert_eq!(annotation_color(1.0), Color32::WHITE);
        assert_eq!(annotation_color(0.1), Color32::BLACK);
    }
}
