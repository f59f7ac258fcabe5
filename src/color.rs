use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::series::Series;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_color(hue: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct hues.
pub fn generate_hues(n: usize) -> Vec<f32> {
    (0..n).map(|i| (i as f32 / n as f32) * 360.0).collect()
}

/// Resolve a CSS colour name used by plot layouts.
pub fn named_color(name: &str) -> Option<Color32> {
    match name.to_ascii_lowercase().as_str() {
        "white" => Some(Color32::WHITE),
        "black" => Some(Color32::BLACK),
        "gray" | "grey" => Some(Color32::GRAY),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: series → Color32
// ---------------------------------------------------------------------------

/// Colours for the plotted series. Each country gets its own hue and its
/// indicators are told apart by lightness, so a legend group reads as one
/// colour family.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: BTreeMap<(String, String), Color32>,
    default_color: Color32,
}

impl SeriesColors {
    pub fn new(series: &[Series]) -> Self {
        let mut by_country: Vec<(&str, Vec<&str>)> = Vec::new();
        for s in series {
            let group = s.legend_group();
            match by_country.iter_mut().find(|(c, _)| *c == group) {
                Some((_, indicators)) => indicators.push(s.indicator.as_str()),
                None => by_country.push((group, vec![s.indicator.as_str()])),
            }
        }

        let hues = generate_hues(by_country.len());
        let mut mapping = BTreeMap::new();
        for ((country, indicators), hue) in by_country.iter().zip(hues) {
            let n = indicators.len();
            for (i, indicator) in indicators.iter().enumerate() {
                let lightness = if n == 1 {
                    0.5
                } else {
                    0.35 + 0.35 * i as f32 / (n - 1) as f32
                };
                mapping.insert(
                    (country.to_string(), indicator.to_string()),
                    hsl_color(hue, lightness),
                );
            }
        }

        SeriesColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a series.
    pub fn color_for(&self, series: &Series) -> Color32 {
        self.mapping
            .get(&(series.country.clone(), series.indicator.clone()))
            .copied()
            .unwrap_or(self.default_color)
    }
}
