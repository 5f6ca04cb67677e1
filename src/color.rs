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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Category colours: location label → Color32
// ---------------------------------------------------------------------------

/// Maps location labels to distinct colours for the filter swatches.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new(labels: &[String]) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(generate_palette(labels.len()))
            .collect();
        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scale: price → viridis
// ---------------------------------------------------------------------------

/// Viridis anchor colours, evenly spaced over [0, 1].
const VIRIDIS: [(f32, f32, f32); 5] = [
    (0.267, 0.005, 0.329),
    (0.231, 0.322, 0.545),
    (0.129, 0.569, 0.549),
    (0.369, 0.788, 0.384),
    (0.993, 0.906, 0.144),
];

/// Colour at `t` ∈ [0, 1] on the viridis ramp, mixed in linear RGB.
pub fn viridis(t: f64) -> Color32 {
    let t = (if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }) as f32;
    let segments = (VIRIDIS.len() - 1) as f32;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let local = pos - i as f32;

    let anchor = |(r, g, b): (f32, f32, f32)| -> LinSrgb { Srgb::new(r, g, b).into_linear() };
    let mixed = anchor(VIRIDIS[i]).mix(anchor(VIRIDIS[i + 1]), local);
    to_color32(Srgb::from_linear(mixed))
}

/// Linear normalisation of a value range onto the viridis ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Scale spanning `values`; `None` when there are none.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some(ColorScale { min: v, max: v }),
                Some(s) => Some(ColorScale {
                    min: s.min.min(v),
                    max: s.max.max(v),
                }),
            })
    }

    /// Position of `value` on the scale; a flat range maps to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            0.5
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        viridis(self.normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..4 {
            for j in i + 1..4 {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_unknown_category_is_gray() {
        let colors = CategoryColors::new(&["INLAND".to_string(), "ISLAND".to_string()]);
        assert_ne!(colors.color_for("INLAND"), colors.color_for("ISLAND"));
        assert_eq!(colors.color_for("Urban"), Color32::GRAY);
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), viridis(-1.0));
        assert_eq!(viridis(1.0), viridis(2.0));
        assert_ne!(viridis(0.0), viridis(1.0));
        let top = viridis(1.0);
        assert!(top.r() > 240 && top.g() > 220);
    }

    #[test]
    fn test_scale_normalize() {
        let scale = ColorScale::spanning([100.0, 300.0, 200.0]).unwrap();
        assert_eq!(scale.normalize(100.0), 0.0);
        assert_eq!(scale.normalize(200.0), 0.5);
        assert_eq!(scale.normalize(300.0), 1.0);
        let flat = ColorScale::spanning([5.0]).unwrap();
        assert_eq!(flat.normalize(5.0), 0.5);
        assert_eq!(ColorScale::spanning(std::iter::empty()), None);
    }
}
