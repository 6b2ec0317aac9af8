use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Segment;

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Color mapping: segment → Color32
// ---------------------------------------------------------------------------

/// Maps the four segments to distinct colours, used for map pins and the
/// segment badge in the list.
#[derive(Debug, Clone)]
pub struct SegmentColors {
    mapping: BTreeMap<Segment, Color32>,
    default_color: Color32,
}

impl Default for SegmentColors {
    fn default() -> Self {
        let palette = generate_palette(Segment::ALL.len());
        let mapping: BTreeMap<Segment, Color32> = Segment::ALL
            .iter()
            .zip(palette.into_iter())
            .map(|(s, c): (&Segment, Color32)| (*s, c))
            .collect();

        SegmentColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }
}

impl SegmentColors {
    /// Look up the colour for a segment.
    pub fn color_for(&self, segment: Segment) -> Color32 {
        self.mapping
            .get(&segment)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_segment_gets_a_distinct_color() {
        let colors = SegmentColors::default();
        let mut seen = Vec::new();
        for segment in Segment::ALL {
            let c = colors.color_for(segment);
            assert!(!seen.contains(&c), "{segment} shares a colour");
            seen.push(c);
        }
    }
}
