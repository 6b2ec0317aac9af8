use std::fmt;

// ---------------------------------------------------------------------------
// Segment – derived classification of a shop
// ---------------------------------------------------------------------------

/// Which kind of visit a coffee shop is best suited for, relative to the
/// rest of the loaded corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// High on both the productivity and the social score.
    AllRounder,
    /// High productivity score only.
    ProductivityHub,
    /// High social score only.
    SocialHotspot,
    /// Below the corpus median on both scores.
    GeneralPurpose,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::AllRounder,
        Segment::ProductivityHub,
        Segment::SocialHotspot,
        Segment::GeneralPurpose,
    ];

    /// Classify a shop's two scores against the corpus medians.
    /// A score equal to the median counts as high.
    pub fn classify(
        nugas_score: f64,
        nongkrong_score: f64,
        median_nugas: f64,
        median_nongkrong: f64,
    ) -> Segment {
        let nugas_high = nugas_score >= median_nugas;
        let nongkrong_high = nongkrong_score >= median_nongkrong;
        match (nugas_high, nongkrong_high) {
            (true, true) => Segment::AllRounder,
            (true, false) => Segment::ProductivityHub,
            (false, true) => Segment::SocialHotspot,
            (false, false) => Segment::GeneralPurpose,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Segment::AllRounder => "All-Rounder",
            Segment::ProductivityHub => "Productivity Hub",
            Segment::SocialHotspot => "Social Hotspot",
            Segment::GeneralPurpose => "General Purpose",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CoffeeShop – one row of the source dataset
// ---------------------------------------------------------------------------

/// A single coffee shop (one row of the source table).
#[derive(Debug, Clone)]
pub struct CoffeeShop {
    /// Raw name field as it appears in the source.
    pub organization_name: String,
    /// Cleaned name used everywhere in the UI.
    pub display_name: String,
    /// Missing coordinates exclude the shop from the map, not from the list.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Star rating, normally within [1.0, 5.0].
    pub rate_stars: f64,
    pub reviews_total_count: u32,
    /// Normalized suitability for focused work.
    pub nugas_score: f64,
    /// Normalized suitability for hanging out.
    pub nongkrong_score: f64,
    /// Assigned by [`ShopDataset::from_shops`]; meaningless before that.
    pub segment: Segment,
}

impl CoffeeShop {
    /// Whether the shop can be placed on the map.
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Derive the display name from the raw organization name.
///
/// Strips the `"Alamat: "` address prefix, keeps only the part before the
/// first comma, and trims. An absent or blank raw field yields the
/// `"Unknown Name"` sentinel so the UI never renders an empty label.
pub fn clean_display_name(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "Unknown Name".to_string();
    };
    let cleaned = raw.replace("Alamat: ", "");
    let first = cleaned.split(',').next().unwrap_or("").trim();
    if first.is_empty() {
        "Unknown Name".to_string()
    } else {
        first.to_string()
    }
}

// ---------------------------------------------------------------------------
// ShopDataset – the complete classified dataset
// ---------------------------------------------------------------------------

/// The full loaded dataset together with the medians it was classified
/// against. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ShopDataset {
    /// All shops, in source order.
    pub shops: Vec<CoffeeShop>,
    /// Corpus median of the productivity score.
    pub median_nugas: f64,
    /// Corpus median of the social score.
    pub median_nongkrong: f64,
}

impl ShopDataset {
    /// Compute the two corpus medians and assign every shop its segment.
    ///
    /// Medians are computed once here, over the whole corpus; filtering
    /// later never changes them.
    pub fn from_shops(mut shops: Vec<CoffeeShop>) -> Self {
        let nugas: Vec<f64> = shops.iter().map(|s| s.nugas_score).collect();
        let nongkrong: Vec<f64> = shops.iter().map(|s| s.nongkrong_score).collect();
        let median_nugas = median(&nugas);
        let median_nongkrong = median(&nongkrong);

        for shop in &mut shops {
            shop.segment = Segment::classify(
                shop.nugas_score,
                shop.nongkrong_score,
                median_nugas,
                median_nongkrong,
            );
        }

        ShopDataset {
            shops,
            median_nugas,
            median_nongkrong,
        }
    }

    /// Number of shops.
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

/// Standard median: mean of the two middle values for even counts.
/// An empty slice yields 0.0 (only reachable for an empty dataset).
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(name: &str, nugas: f64, nongkrong: f64) -> CoffeeShop {
        CoffeeShop {
            organization_name: name.to_string(),
            display_name: clean_display_name(Some(name)),
            latitude: None,
            longitude: None,
            rate_stars: 4.5,
            reviews_total_count: 100,
            nugas_score: nugas,
            nongkrong_score: nongkrong,
            segment: Segment::GeneralPurpose,
        }
    }

    #[test]
    fn display_name_strips_prefix_and_suffix() {
        assert_eq!(
            clean_display_name(Some("Alamat: Jl. Malioboro, Yogyakarta")),
            "Jl. Malioboro"
        );
        assert_eq!(clean_display_name(Some("Kopi Santai")), "Kopi Santai");
        assert_eq!(
            clean_display_name(Some("  Ruang Seduh , Jl. Kaliurang ")),
            "Ruang Seduh"
        );
    }

    #[test]
    fn display_name_falls_back_to_sentinel() {
        assert_eq!(clean_display_name(None), "Unknown Name");
        assert_eq!(clean_display_name(Some("")), "Unknown Name");
        assert_eq!(clean_display_name(Some("   ,rest")), "Unknown Name");
    }

    #[test]
    fn median_odd_even_empty() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[0.9, 0.2, 0.9, 0.1]), 0.55);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn classification_covers_all_quadrants() {
        // Medians: nugas 0.55, nongkrong 0.45.
        let shops = vec![
            shop("a", 0.9, 0.8),
            shop("b", 0.2, 0.8),
            shop("c", 0.9, 0.1),
            shop("d", 0.1, 0.1),
        ];
        let ds = ShopDataset::from_shops(shops);
        assert_eq!(ds.median_nugas, 0.55);
        assert_eq!(ds.median_nongkrong, 0.45);
        let segments: Vec<Segment> = ds.shops.iter().map(|s| s.segment).collect();
        assert_eq!(
            segments,
            vec![
                Segment::AllRounder,
                Segment::SocialHotspot,
                Segment::ProductivityHub,
                Segment::GeneralPurpose,
            ]
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let shops = vec![
            shop("a", 0.9, 0.8),
            shop("b", 0.2, 0.8),
            shop("c", 0.9, 0.1),
            shop("d", 0.1, 0.1),
        ];
        let first = ShopDataset::from_shops(shops.clone());
        let second = ShopDataset::from_shops(shops);
        let a: Vec<Segment> = first.shops.iter().map(|s| s.segment).collect();
        let b: Vec<Segment> = second.shops.iter().map(|s| s.segment).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn score_equal_to_median_counts_as_high() {
        assert_eq!(Segment::classify(0.5, 0.5, 0.5, 0.5), Segment::AllRounder);
        assert_eq!(
            Segment::classify(0.5, 0.49, 0.5, 0.5),
            Segment::ProductivityHub
        );
        assert_eq!(
            Segment::classify(0.49, 0.5, 0.5, 0.5),
            Segment::SocialHotspot
        );
        assert_eq!(
            Segment::classify(0.49, 0.49, 0.5, 0.5),
            Segment::GeneralPurpose
        );
    }
}
