use super::model::{Segment, ShopDataset};

// ---------------------------------------------------------------------------
// Filter criteria: the three user-selected knobs
// ---------------------------------------------------------------------------

/// The three criteria driving the recommendation view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub segment: Segment,
    pub min_rating: f64,
    pub min_reviews: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            segment: Segment::ProductivityHub,
            min_rating: 4.5,
            min_reviews: 50,
        }
    }
}

impl FilterCriteria {
    fn matches(&self, dataset: &ShopDataset, idx: usize) -> bool {
        let shop = &dataset.shops[idx];
        shop.segment == self.segment
            && shop.rate_stars >= self.min_rating
            && shop.reviews_total_count >= self.min_reviews
    }
}

/// Return indices of shops that pass the criteria, ranked by rating.
///
/// Ordering is descending by `rate_stars`; the sort is stable so ties keep
/// their source order. An empty result is a normal outcome, not an error.
/// Truncation to a display count is the list renderer's concern, not done
/// here.
pub fn ranked_indices(dataset: &ShopDataset, criteria: &FilterCriteria) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..dataset.len())
        .filter(|&i| criteria.matches(dataset, i))
        .collect();
    indices.sort_by(|&a, &b| {
        dataset.shops[b]
            .rate_stars
            .total_cmp(&dataset.shops[a].rate_stars)
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CoffeeShop, ShopDataset, clean_display_name};

    fn shop(name: &str, rating: f64, reviews: u32, nugas: f64, nongkrong: f64) -> CoffeeShop {
        CoffeeShop {
            organization_name: name.to_string(),
            display_name: clean_display_name(Some(name)),
            latitude: None,
            longitude: None,
            rate_stars: rating,
            reviews_total_count: reviews,
            nugas_score: nugas,
            nongkrong_score: nongkrong,
            segment: Segment::GeneralPurpose,
        }
    }

    /// Medians end up at nugas 0.55 / nongkrong 0.45, so the four shops land
    /// in the four distinct segments in order.
    fn quadrant_dataset() -> ShopDataset {
        ShopDataset::from_shops(vec![
            shop("all", 4.6, 120, 0.9, 0.8),
            shop("social", 4.8, 300, 0.2, 0.8),
            shop("hub", 4.2, 80, 0.9, 0.1),
            shop("plain", 4.9, 500, 0.1, 0.1),
        ])
    }

    #[test]
    fn selects_exactly_the_matching_segment() {
        let ds = quadrant_dataset();
        let criteria = FilterCriteria {
            segment: Segment::ProductivityHub,
            min_rating: 4.0,
            min_reviews: 0,
        };
        assert_eq!(ranked_indices(&ds, &criteria), vec![2]);
    }

    #[test]
    fn respects_rating_and_review_thresholds() {
        let ds = ShopDataset::from_shops(vec![
            shop("low rating", 4.1, 500, 0.9, 0.9),
            shop("few reviews", 4.9, 10, 0.9, 0.9),
            shop("passes", 4.6, 200, 0.9, 0.9),
        ]);
        let criteria = FilterCriteria {
            segment: Segment::AllRounder,
            min_rating: 4.5,
            min_reviews: 50,
        };
        let ranked = ranked_indices(&ds, &criteria);
        assert_eq!(ranked, vec![2]);
        for &i in &ranked {
            let s = &ds.shops[i];
            assert!(s.rate_stars >= criteria.min_rating);
            assert!(s.reviews_total_count >= criteria.min_reviews);
            assert_eq!(s.segment, criteria.segment);
        }
    }

    #[test]
    fn ranks_descending_with_stable_ties() {
        let ds = ShopDataset::from_shops(vec![
            shop("first 4.5", 4.5, 100, 0.9, 0.9),
            shop("best", 4.9, 100, 0.9, 0.9),
            shop("second 4.5", 4.5, 100, 0.9, 0.9),
        ]);
        let criteria = FilterCriteria {
            segment: Segment::AllRounder,
            min_rating: 4.0,
            min_reviews: 0,
        };
        let ranked = ranked_indices(&ds, &criteria);
        assert_eq!(ranked, vec![1, 0, 2]);
        for pair in ranked.windows(2) {
            assert!(ds.shops[pair[0]].rate_stars >= ds.shops[pair[1]].rate_stars);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = ShopDataset::from_shops(vec![
            shop("a", 4.7, 120, 0.9, 0.9),
            shop("b", 4.3, 300, 0.8, 0.8),
            shop("c", 4.9, 80, 0.7, 0.7),
            shop("d", 4.9, 500, 0.1, 0.1),
        ]);
        let criteria = FilterCriteria {
            segment: Segment::AllRounder,
            min_rating: 4.0,
            min_reviews: 0,
        };
        let once = ranked_indices(&ds, &criteria);
        // Re-filtering the already filtered subset must not change it.
        // Segments are fixed at classification time, so the subset keeps
        // them (and the medians it was classified against).
        let survivors = ShopDataset {
            shops: once.iter().map(|&i| ds.shops[i].clone()).collect(),
            median_nugas: ds.median_nugas,
            median_nongkrong: ds.median_nongkrong,
        };
        let twice: Vec<&str> = ranked_indices(&survivors, &criteria)
            .into_iter()
            .map(|i| survivors.shops[i].display_name.as_str())
            .collect();
        let expected: Vec<&str> = once
            .iter()
            .map(|&i| ds.shops[i].display_name.as_str())
            .collect();
        assert_eq!(twice, expected);
    }

    #[test]
    fn zero_matches_is_empty_not_an_error() {
        let ds = quadrant_dataset();
        let criteria = FilterCriteria {
            segment: Segment::AllRounder,
            min_rating: 5.0,
            min_reviews: 10_000,
        };
        assert!(ranked_indices(&ds, &criteria).is_empty());
    }
}
