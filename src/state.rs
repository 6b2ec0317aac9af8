use std::path::Path;
use std::sync::Arc;

use crate::color::SegmentColors;
use crate::config::AppConfig;
use crate::data::filter::{FilterCriteria, ranked_indices};
use crate::data::loader;
use crate::data::model::{Segment, ShopDataset};

// ---------------------------------------------------------------------------
// Persona – the user intent behind the segment filter
// ---------------------------------------------------------------------------

/// A named user intent, each mapping to exactly one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Work,
    Social,
    Both,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Work, Persona::Social, Persona::Both];

    pub fn label(&self) -> &'static str {
        match self {
            Persona::Work => "I want to work/study",
            Persona::Social => "I want to socialize",
            Persona::Both => "I want the best of both",
        }
    }

    pub fn segment(&self) -> Segment {
        match self {
            Persona::Work => Segment::ProductivityHub,
            Persona::Social => Segment::SocialHotspot,
            Persona::Both => Segment::AllRounder,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded and classified dataset (None until a source loads).
    pub dataset: Option<Arc<ShopDataset>>,

    /// Current persona choice; kept in sync with `criteria.segment`.
    pub persona: Persona,

    /// The three filter knobs.
    pub criteria: FilterCriteria,

    /// Indices of shops passing the criteria, ranked by rating (cached).
    pub ranked: Vec<usize>,

    /// Fixed segment → colour mapping for pins and badges.
    pub segment_colors: SegmentColors,

    /// Fetched avatar image, if the lookup succeeded.
    pub avatar: Option<Arc<[u8]>>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let persona = Persona::Work;
        let criteria = FilterCriteria {
            segment: persona.segment(),
            min_rating: config.min_rating_default,
            min_reviews: config.min_reviews_default,
        };
        AppState {
            config,
            dataset: None,
            persona,
            criteria,
            ranked: Vec::new(),
            segment_colors: SegmentColors::default(),
            avatar: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and rank it against the current
    /// criteria.
    pub fn set_dataset(&mut self, dataset: Arc<ShopDataset>) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Load (or re-use the cached) dataset from a path. A failed load keeps
    /// whatever dataset was already on screen and surfaces the error in the
    /// top bar.
    pub fn load_from_path(&mut self, path: &Path) {
        match loader::load_cached(path) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} shops from {} (medians: nugas {:.3}, nongkrong {:.3})",
                    dataset.len(),
                    path.display(),
                    dataset.median_nugas,
                    dataset.median_nongkrong
                );
                self.config.dataset_path = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute the ranked indices after any criteria change.
    pub fn refilter(&mut self) {
        self.ranked = match &self.dataset {
            Some(ds) => ranked_indices(ds, &self.criteria),
            None => Vec::new(),
        };
    }

    /// Switch persona, which also switches the segment criterion.
    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
        self.criteria.segment = persona.segment();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CoffeeShop, clean_display_name};

    fn shop(name: &str, rating: f64, nugas: f64, nongkrong: f64) -> CoffeeShop {
        CoffeeShop {
            organization_name: name.to_string(),
            display_name: clean_display_name(Some(name)),
            latitude: None,
            longitude: None,
            rate_stars: rating,
            reviews_total_count: 100,
            nugas_score: nugas,
            nongkrong_score: nongkrong,
            segment: Segment::GeneralPurpose,
        }
    }

    #[test]
    fn persona_maps_to_exactly_one_segment() {
        assert_eq!(Persona::Work.segment(), Segment::ProductivityHub);
        assert_eq!(Persona::Social.segment(), Segment::SocialHotspot);
        assert_eq!(Persona::Both.segment(), Segment::AllRounder);
    }

    #[test]
    fn persona_switch_reranks() {
        let mut state = AppState::new(AppConfig::default());
        state.criteria.min_rating = 4.0;
        state.criteria.min_reviews = 0;
        state.set_dataset(Arc::new(ShopDataset::from_shops(vec![
            shop("hub", 4.2, 0.9, 0.1),
            shop("social", 4.8, 0.1, 0.9),
        ])));

        assert_eq!(state.persona, Persona::Work);
        assert_eq!(state.ranked, vec![0]);

        state.set_persona(Persona::Social);
        assert_eq!(state.ranked, vec![1]);
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::new(AppConfig::default());
        state.criteria.min_rating = 4.0;
        state.criteria.min_reviews = 0;
        state.set_dataset(Arc::new(ShopDataset::from_shops(vec![shop(
            "hub", 4.2, 0.9, 0.1,
        )])));
        assert_eq!(state.ranked, vec![0]);

        state.load_from_path(Path::new("definitely/not/here.csv"));
        assert!(state.status_message.is_some());
        assert!(state.dataset.is_some());
        assert_eq!(state.ranked, vec![0]);
    }
}
