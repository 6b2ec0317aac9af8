use eframe::egui::{RichText, Ui};

use crate::links::maps_search_url;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Ranked detail list (central panel, below the map)
// ---------------------------------------------------------------------------

/// Render the top-ranked matches with their key metrics.
///
/// The map shows every match; this list truncates to the configured display
/// count. Each entry's name links out to a maps search for the shop.
pub fn ranked_list(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    for (rank, &idx) in state
        .ranked
        .iter()
        .take(state.config.display_count)
        .enumerate()
    {
        let shop = &dataset.shops[idx];
        let url = maps_search_url(&shop.display_name, &state.config.city_name);

        ui.add_space(4.0);
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new(format!("#{}", rank + 1)).strong().size(16.0));
            ui.hyperlink_to(RichText::new(&shop.display_name).size(16.0), url);
            ui.label(
                RichText::new(shop.segment.label())
                    .color(state.segment_colors.color_for(shop.segment)),
            );
            if !shop.has_coordinates() {
                ui.label(RichText::new("(not on the map)").small().weak());
            }
        });

        ui.columns(4, |cols: &mut [Ui]| {
            metric(&mut cols[0], "Rating", format!("{:.1} / 5.0", shop.rate_stars));
            metric(
                &mut cols[1],
                "Review count",
                shop.reviews_total_count.to_string(),
            );
            metric(
                &mut cols[2],
                "Productivity score",
                format!("{:.2}", shop.nugas_score),
            );
            metric(
                &mut cols[3],
                "Social score",
                format!("{:.2}", shop.nongkrong_score),
            );
        });
        ui.separator();
    }
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).small().weak());
    ui.strong(value);
}
