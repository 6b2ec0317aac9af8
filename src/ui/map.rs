use eframe::egui::Ui;
use egui_plot::{MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Location map (lat/lon scatter of the matching shops)
// ---------------------------------------------------------------------------

/// Render the matching shops as pins on a coordinate plot.
///
/// Every match with coordinates gets a pin; shops without coordinates are
/// silently left to the detail list. Hovering a pin shows its display name
/// and rating.
pub fn location_map(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let [center_lat, center_lon] = state.config.map_center;
    let pin_color = state.segment_colors.color_for(state.criteria.segment);

    Plot::new("location_map")
        .height(360.0)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(center_lon)
        .include_y(center_lat)
        .label_formatter(|name, _value| name.to_string())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &idx in &state.ranked {
                let shop = &dataset.shops[idx];
                let (Some(lat), Some(lon)) = (shop.latitude, shop.longitude) else {
                    continue;
                };

                let points: PlotPoints = vec![[lon, lat]].into();
                let pin = Points::new(points)
                    .name(format!("{} — {:.1} stars", shop.display_name, shop.rate_stars))
                    .color(pin_color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(5.0);

                plot_ui.points(pin);
            }
        });
}
